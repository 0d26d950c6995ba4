// src/models/gbm.rs
use super::market::MarketParams;

/// Terminal-price sampler for risk-neutral geometric Brownian motion
///
/// ```text
/// S_τ = S_0 * exp((r - q - σ²/2)τ + σ√τ * Z)
/// ```
/// Drift and diffusion are folded once per run.
#[derive(Clone, Copy, Debug)]
pub struct RiskNeutralGbm {
    pub s0: f64,
    drift: f64,
    diffusion: f64,
}

impl RiskNeutralGbm {
    pub fn new(params: &MarketParams) -> Self {
        RiskNeutralGbm {
            s0: params.s0,
            drift: (params.r - params.q - 0.5 * params.sigma * params.sigma) * params.tau,
            diffusion: params.sigma * params.tau.sqrt(),
        }
    }

    pub fn terminal_price(&self, z: f64) -> f64 {
        self.s0 * (self.drift + self.diffusion * z).exp()
    }

    /// `(S+, S-)` from two draws; the second enters with its sign flipped
    pub fn antithetic_pair(&self, z1: f64, z2: f64) -> (f64, f64) {
        (
            self.s0 * (self.drift + self.diffusion * z1).exp(),
            self.s0 * (self.drift - self.diffusion * z2).exp(),
        )
    }
}
