// src/models/market.rs
use crate::error::{validation::*, PricingResult};

/// Market inputs for a single-strike, single-maturity European call
///
/// Fixed for a whole run. Construction never clamps; call
/// [`MarketParams::validate`] (every pricer does) before use.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarketParams {
    pub s0: f64,    // Spot price
    pub k: f64,     // Strike
    pub r: f64,     // Continuously compounded risk-free rate
    pub q: f64,     // Continuous dividend yield
    pub sigma: f64, // Volatility
    pub tau: f64,   // Time to maturity in years
}

impl MarketParams {
    pub fn new(s0: f64, k: f64, r: f64, q: f64, sigma: f64, tau: f64) -> Self {
        MarketParams {
            s0,
            k,
            r,
            q,
            sigma,
            tau,
        }
    }

    pub fn validate(&self) -> PricingResult<()> {
        validate_positive("s0", self.s0)?;
        validate_positive("k", self.k)?;
        validate_finite("r", self.r)?;
        validate_finite("q", self.q)?;
        validate_positive("sigma", self.sigma)?;
        validate_positive("tau", self.tau)?;
        Ok(())
    }

    /// e^(-rτ)
    pub fn discount_factor(&self) -> f64 {
        (-self.r * self.tau).exp()
    }
}

impl Default for MarketParams {
    /// One-week at-the-money index call
    fn default() -> Self {
        MarketParams {
            s0: 1868.99,
            k: 1870.0,
            r: 0.003866,
            q: 0.0232,
            sigma: 0.2979,
            tau: 1.0 / 52.0,
        }
    }
}
