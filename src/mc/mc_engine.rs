// src/mc/mc_engine.rs
use crate::error::{validation::*, PricingError, PricingResult};
use crate::math_utils::Timer;
use crate::mc::payoffs::DiscountedCall;
use crate::mc::stats::{RunningStats, Z_95};
use crate::models::gbm::RiskNeutralGbm;
use crate::models::market::MarketParams;
use crate::rng::{self, PolarNormal, UniformSource};
use std::fmt;
use tracing::{debug, warn};

/// Monte Carlo estimator flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// One draw, one terminal price per sample
    Plain,
    /// Two fresh draws per sample, the second mirrored, payoffs averaged
    Antithetic,
}

impl Method {
    pub fn label(&self) -> &'static str {
        match self {
            Method::Plain => "Standard",
            Method::Antithetic => "Antithetic",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of one Monte Carlo run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceEstimate {
    pub method: Method,
    pub samples: usize,
    pub estimate: f64,
    pub std_error: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    /// Seconds spent in the sampling loop
    pub elapsed_secs: f64,
}

impl PriceEstimate {
    /// SE² × elapsed time; lower is better
    pub fn efficiency(&self) -> f64 {
        self.std_error * self.std_error * self.elapsed_secs
    }

    /// Whether `value` lies inside the 95% confidence interval
    pub fn contains(&self, value: f64) -> bool {
        self.ci_lower <= value && value <= self.ci_upper
    }
}

/// European call pricer driven by a polar-method normal generator
///
/// Each pricer owns its generator. Runs are sequential; a second `run` on
/// the same pricer continues the same uniform stream but never reuses a
/// variate held over from the previous run.
pub struct MonteCarloPricer<U> {
    method: Method,
    normals: PolarNormal<U>,
}

impl<U: UniformSource> MonteCarloPricer<U> {
    pub fn new(method: Method, normals: PolarNormal<U>) -> Self {
        MonteCarloPricer { method, normals }
    }

    pub fn plain(source: U) -> Self {
        Self::new(Method::Plain, PolarNormal::new(source))
    }

    pub fn antithetic(source: U) -> Self {
        Self::new(Method::Antithetic, PolarNormal::new(source))
    }

    pub fn generator_mut(&mut self) -> &mut PolarNormal<U> {
        &mut self.normals
    }

    /// Price the call from `n` accumulated samples
    ///
    /// # Errors
    ///
    /// - `InvalidParameters` if any of S0, K, σ, τ is not positive or r, q
    ///   is not finite
    /// - `InsufficientSamples` if `n < 2`
    /// - `NumericalInstability` if the estimate or its variance is not finite
    ///
    /// Validation happens before the first draw.
    pub fn run(&mut self, params: &MarketParams, n: usize) -> PricingResult<PriceEstimate> {
        params.validate()?;
        validate_samples(n)?;

        self.normals.reset();
        let gbm = RiskNeutralGbm::new(params);
        let payoff = DiscountedCall::new(params);
        debug!(method = %self.method, samples = n, "starting Monte Carlo run");

        let timer = Timer::new();
        let stats = match self.method {
            Method::Plain => self.sample_plain(&gbm, &payoff, n),
            Method::Antithetic => self.sample_antithetic(&gbm, &payoff, n),
        };
        let elapsed_secs = timer.elapsed_secs();

        let estimate = summarize(self.method, &stats, elapsed_secs)?;
        debug!(
            method = %self.method,
            samples = n,
            price = estimate.estimate,
            std_error = estimate.std_error,
            elapsed_secs,
            "finished Monte Carlo run"
        );
        Ok(estimate)
    }

    fn sample_plain(&mut self, gbm: &RiskNeutralGbm, payoff: &DiscountedCall, n: usize) -> RunningStats {
        let mut stats = RunningStats::new();
        for _ in 0..n {
            let z = self.normals.next_normal();
            stats.push(payoff.evaluate(gbm.terminal_price(z)));
        }
        stats
    }

    // z1 and z2 are independent draws, not z and -z
    fn sample_antithetic(&mut self, gbm: &RiskNeutralGbm, payoff: &DiscountedCall, n: usize) -> RunningStats {
        let mut stats = RunningStats::new();
        for _ in 0..n {
            let z1 = self.normals.next_normal();
            let z2 = self.normals.next_normal();
            let (s_plus, s_minus) = gbm.antithetic_pair(z1, z2);
            stats.push(payoff.evaluate_pair(s_plus, s_minus));
        }
        stats
    }
}

fn summarize(method: Method, stats: &RunningStats, elapsed_secs: f64) -> PricingResult<PriceEstimate> {
    let samples = stats.count() as usize;
    let mut variance = stats
        .sample_variance()
        .ok_or(PricingError::InsufficientSamples {
            samples,
            required: MIN_SAMPLES,
        })?;

    // q - m² can round slightly below zero when payoffs are (nearly) constant
    if variance < 0.0 {
        let tolerance = 1e-10 * stats.mean_sq().max(1.0);
        if variance > -tolerance {
            warn!(%method, variance, "clamping rounding residue in variance estimate to zero");
            variance = 0.0;
        } else {
            return Err(PricingError::NumericalInstability {
                method: format!("{} Monte Carlo", method),
                reason: format!(
                    "Variance estimate became significantly negative: {}",
                    variance
                ),
            });
        }
    }

    let estimate = stats.mean();
    if !estimate.is_finite() {
        return Err(PricingError::NumericalInstability {
            method: format!("{} Monte Carlo", method),
            reason: format!("Price estimate is not finite: {}", estimate),
        });
    }
    if !variance.is_finite() {
        return Err(PricingError::NumericalInstability {
            method: format!("{} Monte Carlo", method),
            reason: format!("Variance estimate is not finite: {}", variance),
        });
    }

    let std_error = (variance / samples as f64).sqrt();
    Ok(PriceEstimate {
        method,
        samples,
        estimate,
        std_error,
        ci_lower: estimate - Z_95 * std_error,
        ci_upper: estimate + Z_95 * std_error,
        elapsed_secs,
    })
}

/// Inputs for a one-shot seeded run
#[derive(Clone, Copy, Debug)]
pub struct McConfig {
    pub market: MarketParams,
    pub samples: usize,
    pub method: Method,
    pub seed: u64,
}

impl McConfig {
    pub fn validate(&self) -> PricingResult<()> {
        self.market.validate()?;
        validate_samples(self.samples)
    }
}

impl Default for McConfig {
    fn default() -> Self {
        McConfig {
            market: MarketParams::default(),
            samples: 100_000,
            method: Method::Plain,
            seed: 12345,
        }
    }
}

/// Price with a fresh generator seeded from `cfg.seed`
pub fn mc_price_european_call(cfg: &McConfig) -> PricingResult<PriceEstimate> {
    cfg.validate()?;
    let normals = PolarNormal::new(rng::seed_rng_from_u64(cfg.seed));
    MonteCarloPricer::new(cfg.method, normals).run(&cfg.market, cfg.samples)
}
