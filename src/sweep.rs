// src/sweep.rs
//! Sample-size sweeps feeding a reporting collaborator
//!
//! Three stages, each optional:
//! 1. **Reference**: the closed-form price, once.
//! 2. **Convergence**: plain Monte Carlo over growing sample sizes. The first
//!    size is a placeholder and is never simulated.
//! 3. **Comparison**: antithetic then plain at each size. Both methods at a
//!    given size are driven by generators built from the same seed.
//!
//! Every run gets a fresh generator from [`RngFactory`]; nothing is shared
//! between runs.

use crate::analytics::bs_analytic;
use crate::error::{validation::*, PricingError, PricingResult};
use crate::mc::mc_engine::{Method, MonteCarloPricer, PriceEstimate};
use crate::models::market::MarketParams;
use crate::rng::RngFactory;
use bitflags::bitflags;
use tracing::{debug, info};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SweepStages: u32 {
        const REFERENCE   = 1 << 0;
        const CONVERGENCE = 1 << 1;
        const COMPARISON  = 1 << 2;
    }
}

/// Receives sweep results; formatting is entirely up to the implementor
pub trait SweepReporter {
    fn reference(&mut self, price: f64) -> PricingResult<()>;

    fn begin_convergence(&mut self) -> PricingResult<()> {
        Ok(())
    }

    fn convergence_row(&mut self, estimate: &PriceEstimate) -> PricingResult<()>;

    fn begin_comparison(&mut self) -> PricingResult<()> {
        Ok(())
    }

    /// One row per method; efficiency is `estimate.efficiency()`
    fn comparison_row(&mut self, estimate: &PriceEstimate) -> PricingResult<()>;

    fn finish(&mut self) -> PricingResult<()> {
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct SweepConfig {
    pub market: MarketParams,
    pub seed: u64,
    /// Plain Monte Carlo sizes; the first one is skipped
    pub convergence_sizes: Vec<usize>,
    /// Sizes at which antithetic and plain are compared
    pub comparison_sizes: Vec<usize>,
    pub stages: SweepStages,
}

impl SweepConfig {
    pub fn validate(&self) -> PricingResult<()> {
        self.market.validate()?;
        if self.stages.contains(SweepStages::CONVERGENCE) {
            if self.convergence_sizes.len() < 2 {
                return Err(PricingError::InvalidConfiguration {
                    field: "convergence_sizes".to_string(),
                    reason: "needs a leading skipped size and at least one simulated size".to_string(),
                });
            }
            for &n in &self.convergence_sizes {
                validate_samples(n)?;
            }
        }
        if self.stages.contains(SweepStages::COMPARISON) {
            if self.comparison_sizes.is_empty() {
                return Err(PricingError::InvalidConfiguration {
                    field: "comparison_sizes".to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
            for &n in &self.comparison_sizes {
                validate_samples(n)?;
            }
        }
        Ok(())
    }

    /// Same sweep with every sample size divided by `factor` (floored at 2)
    pub fn scaled_down(&self, factor: usize) -> Self {
        let shrink = |sizes: &[usize]| -> Vec<usize> {
            sizes
                .iter()
                .map(|&n| (n / factor.max(1)).max(MIN_SAMPLES))
                .collect()
        };
        SweepConfig {
            convergence_sizes: shrink(&self.convergence_sizes),
            comparison_sizes: shrink(&self.comparison_sizes),
            ..self.clone()
        }
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            market: MarketParams::default(),
            seed: 12345,
            convergence_sizes: vec![1_000, 10_000, 100_000, 1_000_000, 10_000_000],
            comparison_sizes: vec![40_000, 400_000, 4_000_000, 40_000_000],
            stages: SweepStages::all(),
        }
    }
}

/// Run the configured stages, pushing every result into `reporter`
///
/// Configuration is validated up front, so an invalid setup fails before
/// any simulation starts.
pub fn run_sweep<R: SweepReporter + ?Sized>(cfg: &SweepConfig, reporter: &mut R) -> PricingResult<()> {
    cfg.validate()?;
    let factory = RngFactory::new(cfg.seed);
    let mut run_id: u64 = 0;

    if cfg.stages.contains(SweepStages::REFERENCE) {
        let price = bs_analytic::bs_call_price(&cfg.market)?;
        info!(price, "closed-form reference price");
        reporter.reference(price)?;
    }

    if cfg.stages.contains(SweepStages::CONVERGENCE) {
        reporter.begin_convergence()?;
        if let Some(&skipped) = cfg.convergence_sizes.first() {
            debug!(samples = skipped, "skipping first convergence size");
        }
        for &n in cfg.convergence_sizes.iter().skip(1) {
            let mut pricer = MonteCarloPricer::new(Method::Plain, factory.normal_generator(run_id));
            run_id += 1;
            let estimate = pricer.run(&cfg.market, n)?;
            info!(
                samples = n,
                price = estimate.estimate,
                std_error = estimate.std_error,
                "convergence row"
            );
            reporter.convergence_row(&estimate)?;
        }
    }

    if cfg.stages.contains(SweepStages::COMPARISON) {
        reporter.begin_comparison()?;
        for &n in &cfg.comparison_sizes {
            for method in [Method::Antithetic, Method::Plain] {
                let mut pricer = MonteCarloPricer::new(method, factory.normal_generator(run_id));
                let estimate = pricer.run(&cfg.market, n)?;
                info!(
                    %method,
                    samples = n,
                    price = estimate.estimate,
                    std_error = estimate.std_error,
                    efficiency = estimate.efficiency(),
                    "comparison row"
                );
                reporter.comparison_row(&estimate)?;
            }
            run_id += 1;
        }
    }

    reporter.finish()
}
