//! # bsm-montecarlo: Monte Carlo Pricing of a European Call
//!
//! Prices a European call under Black-Scholes-Merton two ways and compares
//! them:
//!
//! - **Closed form**: the BSM formula with a Zelen & Severo normal CDF
//! - **Plain Monte Carlo**: exact terminal-price sampling of risk-neutral GBM
//! - **Antithetic Monte Carlo**: paired, mirrored terminal prices per sample
//!
//! Normals come from a Marsaglia polar generator over any seeded uniform
//! source. Payoffs are accumulated in one pass, giving the estimate, its
//! standard error, a 95% confidence interval and an efficiency figure
//! (SE² × time).
//!
//! ## Quick Start
//!
//! ```rust
//! use bsm_montecarlo::mc::mc_engine::{mc_price_european_call, McConfig, Method};
//! use bsm_montecarlo::models::market::MarketParams;
//!
//! let cfg = McConfig {
//!     market: MarketParams::new(100.0, 100.0, 0.05, 0.0, 0.2, 1.0),
//!     samples: 100_000,
//!     method: Method::Antithetic,
//!     seed: 42,
//! };
//!
//! let est = mc_price_european_call(&cfg).expect("Valid configuration");
//! println!("Call price: {:.4} ± {:.4}", est.estimate, 1.96 * est.std_error);
//! ```

pub mod analytics;
pub mod error;
pub mod math_utils;
pub mod mc;
pub mod models;
pub mod output;
pub mod rng;
pub mod sweep;

// Re-export commonly used types for convenience
pub use error::{PricingError, PricingResult};
pub use mc::mc_engine::{Method, MonteCarloPricer, PriceEstimate};
pub use models::market::MarketParams;
