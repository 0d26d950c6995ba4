// src/analytics/bs_analytic.rs
//! Closed-form Black-Scholes-Merton price of a European call
//!
//! # Mathematical Foundation
//!
//! Under the risk-neutral measure with continuous dividend yield q:
//! ```text
//! dS_t = (r - q) S_t dt + σ S_t dW_t
//! ```
//!
//! and the call value is
//! ```text
//! C = S₀e^(-qτ)Φ(d₁) - Ke^(-rτ)Φ(d₂)
//! d₁ = [ln(S₀/K) + (r - q)τ] / (σ√τ) + σ√τ/2
//! d₂ = d₁ - σ√τ
//! ```
//!
//! Φ is the Zelen & Severo approximation in [`crate::math_utils::norm_cdf`],
//! so prices carry its ~1e-7 error scaled by S₀ and K.

use crate::error::PricingResult;
use crate::math_utils::norm_cdf;
use crate::models::market::MarketParams;

/// `(d₁, d₂)` for the given market
pub fn d1_d2(params: &MarketParams) -> (f64, f64) {
    let vol_sqrt_t = params.sigma * params.tau.sqrt();
    let d1 = ((params.s0 / params.k).ln() + (params.r - params.q) * params.tau) / vol_sqrt_t
        + 0.5 * vol_sqrt_t;
    (d1, d1 - vol_sqrt_t)
}

/// Black-Scholes-Merton European call price
///
/// # Errors
///
/// `InvalidParameters` if any of S0, K, σ, τ is not positive or r, q is
/// not finite.
pub fn bs_call_price(params: &MarketParams) -> PricingResult<f64> {
    params.validate()?;
    let (d1, d2) = d1_d2(params);
    Ok(params.s0 * (-params.q * params.tau).exp() * norm_cdf(d1)
        - params.k * params.discount_factor() * norm_cdf(d2))
}
