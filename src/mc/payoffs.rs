//! Option Payoff Functions
//!
//! Only the European call is supported:
//! ```text
//! c = e^(-rτ) * max(S_τ - K, 0)
//! ```
//! The discount factor is folded into the evaluator once per run so the
//! sampling loop only does a subtraction, a max and a multiply per price.

use crate::models::market::MarketParams;

/// Discounted European call payoff
#[derive(Clone, Copy, Debug)]
pub struct DiscountedCall {
    pub k: f64,
    discount: f64,
}

impl DiscountedCall {
    pub fn new(params: &MarketParams) -> Self {
        DiscountedCall {
            k: params.k,
            discount: params.discount_factor(),
        }
    }

    /// Undiscounted payoff, never negative
    #[inline]
    pub fn intrinsic(&self, s_t: f64) -> f64 {
        (s_t - self.k).max(0.0)
    }

    /// e^(-rτ) * max(S_τ - K, 0)
    #[inline]
    pub fn evaluate(&self, s_t: f64) -> f64 {
        self.discount * self.intrinsic(s_t)
    }

    /// Average of the discounted payoffs of an antithetic pair
    #[inline]
    pub fn evaluate_pair(&self, s_plus: f64, s_minus: f64) -> f64 {
        0.5 * self.discount * (self.intrinsic(s_plus) + self.intrinsic(s_minus))
    }

    pub fn discount(&self) -> f64 {
        self.discount
    }
}
