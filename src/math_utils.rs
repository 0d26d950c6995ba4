// src/math_utils.rs
use std::time::Instant;

/// Beyond this many standard deviations the CDF is pinned to 0 or 1
pub const CDF_CLAMP: f64 = 6.0;

const P: f64 = 0.2316419;
const B1: f64 = 0.31938153;
const B2: f64 = -0.356563782;
const B3: f64 = 1.781477937;
const B4: f64 = -1.821255978;
const B5: f64 = 1.330274429;
const INV_SQRT_2PI: f64 = 0.3989423;

/// Standard normal CDF, Zelen & Severo (Abramowitz & Stegun 26.2.17)
///
/// Absolute error is below 7.5e-8. For |z| > 6 the result is exactly 0.0
/// or 1.0, which keeps `exp(-z²/2)` away from underflow.
pub fn norm_cdf(z: f64) -> f64 {
    if z > CDF_CLAMP {
        return 1.0;
    }
    if z < -CDF_CLAMP {
        return 0.0;
    }
    let t = 1.0 / (1.0 + P * z.abs());
    let density = INV_SQRT_2PI * (-z * (z / 2.0)).exp();
    let poly = ((((B5 * t + B4) * t + B3) * t + B2) * t + B1) * t;
    let upper = 1.0 - density * poly;
    if z < 0.0 {
        1.0 - upper
    } else {
        upper
    }
}

pub struct Timer {
    start_time: Instant,
}

impl Timer {
    pub fn new() -> Timer {
        Timer {
            start_time: Instant::now(),
        }
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}
