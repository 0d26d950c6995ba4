// src/rng.rs
//! Random Number Generation for Monte Carlo Simulations
//!
//! # Design Philosophy
//!
//! The pricers need a stream of independent standard normals with:
//! 1. **Reproducibility**: same seed gives the same price, standard error and CI
//! 2. **Owned state**: each run holds its own generator, nothing is global
//! 3. **Pluggable uniforms**: any seeded uniform source can drive the transform
//!
//! # Marsaglia Polar Method
//!
//! Draws a point uniformly in the square [-1, 1)², rejects it unless it lies
//! strictly inside the unit disk and off the origin, then maps it to two
//! independent normals:
//! ```text
//! V₁ = 2U₁ - 1,  V₂ = 2U₂ - 1,  S = V₁² + V₂²     (retry while S ≥ 1 or S = 0)
//! X₁ = V₁ * √(-2ln(S)/S)
//! X₂ = V₂ * √(-2ln(S)/S)
//! ```
//! `X₁` is returned immediately and `X₂` is held for the following call.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// A source of uniform variates on [0, 1)
pub trait UniformSource {
    fn next_uniform(&mut self) -> f64;
}

impl<R: RngCore + ?Sized> UniformSource for R {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Counter-based RNG for reproducible, stream-indexed simulations
///
/// # Algorithm
///
/// Uses a splitmix64 mix of `base_seed + counter`:
/// ```text
/// z = base_seed + counter
/// z = (z ⊕ (z >> 30)) * 0xbf58476d1ce4e5b9
/// z = (z ⊕ (z >> 27)) * 0x94d049bb133111eb
/// output = z ⊕ (z >> 31)
/// ```
#[derive(Debug, Clone)]
pub struct CounterRng {
    base_seed: u64,
    counter: u64,
}

impl CounterRng {
    pub fn new(base_seed: u64, counter: u64) -> Self {
        Self { base_seed, counter }
    }

    pub fn counter(&self) -> u64 {
        self.counter
    }
}

impl RngCore for CounterRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.counter = self.counter.wrapping_add(1);
        let mut z = self.base_seed.wrapping_add(self.counter);
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9u64);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111ebu64);
        z ^ (z >> 31)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Two-call protocol of the polar method
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PolarState {
    /// Next call performs a fresh accepted trial
    Empty,
    /// Second variate of the last trial, returned on the next call
    Holding(f64),
}

/// Standard normal generator using the Marsaglia polar method
///
/// Owns both its uniform source and its cached variate, so two generators
/// never share state. Call [`PolarNormal::reset`] to drop a held variate
/// before reusing a generator for a statistically independent run.
#[derive(Debug, Clone)]
pub struct PolarNormal<U> {
    source: U,
    state: PolarState,
}

impl<U: UniformSource> PolarNormal<U> {
    pub fn new(source: U) -> Self {
        Self {
            source,
            state: PolarState::Empty,
        }
    }

    /// Next standard normal variate
    pub fn next_normal(&mut self) -> f64 {
        match std::mem::replace(&mut self.state, PolarState::Empty) {
            PolarState::Holding(x2) => x2,
            PolarState::Empty => {
                let (x1, x2) = self.accepted_pair();
                self.state = PolarState::Holding(x2);
                x1
            }
        }
    }

    fn accepted_pair(&mut self) -> (f64, f64) {
        loop {
            let v1 = 2.0 * self.source.next_uniform() - 1.0;
            let v2 = 2.0 * self.source.next_uniform() - 1.0;
            let s = v1 * v1 + v2 * v2;
            // S == 0 would take the log of zero
            if s >= 1.0 || s == 0.0 {
                continue;
            }
            let scale = (-2.0 * s.ln() / s).sqrt();
            return (v1 * scale, v2 * scale);
        }
    }

    /// Drop any held variate
    pub fn reset(&mut self) {
        self.state = PolarState::Empty;
    }

    pub fn state(&self) -> PolarState {
        self.state
    }

    pub fn source_mut(&mut self) -> &mut U {
        &mut self.source
    }
}

impl<U: UniformSource> Iterator for PolarNormal<U> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_normal())
    }
}

/// RNG factory handing out one independent generator per run
#[derive(Debug, Clone, Copy)]
pub struct RngFactory {
    base_seed: u64,
}

impl RngFactory {
    pub fn new(base_seed: u64) -> Self {
        Self { base_seed }
    }

    /// Create a standard RNG for a specific run
    pub fn create_std_rng(&self, run_id: u64) -> StdRng {
        seed_rng_from_u64(self.base_seed.wrapping_add(run_id))
    }

    /// Fresh polar-method generator for a specific run
    pub fn normal_generator(&self, run_id: u64) -> PolarNormal<StdRng> {
        PolarNormal::new(self.create_std_rng(run_id))
    }
}

pub fn seed_rng_from_u64(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
