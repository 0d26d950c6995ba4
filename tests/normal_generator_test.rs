// tests/normal_generator_test.rs
use approx::assert_abs_diff_eq;
use bsm_montecarlo::math_utils::norm_cdf;
use bsm_montecarlo::mc::stats::RunningStats;
use bsm_montecarlo::rng::{CounterRng, PolarNormal, PolarState, RngFactory};
use statrs::function::erf;
use std::f64::consts::SQRT_2;

fn exact_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf::erf(x / SQRT_2))
}

#[test]
fn test_fixed_seed_is_reproducible() {
    let factory = RngFactory::new(99);
    let a: Vec<f64> = factory.normal_generator(3).take(1_000).collect();
    let b: Vec<f64> = factory.normal_generator(3).take(1_000).collect();
    assert_eq!(a, b);

    let c: Vec<f64> = factory.normal_generator(4).take(1_000).collect();
    assert_ne!(a, c);
}

#[test]
fn test_moments_over_large_sample() {
    for mut gen in [
        RngFactory::new(1).normal_generator(0),
        RngFactory::new(31337).normal_generator(5),
    ] {
        let mut stats = RunningStats::new();
        for _ in 0..200_000 {
            stats.push(gen.next_normal());
        }
        let mean = stats.mean();
        let variance = stats.sample_variance().unwrap();
        println!("mean = {:.5}, variance = {:.5}", mean, variance);
        assert!(mean.abs() < 0.05, "mean {}", mean);
        assert!((variance - 1.0).abs() < 0.05, "variance {}", variance);
    }
}

#[test]
fn test_counter_source_moments() {
    let gen = PolarNormal::new(CounterRng::new(2718, 0));
    let samples: Vec<f64> = gen.take(100_000).collect();
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
    assert!(mean.abs() < 0.05);
    assert!((variance - 1.0).abs() < 0.05);
}

#[test]
fn test_phase_alternates_between_calls() {
    let mut gen = RngFactory::new(5).normal_generator(0);
    for _ in 0..10 {
        assert_eq!(gen.state(), PolarState::Empty);
        gen.next_normal();
        assert!(matches!(gen.state(), PolarState::Holding(_)));
        gen.next_normal();
    }
}

#[test]
fn test_reset_restarts_without_cached_value() {
    let factory = RngFactory::new(8);
    let mut gen = factory.normal_generator(0);
    let first = gen.next_normal();
    gen.reset();
    let after_reset = gen.next_normal();

    // A reset generator starts a new trial instead of returning the held value
    let mut replay = factory.normal_generator(0);
    replay.next_normal();
    let held = replay.next_normal();
    assert_ne!(after_reset, held);
    assert_ne!(first, after_reset);
}

#[test]
fn test_cdf_matches_erf_within_approximation_error() {
    let mut z = -6.0;
    while z <= 6.0 {
        assert_abs_diff_eq!(norm_cdf(z), exact_cdf(z), epsilon = 1e-7);
        z += 0.005;
    }
}

#[test]
fn test_cdf_boundary_policy() {
    assert_abs_diff_eq!(norm_cdf(0.0), 0.5, epsilon = 1e-6);
    assert_eq!(norm_cdf(6.01), 1.0);
    assert_eq!(norm_cdf(-6.01), 0.0);
    assert_abs_diff_eq!(norm_cdf(1.96), 0.975, epsilon = 1e-4);
}
