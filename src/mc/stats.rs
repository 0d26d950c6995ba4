//! Single-pass accumulation of payoff moments
//!
//! After the i-th observation `x_i` (1-based):
//! ```text
//! m ← m(1 - 1/i) + x_i/i
//! q ← q(1 - 1/i) + x_i²/i
//! ```
//! so `m` and `q` are always the running mean and mean of squares. The
//! sample variance `(q - m²) i/(i-1)` needs at least two observations.

/// z-value of a two-sided 95% normal confidence interval
pub const Z_95: f64 = 1.96;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    mean_sq: f64,
}

impl RunningStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn from_moments(count: u64, mean: f64, mean_sq: f64) -> Self {
        RunningStats { count, mean, mean_sq }
    }

    pub fn push(&mut self, x: f64) {
        self.count += 1;
        let i = self.count as f64;
        let keep = 1.0 - 1.0 / i;
        self.mean = self.mean * keep + x / i;
        self.mean_sq = self.mean_sq * keep + x * x / i;
    }

    /// Combine with statistics gathered from a disjoint, independent stream
    pub fn merge(&mut self, other: &RunningStats) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = *other;
            return;
        }
        let total = self.count + other.count;
        let w = other.count as f64 / total as f64;
        self.mean += (other.mean - self.mean) * w;
        self.mean_sq += (other.mean_sq - self.mean_sq) * w;
        self.count = total;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn mean_sq(&self) -> f64 {
        self.mean_sq
    }

    /// Unbiased sample variance, `None` below two observations
    ///
    /// May be a tiny negative number when all observations are (nearly)
    /// equal; callers decide how to treat that residue.
    pub fn sample_variance(&self) -> Option<f64> {
        if self.count < 2 {
            return None;
        }
        let n = self.count as f64;
        Some((self.mean_sq - self.mean * self.mean) * n / (n - 1.0))
    }

    /// Standard error of the mean, `√(variance / n)`
    pub fn standard_error(&self) -> Option<f64> {
        self.sample_variance()
            .map(|v| (v.max(0.0) / self.count as f64).sqrt())
    }

    pub fn confidence_interval_95(&self) -> Option<(f64, f64)> {
        self.standard_error()
            .map(|se| (self.mean - Z_95 * se, self.mean + Z_95 * se))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_prefix_moments_match_direct_formulas() {
        let xs = [3.2, 0.0, 0.0, 17.5, 4.25, 0.0, 9.0, 1e-3, 250.0, 12.0];
        let mut stats = RunningStats::new();
        for (i, &x) in xs.iter().enumerate() {
            stats.push(x);
            let prefix = &xs[..=i];
            let n = prefix.len() as f64;
            let mean = prefix.iter().sum::<f64>() / n;
            let mean_sq = prefix.iter().map(|v| v * v).sum::<f64>() / n;
            assert_eq!(stats.count(), prefix.len() as u64);
            assert_relative_eq!(stats.mean(), mean, max_relative = 1e-12, epsilon = 1e-15);
            assert_relative_eq!(stats.mean_sq(), mean_sq, max_relative = 1e-12, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_first_push_is_exact() {
        let mut stats = RunningStats::new();
        stats.push(7.5);
        assert_eq!(stats.mean(), 7.5);
        assert_eq!(stats.mean_sq(), 56.25);
        assert_eq!(stats.sample_variance(), None);
        assert_eq!(stats.standard_error(), None);
    }

    #[test]
    fn test_sample_variance_is_unbiased() {
        let mut stats = RunningStats::new();
        for x in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            stats.push(x);
        }
        assert_relative_eq!(stats.sample_variance().unwrap(), 4.571428571428571, epsilon = 1e-12);
        let se = stats.standard_error().unwrap();
        assert_relative_eq!(se, (4.571428571428571f64 / 8.0).sqrt(), epsilon = 1e-12);
        let (lo, hi) = stats.confidence_interval_95().unwrap();
        assert_relative_eq!(lo, 5.0 - 1.96 * se, epsilon = 1e-12);
        assert_relative_eq!(hi, 5.0 + 1.96 * se, epsilon = 1e-12);
    }

    #[test]
    fn test_merge_matches_single_stream() {
        let xs: Vec<f64> = (0..101).map(|i| ((i * 37) % 23) as f64 * 0.5).collect();
        let mut whole = RunningStats::new();
        xs.iter().for_each(|&x| whole.push(x));

        let mut left = RunningStats::new();
        let mut right = RunningStats::new();
        xs[..40].iter().for_each(|&x| left.push(x));
        xs[40..].iter().for_each(|&x| right.push(x));
        left.merge(&right);

        assert_eq!(left.count(), whole.count());
        assert_relative_eq!(left.mean(), whole.mean(), max_relative = 1e-12);
        assert_relative_eq!(left.mean_sq(), whole.mean_sq(), max_relative = 1e-12);
        assert_relative_eq!(
            left.sample_variance().unwrap(),
            whole.sample_variance().unwrap(),
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_merge_with_empty() {
        let mut a = RunningStats::new();
        let mut b = RunningStats::new();
        b.push(1.0);
        b.push(3.0);
        a.merge(&b);
        assert_eq!(a, b);
        a.merge(&RunningStats::new());
        assert_eq!(a, b);
    }
}
