//! Contains [`SolutionEstimateResult`] for the Monte-Carlo solution count
//! estimator.

/// A running estimate of the number of solutions.
///
/// Each iteration of the estimator descends the search tree with uniformly
/// random branch choices and reports the product of the branching factors
/// along the way (zero on a dead end). The mean of those samples is an
/// unbiased estimate of the solution count; the spread gives a standard
/// error and a confidence interval.
#[derive(Debug, Clone, Default)]
pub struct SolutionEstimateResult {
    iterations: usize,
    mean: f64,
    // Sum of squared deviations from the running mean (Welford).
    m2: f64,
    canceled: bool,
}

impl SolutionEstimateResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one sample into the estimate.
    pub fn add_sample(&mut self, sample: f64) {
        self.iterations += 1;
        let delta = sample - self.mean;
        self.mean += delta / self.iterations as f64;
        self.m2 += delta * (sample - self.mean);
    }

    /// Merges another accumulator into this one (parallel Welford).
    pub fn merge(&mut self, other: &SolutionEstimateResult) {
        if other.iterations == 0 {
            return;
        }
        if self.iterations == 0 {
            *self = other.clone();
            return;
        }

        let total = (self.iterations + other.iterations) as f64;
        let delta = other.mean - self.mean;
        self.m2 += other.m2 + delta * delta * (self.iterations * other.iterations) as f64 / total;
        self.mean += delta * other.iterations as f64 / total;
        self.iterations += other.iterations;
        self.canceled |= other.canceled;
    }

    pub(crate) fn set_canceled(&mut self) {
        self.canceled = true;
    }

    /// The number of samples folded in so far.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// The estimated number of solutions.
    pub fn estimate(&self) -> f64 {
        self.mean
    }

    /// The standard error of the estimate.
    pub fn standard_error(&self) -> f64 {
        if self.iterations < 2 {
            return f64::INFINITY;
        }
        let variance = self.m2 / (self.iterations - 1) as f64;
        (variance / self.iterations as f64).sqrt()
    }

    /// The 95% confidence interval, floored at zero.
    pub fn confidence_interval_95(&self) -> (f64, f64) {
        let half_width = 1.96 * self.standard_error();
        ((self.mean - half_width).max(0.0), self.mean + half_width)
    }

    /// True when the estimator stopped early due to cancellation.
    pub fn is_canceled(&self) -> bool {
        self.canceled
    }
}

impl std::fmt::Display for SolutionEstimateResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (low, high) = self.confidence_interval_95();
        write!(
            f,
            "~{:.1} solutions (95% CI {:.1}..{:.1}, stderr {:.1}, {} iterations)",
            self.estimate(),
            low,
            high,
            self.standard_error(),
            self.iterations()
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_welford() {
        let mut result = SolutionEstimateResult::new();
        for sample in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            result.add_sample(sample);
        }
        assert_eq!(result.iterations(), 8);
        assert!((result.estimate() - 5.0).abs() < 1e-9);
        // Sample variance of this set is 4.571..., so stderr is ~0.756.
        assert!((result.standard_error() - 0.7559).abs() < 1e-3);
    }

    #[test]
    fn test_merge_matches_sequential() {
        let samples = [1.0, 0.0, 3.0, 8.0, 2.0, 2.0, 5.0];
        let mut sequential = SolutionEstimateResult::new();
        for &sample in &samples {
            sequential.add_sample(sample);
        }

        let mut left = SolutionEstimateResult::new();
        let mut right = SolutionEstimateResult::new();
        for &sample in &samples[..3] {
            left.add_sample(sample);
        }
        for &sample in &samples[3..] {
            right.add_sample(sample);
        }
        left.merge(&right);

        assert_eq!(left.iterations(), sequential.iterations());
        assert!((left.estimate() - sequential.estimate()).abs() < 1e-9);
        assert!((left.standard_error() - sequential.standard_error()).abs() < 1e-9);
    }
}
