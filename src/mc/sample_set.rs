// src/mc/sample_set.rs
//! Discounted payoffs collected by the aggregator.
//!
//! The set is reduced in two passes:
//! ```text
//! mean           = (1/M) Σ yᵢ
//! standard error = √( (1/M) Σ (yᵢ - mean)² )
//! ```
//! The population (1/M) normalisation means a single sample has zero error.

use crate::error::{SdeError, SdeResult};

#[derive(Debug, Clone, Default)]
pub struct SampleSet {
    values: Vec<f64>,
}

/// Mean and standard error of a consumed [`SampleSet`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleSummary {
    pub mean: f64,
    pub standard_error: f64,
    pub count: usize,
}

impl SampleSet {
    pub fn with_capacity(capacity: usize) -> Self {
        SampleSet {
            values: Vec::with_capacity(capacity),
        }
    }

    /// Reserves room for `capacity` samples up front, reporting an
    /// allocation failure instead of aborting.
    pub fn try_with_capacity(capacity: usize) -> SdeResult<Self> {
        let mut values = Vec::new();
        values
            .try_reserve_exact(capacity)
            .map_err(|e| SdeError::MonteCarloError {
                paths: capacity,
                reason: format!("cannot hold the sample buffer: {}", e),
            })?;
        Ok(SampleSet { values })
    }

    pub fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn summarize(self) -> SdeResult<SampleSummary> {
        let count = self.values.len();
        if count == 0 {
            return Err(SdeError::MonteCarloError {
                paths: 0,
                reason: "no samples to summarise".to_string(),
            });
        }

        let n = count as f64;
        let mean = self.values.iter().sum::<f64>() / n;
        let sum_sq_dev = self
            .values
            .iter()
            .map(|y| (y - mean).powi(2))
            .sum::<f64>();

        Ok(SampleSummary {
            mean,
            standard_error: (sum_sq_dev / n).sqrt(),
            count,
        })
    }
}

impl FromIterator<f64> for SampleSet {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        SampleSet {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_and_error() {
        let samples: SampleSet = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0].into_iter().collect();
        let summary = samples.summarize().expect("Non-empty");

        assert_eq!(summary.count, 8);
        assert_relative_eq!(summary.mean, 5.0, epsilon = 1e-12);
        assert_relative_eq!(summary.standard_error, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_single_sample_has_zero_error() {
        let mut samples = SampleSet::with_capacity(1);
        samples.push(3.731);
        let summary = samples.summarize().expect("Non-empty");

        assert_eq!(summary.mean, 3.731);
        assert_eq!(summary.standard_error, 0.0);
    }

    #[test]
    fn test_constant_samples() {
        let samples: SampleSet = std::iter::repeat(1.25).take(1000).collect();
        let summary = samples.summarize().expect("Non-empty");
        assert_relative_eq!(summary.mean, 1.25, epsilon = 1e-12);
        assert!(summary.standard_error < 1e-12);
    }

    #[test]
    fn test_oversized_buffer_is_an_error() {
        assert!(matches!(
            SampleSet::try_with_capacity(usize::MAX / 2),
            Err(SdeError::MonteCarloError { .. })
        ));

        let samples = SampleSet::try_with_capacity(16).expect("Small buffer");
        assert!(samples.is_empty());
    }

    #[test]
    fn test_empty_set_is_an_error() {
        let samples = SampleSet::default();
        assert!(samples.is_empty());
        assert!(matches!(
            samples.summarize(),
            Err(SdeError::MonteCarloError { paths: 0, .. })
        ));
    }
}
