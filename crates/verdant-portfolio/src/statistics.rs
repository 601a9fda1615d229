//! Descriptive statistics over simulated samples.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Rounds half away from zero to `dp` decimal places.
#[must_use]
pub fn round_dp(value: f64, dp: u32) -> f64 {
    let factor = 10f64.powi(dp as i32);
    (value * factor).round() / factor
}

/// Percentile `p` (0–100) of already-sorted data, linear interpolation
/// between closest ranks.
///
/// Returns NaN for empty input.
#[must_use]
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let rank = (p.clamp(0.0, 100.0) / 100.0) * (n - 1) as f64;
            let lo = rank.floor() as usize;
            let hi = rank.ceil() as usize;
            let frac = rank - lo as f64;
            sorted[lo] + (sorted[hi] - sorted[lo]) * frac
        }
    }
}

/// Percentile `p` (0–100) of unsorted data.
#[must_use]
pub fn percentile(data: &[f64], p: f64) -> f64 {
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    percentile_sorted(&sorted, p)
}

/// Summary statistics of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleSummary {
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Minimum.
    pub min: f64,
    /// Maximum.
    pub max: f64,
    /// 5th percentile.
    pub percentile_5: f64,
    /// 95th percentile.
    pub percentile_95: f64,
    /// Share of strictly positive observations, in percent.
    pub prob_positive: f64,
}

impl SampleSummary {
    /// Summarizes a sample. All fields are NaN for an empty sample.
    #[must_use]
    pub fn from_sample(sample: &[f64]) -> Self {
        let mut sorted = sample.to_vec();
        sorted.sort_by(f64::total_cmp);

        let positive = sample.iter().filter(|&&x| x > 0.0).count();
        let prob_positive = if sample.is_empty() {
            f64::NAN
        } else {
            positive as f64 / sample.len() as f64 * 100.0
        };

        Self {
            mean: sample.iter().mean(),
            std_dev: sample.iter().population_std_dev(),
            min: sorted.first().copied().unwrap_or(f64::NAN),
            max: sorted.last().copied().unwrap_or(f64::NAN),
            percentile_5: percentile_sorted(&sorted, 5.0),
            percentile_95: percentile_sorted(&sorted, 95.0),
            prob_positive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_round_dp() {
        assert_relative_eq!(round_dp(0.466_666, 3), 0.467);
        assert_relative_eq!(round_dp(-24.675, 2), -24.68);
        assert_relative_eq!(round_dp(15.5, 2), 15.5);
        assert_relative_eq!(round_dp(1.234_56, 4), 1.2346);
    }

    #[test]
    fn test_percentile_linear_interpolation() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(percentile(&data, 50.0), 3.0);
        assert_relative_eq!(percentile(&data, 0.0), 1.0);
        assert_relative_eq!(percentile(&data, 100.0), 5.0);
        // rank = 0.05 * 4 = 0.2
        assert_relative_eq!(percentile(&data, 5.0), 1.2);
        // rank = 0.95 * 4 = 3.8
        assert_relative_eq!(percentile(&data, 95.0), 4.8);
    }

    #[test]
    fn test_percentile_unsorted_and_edge_sizes() {
        assert_relative_eq!(percentile(&[10.0, 0.0], 50.0), 5.0);
        assert_relative_eq!(percentile(&[7.0], 95.0), 7.0);
        assert!(percentile(&[], 50.0).is_nan());
    }

    #[test]
    fn test_sample_summary() {
        let sample = [-2.0, 0.0, 2.0, 4.0];
        let summary = SampleSummary::from_sample(&sample);

        assert_relative_eq!(summary.mean, 1.0);
        // population variance = (9 + 1 + 1 + 9) / 4 = 5
        assert_relative_eq!(summary.std_dev, 5.0_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(summary.min, -2.0);
        assert_relative_eq!(summary.max, 4.0);
        assert_relative_eq!(summary.prob_positive, 50.0);
        assert_relative_eq!(summary.percentile_5, -1.7, epsilon = 1e-12);
        assert_relative_eq!(summary.percentile_95, 3.7, epsilon = 1e-12);
    }
}
