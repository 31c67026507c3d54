//! Descriptive statistics for per-frame metric sequences.
//!
//! - [`Summary`]: count, mean, median, standard deviation, range with the
//!   frames where it is reached, and the 5th percentile
//! - [`summarize`]: one [`Summary`] per metric of a [`MetricsSeries`]

use serde::{Deserialize, Serialize};

use crate::series::{MetricKind, MetricsSeries};

/// Descriptive statistics for one metric over a run of frames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    /// Number of frames.
    pub count: usize,
    /// Mean value.
    pub mean: f64,
    /// Median value.
    pub median: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Minimum value.
    pub min: f64,
    /// First frame holding the minimum.
    pub min_frame: usize,
    /// Maximum value.
    pub max: f64,
    /// First frame holding the maximum.
    pub max_frame: usize,
    /// 5th percentile, the usual "worst frames" cut-off.
    pub p5: f64,
}

impl Summary {
    /// Computes statistics for per-frame `values`, indexed by frame number.
    ///
    /// Returns `None` if there are no frames.
    #[must_use]
    pub fn compute(values: &[f64]) -> Option<Self> {
        let (&first, rest) = values.split_first()?;

        let (mut min, mut min_frame) = (first, 0);
        let (mut max, mut max_frame) = (first, 0);
        for (frame, &value) in rest.iter().enumerate().map(|(i, v)| (i + 1, v)) {
            if value < min {
                (min, min_frame) = (value, frame);
            }
            if value > max {
                (max, max_frame) = (value, frame);
            }
        }

        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / count as f64;

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        Some(Self {
            count,
            mean,
            median: percentile_sorted(&sorted, 0.5),
            std_dev: variance.sqrt(),
            min,
            min_frame,
            max,
            max_frame,
            p5: percentile_sorted(&sorted, 0.05),
        })
    }
}

/// Summarizes every metric of a series, in panel order.
///
/// Returns an empty vector for an empty series.
#[must_use]
pub fn summarize(series: &MetricsSeries) -> Vec<(MetricKind, Summary)> {
    MetricKind::ALL
        .into_iter()
        .filter_map(|kind| Summary::compute(series.get(kind)).map(|s| (kind, s)))
        .collect()
}

/// Linearly interpolated percentile of non-empty sorted values (R-7).
fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let rank = p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let below = rank.floor() as usize;
    match sorted.get(below + 1) {
        Some(&above) => {
            let frac = rank - below as f64;
            sorted[below] + (above - sorted[below]) * frac
        }
        None => sorted[below],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_compute() {
        let values = vec![3.0, 1.0, 5.0, 2.0, 4.0];
        let summary = Summary::compute(&values).unwrap();

        assert_eq!(summary.count, 5);
        assert!((summary.mean - 3.0).abs() < 0.001);
        assert!((summary.median - 3.0).abs() < 0.001);
        assert_eq!((summary.min, summary.min_frame), (1.0, 1));
        assert_eq!((summary.max, summary.max_frame), (5.0, 2));
        assert!((summary.std_dev - 2.0_f64.sqrt()).abs() < 0.001);
        assert!((summary.p5 - 1.2).abs() < 0.001);
    }

    #[test]
    fn test_extreme_frames_take_first_occurrence() {
        let summary = Summary::compute(&[92.0, 71.5, 88.0, 71.5, 97.0, 97.0]).unwrap();
        assert_eq!(summary.min_frame, 1);
        assert_eq!(summary.max_frame, 4);

        let single = Summary::compute(&[42.0]).unwrap();
        assert_eq!((single.min_frame, single.max_frame), (0, 0));
        assert_eq!(single.median, 42.0);
        assert_eq!(single.p5, 42.0);
    }

    #[test]
    fn test_summary_empty() {
        assert!(Summary::compute(&[]).is_none());
    }

    #[test]
    fn test_summarize_series() {
        let series = MetricsSeries::new(
            vec![90.0, 80.0, 95.0],
            vec![50.0, 45.0, 55.0],
            vec![0.99, 0.95, 0.97],
        )
        .unwrap();

        let summaries = summarize(&series);
        assert_eq!(summaries.len(), 3);
        assert_eq!(summaries[0].0, MetricKind::Vmaf);
        assert_eq!(summaries[1].1.min, 45.0);
        assert_eq!(summaries[1].1.min_frame, 1);
        assert_eq!(summaries[2].1.max, 0.99);

        assert!(summarize(&MetricsSeries::default()).is_empty());
    }
}
