//! Per-frame metric sequences and report comparison.
//!
//! A [`MetricsSeries`] holds one value per frame for each of the three
//! metrics. [`compare`] subtracts one series from another frame by frame,
//! producing a [`DeltaSeries`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The three metrics carried by a frame report, in panel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    /// Video Multi-Method Assessment Fusion (0-100, higher is better).
    Vmaf,
    /// Peak Signal-to-Noise Ratio in dB (higher is better).
    Psnr,
    /// Structural Similarity Index (typically 0-1, higher is better).
    Ssim,
}

impl MetricKind {
    /// All metrics in the order their panels are stacked.
    pub const ALL: [Self; 3] = [Self::Vmaf, Self::Psnr, Self::Ssim];

    /// Lowercase key as used in reports and annotation labels.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Vmaf => "vmaf",
            Self::Psnr => "psnr",
            Self::Ssim => "ssim",
        }
    }

    /// Panel title.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Vmaf => "VMAF",
            Self::Psnr => "PSNR",
            Self::Ssim => "SSIM",
        }
    }

    /// Y-axis bounds used when plotting absolute scores.
    #[must_use]
    pub fn absolute_bounds(self) -> (f64, f64) {
        match self {
            Self::Vmaf => (60.0, 100.0),
            Self::Psnr => (35.0, 60.0),
            Self::Ssim => (0.9, 1.0),
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Three equal-length per-frame sequences.
///
/// Index `i` of each sequence is frame `i`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsSeries {
    vmaf: Vec<f64>,
    psnr: Vec<f64>,
    ssim: Vec<f64>,
}

impl MetricsSeries {
    /// Builds a series from three sequences.
    ///
    /// Returns [`Error::Configuration`] if the lengths differ.
    pub fn new(vmaf: Vec<f64>, psnr: Vec<f64>, ssim: Vec<f64>) -> Result<Self> {
        if vmaf.len() != psnr.len() || vmaf.len() != ssim.len() {
            return Err(Error::Configuration(format!(
                "metric sequences differ in length: vmaf={}, psnr={}, ssim={}",
                vmaf.len(),
                psnr.len(),
                ssim.len()
            )));
        }
        Ok(Self { vmaf, psnr, ssim })
    }

    /// Creates an empty series with room for `frames` entries.
    pub(crate) fn with_capacity(frames: usize) -> Self {
        Self {
            vmaf: Vec::with_capacity(frames),
            psnr: Vec::with_capacity(frames),
            ssim: Vec::with_capacity(frames),
        }
    }

    /// Appends one frame.
    pub(crate) fn push(&mut self, vmaf: f64, psnr: f64, ssim: f64) {
        self.vmaf.push(vmaf);
        self.psnr.push(psnr);
        self.ssim.push(ssim);
    }

    /// Number of frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vmaf.len()
    }

    /// Whether the series has no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vmaf.is_empty()
    }

    /// Values for one metric.
    #[must_use]
    pub fn get(&self, kind: MetricKind) -> &[f64] {
        match kind {
            MetricKind::Vmaf => &self.vmaf,
            MetricKind::Psnr => &self.psnr,
            MetricKind::Ssim => &self.ssim,
        }
    }

    /// VMAF values.
    #[must_use]
    pub fn vmaf(&self) -> &[f64] {
        &self.vmaf
    }

    /// PSNR values.
    #[must_use]
    pub fn psnr(&self) -> &[f64] {
        &self.psnr
    }

    /// SSIM values.
    #[must_use]
    pub fn ssim(&self) -> &[f64] {
        &self.ssim
    }

    /// Smallest value of one metric, or `None` for an empty series.
    #[must_use]
    pub fn min(&self, kind: MetricKind) -> Option<f64> {
        let values = self.get(kind);
        if values.is_empty() {
            return None;
        }
        Some(values.iter().copied().fold(f64::INFINITY, f64::min))
    }

    /// Largest value of one metric, or `None` for an empty series.
    #[must_use]
    pub fn max(&self, kind: MetricKind) -> Option<f64> {
        let values = self.get(kind);
        if values.is_empty() {
            return None;
        }
        Some(values.iter().copied().fold(f64::NEG_INFINITY, f64::max))
    }
}

/// Frame-by-frame difference `primary - secondary`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaSeries {
    /// The differences, one per overlapping frame.
    pub series: MetricsSeries,
    /// Frame count of the primary report.
    pub primary_frames: usize,
    /// Frame count of the secondary report.
    pub secondary_frames: usize,
}

impl DeltaSeries {
    /// Whether either report had frames beyond the overlap.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.primary_frames != self.secondary_frames
    }

    /// Consumes the delta, returning the difference series.
    #[must_use]
    pub fn into_series(self) -> MetricsSeries {
        self.series
    }
}

/// Subtracts `secondary` from `primary` frame by frame.
///
/// Frame `i` of one report is taken to correspond to frame `i` of the other;
/// there is no timestamp alignment. When the reports differ in length only the
/// shared prefix is compared and a warning is logged.
///
/// # Example
///
/// ```
/// use vmaf_plot::series::{compare, MetricsSeries};
///
/// let a = MetricsSeries::new(vec![90.0, 80.0], vec![50.0, 45.0], vec![0.99, 0.95]).unwrap();
/// let b = MetricsSeries::new(vec![85.0, 85.0], vec![50.0, 50.0], vec![0.99, 0.99]).unwrap();
///
/// let delta = compare(&a, &b);
/// assert_eq!(delta.series.vmaf(), &[5.0, -5.0]);
/// ```
#[must_use]
pub fn compare(primary: &MetricsSeries, secondary: &MetricsSeries) -> DeltaSeries {
    let frames = primary.len().min(secondary.len());
    if primary.len() != secondary.len() {
        tracing::warn!(
            primary = primary.len(),
            secondary = secondary.len(),
            compared = frames,
            "reports differ in frame count; comparing the shared prefix only"
        );
    }

    let diff = |kind: MetricKind| -> Vec<f64> {
        primary
            .get(kind)
            .iter()
            .zip(secondary.get(kind))
            .map(|(a, b)| a - b)
            .collect()
    };

    DeltaSeries {
        series: MetricsSeries {
            vmaf: diff(MetricKind::Vmaf),
            psnr: diff(MetricKind::Psnr),
            ssim: diff(MetricKind::Ssim),
        },
        primary_frames: primary.len(),
        secondary_frames: secondary.len(),
    }
}
