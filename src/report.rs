//! Frame report loading.
//!
//! A frame report is the JSON document written by an upstream metrics tool
//! (e.g. libvmaf). Only one shape is accepted:
//!
//! ```json
//! { "frames": [ { "metrics": { "vmaf": 93.1, "psnr": 44.2, "ssim": 0.987 } } ] }
//! ```
//!
//! Any additional fields, per frame or at the top level, are ignored.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::series::MetricsSeries;

/// Scores for a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameMetrics {
    /// VMAF score.
    pub vmaf: f64,
    /// PSNR in dB.
    pub psnr: f64,
    /// SSIM index.
    pub ssim: f64,
}

/// One entry of the `frames` array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// The frame's scores.
    pub metrics: FrameMetrics,
}

/// A parsed frame report. Frame order is document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameMetricsReport {
    /// Per-frame records, index = frame number.
    pub frames: Vec<FrameRecord>,
}

impl FrameMetricsReport {
    /// Reads and parses a report from disk.
    ///
    /// Returns [`Error::NotFound`] if the file cannot be read and
    /// [`Error::DataFormat`] if it is not a valid frame report.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| Error::NotFound {
            path: path.to_path_buf(),
            source,
        })?;

        let report = Self::from_json_slice(&bytes, path)?;
        tracing::debug!(path = %path.display(), frames = report.len(), "loaded frame report");
        Ok(report)
    }

    /// Parses a report from a JSON string. `origin` is only used in errors.
    pub fn from_json_str(text: &str, origin: impl Into<PathBuf>) -> Result<Self> {
        Self::from_json_slice(text.as_bytes(), origin)
    }

    fn from_json_slice(bytes: &[u8], origin: impl Into<PathBuf>) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| Error::data_format(origin, e.to_string()))
    }

    /// Number of frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the report has no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Splits the report into per-metric sequences.
    #[must_use]
    pub fn series(&self) -> MetricsSeries {
        let mut series = MetricsSeries::with_capacity(self.frames.len());
        for frame in &self.frames {
            let m = frame.metrics;
            series.push(m.vmaf, m.psnr, m.ssim);
        }
        series
    }
}

/// Loads a report and returns its metric sequences.
pub fn load_series(path: impl AsRef<Path>) -> Result<MetricsSeries> {
    FrameMetricsReport::load(path).map(|report| report.series())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::MetricKind;
    use std::io::Write;

    const THREE_FRAMES: &str = r#"{
        "version": "2.3.1",
        "frames": [
            { "frameNum": 0, "metrics": { "vmaf": 90, "psnr": 50, "ssim": 0.99, "adm2": 0.97 } },
            { "frameNum": 1, "metrics": { "vmaf": 80, "psnr": 45, "ssim": 0.95 } },
            { "frameNum": 2, "metrics": { "vmaf": 95, "psnr": 55, "ssim": 0.97 } }
        ],
        "pooled_metrics": {}
    }"#;

    #[test]
    fn test_parse_in_frame_order() {
        let report = FrameMetricsReport::from_json_str(THREE_FRAMES, "test.json").unwrap();
        assert_eq!(report.len(), 3);

        let series = report.series();
        assert_eq!(series.len(), 3);
        assert_eq!(series.vmaf(), &[90.0, 80.0, 95.0]);
        assert_eq!(series.psnr(), &[50.0, 45.0, 55.0]);
        assert_eq!(series.ssim(), &[0.99, 0.95, 0.97]);
        assert_eq!(series.min(MetricKind::Ssim), Some(0.95));
    }

    #[test]
    fn test_empty_frames_array() {
        let report = FrameMetricsReport::from_json_str(r#"{"frames": []}"#, "empty.json").unwrap();
        assert!(report.is_empty());
        assert!(report.series().is_empty());
    }

    #[test]
    fn test_invalid_json() {
        let err = FrameMetricsReport::from_json_str("{ not json", "bad.json").unwrap_err();
        assert!(matches!(err, Error::DataFormat { .. }));
    }

    #[test]
    fn test_missing_frames() {
        let err = FrameMetricsReport::from_json_str(r#"{"pooled_metrics": {}}"#, "x.json")
            .unwrap_err();
        match err {
            Error::DataFormat { path, reason } => {
                assert_eq!(path, PathBuf::from("x.json"));
                assert!(reason.contains("frames"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_metric_field() {
        let json = r#"{"frames": [
            { "metrics": { "vmaf": 90, "psnr": 50, "ssim": 0.99 } },
            { "metrics": { "vmaf": 90, "ssim": 0.99 } }
        ]}"#;
        let err = FrameMetricsReport::from_json_str(json, "x.json").unwrap_err();
        match err {
            Error::DataFormat { reason, .. } => assert!(reason.contains("psnr"), "{reason}"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_numeric_metric() {
        let json = r#"{"frames": [{ "metrics": { "vmaf": "high", "psnr": 50, "ssim": 0.99 } }]}"#;
        let err = FrameMetricsReport::from_json_str(json, "x.json").unwrap_err();
        assert!(matches!(err, Error::DataFormat { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(THREE_FRAMES.as_bytes()).unwrap();

        let series = load_series(file.path()).unwrap();
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let err = load_series(&path).unwrap_err();
        match err {
            Error::NotFound { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
