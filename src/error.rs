//! Error types for vmaf-plot operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for vmaf-plot operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, comparing or rendering reports.
///
/// Every variant is terminal for a run: no partial chart is produced.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Invalid combination of output options (e.g. a format without an output path).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A report file is missing or unreadable.
    #[error("Cannot read {path}: {source}")]
    NotFound {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A report is not valid JSON or lacks a required field.
    #[error("Invalid frame report {path}: {reason}")]
    DataFormat {
        /// Report that failed to parse.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },

    /// An external program needed for display is unavailable.
    #[error("Missing dependency '{program}': {hint}")]
    Dependency {
        /// Program that could not be launched.
        program: String,
        /// Install guidance.
        hint: String,
    },

    /// SVG parsing or rasterization failed.
    #[error("Render error: {0}")]
    Render(String),

    /// I/O error wrapper.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Raster image encoding error.
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

impl Error {
    pub(crate) fn data_format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::DataFormat {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
