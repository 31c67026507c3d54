//! # vmaf-plot
//!
//! Plots per-frame video quality metrics (VMAF, PSNR, SSIM) from a JSON frame
//! report as a three-panel line chart, optionally as the frame-by-frame
//! difference between two reports.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vmaf_plot::{PlotRequest, plot};
//!
//! let request = PlotRequest::new("encode.json")
//!     .with_compare("reference.json")
//!     .with_output("delta.png");
//!
//! let outcome = plot(&request)?;
//! ```
//!
//! ## Modules
//!
//! - [`error`]: Error types for the library
//! - [`report`]: Frame report loading
//! - [`series`]: Metric sequences and report comparison
//! - [`stats`]: Summary statistics
//! - [`chart`]: Chart layout and SVG generation
//! - [`output`]: File output, rasterization and display
//! - [`plot`]: The end-to-end pipeline

pub mod chart;
pub mod error;
pub mod output;
pub mod plot;
pub mod report;
pub mod series;
pub mod stats;

// Re-export commonly used types
pub use chart::{ChartConfig, ChartMode, ChartSpec};
pub use error::{Error, Result};
pub use output::{OutputFormat, OutputTarget, Surface, supported_formats};
pub use plot::{Artifact, PlotOutcome, PlotRequest, plot, plot_on};
pub use report::{FrameMetricsReport, load_series};
pub use series::{DeltaSeries, MetricKind, MetricsSeries, compare};
pub use stats::Summary;
