//! End-to-end plotting pipeline.
//!
//! One call to [`plot`] performs a single straight pass:
//! validate output options → load the primary report → optionally load and
//! subtract a second report → lay out the chart → save or display.
//!
//! Output options are validated before any report is read, so a bad
//! option combination never touches the filesystem.

use std::path::{Path, PathBuf};

use crate::chart::{ChartConfig, ChartMode, ChartSpec, generate_svg};
use crate::error::{Error, Result};
use crate::output::{OutputFormat, OutputTarget, Surface, save, show};
use crate::report::load_series;
use crate::series::{MetricsSeries, compare};

/// Inputs for a plotting run.
#[derive(Debug, Clone)]
pub struct PlotRequest {
    /// Primary frame report. Also used as the chart title.
    pub input: PathBuf,
    /// Report to subtract from the primary one.
    pub compare: Option<PathBuf>,
    /// Output file. `None` displays the chart.
    pub output: Option<PathBuf>,
    /// Explicit output format. Requires `output`.
    pub format: Option<OutputFormat>,
    /// Canvas configuration.
    pub config: ChartConfig,
}

impl PlotRequest {
    /// Creates a request that displays `input` with default settings.
    #[must_use]
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            compare: None,
            output: None,
            format: None,
            config: ChartConfig::default(),
        }
    }

    /// Sets the report to compare against.
    #[must_use]
    pub fn with_compare(mut self, path: impl Into<PathBuf>) -> Self {
        self.compare = Some(path.into());
        self
    }

    /// Sets the output file.
    #[must_use]
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Sets the output format.
    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Sets the canvas configuration.
    #[must_use]
    pub fn with_config(mut self, config: ChartConfig) -> Self {
        self.config = config;
        self
    }
}

/// Where the rendered chart ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    /// Written to the requested file.
    File(PathBuf),
    /// Opened in a viewer from this file.
    Displayed(PathBuf),
    /// No display was available; rendered to this file only.
    Headless(PathBuf),
}

/// Result of a plotting run.
#[derive(Debug, Clone)]
pub struct PlotOutcome {
    /// The values that were plotted (deltas in comparison mode).
    pub series: MetricsSeries,
    /// Absolute or comparison.
    pub mode: ChartMode,
    /// Where the chart went.
    pub artifact: Artifact,
}

/// Loads the report(s) named by `request` and computes the series to plot.
///
/// Fails on an empty report since an empty series has no minimum to annotate.
pub fn prepare(request: &PlotRequest) -> Result<(MetricsSeries, ChartMode)> {
    let primary = load_nonempty(&request.input)?;

    match &request.compare {
        Some(path) => {
            let secondary = load_nonempty(path)?;
            Ok((compare(&primary, &secondary).into_series(), ChartMode::Comparison))
        }
        None => Ok((primary, ChartMode::Absolute)),
    }
}

fn load_nonempty(path: &Path) -> Result<MetricsSeries> {
    let series = load_series(path)?;
    if series.is_empty() {
        return Err(Error::data_format(path, "report contains no frames"));
    }
    Ok(series)
}

/// Runs the whole pipeline, saving to a file or displaying on `surface`.
pub fn plot_on(request: &PlotRequest, surface: Surface) -> Result<PlotOutcome> {
    let target = OutputTarget::resolve(request.output.as_deref(), request.format)?;
    let (series, mode) = prepare(request)?;

    let title = request.input.to_string_lossy();
    let spec = ChartSpec::build(&series, mode, &*title, &request.config)
        .ok_or_else(|| Error::data_format(&request.input, "report contains no frames"))?;
    let svg = generate_svg(&spec, &request.config);

    let artifact = match target {
        OutputTarget::File { path, format } => {
            save(&svg, &path, format, &request.config)?;
            Artifact::File(path)
        }
        OutputTarget::Display => {
            let path = show(&svg, &title, &request.config, surface)?;
            match surface {
                Surface::Display => Artifact::Displayed(path),
                Surface::Headless => Artifact::Headless(path),
            }
        }
    };

    Ok(PlotOutcome {
        series,
        mode,
        artifact,
    })
}

/// Runs the whole pipeline on the detected display surface.
pub fn plot(request: &PlotRequest) -> Result<PlotOutcome> {
    plot_on(request, Surface::detect())
}
