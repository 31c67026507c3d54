//! Three-panel chart layout for per-frame metrics.
//!
//! The chart always stacks VMAF, PSNR and SSIM panels (in that order) over a
//! shared frame axis. Layout is computed up front as a [`ChartSpec`], which is
//! pure data and is then emitted as SVG by [`generate_svg`].
//!
//! ## Canvas
//!
//! The canvas is sized in abstract units times a dots-per-unit resolution
//! (40 × 20 at 100 by default, i.e. 4000 × 2000 px). The frame axis receives
//! one tick per `tick_pixel_step` rendered pixels, so tick density stays the
//! same regardless of how many frames the report has.
//!
//! ## Y axis
//!
//! In [`ChartMode::Absolute`] every panel uses fixed bounds (see
//! [`MetricKind::absolute_bounds`]) even if data falls outside them. In
//! [`ChartMode::Comparison`] bounds fit the delta data.

mod svg;

pub use svg::generate_svg;

use crate::series::{MetricKind, MetricsSeries};

/// Whether the plotted values are raw scores or differences between reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartMode {
    /// Scores from a single report, fixed y-axis bounds.
    Absolute,
    /// Frame-by-frame deltas between two reports, auto-fitted bounds.
    Comparison,
}

/// Canvas configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Canvas width in units.
    pub width_units: f64,
    /// Canvas height in units.
    pub height_units: f64,
    /// Dots per unit.
    pub dpi: u32,
    /// Rendered pixels per frame-axis tick.
    pub tick_pixel_step: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width_units: 40.0,
            height_units: 20.0,
            dpi: 100,
            tick_pixel_step: 100,
        }
    }
}

impl ChartConfig {
    /// Sets the canvas size in units.
    #[must_use]
    pub fn with_canvas(mut self, width_units: f64, height_units: f64) -> Self {
        self.width_units = width_units;
        self.height_units = height_units;
        self
    }

    /// Sets the resolution in dots per unit.
    #[must_use]
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Sets how many rendered pixels separate frame-axis ticks.
    #[must_use]
    pub fn with_tick_pixel_step(mut self, step: u32) -> Self {
        self.tick_pixel_step = step;
        self
    }

    /// Canvas width in pixels.
    #[must_use]
    pub fn pixel_width(&self) -> u32 {
        (self.width_units * f64::from(self.dpi)).round().max(1.0) as u32
    }

    /// Canvas height in pixels.
    #[must_use]
    pub fn pixel_height(&self) -> u32 {
        (self.height_units * f64::from(self.dpi)).round().max(1.0) as u32
    }

    /// Number of frame-axis tick positions (before de-duplication).
    #[must_use]
    pub fn tick_count(&self) -> usize {
        (self.pixel_width() / self.tick_pixel_step.max(1)).max(2) as usize
    }
}

/// Inclusive y-axis range of a panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl AxisBounds {
    /// Fixed bounds for absolute scores of `kind`.
    #[must_use]
    pub fn absolute(kind: MetricKind) -> Self {
        let (min, max) = kind.absolute_bounds();
        Self { min, max }
    }

    /// Bounds fitted to `values` with 5% padding on each side.
    ///
    /// A flat series (e.g. a report compared with itself) is widened so the
    /// axis never collapses to a single value.
    #[must_use]
    pub fn fit(values: &[f64]) -> Self {
        let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if !lo.is_finite() || !hi.is_finite() {
            return Self { min: -0.5, max: 0.5 };
        }

        let range = hi - lo;
        let pad = if range > 0.0 {
            range * 0.05
        } else if lo == 0.0 {
            0.5
        } else {
            lo.abs() * 0.05
        };
        Self {
            min: lo - pad,
            max: hi + pad,
        }
    }

    /// Span of the axis.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// The minimum-value marker drawn on each panel.
#[derive(Debug, Clone, PartialEq)]
pub struct MinAnnotation {
    /// Minimum of the plotted series.
    pub value: f64,
    /// Label text, e.g. `vmaf min (80)`.
    pub label: String,
    /// Label anchor on the frame axis (15% of the span).
    pub x: f64,
    /// Label baseline in data units, just above the line.
    pub y: f64,
}

impl MinAnnotation {
    fn new(kind: MetricKind, value: f64, x_max: f64, bounds: AxisBounds) -> Self {
        Self {
            value,
            label: format!("{} min ({})", kind.key(), value),
            x: x_max * 0.15,
            y: value + bounds.span() * 0.015,
        }
    }
}

/// Layout of a single panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSpec {
    /// Metric shown.
    pub kind: MetricKind,
    /// Plotted values, index = frame.
    pub values: Vec<f64>,
    /// Y-axis range.
    pub bounds: AxisBounds,
    /// Y-axis grid/tick positions.
    pub y_ticks: Vec<f64>,
    /// Minimum marker.
    pub annotation: MinAnnotation,
}

/// Complete, renderer-independent chart layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    /// Figure title (the input path).
    pub title: String,
    /// Absolute or comparison.
    pub mode: ChartMode,
    /// Number of frames plotted.
    pub frame_count: usize,
    /// Frame-axis tick positions shared by all panels.
    pub x_ticks: Vec<usize>,
    /// Panels in stacking order.
    pub panels: Vec<PanelSpec>,
}

impl ChartSpec {
    /// Lays out a chart for `series`.
    ///
    /// Returns `None` for an empty series, which has no minimum to annotate.
    #[must_use]
    pub fn build(
        series: &MetricsSeries,
        mode: ChartMode,
        title: impl Into<String>,
        config: &ChartConfig,
    ) -> Option<Self> {
        if series.is_empty() {
            return None;
        }

        let frame_count = series.len();
        let x_max = frame_count as f64;
        let x_ticks = x_ticks(frame_count, config.tick_count());

        let mut panels = Vec::with_capacity(MetricKind::ALL.len());
        for kind in MetricKind::ALL {
            let values = series.get(kind);
            let min = series.min(kind)?;
            let bounds = match mode {
                ChartMode::Absolute => AxisBounds::absolute(kind),
                ChartMode::Comparison => AxisBounds::fit(values),
            };
            panels.push(PanelSpec {
                kind,
                values: values.to_vec(),
                bounds,
                y_ticks: nice_ticks(bounds),
                annotation: MinAnnotation::new(kind, min, x_max, bounds),
            });
        }

        tracing::debug!(
            frames = frame_count,
            ticks = x_ticks.len(),
            ?mode,
            "laid out chart"
        );

        Some(Self {
            title: title.into(),
            mode,
            frame_count,
            x_ticks,
            panels,
        })
    }

    /// Upper end of the shared frame axis.
    #[must_use]
    pub fn x_max(&self) -> f64 {
        (self.frame_count as f64).max(1.0)
    }

    /// Minimum labels in panel order, as shown in the figure legend.
    #[must_use]
    pub fn legend_labels(&self) -> Vec<&str> {
        self.panels
            .iter()
            .map(|p| p.annotation.label.as_str())
            .collect()
    }
}

/// `count` evenly spaced integer positions over `[0, frame_count]`.
///
/// Positions are truncated toward zero and repeated positions (which occur
/// when there are fewer frames than ticks) are dropped.
#[must_use]
pub fn x_ticks(frame_count: usize, count: usize) -> Vec<usize> {
    if count < 2 || frame_count == 0 {
        return vec![0];
    }
    let intervals = count - 1;
    let mut ticks: Vec<usize> = (0..count).map(|i| i * frame_count / intervals).collect();
    ticks.dedup();
    ticks
}

/// Round-numbered tick positions inside `bounds` (roughly five intervals).
#[must_use]
pub fn nice_ticks(bounds: AxisBounds) -> Vec<f64> {
    let step = nice_step(bounds.span() / 5.0);
    if step <= 0.0 || !step.is_finite() {
        return vec![bounds.min, bounds.max];
    }

    let first = (bounds.min / step).ceil() as i64;
    let last = (bounds.max / step + 1e-9).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

/// Rounds a raw interval to 1, 2, 2.5 or 5 times a power of ten.
fn nice_step(raw: f64) -> f64 {
    if raw <= 0.0 || !raw.is_finite() {
        return 0.0;
    }
    let magnitude = 10_f64.powf(raw.log10().floor());
    let norm = raw / magnitude;
    let nice = if norm <= 1.0 {
        1.0
    } else if norm <= 2.0 {
        2.0
    } else if norm <= 2.5 {
        2.5
    } else if norm <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Standard color palette.
pub mod colors {
    /// Series line color.
    pub const BLUE: &str = "#1f77b4";
    /// Minimum marker and annotation text.
    pub const BLACK: &str = "#000000";
    /// Grid lines.
    pub const GRID: &str = "#b0b0b0";
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> MetricsSeries {
        MetricsSeries::new(
            vec![90.0, 80.0, 95.0],
            vec![50.0, 45.0, 55.0],
            vec![0.99, 0.95, 0.97],
        )
        .unwrap()
    }

    #[test]
    fn test_default_canvas() {
        let config = ChartConfig::default();
        assert_eq!(config.pixel_width(), 4000);
        assert_eq!(config.pixel_height(), 2000);
        assert_eq!(config.tick_count(), 40);
    }

    #[test]
    fn test_custom_canvas_tick_count() {
        let config = ChartConfig::default().with_canvas(10.5, 10.5).with_dpi(100);
        assert_eq!(config.pixel_width(), 1050);
        assert_eq!(config.pixel_height(), 1050);
        assert_eq!(config.tick_count(), 10);

        let fine = ChartConfig::default().with_tick_pixel_step(250);
        assert_eq!(fine.tick_count(), 16);
    }

    #[test]
    fn test_degenerate_config_is_clamped() {
        let zero_step = ChartConfig::default().with_tick_pixel_step(0);
        assert_eq!(zero_step.tick_count(), 4000);

        let zero_dpi = ChartConfig::default().with_dpi(0);
        assert_eq!(zero_dpi.pixel_width(), 1);
        assert_eq!(zero_dpi.pixel_height(), 1);
        assert_eq!(zero_dpi.tick_count(), 2);
    }

    #[test]
    fn test_x_ticks_span_frame_axis() {
        let ticks = x_ticks(3900, 40);
        assert_eq!(ticks.len(), 40);
        assert_eq!(ticks[0], 0);
        assert_eq!(ticks[1], 100);
        assert_eq!(*ticks.last().unwrap(), 3900);
        assert!(ticks.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_x_ticks_few_frames() {
        assert_eq!(x_ticks(3, 40), vec![0, 1, 2, 3]);
        assert_eq!(x_ticks(0, 40), vec![0]);
    }

    #[test]
    fn test_absolute_bounds_ignore_data() {
        let outlier = MetricsSeries::new(vec![10.0, 20.0], vec![99.0, 1.0], vec![0.1, 0.2]).unwrap();
        let spec =
            ChartSpec::build(&outlier, ChartMode::Absolute, "x", &ChartConfig::default()).unwrap();

        let bounds: Vec<_> = spec.panels.iter().map(|p| (p.bounds.min, p.bounds.max)).collect();
        assert_eq!(bounds, vec![(60.0, 100.0), (35.0, 60.0), (0.9, 1.0)]);
    }

    #[test]
    fn test_min_annotations_scenario() {
        let spec =
            ChartSpec::build(&scenario(), ChartMode::Absolute, "in.json", &ChartConfig::default())
                .unwrap();

        assert_eq!(
            spec.legend_labels(),
            vec!["vmaf min (80)", "psnr min (45)", "ssim min (0.95)"]
        );
        let vmaf = &spec.panels[0].annotation;
        assert_eq!(vmaf.value, 80.0);
        assert!((vmaf.x - 0.45).abs() < 1e-9);
        assert!((vmaf.y - (80.0 + 40.0 * 0.015)).abs() < 1e-9);
    }

    #[test]
    fn test_comparison_bounds_fit_deltas() {
        let delta = MetricsSeries::new(vec![5.0, -5.0], vec![1.0, 2.0], vec![0.0, 0.0]).unwrap();
        let spec =
            ChartSpec::build(&delta, ChartMode::Comparison, "x", &ChartConfig::default()).unwrap();

        let vmaf = &spec.panels[0];
        assert!((vmaf.bounds.min - -5.5).abs() < 1e-9);
        assert!((vmaf.bounds.max - 5.5).abs() < 1e-9);
        assert_eq!(vmaf.annotation.label, "vmaf min (-5)");

        let ssim = &spec.panels[2];
        assert_eq!((ssim.bounds.min, ssim.bounds.max), (-0.5, 0.5));
    }

    #[test]
    fn test_annotation_matches_true_minimum() {
        let values: Vec<f64> = (0..500).map(|i| 80.0 + ((i * 37) % 101) as f64 * 0.173).collect();
        let expected = values.iter().copied().fold(f64::INFINITY, f64::min);
        let series = MetricsSeries::new(values.clone(), values.clone(), values).unwrap();
        let spec =
            ChartSpec::build(&series, ChartMode::Absolute, "x", &ChartConfig::default()).unwrap();
        for panel in &spec.panels {
            assert!((panel.annotation.value - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_empty_series_has_no_layout() {
        let spec = ChartSpec::build(
            &MetricsSeries::default(),
            ChartMode::Absolute,
            "x",
            &ChartConfig::default(),
        );
        assert!(spec.is_none());
    }

    #[test]
    fn test_nice_ticks() {
        assert_eq!(
            nice_ticks(AxisBounds::absolute(MetricKind::Vmaf)),
            vec![60.0, 70.0, 80.0, 90.0, 100.0]
        );
        assert_eq!(nice_ticks(AxisBounds::absolute(MetricKind::Psnr)).len(), 6);
        let ssim = nice_ticks(AxisBounds::absolute(MetricKind::Ssim));
        assert_eq!(ssim.len(), 6);
        assert!((ssim[0] - 0.9).abs() < 1e-9);
    }
}
