//! SVG emission for a [`ChartSpec`].
//!
//! Geometry follows the usual figure conventions: panels fill the area
//! between fixed fractional margins and are separated by a gap of 20% of a
//! panel's height. The minimum legend sits in the top-left margin.

use std::fmt::Write as _;

use super::{ChartConfig, ChartSpec, PanelSpec, colors};

const MARGIN_LEFT: f64 = 0.125;
const MARGIN_RIGHT: f64 = 0.10;
const MARGIN_TOP: f64 = 0.12;
const MARGIN_BOTTOM: f64 = 0.11;
const PANEL_GAP: f64 = 0.2;
const LEGEND_X: f64 = 0.10;
const LEGEND_Y: [f64; 3] = [0.07, 0.09, 0.11];

/// Pixel rectangle of one panel's plot area.
#[derive(Debug, Clone, Copy)]
struct Rect {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

/// Generates a standalone SVG document from a chart layout.
///
/// # Example
///
/// ```rust
/// use vmaf_plot::chart::{generate_svg, ChartConfig, ChartMode, ChartSpec};
/// use vmaf_plot::series::MetricsSeries;
///
/// let series = MetricsSeries::new(
///     vec![90.0, 80.0, 95.0],
///     vec![50.0, 45.0, 55.0],
///     vec![0.99, 0.95, 0.97],
/// ).unwrap();
///
/// let config = ChartConfig::default();
/// let spec = ChartSpec::build(&series, ChartMode::Absolute, "run.json", &config).unwrap();
/// let svg = generate_svg(&spec, &config);
/// assert!(svg.contains("vmaf min (80)"));
/// ```
#[must_use]
pub fn generate_svg(spec: &ChartSpec, config: &ChartConfig) -> String {
    let width = f64::from(config.pixel_width());
    let height = f64::from(config.pixel_height());
    // 10pt at the configured resolution
    let font = f64::from(config.dpi) * 10.0 / 72.0;

    let mut svg = String::with_capacity(16384 + spec.frame_count * 3 * 24);
    let title = escape_xml(&spec.title);

    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = width,
        h = height
    );
    let _ = writeln!(svg, "<title>{}</title>", title);
    let _ = writeln!(
        svg,
        r#"<style>
  text {{ font-family: DejaVu Sans, Arial, Helvetica, sans-serif; fill: {black}; }}
  .caption {{ font-size: {caption:.1}px; }}
  .panel-title {{ font-size: {panel:.1}px; }}
  .tick-label {{ font-size: {tick:.1}px; }}
  .annotation {{ font-size: {tick:.1}px; font-weight: bold; }}
  .grid {{ stroke: {grid}; stroke-width: 0.8; }}
  .frame {{ stroke: {black}; stroke-width: 0.8; fill: none; }}
  .series {{ stroke: {blue}; stroke-width: 1.5; fill: none; }}
  .min-line {{ stroke: {black}; stroke-width: 2; }}
</style>"#,
        black = colors::BLACK,
        grid = colors::GRID,
        blue = colors::BLUE,
        caption = font * 1.4,
        panel = font * 1.2,
        tick = font,
    );
    let _ = writeln!(
        svg,
        r##"<rect width="{}" height="{}" fill="#ffffff"/>"##,
        width, height
    );

    // Caption
    let _ = writeln!(
        svg,
        r#"<text x="{:.2}" y="{:.2}" text-anchor="middle" class="caption">{}</text>"#,
        width / 2.0,
        height * 0.04,
        title
    );

    let plot_left = width * MARGIN_LEFT;
    let plot_width = width * (1.0 - MARGIN_LEFT - MARGIN_RIGHT);
    let plot_top = height * MARGIN_TOP;
    let plot_height = height * (1.0 - MARGIN_TOP - MARGIN_BOTTOM);
    let count = spec.panels.len().max(1) as f64;
    let panel_height = plot_height / (count + PANEL_GAP * (count - 1.0));

    for (i, panel) in spec.panels.iter().enumerate() {
        let rect = Rect {
            x: plot_left,
            y: plot_top + i as f64 * panel_height * (1.0 + PANEL_GAP),
            w: plot_width,
            h: panel_height,
        };
        write_panel(&mut svg, spec, panel, rect, font);
    }

    // Minimum legend
    for (label, y) in spec.legend_labels().iter().zip(LEGEND_Y) {
        let _ = writeln!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" class="annotation">{}</text>"#,
            width * LEGEND_X,
            height * y,
            escape_xml(label)
        );
    }

    svg.push_str("</svg>\n");
    svg
}

fn write_panel(svg: &mut String, spec: &ChartSpec, panel: &PanelSpec, rect: Rect, font: f64) {
    let x_max = spec.x_max();
    let bounds = panel.bounds;
    let span = if bounds.span() > 0.0 { bounds.span() } else { 1.0 };

    let scale_x = |v: f64| -> f64 { rect.x + v / x_max * rect.w };
    let scale_y = |v: f64| -> f64 { rect.y + (1.0 - (v - bounds.min) / span) * rect.h };

    let key = panel.kind.key();

    let _ = writeln!(svg, r#"<g id="panel-{}">"#, key);
    let _ = writeln!(
        svg,
        r#"<clipPath id="clip-{}"><rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"/></clipPath>"#,
        key, rect.x, rect.y, rect.w, rect.h
    );

    // Panel title
    let _ = writeln!(
        svg,
        r#"<text x="{:.2}" y="{:.2}" text-anchor="middle" class="panel-title">{}</text>"#,
        rect.x + rect.w / 2.0,
        rect.y - font * 0.5,
        panel.kind.title()
    );

    // Grid and tick labels
    for &tick in &spec.x_ticks {
        let x = scale_x(tick as f64);
        let _ = writeln!(
            svg,
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" class="grid"/>"#,
            x,
            rect.y,
            x,
            rect.y + rect.h
        );
        let _ = writeln!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" text-anchor="middle" class="tick-label">{}</text>"#,
            x,
            rect.y + rect.h + font * 1.2,
            tick
        );
    }
    let decimals = tick_decimals(&panel.y_ticks);
    for &tick in &panel.y_ticks {
        let y = scale_y(tick);
        let _ = writeln!(
            svg,
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" class="grid"/>"#,
            rect.x,
            y,
            rect.x + rect.w,
            y
        );
        let _ = writeln!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" text-anchor="end" class="tick-label">{:.*}</text>"#,
            rect.x - font * 0.5,
            y + font * 0.35,
            decimals,
            tick
        );
    }

    let _ = writeln!(svg, r#"<g clip-path="url(#clip-{})">"#, key);

    // Series
    if !panel.values.is_empty() {
        let mut path = String::with_capacity(panel.values.len() * 24);
        for (i, &v) in panel.values.iter().enumerate() {
            let prefix = if i == 0 { "M" } else { " L" };
            let _ = write!(path, "{} {:.2},{:.2}", prefix, scale_x(i as f64), scale_y(v));
        }
        let _ = writeln!(svg, r#"<path d="{}" class="series"/>"#, path);
    }

    // Minimum marker
    let min = &panel.annotation;
    let _ = writeln!(
        svg,
        r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" class="min-line"/>"#,
        rect.x,
        scale_y(min.value),
        rect.x + rect.w,
        scale_y(min.value)
    );
    svg.push_str("</g>\n");

    // Label is drawn unclipped, like the legend
    let _ = writeln!(
        svg,
        r#"<text x="{:.2}" y="{:.2}" text-anchor="middle" class="annotation">{}</text>"#,
        scale_x(min.x),
        scale_y(min.y),
        escape_xml(&min.label)
    );

    let _ = writeln!(
        svg,
        r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" class="frame"/>"#,
        rect.x, rect.y, rect.w, rect.h
    );
    svg.push_str("</g>\n");
}

/// Decimal places needed to tell adjacent y ticks apart.
fn tick_decimals(ticks: &[f64]) -> usize {
    let step = match ticks {
        [a, b, ..] => (b - a).abs(),
        _ => return 2,
    };
    if step >= 1.0 {
        0
    } else {
        // 0.25 needs two places, 0.02 needs two, 0.5 needs one
        let mut decimals = (-step.log10()).ceil() as usize;
        let scaled = step * 10_f64.powi(decimals as i32);
        if (scaled - scaled.round()).abs() > 1e-6 {
            decimals += 1;
        }
        decimals
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
