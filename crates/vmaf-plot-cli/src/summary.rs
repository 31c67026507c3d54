//! Per-metric summary table.

use vmaf_plot::stats::{Summary, summarize};
use vmaf_plot::{ChartMode, MetricKind, MetricsSeries};

pub fn print(series: &MetricsSeries, mode: ChartMode) {
    let heading = match mode {
        ChartMode::Absolute => "Per-frame statistics",
        ChartMode::Comparison => "Per-frame difference statistics",
    };
    println!("{} ({} frames):", heading, series.len());
    println!("{:-<84}", "");
    println!(
        "{:<8} {:>10} {:>10} {:>10} {:>8} {:>10} {:>10} {:>10}",
        "Metric", "Mean", "Median", "Min", "@frame", "Max", "StdDev", "P5"
    );
    println!("{:-<84}", "");

    for (kind, summary) in summarize(series) {
        println!("{:<8} {}", kind.title(), format_row(&summary, decimals(kind)));
    }
}

fn decimals(kind: MetricKind) -> usize {
    match kind {
        MetricKind::Ssim => 5,
        _ => 3,
    }
}

fn format_row(s: &Summary, decimals: usize) -> String {
    format!(
        "{:>10.*} {:>10.*} {:>10.*} {:>8} {:>10.*} {:>10.*} {:>10.*}",
        decimals, s.mean, decimals, s.median, decimals, s.min, s.min_frame, decimals, s.max,
        decimals, s.std_dev, decimals, s.p5
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_row() {
        let summary = Summary::compute(&[2.0, 3.0, 1.0]).unwrap();
        let row = format_row(&summary, 2);
        let cells: Vec<&str> = row.split_whitespace().collect();
        assert_eq!(&cells[..5], &["2.00", "2.00", "1.00", "2", "3.00"]);
    }
}
