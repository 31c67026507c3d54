//! plotvmaf - graph per-frame VMAF/PSNR/SSIM from a frame report

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::filter::LevelFilter;
use vmaf_plot::output::supported_format_names;
use vmaf_plot::{Artifact, OutputFormat, PlotRequest};

mod summary;

/// Graph VMAF, PSNR and SSIM per frame, or their difference between two reports.
#[derive(Parser, Debug)]
#[command(name = "plotvmaf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input frame report (JSON)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Report to compare with (plots INPUT minus this report)
    #[arg(short, long, value_name = "PATH")]
    compare: Option<PathBuf>,

    /// Output file; the chart is displayed when omitted
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Output file format (requires --output)
    #[arg(short, long, value_name = "FMT", value_parser = parse_format)]
    format: Option<OutputFormat>,

    /// Print summary statistics for each metric
    #[arg(short, long)]
    summary: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn parse_format(s: &str) -> std::result::Result<OutputFormat, String> {
    s.parse::<OutputFormat>().map_err(|_| {
        format!(
            "unsupported format '{}' (supported: {})",
            s,
            supported_format_names().join(", ")
        )
    })
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let request = PlotRequest {
        input: cli.input,
        compare: cli.compare,
        output: cli.output,
        format: cli.format,
        config: vmaf_plot::ChartConfig::default(),
    };

    tracing::debug!(input = %request.input.display(), compare = ?request.compare, "plotting");

    let outcome = vmaf_plot::plot(&request)
        .with_context(|| format!("Failed to plot {}", request.input.display()))?;

    if cli.summary {
        summary::print(&outcome.series, outcome.mode);
    }

    match outcome.artifact {
        Artifact::File(path) => {
            if cli.verbose {
                eprintln!("Saved to: {}", path.display());
            }
        }
        Artifact::Displayed(path) => {
            tracing::debug!(path = %path.display(), "chart displayed");
        }
        Artifact::Headless(path) => println!("Saved to: {}", path.display()),
    }

    Ok(())
}

fn main() -> ExitCode {
    // Usage errors exit with 1 like every other failure; help and version exit 0
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full() {
        let cli = Cli::try_parse_from([
            "plotvmaf", "a.json", "-c", "b.json", "-o", "out.jpg", "-f", "jpg", "-s",
        ])
        .unwrap();

        assert_eq!(cli.input, PathBuf::from("a.json"));
        assert_eq!(cli.compare, Some(PathBuf::from("b.json")));
        assert_eq!(cli.output, Some(PathBuf::from("out.jpg")));
        assert_eq!(cli.format, Some(OutputFormat::Jpeg));
        assert!(cli.summary);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_long_flags() {
        let cli = Cli::try_parse_from([
            "plotvmaf",
            "a.json",
            "--compare",
            "b.json",
            "--output",
            "out.svg",
            "--format",
            "svg",
            "--verbose",
        ])
        .unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Svg));
        assert!(cli.verbose);
    }

    #[test]
    fn test_input_required() {
        assert!(Cli::try_parse_from(["plotvmaf"]).is_err());
    }

    #[test]
    fn test_unknown_format_rejected() {
        let err = Cli::try_parse_from(["plotvmaf", "a.json", "-o", "x.gif", "-f", "gif"])
            .unwrap_err();
        assert!(err.use_stderr());
        assert!(err.to_string().contains("gif"));
    }

    #[test]
    fn test_format_without_output_fails_before_loading() {
        let cli = Cli::try_parse_from(["plotvmaf", "does-not-exist.json", "-f", "png"]).unwrap();
        let err = run(cli).unwrap_err();
        let root = err.root_cause().to_string();
        assert!(root.contains("requires an output file"), "{root}");
    }
}
