//! On-screen display through the platform image viewer.
//!
//! The chart is rendered to `plotvmaf-<input stem>.png` in the system temp
//! directory and handed to `xdg-open` (Linux/BSD), `open` (macOS) or `start`
//! (Windows). Without a display the same file is still produced and its path
//! reported. Plotting the same input again overwrites that file.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::{OutputFormat, save};
use crate::chart::ChartConfig;
use crate::error::{Error, Result};

/// Whether an interactive display is reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// A graphical session is available.
    Display,
    /// No graphical session; render to a file only.
    Headless,
}

impl Surface {
    /// Detects the surface from the process environment.
    #[must_use]
    pub fn detect() -> Self {
        Self::from_env(|key| std::env::var_os(key))
    }

    fn from_env(lookup: impl Fn(&str) -> Option<OsString>) -> Self {
        if cfg!(any(target_os = "macos", target_os = "windows")) {
            return Self::Display;
        }
        let set = |key: &str| lookup(key).is_some_and(|v| !v.is_empty());
        if set("DISPLAY") || set("WAYLAND_DISPLAY") {
            Self::Display
        } else {
            Self::Headless
        }
    }
}

/// Renders `svg` to the PNG at [`display_path`] and opens it when a display
/// is available. Returns the PNG's path.
pub fn show(svg: &str, title: &str, config: &ChartConfig, surface: Surface) -> Result<PathBuf> {
    let path = display_path(title);
    save(svg, &path, OutputFormat::Png, config)?;

    match surface {
        Surface::Display => {
            let (program, args) = VIEWER;
            open_with(program, args, &path)?;
            tracing::debug!(path = %path.display(), program, "opened chart in viewer");
        }
        Surface::Headless => {
            tracing::warn!(
                path = %path.display(),
                "no display available; chart rendered to file only"
            );
        }
    }
    Ok(path)
}

#[cfg(target_os = "macos")]
const VIEWER: (&str, &[&str]) = ("open", &[]);
#[cfg(target_os = "windows")]
const VIEWER: (&str, &[&str]) = ("cmd", &["/C", "start", ""]);
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const VIEWER: (&str, &[&str]) = ("xdg-open", &[]);

fn viewer_hint(program: &str) -> String {
    match program {
        "xdg-open" => "install package 'xdg-utils' or pass --output to save to a file".to_string(),
        _ => format!("make sure '{program}' is on PATH or pass --output to save to a file"),
    }
}

fn open_with(program: &str, args: &[&str], path: &Path) -> Result<()> {
    let status = Command::new(program)
        .args(args)
        .arg(path)
        .status()
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::Dependency {
                program: program.to_string(),
                hint: viewer_hint(program),
            },
            _ => Error::Io(e),
        })?;

    if !status.success() {
        return Err(Error::Dependency {
            program: program.to_string(),
            hint: format!("viewer exited with {status}; {}", viewer_hint(program)),
        });
    }
    Ok(())
}

/// Where the chart titled `title` is rendered for display.
#[must_use]
pub fn display_path(title: &str) -> PathBuf {
    std::env::temp_dir().join(format!("plotvmaf-{}.png", file_stem(title)))
}

/// A file-name-safe stem derived from the chart title.
fn file_stem(title: &str) -> String {
    let stem = Path::new(title)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("chart");
    let cleaned: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "chart".to_string()
    } else {
        cleaned
    }
}
