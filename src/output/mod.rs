//! Output targets: image files or an interactive viewer.
//!
//! Charts are always produced as SVG first. SVG output is written as-is;
//! raster formats are rasterized with resvg and encoded with the `image`
//! crate.
//!
//! ## Format resolution
//!
//! | `--output` | `--format` | Result |
//! |------------|------------|--------|
//! | absent | absent | display on screen |
//! | absent | given | [`Error::Configuration`] |
//! | given | given | explicit format |
//! | given | absent | format from extension (PNG if none) |

mod display;
mod raster;

pub use display::{Surface, display_path, show};
pub use raster::rasterize;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::chart::ChartConfig;
use crate::error::{Error, Result};

/// File formats a chart can be saved as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Scalable Vector Graphics.
    Svg,
    /// Portable Network Graphics.
    Png,
    /// JPEG (no alpha).
    Jpeg,
    /// Windows bitmap.
    Bmp,
    /// TIFF.
    Tiff,
}

impl OutputFormat {
    /// Every supported format.
    pub const ALL: [Self; 5] = [Self::Svg, Self::Png, Self::Jpeg, Self::Bmp, Self::Tiff];

    /// Canonical lowercase name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
        }
    }

    /// Names and file extensions that select this format.
    #[must_use]
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Svg => &["svg"],
            Self::Png => &["png"],
            Self::Jpeg => &["jpeg", "jpg"],
            Self::Bmp => &["bmp"],
            Self::Tiff => &["tiff", "tif"],
        }
    }

    /// Looks up a format by name or extension (case-insensitive).
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.aliases().contains(&ext.as_str()))
    }

    /// Whether the format needs rasterization.
    #[must_use]
    pub fn is_raster(self) -> bool {
        self != Self::Svg
    }

    fn image_format(self) -> Option<image::ImageFormat> {
        match self {
            Self::Svg => None,
            Self::Png => Some(image::ImageFormat::Png),
            Self::Jpeg => Some(image::ImageFormat::Jpeg),
            Self::Bmp => Some(image::ImageFormat::Bmp),
            Self::Tiff => Some(image::ImageFormat::Tiff),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_extension(s).ok_or_else(|| {
            Error::Configuration(format!(
                "unsupported output format '{}' (supported: {})",
                s,
                supported_format_names().join(", ")
            ))
        })
    }
}

/// The formats this build can save.
#[must_use]
pub fn supported_formats() -> &'static [OutputFormat] {
    &OutputFormat::ALL
}

/// Every accepted format name, including aliases.
#[must_use]
pub fn supported_format_names() -> Vec<&'static str> {
    supported_formats()
        .iter()
        .flat_map(|f| f.aliases().iter().copied())
        .collect()
}

/// Where a rendered chart goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Save to a file.
    File {
        /// Destination path.
        path: PathBuf,
        /// Encoding.
        format: OutputFormat,
    },
    /// Show in a viewer (or fall back to a file when headless).
    Display,
}

impl OutputTarget {
    /// Validates the output options. No files are touched.
    pub fn resolve(output: Option<&Path>, format: Option<OutputFormat>) -> Result<Self> {
        let Some(path) = output else {
            return match format {
                Some(f) => Err(Error::Configuration(format!(
                    "output format '{}' requires an output file",
                    f
                ))),
                None => Ok(Self::Display),
            };
        };

        let format = match format {
            Some(f) => f,
            None => match path.extension().and_then(|e| e.to_str()) {
                Some(ext) => ext.parse()?,
                None => OutputFormat::Png,
            },
        };

        Ok(Self::File {
            path: path.to_path_buf(),
            format,
        })
    }
}

/// Writes an SVG chart to `path` in `format`.
///
/// Raster formats are rendered at the chart's pixel size.
pub fn save(svg: &str, path: &Path, format: OutputFormat, config: &ChartConfig) -> Result<()> {
    let Some(image_format) = format.image_format() else {
        std::fs::write(path, svg)?;
        return Ok(());
    };

    let pixels = rasterize(svg, config.pixel_width(), config.pixel_height())?;
    match format {
        OutputFormat::Jpeg | OutputFormat::Bmp => {
            image::DynamicImage::ImageRgba8(pixels)
                .to_rgb8()
                .save_with_format(path, image_format)?;
        }
        _ => pixels.save_with_format(path, image_format)?,
    }

    tracing::debug!(path = %path.display(), %format, "saved chart");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_without_output_is_rejected() {
        let err = OutputTarget::resolve(None, Some(OutputFormat::Png)).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_no_output_means_display() {
        assert_eq!(OutputTarget::resolve(None, None).unwrap(), OutputTarget::Display);
    }

    #[test]
    fn test_format_from_extension() {
        let target = OutputTarget::resolve(Some(Path::new("out/chart.JPG")), None).unwrap();
        assert_eq!(
            target,
            OutputTarget::File {
                path: PathBuf::from("out/chart.JPG"),
                format: OutputFormat::Jpeg,
            }
        );

        let target = OutputTarget::resolve(Some(Path::new("chart")), None).unwrap();
        assert!(matches!(target, OutputTarget::File { format: OutputFormat::Png, .. }));
    }

    #[test]
    fn test_explicit_format_wins() {
        let target =
            OutputTarget::resolve(Some(Path::new("chart.png")), Some(OutputFormat::Svg)).unwrap();
        assert!(matches!(target, OutputTarget::File { format: OutputFormat::Svg, .. }));
    }

    #[test]
    fn test_unknown_extension() {
        let err = OutputTarget::resolve(Some(Path::new("chart.xyz")), None).unwrap_err();
        match err {
            Error::Configuration(msg) => {
                assert!(msg.contains("xyz"));
                assert!(msg.contains("svg"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("tif".parse::<OutputFormat>().unwrap(), OutputFormat::Tiff);
        assert_eq!(".SVG".parse::<OutputFormat>().unwrap(), OutputFormat::Svg);
        assert!("gif".parse::<OutputFormat>().is_err());
        assert!(supported_format_names().contains(&"jpg"));
    }

    #[test]
    fn test_save_svg_writes_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        let svg = "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"10\" height=\"10\"/>\n";

        save(svg, &path, OutputFormat::Svg, &ChartConfig::default()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), svg);
    }
}
