use std::sync::Arc;

use crate::error::{Error, Result};

/// Rasterizes an SVG document into an RGBA image of `width` × `height`.
///
/// Text is shaped with the system's installed fonts.
pub fn rasterize(svg: &str, width: u32, height: u32) -> Result<image::RgbaImage> {
    let mut fontdb = usvg::fontdb::Database::new();
    fontdb.load_system_fonts();

    let opts = usvg::Options {
        fontdb: Arc::new(fontdb),
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(svg, &opts)
        .map_err(|e| Error::Render(format!("parse svg: {e}")))?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| Error::Render(format!("cannot allocate {width}x{height} pixmap")))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    // The chart background is opaque, so premultiplied and straight alpha agree
    image::RgbaImage::from_raw(width, height, pixmap.take())
        .ok_or_else(|| Error::Render("pixmap size mismatch".to_string()))
}
