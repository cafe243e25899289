use std::io::Cursor;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{self, fontdb};

use super::ExportError;

fn font_db() -> Arc<fontdb::Database> {
    static DB: OnceLock<Arc<fontdb::Database>> = OnceLock::new();
    Arc::clone(DB.get_or_init(|| {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        Arc::new(db)
    }))
}

/// Render an SVG document into a straight-alpha RGBA image.
pub fn rasterize(svg: &str, width: u32, height: u32) -> Result<RgbaImage, ExportError> {
    let mut options = usvg::Options::default();
    options.fontdb = font_db();
    let tree = usvg::Tree::from_str(svg, &options)?;
    let mut pixmap = Pixmap::new(width, height).ok_or(ExportError::Canvas { width, height })?;
    resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());

    let mut image = RgbaImage::new(width, height);
    for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Ok(image)
}

/// Encode `image` in the format named by `path`'s extension (PNG when there is none).
pub fn encode_image(image: RgbaImage, path: &Path) -> Result<Vec<u8>, ExportError> {
    let format = if path.extension().is_some() {
        ImageFormat::from_path(path)?
    } else {
        ImageFormat::Png
    };
    let image = match format {
        ImageFormat::Jpeg | ImageFormat::Bmp => DynamicImage::ImageRgb8(
            DynamicImage::ImageRgba8(image).to_rgb8(),
        ),
        _ => DynamicImage::ImageRgba8(image),
    };
    let mut cursor = Cursor::new(Vec::new());
    image.write_to(&mut cursor, format)?;
    Ok(cursor.into_inner())
}
