//! Scatter chart of all recorded points, written as a raster image.

mod layout;
mod raster;
mod svg;

pub use layout::ChartLayout;
pub use raster::{encode_image, rasterize};
pub use svg::chart_svg;

use std::path::{Path, PathBuf};

use crate::persist::write_atomic;
use crate::types::{Point, Slot};

/// Fill and marker size for one slot series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStyle {
    pub color: [u8; 3],
    pub radius: f32,
}

impl SeriesStyle {
    pub fn hex(&self) -> String {
        let [r, g, b] = self.color;
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

/// Everything the chart needs besides the points.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub width: u32,
    pub height: u32,
    pub before: SeriesStyle,
    pub after: SeriesStyle,
}

impl ChartSpec {
    pub const fn series(&self, slot: Slot) -> &SeriesStyle {
        match slot {
            Slot::Before => &self.before,
            Slot::After => &self.after,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to build chart: {0}")]
    Svg(#[from] resvg::usvg::Error),
    #[error("invalid chart size {width}x{height}")]
    Canvas { width: u32, height: u32 },
    #[error("failed to encode chart: {0}")]
    Encode(#[from] image::ImageError),
    #[error("failed to write chart {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Render `points` and replace `output` with the encoded image.
///
/// The format follows the file extension; files without one are written as PNG.
pub fn export_chart(points: &[Point], spec: &ChartSpec, output: &Path) -> Result<(), ExportError> {
    let layout = ChartLayout::fit(points, spec.width, spec.height);
    let markup = chart_svg(points, spec, &layout);
    let image = rasterize(&markup, spec.width, spec.height)?;
    let bytes = encode_image(image, output)?;
    write_atomic(output, &bytes).map_err(|source| ExportError::Io {
        path: output.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests;
