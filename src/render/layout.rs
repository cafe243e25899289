use crate::types::Point;

const MARGIN_LEFT: f64 = 56.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 48.0;
const MARGIN_BOTTOM: f64 = 48.0;
/// Fraction of the data span added on each side.
const PAD_RATIO: f64 = 0.1;
const MIN_SPAN: f64 = 2.0;

/// Maps math coordinates into chart pixels with one scale for both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub plot_left: f64,
    pub plot_top: f64,
    pub plot_right: f64,
    pub plot_bottom: f64,
    data_center_x: f64,
    data_center_y: f64,
    scale: f64,
}

fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    // The origin is always visible so the guide lines cross inside the plot.
    let (mut lo, mut hi) = (0.0_f64, 0.0_f64);
    for v in values {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    let span = (hi - lo).max(MIN_SPAN);
    let mid = (hi + lo) / 2.0;
    let half = span.mul_add(PAD_RATIO, span / 2.0);
    (mid - half, mid + half)
}

impl ChartLayout {
    pub fn fit(points: &[Point], width: u32, height: u32) -> Self {
        let width = f64::from(width);
        let height = f64::from(height);
        let plot_left = MARGIN_LEFT.min(width / 2.0);
        let plot_right = (width - MARGIN_RIGHT).max(plot_left);
        let plot_top = MARGIN_TOP.min(height / 2.0);
        let plot_bottom = (height - MARGIN_BOTTOM).max(plot_top);

        let (x_lo, x_hi) = padded_range(points.iter().map(|p| p.x));
        let (y_lo, y_hi) = padded_range(points.iter().map(|p| p.y));
        let scale = ((plot_right - plot_left) / (x_hi - x_lo))
            .min((plot_bottom - plot_top) / (y_hi - y_lo));

        Self {
            width,
            height,
            plot_left,
            plot_top,
            plot_right,
            plot_bottom,
            data_center_x: (x_lo + x_hi) / 2.0,
            data_center_y: (y_lo + y_hi) / 2.0,
            scale,
        }
    }

    pub const fn scale(&self) -> f64 {
        self.scale
    }

    /// Pixel position of a math coordinate.
    pub fn project(&self, x: f64, y: f64) -> (f64, f64) {
        let mid_x = (self.plot_left + self.plot_right) / 2.0;
        let mid_y = (self.plot_top + self.plot_bottom) / 2.0;
        (
            (x - self.data_center_x).mul_add(self.scale, mid_x),
            (y - self.data_center_y).mul_add(-self.scale, mid_y),
        )
    }

    /// Pixel position of the math origin.
    pub fn origin(&self) -> (f64, f64) {
        self.project(0.0, 0.0)
    }
}
