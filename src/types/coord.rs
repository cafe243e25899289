/// Maps canvas (device) coordinates to math coordinates centered on the canvas midpoint.
///
/// Device Y grows downwards, math Y grows upwards. Non-finite input passes through unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasTransform {
    pub center_x: f64,
    pub center_y: f64,
}

impl CanvasTransform {
    pub const fn new(center_x: f64, center_y: f64) -> Self {
        Self { center_x, center_y }
    }

    /// Transform centered on the midpoint of a `width` x `height` canvas.
    pub fn for_canvas(width: f64, height: f64) -> Self {
        Self::new(width / 2.0, height / 2.0)
    }

    pub fn to_math(&self, device_x: f64, device_y: f64) -> (f64, f64) {
        (device_x - self.center_x, self.center_y - device_y)
    }

    pub fn to_device(&self, x: f64, y: f64) -> (f64, f64) {
        (x + self.center_x, self.center_y - y)
    }
}
