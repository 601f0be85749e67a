/// CSS-pixel size of the hero canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Fit the canvas into `container_width`, never wider than `max_width`,
    /// keeping the `max_width : max_height` proportions. Returns `None` when
    /// there is no usable width (hidden or collapsed container).
    pub fn fit(container_width: f64, max_width: f64, max_height: f64) -> Option<Self> {
        if !(container_width.is_finite() && container_width >= 1.0) {
            return None;
        }
        let width = max_width.min(container_width);
        Some(Self {
            width,
            height: width * (max_height / max_width),
        })
    }

    pub fn aspect(&self) -> f32 {
        (self.width / self.height) as f32
    }

    /// Backing-store size in device pixels for a (clamped) pixel ratio.
    pub fn backing_size(&self, pixel_ratio: f64) -> (u32, u32) {
        let w = (self.width * pixel_ratio).floor() as u32;
        let h = (self.height * pixel_ratio).floor() as u32;
        (w.max(1), h.max(1))
    }
}

/// Device pixel ratio capped to keep fill-rate bounded on dense displays.
pub fn effective_pixel_ratio(device_ratio: f64, max_ratio: f64) -> f64 {
    if device_ratio.is_finite() && device_ratio > 0.0 {
        device_ratio.min(max_ratio)
    } else {
        1.0
    }
}
