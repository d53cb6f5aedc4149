//! Viewport dimensions and device pixel ratio

use serde::{Deserialize, Serialize};

/// The pixel-space rectangle a render targets.
///
/// `width`/`height` are CSS pixels; the backing raster is sized at device
/// resolution (`width * device_pixel_ratio` etc.) for crisp output on
/// high-density displays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in CSS pixels
    pub width: u32,
    /// Height in CSS pixels
    pub height: u32,
    /// Physical pixels per CSS pixel (>= some positive value; 1.0 on
    /// standard-density displays)
    pub device_pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: u32, height: u32, device_pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }

    /// Backing raster width in device pixels.
    pub fn device_width(&self) -> usize {
        (self.width as f64 * self.device_pixel_ratio).round() as usize
    }

    /// Backing raster height in device pixels.
    pub fn device_height(&self) -> usize {
        (self.height as f64 * self.device_pixel_ratio).round() as usize
    }

    /// Viewport area in CSS pixels, used for point-density heuristics.
    pub fn css_area(&self) -> f64 {
        self.width as f64 * self.height as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_dimensions_scale_with_dpr() {
        let v = Viewport::new(800, 600, 2.0);
        assert_eq!(v.device_width(), 1600);
        assert_eq!(v.device_height(), 1200);
    }

    #[test]
    fn fractional_dpr_rounds() {
        let v = Viewport::new(100, 100, 1.5);
        assert_eq!(v.device_width(), 150);
    }
}
