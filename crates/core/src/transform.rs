//! Affine mapping between data space and viewport pixel space

use serde::{Deserialize, Serialize};

use crate::point::Point2;

/// Span below which a domain axis is treated as degenerate.
const DEGENERATE_SPAN: f64 = 1e-12;

/// Data-space bounds supplied by the caller.
///
/// Padding/extent computation is the caller's responsibility; the engine
/// renders exactly the rectangle described here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    /// Data-space x bounds as [min, max]
    pub x: [f64; 2],
    /// Data-space y bounds as [min, max]
    pub y: [f64; 2],
}

impl Domain {
    pub fn new(x: [f64; 2], y: [f64; 2]) -> Self {
        Self { x, y }
    }
}

/// Affine transformation between a data-space domain rectangle and a
/// pixel-space viewport rectangle.
///
/// Screen coordinates are CSS pixels: x grows rightward into `[0, width]`,
/// y grows **downward** into `[0, height]` while data y grows upward, so the
/// y axis is flipped. Device-pixel-ratio scaling is deliberately not part of
/// this transform; it only applies when sizing the backing raster, keeping
/// pointer math in CSS pixel space.
///
/// A zero-span domain axis is degenerate: every data coordinate maps to the
/// viewport midpoint on that axis, and the inverse returns the collapsed
/// domain value. The exact round-trip contract holds only for non-degenerate
/// domains.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    /// Data-space x bounds as [min, max]
    pub x_domain: [f64; 2],
    /// Data-space y bounds as [min, max]
    pub y_domain: [f64; 2],
    /// Viewport width in CSS pixels
    pub width: f64,
    /// Viewport height in CSS pixels
    pub height: f64,
}

impl ViewTransform {
    pub fn new(x_domain: [f64; 2], y_domain: [f64; 2], width: f64, height: f64) -> Self {
        Self {
            x_domain,
            y_domain,
            width,
            height,
        }
    }

    /// Build a transform from caller-supplied domain bounds and a CSS-pixel
    /// viewport size.
    pub fn from_domain(domain: &Domain, width: f64, height: f64) -> Self {
        Self::new(domain.x, domain.y, width, height)
    }

    fn x_span(&self) -> f64 {
        self.x_domain[1] - self.x_domain[0]
    }

    fn y_span(&self) -> f64 {
        self.y_domain[1] - self.y_domain[0]
    }

    /// Whether either domain axis has (near-)zero span.
    pub fn is_degenerate(&self) -> bool {
        self.x_span().abs() < DEGENERATE_SPAN || self.y_span().abs() < DEGENERATE_SPAN
    }

    /// Convert a data-space point to CSS pixel coordinates.
    pub fn data_to_screen(&self, p: Point2) -> Point2 {
        let xs = self.x_span();
        let ys = self.y_span();

        let sx = if xs.abs() < DEGENERATE_SPAN {
            self.width * 0.5
        } else {
            (p.x - self.x_domain[0]) / xs * self.width
        };

        let sy = if ys.abs() < DEGENERATE_SPAN {
            self.height * 0.5
        } else {
            self.height - (p.y - self.y_domain[0]) / ys * self.height
        };

        Point2::new(sx, sy)
    }

    /// Convert CSS pixel coordinates back to data space.
    pub fn screen_to_data(&self, p: Point2) -> Point2 {
        let xs = self.x_span();
        let ys = self.y_span();

        let dx = if xs.abs() < DEGENERATE_SPAN || self.width.abs() < DEGENERATE_SPAN {
            self.x_domain[0]
        } else {
            self.x_domain[0] + p.x / self.width * xs
        };

        let dy = if ys.abs() < DEGENERATE_SPAN || self.height.abs() < DEGENERATE_SPAN {
            self.y_domain[0]
        } else {
            self.y_domain[0] + (self.height - p.y) / self.height * ys
        };

        Point2::new(dx, dy)
    }

    /// Screen pixels per data unit on the x axis (infinite for a degenerate axis).
    pub fn x_scale(&self) -> f64 {
        self.width / self.x_span()
    }

    /// Screen pixels per data unit on the y axis (infinite for a degenerate axis).
    pub fn y_scale(&self) -> f64 {
        self.height / self.y_span()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn roundtrip_inside_viewport() {
        let t = ViewTransform::new([-2.0, 3.0], [10.0, 50.0], 800.0, 600.0);

        for &(x, y) in &[(0.0, 0.0), (123.4, 456.7), (800.0, 600.0), (400.0, 300.0)] {
            let p = Point2::new(x, y);
            let back = t.data_to_screen(t.screen_to_data(p));
            assert_relative_eq!(back.x, p.x, epsilon = 1e-9);
            assert_relative_eq!(back.y, p.y, epsilon = 1e-9);
        }
    }

    #[test]
    fn y_axis_is_flipped() {
        let t = ViewTransform::new([0.0, 1.0], [0.0, 1.0], 100.0, 100.0);

        // Data-space top (y = 1) lands at screen top (y = 0)
        let top = t.data_to_screen(Point2::new(0.0, 1.0));
        assert_relative_eq!(top.y, 0.0, epsilon = 1e-12);

        let bottom = t.data_to_screen(Point2::new(0.0, 0.0));
        assert_relative_eq!(bottom.y, 100.0, epsilon = 1e-12);
    }

    #[test]
    fn corners_map_to_corners() {
        let t = ViewTransform::new([0.0, 10.0], [0.0, 20.0], 200.0, 100.0);

        let p = t.data_to_screen(Point2::new(0.0, 20.0));
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-12);

        let p = t.data_to_screen(Point2::new(10.0, 0.0));
        assert_relative_eq!(p.x, 200.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 100.0, epsilon = 1e-12);
    }

    #[test]
    fn degenerate_domain_maps_to_midpoint() {
        let t = ViewTransform::new([5.0, 5.0], [0.0, 1.0], 100.0, 80.0);
        assert!(t.is_degenerate());

        let p = t.data_to_screen(Point2::new(5.0, 0.5));
        assert_relative_eq!(p.x, 50.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 40.0, epsilon = 1e-12);

        // Inverse returns the collapsed domain value, never NaN
        let d = t.screen_to_data(Point2::new(12.0, 40.0));
        assert_relative_eq!(d.x, 5.0, epsilon = 1e-12);
    }
}
