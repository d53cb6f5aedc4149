//! 2D points in data space

use serde::{Deserialize, Serialize};

/// A point in 2D data space.
///
/// Scalar values live in a separate, index-aligned slice rather than on the
/// point itself, so one point set can carry several scalar fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to (other_x, other_y)
    #[inline]
    pub fn dist_sq(&self, other_x: f64, other_y: f64) -> f64 {
        let dx = self.x - other_x;
        let dy = self.y - other_y;
        dx * dx + dy * dy
    }

    /// Euclidean distance to (other_x, other_y)
    #[inline]
    pub fn dist(&self, other_x: f64, other_y: f64) -> f64 {
        self.dist_sq(other_x, other_y).sqrt()
    }
}

impl From<(f64, f64)> for Point2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance() {
        let p = Point2::new(0.0, 0.0);
        assert_eq!(p.dist_sq(3.0, 4.0), 25.0);
        assert_eq!(p.dist(3.0, 4.0), 5.0);
    }
}
