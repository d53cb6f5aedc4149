//! Value-range normalization for colormap lookup.

use serde::{Deserialize, Serialize};

use crate::scheme::{evaluate, ColorScheme, Rgb};

/// Clamp range mapping raw scalar values onto the colormap's [0, 1] input.
///
/// A zero-width range is not an error: every value then normalizes to 0.5,
/// so a constant field renders in the scheme's midpoint color instead of
/// dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether the range has (near-)zero width.
    pub fn is_degenerate(&self) -> bool {
        (self.max - self.min).abs() < f64::EPSILON
    }

    /// Clamp `value` into the range and scale to [0, 1].
    ///
    /// Degenerate range -> 0.5. NaN input -> 0.0 (bottom of the scale).
    pub fn normalize(&self, value: f64) -> f64 {
        if value.is_nan() {
            return 0.0;
        }
        if self.is_degenerate() {
            return 0.5;
        }
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

/// Map a raw value through clamp + colormap, producing an RGB triple.
pub fn map_value(scheme: ColorScheme, range: ValueRange, value: f64) -> Rgb {
    evaluate(scheme, range.normalize(value))
}

/// Map a raw value to an RGBA quad with the given alpha in [0, 1].
pub fn rgba(scheme: ColorScheme, range: ValueRange, value: f64, alpha: f64) -> [u8; 4] {
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    map_value(scheme, range, value).with_alpha(a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normalize_scales_linearly() {
        let r = ValueRange::new(10.0, 20.0);
        assert_relative_eq!(r.normalize(10.0), 0.0);
        assert_relative_eq!(r.normalize(15.0), 0.5);
        assert_relative_eq!(r.normalize(20.0), 1.0);
    }

    #[test]
    fn normalize_clamps() {
        let r = ValueRange::new(0.0, 1.0);
        assert_relative_eq!(r.normalize(-5.0), 0.0);
        assert_relative_eq!(r.normalize(5.0), 1.0);
    }

    #[test]
    fn degenerate_range_maps_to_midpoint() {
        let r = ValueRange::new(7.0, 7.0);
        assert!(r.is_degenerate());
        assert_relative_eq!(r.normalize(7.0), 0.5);
        assert_relative_eq!(r.normalize(-100.0), 0.5);

        // Constant field renders in the midpoint color
        assert_eq!(
            map_value(ColorScheme::Coolwarm, r, 7.0),
            Rgb::new(221, 221, 221)
        );
    }

    #[test]
    fn rgba_applies_alpha() {
        let r = ValueRange::new(0.0, 1.0);
        let px = rgba(ColorScheme::Viridis, r, 0.0, 0.5);
        assert_eq!(px[3], 128);
        assert_eq!(&px[..3], &[68, 1, 84]);
    }

    #[test]
    fn rgba_alpha_is_clamped() {
        let r = ValueRange::new(0.0, 1.0);
        assert_eq!(rgba(ColorScheme::Viridis, r, 1.0, 2.0)[3], 255);
        assert_eq!(rgba(ColorScheme::Viridis, r, 1.0, -1.0)[3], 0);
    }
}
