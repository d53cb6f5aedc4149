//! Render parameters and validation

use scattermap_colormap::{ColorScheme, ValueRange};
use scattermap_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Rasterization strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RenderMode {
    /// Evaluate once per `grid_step_px` cell and flood the whole block with
    /// the resulting color. Fastest; blocky at large steps.
    #[default]
    Blocks,
    /// Evaluate only a coarse lattice and bilinearly blend the four
    /// enclosing lattice values per pixel before clamp + colormap.
    Smooth,
}

/// Parameters for one render call. Constructed per call, never partially
/// applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderParams {
    /// Neighbors per interpolation query (>= 1)
    pub k: usize,
    /// Inverse-distance exponent (> 0)
    pub power: f64,
    /// Evaluation stride in CSS pixels (>= 1)
    pub grid_step_px: u32,
    /// Value clamp range fed to the colormap (min <= max)
    pub clamp: ValueRange,
    /// Opacity of rendered pixels in [0, 1]
    pub alpha: f64,
    /// Color scheme for the scalar field
    pub scheme: ColorScheme,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            k: 8,
            power: 2.0,
            grid_step_px: 4,
            clamp: ValueRange::default(),
            alpha: 1.0,
            scheme: ColorScheme::Viridis,
        }
    }
}

impl RenderParams {
    /// Check structural validity. Called by the renderer before any pixel
    /// is written; a failure here is a caller programming error.
    pub fn validate(&self) -> Result<()> {
        if self.k < 1 {
            return Err(Error::InvalidParameter {
                name: "k",
                value: self.k.to_string(),
                reason: "at least one neighbor is required".into(),
            });
        }
        if !(self.power > 0.0) || !self.power.is_finite() {
            return Err(Error::InvalidParameter {
                name: "power",
                value: self.power.to_string(),
                reason: "must be a positive finite number".into(),
            });
        }
        if self.grid_step_px < 1 {
            return Err(Error::InvalidParameter {
                name: "grid_step_px",
                value: self.grid_step_px.to_string(),
                reason: "stride must be at least one pixel".into(),
            });
        }
        if !(self.clamp.min <= self.clamp.max) {
            return Err(Error::InvalidParameter {
                name: "clamp",
                value: format!("[{}, {}]", self.clamp.min, self.clamp.max),
                reason: "min must not exceed max".into(),
            });
        }
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(Error::InvalidParameter {
                name: "alpha",
                value: self.alpha.to_string(),
                reason: "opacity must lie in [0, 1]".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(RenderParams::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_parameters() {
        let base = RenderParams::default();

        let p = RenderParams { k: 0, ..base.clone() };
        assert!(p.validate().is_err());

        let p = RenderParams { power: 0.0, ..base.clone() };
        assert!(p.validate().is_err());

        let p = RenderParams { power: f64::NAN, ..base.clone() };
        assert!(p.validate().is_err());

        let p = RenderParams { grid_step_px: 0, ..base.clone() };
        assert!(p.validate().is_err());

        let p = RenderParams {
            clamp: ValueRange::new(2.0, 1.0),
            ..base.clone()
        };
        assert!(p.validate().is_err());

        let p = RenderParams { alpha: 1.5, ..base };
        assert!(p.validate().is_err());
    }

    #[test]
    fn zero_width_clamp_is_allowed() {
        let p = RenderParams {
            clamp: ValueRange::new(3.0, 3.0),
            ..RenderParams::default()
        };
        assert!(p.validate().is_ok());
    }
}
