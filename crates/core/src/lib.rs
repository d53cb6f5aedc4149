//! # Scattermap Core
//!
//! Core types for the scattermap heatmap engine.
//!
//! This crate provides:
//! - `Point2`: 2D data-space point
//! - `ViewTransform`: affine data/screen mapping with y flip
//! - `Viewport`: CSS-pixel dimensions plus device pixel ratio
//! - `Surface` / `PixelSurface`: raster write abstraction
//! - Error taxonomy shared across the workspace

pub mod error;
pub mod point;
pub mod surface;
pub mod transform;
pub mod viewport;

pub use error::{Error, Result};
pub use point::Point2;
pub use surface::{PixelSurface, Surface};
pub use transform::{Domain, ViewTransform};
pub use viewport::Viewport;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::point::Point2;
    pub use crate::surface::{PixelSurface, Surface};
    pub use crate::transform::{Domain, ViewTransform};
    pub use crate::viewport::Viewport;
}
