//! # Scattermap Colormap
//!
//! Scalar-to-color mapping for scattermap heatmaps.
//!
//! Provides four named schemes (sequential: viridis, plasma, turbo;
//! diverging: coolwarm) built on a generic multi-stop interpolation engine,
//! plus [`ValueRange`] normalization with a documented midpoint fallback for
//! zero-width ranges.
//!
//! ## Usage
//!
//! ```
//! use scattermap_colormap::{rgba, ColorScheme, ValueRange};
//!
//! let range = ValueRange::new(0.0, 10.0);
//! let px = rgba(ColorScheme::Viridis, range, 2.5, 1.0);
//! assert_eq!(px[3], 255);
//! ```

mod range;
mod scheme;

pub use range::{map_value, rgba, ValueRange};
pub use scheme::{evaluate, ColorScheme, ColorStop, Rgb};
