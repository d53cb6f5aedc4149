//! # Scattermap Engine
//!
//! Scattered-data spatial interpolation and heatmap rasterization.
//!
//! Given 2D projected points carrying scalar quality values, the engine
//! produces a continuous colored raster over an arbitrary viewport:
//!
//! - **spatial**: static k-d tree with radius queries, expanding-radius KNN
//! - **shepard**: inverse-distance-weighted interpolation
//! - **render**: block-fill and bilinear-smoothed rasterization, adaptive
//!   stride, advisory frame budget, resumable render jobs
//! - **schedule**: single-pending-frame request discipline
//! - **hittest**: pointer lookup in CSS pixel space
//!
//! Every render is a pure function of an immutable input snapshot; the only
//! state with a longer lifetime is the read-only spatial index cached in
//! [`Field`].
//!
//! ## Usage
//!
//! ```
//! use scattermap_core::{Domain, PixelSurface, Point2, Viewport};
//! use scattermap_engine::{render, Field, RenderMode, RenderParams};
//!
//! let field = Field::new(
//!     vec![Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)],
//!     vec![0.2, 0.8],
//! )?;
//! let viewport = Viewport::new(64, 64, 1.0);
//! let mut surface = PixelSurface::new(64, 64);
//!
//! let stats = render(
//!     &field,
//!     &RenderParams::default(),
//!     &Domain::new([0.0, 1.0], [0.0, 1.0]),
//!     &viewport,
//!     RenderMode::Smooth,
//!     None,
//!     &mut surface,
//! )?;
//! assert!(stats.evaluations > 0);
//! # Ok::<(), scattermap_core::Error>(())
//! ```

pub mod field;
pub mod hittest;
pub mod params;
pub mod render;
pub mod schedule;
pub mod shepard;
pub mod spatial;

pub use field::Field;
pub use hittest::hit_test;
pub use params::{RenderMode, RenderParams};
pub use render::{adaptive_step, render, FrameBudget, JobState, RenderJob, RenderStats};
pub use schedule::{FrameScheduler, RenderRequest};
pub use spatial::{k_nearest, BoundingBox, Neighbor, SpatialIndex};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::field::Field;
    pub use crate::hittest::hit_test;
    pub use crate::params::{RenderMode, RenderParams};
    pub use crate::render::{
        adaptive_step, render, FrameBudget, JobState, RenderJob, RenderStats,
    };
    pub use crate::schedule::{FrameScheduler, RenderRequest};
    pub use crate::spatial::{k_nearest, Neighbor, SpatialIndex};
    pub use scattermap_colormap::{ColorScheme, ValueRange};
    pub use scattermap_core::prelude::*;
}
