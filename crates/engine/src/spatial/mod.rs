//! Spatial indexing and nearest-neighbor queries

mod index;
mod knn;

pub use index::{BoundingBox, SpatialIndex};
pub use knn::{k_nearest, Neighbor};
