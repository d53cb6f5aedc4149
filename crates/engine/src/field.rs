//! Immutable point/value snapshot with a lazily built spatial index

use once_cell::sync::OnceCell;
use scattermap_core::{Error, Point2, Result};
use tracing::debug;

use crate::spatial::{BoundingBox, SpatialIndex};

/// A scattered-data field: 2D points plus an index-aligned scalar value per
/// point.
///
/// Immutable after construction. The spatial index is built on first use
/// and then shared by every render against this field; a new point set is a
/// new `Field` — there is no partial update. Because nothing mutates after
/// construction, concurrent renders over one field need no locking.
#[derive(Debug)]
pub struct Field {
    points: Vec<Point2>,
    values: Vec<f64>,
    index: OnceCell<SpatialIndex>,
}

impl Field {
    /// Create a field, rejecting a points/values length mismatch before
    /// anything else can run.
    pub fn new(points: Vec<Point2>, values: Vec<f64>) -> Result<Self> {
        if points.len() != values.len() {
            return Err(Error::LengthMismatch {
                points: points.len(),
                values: values.len(),
            });
        }
        Ok(Self {
            points,
            values,
            index: OnceCell::new(),
        })
    }

    /// An empty field; renders against it produce a fully transparent
    /// surface.
    pub fn empty() -> Self {
        Self {
            points: Vec::new(),
            values: Vec::new(),
            index: OnceCell::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn point(&self, i: usize) -> Point2 {
        self.points[i]
    }

    pub fn value(&self, i: usize) -> f64 {
        self.values[i]
    }

    /// The spatial index over this field's points, built on first call.
    pub fn index(&self) -> &SpatialIndex {
        self.index.get_or_init(|| {
            let index = SpatialIndex::build(&self.points);
            debug!(points = self.points.len(), "spatial index built");
            index
        })
    }

    /// Bounding box of the point set (`None` when empty).
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.index().bounds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_mismatch_is_rejected() {
        let points = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)];
        let err = Field::new(points, vec![1.0]).unwrap_err();
        assert!(matches!(
            err,
            Error::LengthMismatch {
                points: 2,
                values: 1
            }
        ));
    }

    #[test]
    fn index_is_built_once_and_reused() {
        let field = Field::new(
            vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)],
            vec![1.0, 2.0],
        )
        .unwrap();

        let a = field.index() as *const _;
        let b = field.index() as *const _;
        assert_eq!(a, b);
        assert_eq!(field.index().len(), 2);
    }

    #[test]
    fn empty_field() {
        let field = Field::empty();
        assert!(field.is_empty());
        assert!(field.bounds().is_none());
    }
}
