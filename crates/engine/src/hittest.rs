//! Pointer hit testing against the scattered points
//!
//! Works in CSS pixel space so results are independent of display density,
//! and reuses the field's spatial index: a conservative data-space radius
//! prunes candidates, then exact screen-space distances decide.

use scattermap_core::{Point2, ViewTransform};

use crate::field::Field;

/// Index of the point nearest to `screen` (CSS pixels) within
/// `max_dist_px`, or `None` when nothing is close enough.
///
/// Screen-space distance ties break by ascending point index.
pub fn hit_test(
    field: &Field,
    transform: &ViewTransform,
    screen: Point2,
    max_dist_px: f64,
) -> Option<usize> {
    if field.is_empty() || max_dist_px < 0.0 {
        return None;
    }

    let candidates = candidate_indices(field, transform, screen, max_dist_px);

    let mut best: Option<(f64, usize)> = None;
    for i in candidates {
        let p = transform.data_to_screen(field.point(i));
        let d = p.dist(screen.x, screen.y);
        if d > max_dist_px {
            continue;
        }
        let better = match best {
            None => true,
            Some((bd, bi)) => d < bd || (d == bd && i < bi),
        };
        if better {
            best = Some((d, i));
        }
    }

    best.map(|(_, i)| i)
}

/// Candidate point indices near the query. Uses the spatial index when the
/// transform gives a finite screen-to-data scale; a degenerate domain axis
/// falls back to scanning all points.
fn candidate_indices(
    field: &Field,
    transform: &ViewTransform,
    screen: Point2,
    max_dist_px: f64,
) -> Vec<usize> {
    if !transform.is_degenerate() {
        let min_scale = transform.x_scale().abs().min(transform.y_scale().abs());
        if min_scale.is_finite() && min_scale > 0.0 {
            let q = transform.screen_to_data(screen);
            // A screen ball of max_dist_px maps into a data ball no larger
            // than max_dist_px / min_scale. The floor keeps a zero pointer
            // tolerance able to match exact hits.
            let r_data = (max_dist_px / min_scale).max(1e-12);
            return field.index().within_radius(q.x, q.y, r_data);
        }
    }
    (0..field.len()).collect()
}
