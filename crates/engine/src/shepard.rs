//! Inverse Distance Weighting (Shepard) interpolation
//!
//! Estimates a scalar at a query position as a weighted average of its
//! nearest sample points, with weights inversely proportional to distance
//! raised to a power parameter.
//!
//! Reference:
//! Shepard, D. (1968). A two-dimensional interpolation function for
//! irregularly-spaced data. ACM National Conference.

use crate::spatial::Neighbor;

/// Regularizer added to every distance before exponentiation, so a neighbor
/// at distance zero yields a very large finite weight instead of a
/// singularity.
pub const DISTANCE_EPSILON: f64 = 1e-12;

/// Inverse-distance-weighted estimate at a query point.
///
/// `neighbors` are the query's nearest samples (typically from
/// [`crate::spatial::k_nearest`]); `values` is the full scalar field,
/// index-aligned with the original point sequence.
///
/// ```text
/// w_i = 1 / (d_i + eps)^power
/// v   = sum(w_i * v_i) / sum(w_i)
/// ```
///
/// Returns `None` when `neighbors` is empty — "no data" is an explicit
/// outcome here, not a silent zero. With equal neighbor values the estimate
/// is exactly that constant for any `k` and `power` (the weights cancel),
/// and as `power` grows with a neighbor at distance near zero the estimate
/// converges to that neighbor's own value.
pub fn estimate(neighbors: &[Neighbor], values: &[f64], power: f64) -> Option<f64> {
    if neighbors.is_empty() {
        return None;
    }

    let mut sum_w = 0.0;
    let mut sum_wv = 0.0;

    for n in neighbors {
        let w = 1.0 / (n.dist + DISTANCE_EPSILON).powf(power);
        sum_w += w;
        sum_wv += w * values[n.index];
    }

    Some(sum_wv / sum_w)
}
