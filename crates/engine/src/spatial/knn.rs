//! Expanding-radius k-nearest-neighbor search
//!
//! Layered on the index's radius query: start from a density-derived seed
//! radius and double it until enough candidates turn up or the search ball
//! provably covers the whole point set, then sort exactly and truncate.

use super::index::SpatialIndex;

/// Seed radius when the point set's bounding box is degenerate
/// (all points coincide).
const FALLBACK_SEED_RADIUS: f64 = 1.0;

/// A neighbor hit: original point index plus exact Euclidean distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub index: usize,
    pub dist: f64,
}

/// Find the `k` nearest indexed points to (x, y).
///
/// Returns exactly `min(k, n)` results sorted by non-decreasing distance;
/// distance ties break by ascending original index, so results are fully
/// deterministic. A query coinciding with a data point returns that point —
/// self-exclusion, when wanted, is the caller's job.
pub fn k_nearest(index: &SpatialIndex, x: f64, y: f64, k: usize) -> Vec<Neighbor> {
    if index.is_empty() || k == 0 {
        return Vec::new();
    }

    let bounds = match index.bounds() {
        Some(b) => b,
        None => return Vec::new(),
    };

    let diagonal = bounds.diagonal();
    let mut radius = if diagonal > 0.0 {
        diagonal / (index.len() as f64).sqrt()
    } else {
        FALLBACK_SEED_RADIUS
    };

    // Once the ball reaches the farthest bounding-box corner it contains
    // every point, so expansion always terminates with all candidates.
    let covering_radius = bounds.farthest_corner_dist(x, y).max(radius);

    let mut candidates;
    loop {
        candidates = index.within_radius(x, y, radius);
        if candidates.len() >= k || radius >= covering_radius {
            break;
        }
        radius *= 2.0;
    }

    let mut neighbors: Vec<Neighbor> = candidates
        .into_iter()
        .map(|i| Neighbor {
            index: i,
            dist: index.point(i).dist(x, y),
        })
        .collect();

    neighbors.sort_unstable_by(|a, b| {
        a.dist
            .partial_cmp(&b.dist)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.index.cmp(&b.index))
    });
    neighbors.truncate(k);
    neighbors
}

#[cfg(test)]
mod tests {
    use super::*;
    use scattermap_core::Point2;

    fn grid_points() -> Vec<Point2> {
        let mut pts = Vec::new();
        for y in 0..10 {
            for x in 0..10 {
                pts.push(Point2::new(x as f64, y as f64));
            }
        }
        pts
    }

    fn brute_force_knn(points: &[Point2], x: f64, y: f64, k: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..points.len()).collect();
        order.sort_by(|&a, &b| {
            points[a]
                .dist_sq(x, y)
                .partial_cmp(&points[b].dist_sq(x, y))
                .unwrap()
                .then(a.cmp(&b))
        });
        order.truncate(k);
        order
    }

    #[test]
    fn returns_exactly_min_k_n() {
        let pts = grid_points();
        let index = SpatialIndex::build(&pts);

        for k in [1, 3, 7, 50, 100, 500] {
            let got = k_nearest(&index, 4.3, 6.1, k);
            assert_eq!(got.len(), k.min(pts.len()));
        }
    }

    #[test]
    fn sorted_by_nondecreasing_distance() {
        let index = SpatialIndex::build(&grid_points());
        let got = k_nearest(&index, 5.2, 5.7, 20);
        for w in got.windows(2) {
            assert!(w[0].dist <= w[1].dist);
        }
    }

    #[test]
    fn matches_brute_force() {
        let pts = grid_points();
        let index = SpatialIndex::build(&pts);

        for &(qx, qy) in &[(0.0, 0.0), (4.5, 4.5), (9.9, 0.1), (-3.0, 12.0)] {
            for k in [1, 4, 9, 25] {
                let got: Vec<usize> = k_nearest(&index, qx, qy, k)
                    .iter()
                    .map(|n| n.index)
                    .collect();
                assert_eq!(got, brute_force_knn(&pts, qx, qy, k), "q=({qx},{qy}) k={k}");
            }
        }
    }

    #[test]
    fn ties_break_by_ascending_index() {
        // Four points equidistant from the origin
        let pts = vec![
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(-1.0, 0.0),
            Point2::new(0.0, -1.0),
        ];
        let index = SpatialIndex::build(&pts);

        let got: Vec<usize> = k_nearest(&index, 0.0, 0.0, 3)
            .iter()
            .map(|n| n.index)
            .collect();
        assert_eq!(got, vec![0, 1, 2]);
    }

    #[test]
    fn query_on_a_data_point_includes_it() {
        let pts = grid_points();
        let index = SpatialIndex::build(&pts);
        let got = k_nearest(&index, 3.0, 3.0, 1);
        assert_eq!(got[0].index, 33);
        assert_eq!(got[0].dist, 0.0);
    }

    #[test]
    fn sparse_far_query_still_finds_k() {
        // Query far outside the bounding box forces radius expansion
        let pts = grid_points();
        let index = SpatialIndex::build(&pts);
        let got = k_nearest(&index, 1000.0, -1000.0, 5);
        assert_eq!(got.len(), 5);
    }

    #[test]
    fn fewer_points_than_k_returns_all_sorted() {
        let pts = vec![Point2::new(0.0, 0.0), Point2::new(3.0, 0.0)];
        let index = SpatialIndex::build(&pts);
        let got = k_nearest(&index, 2.0, 0.0, 10);
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].index, 1);
        assert_eq!(got[1].index, 0);
    }

    #[test]
    fn coincident_points_degenerate_bbox() {
        let pts = vec![Point2::new(5.0, 5.0); 3];
        let index = SpatialIndex::build(&pts);
        let got = k_nearest(&index, 5.0, 5.0, 2);
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].index, 0);
        assert_eq!(got[1].index, 1);
    }

    #[test]
    fn empty_index_returns_nothing() {
        let index = SpatialIndex::build(&[]);
        assert!(k_nearest(&index, 0.0, 0.0, 5).is_empty());
    }
}
