//! Static 2D k-d tree for radius-range queries
//!
//! Built once over an immutable point set; a change to the points requires
//! constructing a new index. Storage is arena-style: flat coordinate arrays
//! plus a flat node array, no per-point boxing.
//!
//! Reference:
//! Bentley, J.L. (1975). Multidimensional binary search trees used
//! for associative searching. CACM, 18(9).

use scattermap_core::Point2;

/// Axis-aligned bounding box of an indexed point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Compute the bounding box of a point set. `None` for an empty set.
    pub fn from_points(points: &[Point2]) -> Option<Self> {
        let first = points.first()?;
        let mut bb = Self {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in &points[1..] {
            bb.min_x = bb.min_x.min(p.x);
            bb.min_y = bb.min_y.min(p.y);
            bb.max_x = bb.max_x.max(p.x);
            bb.max_y = bb.max_y.max(p.y);
        }
        Some(bb)
    }

    /// Diagonal length; zero when all points coincide.
    pub fn diagonal(&self) -> f64 {
        let dx = self.max_x - self.min_x;
        let dy = self.max_y - self.min_y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Distance from (x, y) to the farthest corner of the box.
    ///
    /// A ball of this radius around (x, y) contains every indexed point.
    pub fn farthest_corner_dist(&self, x: f64, y: f64) -> f64 {
        let dx = (x - self.min_x).abs().max((x - self.max_x).abs());
        let dy = (y - self.min_y).abs().max((y - self.max_y).abs());
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Debug)]
struct Node {
    /// Index into the original point sequence
    point: usize,
    /// Split dimension: 0 = x, 1 = y
    split_dim: u8,
    left: Option<usize>,
    right: Option<usize>,
}

/// Read-only spatial index over a fixed 2D point set.
///
/// The only query is [`within_radius`](Self::within_radius); k-nearest
/// search is layered on top of it by the expanding-radius logic in
/// [`super::knn`].
#[derive(Debug)]
pub struct SpatialIndex {
    nodes: Vec<Node>,
    xs: Vec<f64>,
    ys: Vec<f64>,
    bounds: Option<BoundingBox>,
}

impl SpatialIndex {
    /// Build an index from a point sequence. O(n log n).
    pub fn build(points: &[Point2]) -> Self {
        let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
        let bounds = BoundingBox::from_points(points);

        let mut nodes = Vec::with_capacity(points.len());
        if !points.is_empty() {
            let mut indices: Vec<usize> = (0..points.len()).collect();
            build_recursive(&xs, &ys, &mut indices, 0, &mut nodes);
        }

        Self {
            nodes,
            xs,
            ys,
            bounds,
        }
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Whether the index holds no points.
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Bounding box of the indexed points (`None` when empty).
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.bounds
    }

    /// Coordinates of the point at `index` in the original sequence.
    pub fn point(&self, index: usize) -> Point2 {
        Point2::new(self.xs[index], self.ys[index])
    }

    /// Indices of all points within Euclidean `radius` of (x, y).
    ///
    /// Results are in no particular order. A non-positive radius yields
    /// nothing.
    pub fn within_radius(&self, x: f64, y: f64, radius: f64) -> Vec<usize> {
        if self.nodes.is_empty() || radius <= 0.0 {
            return Vec::new();
        }

        let mut out = Vec::new();
        self.radius_recursive(0, x, y, radius * radius, &mut out);
        out
    }

    fn radius_recursive(
        &self,
        node_idx: usize,
        qx: f64,
        qy: f64,
        radius_sq: f64,
        out: &mut Vec<usize>,
    ) {
        let node = &self.nodes[node_idx];
        let dx = qx - self.xs[node.point];
        let dy = qy - self.ys[node.point];

        if dx * dx + dy * dy <= radius_sq {
            out.push(node.point);
        }

        // Signed distance to the splitting plane decides pruning
        let diff = if node.split_dim == 0 { dx } else { dy };

        // Left holds coords <= split value, right holds coords >= split value.
        if let Some(left) = node.left {
            if diff < 0.0 || diff * diff <= radius_sq {
                self.radius_recursive(left, qx, qy, radius_sq, out);
            }
        }

        if let Some(right) = node.right {
            if diff > 0.0 || diff * diff <= radius_sq {
                self.radius_recursive(right, qx, qy, radius_sq, out);
            }
        }
    }
}

/// Recursively build the tree by median split, alternating dimensions.
fn build_recursive(
    xs: &[f64],
    ys: &[f64],
    indices: &mut [usize],
    depth: usize,
    nodes: &mut Vec<Node>,
) -> usize {
    let n = indices.len();
    let split_dim = (depth % 2) as u8;
    let coords = if split_dim == 0 { xs } else { ys };

    let median = n / 2;
    indices.select_nth_unstable_by(median, |&a, &b| {
        coords[a]
            .partial_cmp(&coords[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let point = indices[median];

    let node_idx = nodes.len();
    nodes.push(Node {
        point,
        split_dim,
        left: None,
        right: None,
    });

    if median > 0 {
        let (left_half, _) = indices.split_at_mut(median);
        let left = build_recursive(xs, ys, left_half, depth + 1, nodes);
        nodes[node_idx].left = Some(left);
    }

    if median + 1 < n {
        let (_, right_half) = indices.split_at_mut(median + 1);
        let right = build_recursive(xs, ys, right_half, depth + 1, nodes);
        nodes[node_idx].right = Some(right);
    }

    node_idx
}
