//! Graph construction: sorting circles, surfing edges, node dedup, hugging edges.

use std::collections::{HashMap, HashSet};

use nalgebra::Vector2;

use crate::error::{PathError, Result};
use crate::geom2::{
    candidate_segments, quantize, segment_closest_approach, Circle, CircleId, Disk, GeomCfg,
};

use super::types::{Edge, EdgeKind, Graph, Node, NodeId};

/// Validate input disks, sort by descending radius, and assign ids.
///
/// The sort is stable, so the two zero-radius markers end up last in input
/// order: the first becomes the start circle, the second the goal circle.
pub fn prepare_circles(disks: &[Disk]) -> Result<Vec<Circle>> {
    if disks.len() < 2 {
        return Err(PathError::TooFewCircles { count: disks.len() });
    }
    for (index, d) in disks.iter().enumerate() {
        if !(d.center.x.is_finite() && d.center.y.is_finite()) {
            return Err(PathError::InvalidDisk {
                index,
                reason: "center is not finite",
            });
        }
        if !d.r.is_finite() || d.r < 0.0 {
            return Err(PathError::InvalidDisk {
                index,
                reason: "radius must be finite and >= 0",
            });
        }
    }
    let points = disks.iter().filter(|d| d.is_point()).count();
    if points != 2 {
        return Err(PathError::PointObstacleCount { count: points });
    }
    let mut order: Vec<usize> = (0..disks.len()).collect();
    order.sort_by(|&a, &b| disks[b].r.total_cmp(&disks[a].r));
    let circles: Vec<Circle> = order
        .into_iter()
        .enumerate()
        .map(|(id, source)| Circle {
            id: CircleId(id),
            source,
            center: disks[source].center,
            r: disks[source].r,
        })
        .collect();
    tracing::debug!(circles = circles.len(), "circles prepared");
    Ok(circles)
}

/// Build the visibility graph (surfing edges between circle pairs, hugging
/// edges within each circle).
///
/// `circles[k].id` must equal `CircleId(k)`, as produced by `prepare_circles`.
pub fn build_graph(circles: &[Circle], cfg: GeomCfg) -> Result<Graph> {
    cfg.validate()?;
    debug_assert!(circles.iter().enumerate().all(|(k, c)| c.id.0 == k));
    let mut b = Builder::new(circles, cfg);
    for i in 0..circles.len() {
        for j in 0..i {
            // circles[i] is the smaller one; see `candidate_segments`.
            for cand in candidate_segments(&circles[i], &circles[j]) {
                b.try_surf(i, cand.p, j, cand.q);
            }
        }
    }
    let Builder {
        nodes,
        surfing,
        rejected,
        ..
    } = b;

    let mut by_circle: Vec<Vec<NodeId>> = vec![Vec::new(); circles.len()];
    for (k, n) in nodes.iter().enumerate() {
        by_circle[n.circle.0].push(NodeId(k));
    }
    let hugging = hugging_edges(&by_circle);

    let mut adj: Vec<Vec<NodeId>> = vec![Vec::new(); nodes.len()];
    for e in surfing.iter().chain(hugging.iter()) {
        adj[e.a.0].push(e.b);
        adj[e.b.0].push(e.a);
    }
    tracing::debug!(
        nodes = nodes.len(),
        surfing = surfing.len(),
        hugging = hugging.len(),
        rejected,
        "visibility graph built"
    );
    Ok(Graph {
        circles: circles.to_vec(),
        nodes,
        surfing,
        hugging,
        by_circle,
        adj,
    })
}

/// Dedup key: owning circle plus quantized coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct NodeKey {
    circle: CircleId,
    qx: i64,
    qy: i64,
}

struct Builder<'a> {
    circles: &'a [Circle],
    scale: f64,
    nodes: Vec<Node>,
    lookup: HashMap<NodeKey, NodeId>,
    surfing: Vec<Edge>,
    seen: HashSet<(NodeId, NodeId)>,
    rejected: usize,
}

impl<'a> Builder<'a> {
    fn new(circles: &'a [Circle], cfg: GeomCfg) -> Self {
        Self {
            circles,
            scale: cfg.node_scale(),
            nodes: Vec::new(),
            lookup: HashMap::new(),
            surfing: Vec::new(),
            seen: HashSet::new(),
            rejected: 0,
        }
    }

    /// Existing node for the quantized `p` on `circle`, or a new one.
    fn node(&mut self, circle: CircleId, p: Vector2<f64>) -> NodeId {
        let key = NodeKey {
            circle,
            qx: quantize(p.x, self.scale),
            qy: quantize(p.y, self.scale),
        };
        let nodes = &mut self.nodes;
        let scale = self.scale;
        *self.lookup.entry(key).or_insert_with(|| {
            let id = NodeId(nodes.len());
            nodes.push(Node {
                circle,
                pos: Vector2::new(key.qx as f64 / scale, key.qy as f64 / scale),
            });
            id
        })
    }

    /// Whether every coordinate of `p` is finite and quantizes without
    /// saturating the `i64` key.
    fn representable(&self, p: Vector2<f64>) -> bool {
        p.iter()
            .all(|v| v.is_finite() && (v * self.scale).abs() < i64::MAX as f64 / 2.0)
    }

    /// Add a surfing edge from `p` on circle `i` to `q` on circle `j` if both
    /// points are representable and nothing else blocks the segment.
    fn try_surf(&mut self, i: usize, p: Vector2<f64>, j: usize, q: Vector2<f64>) -> bool {
        if !(self.representable(p) && self.representable(q)) {
            self.rejected += 1;
            return false;
        }
        if let Some(k) = self.blocker(i, p, j, q) {
            tracing::trace!(i, j, blocker = k, "tangent segment blocked");
            self.rejected += 1;
            return false;
        }
        let a = self.node(CircleId(i), p);
        let b = self.node(CircleId(j), q);
        let key = if a < b { (a, b) } else { (b, a) };
        if self.seen.insert(key) {
            self.surfing.push(Edge {
                a,
                b,
                kind: EdgeKind::Surfing,
            });
        }
        true
    }

    /// First circle other than `i` and `j` whose disk meets segment `pq`.
    fn blocker(&self, i: usize, p: Vector2<f64>, j: usize, q: Vector2<f64>) -> Option<usize> {
        self.circles
            .iter()
            .enumerate()
            .filter(|&(k, _)| k != i && k != j)
            .find(|(_, c)| segment_closest_approach(p, q, c.center).d <= c.r)
            .map(|(k, _)| k)
    }
}

/// Connect every pair of distinct nodes that share a circle.
fn hugging_edges(by_circle: &[Vec<NodeId>]) -> Vec<Edge> {
    let mut out = Vec::new();
    for bucket in by_circle {
        for i in 0..bucket.len() {
            for j in 0..i {
                out.push(Edge {
                    a: bucket[i],
                    b: bucket[j],
                    kind: EdgeKind::Hugging,
                });
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_dedup_is_idempotent() {
        let circles = vec![Circle::new(0, 0.0, 0.0, 5.0), Circle::new(1, 9.0, 9.0, 1.0)];
        let mut b = Builder::new(&circles, GeomCfg::default());
        let a = b.node(CircleId(0), Vector2::new(3.001, 4.0));
        let again = b.node(CircleId(0), Vector2::new(3.001, 4.0));
        let near = b.node(CircleId(0), Vector2::new(2.998, 4.003));
        assert_eq!(a, again);
        assert_eq!(a, near);
        assert_eq!(b.nodes.len(), 1);
        assert_eq!(b.nodes[0].pos, Vector2::new(3.0, 4.0));
        // Same coordinates on another circle are a different node.
        let other = b.node(CircleId(1), Vector2::new(3.001, 4.0));
        assert_ne!(a, other);
        assert_eq!(b.nodes.len(), 2);
    }

    #[test]
    fn duplicate_surfing_segments_are_stored_once() {
        let circles = vec![
            Circle::new(0, 0.0, 0.0, 1.0),
            Circle::new(1, 10.0, 0.0, 0.0),
        ];
        let mut b = Builder::new(&circles, GeomCfg::default());
        let p = Vector2::new(10.0, 0.0);
        let q = Vector2::new(0.1, 0.995);
        assert!(b.try_surf(1, p, 0, q));
        assert!(b.try_surf(1, p, 0, q + Vector2::new(0.001, 0.0)));
        assert_eq!(b.surfing.len(), 1);
    }

    #[test]
    fn blocked_and_non_finite_segments_are_dropped() {
        let circles = vec![
            Circle::new(0, 5.0, 0.0, 2.0),
            Circle::new(1, 0.0, 0.0, 0.0),
            Circle::new(2, 10.0, 0.0, 0.0),
        ];
        let mut b = Builder::new(&circles, GeomCfg::default());
        assert!(!b.try_surf(2, Vector2::new(10.0, 0.0), 1, Vector2::new(0.0, 0.0)));
        assert!(!b.try_surf(2, Vector2::new(f64::NAN, 0.0), 1, Vector2::new(0.0, 0.0)));
        assert_eq!(b.rejected, 2);
        assert!(b.nodes.is_empty() && b.surfing.is_empty());
        // Coordinates past the i64 key range at this precision.
        assert!(!b.try_surf(2, Vector2::new(1e300, 0.0), 1, Vector2::new(0.0, 0.0)));
        assert_eq!(b.rejected, 3);
        // Segment passing above the disk is clear.
        assert!(b.try_surf(2, Vector2::new(10.0, 3.0), 1, Vector2::new(0.0, 3.0)));
    }
}
