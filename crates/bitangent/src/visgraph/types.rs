//! Data types for the visibility graph and search settings.

use nalgebra::Vector2;

use crate::error::{PathError, Result};
use crate::geom2::{Circle, CircleId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// A quantized point owned by exactly one circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    pub circle: CircleId,
    pub pos: Vector2<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeKind {
    /// Straight tangent segment between two circles.
    Surfing,
    /// Arc along one circle's boundary.
    Hugging,
}

/// Unordered node pair; stored once, traversable both ways.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub a: NodeId,
    pub b: NodeId,
    pub kind: EdgeKind,
}

impl Edge {
    /// The endpoint opposite `n`, if `n` is an endpoint.
    #[inline]
    pub fn other(&self, n: NodeId) -> Option<NodeId> {
        if self.a == n {
            Some(self.b)
        } else if self.b == n {
            Some(self.a)
        } else {
            None
        }
    }
}

/// Visibility graph for one set of circles. Rebuilt from scratch per query.
#[derive(Clone, Debug)]
pub struct Graph {
    /// Circles in id order (descending radius; start and goal last).
    pub circles: Vec<Circle>,
    pub nodes: Vec<Node>,
    pub surfing: Vec<Edge>,
    pub hugging: Vec<Edge>,
    /// Node ids per circle, indexed by `CircleId`.
    pub by_circle: Vec<Vec<NodeId>>,
    /// Neighbor lists over surfing + hugging edges, indexed by `NodeId`.
    pub adj: Vec<Vec<NodeId>>,
}

impl Graph {
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
    #[inline]
    pub fn circle(&self, id: CircleId) -> &Circle {
        &self.circles[id.0]
    }
    #[inline]
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        &self.adj[id.0]
    }
    #[inline]
    pub fn nodes_on(&self, circle: CircleId) -> &[NodeId] {
        self.by_circle
            .get(circle.0)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
    /// Surfing edges followed by hugging edges.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.surfing.iter().chain(self.hugging.iter())
    }
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.surfing.len() + self.hugging.len()
    }
    /// Second-to-last circle (first zero-radius disk in input order).
    pub fn start_circle(&self) -> Option<CircleId> {
        self.circles.len().checked_sub(2).map(CircleId)
    }
    /// Last circle.
    pub fn goal_circle(&self) -> Option<CircleId> {
        self.circles.len().checked_sub(1).map(CircleId)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Heuristic {
    /// Plain Dijkstra.
    #[default]
    None,
    /// A* with straight-line distance to the goal node. Admissible because
    /// every edge costs at least its chord length.
    Euclidean,
}

/// Search configuration.
#[derive(Clone, Copy, Debug)]
pub struct SearchCfg {
    /// Constant added to every edge; favors paths with fewer nodes when
    /// lengths are comparable.
    pub hop_penalty: f64,
    pub heuristic: Heuristic,
}

impl Default for SearchCfg {
    fn default() -> Self {
        Self {
            hop_penalty: 1.0,
            heuristic: Heuristic::None,
        }
    }
}

impl SearchCfg {
    /// Edge weights must stay finite and non-negative for Dijkstra to hold.
    pub fn validate(&self) -> Result<()> {
        if !self.hop_penalty.is_finite() {
            return Err(PathError::InvalidConfig {
                field: "hop_penalty",
                reason: "must be finite",
            });
        }
        if self.hop_penalty < 0.0 {
            return Err(PathError::InvalidConfig {
                field: "hop_penalty",
                reason: "must be >= 0",
            });
        }
        Ok(())
    }
}
