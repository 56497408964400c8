//! Path assembly from search predecessors, plus drawable legs.

use nalgebra::Vector2;

use crate::geom2::{facing, signed_angle_difference, CircleId};

use super::types::{Graph, NodeId};

/// A path vertex: position and the circle it lies on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathNode {
    pub x: f64,
    pub y: f64,
    pub circle: CircleId,
}

/// One step of a path, in travel order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Leg {
    /// Straight segment between two circles.
    Surf {
        from: Vector2<f64>,
        to: Vector2<f64>,
    },
    /// Arc on `circle`, starting at bearing `start_angle` and turning by
    /// `sweep` radians (positive is counterclockwise, |sweep| <= π).
    Hug {
        circle: CircleId,
        center: Vector2<f64>,
        r: f64,
        start_angle: f64,
        sweep: f64,
    },
}

impl Leg {
    /// Geometric length (no hop penalty).
    pub fn length(&self) -> f64 {
        match *self {
            Leg::Surf { from, to } => (to - from).norm(),
            Leg::Hug { r, sweep, .. } => r * sweep.abs(),
        }
    }
}

/// Ordered path from the start node to the goal node, inclusive.
#[derive(Clone, Debug)]
pub struct Path {
    pub nodes: Vec<PathNode>,
    pub ids: Vec<NodeId>,
    pub legs: Vec<Leg>,
    /// Search cost, hop penalties included.
    pub cost: f64,
}

impl Path {
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    /// Sum of chord and arc lengths.
    pub fn length(&self) -> f64 {
        self.legs.iter().map(Leg::length).sum()
    }
}

/// Walk predecessors from `goal` back to `start`.
///
/// Returns `None` if the chain breaks before reaching `start` (goal never
/// reached); a truncated path is never returned.
pub(crate) fn assemble(
    g: &Graph,
    came_from: &[Option<NodeId>],
    start: NodeId,
    goal: NodeId,
    cost: f64,
) -> Option<Path> {
    let mut ids = vec![goal];
    let mut cur = goal;
    while cur != start {
        cur = came_from[cur.0]?;
        ids.push(cur);
        if ids.len() > g.nodes.len() {
            return None;
        }
    }
    ids.reverse();
    let nodes = ids
        .iter()
        .map(|&id| {
            let n = g.node(id);
            PathNode {
                x: n.pos.x,
                y: n.pos.y,
                circle: n.circle,
            }
        })
        .collect();
    let legs = ids.windows(2).map(|w| leg(g, w[0], w[1])).collect();
    Some(Path {
        nodes,
        ids,
        legs,
        cost,
    })
}

fn leg(g: &Graph, a: NodeId, b: NodeId) -> Leg {
    let (na, nb) = (g.node(a), g.node(b));
    if na.circle == nb.circle {
        let c = g.circle(na.circle);
        let start_angle = facing(c.center, na.pos);
        Leg::Hug {
            circle: c.id,
            center: c.center,
            r: c.r,
            start_angle,
            sweep: signed_angle_difference(start_angle, facing(c.center, nb.pos)),
        }
    } else {
        Leg::Surf {
            from: na.pos,
            to: nb.pos,
        }
    }
}
