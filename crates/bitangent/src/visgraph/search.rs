//! Edge costs and best-first search (Dijkstra, optionally A*).

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::{PathError, Result};
use crate::geom2::{angle_difference, facing, CircleId, Disk, GeomCfg};

use super::build::{build_graph, prepare_circles};
use super::path::{assemble, Path};
use super::types::{Graph, Heuristic, NodeId, SearchCfg};

/// Cost of moving between adjacent nodes `a` and `b` (same both ways).
///
/// - Same circle (hugging): `hop_penalty + r · Δθ`, the shorter arc.
/// - Different circles (surfing): `hop_penalty + |ab|`.
pub fn edge_cost(g: &Graph, a: NodeId, b: NodeId, hop_penalty: f64) -> f64 {
    let (na, nb) = (g.node(a), g.node(b));
    if na.circle == nb.circle {
        let c = g.circle(na.circle);
        let delta = angle_difference(facing(c.center, na.pos), facing(c.center, nb.pos));
        hop_penalty + delta * c.r
    } else {
        hop_penalty + (na.pos - nb.pos).norm()
    }
}

/// Build the graph from raw disks and search it.
pub fn solve(disks: &[Disk], cfg: GeomCfg, scfg: SearchCfg) -> Result<Option<Path>> {
    scfg.validate()?;
    let circles = prepare_circles(disks)?;
    let g = build_graph(&circles, cfg)?;
    find_path(&g, scfg)
}

/// Convenience: `solve` with default quantization and cost model.
pub fn solve_with_defaults(disks: &[Disk]) -> Result<Option<Path>> {
    solve(disks, GeomCfg::default(), SearchCfg::default())
}

/// Search from the start circle's node to the goal circle's node.
///
/// Errors if `scfg` is out of range or either zero-radius circle does not
/// resolve to exactly one node. `Ok(None)` means the goal is unreachable.
pub fn find_path(g: &Graph, scfg: SearchCfg) -> Result<Option<Path>> {
    scfg.validate()?;
    let (Some(start_c), Some(goal_c)) = (g.start_circle(), g.goal_circle()) else {
        return Err(PathError::TooFewCircles {
            count: g.circles.len(),
        });
    };
    let start = point_node(g, start_c)?;
    let goal = point_node(g, goal_c)?;
    find_path_between(g, start, goal, scfg)
}

/// The single node of a point obstacle.
fn point_node(g: &Graph, circle: CircleId) -> Result<NodeId> {
    let on = g.nodes_on(circle);
    if on.len() != 1 {
        return Err(PathError::PointObstacleNodes {
            circle,
            count: on.len(),
        });
    }
    let id = on[0];
    let pos = g.node(id).pos;
    if let Some(other) = g
        .nodes
        .iter()
        .find(|n| n.circle != circle && n.pos == pos)
    {
        return Err(PathError::CoincidentPointObstacle {
            circle,
            other: other.circle,
        });
    }
    Ok(id)
}

/// Shortest path between two given nodes, `Ok(None)` if `goal` is unreachable.
pub fn find_path_between(
    g: &Graph,
    start: NodeId,
    goal: NodeId,
    scfg: SearchCfg,
) -> Result<Option<Path>> {
    scfg.validate()?;
    let mut runner = SearchRunner::new(g, goal, scfg);
    runner.run(start);
    tracing::debug!(
        expanded = runner.expanded,
        reached = runner.closed[goal.0],
        cost = runner.cost[goal.0],
        "search finished"
    );
    let path = assemble(g, &runner.came_from, start, goal, runner.cost[goal.0]);
    if path.is_none() {
        tracing::debug!(?start, ?goal, "no path found");
    }
    Ok(path)
}

/// Frontier entry; ordered so that `BinaryHeap` pops the lowest priority.
#[derive(Clone, Copy, Debug)]
struct Frontier {
    priority: f64,
    node: NodeId,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap; equal priorities pop the lower node id first.
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Search state: best known costs, predecessors, and closed set.
struct SearchRunner<'a> {
    g: &'a Graph,
    goal: NodeId,
    scfg: SearchCfg,
    cost: Vec<f64>,
    came_from: Vec<Option<NodeId>>,
    closed: Vec<bool>,
    expanded: usize,
}

impl<'a> SearchRunner<'a> {
    fn new(g: &'a Graph, goal: NodeId, scfg: SearchCfg) -> Self {
        let n = g.nodes.len();
        Self {
            g,
            goal,
            scfg,
            cost: vec![f64::INFINITY; n],
            came_from: vec![None; n],
            closed: vec![false; n],
            expanded: 0,
        }
    }

    fn heuristic(&self, n: NodeId) -> f64 {
        match self.scfg.heuristic {
            Heuristic::None => 0.0,
            Heuristic::Euclidean => (self.g.node(n).pos - self.g.node(self.goal).pos).norm(),
        }
    }

    fn run(&mut self, start: NodeId) {
        self.cost[start.0] = 0.0;
        let mut frontier = BinaryHeap::new();
        frontier.push(Frontier {
            priority: self.heuristic(start),
            node: start,
        });
        while let Some(Frontier { node, .. }) = frontier.pop() {
            if self.closed[node.0] {
                continue;
            }
            self.closed[node.0] = true;
            self.expanded += 1;
            // Stop when the goal is extracted, not when it is first reached.
            if node == self.goal {
                break;
            }
            for &next in self.g.neighbors(node) {
                if self.closed[next.0] {
                    continue;
                }
                let new_cost =
                    self.cost[node.0] + edge_cost(self.g, node, next, self.scfg.hop_penalty);
                if new_cost < self.cost[next.0] {
                    self.cost[next.0] = new_cost;
                    self.came_from[next.0] = Some(node);
                    frontier.push(Frontier {
                        priority: new_cost + self.heuristic(next),
                        node: next,
                    });
                }
            }
        }
    }
}
