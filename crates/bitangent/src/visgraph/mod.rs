//! Visibility graph over disk obstacles and shortest-path search.
//!
//! Purpose
//! - Turn bitangent segments that survive line-of-sight tests into surfing
//!   edges, deduplicate their endpoints into nodes, and connect nodes sharing
//!   a circle with hugging edges (`build`).
//! - Run Dijkstra (optionally A*) over surfing + hugging edges with a
//!   per-edge hop penalty, then walk predecessors back into a `Path`
//!   (`search`, `path`).
//!
//! Layout
//! - `types.rs` (graph data and search settings), `build.rs` (construction),
//!   `search.rs` (costs and search), `path.rs` (assembly and legs).

mod build;
mod path;
mod search;
mod types;

pub use build::{build_graph, prepare_circles};
pub use path::{Leg, Path, PathNode};
pub use search::{edge_cost, find_path, find_path_between, solve, solve_with_defaults};
pub use types::{Edge, EdgeKind, Graph, Heuristic, Node, NodeId, SearchCfg};
