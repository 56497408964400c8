//! Shortest paths around disk obstacles.
//!
//! A path may "surf" along straight bitangent segments between disks and "hug"
//! a disk's boundary along an arc. The pipeline is a single pass:
//! disks → tangent solver → visibility graph (dedup, line of sight, hugging
//! edges) → Dijkstra/A* → ordered path.
//!
//! API Policy
//! - Prefer `api::shortest_path` for one-call use; the modules stay public so
//!   experiments can inspect the graph and tweak search settings.

pub mod api;
pub mod error;
pub mod geom2;
pub mod visgraph;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{PathError, Result};
pub use geom2::{Circle, CircleId, Disk, GeomCfg};
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::api::shortest_path;
    pub use crate::geom2::rand::{draw_scene, ReplayToken, SceneCfg};
    pub use crate::geom2::{Circle, CircleId, Disk, GeomCfg};
    pub use crate::visgraph::{
        build_graph, find_path, prepare_circles, Graph, Heuristic, Leg, Path, PathNode,
        SearchCfg,
    };
    pub use crate::{PathError, Result};
    pub use nalgebra::Vector2 as Vec2;
}
