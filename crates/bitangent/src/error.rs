//! Error taxonomy for path queries.
//!
//! Only malformed input and configuration errors are surfaced here. Tangent
//! pairs outside the `acos` domain and blocked segments are dropped while the
//! graph is built, and an unreachable goal is `Ok(None)` from the search.

use thiserror::Error;

use crate::geom2::CircleId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    #[error("need at least two disks, got {count}")]
    TooFewCircles { count: usize },

    #[error("disk #{index} is invalid: {reason}")]
    InvalidDisk { index: usize, reason: &'static str },

    #[error("expected exactly two zero-radius disks (start and goal), got {count}")]
    PointObstacleCount { count: usize },

    /// A start/goal circle must resolve to exactly one graph node.
    #[error("zero-radius circle {circle:?} maps to {count} graph nodes, expected exactly one")]
    PointObstacleNodes { circle: CircleId, count: usize },

    /// Out-of-range `GeomCfg` / `SearchCfg` setting.
    #[error("invalid setting `{field}`: {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },

    #[error("zero-radius circle {circle:?} coincides with a node on circle {other:?}")]
    CoincidentPointObstacle { circle: CircleId, other: CircleId },
}

pub type Result<T> = std::result::Result<T, PathError>;
