//! 2D geometry for disk obstacles.
//!
//! Purpose
//! - Hold the obstacle types (`Disk` as given by callers, `Circle` once sorted
//!   and id-assigned) and the small vector helpers the tangent solver and the
//!   visibility graph share.
//! - Compute bitangent points between pairs of circles (`tangent`).
//!
//! Conventions
//! - Points are `nalgebra::Vector2<f64>`; angles are radians, bearings come
//!   from `atan2` and lie in (−π, π].
//! - Radius 0 is a point obstacle (start/goal marker).

pub mod rand;
pub mod tangent;
mod types;
mod util;

pub use tangent::{
    candidate_segments, external_bitangents, internal_bitangents, BitangentKind, Bitangents,
    Candidate,
};
pub use types::{Circle, CircleId, Disk, GeomCfg};
pub use util::{
    angle_difference, direction_step, facing, polar, quantize, segment_closest_approach,
    signed_angle_difference, SegmentApproach,
};
