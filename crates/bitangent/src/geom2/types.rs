//! Obstacle types and the node quantization setting.
//!
//! - `Disk`: caller-facing obstacle, in the caller's order.
//! - `Circle`: a disk after the descending-radius sort, carrying a stable `CircleId`.
//! - `GeomCfg`: decimal precision used to identify graph nodes.

use nalgebra::Vector2;

use crate::error::{PathError, Result};

/// Geometry configuration.
#[derive(Clone, Copy, Debug)]
pub struct GeomCfg {
    /// Nodes whose coordinates agree to this many decimals (on the same
    /// circle) are the same node.
    pub node_decimals: i32,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self { node_decimals: 2 }
    }
}

impl GeomCfg {
    /// Largest accepted precision. Coordinates up to ~9e8 still quantize
    /// exactly into `i64` keys at this setting.
    pub const MAX_NODE_DECIMALS: i32 = 9;

    /// Reject precisions that would saturate the quantized node keys.
    pub fn validate(&self) -> Result<()> {
        if !(0..=Self::MAX_NODE_DECIMALS).contains(&self.node_decimals) {
            return Err(PathError::InvalidConfig {
                field: "node_decimals",
                reason: "must be within 0..=9",
            });
        }
        Ok(())
    }

    /// Multiplier that maps a coordinate onto the quantization grid.
    #[inline]
    pub fn node_scale(&self) -> f64 {
        10f64.powi(self.node_decimals)
    }
}

/// Obstacle as supplied by the caller: a center and a radius `r >= 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Disk {
    pub center: Vector2<f64>,
    pub r: f64,
}

impl Disk {
    #[inline]
    pub fn new(x: f64, y: f64, r: f64) -> Self {
        Self {
            center: Vector2::new(x, y),
            r,
        }
    }
    /// Zero-radius marker (start or goal).
    #[inline]
    pub fn point(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0)
    }
    #[inline]
    pub fn is_point(&self) -> bool {
        self.r == 0.0
    }
}

/// Dense circle identifier, assigned after sorting by descending radius.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CircleId(pub usize);

/// Obstacle with a stable id. `source` is its index in the caller's input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub id: CircleId,
    pub source: usize,
    pub center: Vector2<f64>,
    pub r: f64,
}

impl Circle {
    /// Circle whose id and source index coincide (handy in tests and benches).
    #[inline]
    pub fn new(id: usize, x: f64, y: f64, r: f64) -> Self {
        Self {
            id: CircleId(id),
            source: id,
            center: Vector2::new(x, y),
            r,
        }
    }
    #[inline]
    pub fn is_point(&self) -> bool {
        self.r == 0.0
    }
}
