use std::f64::consts::{PI, TAU};

use nalgebra::Vector2;

/// Vector of length `distance` pointing at `angle`.
#[inline]
pub fn polar(distance: f64, angle: f64) -> Vector2<f64> {
    Vector2::new(distance * angle.cos(), distance * angle.sin())
}

/// Point reached from `origin` by moving `distance` along `angle`.
#[inline]
pub fn direction_step(origin: Vector2<f64>, distance: f64, angle: f64) -> Vector2<f64> {
    origin + polar(distance, angle)
}

/// Bearing of `to` as seen from `from`, in (−π, π]. Coincident points give 0.
#[inline]
pub fn facing(from: Vector2<f64>, to: Vector2<f64>) -> f64 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Signed turn from bearing `a` to bearing `b`, normalized into (−π, π].
#[inline]
pub fn signed_angle_difference(a: f64, b: f64) -> f64 {
    let d = (b - a).rem_euclid(TAU);
    if d > PI {
        d - TAU
    } else {
        d
    }
}

/// Unsigned angular separation of two bearings along the shorter way, in [0, π].
#[inline]
pub fn angle_difference(a: f64, b: f64) -> f64 {
    signed_angle_difference(a, b).abs()
}

/// Closest approach of a circle center to segment `ab`.
#[derive(Clone, Copy, Debug)]
pub struct SegmentApproach {
    /// Clamped projection parameter along `ab`, in [0, 1].
    pub u: f64,
    pub closest: Vector2<f64>,
    /// Distance from the center to `closest`.
    pub d: f64,
}

/// Project `c` onto segment `ab`, clamping to the endpoints.
///
/// A zero-length segment projects onto `a`.
pub fn segment_closest_approach(
    a: Vector2<f64>,
    b: Vector2<f64>,
    c: Vector2<f64>,
) -> SegmentApproach {
    let ab = b - a;
    let len2 = ab.norm_squared();
    let u = if len2 > 0.0 {
        ((c - a).dot(&ab) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let closest = a + ab * u;
    SegmentApproach {
        u,
        closest,
        d: (c - closest).norm(),
    }
}

/// Snap a coordinate onto the grid `1/scale`, rounding halves up.
///
/// Callers keep `v * scale` inside `i64`; see `GeomCfg::validate`.
#[inline]
pub fn quantize(v: f64, scale: f64) -> i64 {
    (v * scale + 0.5).floor() as i64
}
