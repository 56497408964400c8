//! Bitangent points between two circles.
//!
//! For circles A and B with centers at distance `P` and bearing `AB` (B seen
//! from A), each family has a half-angle `theta` and four tangent points:
//!
//! | family   | `cos(theta)`     | on A (`c`, `d`)  | on B (`e`, `f`)           |
//! |----------|------------------|------------------|---------------------------|
//! | internal | `(rA + rB) / P`  | `AB ∓ theta`     | `BA ± theta` (`BA = AB+π`) |
//! | external | `(rA − rB) / P`  | `AB ∓ theta`     | `AB ± theta`              |
//!
//! The segments `c–f` ("outer") and `d–e` ("inner") are the two tangent lines
//! of each family. A `cos(theta)` outside [−1, 1] means the family does not
//! exist for this pair and the solver returns `None`.

use nalgebra::Vector2;

use super::types::Circle;
use super::util::{direction_step, facing};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitangentKind {
    Internal,
    External,
}

/// Four tangent points of one bitangent family (`c`, `d` on A; `e`, `f` on B).
#[derive(Clone, Copy, Debug)]
pub struct Bitangents {
    pub kind: BitangentKind,
    pub theta: f64,
    pub c: Vector2<f64>,
    pub d: Vector2<f64>,
    pub e: Vector2<f64>,
    pub f: Vector2<f64>,
}

impl Bitangents {
    /// Tangent line `c–f`.
    #[inline]
    pub fn outer(&self) -> (Vector2<f64>, Vector2<f64>) {
        (self.c, self.f)
    }
    /// Tangent line `d–e`.
    #[inline]
    pub fn inner(&self) -> (Vector2<f64>, Vector2<f64>) {
        (self.d, self.e)
    }
    #[inline]
    pub fn points(&self) -> [Vector2<f64>; 4] {
        [self.c, self.d, self.e, self.f]
    }
}

#[inline]
fn half_angle(a: &Circle, b: &Circle, radius_term: f64) -> Option<f64> {
    let cos_angle = radius_term / (b.center - a.center).norm();
    // NaN (coincident points) fails the range check as well.
    if (-1.0..=1.0).contains(&cos_angle) {
        Some(cos_angle.acos())
    } else {
        None
    }
}

/// Tangent lines that cross between A and B.
pub fn internal_bitangents(a: &Circle, b: &Circle) -> Option<Bitangents> {
    let theta = half_angle(a, b, a.r + b.r)?;
    let ab = facing(a.center, b.center);
    let ba = facing(b.center, a.center);
    Some(Bitangents {
        kind: BitangentKind::Internal,
        theta,
        c: direction_step(a.center, a.r, ab - theta),
        d: direction_step(a.center, a.r, ab + theta),
        e: direction_step(b.center, b.r, ba + theta),
        f: direction_step(b.center, b.r, ba - theta),
    })
}

/// Tangent lines that keep A and B on the same side.
///
/// Both ends use the A→B bearing; the angle convention differs from the
/// internal family on purpose.
pub fn external_bitangents(a: &Circle, b: &Circle) -> Option<Bitangents> {
    let theta = half_angle(a, b, a.r - b.r)?;
    let ab = facing(a.center, b.center);
    Some(Bitangents {
        kind: BitangentKind::External,
        theta,
        c: direction_step(a.center, a.r, ab - theta),
        d: direction_step(a.center, a.r, ab + theta),
        e: direction_step(b.center, b.r, ab + theta),
        f: direction_step(b.center, b.r, ab - theta),
    })
}

/// Candidate tangent segment from a point on A (`p`) to a point on B (`q`).
#[derive(Clone, Copy, Debug)]
pub struct Candidate {
    pub kind: BitangentKind,
    pub p: Vector2<f64>,
    pub q: Vector2<f64>,
}

/// Tangent segments worth testing for the pair (A, B).
///
/// Zero-radius circles collapse some tangent lines onto others, so:
/// - internal `c–f` is always tried;
/// - internal `d–e` only if both radii are nonzero;
/// - external `c–f` if at least one radius is nonzero;
/// - external `d–e` only if both radii are nonzero.
///
/// Callers pass the smaller circle as A (the later one in the descending-radius
/// order); with a point A the internal and external `c–f` lines are then the
/// two tangents from the point to B.
pub fn candidate_segments(a: &Circle, b: &Circle) -> Vec<Candidate> {
    let both_round = !a.is_point() && !b.is_point();
    let any_round = !a.is_point() || !b.is_point();
    let mut out = Vec::with_capacity(4);
    if let Some(int) = internal_bitangents(a, b) {
        let (p, q) = int.outer();
        out.push(Candidate { kind: int.kind, p, q });
        if both_round {
            let (p, q) = int.inner();
            out.push(Candidate { kind: int.kind, p, q });
        }
    }
    if let Some(ext) = external_bitangents(a, b) {
        if any_round {
            let (p, q) = ext.outer();
            out.push(Candidate { kind: ext.kind, p, q });
        }
        if both_round {
            let (p, q) = ext.inner();
            out.push(Candidate { kind: ext.kind, p, q });
        }
    }
    out
}
