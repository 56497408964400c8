//! Random disk scenes (rejection sampling + replay tokens).
//!
//! Purpose
//! - Provide a small, deterministic sampler of obstacle fields for property
//!   tests, benchmarks and CLI experiments.
//!
//! Model
//! - Disks with radius in `[r_min, r_max]` are dropped uniformly into the
//!   rectangle `[0, width] × [0, height]` and rejected if they come within
//!   `gap` of an earlier disk. Start and goal markers are then placed outside
//!   every disk (again with `gap` clearance), start first.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::Disk;

/// Scene sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct SceneCfg {
    /// Number of round obstacles (start and goal come on top).
    pub disks: usize,
    pub r_min: f64,
    pub r_max: f64,
    pub width: f64,
    pub height: f64,
    /// Minimum clearance between any two obstacles or markers.
    pub gap: f64,
    /// Rejection-sampling budget per placed item.
    pub max_attempts: usize,
}

impl Default for SceneCfg {
    fn default() -> Self {
        Self {
            disks: 8,
            r_min: 10.0,
            r_max: 50.0,
            width: 600.0,
            height: 400.0,
            gap: 2.0,
            max_attempts: 500,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer over seed and index.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a scene: `cfg.disks` round obstacles followed by start and goal markers.
///
/// Returns `None` if the rectangle is too crowded to place everything within
/// the attempt budget.
pub fn draw_scene(cfg: SceneCfg, tok: ReplayToken) -> Option<Vec<Disk>> {
    let mut rng = tok.to_std_rng();
    let r_lo = cfg.r_min.max(1e-6);
    let r_hi = cfg.r_max.max(r_lo);
    let mut out: Vec<Disk> = Vec::with_capacity(cfg.disks + 2);
    for _ in 0..cfg.disks {
        let r = if r_hi > r_lo {
            rng.gen_range(r_lo..r_hi)
        } else {
            r_lo
        };
        let d = place(&mut rng, &out, r, cfg)?;
        out.push(d);
    }
    for _ in 0..2 {
        let d = place(&mut rng, &out, 0.0, cfg)?;
        out.push(d);
    }
    Some(out)
}

fn place(rng: &mut StdRng, placed: &[Disk], r: f64, cfg: SceneCfg) -> Option<Disk> {
    let (w, h) = (cfg.width.max(0.0), cfg.height.max(0.0));
    if 2.0 * r > w || 2.0 * r > h {
        return None;
    }
    for _ in 0..cfg.max_attempts.max(1) {
        let center = Vector2::new(rng.gen_range(r..=w - r), rng.gen_range(r..=h - r));
        let clear = placed
            .iter()
            .all(|o| (o.center - center).norm() > o.r + r + cfg.gap);
        if clear {
            return Some(Disk { center, r });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reproducible_draw() {
        let tok = ReplayToken { seed: 42, index: 7 };
        let s1 = draw_scene(SceneCfg::default(), tok).expect("scene");
        let s2 = draw_scene(SceneCfg::default(), tok).expect("scene");
        assert_eq!(s1, s2);
        let other = draw_scene(SceneCfg::default(), ReplayToken { seed: 42, index: 8 }).unwrap();
        assert_ne!(s1, other);
    }

    #[test]
    fn markers_last_and_everything_separated() {
        let cfg = SceneCfg::default();
        let s = draw_scene(cfg, ReplayToken { seed: 3, index: 0 }).unwrap();
        assert_eq!(s.len(), cfg.disks + 2);
        assert!(s[..cfg.disks].iter().all(|d| d.r >= cfg.r_min && d.r <= cfg.r_max));
        assert!(s[cfg.disks..].iter().all(Disk::is_point));
        for i in 0..s.len() {
            for j in 0..i {
                let gap = (s[i].center - s[j].center).norm() - s[i].r - s[j].r;
                assert!(gap > cfg.gap);
            }
        }
    }

    #[test]
    fn crowded_rectangle_gives_up() {
        let cfg = SceneCfg {
            disks: 50,
            r_min: 40.0,
            r_max: 45.0,
            width: 100.0,
            height: 100.0,
            gap: 1.0,
            max_attempts: 50,
        };
        assert!(draw_scene(cfg, ReplayToken { seed: 1, index: 1 }).is_none());
    }
}
