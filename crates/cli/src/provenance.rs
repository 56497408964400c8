//! Provenance sidecars for CLI artifacts.
//!
//! Every artifact `foo.json` gets `foo.provenance.json` describing the code
//! revision, the query settings, the scene that was solved and what came out.

use anyhow::{Context, Result};
use bitangent::visgraph::Path as RoutePath;
use bitangent::Disk;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Shape of the obstacle field behind an artifact.
#[derive(Debug, Serialize, PartialEq)]
pub struct SceneSummary {
    pub disks: usize,
    /// Round obstacles (radius > 0).
    pub obstacles: usize,
    /// `[min_x, min_y, max_x, max_y]` over disk extents.
    pub bounds: [f64; 4],
    /// First and second zero-radius disks in input order.
    pub start: Option<[f64; 2]>,
    pub goal: Option<[f64; 2]>,
}

impl SceneSummary {
    pub fn of(disks: &[Disk]) -> Self {
        let mut bounds = [f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY];
        for d in disks {
            bounds[0] = bounds[0].min(d.center.x - d.r);
            bounds[1] = bounds[1].min(d.center.y - d.r);
            bounds[2] = bounds[2].max(d.center.x + d.r);
            bounds[3] = bounds[3].max(d.center.y + d.r);
        }
        let mut markers = disks
            .iter()
            .filter(|d| d.is_point())
            .map(|d| [d.center.x, d.center.y]);
        Self {
            disks: disks.len(),
            obstacles: disks.iter().filter(|d| !d.is_point()).count(),
            bounds,
            start: markers.next(),
            goal: markers.next(),
        }
    }
}

/// Outcome of a path query; `reached == false` carries no cost.
#[derive(Debug, Serialize, PartialEq)]
pub struct PathSummary {
    pub reached: bool,
    pub nodes: usize,
    pub cost: Option<f64>,
    pub length: Option<f64>,
}

impl PathSummary {
    pub fn of(path: Option<&RoutePath>) -> Self {
        Self {
            reached: path.is_some(),
            nodes: path.map_or(0, RoutePath::len),
            cost: path.map(|p| p.cost),
            length: path.map(RoutePath::length),
        }
    }
}

/// What produced an artifact.
#[derive(Debug, Default)]
pub struct Payload {
    pub params: Value,
    pub tag: Option<String>,
    pub scene: Option<SceneSummary>,
    pub path: Option<PathSummary>,
    /// Further files written alongside the primary artifact.
    pub also: Vec<PathBuf>,
}

impl Payload {
    pub fn new(params: Value) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    pub fn with_tag(mut self, tag: Option<String>) -> Self {
        self.tag = tag;
        self
    }

    pub fn with_scene(mut self, disks: &[Disk]) -> Self {
        self.scene = Some(SceneSummary::of(disks));
        self
    }

    pub fn with_path(mut self, path: Option<&RoutePath>) -> Self {
        self.path = Some(PathSummary::of(path));
        self
    }

    pub fn with_output(mut self, extra: &Path) -> Self {
        self.also.push(extra.to_path_buf());
        self
    }
}

#[derive(Serialize)]
struct Sidecar<'a> {
    code_rev: String,
    bitangent_version: &'static str,
    callsite: Callsite,
    tag: Option<&'a str>,
    params: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    scene: Option<&'a SceneSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a PathSummary>,
    outputs: Vec<String>,
}

#[derive(Serialize)]
struct Callsite {
    file: &'static str,
    line: u32,
}

/// Write `<artifact>.provenance.json` next to `artifact`.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let sidecar_path = provenance_path(artifact);
    crate::scene::create_parent(&sidecar_path)?;

    let caller = Location::caller();
    let outputs = std::iter::once(artifact)
        .chain(payload.also.iter().map(PathBuf::as_path))
        .map(|p| p.to_string_lossy().into_owned())
        .collect();
    let doc = Sidecar {
        code_rev: current_git_rev(),
        bitangent_version: bitangent::VERSION,
        callsite: Callsite {
            file: caller.file(),
            line: caller.line(),
        },
        tag: payload.tag.as_deref(),
        params: &payload.params,
        scene: payload.scene.as_ref(),
        path: payload.path.as_ref(),
        outputs,
    };
    fs::write(&sidecar_path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", sidecar_path.display()))?;
    Ok(sidecar_path)
}

fn provenance_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .map_or_else(|| "artifact".into(), |s| s.to_string_lossy().into_owned());
    artifact.with_file_name(format!("{stem}.provenance.json"))
}

/// Commit hash from the build env, the runtime env, or `git`, else `"unknown"`.
pub fn current_git_rev() -> String {
    let from_git = || {
        let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
        out.status
            .success()
            .then(|| String::from_utf8(out.stdout).ok())
            .flatten()
    };
    option_env!("GIT_COMMIT")
        .map(str::to_string)
        .filter(|s| !s.is_empty())
        .or_else(|| std::env::var("GIT_COMMIT").ok().filter(|s| !s.is_empty()))
        .or_else(from_git)
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitangent::api::{reference_scene, shortest_path};
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn provenance_path_replaces_extension() {
        let base = Path::new("/tmp/output/path.json");
        assert_eq!(
            provenance_path(base),
            Path::new("/tmp/output/path.provenance.json")
        );
    }

    #[test]
    fn scene_summary_counts_markers_and_bounds() {
        let s = SceneSummary::of(&reference_scene());
        assert_eq!(s.disks, 8);
        assert_eq!(s.obstacles, 6);
        assert_eq!(s.start, Some([30.0, 74.0]));
        assert_eq!(s.goal, Some([570.0, 280.0]));
        assert_eq!(s.bounds, [30.0, 44.0, 570.0, 283.0]);
    }

    #[test]
    fn write_sidecar_records_scene_path_and_outputs() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("path.json");
        let csv = dir.path().join("path.csv");
        fs::write(&artifact, "{}").unwrap();
        let scene = reference_scene();
        let path = shortest_path(&scene).unwrap();
        let payload = Payload::new(json!({"hop_penalty": 1.0}))
            .with_tag(Some("exp-7".to_string()))
            .with_scene(&scene)
            .with_path(path.as_ref())
            .with_output(&csv);
        let prov_path = write_sidecar(&artifact, payload).unwrap();
        let parsed: Value = serde_json::from_slice(&fs::read(prov_path).unwrap()).unwrap();
        assert_eq!(parsed["outputs"][0], artifact.to_string_lossy().as_ref());
        assert_eq!(parsed["outputs"][1], csv.to_string_lossy().as_ref());
        assert_eq!(parsed["tag"], "exp-7");
        assert_eq!(parsed["params"]["hop_penalty"], 1.0);
        assert_eq!(parsed["bitangent_version"], bitangent::VERSION);
        assert_eq!(parsed["scene"]["obstacles"], 6);
        assert_eq!(parsed["path"]["reached"], true);
        assert!(parsed["path"]["cost"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn sample_sidecar_omits_path_block() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("scene.json");
        let payload = Payload::new(json!({"seed": 3})).with_scene(&reference_scene());
        let prov_path = write_sidecar(&artifact, payload).unwrap();
        let parsed: Value = serde_json::from_slice(&fs::read(prov_path).unwrap()).unwrap();
        assert!(parsed.get("path").is_none());
        assert!(parsed["tag"].is_null());
        assert_eq!(parsed["scene"]["disks"], 8);
    }
}
