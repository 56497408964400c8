//! Scene files in, path reports out.
//!
//! Inputs
//! - JSON: `{"circles": [{"x": .., "y": .., "r": ..}, ...]}` or a bare array.
//! - CSV (`*.csv`): columns `x`, `y`, `r`, read through polars.
//!
//! Outputs
//! - `PathReport` (JSON) and an optional CSV of path nodes.

use std::fs;
use std::path::Path as FsPath;

use anyhow::{bail, Context, Result};
use bitangent::visgraph::{Graph, Leg, Path};
use bitangent::Disk;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct DiskRecord {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

impl From<DiskRecord> for Disk {
    fn from(d: DiskRecord) -> Self {
        Disk::new(d.x, d.y, d.r)
    }
}

impl From<&Disk> for DiskRecord {
    fn from(d: &Disk) -> Self {
        Self {
            x: d.center.x,
            y: d.center.y,
            r: d.r,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum SceneFile {
    Wrapped { circles: Vec<DiskRecord> },
    Bare(Vec<DiskRecord>),
}

/// Load disks from a JSON or CSV scene file.
pub fn load_scene<P: AsRef<FsPath>>(path: P) -> Result<Vec<Disk>> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    let records = if is_csv {
        read_csv(path)?
    } else {
        let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        match serde_json::from_slice::<SceneFile>(&bytes)
            .with_context(|| format!("parsing scene {}", path.display()))?
        {
            SceneFile::Wrapped { circles } | SceneFile::Bare(circles) => circles,
        }
    };
    if records.is_empty() {
        bail!("scene {} has no circles", path.display());
    }
    Ok(records.into_iter().map(Disk::from).collect())
}

fn read_csv(path: &FsPath) -> Result<Vec<DiskRecord>> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()?
        .collect()
        .with_context(|| format!("reading csv {}", path.display()))?;
    let column = |name: &str| -> Result<Vec<f64>> {
        let s = df
            .column(name)
            .with_context(|| format!("column `{name}` missing"))?
            .cast(&DataType::Float64)?;
        s.f64()?
            .into_iter()
            .enumerate()
            .map(|(row, v)| v.with_context(|| format!("row {row}: `{name}` is null")))
            .collect()
    };
    let (xs, ys, rs) = (column("x")?, column("y")?, column("r")?);
    Ok(xs
        .into_iter()
        .zip(ys)
        .zip(rs)
        .map(|((x, y), r)| DiskRecord { x, y, r })
        .collect())
}

/// Write disks as a `{"circles": [...]}` scene file.
pub fn write_scene<P: AsRef<FsPath>>(path: P, disks: &[Disk]) -> Result<()> {
    let path = path.as_ref();
    let doc = SceneFile::Wrapped {
        circles: disks.iter().map(DiskRecord::from).collect(),
    };
    create_parent(path)?;
    fs::write(path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))
}

#[derive(Debug, Serialize)]
pub struct NodeRecord {
    pub x: f64,
    pub y: f64,
    pub circle_id: usize,
    /// Index of the owning disk in the input scene.
    pub source: usize,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LegRecord {
    Surf {
        from: [f64; 2],
        to: [f64; 2],
    },
    Hug {
        circle_id: usize,
        center: [f64; 2],
        r: f64,
        start_angle: f64,
        sweep: f64,
    },
}

impl From<&Leg> for LegRecord {
    fn from(leg: &Leg) -> Self {
        match *leg {
            Leg::Surf { from, to } => LegRecord::Surf {
                from: [from.x, from.y],
                to: [to.x, to.y],
            },
            Leg::Hug {
                circle,
                center,
                r,
                start_angle,
                sweep,
            } => LegRecord::Hug {
                circle_id: circle.0,
                center: [center.x, center.y],
                r,
                start_angle,
                sweep,
            },
        }
    }
}

/// Summary written by `run`/`demo`. `path` is `null` when the goal is unreachable.
#[derive(Debug, Serialize)]
pub struct PathReport {
    pub graph_nodes: usize,
    pub surfing_edges: usize,
    pub hugging_edges: usize,
    pub path: Option<Vec<NodeRecord>>,
    pub legs: Vec<LegRecord>,
    pub cost: Option<f64>,
    pub length: Option<f64>,
}

impl PathReport {
    pub fn new(g: &Graph, path: Option<&Path>) -> Self {
        let nodes = path.map(|p| {
            p.nodes
                .iter()
                .map(|n| NodeRecord {
                    x: n.x,
                    y: n.y,
                    circle_id: n.circle.0,
                    source: g.circle(n.circle).source,
                })
                .collect()
        });
        Self {
            graph_nodes: g.nodes.len(),
            surfing_edges: g.surfing.len(),
            hugging_edges: g.hugging.len(),
            path: nodes,
            legs: path
                .map(|p| p.legs.iter().map(LegRecord::from).collect())
                .unwrap_or_default(),
            cost: path.map(|p| p.cost),
            length: path.map(Path::length),
        }
    }

    pub fn write_json<P: AsRef<FsPath>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        create_parent(path)?;
        fs::write(path, serde_json::to_vec_pretty(self)?)
            .with_context(|| format!("writing {}", path.display()))
    }

    /// Path nodes as CSV (`x,y,circle_id,source`). No-op without a path.
    pub fn write_csv<P: AsRef<FsPath>>(&self, path: P) -> Result<()> {
        let Some(nodes) = &self.path else {
            return Ok(());
        };
        let path = path.as_ref();
        create_parent(path)?;
        let mut df = df!(
            "x" => nodes.iter().map(|n| n.x).collect::<Vec<f64>>(),
            "y" => nodes.iter().map(|n| n.y).collect::<Vec<f64>>(),
            "circle_id" => nodes.iter().map(|n| n.circle_id as u32).collect::<Vec<u32>>(),
            "source" => nodes.iter().map(|n| n.source as u32).collect::<Vec<u32>>()
        )?;
        let mut file =
            fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
        CsvWriter::new(&mut file).finish(&mut df)?;
        Ok(())
    }
}

pub fn create_parent(path: &FsPath) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating dir {}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitangent::api::{build_graph, find_path, prepare_circles, reference_scene, SearchCfg};
    use bitangent::GeomCfg;
    use tempfile::tempdir;

    #[test]
    fn json_scene_round_trips_both_layouts() {
        let dir = tempdir().unwrap();
        let wrapped = dir.path().join("wrapped.json");
        write_scene(&wrapped, &reference_scene()).unwrap();
        assert_eq!(load_scene(&wrapped).unwrap(), reference_scene());

        let bare = dir.path().join("bare.json");
        fs::write(&bare, r#"[{"x":0,"y":0,"r":0},{"x":10,"y":0,"r":0}]"#).unwrap();
        let disks = load_scene(&bare).unwrap();
        assert_eq!(disks, vec![Disk::point(0.0, 0.0), Disk::point(10.0, 0.0)]);
    }

    #[test]
    fn csv_scene_is_read_by_column_name() {
        let dir = tempdir().unwrap();
        let csv = dir.path().join("scene.csv");
        fs::write(&csv, "r,x,y\n5,50,40\n0,0,0\n0,100,0\n").unwrap();
        let disks = load_scene(&csv).unwrap();
        assert_eq!(
            disks,
            vec![
                Disk::new(50.0, 40.0, 5.0),
                Disk::point(0.0, 0.0),
                Disk::point(100.0, 0.0)
            ]
        );
    }

    #[test]
    fn empty_or_malformed_scenes_fail() {
        let dir = tempdir().unwrap();
        let empty = dir.path().join("empty.json");
        fs::write(&empty, "[]").unwrap();
        assert!(load_scene(&empty).is_err());
        let junk = dir.path().join("junk.json");
        fs::write(&junk, "{\"circles\": 3}").unwrap();
        assert!(load_scene(&junk).is_err());
    }

    #[test]
    fn report_maps_nodes_back_to_input_order() {
        let scene = reference_scene();
        let circles = prepare_circles(&scene).unwrap();
        let g = build_graph(&circles, GeomCfg::default()).unwrap();
        let path = find_path(&g, SearchCfg::default()).unwrap().unwrap();
        let report = PathReport::new(&g, Some(&path));
        let nodes = report.path.as_ref().unwrap();
        assert_eq!(nodes.first().unwrap().source, 6);
        assert_eq!(nodes.last().unwrap().source, 7);
        assert_eq!(report.legs.len(), nodes.len() - 1);

        let dir = tempdir().unwrap();
        let csv = dir.path().join("out/path.csv");
        report.write_csv(&csv).unwrap();
        let text = fs::read_to_string(&csv).unwrap();
        assert!(text.starts_with("x,y,circle_id,source"));
        assert_eq!(text.lines().count(), nodes.len() + 1);
    }
}
