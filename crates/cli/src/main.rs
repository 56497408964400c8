use anyhow::Result;
use bitangent::api::{build_graph, find_path, prepare_circles, reference_scene};
use bitangent::geom2::rand::{draw_scene, ReplayToken, SceneCfg};
use bitangent::visgraph::{Heuristic, SearchCfg};
use bitangent::{Disk, GeomCfg};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod scene;

use provenance::{write_sidecar, Payload};
use scene::{load_scene, write_scene, PathReport};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Shortest paths around disk obstacles")]
struct Cmd {
    /// Optional run tag; propagated to provenance sidecars and logs
    #[arg(long)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Solve a scene file (JSON or CSV) and write a path report
    Run {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Also write path nodes as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Solve the built-in six-obstacle reference scene
    Demo {
        #[arg(long)]
        out: PathBuf,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Draw a random scene and write it as JSON
    Sample {
        #[arg(long, default_value_t = 8)]
        disks: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        index: u64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Args, Clone, Copy, Debug)]
struct SearchArgs {
    /// Constant cost added per edge
    #[arg(long, default_value_t = 1.0)]
    hop_penalty: f64,
    /// Use A* with the straight-line heuristic
    #[arg(long)]
    astar: bool,
    /// Decimal places used to merge nearby tangent points
    #[arg(long, default_value_t = 2)]
    decimals: i32,
}

impl SearchArgs {
    fn cfgs(self) -> (GeomCfg, SearchCfg) {
        let heuristic = if self.astar {
            Heuristic::Euclidean
        } else {
            Heuristic::None
        };
        (
            GeomCfg {
                node_decimals: self.decimals,
            },
            SearchCfg {
                hop_penalty: self.hop_penalty,
                heuristic,
            },
        )
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Run {
            input,
            out,
            csv,
            search,
        } => {
            let disks = load_scene(&input)?;
            let params = serde_json::json!({
                "input": input,
                "csv": csv,
                "search": search_json(search),
            });
            solve(&disks, search, &out, csv.as_deref(), params, cmd.tag)
        }
        Action::Demo { out, search } => {
            let params = serde_json::json!({ "scene": "reference", "search": search_json(search) });
            solve(&reference_scene(), search, &out, None, params, cmd.tag)
        }
        Action::Sample {
            disks,
            seed,
            index,
            out,
        } => sample(disks, seed, index, &out, cmd.tag),
        Action::Report => report(cmd.tag),
    }
}

fn search_json(s: SearchArgs) -> serde_json::Value {
    serde_json::json!({
        "hop_penalty": s.hop_penalty,
        "astar": s.astar,
        "decimals": s.decimals,
    })
}

fn solve(
    disks: &[Disk],
    search: SearchArgs,
    out: &Path,
    csv: Option<&Path>,
    params: serde_json::Value,
    tag: Option<String>,
) -> Result<()> {
    let (cfg, scfg) = search.cfgs();
    tracing::info!(disks = disks.len(), astar = search.astar, tag = ?tag, "solve");
    let circles = prepare_circles(disks)?;
    let g = build_graph(&circles, cfg)?;
    let path = find_path(&g, scfg)?;
    match &path {
        Some(p) => tracing::info!(nodes = p.len(), cost = p.cost, length = p.length(), "path"),
        None => tracing::warn!("goal unreachable"),
    }
    let report = PathReport::new(&g, path.as_ref());
    report.write_json(out)?;
    if let Some(csv) = csv {
        report.write_csv(csv)?;
    }
    let mut payload = Payload::new(params)
        .with_tag(tag)
        .with_scene(disks)
        .with_path(path.as_ref());
    if let Some(csv) = csv {
        payload = payload.with_output(csv);
    }
    write_sidecar(out, payload)?;
    Ok(())
}

fn sample(disks: usize, seed: u64, index: u64, out: &Path, tag: Option<String>) -> Result<()> {
    tracing::info!(disks, seed, index, "sample");
    let cfg = SceneCfg {
        disks,
        ..SceneCfg::default()
    };
    let Some(scene) = draw_scene(cfg, ReplayToken { seed, index }) else {
        anyhow::bail!("could not place {disks} disks; try fewer");
    };
    write_scene(out, &scene)?;
    let params = serde_json::json!({ "disks": disks, "seed": seed, "index": index });
    write_sidecar(out, Payload::new(params).with_tag(tag).with_scene(&scene))?;
    Ok(())
}

fn report(tag: Option<String>) -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "bitangent_version": bitangent::VERSION,
        "tag": tag,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
