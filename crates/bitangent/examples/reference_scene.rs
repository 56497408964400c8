//! Shortest path through the six-obstacle reference scene.
//!
//! Prints the path nodes and legs, and compares Dijkstra with A* timings.
//!
//! Run: `cargo run -p bitangent --example reference_scene`

use std::time::Instant;

use bitangent::api::{reference_scene, shortest_path_with, Heuristic, Leg, SearchCfg};
use bitangent::GeomCfg;

fn main() {
    let scene = reference_scene();
    for (label, heuristic) in [("dijkstra", Heuristic::None), ("astar", Heuristic::Euclidean)] {
        let scfg = SearchCfg {
            heuristic,
            ..SearchCfg::default()
        };
        let t0 = Instant::now();
        let path = shortest_path_with(&scene, GeomCfg::default(), scfg)
            .expect("reference scene is well-formed")
            .expect("goal reachable");
        let ms = t0.elapsed().as_secs_f64() * 1e3;
        println!(
            "{label}: {} nodes, cost {:.3}, length {:.3} ({ms:.3} ms)",
            path.len(),
            path.cost,
            path.length()
        );
        if heuristic == Heuristic::None {
            for n in &path.nodes {
                println!("  node ({:.2}, {:.2}) on circle {}", n.x, n.y, n.circle.0);
            }
            for leg in &path.legs {
                match leg {
                    Leg::Surf { from, to } => println!(
                        "  surf ({:.2}, {:.2}) -> ({:.2}, {:.2})",
                        from.x, from.y, to.x, to.y
                    ),
                    Leg::Hug { circle, sweep, r, .. } => {
                        println!("  hug circle {} sweep {:.3} rad (r = {r})", circle.0, sweep)
                    }
                }
            }
        }
    }
}
