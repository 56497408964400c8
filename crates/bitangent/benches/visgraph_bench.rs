//! Criterion benchmarks for graph construction and search.
//! Focus sizes: disks in {4, 8, 16, 32}.
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p bitangent

use bitangent::geom2::rand::{draw_scene, ReplayToken, SceneCfg};
use bitangent::visgraph::{build_graph, find_path, prepare_circles, Heuristic, SearchCfg};
use bitangent::GeomCfg;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn scene(disks: usize, seed: u64) -> Vec<bitangent::Disk> {
    let cfg = SceneCfg {
        disks,
        r_min: 5.0,
        r_max: 25.0,
        width: 800.0,
        height: 600.0,
        ..SceneCfg::default()
    };
    draw_scene(cfg, ReplayToken { seed, index: 0 }).expect("scene fits")
}

fn bench_visgraph(c: &mut Criterion) {
    let mut group = c.benchmark_group("visgraph");
    for &n in &[4usize, 8, 16, 32] {
        let circles = prepare_circles(&scene(n, 17)).expect("valid scene");
        group.bench_with_input(BenchmarkId::new("build_graph", n), &circles, |b, circles| {
            b.iter(|| build_graph(circles, GeomCfg::default()).expect("default cfg"))
        });

        let g = build_graph(&circles, GeomCfg::default()).expect("default cfg");
        for (name, heuristic) in [("dijkstra", Heuristic::None), ("astar", Heuristic::Euclidean)] {
            let scfg = SearchCfg {
                heuristic,
                ..SearchCfg::default()
            };
            group.bench_with_input(BenchmarkId::new(name, n), &g, |b, g| {
                b.iter(|| {
                    let _res = find_path(g, scfg);
                })
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_visgraph);
criterion_main!(benches);
