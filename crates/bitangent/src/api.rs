//! Curated entry points.
//!
//! - `shortest_path`: disks in, ordered path out (defaults for node precision
//!   and cost model).
//! - `shortest_path_with`: same with explicit `GeomCfg` / `SearchCfg`.
//! - `reference_scene`: the six-obstacle demo field used in tests and the CLI.

pub use crate::geom2::{Circle, CircleId, Disk, GeomCfg};
pub use crate::visgraph::{
    build_graph, edge_cost, find_path, prepare_circles, solve as shortest_path_with,
    solve_with_defaults as shortest_path, Graph, Heuristic, Leg, Path, PathNode, SearchCfg,
};

/// Six round obstacles followed by the start (30, 74) and goal (570, 280) markers.
pub fn reference_scene() -> Vec<Disk> {
    vec![
        Disk::new(113.0, 99.0, 55.0),
        Disk::new(497.0, 243.0, 40.0),
        Disk::new(379.0, 237.0, 40.0),
        Disk::new(330.0, 113.0, 35.0),
        Disk::new(179.0, 190.0, 30.0),
        Disk::new(278.0, 233.0, 30.0),
        Disk::point(30.0, 74.0),
        Disk::point(570.0, 280.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_scene_has_a_path_between_markers() {
        let path = shortest_path(&reference_scene())
            .expect("well-formed scene")
            .expect("goal reachable");
        assert!(path.len() >= 2);
        let first = path.nodes.first().unwrap();
        let last = path.nodes.last().unwrap();
        // Eight circles: start and goal get ids 6 and 7 after sorting.
        assert_eq!(first.circle, CircleId(6));
        assert_eq!(last.circle, CircleId(7));
        assert_eq!((first.x, first.y), (30.0, 74.0));
        assert_eq!((last.x, last.y), (570.0, 280.0));
        // The straight line is blocked, so the path is longer than the chord.
        let chord = ((570.0f64 - 30.0).powi(2) + (280.0f64 - 74.0).powi(2)).sqrt();
        assert!(path.length() > chord);
        assert!(path.cost >= path.length() + (path.len() - 1) as f64 - 1e-6);
    }

    #[test]
    fn astar_matches_dijkstra_on_reference_scene() {
        let scene = reference_scene();
        let dijkstra = shortest_path(&scene).unwrap().unwrap();
        let astar = shortest_path_with(
            &scene,
            GeomCfg::default(),
            SearchCfg {
                heuristic: Heuristic::Euclidean,
                ..SearchCfg::default()
            },
        )
        .unwrap()
        .unwrap();
        assert!((dijkstra.cost - astar.cost).abs() < 1e-9);
    }
}
