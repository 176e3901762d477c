//! Dijkstra tests against a Bellman-Ford reference
//!
//! Random graphs are checked with proptest; fixed graphs cover grids, cycles
//! and graphs where decrease is exercised heavily.

use proptest::prelude::*;
use rank_pairing_queue::pathfinding::{dijkstra, Graph, ShortestPaths};
use rank_pairing_queue::RankPairingQueue;

type Queue = RankPairingQueue<usize, u64>;

/// Reference distances by relaxing every edge |V| - 1 times
fn bellman_ford(graph: &Graph<u64>, source: usize) -> Vec<Option<u64>> {
    let n = graph.vertex_count();
    let mut dist = vec![None; n];
    dist[source] = Some(0u64);
    for _ in 1..n.max(2) {
        let mut changed = false;
        for from in 0..n {
            let Some(d) = dist[from] else { continue };
            for &(to, cost) in graph.successors(from) {
                let candidate = d + cost;
                if dist[to].map_or(true, |current| candidate < current) {
                    dist[to] = Some(candidate);
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }
    dist
}

/// Checks that every reported path exists in the graph and sums to the distance
fn check_paths(graph: &Graph<u64>, paths: &ShortestPaths<u64>) {
    for target in 0..graph.vertex_count() {
        let Some(path) = paths.path_to(target) else {
            assert!(!paths.is_reachable(target));
            continue;
        };
        assert_eq!(path.first(), Some(&paths.source()));
        assert_eq!(path.last(), Some(&target));

        let mut total = 0u64;
        for hop in path.windows(2) {
            let cheapest = graph
                .successors(hop[0])
                .iter()
                .filter(|&&(to, _)| to == hop[1])
                .map(|&(_, cost)| cost)
                .min()
                .expect("path uses an edge that is not in the graph");
            total += cheapest;
        }
        assert_eq!(Some(total), paths.distance(target));
    }
}

fn grid(width: usize, height: usize) -> Graph<u64> {
    let mut graph = Graph::new(width * height);
    for y in 0..height {
        for x in 0..width {
            let v = y * width + x;
            // weights vary so that many shortest paths get improved later
            let w = ((x * 31 + y * 17) % 9 + 1) as u64;
            if x + 1 < width {
                graph.add_edge(v, v + 1, w);
                graph.add_edge(v + 1, v, w + 1);
            }
            if y + 1 < height {
                graph.add_edge(v, v + width, 10 - w);
                graph.add_edge(v + width, v, w);
            }
        }
    }
    graph
}

#[test]
fn test_grid_matches_reference() {
    let graph = grid(30, 30);
    let paths = dijkstra::<_, Queue>(&graph, 0);
    let reference = bellman_ford(&graph, 0);
    for v in 0..graph.vertex_count() {
        assert_eq!(paths.distance(v), reference[v], "vertex {}", v);
    }
    check_paths(&graph, &paths);
}

#[test]
fn test_decrease_heavy_graph() {
    // Vertex 0 reaches every other vertex directly at a high cost, then
    // cheaper routes through the chain 1 -> 2 -> ... improve them one by one.
    let n = 500;
    let mut graph = Graph::new(n);
    for v in 1..n {
        graph.add_edge(0, v, 1_000_000);
        if v + 1 < n {
            graph.add_edge(v, v + 1, 1);
        }
    }
    graph.add_edge(0, 1, 1);

    let paths = dijkstra::<_, Queue>(&graph, 0);
    for v in 1..n {
        assert_eq!(paths.distance(v), Some(v as u64));
    }
    assert_eq!(paths.path_to(4), Some(vec![0, 1, 2, 3, 4]));
}

#[test]
fn test_cycle_and_self_loop() {
    let mut graph = Graph::new(4);
    graph.add_edge(0, 1, 2);
    graph.add_edge(1, 2, 2);
    graph.add_edge(2, 0, 2);
    graph.add_edge(2, 2, 0);
    graph.add_edge(2, 3, 5);

    let paths = dijkstra::<_, Queue>(&graph, 1);
    assert_eq!(paths.distance(1), Some(0));
    assert_eq!(paths.distance(2), Some(2));
    assert_eq!(paths.distance(0), Some(4));
    assert_eq!(paths.distance(3), Some(7));
    check_paths(&graph, &paths);
}

#[test]
fn test_zero_cost_edges() {
    let mut graph = Graph::new(3);
    graph.add_edge(0, 1, 0);
    graph.add_edge(1, 2, 0);
    graph.add_edge(0, 2, 1);

    let paths = dijkstra::<_, Queue>(&graph, 0);
    assert_eq!(paths.distance(2), Some(0));
    assert_eq!(paths.path_to(2), Some(vec![0, 1, 2]));
}

#[test]
fn test_single_vertex() {
    let graph: Graph<u64> = Graph::new(1);
    let paths = dijkstra::<_, Queue>(&graph, 0);
    assert_eq!(paths.distance(0), Some(0));
    assert_eq!(paths.path_to(0), Some(vec![0]));
}

fn graph_strategy() -> impl Strategy<Value = Graph<u64>> {
    (1usize..40).prop_flat_map(|n| {
        prop::collection::vec((0..n, 0..n, 0u64..100), 0..(n * 4)).prop_map(move |edges| {
            let mut graph = Graph::new(n);
            for (from, to, cost) in edges {
                graph.add_edge(from, to, cost);
            }
            graph
        })
    })
}

proptest! {
    #[test]
    fn prop_dijkstra_matches_bellman_ford(graph in graph_strategy(), seed in any::<usize>()) {
        let source = seed % graph.vertex_count();
        let paths = dijkstra::<_, Queue>(&graph, source);
        let reference = bellman_ford(&graph, source);
        for v in 0..graph.vertex_count() {
            prop_assert_eq!(paths.distance(v), reference[v]);
        }
        check_paths(&graph, &paths);
    }
}
