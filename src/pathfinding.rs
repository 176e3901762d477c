//! Dijkstra's shortest paths on top of a keyed priority queue
//!
//! Vertices are dense `usize` ids, which makes them directly usable as queue
//! keys. Each vertex is pushed once when it is first reached and afterwards
//! only moves through [`decrease`](KeyedPriorityQueue::decrease), which is the
//! workload rank-pairing heaps are built for.
//!
//! # Example
//!
//! ```rust
//! use rank_pairing_queue::pathfinding::{dijkstra, Graph};
//! use rank_pairing_queue::RankPairingQueue;
//!
//! let mut graph = Graph::new(4);
//! graph.add_edge(0, 1, 4u32);
//! graph.add_edge(0, 2, 1);
//! graph.add_edge(2, 1, 2);
//! graph.add_edge(1, 3, 5);
//!
//! let paths = dijkstra::<_, RankPairingQueue<_, _>>(&graph, 0);
//! assert_eq!(paths.distance(3), Some(8));
//! assert_eq!(paths.path_to(3), Some(vec![0, 2, 1, 3]));
//! ```

use crate::traits::KeyedPriorityQueue;
use log::trace;
use std::ops::Add;

/// Trait for types that can be used as edge costs.
///
/// This requires the type to be orderable, copyable, and support addition.
/// `Default` supplies the zero distance of the source vertex.
pub trait Cost: Ord + Copy + Add<Output = Self> + Default {}

impl<T> Cost for T where T: Ord + Copy + Add<Output = Self> + Default {}

/// Directed graph stored as adjacency lists.
#[derive(Debug, Clone)]
pub struct Graph<C> {
    adjacency: Vec<Vec<(usize, C)>>,
}

impl<C: Cost> Graph<C> {
    /// Creates a graph with `vertices` vertices and no edges.
    pub fn new(vertices: usize) -> Self {
        Graph {
            adjacency: vec![Vec::new(); vertices],
        }
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Adds a directed edge `from -> to`.
    ///
    /// Costs must be non-negative (not below `C::default()`) for
    /// [`dijkstra`] to return shortest paths.
    ///
    /// # Panics
    /// Panics if either endpoint is not a vertex of the graph.
    pub fn add_edge(&mut self, from: usize, to: usize, cost: C) {
        assert!(
            to < self.adjacency.len(),
            "edge target {} out of bounds for {} vertices",
            to,
            self.adjacency.len()
        );
        self.adjacency[from].push((to, cost));
    }

    /// Outgoing edges of `vertex` as `(target, cost)` pairs.
    pub fn successors(&self, vertex: usize) -> &[(usize, C)] {
        &self.adjacency[vertex]
    }
}

/// Single-source shortest path tree returned by [`dijkstra`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPaths<C> {
    source: usize,
    distances: Vec<Option<C>>,
    predecessors: Vec<Option<usize>>,
}

impl<C: Cost> ShortestPaths<C> {
    /// The vertex the search started from.
    pub fn source(&self) -> usize {
        self.source
    }

    /// Shortest distance from the source, or `None` if `vertex` is
    /// unreachable or out of bounds.
    pub fn distance(&self, vertex: usize) -> Option<C> {
        self.distances.get(vertex).copied().flatten()
    }

    /// Returns true if `vertex` can be reached from the source.
    pub fn is_reachable(&self, vertex: usize) -> bool {
        self.distance(vertex).is_some()
    }

    /// Vertices on a shortest path from the source to `vertex`, both ends
    /// included, or `None` if `vertex` is unreachable.
    pub fn path_to(&self, vertex: usize) -> Option<Vec<usize>> {
        self.distance(vertex)?;
        let mut path = vec![vertex];
        let mut current = vertex;
        while let Some(previous) = self.predecessors[current] {
            path.push(previous);
            current = previous;
        }
        path.reverse();
        Some(path)
    }
}

/// Computes shortest paths from `source` to every vertex of `graph`.
///
/// `Q` is the priority queue that drives the search. Every vertex is pushed
/// at most once and improved in place with `decrease`, so the queue never
/// holds stale entries.
///
/// # Panics
/// Panics if `source` is not a vertex of the graph.
///
/// # Time Complexity
/// O(E + V log V) with a queue offering O(1) amortized decrease, such as
/// [`RankPairingQueue`](crate::RankPairingQueue).
pub fn dijkstra<C, Q>(graph: &Graph<C>, source: usize) -> ShortestPaths<C>
where
    C: Cost,
    Q: KeyedPriorityQueue<usize, C>,
{
    let vertices = graph.vertex_count();
    assert!(
        source < vertices,
        "source {} out of bounds for {} vertices",
        source,
        vertices
    );

    let mut distances: Vec<Option<C>> = vec![None; vertices];
    let mut predecessors: Vec<Option<usize>> = vec![None; vertices];
    let mut settled = vec![false; vertices];
    let mut queue = Q::new();

    distances[source] = Some(C::default());
    queue.push(source, C::default());

    let mut decreases = 0usize;
    while let Some((vertex, distance)) = queue.pop() {
        settled[vertex] = true;
        for &(next, cost) in graph.successors(vertex) {
            if settled[next] {
                continue;
            }
            let candidate = distance + cost;
            match distances[next] {
                None => {
                    queue.push(next, candidate);
                }
                Some(known) if candidate < known => {
                    queue.decrease(&next, candidate);
                    decreases += 1;
                }
                Some(_) => continue,
            }
            distances[next] = Some(candidate);
            predecessors[next] = Some(vertex);
        }
    }

    trace!(
        "dijkstra from {} settled {} of {} vertices with {} decreases",
        source,
        settled.iter().filter(|&&done| done).count(),
        vertices,
        decreases
    );

    ShortestPaths {
        source,
        distances,
        predecessors,
    }
}
