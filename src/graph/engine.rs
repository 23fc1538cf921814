//! The graph store and the breadth-first shortest-path engine.
//!
//! The graph is built once and never mutated afterwards, so it can be shared
//! between connection handlers behind a plain `Arc` with no locking.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::trace;

use super::types::{Edge, GraphStats, Vertex};

/// Response sent when the destination cannot be reached from the source.
pub const NO_PATH_RESPONSE: &str = "No path between the vertex.";

/// Undirected graph stored as adjacency lists.
///
/// Neighbor lists keep the order in which edges were read. That order is
/// observable: BFS expands neighbors in list order, so among several shortest
/// paths the one through the earliest-inserted neighbor wins.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: HashMap<Vertex, Vec<Vertex>>,
    edge_count: usize,
}

impl Graph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from `(u, v)` pairs in read order.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (Vertex, Vertex)>,
    {
        let mut graph = Self::new();
        for (u, v) in edges {
            graph.add_edge(Edge::new(u, v));
        }
        graph
    }

    /// Append `v` to `u`'s neighbors and `u` to `v`'s neighbors.
    ///
    /// A self-loop lands twice in the vertex's own list, matching the
    /// "appears the same number of times on both sides" rule.
    fn add_edge(&mut self, edge: Edge) {
        self.adjacency.entry(edge.u).or_default().push(edge.v);
        self.adjacency.entry(edge.v).or_default().push(edge.u);
        self.edge_count += 1;
    }

    // ─── Queries ────────────────────────────────────────────────

    /// Neighbors of `u` in insertion order; empty for unknown vertices.
    pub fn neighbors(&self, u: Vertex) -> &[Vertex] {
        self.adjacency.get(&u).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, u: Vertex) -> bool {
        self.adjacency.contains_key(&u)
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Iterate over all vertices (arbitrary order).
    pub fn vertices(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.adjacency.keys().copied()
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            vertex_count: self.vertex_count(),
            edge_count: self.edge_count,
            max_degree: self.adjacency.values().map(Vec::len).max().unwrap_or(0),
        }
    }

    // ─── Shortest Path ──────────────────────────────────────────

    /// Find one shortest path (by edge count) from `src` to `dst`.
    ///
    /// Returns the vertex sequence including both endpoints, or `None` when
    /// `dst` is unreachable. `src == dst` yields `[src]` even when `src` is
    /// not in the graph.
    pub fn find_path(&self, src: Vertex, dst: Vertex) -> Option<Vec<Vertex>> {
        let mut visited: HashSet<Vertex> = HashSet::new();
        let mut parents: HashMap<Vertex, Vertex> = HashMap::new();
        let mut queue: VecDeque<Vertex> = VecDeque::new();

        visited.insert(src);
        queue.push_back(src);

        while let Some(current) = queue.pop_front() {
            // Checked on dequeue, before expansion, so src == dst terminates
            // immediately.
            if current == dst {
                let path = reconstruct(&parents, dst);
                trace!(src, dst, hops = path.len() - 1, visited = visited.len(), "path found");
                return Some(path);
            }

            for &neighbor in self.neighbors(current) {
                if visited.insert(neighbor) {
                    parents.insert(neighbor, current);
                    queue.push_back(neighbor);
                }
            }
        }

        trace!(src, dst, visited = visited.len(), "no path");
        None
    }

    /// Shortest path formatted for the wire: vertices joined by single
    /// spaces, or [`NO_PATH_RESPONSE`].
    pub fn shortest_path(&self, src: Vertex, dst: Vertex) -> String {
        match self.find_path(src, dst) {
            Some(path) => format_path(&path),
            None => NO_PATH_RESPONSE.to_string(),
        }
    }
}

/// Walk parent links back from `dst` to the root, then reverse.
fn reconstruct(parents: &HashMap<Vertex, Vertex>, dst: Vertex) -> Vec<Vertex> {
    let mut path = vec![dst];
    let mut v = dst;
    while let Some(&parent) = parents.get(&v) {
        path.push(parent);
        v = parent;
    }
    path.reverse();
    path
}

/// Format a vertex sequence as space-separated decimal integers.
pub fn format_path(path: &[Vertex]) -> String {
    path.iter()
        .map(Vertex::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_graph() -> Graph {
        Graph::from_edges([(1, 2), (2, 3), (3, 4)])
    }

    /// Small deterministic pseudo-random graph (LCG) for property checks.
    fn scrambled_graph(vertices: i64, edges: usize, seed: u64) -> Graph {
        let mut state = seed;
        let mut next = move || {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 33) as i64).rem_euclid(vertices)
        };
        let pairs: Vec<(i64, i64)> = (0..edges).map(|_| (next(), next())).collect();
        Graph::from_edges(pairs)
    }

    /// Reference BFS distance, independent of path reconstruction.
    fn bfs_distance(graph: &Graph, src: Vertex, dst: Vertex) -> Option<usize> {
        let mut dist: HashMap<Vertex, usize> = HashMap::new();
        let mut queue = VecDeque::new();
        dist.insert(src, 0);
        queue.push_back(src);
        while let Some(u) = queue.pop_front() {
            let d = dist[&u];
            if u == dst {
                return Some(d);
            }
            for &v in graph.neighbors(u) {
                dist.entry(v).or_insert_with(|| {
                    queue.push_back(v);
                    d + 1
                });
            }
        }
        None
    }

    #[test]
    fn test_empty_graph() {
        let graph = Graph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.stats(), GraphStats::default());
        assert!(graph.neighbors(1).is_empty());
    }

    #[test]
    fn test_neighbors_are_undirected_and_ordered() {
        let graph = Graph::from_edges([(1, 2), (1, 3), (2, 4), (3, 4)]);
        assert_eq!(graph.neighbors(1), &[2, 3]);
        assert_eq!(graph.neighbors(4), &[2, 3]);
        assert_eq!(graph.neighbors(2), &[1, 4]);
        assert_eq!(graph.neighbors(99), &[] as &[Vertex]);
    }

    #[test]
    fn test_self_loop_and_parallel_edges() {
        let graph = Graph::from_edges([(1, 1), (1, 2), (1, 2)]);
        assert_eq!(graph.neighbors(1), &[1, 1, 2, 2]);
        assert_eq!(graph.neighbors(2), &[1, 1]);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.shortest_path(1, 2), "1 2");
    }

    #[test]
    fn test_stats() {
        let graph = Graph::from_edges([(1, 2), (1, 3), (1, 4)]);
        let stats = graph.stats();
        assert_eq!(stats.vertex_count, 4);
        assert_eq!(stats.edge_count, 3);
        assert_eq!(stats.max_degree, 3);
        assert_eq!(stats.to_string(), "4 vertices, 3 edges (max degree 3)");
    }

    #[test]
    fn test_line_paths_both_directions() {
        let graph = line_graph();
        assert_eq!(graph.shortest_path(1, 4), "1 2 3 4");
        assert_eq!(graph.shortest_path(4, 1), "4 3 2 1");
    }

    #[test]
    fn test_same_vertex() {
        let graph = line_graph();
        assert_eq!(graph.shortest_path(2, 2), "2");
        // Unknown vertex to itself is still a one-vertex path.
        assert_eq!(graph.shortest_path(42, 42), "42");
        assert_eq!(graph.find_path(42, 42), Some(vec![42]));
    }

    #[test]
    fn test_unreachable() {
        let graph = Graph::from_edges([(1, 2), (3, 4)]);
        assert_eq!(graph.shortest_path(1, 4), NO_PATH_RESPONSE);
        assert_eq!(graph.find_path(1, 4), None);
    }

    #[test]
    fn test_unknown_source() {
        let graph = line_graph();
        assert_eq!(graph.shortest_path(9, 1), NO_PATH_RESPONSE);
        assert_eq!(graph.shortest_path(1, 9), NO_PATH_RESPONSE);
    }

    #[test]
    fn test_tie_break_follows_insertion_order() {
        let graph = Graph::from_edges([(1, 2), (1, 3), (2, 4), (3, 4)]);
        assert_eq!(graph.shortest_path(1, 4), "1 2 4");

        let graph = Graph::from_edges([(1, 3), (1, 2), (2, 4), (3, 4)]);
        assert_eq!(graph.shortest_path(1, 4), "1 3 4");
    }

    #[test]
    fn test_prefers_shorter_over_earlier() {
        // The long branch is inserted first but the direct edge is shorter.
        let graph = Graph::from_edges([(1, 2), (2, 3), (3, 4), (1, 4)]);
        assert_eq!(graph.shortest_path(1, 4), "1 4");
    }

    #[test]
    fn test_negative_vertices() {
        let graph = Graph::from_edges([(-1, 0), (0, 5)]);
        assert_eq!(graph.shortest_path(-1, 5), "-1 0 5");
    }

    #[test]
    fn test_cycle_terminates() {
        let graph = Graph::from_edges([(1, 2), (2, 3), (3, 1)]);
        assert_eq!(graph.shortest_path(1, 3), "1 3");
        assert_eq!(graph.shortest_path(1, 99), NO_PATH_RESPONSE);
    }

    #[test]
    fn test_adjacency_symmetry_property() {
        let graph = scrambled_graph(30, 80, 7);
        for u in graph.vertices() {
            for &v in graph.neighbors(u) {
                let forward = graph.neighbors(u).iter().filter(|&&x| x == v).count();
                let backward = graph.neighbors(v).iter().filter(|&&x| x == u).count();
                if u == v {
                    // Each self-loop contributes two entries to the same list.
                    assert_eq!(forward % 2, 0);
                } else {
                    assert_eq!(forward, backward, "asymmetric adjacency {u} <-> {v}");
                }
            }
        }
    }

    #[test]
    fn test_paths_are_valid_and_shortest() {
        for seed in 1..4 {
            let graph = scrambled_graph(25, 30, seed);
            for src in 0..25 {
                for dst in 0..25 {
                    let expected = bfs_distance(&graph, src, dst);
                    match graph.find_path(src, dst) {
                        Some(path) => {
                            assert_eq!(path.first(), Some(&src));
                            assert_eq!(path.last(), Some(&dst));
                            for pair in path.windows(2) {
                                assert!(
                                    graph.neighbors(pair[0]).contains(&pair[1]),
                                    "{} - {} is not an edge",
                                    pair[0],
                                    pair[1]
                                );
                            }
                            assert_eq!(Some(path.len() - 1), expected);
                        }
                        None => assert_eq!(expected, None),
                    }
                }
            }
        }
    }

    #[test]
    fn test_format_path() {
        assert_eq!(format_path(&[1]), "1");
        assert_eq!(format_path(&[1, -2, 30]), "1 -2 30");
        assert_eq!(format_path(&[]), "");
    }
}
