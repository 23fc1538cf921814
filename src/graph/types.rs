//! Core types for the vertex graph.

use std::fmt;

/// A vertex identifier. Vertices carry no attributes; a vertex exists iff
/// it appears in at least one edge.
pub type Vertex = i64;

/// An undirected edge as read from the graph file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub u: Vertex,
    pub v: Vertex,
}

impl Edge {
    pub fn new(u: Vertex, v: Vertex) -> Self {
        Self { u, v }
    }
}

/// Summary counts for a loaded graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphStats {
    /// Distinct vertices that appear in at least one edge.
    pub vertex_count: usize,
    /// Edges read, including self-loops and parallel edges.
    pub edge_count: usize,
    /// Largest neighbor list length.
    pub max_degree: usize,
}

impl fmt::Display for GraphStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} vertices, {} edges (max degree {})",
            self.vertex_count, self.edge_count, self.max_degree
        )
    }
}
