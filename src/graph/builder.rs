//! Graph builder — reads the edge file and assembles the adjacency lists.
//!
//! The file format is whitespace-separated decimal integers read as `u v`
//! pairs. Numbers are scanned one at a time as an optional sign plus digits,
//! so `4#` yields `4` and the next scan stops at `#`. Parsing is permissive:
//! it stops quietly at the first position that does not start an integer,
//! and a dangling odd number at the end is ignored.

use std::fs;
use std::path::Path;

use tracing::{debug, error, info};

use super::engine::Graph;
use super::types::{Edge, Vertex};
use crate::error::{PathError, Result};

/// Parse edge pairs out of `text`, stopping at the first unparseable input.
pub fn parse_edges(text: &str) -> Vec<Edge> {
    let mut edges = Vec::new();
    let mut numbers = VertexScanner::new(text);

    loop {
        let Some(u) = numbers.next() else { break };
        let Some(v) = numbers.next() else { break };
        edges.push(Edge::new(u, v));
    }

    edges
}

/// Reads integers from the front of the input, skipping leading whitespace.
///
/// Once a scan fails (no digits, or a value out of range) the scanner is
/// exhausted.
struct VertexScanner<'a> {
    rest: &'a str,
}

impl<'a> VertexScanner<'a> {
    fn new(text: &'a str) -> Self {
        Self { rest: text }
    }
}

impl Iterator for VertexScanner<'_> {
    type Item = Vertex;

    fn next(&mut self) -> Option<Vertex> {
        let s = self.rest.trim_start_matches(|c: char| c.is_ascii_whitespace());
        let bytes = s.as_bytes();
        let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
        let digits = bytes[sign..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();

        let (number, rest) = s.split_at(sign + digits);
        match number.parse() {
            Ok(value) if digits > 0 => {
                self.rest = rest;
                Some(value)
            }
            _ => {
                self.rest = "";
                None
            }
        }
    }
}

impl Graph {
    /// Load a graph from an edge file.
    ///
    /// Fails only if the file cannot be read; malformed content just ends
    /// the edge list early.
    pub fn load(path: &Path) -> Result<Graph> {
        let bytes = fs::read(path).map_err(|source| PathError::GraphLoad {
            path: path.to_path_buf(),
            source,
        })?;
        // Invalid UTF-8 becomes U+FFFD, which fails to parse and ends the list
        // at the same point a numeric extractor would stop.
        let text = String::from_utf8_lossy(&bytes);
        let edges = parse_edges(&text);
        debug!(path = %path.display(), edges = edges.len(), "parsed edge file");

        Ok(Graph::from_edges(edges.iter().map(|e| (e.u, e.v))))
    }

    /// Load a graph, falling back to the empty graph if the file is unreadable.
    ///
    /// The server keeps running with an empty graph in that case; every query
    /// except `v v` then answers with the no-path sentinel.
    pub fn load_or_empty(path: &Path) -> Graph {
        match Graph::load(path) {
            Ok(graph) => {
                info!(path = %path.display(), stats = %graph.stats(), "graph loaded");
                graph
            }
            Err(e) => {
                error!(error = %e, "couldn't open graph file, serving an empty graph");
                Graph::new()
            }
        }
    }
}
