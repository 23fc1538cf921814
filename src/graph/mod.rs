//! Graph module — the in-memory vertex graph and its BFS engine.
//!
//! Provides the data model, the edge-file loader, and the shortest-path
//! search used to answer queries.

pub mod builder;
pub mod engine;
pub mod types;

pub use builder::parse_edges;
pub use engine::{format_path, Graph, NO_PATH_RESPONSE};
pub use types::{Edge, GraphStats, Vertex};
