//! # pathcache
//!
//! Shortest-path queries over a static undirected graph, served over TCP.
//!
//! The server loads a graph of integer vertices from an edge file once at
//! startup, then answers each connection with one shortest path (by edge
//! count) between two vertices. Recent answers are kept in a small FIFO
//! cache keyed by the raw request text.
//!
//! ## Key Pieces
//!
//! - **Graph**: adjacency lists in edge-read order, immutable after load
//! - **BFS**: ties between equal-length paths go to the earliest-read neighbor
//! - **Cache**: bounded, evicts the oldest insertion, shared behind one mutex
//! - **Server**: one task per connection, one request and one response each
//!
//! ## Quick Start
//!
//! ```rust
//! use pathcache::{Graph, NO_PATH_RESPONSE};
//!
//! let graph = Graph::from_edges([(1, 2), (2, 3), (3, 4)]);
//! assert_eq!(graph.shortest_path(1, 4), "1 2 3 4");
//! assert_eq!(graph.shortest_path(1, 9), NO_PATH_RESPONSE);
//! ```

pub mod cache;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod graph;
pub mod server;

// Re-exports for convenience
pub use error::{PathError, Result};

pub use cache::{CacheStats, ResponseCache, DEFAULT_CAPACITY};
pub use config::{FileConfig, ServerConfig};
pub use graph::{parse_edges, Edge, Graph, GraphStats, Vertex, NO_PATH_RESPONSE};
pub use server::{ServerState, INVALID_QUERY_RESPONSE, MAX_MESSAGE_LEN};
