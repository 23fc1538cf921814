//! Error types for pathcache.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type used throughout the library.
pub type Result<T> = std::result::Result<T, PathError>;

/// Errors that can occur while loading the graph, configuring or running
/// the server, or querying it as a client.
#[derive(Error, Debug)]
pub enum PathError {
    /// The graph file could not be opened or read.
    #[error("Failed to load graph from {path}: {source}")]
    GraphLoad {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The listening socket could not be created, bound, or put in listen mode.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// Configuration values are out of range.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The configuration file is not valid TOML for our schema.
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A request that is not two whitespace-separated integers.
    #[error("Invalid query: {0:?}")]
    InvalidQuery(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
