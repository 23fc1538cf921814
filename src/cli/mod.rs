//! Command-line definitions shared by the server and client binaries.
//!
//! - `pathcache-server <graph-file> <port>`
//! - `pathcache-client <server-ip> <port> <vertex1> <vertex2>`

use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::config::{FileConfig, ServerConfig};
use crate::error::Result;
use crate::graph::Vertex;

#[derive(Parser, Debug)]
#[command(name = "pathcache-server")]
#[command(about = "Answer shortest-path queries over a static undirected graph", long_about = None)]
pub struct ServerCli {
    /// Edge file: whitespace-separated integer pairs `u v`
    pub graph_file: PathBuf,

    /// TCP port to listen on
    pub port: u16,

    /// Optional TOML config file ([server] section)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to bind (default: all interfaces)
    #[arg(long)]
    pub bind: Option<String>,

    /// Number of responses kept in the cache
    #[arg(long)]
    pub cache_capacity: Option<usize>,

    /// Close connections that send nothing within this many seconds
    #[arg(long)]
    pub read_timeout_secs: Option<u64>,
}

impl ServerCli {
    /// Resolve defaults, the config file, and flags (in that order).
    pub fn into_config(self) -> Result<ServerConfig> {
        let mut config = ServerConfig::new(self.graph_file, self.port);

        if let Some(path) = &self.config {
            config = config.with_file(&FileConfig::load(path)?);
        }
        if let Some(bind) = self.bind {
            config.bind_address = bind;
        }
        if let Some(capacity) = self.cache_capacity {
            config.cache_capacity = capacity;
        }
        if let Some(secs) = self.read_timeout_secs {
            config.read_timeout = Some(std::time::Duration::from_secs(secs));
        }

        config.validate()?;
        Ok(config)
    }
}

#[derive(Parser, Debug)]
#[command(name = "pathcache-client")]
#[command(about = "Ask a pathcache server for the shortest path between two vertices", long_about = None)]
pub struct ClientCli {
    /// Server IP address
    pub server_ip: IpAddr,

    /// Server port
    pub port: u16,

    /// Source vertex
    #[arg(allow_negative_numbers = true)]
    pub vertex1: Vertex,

    /// Destination vertex
    #[arg(allow_negative_numbers = true)]
    pub vertex2: Vertex,
}

/// Install the stderr tracing subscriber. `RUST_LOG` overrides `default`.
pub fn init_tracing(default: &str) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .init();
}
