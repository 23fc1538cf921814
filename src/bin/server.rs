//! pathcache server — shortest-path queries over TCP.
//!
//! Usage:
//!   pathcache-server <graph-file> <port> [--config FILE] [--bind ADDR]
//!                    [--cache-capacity N] [--read-timeout-secs S]
//!
//! Loads the graph once, then answers one query per connection until killed.
//! Logs go to stderr; set `RUST_LOG` to change the level.

use anyhow::Result;
use clap::Parser;
use pathcache::cli::{init_tracing, ServerCli};
use tracing::info;

fn main() {
    init_tracing("info");
    let cli = ServerCli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: ServerCli) -> Result<()> {
    let config = cli.into_config()?;
    info!(graph = %config.graph_path.display(), port = config.port, "pathcache server starting");

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(pathcache::server::run(config))?;
    Ok(())
}
