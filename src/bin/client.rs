//! pathcache client — sends one query and prints the answer.
//!
//! Usage:
//!   pathcache-client <server-ip> <port> <vertex1> <vertex2>

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use pathcache::cli::{init_tracing, ClientCli};

#[tokio::main]
async fn main() {
    init_tracing("warn");
    let cli = ClientCli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: ClientCli) -> Result<()> {
    let addr = SocketAddr::new(cli.server_ip, cli.port);
    let response = pathcache::client::query(addr, cli.vertex1, cli.vertex2)
        .await
        .with_context(|| format!("query to {} failed", addr))?;

    println!("{}", response);
    Ok(())
}
