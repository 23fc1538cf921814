//! Thin client: one connection, one query, one response.

use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

use crate::error::Result;
use crate::graph::Vertex;
use crate::server::protocol::Query;

/// Upper bound on how much of a response the client will buffer.
pub const MAX_RESPONSE_LEN: u64 = 64 * 1024;

/// Ask the server at `addr` for a shortest path from `src` to `dst`.
///
/// Reads until the server closes the connection, so long paths are not
/// truncated at the request size limit.
pub async fn query(addr: SocketAddr, src: Vertex, dst: Vertex) -> Result<String> {
    let mut stream = TcpStream::connect(addr).await?;
    debug!(%addr, "connected");

    let request = Query::new(src, dst).to_wire();
    stream.write_all(request.as_bytes()).await?;
    stream.shutdown().await?;

    let mut response = Vec::new();
    stream
        .take(MAX_RESPONSE_LEN)
        .read_to_end(&mut response)
        .await?;
    debug!(bytes = response.len(), "received response");

    Ok(String::from_utf8_lossy(&response).into_owned())
}
