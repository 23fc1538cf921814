//! Per-connection request handling.
//!
//! `ACCEPTED -> READ -> (CACHE_HIT | BFS) -> WROTE -> CLOSED`. One request and
//! one response per connection; the stream is dropped when the handler
//! returns.

use std::io;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use super::protocol::{decode_request, Query, INVALID_QUERY_RESPONSE, MAX_MESSAGE_LEN};
use super::ServerState;
use crate::error::Result;

/// How a request was answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Served from the response cache.
    Cached(String),
    /// Computed by BFS; `key` still has to be inserted into the cache.
    Computed { key: String, response: String },
    /// Not a valid query. Never cached.
    Invalid,
}

impl Resolution {
    pub fn response(&self) -> &str {
        match self {
            Resolution::Cached(response) => response,
            Resolution::Computed { response, .. } => response,
            Resolution::Invalid => INVALID_QUERY_RESPONSE,
        }
    }
}

/// Serve a single connection: read one query, answer it, close.
///
/// Generic over the stream so tests can drive it with in-memory pipes.
pub async fn handle_connection<S>(mut stream: S, state: Arc<ServerState>) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut buf = [0u8; MAX_MESSAGE_LEN];
    let read = stream.read(&mut buf);
    let n = match state.read_timeout() {
        Some(limit) => match tokio::time::timeout(limit, read).await {
            Ok(result) => result?,
            Err(_) => {
                debug!(timeout = ?limit, "no request before read timeout, closing");
                return Ok(());
            }
        },
        None => read.await?,
    };

    if n == 0 {
        debug!("peer closed before sending a request");
        return Ok(());
    }

    let resolution = resolve(&state, &buf[..n]).await?;

    // Write failures just end the connection; a computed result is still
    // worth caching.
    if let Err(e) = write_response(&mut stream, resolution.response()).await {
        debug!(error = %e, "failed to write response");
    }

    // Insert before closing so a client that saw EOF also sees the entry.
    if let Resolution::Computed { key, response } = resolution {
        state.cache().insert(key, response);
    }

    if let Err(e) = stream.shutdown().await {
        debug!(error = %e, "failed to close connection");
    }

    Ok(())
}

/// Answer raw request bytes from the cache, or compute the path on a miss.
pub async fn resolve(state: &Arc<ServerState>, raw: &[u8]) -> Result<Resolution> {
    let key = match decode_request(raw) {
        Some(key) => key,
        None => {
            debug!(bytes = raw.len(), "request is not UTF-8");
            return Ok(Resolution::Invalid);
        }
    };

    // Malformed requests are rejected before the cache is consulted. The raw
    // text is still the cache key.
    let query = match Query::parse(key) {
        Ok(query) => query,
        Err(e) => {
            debug!(error = %e, "rejecting request");
            return Ok(Resolution::Invalid);
        }
    };

    // Lock is released at the end of this statement, before any await.
    let cached = state.cache().lookup(key);
    if let Some(response) = cached {
        debug!(query = %key, "cache hit");
        return Ok(Resolution::Cached(response));
    }

    debug!(query = %key, "cache miss, running BFS");
    let graph = Arc::clone(state.graph());
    let response = tokio::task::spawn_blocking(move || graph.shortest_path(query.src, query.dst))
        .await
        .map_err(io::Error::other)?;

    Ok(Resolution::Computed {
        key: key.to_string(),
        response,
    })
}

async fn write_response<S>(stream: &mut S, response: &str) -> io::Result<()>
where
    S: AsyncWrite + Unpin,
{
    stream.write_all(response.as_bytes()).await?;
    stream.flush().await
}
