//! TCP shortest-path server.
//!
//! One task per accepted connection; each handler reads one query, answers
//! it from the shared response cache or by running BFS over the shared
//! read-only graph, writes the response, and closes.

pub mod acceptor;
pub mod handler;
pub mod protocol;

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tracing::info;

use crate::cache::{CacheStats, ResponseCache};
use crate::config::ServerConfig;
use crate::error::Result;
use crate::graph::Graph;

pub use acceptor::{bind, serve};
pub use handler::{handle_connection, resolve, Resolution};
pub use protocol::{Query, INVALID_QUERY_RESPONSE, MAX_MESSAGE_LEN, NO_PATH_RESPONSE};

/// State shared by every connection handler.
#[derive(Debug)]
pub struct ServerState {
    /// Never mutated after startup, so no lock.
    graph: Arc<Graph>,
    cache: Mutex<ResponseCache>,
    read_timeout: Option<Duration>,
}

impl ServerState {
    pub fn new(graph: Graph, cache_capacity: usize, read_timeout: Option<Duration>) -> Self {
        Self {
            graph: Arc::new(graph),
            cache: Mutex::new(ResponseCache::new(cache_capacity)),
            read_timeout,
        }
    }

    pub fn from_config(graph: Graph, config: &ServerConfig) -> Self {
        Self::new(graph, config.cache_capacity, config.read_timeout)
    }

    pub fn graph(&self) -> &Arc<Graph> {
        &self.graph
    }

    /// Lock the response cache.
    ///
    /// A handler that panicked while holding the lock cannot leave the cache
    /// half-updated (every mutation completes before returning), so a
    /// poisoned lock is simply taken over.
    pub fn cache(&self) -> MutexGuard<'_, ResponseCache> {
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache().stats()
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout
    }
}

/// Load the graph, bind the listener, and serve forever.
///
/// An unreadable graph file is logged and served as an empty graph; a bind
/// failure is returned as a fatal error.
pub async fn run(config: ServerConfig) -> Result<()> {
    config.validate()?;

    let graph = Graph::load_or_empty(&config.graph_path);
    let state = Arc::new(ServerState::from_config(graph, &config));

    let addr = config.listen_addr();
    let listener = bind(&addr, config.backlog).await?;
    info!(
        addr = %listener.local_addr()?,
        backlog = config.backlog,
        cache_capacity = config.cache_capacity,
        "server listening"
    );

    serve(listener, state).await
}
