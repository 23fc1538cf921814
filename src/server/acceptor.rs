//! Listening socket and accept loop.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::{lookup_host, TcpListener, TcpSocket};
use tracing::{debug, warn};

use super::handler::handle_connection;
use super::ServerState;
use crate::error::{PathError, Result};

/// Pause after a failed accept so fd exhaustion doesn't turn into a hot loop.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(50);

/// Bind a TCP listener on `addr` with the given listen backlog.
pub async fn bind(addr: &str, backlog: u32) -> Result<TcpListener> {
    let bind_err = |source: io::Error| PathError::Bind {
        addr: addr.to_string(),
        source,
    };

    let socket_addr = lookup_host(addr)
        .await
        .map_err(bind_err)?
        .next()
        .ok_or_else(|| {
            bind_err(io::Error::new(
                io::ErrorKind::AddrNotAvailable,
                "address resolved to nothing",
            ))
        })?;

    let socket = if socket_addr.is_ipv4() {
        TcpSocket::new_v4()
    } else {
        TcpSocket::new_v6()
    }
    .map_err(bind_err)?;

    socket.set_reuseaddr(true).map_err(bind_err)?;
    socket.bind(socket_addr).map_err(bind_err)?;
    socket.listen(backlog).map_err(bind_err)
}

/// Accept connections forever, handing each one to its own task.
///
/// The loop only accepts and dispatches. Accept errors are logged and the
/// loop keeps going; there is no shutdown path.
pub async fn serve(listener: TcpListener, state: Arc<ServerState>) -> Result<()> {
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!(error = %e, "accept failed");
                tokio::time::sleep(ACCEPT_BACKOFF).await;
                continue;
            }
        };

        debug!(%peer, "accepted connection");
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, state).await {
                debug!(%peer, error = %e, "connection closed with error");
            }
        });
    }
}
