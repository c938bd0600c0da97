//! Keep-alive HTTP server.
//!
//! Some hosting platforms suspend processes that do not answer HTTP. This server
//! gives them something to probe:
//! - `/` - static "running" page
//! - `/status` - JSON uptime and outcome counters
//!
//! It runs as its own task and shares nothing with message handling except the
//! atomic counters.

mod handlers;
mod types;

use std::net::SocketAddr;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

use handlers::{index_handler, status_handler};
pub use types::KeepAliveState;

/// Builds the keep-alive router.
pub fn keep_alive_router(state: KeepAliveState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/status", get(status_handler))
        .with_state(state)
}

/// Binds `addr` and serves the keep-alive endpoints until the process exits.
pub async fn start_keep_alive_server(
    addr: SocketAddr,
    state: KeepAliveState,
) -> Result<(), anyhow::Error> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind keep-alive server to {}: {}", addr, e))?;

    log::info!("Keep-alive server listening on http://{}/", addr);

    axum::serve(listener, keep_alive_router(state))
        .await
        .map_err(|e| anyhow::anyhow!("Keep-alive server error: {}", e))?;

    Ok(())
}

/// Starts the server on a detached task. Failures are logged, never fatal.
pub fn spawn_keep_alive_server(addr: SocketAddr, state: KeepAliveState) {
    tokio::spawn(async move {
        if let Err(e) = start_keep_alive_server(addr, state).await {
            log::warn!("{}", e);
        }
    });
}
