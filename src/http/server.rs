//! HTTP listener with graceful shutdown

use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::application::ports::ClipboardBridge;
use crate::domain::address::BindAddress;
use crate::domain::server::{InvalidStateTransition, ServerLifecycle, ServerState};

use super::router::router;

/// Server errors
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Lifecycle(#[from] InvalidStateTransition),

    #[error("Server error: {0}")]
    Serve(#[source] io::Error),

    #[error("Server task failed: {0}")]
    Join(String),
}

/// The clipboard HTTP server.
///
/// `start` binds and spawns the accept loop; `stop` (or cancelling the
/// token from `shutdown_token`) begins draining; `wait` resolves once every
/// in-flight request has finished.
pub struct ClipboardServer {
    app: Router,
    lifecycle: Arc<Mutex<ServerLifecycle>>,
    shutdown: CancellationToken,
    local_addr: Option<SocketAddr>,
    task: Option<JoinHandle<Result<(), ServerError>>>,
}

impl ClipboardServer {
    /// Create a server that has not started listening yet
    pub fn new(bridge: Arc<dyn ClipboardBridge>) -> Self {
        Self {
            app: router(bridge),
            lifecycle: Arc::new(Mutex::new(ServerLifecycle::new())),
            shutdown: CancellationToken::new(),
            local_addr: None,
            task: None,
        }
    }

    /// Bind `address` and start accepting connections.
    ///
    /// Returns the bound address, which carries the real port when `address`
    /// asked for port 0.
    pub async fn start(&mut self, address: &BindAddress) -> Result<SocketAddr, ServerError> {
        lock(&self.lifecycle).can_start()?;

        let listener = TcpListener::bind(address.to_string())
            .await
            .map_err(|source| ServerError::Bind {
                address: address.to_string(),
                source,
            })?;
        let local_addr = listener.local_addr().map_err(|source| ServerError::Bind {
            address: address.to_string(),
            source,
        })?;

        lock(&self.lifecycle).start()?;

        let app = self.app.clone();
        let token = self.shutdown.clone();
        let lifecycle = Arc::clone(&self.lifecycle);

        self.task = Some(tokio::spawn(async move {
            let draining = Arc::clone(&lifecycle);
            let result = axum::serve(listener, app.into_make_service())
                .with_graceful_shutdown(async move {
                    token.cancelled().await;
                    if let Err(e) = lock(&draining).begin_stop() {
                        debug!(error = %e, "Stop requested twice");
                    }
                    info!("Stopping; waiting for in-flight requests");
                })
                .await;

            mark_stopped(&lifecycle);
            result.map_err(ServerError::Serve)
        }));
        self.local_addr = Some(local_addr);

        Ok(local_addr)
    }

    /// Begin graceful shutdown. Safe to call more than once.
    pub fn stop(&self) {
        self.shutdown.cancel();
    }

    /// Token that stops the server when cancelled
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Wait until the server has drained and stopped
    pub async fn wait(&mut self) -> Result<(), ServerError> {
        let task = self.task.take().ok_or_else(|| InvalidStateTransition {
            current_state: self.state(),
            action: "wait".to_string(),
        })?;

        task.await
            .map_err(|e| ServerError::Join(e.to_string()))?
    }

    /// Current lifecycle state
    pub fn state(&self) -> ServerState {
        lock(&self.lifecycle).state()
    }

    /// Address the listener is bound to, once started
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }
}

/// Record the end of serving, even if it ended without a stop request
fn mark_stopped(lifecycle: &Mutex<ServerLifecycle>) {
    let mut lifecycle = lock(lifecycle);
    if lifecycle.is_listening() {
        let _ = lifecycle.begin_stop();
    }
    if let Err(e) = lifecycle.finish_stop() {
        debug!(error = %e, "Server already stopped");
    }
}

// The lock is only held for a state read or transition
fn lock(lifecycle: &Mutex<ServerLifecycle>) -> MutexGuard<'_, ServerLifecycle> {
    lifecycle.lock().unwrap_or_else(|e| e.into_inner())
}
