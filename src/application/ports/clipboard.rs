//! Clipboard bridge port interface

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};

/// Clipboard errors
#[derive(Debug, Clone, Error)]
pub enum ClipboardError {
    #[error("{0} not found. Install it or set copy_command/paste_command.")]
    ProgramNotFound(String),

    #[error("Failed to start {program}: {message}")]
    SpawnFailed { program: String, message: String },

    #[error("{program} exited with {status}{}", stderr_suffix(.stderr))]
    ExitFailure {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("{program} did not finish within {after}")]
    TimedOut { program: String, after: String },

    #[error("Clipboard stream error: {0}")]
    Io(String),
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

/// Port for moving raw bytes in and out of the system clipboard.
///
/// Content is opaque: implementations must not inspect, transform or limit it.
#[async_trait]
pub trait ClipboardBridge: Send + Sync {
    /// Replace the clipboard with everything readable from `source`.
    async fn write(&self, source: &mut (dyn AsyncRead + Unpin + Send))
        -> Result<(), ClipboardError>;

    /// Stream the current clipboard content into `destination`.
    async fn read(
        &self,
        destination: &mut (dyn AsyncWrite + Unpin + Send),
    ) -> Result<(), ClipboardError>;
}
