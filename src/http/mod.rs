//! HTTP layer - Listener and router
//!
//! Serves the clipboard over plain HTTP/1.1 and owns the listener lifecycle.

pub mod router;
pub mod server;

pub use router::{router, CLIPBOARD_PATH, USAGE};
pub use server::{ClipboardServer, ServerError};
