//! Domain layer - Core value objects and errors
//!
//! Contains value objects, the server lifecycle, and domain errors.
//! This layer has no dependencies on external systems.

pub mod address;
pub mod clipboard;
pub mod config;
pub mod duration;
pub mod error;
pub mod server;

// Re-export common types
pub use address::{BindAddress, DEFAULT_ADDRESS};
pub use clipboard::ClipboardCommand;
pub use config::{ServerConfig, ServerSettings};
pub use duration::Duration;
pub use error::*;
pub use server::{InvalidStateTransition, ServerLifecycle, ServerState};
