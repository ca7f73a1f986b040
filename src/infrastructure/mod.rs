//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external clipboard programs and the config file.

pub mod clipboard;
pub mod config;

// Re-export adapters
pub use clipboard::{create_clipboard, ClipboardTool, CommandClipboard};
pub use config::XdgConfigStore;
