//! Application layer - Port interfaces
//!
//! Contains the trait definitions for the clipboard bridge
//! and configuration storage.

pub mod ports;

pub use ports::{ClipboardBridge, ClipboardError, ConfigStore};
