//! Immutable start-up settings

use std::path::PathBuf;

use crate::domain::address::BindAddress;
use crate::domain::clipboard::ClipboardCommand;
use crate::domain::duration::Duration;

/// Settings resolved once at start-up and handed to the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerSettings {
    /// Address the listener binds to
    pub address: BindAddress,
    /// Log destination; stderr when unset
    pub log_file: Option<PathBuf>,
    /// Explicit clipboard-set program, bypassing detection
    pub copy_command: Option<ClipboardCommand>,
    /// Explicit clipboard-get program, bypassing detection
    pub paste_command: Option<ClipboardCommand>,
    /// Upper bound on a single clipboard program run
    pub timeout: Option<Duration>,
}
