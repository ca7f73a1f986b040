//! CLI argument definitions using Clap

use clap::{Parser, Subcommand};

use crate::domain::config::ServerConfig;

/// pbserver - share the clipboard over HTTP
#[derive(Parser, Debug)]
#[command(name = "pbserver")]
#[command(version)]
#[command(about = "Share the system clipboard over HTTP: GET /pb to paste, PUT or POST /pb to copy")]
#[command(long_about = None)]
pub struct Cli {
    /// The address to bind to [default: 127.0.0.1:8042]
    #[arg(short = 'a', long, value_name = "HOST:PORT", env = "PBSERVER_ADDRESS")]
    pub address: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(short = 'l', long = "log", value_name = "FILE", env = "PBSERVER_LOG")]
    pub log_file: Option<String>,

    /// Program (and arguments) that reads stdin into the clipboard
    #[arg(long, value_name = "COMMAND")]
    pub copy_command: Option<String>,

    /// Program (and arguments) that writes the clipboard to stdout
    #[arg(long, value_name = "COMMAND")]
    pub paste_command: Option<String>,

    /// Kill a clipboard program that runs longer than this (e.g., 10s, 1m)
    #[arg(short = 't', long, value_name = "TIME")]
    pub timeout: Option<String>,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Config layer made of the flags given on the command line
    pub fn to_config(&self) -> ServerConfig {
        ServerConfig {
            address: self.address.clone(),
            log_file: self.log_file.clone(),
            copy_command: self.copy_command.clone(),
            paste_command: self.paste_command.clone(),
            timeout: self.timeout.clone(),
        }
    }
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "address",
    "log_file",
    "copy_command",
    "paste_command",
    "timeout",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
