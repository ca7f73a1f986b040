//! Configuration domain

mod server_config;
mod settings;

pub use server_config::ServerConfig;
pub use settings::ServerSettings;
