//! Main app runner: resolve settings, start the server, wait for shutdown

use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};

use crate::application::ports::ConfigStore;
use crate::domain::config::{ServerConfig, ServerSettings};
use crate::http::ClipboardServer;
use crate::infrastructure::{create_clipboard, XdgConfigStore};

use super::presenter::Presenter;
use super::signals::ShutdownSignals;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Run the server until it is stopped by a signal
pub async fn run_server(settings: ServerSettings) -> ExitCode {
    let signals = match ShutdownSignals::new() {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "Failed to setup signal handler");
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let bridge = create_clipboard(&settings);
    let mut server = ClipboardServer::new(Arc::new(bridge));

    let addr = match server.start(&settings.address).await {
        Ok(addr) => addr,
        Err(e) => {
            error!(error = %e, "Failed to start server");
            return ExitCode::from(EXIT_ERROR);
        }
    };
    info!("Listening on http://{}", addr);

    tokio::spawn(signals.watch(server.shutdown_token()));

    match server.wait().await {
        Ok(()) => {
            info!("Stopped");
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            error!(error = %e, "Server stopped with an error");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Load and merge configuration from the config file and CLI.
///
/// An unreadable config file is reported and skipped.
pub async fn load_merged_config<S: ConfigStore>(
    store: &S,
    cli_config: ServerConfig,
    presenter: &Presenter,
) -> ServerConfig {
    let file_config = store.load().await.unwrap_or_else(|e| {
        presenter.warn(&format!("Ignoring config file: {}", e));
        ServerConfig::empty()
    });

    // Merge: defaults < file < cli
    ServerConfig::defaults()
        .merge(file_config)
        .merge(cli_config)
}

/// Resolve the settings for a run from the default config location
pub async fn resolve_settings(
    cli_config: ServerConfig,
    presenter: &Presenter,
) -> Result<ServerSettings, crate::domain::error::ConfigError> {
    let store = XdgConfigStore::new();
    load_merged_config(&store, cli_config, presenter)
        .await
        .into_settings()
}
