//! pbserver CLI entry point

use std::process::ExitCode;

use clap::Parser;

use pbserver::cli::{
    handle_config_command, init_logging, resolve_settings, run_server, Cli, Commands, Presenter,
    EXIT_ERROR, EXIT_USAGE_ERROR,
};
use pbserver::infrastructure::XdgConfigStore;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    if let Some(Commands::Config { action }) = cli.command {
        let store = XdgConfigStore::new();
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    let settings = match resolve_settings(cli.to_config(), &presenter).await {
        Ok(settings) => settings,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    if let Err(e) = init_logging(settings.log_file.as_deref()) {
        presenter.error(&e.to_string());
        return ExitCode::from(EXIT_ERROR);
    }

    run_server(settings).await
}
