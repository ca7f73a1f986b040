//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::address::BindAddress;
use crate::domain::clipboard::ClipboardCommand;
use crate::domain::config::ServerConfig;
use crate::domain::duration::Duration;
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    ensure_valid_key(key)?;
    validate_config_value(key, value)?;

    let mut config = store.load().await?;
    *field_mut(&mut config, key) = Some(value.trim().to_string());
    store.save(&config).await?;

    presenter.success(&format!("{} = {}", key, value.trim()));
    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    ensure_valid_key(key)?;

    let mut config = store.load().await?;
    let value = field_mut(&mut config, key).take();
    presenter.output(value.as_deref().unwrap_or(NOT_SET));

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let mut config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        let value = field_mut(&mut config, key).take();
        presenter.key_value(key, value.as_deref().unwrap_or(NOT_SET));
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn ensure_valid_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    })
}

/// Map a validated key to its field. Callers check the key first.
fn field_mut<'a>(config: &'a mut ServerConfig, key: &str) -> &'a mut Option<String> {
    match key {
        "address" => &mut config.address,
        "log_file" => &mut config.log_file,
        "copy_command" => &mut config.copy_command,
        "paste_command" => &mut config.paste_command,
        "timeout" => &mut config.timeout,
        _ => unreachable!("config key validated before lookup"),
    }
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    let result = match key {
        "address" => value.parse::<BindAddress>().map(drop).map_err(|e| e.to_string()),
        "timeout" => value.parse::<Duration>().map(drop).map_err(|e| e.to_string()),
        "copy_command" | "paste_command" => value
            .parse::<ClipboardCommand>()
            .map(drop)
            .map_err(|e| e.to_string()),
        _ => Ok(()), // log_file accepts any path
    };

    result.map_err(|message| ConfigError::ValidationError {
        key: key.to_string(),
        message,
    })
}
