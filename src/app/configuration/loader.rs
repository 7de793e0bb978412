//! Configuration loading: file, then environment overrides.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::{AppConfig, AppError};

/// Location of the user configuration below `$HOME`.
pub const CONFIG_RELATIVE_PATH: &str = ".config/versecast/config.toml";

pub fn default_config_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(CONFIG_RELATIVE_PATH))
}

/// Load configuration from `explicit` (which must exist) or the default location (which may
/// not), then apply environment overrides and validate the result.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig, AppError> {
    let mut config = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(AppError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            read_config_file(path)?
        }
        None => match default_config_path() {
            Some(path) if path.is_file() => read_config_file(&path)?,
            _ => {
                debug!("no config file found; using defaults");
                AppConfig::default()
            }
        },
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<AppConfig, AppError> {
    debug!(path = %path.display(), "loading config");
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Parse configuration from string content.
pub fn parse_config_content(content: &str) -> Result<AppConfig, AppError> {
    let config: AppConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Apply `OBS_HOST`, `OBS_PORT`, `OBS_PASSWORD` and `GEMINI_API_KEY` from `lookup`.
///
/// An empty `OBS_HOST` or `GEMINI_API_KEY` is ignored. An empty `OBS_PASSWORD` is kept,
/// meaning "no password".
pub fn apply_env_overrides(
    config: &mut AppConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), AppError> {
    if let Some(host) = lookup("OBS_HOST").filter(|host| !host.trim().is_empty()) {
        config.obs.host = host.trim().to_string();
    }
    if let Some(port) = lookup("OBS_PORT") {
        config.obs.port = port.trim().parse().map_err(|_| {
            AppError::InvalidConfig(format!("OBS_PORT must be a port number, got '{}'", port))
        })?;
    }
    if let Some(password) = lookup("OBS_PASSWORD") {
        config.obs.password = Some(password);
    }
    if let Some(key) = lookup("GEMINI_API_KEY").filter(|key| !key.trim().is_empty()) {
        config.images.api_key = Some(key.trim().to_string());
    }
    Ok(())
}
