//! Settings file loading and environment overrides

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::types::Settings;

pub const CONFIG_DIR: &str = "fishrack";
pub const CONFIG_FILENAME: &str = "config.toml";

/// Environment variable overriding `api.base_url`
pub const API_URL_ENV: &str = "FISHRACK_API_URL";

/// Environment variable holding the bearer token
pub const TOKEN_ENV: &str = "FISHRACK_TOKEN";

/// Default location: `<config dir>/fishrack/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILENAME))
}

/// Load settings from `path`, falling back to defaults when the file is
/// missing or invalid
pub fn load_settings(path: &Path) -> Settings {
    if !path.exists() {
        debug!("No config file at {:?}, using defaults", path);
        return Settings::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", path, e);
            Settings::default()
        }
    }
}

/// Apply environment overrides read through `lookup`
pub fn apply_env_overrides<F>(settings: &mut Settings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
        debug!("API URL overridden by {}", API_URL_ENV);
        settings.api.base_url = url;
    }
}

/// Token from the environment, if set and non-blank
pub fn token_from_env<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(TOKEN_ENV).filter(|v| !v.trim().is_empty())
}
