//! Configuration types for fishrack
//!
//! `Settings` mirrors `config.toml`; every section and field has a default so
//! a partial file is always valid.

use serde::{Deserialize, Serialize};

use fishrack_core::DEFAULT_BASE_CELL_WIDTH;

/// Global application settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub behavior: BehaviorSettings,

    #[serde(default)]
    pub layout: LayoutSettings,
}

/// Tank service connection
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ApiSettings {
    /// Base URL of the REST service, including any path prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BehaviorSettings {
    /// Ask before deleting a tank
    #[serde(default = "default_true")]
    pub confirm_delete: bool,
}

impl Default for BehaviorSettings {
    fn default() -> Self {
        Self {
            confirm_delete: true,
        }
    }
}

/// Grid geometry
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LayoutSettings {
    /// Reference cell width used to compute per-row width ratios
    #[serde(default = "default_base_cell_width")]
    pub base_cell_width: f64,

    /// Terminal columns given to one cell of the widest row
    #[serde(default = "default_terminal_cell_width")]
    pub terminal_cell_width: u16,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            base_cell_width: default_base_cell_width(),
            terminal_cell_width: default_terminal_cell_width(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000/api".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_true() -> bool {
    true
}

fn default_base_cell_width() -> f64 {
    DEFAULT_BASE_CELL_WIDTH
}

fn default_terminal_cell_width() -> u16 {
    12
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.api.base_url, "http://127.0.0.1:5000/api");
        assert_eq!(settings.api.timeout_ms, 10_000);
        assert!(settings.behavior.confirm_delete);
        assert_eq!(settings.layout.base_cell_width, 90.0);
        assert_eq!(settings.layout.terminal_cell_width, 12);
    }

    #[test]
    fn test_partial_toml() {
        let settings: Settings = toml::from_str(
            r#"
[behavior]
confirm_delete = false
"#,
        )
        .unwrap();
        assert!(!settings.behavior.confirm_delete);
        assert_eq!(settings.api, ApiSettings::default());
    }
}
