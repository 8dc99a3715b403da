//! Configuration file parsing for fishrack
//!
//! Supports `<config dir>/fishrack/config.toml` plus environment overrides.

pub mod settings;
pub mod types;

pub use settings::{
    apply_env_overrides, default_config_path, load_settings, token_from_env, API_URL_ENV,
    CONFIG_FILENAME, TOKEN_ENV,
};
pub use types::*;
