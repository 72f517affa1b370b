use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Prefix for environment variable overrides, e.g. `STATIC_DEPLOY_DEPLOY__JOBS=8`.
pub const ENV_PREFIX: &str = "STATIC_DEPLOY_";

fn env_overrides() -> Env {
    Env::prefixed(ENV_PREFIX)
        .ignore(&["CONFIG", "AREA", "THEME", "LOCALE"])
        .split("__")
}

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    load_config_or_default(path)
}

/// Load configuration from file if it exists, falling back to defaults
pub fn load_config_or_default(path: &Path) -> Result<Config, ConfigError> {
    Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(env_overrides())
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
