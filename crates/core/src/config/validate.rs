use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Catalog path is not empty
/// - Executor command has no blank entries
/// - Known locales are not blank
///
/// The job count is checked by the scheduler before any work starts.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.catalog.path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "catalog.path cannot be empty".to_string(),
        ));
    }

    if config.executor.command.iter().any(|arg| arg.trim().is_empty()) {
        return Err(ConfigError::ValidationError(
            "executor.command cannot contain blank entries".to_string(),
        ));
    }

    if config.locales.known.iter().any(|l| l.trim().is_empty()) {
        return Err(ConfigError::ValidationError(
            "locales.known cannot contain blank entries".to_string(),
        ));
    }

    Ok(())
}
