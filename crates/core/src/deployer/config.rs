//! Configuration for the command deployer.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// External command run once per deployed unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutorConfig {
    /// Program followed by its fixed arguments.
    #[serde(default)]
    pub command: Vec<String>,

    /// Working directory for the command (default: current directory).
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
}

impl ExecutorConfig {
    /// Sets the command line.
    pub fn with_command<S: Into<String>>(mut self, command: impl IntoIterator<Item = S>) -> Self {
        self.command = command.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExecutorConfig::default();
        assert!(config.command.is_empty());
        assert!(config.working_dir.is_none());
    }

    #[test]
    fn test_deserialize() {
        let toml = r#"
            command = ["bin/deploy-unit", "--quiet"]
            working_dir = "/var/www"
        "#;
        let config: ExecutorConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.command, vec!["bin/deploy-unit", "--quiet"]);
        assert_eq!(config.working_dir, Some(PathBuf::from("/var/www")));
    }
}
