//! Application configuration.
//!
//! Read from an optional TOML file, then overridden by command-line flags.
//! Every key is optional:
//!
//! ```toml
//! [policy]
//! contact_uncheck = "clear"
//! gate_leadership_step = true
//!
//! [logging]
//! level = "info"
//! directory = "logs"
//! stdout = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use intake_core::FormPolicy;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub policy: FormPolicy,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Bare level or full `EnvFilter` directive. `RUST_LOG` wins when set.
    pub level: String,
    /// Directory for the log file. No file logging when absent.
    pub directory: Option<PathBuf>,
    pub stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            stdout: true,
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub lenient: bool,
    pub log_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Loads the file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("cannot read config file '{}'", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("invalid config file '{}'", path.display()))?;
        debug!(path = %path.display(), ?config, "config loaded");
        Ok(config)
    }

    /// Loads `path` when given, defaults otherwise, then applies `overrides`.
    pub fn resolve(
        path: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply(overrides);
        Ok(config)
    }

    pub fn apply(
        &mut self,
        overrides: &ConfigOverrides,
    ) {
        if overrides.lenient {
            self.policy = FormPolicy::lenient();
        }
        if let Some(dir) = &overrides.log_dir {
            self.logging.directory = Some(dir.clone());
        }
        if let Some(level) = &overrides.log_level {
            self.logging.level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use intake_core::UncheckBehavior;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.policy, FormPolicy::strict());
        assert!(config.logging.stdout);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [policy]
            contact_uncheck = "preserve"

            [logging]
            directory = "logs"
            "#,
        )
        .unwrap();

        assert_eq!(config.policy.contact_uncheck, UncheckBehavior::Preserve);
        assert!(config.policy.gate_leadership_step);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.directory, Some(PathBuf::from("logs")));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(AppConfig::from_toml_str("[policy]\ngate_step3 = true\n").is_err());
        assert!(AppConfig::from_toml_str("[policy]\ncontact_uncheck = \"keep\"\n").is_err());
    }

    #[test]
    fn overrides_win_over_file() {
        let mut config = AppConfig::from_toml_str("[logging]\nlevel = \"warn\"\n").unwrap();

        config.apply(&ConfigOverrides {
            lenient: true,
            log_dir: Some(PathBuf::from("/tmp/intake")),
            log_level: Some("debug".into()),
        });

        assert_eq!(config.policy, FormPolicy::lenient());
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.directory, Some(PathBuf::from("/tmp/intake")));
    }

    #[test]
    fn resolve_without_file_uses_defaults() {
        let config = AppConfig::resolve(None, &ConfigOverrides::default()).unwrap();

        assert_eq!(config, AppConfig::default());
    }
}
