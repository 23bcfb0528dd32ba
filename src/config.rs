//! Layered configuration
//!
//! Sources, lowest to highest precedence:
//! 1. Built-in defaults
//! 2. `enquanto.toml` in the working directory (optional), or the file named
//!    by `ENQUANTO_CONFIG_PATH` / [`ConfigBuilder::config_path`] (required)
//! 3. Environment variables such as `ENQUANTO_INTERPRETER__VALIDATE=false`
//! 4. Explicit overrides set on the builder

use std::path::PathBuf;

use anyhow::{Context, Result};
use config::{Environment, File, FileFormat};
use serde::Deserialize;

use crate::interpreter::ParseOptions;

pub const DEFAULT_CONFIG_FILE: &str = "enquanto.toml";
pub const CONFIG_PATH_ENV: &str = "ENQUANTO_CONFIG_PATH";
const ENV_PREFIX: &str = "ENQUANTO";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub interpreter: InterpreterConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// Wire `ou` and `xor` to And, as older releases of the language did
    pub legacy_logic_wiring: bool,
    /// Run the semantic validator before executing
    pub validate: bool,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            legacy_logic_wiring: false,
            validate: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from every source, without overrides
    pub fn load() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            legacy_logic_wiring: self.interpreter.legacy_logic_wiring,
        }
    }
}

/* ===================== Builder ===================== */

#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config_path: Option<PathBuf>,
    legacy_logic_wiring: Option<bool>,
    validate: Option<bool>,
    log_filter: Option<String>,
    use_environment: bool,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            config_path: None,
            legacy_logic_wiring: None,
            validate: None,
            log_filter: None,
            use_environment: true,
        }
    }
}

impl ConfigBuilder {
    /// Read this file instead of the default; it must exist
    pub fn config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    pub fn legacy_logic_wiring(mut self, enabled: bool) -> Self {
        self.legacy_logic_wiring = Some(enabled);
        self
    }

    pub fn validate(mut self, enabled: bool) -> Self {
        self.validate = Some(enabled);
        self
    }

    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = Some(filter.into());
        self
    }

    /// Ignore `.env` and process environment variables
    pub fn without_environment(mut self) -> Self {
        self.use_environment = false;
        self
    }

    pub fn build(self) -> Result<Config> {
        if self.use_environment {
            // A missing .env file is fine
            let _ = dotenvy::dotenv();
        }

        let env_path = if self.use_environment {
            std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from)
        } else {
            None
        };

        let file = match self.config_path.or(env_path) {
            Some(path) => File::from(path.as_path())
                .format(FileFormat::Toml)
                .required(true),
            None => File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false),
        };

        let mut builder = config::Config::builder()
            .set_default("interpreter.legacy_logic_wiring", false)?
            .set_default("interpreter.validate", true)?
            .set_default("logging.filter", "warn")?
            .add_source(file);

        if self.use_environment {
            builder = builder.add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );
        }

        let config: Config = builder
            .set_override_option("interpreter.legacy_logic_wiring", self.legacy_logic_wiring)?
            .set_override_option("interpreter.validate", self.validate)?
            .set_override_option("logging.filter", self.log_filter)?
            .build()
            .context("Failed to load configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Write `contents` to a fresh TOML file under the system temp dir
    fn temp_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "enquanto-config-{}-{}.toml",
            name,
            std::process::id()
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = Config::builder().without_environment().build().unwrap();
        assert_eq!(config, Config::default());
        assert!(config.interpreter.validate);
        assert!(!config.interpreter.legacy_logic_wiring);
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn test_load_matches_builder_without_overrides() {
        let loaded = Config::load().unwrap();
        assert_eq!(loaded, Config::builder().build().unwrap());
    }

    #[test]
    fn test_validate_override() {
        let config = Config::builder()
            .without_environment()
            .validate(false)
            .build()
            .unwrap();
        assert!(!config.interpreter.validate);
    }

    #[test]
    fn test_file_values() {
        let path = temp_config(
            "file",
            "[interpreter]\nlegacy_logic_wiring = true\n\n[logging]\nfilter = \"debug\"\n",
        );
        let config = Config::builder()
            .without_environment()
            .config_path(Some(path.clone()))
            .build()
            .unwrap();
        fs::remove_file(path).unwrap();

        assert!(config.interpreter.legacy_logic_wiring);
        assert!(config.interpreter.validate);
        assert_eq!(config.logging.filter, "debug");
        assert!(config.parse_options().legacy_logic_wiring);
    }

    #[test]
    fn test_overrides_beat_file() {
        let path = temp_config(
            "override",
            "[interpreter]\nlegacy_logic_wiring = true\nvalidate = false\n",
        );
        let config = Config::builder()
            .without_environment()
            .config_path(Some(path.clone()))
            .legacy_logic_wiring(false)
            .log_filter("trace")
            .build()
            .unwrap();
        fs::remove_file(path).unwrap();

        assert!(!config.interpreter.legacy_logic_wiring);
        assert!(!config.interpreter.validate);
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn test_named_file_must_exist() {
        let missing = std::env::temp_dir().join("enquanto-config-does-not-exist.toml");
        let result = Config::builder()
            .without_environment()
            .config_path(Some(missing))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_value_is_an_error() {
        let path = temp_config("invalid", "[interpreter]\nvalidate = \"sometimes\"\n");
        let result = Config::builder()
            .without_environment()
            .config_path(Some(path.clone()))
            .build();
        fs::remove_file(path).unwrap();
        assert!(result.is_err());
    }
}
