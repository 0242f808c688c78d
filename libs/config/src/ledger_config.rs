//! Ledger Configuration Module
//!
//! Loads the settings an embedding host hands to the pool engine. Supports a
//! base TOML file, an environment-specific override file next to it and
//! `PAIRSWAP_`-prefixed environment variables, in that order of precedence.

use crate::protocol::{CONTRACT_OWNER, DEFAULT_CUSTODY_ACCOUNT};
use anyhow::{bail, Context, Result};
use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default location of the base configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/pairswap.toml";

/// Environment variable prefix; nested keys use `__`, e.g. `PAIRSWAP_LEDGER__OWNER`
pub const ENV_PREFIX: &str = "PAIRSWAP";

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct LedgerConfig {
    /// Process-wide settings
    #[serde(default)]
    pub global: GlobalConfig,

    /// Pool engine settings
    #[serde(default)]
    pub ledger: LedgerSettings,
}

/// Global configuration settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct GlobalConfig {
    pub log_level: String,
    pub json_logs: bool,
}

/// Settings consumed by the pool engine
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LedgerSettings {
    /// Declared owner; informational only
    pub owner: String,

    /// Account that holds every pool's reserves
    pub custody_account: String,

    /// Height the manual height oracle starts at
    pub start_height: u64,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            owner: CONTRACT_OWNER.to_string(),
            custody_account: DEFAULT_CUSTODY_ACCOUNT.to_string(),
            start_height: 1,
        }
    }
}

impl LedgerConfig {
    /// Load configuration from files with environment overrides
    pub fn load(base_path: Option<&Path>, environment: Option<&str>) -> Result<Self> {
        Self::load_with_vars(base_path, environment, None)
    }

    /// Like [`LedgerConfig::load`], reading variables from `vars` instead of the process environment
    pub fn load_with_vars(
        base_path: Option<&Path>,
        environment: Option<&str>,
        vars: Option<HashMap<String, String>>,
    ) -> Result<Self> {
        let base = base_path.unwrap_or(Path::new(DEFAULT_CONFIG_PATH));

        let mut builder = Config::builder().add_source(File::from(base).required(true));

        // Add environment-specific overrides if specified
        if let Some(env) = environment {
            let env_file = environment_file(base, env);

            if env_file.exists() {
                info!("Loading environment config: {:?}", env_file);
                builder = builder.add_source(File::from(env_file));
            } else {
                warn!("Environment config not found: {:?}", env_file);
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(vars),
        );

        let config: Self = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;
        debug!(owner = %config.ledger.owner, custody = %config.ledger.custody_account, "ledger configuration loaded");
        Ok(config)
    }

    /// Parse a configuration from TOML text without file or environment layering
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("Failed to parse configuration TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject identities the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.ledger.owner.trim().is_empty() {
            bail!("ledger.owner must not be empty");
        }
        if self.ledger.custody_account.trim().is_empty() {
            bail!("ledger.custody_account must not be empty");
        }
        Ok(())
    }
}

/// Convenience function to load configuration from the default path
pub fn load_config(environment: Option<&str>) -> Result<LedgerConfig> {
    LedgerConfig::load(None, environment)
}

/// Path of the override file for `environment` next to `base`
pub fn environment_file(base: &Path, environment: &str) -> PathBuf {
    base.parent()
        .unwrap_or(Path::new("."))
        .join("environments")
        .join(format!("{}.toml", environment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const BASE: &str = r#"
[global]
log_level = "debug"

[ledger]
owner = "SP1OWNER"
custody_account = "SP1OWNER.pool"
start_height = 42
"#;

    #[test]
    fn test_load_base_config() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("pairswap.toml");
        fs::write(&config_path, BASE).unwrap();

        let config =
            LedgerConfig::load_with_vars(Some(&config_path), None, Some(HashMap::new())).unwrap();

        assert_eq!(config.global.log_level, "debug");
        assert!(!config.global.json_logs);
        assert_eq!(config.ledger.owner, "SP1OWNER");
        assert_eq!(config.ledger.custody_account, "SP1OWNER.pool");
        assert_eq!(config.ledger.start_height, 42);
    }

    #[test]
    fn test_environment_file_and_variables_override() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("pairswap.toml");
        fs::write(&config_path, BASE).unwrap();

        let env_path = environment_file(&config_path, "staging");
        fs::create_dir_all(env_path.parent().unwrap()).unwrap();
        fs::write(&env_path, "[global]\njson_logs = true\n").unwrap();

        let mut vars = HashMap::new();
        vars.insert("PAIRSWAP_LEDGER__START_HEIGHT".to_string(), "7".to_string());

        let config =
            LedgerConfig::load_with_vars(Some(&config_path), Some("staging"), Some(vars)).unwrap();

        assert!(config.global.json_logs);
        assert_eq!(config.global.log_level, "debug");
        assert_eq!(config.ledger.start_height, 7);
        assert_eq!(config.ledger.owner, "SP1OWNER");
    }

    #[test]
    fn test_missing_base_file_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(LedgerConfig::load_with_vars(Some(&missing), None, Some(HashMap::new())).is_err());
    }

    #[test]
    fn test_defaults_from_protocol_constants() {
        let config = LedgerConfig::from_toml_str("").unwrap();
        assert_eq!(config, LedgerConfig::default());
        assert_eq!(config.ledger.owner, CONTRACT_OWNER);
        assert_eq!(config.ledger.custody_account, DEFAULT_CUSTODY_ACCOUNT);
    }

    #[test]
    fn test_empty_custody_rejected() {
        let err = LedgerConfig::from_toml_str("[ledger]\ncustody_account = \"\"\n").unwrap_err();
        assert!(err.to_string().contains("custody_account"));
    }
}
