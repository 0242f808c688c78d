//! Logging initialisation
//!
//! Installs a `tracing-subscriber` fmt subscriber. `RUST_LOG` takes precedence
//! over the configured level when set.

use crate::ledger_config::GlobalConfig;
use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Map a configured level name to a filter directive, defaulting to `info`
pub fn level_directive(level: &str) -> &'static str {
    match level.to_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "info" => "info",
        "warn" => "warn",
        "error" => "error",
        _ => "info",
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_directive(level)));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))
}

/// Install the subscriber described by the `[global]` section
pub fn init_from_config(global: &GlobalConfig) -> Result<()> {
    init_logging(&global.log_level, global.json_logs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_directive() {
        assert_eq!(level_directive("DEBUG"), "debug");
        assert_eq!(level_directive("warn"), "warn");
        assert_eq!(level_directive("verbose"), "info");
    }

    #[test]
    fn test_second_init_reports_error() {
        // the first call may race other tests in this binary; the second never succeeds
        let _ = init_logging("info", false);
        assert!(init_logging("info", false).is_err());
    }
}
