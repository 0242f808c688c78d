//! # Pairswap Configuration
//!
//! Constants and configuration for the Pairswap pool engine.
//!
//! ## Features
//!
//! - **Protocol Constants**: swap fee, bootstrap share count, declared owner
//! - **Ledger Configuration**: TOML + environment layered loading via `config`
//! - **Logging**: `tracing-subscriber` setup driven by the `[global]` section
//!
//! ## Usage
//!
//! ```rust
//! use pairswap_config::{protocol, LedgerConfig};
//!
//! assert_eq!((protocol::FEE_NUMERATOR, protocol::FEE_DENOMINATOR), (3, 1000));
//!
//! let config = LedgerConfig::from_toml_str("[ledger]\nstart_height = 10\n").unwrap();
//! assert_eq!(config.ledger.start_height, 10);
//! ```

pub mod ledger_config;
pub mod logging;
pub mod protocol;

// Re-export commonly used types
pub use ledger_config::{load_config, GlobalConfig, LedgerConfig, LedgerSettings};
pub use logging::{init_from_config, init_logging};
pub use protocol::*;
