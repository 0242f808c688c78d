//! # Pairswap AMM - Pool Accounting Engine
//!
//! ## Purpose
//!
//! Constant-product automated market maker over paired token reserves. Keeps
//! reserves, total shares and per-provider shares consistent across pool
//! creation, liquidity provision, withdrawal and swaps, with slippage and
//! deadline protection on every command.
//!
//! ## Integration Points
//!
//! - **Store**: [`PoolStore`] over the pool table ([`PoolRegistry`]) and the
//!   position table ([`LiquidityLedger`]); [`InMemoryStore`] composes both
//! - **Token transfers**: [`TokenGateway`], settled as one batch per command;
//!   [`InMemoryTokenLedger`] for embedding and tests
//! - **Deadlines**: [`HeightOracle`]; deadlines are checked against the block
//!   preceding the current one
//! - **Configuration**: fee and bootstrap constants plus owner/custody
//!   identities from `pairswap-config`
//!
//! ## Architecture Role
//!
//! ```text
//! PoolOperations ──plan──> PricingEngine (pure u128 math)
//!       │                  PoolStore (read)
//!       └──commit──> TokenGateway::settle ──then──> PoolStore::apply
//! ```
//!
//! A command either settles all of its transfers and applies all of its
//! writes, or does neither.
//!
//! ## Example
//!
//! ```rust
//! use pairswap_amm::{InMemoryPoolOperations, SwapExactIn};
//! use pairswap_config::LedgerSettings;
//! use pairswap_types::{AccountId, TokenId};
//!
//! let mut ops = InMemoryPoolOperations::in_memory(&LedgerSettings::default());
//! let alice = AccountId::new("SP1ALICE");
//! let (usd, btc) = (TokenId::new("SP0.usd"), TokenId::new("SP0.wbtc"));
//!
//! ops.gateway_mut().mint(&usd, &alice, 5_000_000).unwrap();
//! ops.gateway_mut().mint(&btc, &alice, 5_000_000).unwrap();
//! ops.create_pool(&alice, &usd, &btc, 1_000_000, 2_000_000).unwrap();
//!
//! let receipt = ops
//!     .swap(
//!         &alice,
//!         &SwapExactIn {
//!             token_in: usd.clone(),
//!             token_out: btc.clone(),
//!             amount_in: 100_000,
//!             amount_out_min: 180_000,
//!             deadline: 100,
//!         },
//!     )
//!     .unwrap();
//! assert_eq!(receipt.amount_out, 181_322);
//! ```

pub mod analytics;
pub mod commands;
pub mod gateway;
pub mod height;
pub mod ledger;
pub mod operations;
pub mod pricing;
pub mod registry;
pub mod store;

pub use analytics::{SwapAnalytics, SwapPreview};
pub use commands::{
    AddLiquidity, LiquidityReceipt, RemoveLiquidity, SwapExactIn, SwapExactOut, SwapReceipt,
};
pub use gateway::{InMemoryTokenLedger, TokenGateway, Transfer};
pub use height::{HeightOracle, ManualHeightOracle};
pub use ledger::LiquidityLedger;
pub use operations::{InMemoryPoolOperations, PoolOperations};
pub use pricing::PricingEngine;
pub use registry::PoolRegistry;
pub use store::{InMemoryStore, PoolStore, StoreBatch};
