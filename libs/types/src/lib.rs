//! # Pairswap Types
//!
//! Shared vocabulary for the Pairswap pool accounting engine.
//!
//! ## Contents
//!
//! - **Identifiers**: [`TokenId`] and [`AccountId`], totally ordered principal wrappers
//! - **Pairs**: [`PairKey`] and [`CanonicalPair`], the order-independent pool key
//! - **Records**: [`PoolState`] and [`ProviderPosition`], the two persisted tables
//! - **Errors**: [`AmmError`] and [`TransferError`]
//!
//! ```rust
//! use pairswap_types::{CanonicalPair, TokenId};
//!
//! let stx = TokenId::new("SP000.wstx");
//! let usd = TokenId::new("SP000.usda");
//! let pair = CanonicalPair::resolve(&usd, &stx).unwrap();
//!
//! assert_eq!(pair.key().token_x(), &usd);
//! assert_eq!(pair.to_canonical(10u128, 20u128), (10, 20));
//! ```

pub mod errors;
pub mod identifiers;
pub mod pair;
pub mod pool;

pub use errors::{AmmError, Result, TransferError};
pub use identifiers::{AccountId, TokenId};
pub use pair::{CanonicalPair, PairKey};
pub use pool::{PoolState, ProviderPosition};
