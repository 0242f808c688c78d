//! Typed identifiers for tokens and accounts
//!
//! Both wrap the principal string of the host ledger (an account address or a
//! contract address). The wrappers are distinct types so a token can never be
//! passed where a provider is expected, and both derive a total order: pair
//! canonicalisation in [`crate::pair`] depends on it.
//!
//! ```rust
//! use pairswap_types::{AccountId, TokenId};
//!
//! let usd = TokenId::new("SP000.usd-token");
//! let btc = TokenId::new("SP000.btc-token");
//! assert!(btc < usd);
//!
//! let alice = AccountId::new("SP1ALICE");
//! assert_eq!(alice.as_str(), "SP1ALICE");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Generates a string-backed identifier newtype with the shared trait set.
macro_rules! principal_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(principal: impl Into<String>) -> Self {
                Self(principal.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

principal_id!(
    /// Identifies a fungible token (the token contract's principal)
    TokenId
);

principal_id!(
    /// Identifies a ledger account: a liquidity provider, a trader or the pool custody
    AccountId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_ordering_is_lexicographic() {
        let a = TokenId::new("SP2.alpha");
        let b = TokenId::new("SP2.beta");
        assert!(a < b);
        assert_eq!(a.cmp(&a.clone()), std::cmp::Ordering::Equal);
    }

    #[test]
    fn test_serde_is_transparent() {
        let account = AccountId::new("SP3PROVIDER");
        let json = serde_json::to_string(&account).unwrap();
        assert_eq!(json, "\"SP3PROVIDER\"");

        let back: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, account);
    }

    #[test]
    fn test_display_and_conversions() {
        let token: TokenId = "SP4.wrapped".into();
        assert_eq!(token.to_string(), "SP4.wrapped");
        assert!(!token.is_empty());
        assert!(TokenId::from(String::new()).is_empty());
    }
}
