//! Canonical token pairs
//!
//! A pool is keyed by its two tokens in ascending order, so `(a, b)` and
//! `(b, a)` always resolve to the same record. Every lookup and every write
//! goes through [`CanonicalPair::resolve`]; a key built any other way would
//! silently split one logical pool in two.

use crate::errors::{AmmError, Result};
use crate::identifiers::TokenId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered pool key with `token_x < token_y`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PairKey {
    token_x: TokenId,
    token_y: TokenId,
}

impl PairKey {
    /// Build the canonical key for two distinct tokens
    pub fn new(token_a: &TokenId, token_b: &TokenId) -> Result<Self> {
        CanonicalPair::resolve(token_a, token_b).map(CanonicalPair::into_key)
    }

    pub fn token_x(&self) -> &TokenId {
        &self.token_x
    }

    pub fn token_y(&self) -> &TokenId {
        &self.token_y
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.token_x, self.token_y)
    }
}

/// A caller-supplied pair resolved to its canonical key
///
/// Remembers whether the caller's order was reversed so amounts can be mapped
/// into canonical order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalPair {
    key: PairKey,
    flipped: bool,
}

impl CanonicalPair {
    /// Fails with [`AmmError::SameToken`] when both tokens are equal
    pub fn resolve(token_a: &TokenId, token_b: &TokenId) -> Result<Self> {
        if token_a == token_b {
            return Err(AmmError::SameToken {
                token: token_a.clone(),
            });
        }

        let flipped = token_b < token_a;
        let (token_x, token_y) = if flipped {
            (token_b.clone(), token_a.clone())
        } else {
            (token_a.clone(), token_b.clone())
        };

        Ok(Self {
            key: PairKey { token_x, token_y },
            flipped,
        })
    }

    pub fn key(&self) -> &PairKey {
        &self.key
    }

    pub fn into_key(self) -> PairKey {
        self.key
    }

    /// Map values given in caller order `(a, b)` to canonical order `(x, y)`
    pub fn to_canonical<T>(&self, a: T, b: T) -> (T, T) {
        if self.flipped {
            (b, a)
        } else {
            (a, b)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens() -> (TokenId, TokenId) {
        (TokenId::new("SP1.aaa"), TokenId::new("SP1.zzz"))
    }

    #[test]
    fn test_order_independent_key() {
        let (low, high) = tokens();
        let forward = PairKey::new(&low, &high).unwrap();
        let backward = PairKey::new(&high, &low).unwrap();

        assert_eq!(forward, backward);
        assert_eq!(forward.token_x(), &low);
        assert_eq!(forward.token_y(), &high);
        assert_eq!(forward.to_string(), "SP1.aaa/SP1.zzz");
    }

    #[test]
    fn test_same_token_rejected() {
        let (low, _) = tokens();
        let err = CanonicalPair::resolve(&low, &low).unwrap_err();
        assert_eq!(err, AmmError::SameToken { token: low });
    }

    #[test]
    fn test_amount_mapping() {
        let (low, high) = tokens();
        let pair = CanonicalPair::resolve(&high, &low).unwrap();

        // caller said (high=7, low=3)
        assert_eq!(pair.to_canonical(7u128, 3u128), (3, 7));
        assert_eq!(pair.key().token_x(), &low);

        let straight = CanonicalPair::resolve(&low, &high).unwrap();
        assert_eq!(straight.to_canonical(7u128, 3u128), (7, 3));
    }
}
