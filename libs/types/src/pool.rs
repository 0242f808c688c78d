//! Pool and provider position records
//!
//! These are the two persisted record kinds: one [`PoolState`] per canonical
//! pair and one [`ProviderPosition`] per (pair, provider).

use serde::{Deserialize, Serialize};

/// Reserves and outstanding shares of one pool
///
/// `total_shares == 0` exactly when the pool holds no liquidity: either it has
/// never been funded or the last provider withdrew everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolState {
    pub reserve_x: u128,
    pub reserve_y: u128,
    pub total_shares: u128,
}

impl PoolState {
    pub fn new(reserve_x: u128, reserve_y: u128, total_shares: u128) -> Self {
        Self {
            reserve_x,
            reserve_y,
            total_shares,
        }
    }

    /// No outstanding shares
    pub fn is_drained(&self) -> bool {
        self.total_shares == 0
    }

    /// `(reserve_in, reserve_out)` for a trade in the given direction
    pub fn directional_reserves(&self, x_to_y: bool) -> (u128, u128) {
        if x_to_y {
            (self.reserve_x, self.reserve_y)
        } else {
            (self.reserve_y, self.reserve_x)
        }
    }

    /// `reserve_x * reserve_y`, `None` on overflow
    pub fn product(&self) -> Option<u128> {
        self.reserve_x.checked_mul(self.reserve_y)
    }
}

/// One provider's claim on a pool, in the same unit as `total_shares`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderPosition {
    pub shares: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directional_reserves() {
        let pool = PoolState::new(100, 250, 1_000);
        assert_eq!(pool.directional_reserves(true), (100, 250));
        assert_eq!(pool.directional_reserves(false), (250, 100));
    }

    #[test]
    fn test_drained_and_product() {
        assert!(PoolState::default().is_drained());
        assert!(!PoolState::new(1, 1, 1).is_drained());
        assert_eq!(PoolState::new(1_000, 2_000, 1).product(), Some(2_000_000));
        assert_eq!(PoolState::new(u128::MAX, 2, 1).product(), None);
    }
}
