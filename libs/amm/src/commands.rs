//! Command arguments and success payloads for pool operations

use pairswap_types::{PairKey, PoolState, TokenId};
use serde::{Deserialize, Serialize};

/// Arguments of `add-liquidity`; amounts follow the caller's token order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddLiquidity {
    pub token_a: TokenId,
    pub token_b: TokenId,
    pub amount_a_desired: u128,
    pub amount_b_desired: u128,
    pub amount_a_min: u128,
    pub amount_b_min: u128,
    pub deadline: u64,
}

/// Arguments of `remove-liquidity`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveLiquidity {
    pub token_a: TokenId,
    pub token_b: TokenId,
    pub shares: u128,
    pub amount_a_min: u128,
    pub amount_b_min: u128,
    pub deadline: u64,
}

/// Arguments of an exact-input `swap`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapExactIn {
    pub token_in: TokenId,
    pub token_out: TokenId,
    pub amount_in: u128,
    pub amount_out_min: u128,
    pub deadline: u64,
}

/// Arguments of an exact-output swap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapExactOut {
    pub token_in: TokenId,
    pub token_out: TokenId,
    pub amount_out: u128,
    pub amount_in_max: u128,
    pub deadline: u64,
}

/// Result of `create-pool`, `add-liquidity` and `remove-liquidity`
///
/// Amounts are in canonical order; `shares` is minted or burned shares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityReceipt {
    pub pair: PairKey,
    pub amount_x: u128,
    pub amount_y: u128,
    pub shares: u128,
    /// The pool record did not exist before this call
    pub created: bool,
}

impl LiquidityReceipt {
    /// Amount moved for `token`, zero if it is not part of the pair
    pub fn amount_of(&self, token: &TokenId) -> u128 {
        if token == self.pair.token_x() {
            self.amount_x
        } else if token == self.pair.token_y() {
            self.amount_y
        } else {
            0
        }
    }
}

/// Result of either swap mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapReceipt {
    pub pair: PairKey,
    pub token_in: TokenId,
    pub token_out: TokenId,
    pub amount_in: u128,
    pub amount_out: u128,
    /// Pool record as committed
    pub pool: PoolState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_of_maps_tokens() {
        let x = TokenId::new("a");
        let y = TokenId::new("b");
        let receipt = LiquidityReceipt {
            pair: PairKey::new(&y, &x).unwrap(),
            amount_x: 5,
            amount_y: 9,
            shares: 1,
            created: false,
        };

        assert_eq!(receipt.amount_of(&x), 5);
        assert_eq!(receipt.amount_of(&y), 9);
        assert_eq!(receipt.amount_of(&TokenId::new("c")), 0);
    }
}
