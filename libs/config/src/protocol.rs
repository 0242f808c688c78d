//! Protocol constants
//!
//! Values fixed by the pool accounting rules. They are global: no pool carries
//! its own fee or bootstrap share count.

/// Swap fee numerator (0.3% with [`FEE_DENOMINATOR`])
pub const FEE_NUMERATOR: u128 = 3;

/// Swap fee denominator
pub const FEE_DENOMINATOR: u128 = 1000;

/// Shares minted to the creator of a new pool, whatever the deposit size
pub const INITIAL_POOL_SHARES: u128 = 1_000_000_000;

/// Declared contract owner. Recorded and exposed, never used for access control.
pub const CONTRACT_OWNER: &str = "SP000000000000000000002Q6VF78";

/// Account holding pool reserves when no custody account is configured
pub const DEFAULT_CUSTODY_ACCOUNT: &str = "SP000000000000000000002Q6VF78.pairswap-pool";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_is_thirty_basis_points() {
        assert_eq!(FEE_NUMERATOR * 10_000 / FEE_DENOMINATOR, 30);
        assert!(FEE_NUMERATOR < FEE_DENOMINATOR);
    }
}
