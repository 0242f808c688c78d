//! Error taxonomy for pool operations
//!
//! Every failure is a precondition or invariant violation detected before any
//! state is touched, so none of these variants implies a partial commit.

use crate::identifiers::{AccountId, TokenId};
use thiserror::Error;

/// Failures reported by pool commands, queries and pricing functions
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmmError {
    /// Both sides of a pair name the same token
    #[error("pair uses the same token on both sides: {token}")]
    SameToken { token: TokenId },

    /// A required amount or share count is zero
    #[error("amount must be greater than zero")]
    ZeroAmount,

    /// `create-pool` on a pair that already has a record
    #[error("pool already exists for {token_x}/{token_y}")]
    PoolAlreadyExists { token_x: TokenId, token_y: TokenId },

    /// The pair has no pool record
    #[error("no pool for {token_x}/{token_y}")]
    PoolNotFound { token_x: TokenId, token_y: TokenId },

    /// The ledger height used for deadline checks is past the caller's deadline
    #[error("deadline {deadline} passed at height {height}")]
    DeadlinePassed { deadline: u64, height: u64 },

    /// A computed amount falls outside the caller's bound for `token`
    #[error("slippage exceeded for {token}: bound {bound}, actual {actual}")]
    SlippageExceeded {
        token: TokenId,
        bound: u128,
        actual: u128,
    },

    /// The caller holds fewer shares than requested
    #[error("insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: u128, available: u128 },

    /// The trade would consume all (or more) of the output reserve
    #[error("insufficient liquidity: requested {requested} of reserve {reserve}")]
    InsufficientLiquidity { requested: u128, reserve: u128 },

    /// The token transfer collaborator refused a transfer
    #[error("token transfer failed: {0}")]
    TransferFailed(#[from] TransferError),

    /// A formula hit a zero divisor (degenerate reserves)
    #[error("division by zero")]
    DivisionByZero,

    /// Overflow or underflow in unsigned arithmetic
    #[error("arithmetic overflow or underflow")]
    ArithmeticFault,
}

/// Failures reported by a token transfer collaborator
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransferError {
    /// Sender balance does not cover the transfer
    #[error("{account} holds {available} of {token}, needs {requested}")]
    InsufficientFunds {
        token: TokenId,
        account: AccountId,
        requested: u128,
        available: u128,
    },

    /// Zero-amount transfers are refused by the token
    #[error("zero-amount transfer of {token}")]
    ZeroAmount { token: TokenId },

    /// Sender and recipient are the same account
    #[error("{account} cannot transfer {token} to itself")]
    SelfTransfer { token: TokenId, account: AccountId },

    /// Any other refusal reported by the token
    #[error("transfer rejected: {0}")]
    Rejected(String),
}

/// Result alias for pool operations
pub type Result<T> = std::result::Result<T, AmmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_error_converts_into_amm_error() {
        let err: AmmError = TransferError::Rejected("paused".to_string()).into();
        assert_eq!(
            err,
            AmmError::TransferFailed(TransferError::Rejected("paused".to_string()))
        );
        assert_eq!(err.to_string(), "token transfer failed: transfer rejected: paused");
    }

    #[test]
    fn test_messages_carry_numbers() {
        let err = AmmError::DeadlinePassed {
            deadline: 10,
            height: 11,
        };
        assert_eq!(err.to_string(), "deadline 10 passed at height 11");

        let err = AmmError::InsufficientLiquidity {
            requested: 500,
            reserve: 500,
        };
        assert!(err.to_string().contains("500 of reserve 500"));
    }
}
