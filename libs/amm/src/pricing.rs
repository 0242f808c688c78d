//! Constant-product pricing with exact integer arithmetic
//!
//! All formulas work on `u128` with truncating division. Products are checked:
//! an overflow is reported as [`AmmError::ArithmeticFault`] rather than
//! wrapping, and a zero divisor as [`AmmError::DivisionByZero`].

use integer_sqrt::IntegerSquareRoot;
use pairswap_types::{AmmError, Result};

/// Stateless pool pricing functions
pub struct PricingEngine;

impl PricingEngine {
    /// Proportional quote: `floor(amount_a * reserve_b / reserve_a)`
    ///
    /// No fee is applied. Used to size liquidity contributions, not trades.
    pub fn quote(amount_a: u128, reserve_a: u128, reserve_b: u128) -> Result<u128> {
        mul_div(amount_a, reserve_b, reserve_a)
    }

    /// Output for an exact input, fee taken on the input side
    ///
    /// # Arguments
    /// * `amount_in` - Input token amount
    /// * `reserve_in` - Input token reserve
    /// * `reserve_out` - Output token reserve
    /// * `fee_num` / `fee_den` - Fee fraction (3 / 1000 = 0.3%)
    ///
    /// # Returns
    /// `floor(eff * reserve_out / (reserve_in * fee_den + eff))` with
    /// `eff = amount_in * (fee_den - fee_num)`. The fee stays in the pool, so
    /// the reserve product never decreases.
    pub fn amount_out(
        amount_in: u128,
        reserve_in: u128,
        reserve_out: u128,
        fee_num: u128,
        fee_den: u128,
    ) -> Result<u128> {
        let effective_in = checked_mul(amount_in, fee_multiplier(fee_num, fee_den)?)?;
        let numerator = checked_mul(effective_in, reserve_out)?;
        let denominator = checked_mul(reserve_in, fee_den)?
            .checked_add(effective_in)
            .ok_or(AmmError::ArithmeticFault)?;

        if denominator == 0 {
            return Err(AmmError::DivisionByZero);
        }

        Ok(numerator / denominator)
    }

    /// Input required for an exact output, rounded up
    ///
    /// The `+ 1` after floor division guarantees the returned input always
    /// produces at least `amount_out` through [`PricingEngine::amount_out`].
    /// Fails with [`AmmError::InsufficientLiquidity`] when
    /// `amount_out >= reserve_out`.
    pub fn amount_in(
        amount_out: u128,
        reserve_in: u128,
        reserve_out: u128,
        fee_num: u128,
        fee_den: u128,
    ) -> Result<u128> {
        if amount_out >= reserve_out {
            return Err(AmmError::InsufficientLiquidity {
                requested: amount_out,
                reserve: reserve_out,
            });
        }

        let numerator = checked_mul(checked_mul(amount_out, reserve_in)?, fee_den)?;
        let denominator = checked_mul(reserve_out - amount_out, fee_multiplier(fee_num, fee_den)?)?;

        if denominator == 0 {
            return Err(AmmError::DivisionByZero);
        }

        (numerator / denominator)
            .checked_add(1)
            .ok_or(AmmError::ArithmeticFault)
    }

    /// Shares for the first liquidity into an empty pool: `floor(sqrt(x * y))`
    pub fn geometric_mean_shares(amount_x: u128, amount_y: u128) -> Result<u128> {
        Ok(checked_mul(amount_x, amount_y)?.integer_sqrt())
    }

    /// Shares for a contribution to a funded pool
    ///
    /// The smaller of the two proportional claims, so new shares never exceed
    /// the contributor's fraction of either reserve.
    pub fn proportional_shares(
        amount_x: u128,
        amount_y: u128,
        reserve_x: u128,
        reserve_y: u128,
        total_shares: u128,
    ) -> Result<u128> {
        let by_x = mul_div(amount_x, total_shares, reserve_x)?;
        let by_y = mul_div(amount_y, total_shares, reserve_y)?;
        Ok(by_x.min(by_y))
    }

    /// Reserve amounts redeemed by `shares` of `total_shares`
    pub fn withdrawal_amounts(
        shares: u128,
        reserve_x: u128,
        reserve_y: u128,
        total_shares: u128,
    ) -> Result<(u128, u128)> {
        Ok((
            mul_div(shares, reserve_x, total_shares)?,
            mul_div(shares, reserve_y, total_shares)?,
        ))
    }
}

/// `floor(a * b / c)` with overflow and zero-divisor checks
pub(crate) fn mul_div(a: u128, b: u128, c: u128) -> Result<u128> {
    if c == 0 {
        return Err(AmmError::DivisionByZero);
    }
    Ok(checked_mul(a, b)? / c)
}

fn checked_mul(a: u128, b: u128) -> Result<u128> {
    a.checked_mul(b).ok_or(AmmError::ArithmeticFault)
}

fn fee_multiplier(fee_num: u128, fee_den: u128) -> Result<u128> {
    fee_den.checked_sub(fee_num).ok_or(AmmError::ArithmeticFault)
}
