//! Read-only swap analytics
//!
//! Integer pricing decides what a trade settles at; this module reports the
//! same trade as decimal prices for display and slippage estimates. Values
//! above the `Decimal` mantissa range (about 7.9e28) are rejected.

use crate::pricing::PricingEngine;
use pairswap_types::{AmmError, Result};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Expected outcome of an exact-input swap against given reserves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapPreview {
    pub amount_in: u128,
    pub amount_out: u128,
    /// Output per unit of input before the trade
    pub spot_price: Decimal,
    /// Output per unit of input actually received, fee included
    pub execution_price: Decimal,
    /// Move of the spot price caused by the trade, in percent
    pub price_impact_pct: Decimal,
}

/// Decimal analytics over integer pool math
pub struct SwapAnalytics;

impl SwapAnalytics {
    /// Preview an exact-input swap
    pub fn preview(
        amount_in: u128,
        reserve_in: u128,
        reserve_out: u128,
        fee_num: u128,
        fee_den: u128,
    ) -> Result<SwapPreview> {
        if amount_in == 0 {
            return Err(AmmError::ZeroAmount);
        }
        if reserve_in == 0 || reserve_out == 0 {
            return Err(AmmError::DivisionByZero);
        }

        let amount_out =
            PricingEngine::amount_out(amount_in, reserve_in, reserve_out, fee_num, fee_den)?;

        let spot_price = ratio(reserve_out, reserve_in)?;
        let execution_price = ratio(amount_out, amount_in)?;

        let reserve_in_after = reserve_in
            .checked_add(amount_in)
            .ok_or(AmmError::ArithmeticFault)?;
        let reserve_out_after = reserve_out
            .checked_sub(amount_out)
            .ok_or(AmmError::ArithmeticFault)?;
        let price_after = ratio(reserve_out_after, reserve_in_after)?;

        let price_impact_pct = (spot_price - price_after)
            .abs()
            .checked_div(spot_price)
            .ok_or(AmmError::DivisionByZero)?
            * dec!(100);

        Ok(SwapPreview {
            amount_in,
            amount_out,
            spot_price,
            execution_price,
            price_impact_pct,
        })
    }

    /// Shortfall of the execution price against the spot price, in percent
    pub fn slippage_pct(preview: &SwapPreview) -> Decimal {
        if preview.spot_price.is_zero() {
            return Decimal::ZERO;
        }
        (preview.spot_price - preview.execution_price) / preview.spot_price * dec!(100)
    }
}

fn to_decimal(value: u128) -> Result<Decimal> {
    Decimal::from_u128(value).ok_or(AmmError::ArithmeticFault)
}

fn ratio(numerator: u128, denominator: u128) -> Result<Decimal> {
    to_decimal(numerator)?
        .checked_div(to_decimal(denominator)?)
        .ok_or(AmmError::DivisionByZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_matches_integer_pricing() {
        let preview = SwapAnalytics::preview(100_000, 1_000_000, 2_000_000, 3, 1000).unwrap();

        assert_eq!(preview.amount_out, 181_322);
        assert_eq!(preview.spot_price, dec!(2));
        assert_eq!(preview.execution_price, dec!(1.81322));
        // 10% of the input reserve moves the price noticeably but not absurdly
        assert!(preview.price_impact_pct > dec!(15));
        assert!(preview.price_impact_pct < dec!(20));
    }

    #[test]
    fn test_slippage_includes_fee() {
        let preview = SwapAnalytics::preview(100, 1_000_000_000, 1_000_000_000, 3, 1000).unwrap();
        let slippage = SwapAnalytics::slippage_pct(&preview);

        // tiny trade: slippage is roughly the 0.3% fee plus truncation
        assert!(slippage >= dec!(0.3));
        assert!(slippage < dec!(2));
    }

    #[test]
    fn test_preview_rejects_empty_pool() {
        assert_eq!(
            SwapAnalytics::preview(10, 0, 0, 3, 1000),
            Err(AmmError::DivisionByZero)
        );
        assert_eq!(
            SwapAnalytics::preview(0, 10, 10, 3, 1000),
            Err(AmmError::ZeroAmount)
        );
    }
}
