//! Liquidity ledger: (pair, provider) -> share balance

use pairswap_types::{AccountId, PairKey, ProviderPosition};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

type PositionKey = (PairKey, AccountId);

/// Provider share balances
///
/// A missing entry reads as zero shares. Entries are zeroed, never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityLedger {
    #[serde(with = "position_entries")]
    positions: BTreeMap<PositionKey, ProviderPosition>,
}

impl LiquidityLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shares_of(&self, pair: &PairKey, provider: &AccountId) -> u128 {
        self.positions
            .get(&(pair.clone(), provider.clone()))
            .map(|position| position.shares)
            .unwrap_or(0)
    }

    pub fn set_shares(&mut self, pair: PairKey, provider: AccountId, shares: u128) {
        self.positions
            .insert((pair, provider), ProviderPosition { shares });
    }

    /// Providers with a recorded position in `pair`, zeroed ones included
    pub fn providers<'a>(
        &'a self,
        pair: &'a PairKey,
    ) -> impl Iterator<Item = (&'a AccountId, u128)> + 'a {
        self.positions
            .iter()
            .filter(move |((key, _), _)| key == pair)
            .map(|((_, provider), position)| (provider, position.shares))
    }

    /// Sum of all positions in `pair`; `None` on overflow
    pub fn total_for(&self, pair: &PairKey) -> Option<u128> {
        self.providers(pair)
            .try_fold(0u128, |sum, (_, shares)| sum.checked_add(shares))
    }
}

mod position_entries {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        positions: &BTreeMap<PositionKey, ProviderPosition>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(positions.iter())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<PositionKey, ProviderPosition>, D::Error> {
        let entries: Vec<(PositionKey, ProviderPosition)> = Vec::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairswap_types::TokenId;

    fn pair(a: &str, b: &str) -> PairKey {
        PairKey::new(&TokenId::new(a), &TokenId::new(b)).unwrap()
    }

    #[test]
    fn test_absent_position_is_zero() {
        let ledger = LiquidityLedger::new();
        assert_eq!(ledger.shares_of(&pair("a", "b"), &AccountId::new("alice")), 0);
        assert_eq!(ledger.total_for(&pair("a", "b")), Some(0));
    }

    #[test]
    fn test_totals_are_per_pair() {
        let mut ledger = LiquidityLedger::new();
        let ab = pair("a", "b");
        let cd = pair("c", "d");

        ledger.set_shares(ab.clone(), AccountId::new("alice"), 700);
        ledger.set_shares(ab.clone(), AccountId::new("bob"), 300);
        ledger.set_shares(cd.clone(), AccountId::new("alice"), 5);

        assert_eq!(ledger.total_for(&ab), Some(1_000));
        assert_eq!(ledger.total_for(&cd), Some(5));
        assert_eq!(ledger.shares_of(&ab, &AccountId::new("bob")), 300);
    }

    #[test]
    fn test_zeroed_position_is_kept() {
        let mut ledger = LiquidityLedger::new();
        let ab = pair("a", "b");
        ledger.set_shares(ab.clone(), AccountId::new("alice"), 10);
        ledger.set_shares(ab.clone(), AccountId::new("alice"), 0);

        let providers: Vec<_> = ledger.providers(&ab).collect();
        assert_eq!(providers, vec![(&AccountId::new("alice"), 0)]);
    }
}
