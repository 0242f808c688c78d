//! Pool registry: canonical pair -> pool record

use pairswap_types::{PairKey, PoolState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pool records keyed by canonical pair
///
/// Records are never removed; a drained pool keeps its key with zero reserves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolRegistry {
    #[serde(with = "pool_entries")]
    pools: BTreeMap<PairKey, PoolState>,
}

impl PoolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &PairKey) -> Option<PoolState> {
        self.pools.get(key).copied()
    }

    /// Insert or replace the record for `key`
    pub fn upsert(&mut self, key: PairKey, pool: PoolState) {
        self.pools.insert(key, pool);
    }

    /// Records in canonical key order
    pub fn iter(&self) -> impl Iterator<Item = (&PairKey, &PoolState)> {
        self.pools.iter()
    }
}

/// Struct keys are not valid JSON object keys, so the map is stored as a list of entries
mod pool_entries {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        pools: &BTreeMap<PairKey, PoolState>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(pools.iter())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<PairKey, PoolState>, D::Error> {
        let entries: Vec<(PairKey, PoolState)> = Vec::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairswap_types::TokenId;

    fn key(a: &str, b: &str) -> PairKey {
        PairKey::new(&TokenId::new(a), &TokenId::new(b)).unwrap()
    }

    #[test]
    fn test_upsert_and_get() {
        let mut registry = PoolRegistry::new();
        assert_eq!(registry.get(&key("a", "b")), None);

        registry.upsert(key("b", "a"), PoolState::new(10, 20, 30));
        assert_eq!(registry.get(&key("a", "b")), Some(PoolState::new(10, 20, 30)));

        registry.upsert(key("a", "b"), PoolState::default());
        assert_eq!(registry.iter().count(), 1);
        assert_eq!(registry.get(&key("a", "b")), Some(PoolState::default()));
    }

    #[test]
    fn test_iteration_in_key_order() {
        let mut registry = PoolRegistry::new();
        registry.upsert(key("m", "z"), PoolState::new(1, 1, 1));
        registry.upsert(key("a", "c"), PoolState::new(2, 2, 2));

        let keys: Vec<String> = registry.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["a/c", "m/z"]);
    }

    #[test]
    fn test_json_snapshot_round_trip() {
        let mut registry = PoolRegistry::new();
        registry.upsert(key("a", "b"), PoolState::new(5, 6, 7));

        let json = serde_json::to_string(&registry).unwrap();
        let back: PoolRegistry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, registry);
    }
}
