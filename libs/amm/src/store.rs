//! Store abstraction over the pool and position tables
//!
//! Operations read through [`PoolStore`] and hand back a [`StoreBatch`] with
//! every write they need. `apply` cannot fail, so a batch built after all
//! checks have passed lands in full.

use crate::ledger::LiquidityLedger;
use crate::registry::PoolRegistry;
use pairswap_types::{AccountId, PairKey, PoolState};
use serde::{Deserialize, Serialize};

/// Key-value access to pool records and provider positions
pub trait PoolStore {
    /// Pool record for a canonical pair
    fn pool(&self, key: &PairKey) -> Option<PoolState>;

    /// Provider shares in a pool, zero when absent
    fn shares(&self, key: &PairKey, provider: &AccountId) -> u128;

    /// All pool records in canonical key order
    fn pools(&self) -> Vec<(PairKey, PoolState)>;

    /// Commit the write set of one operation
    fn apply(&mut self, batch: StoreBatch);
}

/// Write set produced by one pool operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreBatch {
    pub pools: Vec<(PairKey, PoolState)>,
    pub positions: Vec<(PairKey, AccountId, u128)>,
}

impl StoreBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_pool(mut self, key: PairKey, pool: PoolState) -> Self {
        self.pools.push((key, pool));
        self
    }

    pub fn put_shares(mut self, key: PairKey, provider: AccountId, shares: u128) -> Self {
        self.positions.push((key, provider, shares));
        self
    }
}

/// [`PoolStore`] backed by an in-process registry and ledger
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InMemoryStore {
    registry: PoolRegistry,
    ledger: LiquidityLedger,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &PoolRegistry {
        &self.registry
    }

    pub fn ledger(&self) -> &LiquidityLedger {
        &self.ledger
    }
}

impl PoolStore for InMemoryStore {
    fn pool(&self, key: &PairKey) -> Option<PoolState> {
        self.registry.get(key)
    }

    fn shares(&self, key: &PairKey, provider: &AccountId) -> u128 {
        self.ledger.shares_of(key, provider)
    }

    fn pools(&self) -> Vec<(PairKey, PoolState)> {
        self.registry
            .iter()
            .map(|(key, pool)| (key.clone(), *pool))
            .collect()
    }

    fn apply(&mut self, batch: StoreBatch) {
        for (key, pool) in batch.pools {
            self.registry.upsert(key, pool);
        }
        for (key, provider, shares) in batch.positions {
            self.ledger.set_shares(key, provider, shares);
        }
    }
}
