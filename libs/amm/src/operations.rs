//! Pool operations: create, add, remove, swap
//!
//! Every command runs in two phases. The `plan_*` phase reads the store,
//! validates, and computes a [`Commit`] (store writes plus token transfers)
//! without touching anything. Only a fully computed plan reaches `execute`,
//! which settles the transfers as one batch and then applies the writes. A
//! failure in either phase leaves pools, positions and balances unchanged.

use crate::analytics::{SwapAnalytics, SwapPreview};
use crate::commands::{
    AddLiquidity, LiquidityReceipt, RemoveLiquidity, SwapExactIn, SwapExactOut, SwapReceipt,
};
use crate::gateway::{InMemoryTokenLedger, TokenGateway, Transfer};
use crate::height::{deadline_height, HeightOracle, ManualHeightOracle};
use crate::pricing::PricingEngine;
use crate::store::{InMemoryStore, PoolStore, StoreBatch};
use pairswap_config::protocol::{FEE_DENOMINATOR, FEE_NUMERATOR, INITIAL_POOL_SHARES};
use pairswap_config::LedgerSettings;
use pairswap_types::{AccountId, AmmError, CanonicalPair, PairKey, PoolState, Result, TokenId};
use std::fmt::Debug;
use tracing::{debug, info, instrument};

/// Writes and transfers of one command
struct Commit {
    batch: StoreBatch,
    transfers: Vec<Transfer>,
}

/// Resolved trade ready to be turned into a commit
struct Trade<'a> {
    key: &'a PairKey,
    token_in: &'a TokenId,
    token_out: &'a TokenId,
    x_to_y: bool,
    amount_in: u128,
    amount_out: u128,
}

/// Pool accounting engine over an injected store and collaborators
///
/// Holds no pool state of its own: each call re-reads the store and commits
/// a complete write set. Calls take `&mut self`, so one engine value
/// processes one command at a time.
pub struct PoolOperations<S, G, H> {
    store: S,
    gateway: G,
    heights: H,
    custody: AccountId,
    owner: AccountId,
}

/// Engine wired to the in-process store, token ledger and height oracle
pub type InMemoryPoolOperations =
    PoolOperations<InMemoryStore, InMemoryTokenLedger, ManualHeightOracle>;

impl InMemoryPoolOperations {
    pub fn in_memory(settings: &LedgerSettings) -> Self {
        Self::from_settings(
            settings,
            InMemoryStore::new(),
            InMemoryTokenLedger::new(),
            ManualHeightOracle::new(settings.start_height),
        )
    }
}

impl<S: PoolStore, G: TokenGateway, H: HeightOracle> PoolOperations<S, G, H> {
    pub fn new(store: S, gateway: G, heights: H, custody: AccountId, owner: AccountId) -> Self {
        Self {
            store,
            gateway,
            heights,
            custody,
            owner,
        }
    }

    pub fn from_settings(settings: &LedgerSettings, store: S, gateway: G, heights: H) -> Self {
        Self::new(
            store,
            gateway,
            heights,
            AccountId::new(settings.custody_account.clone()),
            AccountId::new(settings.owner.clone()),
        )
    }

    /// Declared owner. No operation checks it.
    pub fn owner(&self) -> &AccountId {
        &self.owner
    }

    /// Account holding all pool reserves
    pub fn custody(&self) -> &AccountId {
        &self.custody
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn gateway_mut(&mut self) -> &mut G {
        &mut self.gateway
    }

    pub fn heights(&self) -> &H {
        &self.heights
    }

    pub fn heights_mut(&mut self) -> &mut H {
        &mut self.heights
    }

    // ----- commands -----

    /// Create a pool for a new pair, minting the fixed bootstrap share count to `caller`
    #[instrument(level = "debug", skip(self))]
    pub fn create_pool(
        &mut self,
        caller: &AccountId,
        token_a: &TokenId,
        token_b: &TokenId,
        amount_a: u128,
        amount_b: u128,
    ) -> Result<LiquidityReceipt> {
        let plan = CanonicalPair::resolve(token_a, token_b).and_then(|pair| {
            let (amount_x, amount_y) = pair.to_canonical(amount_a, amount_b);
            self.plan_create(caller, pair.key(), amount_x, amount_y)
        });
        self.run("create-pool", plan)
    }

    /// Add liquidity at the current reserve ratio, creating the pool if needed
    #[instrument(level = "debug", skip(self))]
    pub fn add_liquidity(
        &mut self,
        caller: &AccountId,
        request: &AddLiquidity,
    ) -> Result<LiquidityReceipt> {
        let plan = self.plan_add(caller, request);
        self.run("add-liquidity", plan)
    }

    /// Burn `shares` and withdraw the proportional reserves
    #[instrument(level = "debug", skip(self))]
    pub fn remove_liquidity(
        &mut self,
        caller: &AccountId,
        request: &RemoveLiquidity,
    ) -> Result<LiquidityReceipt> {
        let plan = self.plan_remove(caller, request);
        self.run("remove-liquidity", plan)
    }

    /// Sell exactly `amount_in` of `token_in`
    #[instrument(level = "debug", skip(self))]
    pub fn swap(&mut self, caller: &AccountId, request: &SwapExactIn) -> Result<SwapReceipt> {
        let plan = self.plan_swap_exact_in(caller, request);
        self.run("swap", plan)
    }

    /// Buy exactly `amount_out` of `token_out`
    #[instrument(level = "debug", skip(self))]
    pub fn swap_exact_out(
        &mut self,
        caller: &AccountId,
        request: &SwapExactOut,
    ) -> Result<SwapReceipt> {
        let plan = self.plan_swap_exact_out(caller, request);
        self.run("swap-exact-out", plan)
    }

    // ----- queries -----

    /// Pool record for the pair in either order
    pub fn get_pool_details(&self, token_a: &TokenId, token_b: &TokenId) -> Option<PoolState> {
        PairKey::new(token_a, token_b)
            .ok()
            .and_then(|key| self.store.pool(&key))
    }

    /// Shares `provider` holds in the pair's pool, zero when absent
    pub fn get_provider_shares(
        &self,
        token_a: &TokenId,
        token_b: &TokenId,
        provider: &AccountId,
    ) -> u128 {
        PairKey::new(token_a, token_b)
            .map(|key| self.store.shares(&key, provider))
            .unwrap_or(0)
    }

    /// Exact-input pricing at the protocol fee
    pub fn get_amount_out(
        &self,
        amount_in: u128,
        reserve_in: u128,
        reserve_out: u128,
    ) -> Result<u128> {
        PricingEngine::amount_out(
            amount_in,
            reserve_in,
            reserve_out,
            FEE_NUMERATOR,
            FEE_DENOMINATOR,
        )
    }

    /// Exact-output pricing at the protocol fee, rounded up
    pub fn get_amount_in(
        &self,
        amount_out: u128,
        reserve_in: u128,
        reserve_out: u128,
    ) -> Result<u128> {
        PricingEngine::amount_in(
            amount_out,
            reserve_in,
            reserve_out,
            FEE_NUMERATOR,
            FEE_DENOMINATOR,
        )
    }

    pub fn quote(&self, amount_a: u128, reserve_a: u128, reserve_b: u128) -> Result<u128> {
        PricingEngine::quote(amount_a, reserve_a, reserve_b)
    }

    /// Decimal preview of an exact-input swap against the live reserves
    pub fn preview_swap(
        &self,
        token_in: &TokenId,
        token_out: &TokenId,
        amount_in: u128,
    ) -> Result<SwapPreview> {
        let pair = CanonicalPair::resolve(token_in, token_out)?;
        let pool = self.existing_pool(pair.key())?;
        let (reserve_in, reserve_out) = pool.directional_reserves(token_in == pair.key().token_x());
        SwapAnalytics::preview(amount_in, reserve_in, reserve_out, FEE_NUMERATOR, FEE_DENOMINATOR)
    }

    pub fn list_pools(&self) -> Vec<(PairKey, PoolState)> {
        self.store.pools()
    }

    // ----- planning -----

    fn plan_create(
        &self,
        caller: &AccountId,
        key: &PairKey,
        amount_x: u128,
        amount_y: u128,
    ) -> Result<(Commit, LiquidityReceipt)> {
        if amount_x == 0 || amount_y == 0 {
            return Err(AmmError::ZeroAmount);
        }
        if self.store.pool(key).is_some() {
            return Err(AmmError::PoolAlreadyExists {
                token_x: key.token_x().clone(),
                token_y: key.token_y().clone(),
            });
        }

        let pool = PoolState::new(amount_x, amount_y, INITIAL_POOL_SHARES);
        let commit = Commit {
            batch: StoreBatch::new()
                .put_pool(key.clone(), pool)
                .put_shares(key.clone(), caller.clone(), INITIAL_POOL_SHARES),
            transfers: self.deposits(caller, key, amount_x, amount_y),
        };

        Ok((
            commit,
            LiquidityReceipt {
                pair: key.clone(),
                amount_x,
                amount_y,
                shares: INITIAL_POOL_SHARES,
                created: true,
            },
        ))
    }

    fn plan_add(
        &self,
        caller: &AccountId,
        request: &AddLiquidity,
    ) -> Result<(Commit, LiquidityReceipt)> {
        let pair = CanonicalPair::resolve(&request.token_a, &request.token_b)?;
        let (desired_x, desired_y) =
            pair.to_canonical(request.amount_a_desired, request.amount_b_desired);
        let (min_x, min_y) = pair.to_canonical(request.amount_a_min, request.amount_b_min);
        if desired_x == 0 || desired_y == 0 {
            return Err(AmmError::ZeroAmount);
        }

        // a missing pool is created outright: no deadline, no minimums
        let key = pair.key();
        let Some(pool) = self.store.pool(key) else {
            return self.plan_create(caller, key, desired_x, desired_y);
        };
        self.check_deadline(request.deadline)?;

        let (amount_x, amount_y) = if pool.is_drained() {
            (desired_x, desired_y)
        } else {
            (
                desired_x.min(PricingEngine::quote(desired_y, pool.reserve_y, pool.reserve_x)?),
                desired_y.min(PricingEngine::quote(desired_x, pool.reserve_x, pool.reserve_y)?),
            )
        };
        check_minimum(key.token_x(), min_x, amount_x)?;
        check_minimum(key.token_y(), min_y, amount_y)?;

        let shares = if pool.is_drained() {
            PricingEngine::geometric_mean_shares(amount_x, amount_y)?
        } else {
            PricingEngine::proportional_shares(
                amount_x,
                amount_y,
                pool.reserve_x,
                pool.reserve_y,
                pool.total_shares,
            )?
        };
        if shares == 0 {
            return Err(AmmError::ZeroAmount);
        }

        let updated = PoolState::new(
            add(pool.reserve_x, amount_x)?,
            add(pool.reserve_y, amount_y)?,
            add(pool.total_shares, shares)?,
        );
        let position = add(self.store.shares(key, caller), shares)?;

        let commit = Commit {
            batch: StoreBatch::new()
                .put_pool(key.clone(), updated)
                .put_shares(key.clone(), caller.clone(), position),
            transfers: self.deposits(caller, key, amount_x, amount_y),
        };

        Ok((
            commit,
            LiquidityReceipt {
                pair: key.clone(),
                amount_x,
                amount_y,
                shares,
                created: false,
            },
        ))
    }

    fn plan_remove(
        &self,
        caller: &AccountId,
        request: &RemoveLiquidity,
    ) -> Result<(Commit, LiquidityReceipt)> {
        self.check_deadline(request.deadline)?;

        let pair = CanonicalPair::resolve(&request.token_a, &request.token_b)?;
        if request.shares == 0 {
            return Err(AmmError::ZeroAmount);
        }

        let key = pair.key();
        let pool = self.existing_pool(key)?;

        let held = self.store.shares(key, caller);
        if held < request.shares {
            return Err(AmmError::InsufficientBalance {
                requested: request.shares,
                available: held,
            });
        }

        let (amount_x, amount_y) = PricingEngine::withdrawal_amounts(
            request.shares,
            pool.reserve_x,
            pool.reserve_y,
            pool.total_shares,
        )?;
        let (min_x, min_y) = pair.to_canonical(request.amount_a_min, request.amount_b_min);
        check_minimum(key.token_x(), min_x, amount_x)?;
        check_minimum(key.token_y(), min_y, amount_y)?;

        let updated = PoolState::new(
            sub(pool.reserve_x, amount_x)?,
            sub(pool.reserve_y, amount_y)?,
            sub(pool.total_shares, request.shares)?,
        );

        let commit = Commit {
            batch: StoreBatch::new()
                .put_pool(key.clone(), updated)
                .put_shares(key.clone(), caller.clone(), held - request.shares),
            transfers: vec![
                Transfer::new(key.token_x(), amount_x, &self.custody, caller),
                Transfer::new(key.token_y(), amount_y, &self.custody, caller),
            ],
        };

        Ok((
            commit,
            LiquidityReceipt {
                pair: key.clone(),
                amount_x,
                amount_y,
                shares: request.shares,
                created: false,
            },
        ))
    }

    fn plan_swap_exact_in(
        &self,
        caller: &AccountId,
        request: &SwapExactIn,
    ) -> Result<(Commit, SwapReceipt)> {
        self.check_deadline(request.deadline)?;

        let pair = CanonicalPair::resolve(&request.token_in, &request.token_out)?;
        if request.amount_in == 0 {
            return Err(AmmError::ZeroAmount);
        }

        let key = pair.key();
        let pool = self.existing_pool(key)?;
        let x_to_y = &request.token_in == key.token_x();
        let (reserve_in, reserve_out) = pool.directional_reserves(x_to_y);

        let amount_out = PricingEngine::amount_out(
            request.amount_in,
            reserve_in,
            reserve_out,
            FEE_NUMERATOR,
            FEE_DENOMINATOR,
        )?;
        if amount_out < request.amount_out_min {
            return Err(AmmError::SlippageExceeded {
                token: request.token_out.clone(),
                bound: request.amount_out_min,
                actual: amount_out,
            });
        }
        if amount_out >= reserve_out {
            return Err(AmmError::InsufficientLiquidity {
                requested: amount_out,
                reserve: reserve_out,
            });
        }

        self.plan_trade(
            caller,
            pool,
            Trade {
                key,
                token_in: &request.token_in,
                token_out: &request.token_out,
                x_to_y,
                amount_in: request.amount_in,
                amount_out,
            },
        )
    }

    fn plan_swap_exact_out(
        &self,
        caller: &AccountId,
        request: &SwapExactOut,
    ) -> Result<(Commit, SwapReceipt)> {
        self.check_deadline(request.deadline)?;

        let pair = CanonicalPair::resolve(&request.token_in, &request.token_out)?;
        if request.amount_out == 0 {
            return Err(AmmError::ZeroAmount);
        }

        let key = pair.key();
        let pool = self.existing_pool(key)?;
        let x_to_y = &request.token_in == key.token_x();
        let (reserve_in, reserve_out) = pool.directional_reserves(x_to_y);

        let amount_in = PricingEngine::amount_in(
            request.amount_out,
            reserve_in,
            reserve_out,
            FEE_NUMERATOR,
            FEE_DENOMINATOR,
        )?;
        if amount_in > request.amount_in_max {
            return Err(AmmError::SlippageExceeded {
                token: request.token_in.clone(),
                bound: request.amount_in_max,
                actual: amount_in,
            });
        }

        self.plan_trade(
            caller,
            pool,
            Trade {
                key,
                token_in: &request.token_in,
                token_out: &request.token_out,
                x_to_y,
                amount_in,
                amount_out: request.amount_out,
            },
        )
    }

    fn plan_trade(
        &self,
        caller: &AccountId,
        pool: PoolState,
        trade: Trade<'_>,
    ) -> Result<(Commit, SwapReceipt)> {
        let updated = if trade.x_to_y {
            PoolState::new(
                add(pool.reserve_x, trade.amount_in)?,
                sub(pool.reserve_y, trade.amount_out)?,
                pool.total_shares,
            )
        } else {
            PoolState::new(
                sub(pool.reserve_x, trade.amount_out)?,
                add(pool.reserve_y, trade.amount_in)?,
                pool.total_shares,
            )
        };

        let commit = Commit {
            batch: StoreBatch::new().put_pool(trade.key.clone(), updated),
            transfers: vec![
                Transfer::new(trade.token_in, trade.amount_in, caller, &self.custody),
                Transfer::new(trade.token_out, trade.amount_out, &self.custody, caller),
            ],
        };

        Ok((
            commit,
            SwapReceipt {
                pair: trade.key.clone(),
                token_in: trade.token_in.clone(),
                token_out: trade.token_out.clone(),
                amount_in: trade.amount_in,
                amount_out: trade.amount_out,
                pool: updated,
            },
        ))
    }

    // ----- execution -----

    fn run<R: Debug>(&mut self, operation: &'static str, plan: Result<(Commit, R)>) -> Result<R> {
        let outcome = plan.and_then(|(commit, receipt)| {
            self.execute(commit)?;
            Ok(receipt)
        });

        match &outcome {
            Ok(receipt) => info!(operation, ?receipt, "committed"),
            Err(err) => debug!(operation, %err, "rejected"),
        }
        outcome
    }

    fn execute(&mut self, commit: Commit) -> Result<()> {
        self.gateway.settle(&commit.transfers)?;
        self.store.apply(commit.batch);
        Ok(())
    }

    fn check_deadline(&self, deadline: u64) -> Result<()> {
        let height = deadline_height(&self.heights);
        if height > deadline {
            return Err(AmmError::DeadlinePassed { deadline, height });
        }
        Ok(())
    }

    fn existing_pool(&self, key: &PairKey) -> Result<PoolState> {
        self.store.pool(key).ok_or_else(|| AmmError::PoolNotFound {
            token_x: key.token_x().clone(),
            token_y: key.token_y().clone(),
        })
    }

    fn deposits(
        &self,
        caller: &AccountId,
        key: &PairKey,
        amount_x: u128,
        amount_y: u128,
    ) -> Vec<Transfer> {
        vec![
            Transfer::new(key.token_x(), amount_x, caller, &self.custody),
            Transfer::new(key.token_y(), amount_y, caller, &self.custody),
        ]
    }
}

fn check_minimum(token: &TokenId, minimum: u128, actual: u128) -> Result<()> {
    if actual < minimum {
        return Err(AmmError::SlippageExceeded {
            token: token.clone(),
            bound: minimum,
            actual,
        });
    }
    Ok(())
}

fn add(a: u128, b: u128) -> Result<u128> {
    a.checked_add(b).ok_or(AmmError::ArithmeticFault)
}

fn sub(a: u128, b: u128) -> Result<u128> {
    a.checked_sub(b).ok_or(AmmError::ArithmeticFault)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_at(height: u64) -> InMemoryPoolOperations {
        let settings = LedgerSettings {
            start_height: height,
            ..LedgerSettings::default()
        };
        InMemoryPoolOperations::in_memory(&settings)
    }

    #[test]
    fn test_deadline_zero_is_live_at_genesis() {
        let ops = engine_at(0);
        assert!(ops.check_deadline(0).is_ok());

        let ops = engine_at(1);
        assert!(ops.check_deadline(0).is_ok());

        let ops = engine_at(2);
        assert_eq!(
            ops.check_deadline(0),
            Err(AmmError::DeadlinePassed {
                deadline: 0,
                height: 1
            })
        );
    }

    #[test]
    fn test_identities_come_from_settings() {
        let settings = LedgerSettings::default();
        let ops = InMemoryPoolOperations::in_memory(&settings);

        assert_eq!(ops.owner().as_str(), settings.owner);
        assert_eq!(ops.custody().as_str(), settings.custody_account);
        assert!(ops.list_pools().is_empty());
    }

    #[test]
    fn test_check_minimum_reports_token() {
        let token = TokenId::new("SP0.usd");
        assert!(check_minimum(&token, 10, 10).is_ok());
        assert_eq!(
            check_minimum(&token, 11, 10),
            Err(AmmError::SlippageExceeded {
                token,
                bound: 11,
                actual: 10
            })
        );
    }

    #[test]
    fn test_plan_leaves_store_untouched() {
        let mut ops = engine_at(1);
        let caller = AccountId::new("SP1ALICE");
        let key = PairKey::new(&TokenId::new("a"), &TokenId::new("b")).unwrap();

        let (commit, receipt) = ops.plan_create(&caller, &key, 10, 20).unwrap();
        assert!(receipt.created);
        assert_eq!(commit.transfers.len(), 2);
        assert!(ops.list_pools().is_empty());

        ops.gateway_mut().mint(key.token_x(), &caller, 10).unwrap();
        ops.gateway_mut().mint(key.token_y(), &caller, 20).unwrap();
        ops.execute(commit).unwrap();
        assert_eq!(
            ops.get_pool_details(key.token_y(), key.token_x()),
            Some(PoolState::new(10, 20, INITIAL_POOL_SHARES))
        );
    }
}
