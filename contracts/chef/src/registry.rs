//! Append-only pool registry.
//!
//! Pools live in persistent storage under `(POOL, id)` with dense ids handed
//! out from `POOL_CNT`. Each staked asset maps back to the pool that owns it
//! under `(STK_ASSET, asset)`, which is what keeps an asset bound to at most
//! one pool. The sum of all allocation weights is kept in `TOT_ALLOC`.

use common::{LedgerError, PoolInfo};
use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::accrual;

// ── Storage keys ─────────────────────────────────────────────────────────────

const POOL_COUNT: Symbol = symbol_short!("POOL_CNT");
const TOTAL_ALLOC: Symbol = symbol_short!("TOT_ALLOC");
const POOL: Symbol = symbol_short!("POOL");
const STAKED_ASSET: Symbol = symbol_short!("STK_ASSET");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

/// Upper bound on registered pools. Rate changes rewrite every pool in one
/// call, so the count must stay within a single invocation's footprint.
pub const MAX_POOLS: u32 = 32;

// ── Storage helpers ──────────────────────────────────────────────────────────

fn pool_key(pool_id: u32) -> (Symbol, u32) {
    (POOL, pool_id)
}

fn staked_asset_key(asset: &Address) -> (Symbol, Address) {
    (STAKED_ASSET, asset.clone())
}

pub fn pool_count(env: &Env) -> u32 {
    env.storage().instance().get(&POOL_COUNT).unwrap_or(0)
}

pub fn total_alloc_weight(env: &Env) -> u64 {
    env.storage().instance().get(&TOTAL_ALLOC).unwrap_or(0)
}

fn set_total_alloc_weight(env: &Env, total: u64) {
    env.storage().instance().set(&TOTAL_ALLOC, &total);
}

/// Loads a pool, failing with `PoolNotFound` for ids past the end.
pub fn load_pool(env: &Env, pool_id: u32) -> Result<PoolInfo, LedgerError> {
    if pool_id >= pool_count(env) {
        return Err(LedgerError::PoolNotFound);
    }
    let key = pool_key(pool_id);
    let pool: PoolInfo = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(LedgerError::PoolNotFound)?;
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    Ok(pool)
}

pub fn save_pool(env: &Env, pool_id: u32, pool: &PoolInfo) {
    let key = pool_key(pool_id);
    env.storage().persistent().set(&key, pool);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Pool id bound to `asset`, if any.
pub fn pool_of(env: &Env, asset: &Address) -> Option<u32> {
    env.storage().persistent().get(&staked_asset_key(asset))
}

// ── Registry operations ──────────────────────────────────────────────────────

/// Appends a new pool and returns its id.
///
/// The caller must have checked the owner role.
pub fn add(
    env: &Env,
    alloc_weight: u64,
    staked_token: &Address,
    rewarder: Option<Address>,
) -> Result<u32, LedgerError> {
    if pool_of(env, staked_token).is_some() {
        return Err(LedgerError::DuplicateStakedAsset);
    }

    let total = total_alloc_weight(env)
        .checked_add(alloc_weight)
        .ok_or(LedgerError::Overflow)?;
    let pool_id = pool_count(env);
    if pool_id >= MAX_POOLS {
        return Err(LedgerError::PoolLimitReached);
    }
    let next_count = pool_id + 1;

    let pool = PoolInfo {
        staked_token: staked_token.clone(),
        alloc_weight,
        last_accrual_epoch: accrual::current_epoch(env),
        acc_reward_per_share: 0,
        total_staked: 0,
        rewarder,
    };

    set_total_alloc_weight(env, total);
    env.storage().instance().set(&POOL_COUNT, &next_count);
    save_pool(env, pool_id, &pool);

    let asset_key = staked_asset_key(staked_token);
    env.storage().persistent().set(&asset_key, &pool_id);
    env.storage()
        .persistent()
        .extend_ttl(&asset_key, TTL_THRESHOLD, TTL_EXTEND_TO);

    Ok(pool_id)
}

/// Re-weights a pool and, when `overwrite` is set, rebinds its rewarder.
/// Returns the updated pool.
///
/// The caller must have checked the owner role.
pub fn set(
    env: &Env,
    pool_id: u32,
    alloc_weight: u64,
    rewarder: Option<Address>,
    overwrite: bool,
) -> Result<PoolInfo, LedgerError> {
    let mut pool = load_pool(env, pool_id)?;

    let total = total_alloc_weight(env)
        .checked_sub(pool.alloc_weight)
        .and_then(|rest| rest.checked_add(alloc_weight))
        .ok_or(LedgerError::Overflow)?;

    pool.alloc_weight = alloc_weight;
    if overwrite {
        pool.rewarder = rewarder;
    }

    set_total_alloc_weight(env, total);
    save_pool(env, pool_id, &pool);

    Ok(pool)
}
