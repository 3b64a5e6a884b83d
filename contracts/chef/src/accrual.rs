//! Per-pool reward index.
//!
//! Every pool keeps an accumulator, `acc_reward_per_share`, holding the reward
//! earned by one staked unit since the pool was created, scaled by
//! [`ACC_PRECISION`]. The accumulator is only brought forward lazily, by
//! [`update_pool`], the first time a pool is touched in a new epoch:
//!
//! ```text
//! per_epoch = reward_per_epoch × alloc_weight / total_alloc_weight
//! reward    = per_epoch × elapsed_epochs
//! acc      += reward × ACC_PRECISION / total_staked
//! ```
//!
//! A staker's unclaimed reward is then
//! `amount × acc / ACC_PRECISION − reward_debt`.
//!
//! Both divisions truncate. The remainders are never reconciled, so a pool
//! can receive slightly less than its nominal share of emission.

use common::{LedgerError, PoolInfo};
use soroban_sdk::{symbol_short, Env, Symbol, Vec};

use crate::{events, registry};

/// Fixed-point scale of `acc_reward_per_share`.
pub const ACC_PRECISION: i128 = 1_000_000_000_000;

const REWARD_PER_EPOCH: Symbol = symbol_short!("RWD_EPOCH");

// ── Emission config ──────────────────────────────────────────────────────────

pub fn reward_per_epoch(env: &Env) -> i128 {
    env.storage().instance().get(&REWARD_PER_EPOCH).unwrap_or(0)
}

pub fn set_reward_per_epoch(env: &Env, value: i128) {
    env.storage().instance().set(&REWARD_PER_EPOCH, &value);
}

/// The current epoch: the ledger sequence number.
pub fn current_epoch(env: &Env) -> u32 {
    env.ledger().sequence()
}

// ── Pure math ────────────────────────────────────────────────────────────────

/// Reward allocated to a pool over `elapsed` epochs.
///
/// Returns zero when no weight is allocated anywhere.
pub fn pool_reward(
    reward_per_epoch: i128,
    alloc_weight: u64,
    total_alloc_weight: u64,
    elapsed: u32,
) -> Option<i128> {
    if total_alloc_weight == 0 {
        return Some(0);
    }
    let per_epoch =
        reward_per_epoch.checked_mul(alloc_weight as i128)? / total_alloc_weight as i128;
    per_epoch.checked_mul(elapsed as i128)
}

/// Adds `reward` spread over `total_staked` units to the accumulator.
///
/// An empty pool leaves the accumulator untouched; the reward is forgone.
pub fn accumulate(acc_reward_per_share: i128, reward: i128, total_staked: i128) -> Option<i128> {
    if total_staked <= 0 {
        return Some(acc_reward_per_share);
    }
    let delta = reward.checked_mul(ACC_PRECISION)? / total_staked;
    acc_reward_per_share.checked_add(delta)
}

/// Reward accrued by `amount` units at index `acc_reward_per_share`, i.e. the
/// value the reward debt is reset to after a settlement.
pub fn accrued(amount: i128, acc_reward_per_share: i128) -> Option<i128> {
    Some(amount.checked_mul(acc_reward_per_share)? / ACC_PRECISION)
}

/// Unclaimed reward of a position.
pub fn pending(amount: i128, acc_reward_per_share: i128, reward_debt: i128) -> Option<i128> {
    accrued(amount, acc_reward_per_share)?.checked_sub(reward_debt)
}

/// Brings `pool` forward to `epoch` without touching storage.
///
/// Returns `None` on overflow. Epochs at or before the last accrual leave the
/// pool unchanged.
pub fn project(
    pool: &PoolInfo,
    reward_per_epoch: i128,
    total_alloc_weight: u64,
    epoch: u32,
) -> Option<PoolInfo> {
    let mut next = pool.clone();
    if epoch <= pool.last_accrual_epoch {
        return Some(next);
    }
    if pool.total_staked > 0 {
        let elapsed = epoch - pool.last_accrual_epoch;
        let reward = pool_reward(
            reward_per_epoch,
            pool.alloc_weight,
            total_alloc_weight,
            elapsed,
        )?;
        next.acc_reward_per_share =
            accumulate(pool.acc_reward_per_share, reward, pool.total_staked)?;
    }
    next.last_accrual_epoch = epoch;
    Some(next)
}

// ── Storage-backed updates ───────────────────────────────────────────────────

/// Brings a pool's index up to the current epoch and persists it.
///
/// A no-op when the pool was already updated this epoch.
pub fn update_pool(env: &Env, pool_id: u32) -> Result<PoolInfo, LedgerError> {
    let pool = registry::load_pool(env, pool_id)?;
    let epoch = current_epoch(env);
    if epoch <= pool.last_accrual_epoch {
        return Ok(pool);
    }

    let updated = project(
        &pool,
        reward_per_epoch(env),
        registry::total_alloc_weight(env),
        epoch,
    )
    .ok_or(LedgerError::Overflow)?;

    registry::save_pool(env, pool_id, &updated);

    events::publish_pool_updated(
        env,
        pool_id,
        updated.last_accrual_epoch,
        updated.total_staked,
        updated.acc_reward_per_share,
    );

    Ok(updated)
}

/// Updates every listed pool in order. All ids are checked before any pool
/// is touched.
pub fn mass_update(env: &Env, pool_ids: &Vec<u32>) -> Result<(), LedgerError> {
    let count = registry::pool_count(env);
    if pool_ids.iter().any(|id| id >= count) {
        return Err(LedgerError::PoolNotFound);
    }
    for id in pool_ids.iter() {
        update_pool(env, id)?;
    }
    Ok(())
}

/// Updates every registered pool. Bounded by `registry::MAX_POOLS`.
pub fn update_all(env: &Env) -> Result<(), LedgerError> {
    for id in 0..registry::pool_count(env) {
        update_pool(env, id)?;
    }
    Ok(())
}

// ── Unit tests ──────────────────────────────────────────────────────────────
// Pure math only, no Soroban environment.
