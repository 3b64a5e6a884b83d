//! Per-staker positions and the transfers that settle them.
//!
//! Positions are stored under `(USER, pool_id, staker)` and read as zero until
//! first written. They are never removed, only zeroed.

use common::{LedgerError, UserInfo};
use soroban_sdk::{symbol_short, token, Address, Env, Symbol};

use crate::accrual;

const USER: Symbol = symbol_short!("USER");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

fn position_key(pool_id: u32, staker: &Address) -> (Symbol, u32, Address) {
    (USER, pool_id, staker.clone())
}

pub fn load_position(env: &Env, pool_id: u32, staker: &Address) -> UserInfo {
    env.storage()
        .persistent()
        .get(&position_key(pool_id, staker))
        .unwrap_or_default()
}

pub fn save_position(env: &Env, pool_id: u32, staker: &Address, position: &UserInfo) {
    let key = position_key(pool_id, staker);
    env.storage().persistent().set(&key, position);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Unclaimed reward of `position` at index `acc_reward_per_share`.
pub fn pending(position: &UserInfo, acc_reward_per_share: i128) -> Result<i128, LedgerError> {
    accrual::pending(
        position.amount,
        acc_reward_per_share,
        position.reward_debt,
    )
    .ok_or(LedgerError::Overflow)
}

/// Applies a signed stake change and resyncs the reward debt to the new
/// stake. The caller has already paid out whatever was pending.
pub fn rebase(
    position: &mut UserInfo,
    delta: i128,
    acc_reward_per_share: i128,
) -> Result<(), LedgerError> {
    let amount = position
        .amount
        .checked_add(delta)
        .ok_or(LedgerError::Overflow)?;
    if amount < 0 {
        return Err(LedgerError::InsufficientBalance);
    }
    position.amount = amount;
    position.reward_debt =
        accrual::accrued(amount, acc_reward_per_share).ok_or(LedgerError::Overflow)?;
    Ok(())
}

/// Moves `amount` of `asset` from `from` to `to`. Zero amounts are skipped.
///
/// Any failure reported by the token contract becomes `TransferFailed`, which
/// aborts the enclosing call.
pub fn transfer(
    env: &Env,
    asset: &Address,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), LedgerError> {
    if amount == 0 {
        return Ok(());
    }
    match token::Client::new(env, asset).try_transfer(from, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(LedgerError::TransferFailed),
    }
}
