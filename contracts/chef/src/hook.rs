//! Binding between a pool and its optional rewarder.
//!
//! [`RewarderHook::Absent`] accepts every notification and reports nothing
//! pending, so settlement code calls the hook unconditionally.

use common::{LedgerError, PoolInfo, RewarderClient};
use soroban_sdk::{log, Address, Env};

use crate::events;

pub enum RewarderHook {
    Absent,
    Bound(Address),
}

impl RewarderHook {
    pub fn for_pool(pool: &PoolInfo) -> Self {
        match &pool.rewarder {
            Some(rewarder) => RewarderHook::Bound(rewarder.clone()),
            None => RewarderHook::Absent,
        }
    }

    /// Notifies the rewarder of a settlement. Any fault aborts the caller
    /// with `RewarderFault`.
    pub fn on_stake_change(
        &self,
        env: &Env,
        pool_id: u32,
        staker: &Address,
        recipient: &Address,
        primary_paid: i128,
        new_stake: i128,
    ) -> Result<(), LedgerError> {
        let RewarderHook::Bound(rewarder) = self else {
            return Ok(());
        };
        match RewarderClient::new(env, rewarder).try_on_stake_change(
            &pool_id,
            staker,
            recipient,
            &primary_paid,
            &new_stake,
        ) {
            Ok(Ok(())) => Ok(()),
            _ => Err(LedgerError::RewarderFault),
        }
    }

    /// Same as [`Self::on_stake_change`] but swallows faults. Used only on the
    /// emergency path, where principal must come back regardless of the
    /// rewarder. Returns `false` if a fault was ignored.
    pub fn on_stake_change_tolerant(
        &self,
        env: &Env,
        pool_id: u32,
        staker: &Address,
        recipient: &Address,
        new_stake: i128,
    ) -> bool {
        if self
            .on_stake_change(env, pool_id, staker, recipient, 0, new_stake)
            .is_ok()
        {
            return true;
        }
        if let RewarderHook::Bound(rewarder) = self {
            log!(env, "rewarder fault ignored", pool_id, rewarder.clone());
            events::publish_rewarder_fault(env, pool_id, rewarder.clone(), staker.clone());
        }
        false
    }

    /// Secondary reward the rewarder still owes `staker`.
    pub fn pending_secondary(
        &self,
        env: &Env,
        pool_id: u32,
        staker: &Address,
    ) -> Result<i128, LedgerError> {
        let RewarderHook::Bound(rewarder) = self else {
            return Ok(0);
        };
        match RewarderClient::new(env, rewarder).try_pending_secondary(&pool_id, staker) {
            Ok(Ok(amount)) => Ok(amount),
            _ => Err(LedgerError::RewarderFault),
        }
    }
}
