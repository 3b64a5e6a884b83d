#![no_std]

//! Batch executor.
//!
//! Runs an ordered list of chef calls inside one transaction. With
//! `revert_on_fail` the first failing call aborts the whole batch and every
//! write made by earlier calls is rolled back. Without it each call is isolated
//! in its own frame and the caller gets one [`CallOutcome`] per call.

use common::{ChefClient, LedgerError};
use soroban_sdk::{
    contract, contractimpl, contracttype, log, symbol_short, Address, Env, InvokeError, Symbol,
    Vec,
};

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const CHEF: Symbol = symbol_short!("CHEF");

// ── Call descriptors ─────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeArgs {
    pub staker: Address,
    pub pool_id: u32,
    pub amount: i128,
    pub recipient: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionArgs {
    pub staker: Address,
    pub pool_id: u32,
    pub recipient: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AddArgs {
    pub caller: Address,
    pub alloc_weight: u64,
    pub staked_token: Address,
    pub rewarder: Option<Address>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SetArgs {
    pub caller: Address,
    pub pool_id: u32,
    pub alloc_weight: u64,
    pub rewarder: Option<Address>,
    pub overwrite: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RateArgs {
    pub caller: Address,
    pub reward_per_epoch: i128,
}

/// One chef entry point with its arguments.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EngineCall {
    UpdatePool(u32),
    MassUpdatePools(Vec<u32>),
    Deposit(StakeArgs),
    Withdraw(StakeArgs),
    Harvest(PositionArgs),
    EmergencyWithdraw(PositionArgs),
    Add(AddArgs),
    Set(SetArgs),
    SetRewardPerEpoch(RateArgs),
}

/// Result of one call in a best-effort batch.
///
/// `Success` carries the call's numeric return: the amount paid or returned
/// for position calls, the new pool id for `Add`, the reward index for
/// `UpdatePool`, and 0 for calls that return nothing.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CallOutcome {
    Success(i128),
    Failure(u32),
}

// ── Events ───────────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BatchExecutedEvent {
    pub calls: u32,
    pub failures: u32,
    pub revert_on_fail: bool,
    pub timestamp: u64,
}

#[allow(deprecated)]
fn publish_batch_executed(env: &Env, calls: u32, failures: u32, revert_on_fail: bool) {
    env.events().publish(
        (symbol_short!("BATCH"),),
        BatchExecutedEvent {
            calls,
            failures,
            revert_on_fail,
            timestamp: env.ledger().timestamp(),
        },
    );
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct BatchExecutor;

#[contractimpl]
impl BatchExecutor {
    /// Bind the executor to a chef. Can only be called once.
    pub fn initialize(env: Env, chef: Address) -> Result<(), LedgerError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(LedgerError::AlreadyInitialized);
        }

        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&CHEF, &chef);

        Ok(())
    }

    pub fn chef(env: Env) -> Result<Address, LedgerError> {
        env.storage()
            .instance()
            .get(&CHEF)
            .ok_or(LedgerError::NotInitialized)
    }

    /// Run `calls` in order against the chef.
    ///
    /// Authorisation is checked by the chef itself, so every address named in
    /// a call must have authorised that nested invocation.
    pub fn execute(
        env: Env,
        calls: Vec<EngineCall>,
        revert_on_fail: bool,
    ) -> Result<Vec<CallOutcome>, LedgerError> {
        let chef = ChefClient::new(&env, &Self::chef(env.clone())?);

        let mut outcomes = Vec::new(&env);
        let mut failures: u32 = 0;

        for call in calls.iter() {
            match dispatch(&chef, call) {
                Ok(value) => outcomes.push_back(CallOutcome::Success(value)),
                Err(err) if revert_on_fail => return Err(err),
                Err(err) => {
                    log!(&env, "batch call failed", outcomes.len(), err as u32);
                    failures += 1;
                    outcomes.push_back(CallOutcome::Failure(err as u32));
                }
            }
        }

        publish_batch_executed(&env, outcomes.len(), failures, revert_on_fail);

        Ok(outcomes)
    }

    /// Harvest `pool_ids[i]` into `recipients[i]` for one staker.
    pub fn mass_harvest(
        env: Env,
        staker: Address,
        pool_ids: Vec<u32>,
        recipients: Vec<Address>,
        revert_on_fail: bool,
    ) -> Result<Vec<CallOutcome>, LedgerError> {
        if pool_ids.len() != recipients.len() {
            return Err(LedgerError::LengthMismatch);
        }

        let mut calls = Vec::new(&env);
        for (pool_id, recipient) in pool_ids.iter().zip(recipients.iter()) {
            calls.push_back(EngineCall::Harvest(PositionArgs {
                staker: staker.clone(),
                pool_id,
                recipient,
            }));
        }

        Self::execute(env, calls, revert_on_fail)
    }
}

// ── Dispatch ─────────────────────────────────────────────────────────────────

/// Flattens the nested result of a `try_` client call. A typed chef error is
/// passed through; anything else (a panic, a host trap, an undecodable return)
/// becomes `CallAborted`.
fn settle<T, E>(
    result: Result<Result<T, E>, Result<LedgerError, InvokeError>>,
    value: impl FnOnce(T) -> i128,
) -> Result<i128, LedgerError> {
    match result {
        Ok(Ok(v)) => Ok(value(v)),
        Err(Ok(err)) => Err(err),
        Ok(Err(_)) | Err(Err(_)) => Err(LedgerError::CallAborted),
    }
}

fn dispatch(chef: &ChefClient, call: EngineCall) -> Result<i128, LedgerError> {
    match call {
        EngineCall::UpdatePool(pool_id) => settle(chef.try_update_pool(&pool_id), |pool| {
            pool.acc_reward_per_share
        }),
        EngineCall::MassUpdatePools(pool_ids) => {
            settle(chef.try_mass_update_pools(&pool_ids), |_| 0)
        }
        EngineCall::Deposit(a) => settle(
            chef.try_deposit(&a.staker, &a.pool_id, &a.amount, &a.recipient),
            |paid| paid,
        ),
        EngineCall::Withdraw(a) => settle(
            chef.try_withdraw(&a.staker, &a.pool_id, &a.amount, &a.recipient),
            |paid| paid,
        ),
        EngineCall::Harvest(a) => settle(
            chef.try_harvest(&a.staker, &a.pool_id, &a.recipient),
            |paid| paid,
        ),
        EngineCall::EmergencyWithdraw(a) => settle(
            chef.try_emergency_withdraw(&a.staker, &a.pool_id, &a.recipient),
            |returned| returned,
        ),
        EngineCall::Add(a) => settle(
            chef.try_add(&a.caller, &a.alloc_weight, &a.staked_token, &a.rewarder),
            |pool_id| pool_id as i128,
        ),
        EngineCall::Set(a) => settle(
            chef.try_set(
                &a.caller,
                &a.pool_id,
                &a.alloc_weight,
                &a.rewarder,
                &a.overwrite,
            ),
            |_| 0,
        ),
        EngineCall::SetRewardPerEpoch(a) => settle(
            chef.try_set_reward_per_epoch(&a.caller, &a.reward_per_epoch),
            |_| 0,
        ),
    }
}
