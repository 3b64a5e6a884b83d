#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub reward_token: Address,
    pub reward_per_epoch: i128,
    pub treasury: Address,
    pub timestamp: u64,
}

/// Fired when a pool is registered.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolAddedEvent {
    pub pool_id: u32,
    pub alloc_weight: u64,
    pub staked_token: Address,
    pub rewarder: Option<Address>,
    pub timestamp: u64,
}

/// Fired when a pool is re-weighted. `rewarder` is the binding in effect
/// after the call.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolSetEvent {
    pub pool_id: u32,
    pub alloc_weight: u64,
    pub rewarder: Option<Address>,
    pub overwrite: bool,
    pub timestamp: u64,
}

/// Fired when a pool's index is brought forward.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolUpdatedEvent {
    pub pool_id: u32,
    pub epoch: u32,
    pub total_staked: i128,
    pub acc_reward_per_share: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositEvent {
    pub staker: Address,
    pub pool_id: u32,
    pub amount: i128,
    pub recipient: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawEvent {
    pub staker: Address,
    pub pool_id: u32,
    pub amount: i128,
    pub recipient: Address,
    pub timestamp: u64,
}

/// Fired whenever a settlement pays out primary reward.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HarvestEvent {
    pub staker: Address,
    pub pool_id: u32,
    pub amount: i128,
    pub recipient: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyWithdrawEvent {
    pub staker: Address,
    pub pool_id: u32,
    pub amount: i128,
    pub recipient: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardPerEpochSetEvent {
    pub reward_per_epoch: i128,
    pub timestamp: u64,
}

/// Fired when an emergency withdrawal ignored a rewarder fault.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewarderFaultEvent {
    pub pool_id: u32,
    pub rewarder: Address,
    pub staker: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    owner: Address,
    reward_token: Address,
    reward_per_epoch: i128,
    treasury: Address,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            reward_token,
            reward_per_epoch,
            treasury,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_added(
    env: &Env,
    pool_id: u32,
    alloc_weight: u64,
    staked_token: Address,
    rewarder: Option<Address>,
) {
    env.events().publish(
        (symbol_short!("POOL_ADD"), pool_id),
        PoolAddedEvent {
            pool_id,
            alloc_weight,
            staked_token,
            rewarder,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_set(
    env: &Env,
    pool_id: u32,
    alloc_weight: u64,
    rewarder: Option<Address>,
    overwrite: bool,
) {
    env.events().publish(
        (symbol_short!("POOL_SET"), pool_id),
        PoolSetEvent {
            pool_id,
            alloc_weight,
            rewarder,
            overwrite,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_updated(
    env: &Env,
    pool_id: u32,
    epoch: u32,
    total_staked: i128,
    acc_reward_per_share: i128,
) {
    env.events().publish(
        (symbol_short!("POOL_UPD"), pool_id),
        PoolUpdatedEvent {
            pool_id,
            epoch,
            total_staked,
            acc_reward_per_share,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_deposit(
    env: &Env,
    staker: Address,
    pool_id: u32,
    amount: i128,
    recipient: Address,
) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), staker.clone(), pool_id),
        DepositEvent {
            staker,
            pool_id,
            amount,
            recipient,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdraw(
    env: &Env,
    staker: Address,
    pool_id: u32,
    amount: i128,
    recipient: Address,
) {
    env.events().publish(
        (symbol_short!("WITHDRAW"), staker.clone(), pool_id),
        WithdrawEvent {
            staker,
            pool_id,
            amount,
            recipient,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_harvest(
    env: &Env,
    staker: Address,
    pool_id: u32,
    amount: i128,
    recipient: Address,
) {
    env.events().publish(
        (symbol_short!("HARVEST"), staker.clone(), pool_id),
        HarvestEvent {
            staker,
            pool_id,
            amount,
            recipient,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_emergency_withdraw(
    env: &Env,
    staker: Address,
    pool_id: u32,
    amount: i128,
    recipient: Address,
) {
    env.events().publish(
        (symbol_short!("EMRG_WD"), staker.clone(), pool_id),
        EmergencyWithdrawEvent {
            staker,
            pool_id,
            amount,
            recipient,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_per_epoch_set(env: &Env, reward_per_epoch: i128) {
    env.events().publish(
        (symbol_short!("RWD_EPOCH"),),
        RewardPerEpochSetEvent {
            reward_per_epoch,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rewarder_fault(env: &Env, pool_id: u32, rewarder: Address, staker: Address) {
    env.events().publish(
        (symbol_short!("RWD_FAULT"), pool_id),
        RewarderFaultEvent {
            pool_id,
            rewarder,
            staker,
            timestamp: env.ledger().timestamp(),
        },
    );
}
