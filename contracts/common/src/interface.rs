//! Cross-contract interfaces.
//!
//! The chef talks to rewarders through [`RewarderClient`]; the batch executor
//! talks to the chef through [`ChefClient`]. Both are generated from the traits
//! below so every contract in the suite agrees on names and argument order.

use soroban_sdk::{contractclient, Address, Env, Vec};

use crate::{LedgerError, PoolInfo};

/// Secondary reward distributor bound to a chef pool.
#[contractclient(name = "RewarderClient")]
pub trait RewarderInterface {
    /// Called by the chef after every settlement on a pool the rewarder is
    /// bound to. `primary_paid` is the primary reward paid out by that call and
    /// `new_stake` the staker's stake after it.
    fn on_stake_change(
        env: Env,
        pool_id: u32,
        staker: Address,
        recipient: Address,
        primary_paid: i128,
        new_stake: i128,
    ) -> Result<(), LedgerError>;

    /// Secondary reward owed to `staker` on `pool_id` and not yet paid.
    fn pending_secondary(env: Env, pool_id: u32, staker: Address) -> i128;
}

/// The subset of the chef's entry points that can be batched.
#[contractclient(name = "ChefClient")]
pub trait ChefInterface {
    fn add(
        env: Env,
        caller: Address,
        alloc_weight: u64,
        staked_token: Address,
        rewarder: Option<Address>,
    ) -> Result<u32, LedgerError>;

    fn set(
        env: Env,
        caller: Address,
        pool_id: u32,
        alloc_weight: u64,
        rewarder: Option<Address>,
        overwrite: bool,
    ) -> Result<(), LedgerError>;

    fn set_reward_per_epoch(
        env: Env,
        caller: Address,
        reward_per_epoch: i128,
    ) -> Result<(), LedgerError>;

    fn update_pool(env: Env, pool_id: u32) -> Result<PoolInfo, LedgerError>;

    fn mass_update_pools(env: Env, pool_ids: Vec<u32>) -> Result<(), LedgerError>;

    fn deposit(
        env: Env,
        staker: Address,
        pool_id: u32,
        amount: i128,
        recipient: Address,
    ) -> Result<i128, LedgerError>;

    fn withdraw(
        env: Env,
        staker: Address,
        pool_id: u32,
        amount: i128,
        recipient: Address,
    ) -> Result<i128, LedgerError>;

    fn harvest(
        env: Env,
        staker: Address,
        pool_id: u32,
        recipient: Address,
    ) -> Result<i128, LedgerError>;

    fn emergency_withdraw(
        env: Env,
        staker: Address,
        pool_id: u32,
        recipient: Address,
    ) -> Result<i128, LedgerError>;
}
