#![no_std]

pub mod accrual;
pub mod events;
pub mod hook;
pub mod ledger;
pub mod registry;

use common::{ownable, LedgerError, PoolInfo, UserInfo};
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, Address, Env, Symbol, Vec,
};

use hook::RewarderHook;

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const REWARD_TOKEN: Symbol = symbol_short!("RWD_TOK");

// ── Public-facing types (re-exported for test consumers) ─────────────────────

/// Combined view of what a staker could harvest right now.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PendingRewards {
    pub primary: i128,
    pub secondary: i128,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct ChefContract;

#[contractimpl]
impl ChefContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `owner`            – administers pools and emission.
    /// * `reward_token`     – SAC address of the token paid out as reward. The
    ///                        contract pays from its own balance, which is
    ///                        topped up externally.
    /// * `reward_per_epoch` – reward units emitted per ledger across all pools.
    /// * `treasury`         – initial treasury address.
    pub fn initialize(
        env: Env,
        owner: Address,
        reward_token: Address,
        reward_per_epoch: i128,
        treasury: Address,
    ) -> Result<(), LedgerError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(LedgerError::AlreadyInitialized);
        }
        if reward_per_epoch < 0 {
            return Err(LedgerError::InvalidInput);
        }

        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&REWARD_TOKEN, &reward_token);
        accrual::set_reward_per_epoch(&env, reward_per_epoch);
        ownable::init(&env, &owner, &treasury);
        // POOL_CNT and TOT_ALLOC start at zero; absent keys read as 0.

        events::publish_initialized(&env, owner, reward_token, reward_per_epoch, treasury);

        Ok(())
    }

    // ── Pool administration ─────────────────────────────────────────────────

    /// Register a new pool for `staked_token` and return its id.
    ///
    /// Each staked token can back at most one pool, ever, and at most
    /// [`registry::MAX_POOLS`] pools can be registered. Other pools are not
    /// updated first; batch a `mass_update_pools` before this call to price
    /// their elapsed epochs at the old total weight.
    pub fn add(
        env: Env,
        caller: Address,
        alloc_weight: u64,
        staked_token: Address,
        rewarder: Option<Address>,
    ) -> Result<u32, LedgerError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        ownable::require_owner(&env, &caller)?;

        if staked_token == Self::load_reward_token(&env)? {
            return Err(LedgerError::InvalidInput);
        }

        let pool_id = registry::add(&env, alloc_weight, &staked_token, rewarder.clone())?;

        events::publish_pool_added(&env, pool_id, alloc_weight, staked_token, rewarder);

        Ok(pool_id)
    }

    /// Re-weight a pool. The rewarder binding is replaced only when
    /// `overwrite` is set; otherwise `rewarder` is ignored.
    pub fn set(
        env: Env,
        caller: Address,
        pool_id: u32,
        alloc_weight: u64,
        rewarder: Option<Address>,
        overwrite: bool,
    ) -> Result<(), LedgerError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        ownable::require_owner(&env, &caller)?;

        let pool = registry::set(&env, pool_id, alloc_weight, rewarder, overwrite)?;

        events::publish_pool_set(&env, pool_id, alloc_weight, pool.rewarder, overwrite);

        Ok(())
    }

    /// Change the emission rate.
    ///
    /// Every pool is flushed at the old rate first, so no pool is re-priced
    /// retroactively.
    pub fn set_reward_per_epoch(
        env: Env,
        caller: Address,
        reward_per_epoch: i128,
    ) -> Result<(), LedgerError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        ownable::require_owner(&env, &caller)?;

        if reward_per_epoch < 0 {
            return Err(LedgerError::InvalidInput);
        }

        accrual::update_all(&env)?;
        accrual::set_reward_per_epoch(&env, reward_per_epoch);

        events::publish_reward_per_epoch_set(&env, reward_per_epoch);

        Ok(())
    }

    // ── Accrual ─────────────────────────────────────────────────────────────

    /// Bring a pool's reward index up to the current epoch.
    pub fn update_pool(env: Env, pool_id: u32) -> Result<PoolInfo, LedgerError> {
        Self::require_initialized(&env)?;
        accrual::update_pool(&env, pool_id)
    }

    /// Update several pools in order. Fails without touching any pool if one
    /// of the ids is unknown.
    pub fn mass_update_pools(env: Env, pool_ids: Vec<u32>) -> Result<(), LedgerError> {
        Self::require_initialized(&env)?;
        accrual::mass_update(&env, &pool_ids)
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Stake `amount` of the pool's token from `staker` into `recipient`'s
    /// position.
    ///
    /// `staker` only funds the deposit; the stake belongs to `recipient`, and
    /// reward pending on `recipient`'s existing stake is paid to `recipient`
    /// first. `amount` may be zero, which only settles pending reward. Returns
    /// the reward paid.
    pub fn deposit(
        env: Env,
        staker: Address,
        pool_id: u32,
        amount: i128,
        recipient: Address,
    ) -> Result<i128, LedgerError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        if amount < 0 {
            return Err(LedgerError::InvalidInput);
        }

        // 1. Flush the pool index and read the credited position against it.
        let mut pool = accrual::update_pool(&env, pool_id)?;
        let mut position = ledger::load_position(&env, pool_id, &recipient);
        let pending = ledger::pending(&position, pool.acc_reward_per_share)?;

        // 2. Take custody of the new stake.
        ledger::transfer(
            &env,
            &pool.staked_token,
            &staker,
            &env.current_contract_address(),
            amount,
        )?;

        // 3. Pay out what the old stake earned.
        let paid = Self::pay_reward(&env, pending, &recipient)?;
        if paid > 0 {
            events::publish_harvest(&env, recipient.clone(), pool_id, paid, recipient.clone());
        }

        // 4. Grow the stake and resync the debt.
        ledger::rebase(&mut position, amount, pool.acc_reward_per_share)?;
        pool.total_staked = pool
            .total_staked
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        ledger::save_position(&env, pool_id, &recipient, &position);
        registry::save_pool(&env, pool_id, &pool);

        // 5. Let the rewarder settle its own side.
        RewarderHook::for_pool(&pool).on_stake_change(
            &env,
            pool_id,
            &recipient,
            &recipient,
            paid,
            position.amount,
        )?;

        events::publish_deposit(&env, staker, pool_id, amount, recipient);

        Ok(paid)
    }

    /// Unstake `amount` and send it, together with pending reward, to
    /// `recipient`. Returns the reward paid.
    pub fn withdraw(
        env: Env,
        staker: Address,
        pool_id: u32,
        amount: i128,
        recipient: Address,
    ) -> Result<i128, LedgerError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        if amount < 0 {
            return Err(LedgerError::InvalidInput);
        }

        // 1. Flush the pool index and check the stake covers the withdrawal.
        let mut pool = accrual::update_pool(&env, pool_id)?;
        let mut position = ledger::load_position(&env, pool_id, &staker);
        if amount > position.amount {
            return Err(LedgerError::InsufficientBalance);
        }
        let pending = ledger::pending(&position, pool.acc_reward_per_share)?;

        // 2. Pay out what the stake earned so far.
        let paid = Self::pay_reward(&env, pending, &recipient)?;
        if paid > 0 {
            events::publish_harvest(&env, staker.clone(), pool_id, paid, recipient.clone());
        }

        // 3. Shrink the stake and resync the debt.
        ledger::rebase(&mut position, -amount, pool.acc_reward_per_share)?;
        pool.total_staked = pool
            .total_staked
            .checked_sub(amount)
            .ok_or(LedgerError::Overflow)?;
        ledger::save_position(&env, pool_id, &staker, &position);
        registry::save_pool(&env, pool_id, &pool);

        // 4. Let the rewarder settle its own side.
        RewarderHook::for_pool(&pool).on_stake_change(
            &env,
            pool_id,
            &staker,
            &recipient,
            paid,
            position.amount,
        )?;

        // 5. Return the principal.
        ledger::transfer(
            &env,
            &pool.staked_token,
            &env.current_contract_address(),
            &recipient,
            amount,
        )?;

        events::publish_withdraw(&env, staker, pool_id, amount, recipient);

        Ok(paid)
    }

    /// Pay pending reward to `recipient` without changing the stake.
    ///
    /// Succeeds with zero for a position that has nothing staked.
    pub fn harvest(
        env: Env,
        staker: Address,
        pool_id: u32,
        recipient: Address,
    ) -> Result<i128, LedgerError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let pool = accrual::update_pool(&env, pool_id)?;
        let mut position = ledger::load_position(&env, pool_id, &staker);
        let pending = ledger::pending(&position, pool.acc_reward_per_share)?;

        let paid = Self::pay_reward(&env, pending, &recipient)?;

        ledger::rebase(&mut position, 0, pool.acc_reward_per_share)?;
        ledger::save_position(&env, pool_id, &staker, &position);

        RewarderHook::for_pool(&pool).on_stake_change(
            &env,
            pool_id,
            &staker,
            &recipient,
            paid,
            position.amount,
        )?;

        events::publish_harvest(&env, staker, pool_id, paid, recipient);

        Ok(paid)
    }

    /// Return the full stake to `recipient`, forfeiting pending reward.
    ///
    /// The pool index is not updated and a faulting rewarder is ignored, so
    /// principal can always be recovered. Returns the amount sent back.
    pub fn emergency_withdraw(
        env: Env,
        staker: Address,
        pool_id: u32,
        recipient: Address,
    ) -> Result<i128, LedgerError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let mut pool = registry::load_pool(&env, pool_id)?;
        let position = ledger::load_position(&env, pool_id, &staker);
        let amount = position.amount;

        pool.total_staked = pool
            .total_staked
            .checked_sub(amount)
            .ok_or(LedgerError::Overflow)?;
        ledger::save_position(&env, pool_id, &staker, &UserInfo::default());
        registry::save_pool(&env, pool_id, &pool);

        RewarderHook::for_pool(&pool).on_stake_change_tolerant(
            &env,
            pool_id,
            &staker,
            &recipient,
            0,
        );

        ledger::transfer(
            &env,
            &pool.staked_token,
            &env.current_contract_address(),
            &recipient,
            amount,
        )?;

        events::publish_emergency_withdraw(&env, staker, pool_id, amount, recipient);

        Ok(amount)
    }

    // ── Roles ───────────────────────────────────────────────────────────────

    /// Hand ownership to `new_owner`, directly or as a pending claim.
    /// See [`common::ownable::transfer_ownership`].
    pub fn transfer_ownership(
        env: Env,
        caller: Address,
        new_owner: Option<Address>,
        direct: bool,
        renounce: bool,
    ) -> Result<(), LedgerError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        ownable::transfer_ownership(&env, &caller, new_owner, direct, renounce)
    }

    /// Accept a pending ownership transfer.
    pub fn claim_ownership(env: Env, claimant: Address) -> Result<(), LedgerError> {
        Self::require_initialized(&env)?;
        claimant.require_auth();
        ownable::claim_ownership(&env, &claimant)
    }

    /// Rotate the treasury. Only the current treasury may call this.
    pub fn set_treasury(
        env: Env,
        caller: Address,
        new_treasury: Option<Address>,
    ) -> Result<(), LedgerError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        ownable::set_treasury(&env, &caller, new_treasury)
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn pool_count(env: Env) -> u32 {
        registry::pool_count(&env)
    }

    pub fn pool_info(env: Env, pool_id: u32) -> Result<PoolInfo, LedgerError> {
        registry::load_pool(&env, pool_id)
    }

    pub fn staked_token(env: Env, pool_id: u32) -> Result<Address, LedgerError> {
        Ok(registry::load_pool(&env, pool_id)?.staked_token)
    }

    pub fn rewarder(env: Env, pool_id: u32) -> Result<Option<Address>, LedgerError> {
        Ok(registry::load_pool(&env, pool_id)?.rewarder)
    }

    pub fn user_info(env: Env, pool_id: u32, staker: Address) -> UserInfo {
        ledger::load_position(&env, pool_id, &staker)
    }

    /// Primary reward `staker` could harvest at the current epoch. Read-only.
    pub fn pending_reward(env: Env, pool_id: u32, staker: Address) -> Result<i128, LedgerError> {
        let pool = Self::projected_pool(&env, pool_id)?;
        let position = ledger::load_position(&env, pool_id, &staker);
        ledger::pending(&position, pool.acc_reward_per_share)
    }

    /// Primary and secondary reward `staker` could harvest right now.
    pub fn pending_rewards(
        env: Env,
        pool_id: u32,
        staker: Address,
    ) -> Result<PendingRewards, LedgerError> {
        let pool = Self::projected_pool(&env, pool_id)?;
        let position = ledger::load_position(&env, pool_id, &staker);
        let primary = ledger::pending(&position, pool.acc_reward_per_share)?;
        let secondary =
            RewarderHook::for_pool(&pool).pending_secondary(&env, pool_id, &staker)?;
        Ok(PendingRewards { primary, secondary })
    }

    pub fn total_alloc_weight(env: Env) -> u64 {
        registry::total_alloc_weight(&env)
    }

    pub fn reward_per_epoch(env: Env) -> i128 {
        accrual::reward_per_epoch(&env)
    }

    pub fn reward_token(env: Env) -> Result<Address, LedgerError> {
        Self::load_reward_token(&env)
    }

    pub fn owner(env: Env) -> Option<Address> {
        ownable::owner(&env)
    }

    pub fn pending_owner(env: Env) -> Option<Address> {
        ownable::pending_owner(&env)
    }

    pub fn treasury(env: Env) -> Option<Address> {
        ownable::treasury(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), LedgerError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(LedgerError::NotInitialized);
        }
        Ok(())
    }

    fn load_reward_token(env: &Env) -> Result<Address, LedgerError> {
        env.storage()
            .instance()
            .get(&REWARD_TOKEN)
            .ok_or(LedgerError::NotInitialized)
    }

    /// The pool as `update_pool` would leave it, without writing anything.
    fn projected_pool(env: &Env, pool_id: u32) -> Result<PoolInfo, LedgerError> {
        let pool = registry::load_pool(env, pool_id)?;
        accrual::project(
            &pool,
            accrual::reward_per_epoch(env),
            registry::total_alloc_weight(env),
            accrual::current_epoch(env),
        )
        .ok_or(LedgerError::Overflow)
    }

    /// Send `pending` reward tokens to `recipient`. Returns what was paid.
    fn pay_reward(env: &Env, pending: i128, recipient: &Address) -> Result<i128, LedgerError> {
        if pending <= 0 {
            return Ok(0);
        }
        let reward_token = Self::load_reward_token(env)?;
        ledger::transfer(
            env,
            &reward_token,
            &env.current_contract_address(),
            recipient,
            pending,
        )?;
        Ok(pending)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_access;
