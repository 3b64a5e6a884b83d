#![no_std]

//! Multiplier rewarder.
//!
//! Pays a secondary token proportional to the primary reward the chef pays
//! out: every notification owes `primary_paid × multiplier / MULTIPLIER_PRECISION`
//! to the recipient. If the rewarder's own balance cannot cover what is owed,
//! the remainder is carried per (pool, staker) and paid on a later
//! notification once the balance has been topped up.

use common::{LedgerError, RewarderInterface};
use soroban_sdk::{contract, contractimpl, contracttype, symbol_short, token, Address, Env, Symbol};

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const REWARD_TOKEN: Symbol = symbol_short!("RWD_TOK");
const CHEF: Symbol = symbol_short!("CHEF");
const MULTIPLIER: Symbol = symbol_short!("MULT");

// Per-position persistent storage uses tuple keys: (prefix, pool_id, staker)
const UNPAID: Symbol = symbol_short!("UNPAID");
const STAKE: Symbol = symbol_short!("STK");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

/// Fixed-point scale of the reward multiplier; `MULTIPLIER_PRECISION` is 1.0.
pub const MULTIPLIER_PRECISION: i128 = 1_000_000_000_000;

// ── Events ───────────────────────────────────────────────────────────────────

/// Fired on every notification from the chef.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SecondaryPaidEvent {
    pub pool_id: u32,
    pub staker: Address,
    pub recipient: Address,
    pub paid: i128,
    pub unpaid: i128,
    pub timestamp: u64,
}

#[allow(deprecated)]
fn publish_secondary_paid(
    env: &Env,
    pool_id: u32,
    staker: Address,
    recipient: Address,
    paid: i128,
    unpaid: i128,
) {
    env.events().publish(
        (symbol_short!("SEC_PAID"), staker.clone(), pool_id),
        SecondaryPaidEvent {
            pool_id,
            staker,
            recipient,
            paid,
            unpaid,
            timestamp: env.ledger().timestamp(),
        },
    );
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct MultiplierRewarder;

#[contractimpl]
impl MultiplierRewarder {
    /// Bootstrap the rewarder.
    ///
    /// * `reward_token`      – SAC address of the secondary token.
    /// * `chef`              – the only address allowed to notify.
    /// * `reward_multiplier` – secondary units per primary unit, scaled by
    ///                         `MULTIPLIER_PRECISION`.
    pub fn initialize(
        env: Env,
        reward_token: Address,
        chef: Address,
        reward_multiplier: i128,
    ) -> Result<(), LedgerError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(LedgerError::AlreadyInitialized);
        }
        if reward_multiplier < 0 {
            return Err(LedgerError::InvalidInput);
        }

        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&REWARD_TOKEN, &reward_token);
        env.storage().instance().set(&CHEF, &chef);
        env.storage().instance().set(&MULTIPLIER, &reward_multiplier);

        Ok(())
    }

    pub fn reward_multiplier(env: Env) -> i128 {
        env.storage().instance().get(&MULTIPLIER).unwrap_or(0)
    }

    pub fn reward_token(env: Env) -> Result<Address, LedgerError> {
        Self::load(&env, &REWARD_TOKEN)
    }

    pub fn chef(env: Env) -> Result<Address, LedgerError> {
        Self::load(&env, &CHEF)
    }

    /// Stake reported by the chef on the last notification for this position.
    pub fn stake_of(env: Env, pool_id: u32, staker: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&(STAKE, pool_id, staker))
            .unwrap_or(0)
    }

    fn load(env: &Env, key: &Symbol) -> Result<Address, LedgerError> {
        env.storage()
            .instance()
            .get(key)
            .ok_or(LedgerError::NotInitialized)
    }

    fn store(env: &Env, key: &(Symbol, u32, Address), value: i128) {
        env.storage().persistent().set(key, &value);
        env.storage()
            .persistent()
            .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}

#[contractimpl]
impl RewarderInterface for MultiplierRewarder {
    fn on_stake_change(
        env: Env,
        pool_id: u32,
        staker: Address,
        recipient: Address,
        primary_paid: i128,
        new_stake: i128,
    ) -> Result<(), LedgerError> {
        let chef = Self::load(&env, &CHEF)?;
        chef.require_auth();

        if primary_paid < 0 || new_stake < 0 {
            return Err(LedgerError::InvalidInput);
        }

        let unpaid_key = (UNPAID, pool_id, staker.clone());
        let carried: i128 = env.storage().persistent().get(&unpaid_key).unwrap_or(0);
        let earned = primary_paid
            .checked_mul(Self::reward_multiplier(env.clone()))
            .ok_or(LedgerError::Overflow)?
            / MULTIPLIER_PRECISION;
        let owed = carried.checked_add(earned).ok_or(LedgerError::Overflow)?;

        let reward_token = Self::load(&env, &REWARD_TOKEN)?;
        let client = token::Client::new(&env, &reward_token);
        let this = env.current_contract_address();
        let paid = owed.min(client.balance(&this).max(0));
        if paid > 0 {
            client.transfer(&this, &recipient, &paid);
        }

        let unpaid = owed - paid;
        Self::store(&env, &unpaid_key, unpaid);
        Self::store(&env, &(STAKE, pool_id, staker.clone()), new_stake);

        publish_secondary_paid(&env, pool_id, staker, recipient, paid, unpaid);

        Ok(())
    }

    fn pending_secondary(env: Env, pool_id: u32, staker: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&(UNPAID, pool_id, staker))
            .unwrap_or(0)
    }
}
