//! Shared types, errors, and interfaces for the reward-ledger contract suite.
//!
//! This crate provides:
//! - [`LedgerError`]: the error codes every contract in the suite returns.
//! - [`PoolInfo`] / [`UserInfo`]: the records the chef persists and exposes.
//! - [`ownable`]: owner and treasury role management.
//! - [`interface`]: cross-contract clients for the chef and for rewarders.

#![no_std]

use soroban_sdk::{contracterror, contracttype, Address};

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod interface;
pub mod ownable;

pub use interface::*;

// ── Shared error enum ────────────────────────────────────────────────────────

/// Error codes shared by the chef, the batch executor, and rewarders.
///
/// # Code ranges
/// | Range   | Purpose                          |
/// |---------|----------------------------------|
/// | 1 – 9   | Lifecycle / initialisation       |
/// | 10 – 19 | Authentication & authorisation   |
/// | 20 – 29 | Pool lookup                      |
/// | 30 – 39 | Validation / input               |
/// | 40 – 49 | Balances                         |
/// | 50 – 59 | External calls                   |
/// | 60 – 69 | Arithmetic                       |
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum LedgerError {
    // ── Lifecycle (1–9) ──────────────────────────────────────
    NotInitialized = 1,
    AlreadyInitialized = 2,

    // ── Auth (10–19) ─────────────────────────────────────────
    /// The caller does not hold the owner or treasury role required by the
    /// operation, or is not the pending owner on `claim_ownership`.
    Unauthorized = 10,

    // ── Pool lookup (20–29) ──────────────────────────────────
    /// `pool_id >= pool_count()`.
    PoolNotFound = 20,

    // ── Validation (30–39) ───────────────────────────────────
    /// The staked asset is already bound to another pool.
    DuplicateStakedAsset = 30,
    InvalidInput = 31,
    /// Parallel argument vectors of a batch call differ in length.
    LengthMismatch = 32,
    /// An absent address was supplied where a concrete one is required.
    ZeroAddress = 33,
    /// The registry already holds the maximum number of pools.
    PoolLimitReached = 34,

    // ── Balances (40–49) ─────────────────────────────────────
    /// Withdrawal amount exceeds the recorded stake.
    InsufficientBalance = 40,

    // ── External calls (50–59) ───────────────────────────────
    /// An asset transfer was rejected by the token contract.
    TransferFailed = 50,
    /// The rewarder bound to the pool faulted.
    RewarderFault = 51,
    /// A batched call aborted without returning a ledger error.
    CallAborted = 52,

    // ── Arithmetic (60–69) ───────────────────────────────────
    Overflow = 60,
}

// ── Shared records ───────────────────────────────────────────────────────────

/// Pool record, append-only and addressed by its dense id.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolInfo {
    pub staked_token: Address,
    pub alloc_weight: u64,
    /// Ledger sequence at which the index was last brought forward.
    pub last_accrual_epoch: u32,
    /// Cumulative reward per staked unit, scaled by `ACC_PRECISION`.
    pub acc_reward_per_share: i128,
    pub total_staked: i128,
    pub rewarder: Option<Address>,
}

/// Per (pool, staker) position. Absent entries read as zero.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UserInfo {
    pub amount: i128,
    pub reward_debt: i128,
}
