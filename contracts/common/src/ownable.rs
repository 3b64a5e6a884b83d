#![allow(deprecated)] // events().publish migration tracked separately

//! Owner and treasury roles.
//!
//! The owner administers the contract and can hand the role over either
//! directly or in two steps (propose, then `claim_ownership` by the new owner).
//! Passing no new owner together with `renounce` leaves the contract ownerless.
//!
//! The treasury can only rotate itself; nobody else, including the owner, may
//! assign it.
//!
//! These helpers only compare addresses against stored roles. Callers must
//! have already run `require_auth()` on the address they pass in.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::LedgerError;

// ── Storage keys ─────────────────────────────────────────────────────────────

const OWNER: Symbol = symbol_short!("OWNER");
const PENDING_OWNER: Symbol = symbol_short!("PEND_OWN");
const TREASURY: Symbol = symbol_short!("TREASURY");

// ── Event payloads ───────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipTransferredEvent {
    pub previous_owner: Option<Address>,
    pub new_owner: Option<Address>,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipProposedEvent {
    pub owner: Address,
    pub pending_owner: Option<Address>,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreasurySetEvent {
    pub previous_treasury: Address,
    pub new_treasury: Address,
    pub timestamp: u64,
}

// ── Setup ────────────────────────────────────────────────────────────────────

/// Stores the initial role holders. Only callable internally from an
/// `initialize` entry point.
pub fn init(env: &Env, owner: &Address, treasury: &Address) {
    env.storage().instance().set(&OWNER, owner);
    env.storage().instance().set(&TREASURY, treasury);
}

// ── Queries ──────────────────────────────────────────────────────────────────

pub fn owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&OWNER)
}

pub fn pending_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&PENDING_OWNER)
}

pub fn treasury(env: &Env) -> Option<Address> {
    env.storage().instance().get(&TREASURY)
}

/// Guard: fails unless `caller` is the current owner. A renounced contract
/// has no owner and every owner-gated call fails.
pub fn require_owner(env: &Env, caller: &Address) -> Result<(), LedgerError> {
    match owner(env) {
        Some(current) if current == *caller => Ok(()),
        _ => Err(LedgerError::Unauthorized),
    }
}

// ── Ownership transfer ───────────────────────────────────────────────────────

/// Hands ownership over.
///
/// * `direct`   – set the new owner immediately and drop any pending claim.
///                An absent `new_owner` is only accepted with `renounce`.
/// * `!direct`  – record `new_owner` as pending; it must call
///                [`claim_ownership`]. An absent `new_owner` clears the claim.
pub fn transfer_ownership(
    env: &Env,
    caller: &Address,
    new_owner: Option<Address>,
    direct: bool,
    renounce: bool,
) -> Result<(), LedgerError> {
    require_owner(env, caller)?;

    if !direct {
        match &new_owner {
            Some(pending) => env.storage().instance().set(&PENDING_OWNER, pending),
            None => env.storage().instance().remove(&PENDING_OWNER),
        }
        env.events().publish(
            (symbol_short!("OWN_PROP"), caller.clone()),
            OwnershipProposedEvent {
                owner: caller.clone(),
                pending_owner: new_owner,
                timestamp: env.ledger().timestamp(),
            },
        );
        return Ok(());
    }

    match &new_owner {
        Some(next) => env.storage().instance().set(&OWNER, next),
        None if renounce => env.storage().instance().remove(&OWNER),
        None => return Err(LedgerError::ZeroAddress),
    }
    env.storage().instance().remove(&PENDING_OWNER);

    publish_ownership_transferred(env, Some(caller.clone()), new_owner);
    Ok(())
}

/// Completes a staged hand-off. Only the pending owner may claim.
pub fn claim_ownership(env: &Env, claimant: &Address) -> Result<(), LedgerError> {
    let pending = pending_owner(env).ok_or(LedgerError::Unauthorized)?;
    if pending != *claimant {
        return Err(LedgerError::Unauthorized);
    }

    let previous = owner(env);
    env.storage().instance().set(&OWNER, claimant);
    env.storage().instance().remove(&PENDING_OWNER);

    publish_ownership_transferred(env, previous, Some(claimant.clone()));
    Ok(())
}

fn publish_ownership_transferred(
    env: &Env,
    previous_owner: Option<Address>,
    new_owner: Option<Address>,
) {
    env.events().publish(
        (symbol_short!("OWN_XFER"),),
        OwnershipTransferredEvent {
            previous_owner,
            new_owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

// ── Treasury rotation ────────────────────────────────────────────────────────

/// Rotates the treasury address. Only the current treasury may call this.
pub fn set_treasury(
    env: &Env,
    caller: &Address,
    new_treasury: Option<Address>,
) -> Result<(), LedgerError> {
    let current = treasury(env).ok_or(LedgerError::NotInitialized)?;
    if current != *caller {
        return Err(LedgerError::Unauthorized);
    }
    let next = new_treasury.ok_or(LedgerError::ZeroAddress)?;

    env.storage().instance().set(&TREASURY, &next);

    env.events().publish(
        (symbol_short!("TRSY_SET"), next.clone()),
        TreasurySetEvent {
            previous_treasury: current,
            new_treasury: next,
            timestamp: env.ledger().timestamp(),
        },
    );
    Ok(())
}
