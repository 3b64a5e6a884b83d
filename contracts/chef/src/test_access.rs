extern crate std;

use common::LedgerError;
use soroban_sdk::{testutils::Address as _, token::StellarAssetClient, Address, Env};

use crate::{ChefContract, ChefContractClient};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn setup() -> (Env, ChefContractClient<'static>, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let reward_token = env.register_stellar_asset_contract_v2(Address::generate(&env));

    let contract_id = env.register(ChefContract, ());
    let client = ChefContractClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    let treasury = Address::generate(&env);
    client.initialize(&owner, &reward_token.address(), &100, &treasury);

    StellarAssetClient::new(&env, &reward_token.address())
        .mock_all_auths()
        .mint(&contract_id, &1_000_000i128);

    (env, client, owner, treasury)
}

fn new_token(env: &Env) -> Address {
    env.register_stellar_asset_contract_v2(Address::generate(env))
        .address()
}

// ── Direct ownership transfer ────────────────────────────────────────────────

#[test]
fn test_direct_transfer_hands_over_immediately() {
    let (env, client, owner, _) = setup();
    let next = Address::generate(&env);

    client.transfer_ownership(&owner, &Some(next.clone()), &true, &false);
    assert_eq!(client.owner(), Some(next.clone()));
    assert_eq!(client.pending_owner(), None);

    // The old owner lost its rights, the new one has them.
    let result = client.try_add(&owner, &10, &new_token(&env), &None);
    match result {
        Err(Ok(e)) => assert_eq!(e, LedgerError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    client.add(&next, &10, &new_token(&env), &None);
    assert_eq!(client.pool_count(), 1);
}

#[test]
fn test_direct_transfer_to_nobody_requires_renounce() {
    let (_env, client, owner, _) = setup();

    let result = client.try_transfer_ownership(&owner, &None, &true, &false);
    match result {
        Err(Ok(e)) => assert_eq!(e, LedgerError::ZeroAddress),
        _ => unreachable!("Expected ZeroAddress error"),
    }
    assert_eq!(client.owner(), Some(owner));
}

#[test]
fn test_renounce_leaves_contract_ownerless() {
    let (env, client, owner, _) = setup();

    client.transfer_ownership(&owner, &None, &true, &true);
    assert_eq!(client.owner(), None);

    let result = client.try_set_reward_per_epoch(&owner, &1);
    match result {
        Err(Ok(e)) => assert_eq!(e, LedgerError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    let result = client.try_add(&owner, &1, &new_token(&env), &None);
    assert!(result.is_err());
}

// ── Staged ownership transfer ────────────────────────────────────────────────

#[test]
fn test_staged_transfer_requires_claim() {
    let (env, client, owner, _) = setup();
    let next = Address::generate(&env);

    client.transfer_ownership(&owner, &Some(next.clone()), &false, &false);
    assert_eq!(client.owner(), Some(owner.clone()));
    assert_eq!(client.pending_owner(), Some(next.clone()));

    client.claim_ownership(&next);
    assert_eq!(client.owner(), Some(next));
    assert_eq!(client.pending_owner(), None);
}

#[test]
fn test_only_pending_owner_can_claim() {
    let (env, client, owner, _) = setup();
    let next = Address::generate(&env);
    let stranger = Address::generate(&env);

    // Nothing pending yet.
    match client.try_claim_ownership(&stranger) {
        Err(Ok(e)) => assert_eq!(e, LedgerError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }

    client.transfer_ownership(&owner, &Some(next.clone()), &false, &false);
    match client.try_claim_ownership(&stranger) {
        Err(Ok(e)) => assert_eq!(e, LedgerError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    assert_eq!(client.owner(), Some(owner));
}

#[test]
fn test_staged_transfer_can_be_withdrawn() {
    let (env, client, owner, _) = setup();
    let next = Address::generate(&env);

    client.transfer_ownership(&owner, &Some(next.clone()), &false, &false);
    client.transfer_ownership(&owner, &None, &false, &false);
    assert_eq!(client.pending_owner(), None);

    match client.try_claim_ownership(&next) {
        Err(Ok(e)) => assert_eq!(e, LedgerError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_non_owner_cannot_transfer() {
    let (env, client, _owner, _) = setup();
    let stranger = Address::generate(&env);

    let result = client.try_transfer_ownership(&stranger, &Some(stranger.clone()), &true, &false);
    match result {
        Err(Ok(e)) => assert_eq!(e, LedgerError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

// ── Treasury rotation ────────────────────────────────────────────────────────

#[test]
fn test_treasury_rotates_itself() {
    let (env, client, _owner, treasury) = setup();
    let bob = Address::generate(&env);
    let alice = Address::generate(&env);

    assert_eq!(client.treasury(), Some(treasury.clone()));

    client.set_treasury(&treasury, &Some(bob.clone()));
    assert_eq!(client.treasury(), Some(bob.clone()));

    client.set_treasury(&bob, &Some(alice.clone()));
    assert_eq!(client.treasury(), Some(alice));
}

#[test]
fn test_others_cannot_rotate_treasury() {
    let (env, client, owner, treasury) = setup();
    let bob = Address::generate(&env);

    let result = client.try_set_treasury(&bob, &Some(bob.clone()));
    match result {
        Err(Ok(e)) => assert_eq!(e, LedgerError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }

    // Not even the owner.
    let result = client.try_set_treasury(&owner, &Some(owner.clone()));
    match result {
        Err(Ok(e)) => assert_eq!(e, LedgerError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    assert_eq!(client.treasury(), Some(treasury));
}

#[test]
fn test_treasury_cannot_be_cleared() {
    let (_env, client, _owner, treasury) = setup();

    let result = client.try_set_treasury(&treasury, &None);
    match result {
        Err(Ok(e)) => assert_eq!(e, LedgerError::ZeroAddress),
        _ => unreachable!("Expected ZeroAddress error"),
    }
    assert_eq!(client.treasury(), Some(treasury));
}
