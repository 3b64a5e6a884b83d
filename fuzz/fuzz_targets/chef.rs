#![no_main]

use arbitrary::Arbitrary;
use chef::{ChefContract, ChefContractClient};
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};

const STAKERS: usize = 4;
const FUNDING: i128 = 1_000_000;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Deposit { funder: u8, beneficiary: u8, pool: u8, amount: u32 },
    Withdraw { staker: u8, pool: u8, amount: u32 },
    Harvest { staker: u8, pool: u8 },
    EmergencyWithdraw { staker: u8, pool: u8 },
    AdvanceEpoch { epochs: u8 },
    SetWeight { pool: u8, weight: u16 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_sequence_number(1);

    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(ChefContract, ());
    let client = ChefContractClient::new(&env, &contract_id);
    let owner = Address::generate(&env);
    client.initialize(&owner, &reward_token, &1_000, &owner);
    StellarAssetClient::new(&env, &reward_token).mint(&contract_id, &(i64::MAX as i128));

    let tokens: [Address; 2] = core::array::from_fn(|i| {
        let token = env
            .register_stellar_asset_contract_v2(Address::generate(&env))
            .address();
        client.add(&owner, &(10 * (i as u64 + 1)), &token, &None);
        token
    });

    let stakers: Vec<Address> = (0..STAKERS)
        .map(|_| {
            let staker = Address::generate(&env);
            for token in &tokens {
                StellarAssetClient::new(&env, token).mint(&staker, &FUNDING);
            }
            staker
        })
        .collect();

    // Principal must be conserved after every action, failed or not.
    for action in actions {
        match action {
            FuzzAction::Deposit { funder, beneficiary, pool, amount } => {
                let funder = &stakers[funder as usize % STAKERS];
                let beneficiary = &stakers[beneficiary as usize % STAKERS];
                let pool_id = pool as u32 % 2;
                let _ = client.try_deposit(funder, &pool_id, &(amount as i128), beneficiary);
            }
            FuzzAction::Withdraw { staker, pool, amount } => {
                let staker = &stakers[staker as usize % STAKERS];
                let _ = client.try_withdraw(staker, &(pool as u32 % 2), &(amount as i128), staker);
            }
            FuzzAction::Harvest { staker, pool } => {
                let staker = &stakers[staker as usize % STAKERS];
                let _ = client.try_harvest(staker, &(pool as u32 % 2), staker);
            }
            FuzzAction::EmergencyWithdraw { staker, pool } => {
                let staker = &stakers[staker as usize % STAKERS];
                let _ = client.try_emergency_withdraw(staker, &(pool as u32 % 2), staker);
            }
            FuzzAction::AdvanceEpoch { epochs } => {
                let next = env.ledger().sequence() + epochs as u32;
                env.ledger().set_sequence_number(next);
            }
            FuzzAction::SetWeight { pool, weight } => {
                let _ = client.try_set(&owner, &(pool as u32 % 2), &(weight as u64), &None, &false);
            }
        }

        for (pool_id, token) in tokens.iter().enumerate() {
            let pool_id = pool_id as u32;
            let token_client = TokenClient::new(&env, token);

            // Deposits may credit another staker, so only the totals balance.
            let mut staked = 0i128;
            let mut held = 0i128;
            for staker in &stakers {
                let position = client.user_info(&pool_id, staker);
                assert!(position.amount >= 0);
                staked += position.amount;
                held += token_client.balance(staker);
            }

            assert_eq!(held + staked, FUNDING * STAKERS as i128);
            assert_eq!(client.pool_info(&pool_id).total_staked, staked);
            assert_eq!(token_client.balance(&contract_id), staked);
        }
    }
});
