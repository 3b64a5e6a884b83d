//! Shared setup for the property suites.

use chef::{ChefContract, ChefContractClient};
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient};
use soroban_sdk::{Address, Env};

pub struct Harness {
    pub env: Env,
    pub chef: ChefContractClient<'static>,
    pub owner: Address,
    pub reward_token: Address,
}

impl Harness {
    /// A funded chef emitting `reward_per_epoch`, at epoch 1.
    pub fn new(reward_per_epoch: i128) -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().set_sequence_number(1);

        let reward_token = env
            .register_stellar_asset_contract_v2(Address::generate(&env))
            .address();
        let contract_id = env.register(ChefContract, ());
        let chef = ChefContractClient::new(&env, &contract_id);

        let owner = Address::generate(&env);
        chef.initialize(&owner, &reward_token, &reward_per_epoch, &owner);
        StellarAssetClient::new(&env, &reward_token).mint(&contract_id, &i64::MAX.into());

        Harness {
            env,
            chef,
            owner,
            reward_token,
        }
    }

    /// Registers a pool with a fresh staked token. Returns `(pool_id, token)`.
    pub fn add_pool(&self, weight: u64) -> (u32, Address) {
        let token = self
            .env
            .register_stellar_asset_contract_v2(Address::generate(&self.env))
            .address();
        let pool_id = self.chef.add(&self.owner, &weight, &token, &None);
        (pool_id, token)
    }

    /// A fresh staker holding `amount` of `token`.
    pub fn staker(&self, token: &Address, amount: i128) -> Address {
        let staker = Address::generate(&self.env);
        if amount > 0 {
            StellarAssetClient::new(&self.env, token).mint(&staker, &amount);
        }
        staker
    }

    pub fn advance(&self, epochs: u32) {
        let next = self.env.ledger().sequence() + epochs;
        self.env.ledger().set_sequence_number(next);
    }

    pub fn balance(&self, token: &Address, holder: &Address) -> i128 {
        TokenClient::new(&self.env, token).balance(holder)
    }
}
