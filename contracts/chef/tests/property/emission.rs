//! Property tests for the emission schedule.
//!
//! Invariants tested:
//! - A sole staker in a fully weighted pool harvests `reward_per_epoch × N`
//!   over N epochs, short by at most one unit of rounding.
//! - The reward index never decreases.
//! - Ids at or past `pool_count()` are always rejected.

use common::LedgerError;
use proptest::prelude::*;
use soroban_sdk::vec;

use crate::harness::Harness;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_sole_staker_collects_full_emission(
        reward_per_epoch in 0i128..10_000,
        stake in 1i128..1_000_000,
        gaps in prop::collection::vec(0u32..10, 1..10),
    ) {
        let h = Harness::new(reward_per_epoch);
        let (pool_id, token) = h.add_pool(1);
        let staker = h.staker(&token, stake);
        h.chef.deposit(&staker, &pool_id, &stake, &staker);

        let mut epochs = 0i128;
        let mut harvested = 0i128;
        let mut last_acc = 0i128;
        for gap in gaps {
            h.advance(gap);
            epochs += gap as i128;
            harvested += h.chef.harvest(&staker, &pool_id, &staker);

            let acc = h.chef.pool_info(&pool_id).acc_reward_per_share;
            prop_assert!(acc >= last_acc);
            last_acc = acc;
        }

        let expected = reward_per_epoch * epochs;
        prop_assert!(harvested <= expected);
        prop_assert!(expected - harvested <= 1);
        prop_assert_eq!(h.balance(&h.reward_token, &staker), harvested);
    }

    #[test]
    fn prop_unknown_pool_ids_rejected(pools in 0u32..4, offset in 0u32..1_000) {
        let h = Harness::new(100);
        for _ in 0..pools {
            h.add_pool(10);
        }
        let bad = pools + offset;

        prop_assert!(matches!(h.chef.try_update_pool(&bad), Err(Ok(LedgerError::PoolNotFound))));
        prop_assert!(matches!(
            h.chef.try_set(&h.owner, &bad, &1, &None, &false),
            Err(Ok(LedgerError::PoolNotFound))
        ));
        prop_assert!(matches!(
            h.chef.try_mass_update_pools(&vec![&h.env, bad]),
            Err(Ok(LedgerError::PoolNotFound))
        ));
        prop_assert_eq!(h.chef.pool_count(), pools);
        prop_assert_eq!(h.chef.total_alloc_weight(), 10 * pools as u64);
    }
}
