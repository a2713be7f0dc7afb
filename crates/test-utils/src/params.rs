//! Parameter-set fixtures.

use bitcoin::Amount;
use staking_params::{StakingParamsSet, VersionedStakingParams};

/// A single plausible mainnet-ish parameter version.
pub fn versioned_params(version: u32, btc_activation_height: u32) -> VersionedStakingParams {
    VersionedStakingParams {
        version,
        btc_activation_height,
        covenant_quorum: 6,
        min_staking_amount: Amount::from_sat(50_000),
        max_staking_amount: Amount::from_btc(5.0).expect("valid btc amount"),
        min_staking_time: 150,
        max_staking_time: 64_000,
        unbonding_time: 1_008,
        unbonding_fee: Amount::from_sat(10_000),
        max_finality_providers: Some(1),
    }
}

/// A validated set of `n` consecutive parameter versions, activating every
/// 1000 blocks from height 100.
pub fn params_set(n: u32) -> StakingParamsSet {
    let versions = (0..n)
        .map(|v| versioned_params(v, 100 + 1_000 * v))
        .collect();
    StakingParamsSet::new(versions).expect("fixture params must validate")
}
