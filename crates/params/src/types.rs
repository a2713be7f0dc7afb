//! Types for a single version of the staking protocol parameters.

use bitcoin::Amount;
use serde::{Deserialize, Serialize};

use crate::errors::ParamsError;

/// One version of the staking protocol parameters.
///
/// A version becomes active at its bitcoin activation height and stays active
/// until a later version activates. All limits are inherent to the protocol
/// and are supplied by the chain, not chosen by this node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionedStakingParams {
    /// Monotonically increasing parameter version.
    pub version: u32,

    /// The bitcoin block height at which this version activates.
    pub btc_activation_height: u32,

    /// Number of covenant committee signatures required on slashing paths.
    pub covenant_quorum: u32,

    /// The minimum [`Amount`] a single delegation may stake.
    pub min_staking_amount: Amount,

    /// The maximum [`Amount`] a single delegation may stake.
    pub max_staking_amount: Amount,

    /// The minimum staking timelock in bitcoin blocks.
    pub min_staking_time: u16,

    /// The maximum staking timelock in bitcoin blocks.
    pub max_staking_time: u16,

    /// The unbonding timelock in bitcoin blocks.
    pub unbonding_time: u16,

    /// The fee paid by the unbonding transaction.
    pub unbonding_fee: Amount,

    /// Cap on finality providers a delegation may be split across, when the
    /// active version enforces one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_finality_providers: Option<u32>,
}

impl VersionedStakingParams {
    /// Checks that the ranges within this single version are internally
    /// consistent.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.covenant_quorum == 0 {
            return Err(ParamsError::InvalidRange {
                version: self.version,
                what: "covenant quorum must be non-zero",
            });
        }

        if self.min_staking_amount > self.max_staking_amount {
            return Err(ParamsError::InvalidRange {
                version: self.version,
                what: "min staking amount exceeds max",
            });
        }

        if self.min_staking_time > self.max_staking_time {
            return Err(ParamsError::InvalidRange {
                version: self.version,
                what: "min staking time exceeds max",
            });
        }

        if self.unbonding_time == 0 {
            return Err(ParamsError::InvalidRange {
                version: self.version,
                what: "unbonding time must be non-zero",
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params_v(version: u32, btc_activation_height: u32) -> VersionedStakingParams {
        VersionedStakingParams {
            version,
            btc_activation_height,
            covenant_quorum: 6,
            min_staking_amount: Amount::from_sat(50_000),
            max_staking_amount: Amount::from_btc(5.0).unwrap(),
            min_staking_time: 64_000,
            max_staking_time: 64_000,
            unbonding_time: 1_008,
            unbonding_fee: Amount::from_sat(10_000),
            max_finality_providers: None,
        }
    }

    #[test]
    fn test_versioned_params_serde() {
        let params = params_v(0, 857_910);
        let serialized = toml::to_string(&params).unwrap();

        let deserialized: VersionedStakingParams = toml::from_str(&serialized).unwrap();

        assert_eq!(params, deserialized);

        let params_toml = r#"
            version = 1
            btc_activation_height = 864790
            covenant_quorum = 6
            min_staking_amount = 50000
            max_staking_amount = 500000000
            min_staking_time = 64000
            max_staking_time = 64000
            unbonding_time = 1008
            unbonding_fee = 10000
        "#;
        assert!(
            toml::from_str::<VersionedStakingParams>(params_toml).is_ok(),
            "must be able to deserialize VersionedStakingParams from a toml"
        );
    }

    #[test]
    fn test_validate_rejects_inverted_ranges() {
        let mut params = params_v(3, 5);
        params.min_staking_amount = Amount::from_sat(10);
        params.max_staking_amount = Amount::from_sat(1);
        assert!(matches!(
            params.validate(),
            Err(ParamsError::InvalidRange { version: 3, .. })
        ));

        let mut params = params_v(4, 5);
        params.covenant_quorum = 0;
        assert!(matches!(
            params.validate(),
            Err(ParamsError::InvalidRange { version: 4, .. })
        ));
    }
}
