//! A validated, non-empty collection of versioned staking parameters.

use serde::Deserialize;

use crate::{errors::ParamsError, types::VersionedStakingParams};

/// A non-empty set of [`VersionedStakingParams`], ordered by strictly
/// ascending version with non-decreasing activation heights.
///
/// The ordering invariants are established at construction, so every query on
/// the set can rely on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakingParamsSet {
    versions: Vec<VersionedStakingParams>,
}

/// On-disk shape of a staking parameter file.
#[derive(Debug, Deserialize)]
struct ParamsFile {
    params: Vec<VersionedStakingParams>,
}

impl StakingParamsSet {
    /// Creates a validated set from a list of parameter versions.
    ///
    /// The list must be non-empty, sorted by strictly ascending version, have
    /// non-decreasing activation heights, and every version must pass
    /// [`VersionedStakingParams::validate`].
    pub fn new(versions: Vec<VersionedStakingParams>) -> Result<Self, ParamsError> {
        if versions.is_empty() {
            return Err(ParamsError::Empty);
        }

        for params in &versions {
            params.validate()?;
        }

        for pair in versions.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);

            if prev.version >= next.version {
                return Err(ParamsError::UnsortedVersions {
                    prev: prev.version,
                    next: next.version,
                });
            }

            if prev.btc_activation_height > next.btc_activation_height {
                return Err(ParamsError::UnsortedActivationHeights {
                    version: next.version,
                });
            }
        }

        Ok(Self { versions })
    }

    /// Loads and validates a set from the TOML parameter file format, a
    /// `[[params]]` array of tables.
    pub fn from_toml_str(raw: &str) -> Result<Self, ParamsError> {
        let file: ParamsFile = toml::from_str(raw)?;
        Self::new(file.params)
    }

    /// The most recent parameter version in the set.
    pub fn latest(&self) -> &VersionedStakingParams {
        self.versions
            .last()
            .expect("set is non-empty by construction")
    }

    /// Looks up an exact parameter version.
    pub fn by_version(&self, version: u32) -> Option<&VersionedStakingParams> {
        self.versions
            .binary_search_by_key(&version, |p| p.version)
            .ok()
            .map(|idx| &self.versions[idx])
    }

    /// The parameter version active at the given bitcoin block height, i.e.
    /// the last version whose activation height is at or below it.
    ///
    /// Returns `None` for heights before the first activation.
    pub fn at_height(&self, height: u32) -> Option<&VersionedStakingParams> {
        let idx = self
            .versions
            .partition_point(|p| p.btc_activation_height <= height);

        idx.checked_sub(1).map(|idx| &self.versions[idx])
    }

    /// All versions in the set, in ascending order.
    pub fn versions(&self) -> &[VersionedStakingParams] {
        &self.versions
    }

    /// Number of parameter versions in the set (always at least one).
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Always false; the set is non-empty by construction. Present to satisfy
    /// the usual `len`/`is_empty` pairing.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl<'a> IntoIterator for &'a StakingParamsSet {
    type Item = &'a VersionedStakingParams;
    type IntoIter = std::slice::Iter<'a, VersionedStakingParams>;

    fn into_iter(self) -> Self::IntoIter {
        self.versions.iter()
    }
}

#[cfg(test)]
mod tests {
    use bitcoin::Amount;
    use proptest::prelude::*;

    use super::*;

    fn params_v(version: u32, btc_activation_height: u32) -> VersionedStakingParams {
        VersionedStakingParams {
            version,
            btc_activation_height,
            covenant_quorum: 6,
            min_staking_amount: Amount::from_sat(50_000),
            max_staking_amount: Amount::from_btc(5.0).unwrap(),
            min_staking_time: 150,
            max_staking_time: 64_000,
            unbonding_time: 1_008,
            unbonding_fee: Amount::from_sat(10_000),
            max_finality_providers: Some(1),
        }
    }

    #[test]
    fn test_empty_set_is_rejected() {
        assert!(matches!(
            StakingParamsSet::new(vec![]),
            Err(ParamsError::Empty)
        ));
    }

    #[test]
    fn test_unsorted_versions_are_rejected() {
        let result = StakingParamsSet::new(vec![params_v(1, 100), params_v(0, 200)]);
        assert!(matches!(
            result,
            Err(ParamsError::UnsortedVersions { prev: 1, next: 0 })
        ));

        let result = StakingParamsSet::new(vec![params_v(1, 100), params_v(1, 200)]);
        assert!(matches!(result, Err(ParamsError::UnsortedVersions { .. })));
    }

    #[test]
    fn test_decreasing_activation_heights_are_rejected() {
        let result = StakingParamsSet::new(vec![params_v(0, 200), params_v(1, 100)]);
        assert!(matches!(
            result,
            Err(ParamsError::UnsortedActivationHeights { version: 1 })
        ));
    }

    #[test]
    fn test_lookups() {
        let set =
            StakingParamsSet::new(vec![params_v(0, 100), params_v(1, 200), params_v(2, 300)])
                .unwrap();

        assert_eq!(set.len(), 3);
        assert_eq!(set.latest().version, 2);

        assert_eq!(set.by_version(1).unwrap().btc_activation_height, 200);
        assert!(set.by_version(7).is_none());

        assert!(set.at_height(99).is_none());
        assert_eq!(set.at_height(100).unwrap().version, 0);
        assert_eq!(set.at_height(299).unwrap().version, 1);
        assert_eq!(set.at_height(u32::MAX).unwrap().version, 2);
    }

    #[test]
    fn test_params_file_toml() {
        let raw = r#"
            [[params]]
            version = 0
            btc_activation_height = 857910
            covenant_quorum = 6
            min_staking_amount = 50000
            max_staking_amount = 500000000
            min_staking_time = 64000
            max_staking_time = 64000
            unbonding_time = 1008
            unbonding_fee = 10000

            [[params]]
            version = 1
            btc_activation_height = 864790
            covenant_quorum = 6
            min_staking_amount = 50000
            max_staking_amount = 5000000000
            min_staking_time = 64000
            max_staking_time = 64000
            unbonding_time = 1008
            unbonding_fee = 2000
            max_finality_providers = 1
        "#;

        let set = StakingParamsSet::from_toml_str(raw).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.latest().unbonding_fee, Amount::from_sat(2_000));

        let empty = StakingParamsSet::from_toml_str("params = []");
        assert!(matches!(empty, Err(ParamsError::Empty)));
    }

    proptest! {
        // at_height must agree with a linear scan over activation heights.
        #[test]
        fn proptest_at_height_matches_linear_scan(
            heights in proptest::collection::vec(0u32..1_000, 1..8),
            query in 0u32..1_200,
        ) {
            let mut heights = heights;
            heights.sort_unstable();

            let versions = heights
                .iter()
                .enumerate()
                .map(|(i, h)| params_v(i as u32, *h))
                .collect::<Vec<_>>();
            let set = StakingParamsSet::new(versions.clone()).unwrap();

            let expected = versions
                .iter()
                .filter(|p| p.btc_activation_height <= query)
                .next_back();

            prop_assert_eq!(set.at_height(query), expected);
        }
    }
}
