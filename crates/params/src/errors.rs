//! Error types for staking parameter validation and loading.

use thiserror::Error;

/// Unified error type for constructing or loading a [`crate::StakingParamsSet`].
#[derive(Debug, Error)]
pub enum ParamsError {
    /// The parameter set contains no versions at all.
    #[error("staking parameter set must not be empty")]
    Empty,

    /// Versions must be strictly ascending across the set.
    #[error("staking parameter versions out of order: {prev} precedes {next}")]
    UnsortedVersions {
        /// The version that appears first in the set.
        prev: u32,

        /// The offending version that follows it.
        next: u32,
    },

    /// Activation heights must be non-decreasing across ascending versions.
    #[error("activation height decreases at version {version}")]
    UnsortedActivationHeights {
        /// The version whose activation height precedes that of the version
        /// before it.
        version: u32,
    },

    /// A single version carries an internally inconsistent range.
    #[error("invalid range in version {version}: {what}")]
    InvalidRange {
        /// The offending version.
        version: u32,

        /// Description of the inconsistent field pair.
        what: &'static str,
    },

    /// Errors from deserializing a TOML parameter file.
    #[error("malformed staking parameter file: {0}")]
    Toml(#[from] toml::de::Error),
}
