//! This crate contains the versioned staking protocol parameters that dictate
//! which limits and timelocks apply to a delegation, keyed by the parameter
//! version active at a given bitcoin block height.

pub mod errors;
pub mod set;
pub mod types;

pub use errors::ParamsError;
pub use set::StakingParamsSet;
pub use types::VersionedStakingParams;
