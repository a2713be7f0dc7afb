//! Test fixtures shared across the staking workspace: scriptable mock wallets
//! and parameter-set builders.

pub mod params;
pub mod wallet;

pub use params::{params_set, versioned_params};
pub use wallet::{empty_psbt, sample_bbn_msg, BtcWalletCall, MockBbnWallet, MockBtcWallet};
