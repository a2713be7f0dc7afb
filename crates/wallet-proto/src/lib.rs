//! Capability definitions for the wallets a staking session signs with.
//!
//! The wallets themselves are external collaborators (browser extensions,
//! hardware devices, remote signers); this crate only pins down the surface
//! the staking services rely on.

pub mod errors;
pub mod traits;
pub mod types;

pub use errors::WalletError;
pub use traits::{BbnWallet, BtcWallet};
pub use types::{BbnMsg, ContractInfo, SignMessageType, SignPsbtOptions, SignedBbnTx};
