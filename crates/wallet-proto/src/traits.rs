//! Wallet capability traits.
//!
//! These are deliberately object-safe: a staking session captures the wallets
//! behind `Arc<dyn _>` at construction time and holds them for its lifetime,
//! regardless of which concrete connector backs them.

use async_trait::async_trait;
use bitcoin::{Network, Psbt};

use crate::{
    errors::WalletError,
    types::{BbnMsg, SignMessageType, SignPsbtOptions, SignedBbnTx},
};

/// A connected bitcoin wallet capable of signing PSBTs and messages.
#[async_trait]
pub trait BtcWallet: Send + Sync {
    /// The bitcoin network the wallet is operating on, if it has one.
    fn network(&self) -> Option<Network>;

    /// Whether the wallet currently has an active connection.
    fn connected(&self) -> bool;

    /// Signs the inputs of `psbt` that the wallet controls and returns the
    /// updated PSBT.
    async fn sign_psbt(
        &self,
        psbt: Psbt,
        options: Option<&SignPsbtOptions>,
    ) -> Result<Psbt, WalletError>;

    /// Signs an arbitrary message with the wallet's staker key, returning the
    /// base64-encoded signature.
    async fn sign_message(
        &self,
        message: &str,
        sig_type: SignMessageType,
    ) -> Result<String, WalletError>;
}

/// A connected Babylon wallet capable of signing chain transactions.
#[async_trait]
pub trait BbnWallet: Send + Sync {
    /// Whether the wallet currently has an active connection.
    fn connected(&self) -> bool;

    /// Signs a transaction wrapping the given typed message.
    async fn sign_tx(&self, msg: BbnMsg) -> Result<SignedBbnTx, WalletError>;
}
