//! Scriptable in-memory wallets implementing the `wallet-proto` capabilities.
//!
//! The mocks echo payloads back on success, record every call they serve, and
//! can be scripted to fail with a specific [`WalletError`].

use std::sync::Mutex;

use async_trait::async_trait;
use bitcoin::{Network, Psbt};
use wallet_proto::{
    BbnMsg, BbnWallet, BtcWallet, SignMessageType, SignPsbtOptions, SignedBbnTx, WalletError,
};

/// One recorded call against a [`MockBtcWallet`].
#[derive(Debug, Clone, PartialEq)]
pub enum BtcWalletCall {
    /// A PSBT signing request with the options it carried.
    SignPsbt {
        /// Options forwarded with the request.
        options: Option<SignPsbtOptions>,
    },

    /// A message signing request.
    SignMessage {
        /// The message that was to be signed.
        message: String,

        /// The requested signature algorithm.
        sig_type: SignMessageType,
    },
}

/// A scriptable bitcoin wallet.
#[derive(Debug)]
pub struct MockBtcWallet {
    network: Option<Network>,
    connected: bool,
    message_signature: String,
    fail_with: Mutex<Option<WalletError>>,
    calls: Mutex<Vec<BtcWalletCall>>,
}

impl MockBtcWallet {
    /// A connected wallet on the given network, signing messages with a fixed
    /// placeholder signature.
    pub fn connected_on(network: Network) -> Self {
        Self {
            network: Some(network),
            connected: true,
            message_signature: "mock-signature".to_owned(),
            fail_with: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A wallet with no connection and no network.
    pub fn disconnected() -> Self {
        Self {
            network: None,
            connected: false,
            message_signature: String::new(),
            fail_with: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A connected wallet that has not settled on a network yet.
    pub fn connected_without_network() -> Self {
        Self {
            network: None,
            ..Self::connected_on(Network::Signet)
        }
    }

    /// Sets the signature string returned by `sign_message`.
    pub fn with_message_signature(mut self, signature: impl Into<String>) -> Self {
        self.message_signature = signature.into();
        self
    }

    /// Scripts every subsequent signing call to fail with `err`.
    pub fn fail_with(&self, err: WalletError) {
        *self.fail_with.lock().expect("mock lock") = Some(err);
    }

    /// All calls served so far, in order.
    pub fn calls(&self) -> Vec<BtcWalletCall> {
        self.calls.lock().expect("mock lock").clone()
    }

    fn scripted_failure(&self) -> Option<WalletError> {
        self.fail_with.lock().expect("mock lock").clone()
    }
}

#[async_trait]
impl BtcWallet for MockBtcWallet {
    fn network(&self) -> Option<Network> {
        self.network
    }

    fn connected(&self) -> bool {
        self.connected
    }

    async fn sign_psbt(
        &self,
        psbt: Psbt,
        options: Option<&SignPsbtOptions>,
    ) -> Result<Psbt, WalletError> {
        self.calls.lock().expect("mock lock").push(BtcWalletCall::SignPsbt {
            options: options.cloned(),
        });
        match self.scripted_failure() {
            Some(err) => Err(err),
            None => Ok(psbt),
        }
    }

    async fn sign_message(
        &self,
        message: &str,
        sig_type: SignMessageType,
    ) -> Result<String, WalletError> {
        self.calls
            .lock()
            .expect("mock lock")
            .push(BtcWalletCall::SignMessage {
                message: message.to_owned(),
                sig_type,
            });
        match self.scripted_failure() {
            Some(err) => Err(err),
            None => Ok(self.message_signature.clone()),
        }
    }
}

/// A scriptable Babylon wallet.
#[derive(Debug)]
pub struct MockBbnWallet {
    connected: bool,
    fail_with: Mutex<Option<WalletError>>,
    calls: Mutex<Vec<BbnMsg>>,
}

impl MockBbnWallet {
    /// A connected wallet.
    pub fn connected() -> Self {
        Self {
            connected: true,
            fail_with: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A wallet with no connection.
    pub fn disconnected() -> Self {
        Self {
            connected: false,
            ..Self::connected()
        }
    }

    /// Scripts every subsequent signing call to fail with `err`.
    pub fn fail_with(&self, err: WalletError) {
        *self.fail_with.lock().expect("mock lock") = Some(err);
    }

    /// All messages signed so far, in order.
    pub fn calls(&self) -> Vec<BbnMsg> {
        self.calls.lock().expect("mock lock").clone()
    }
}

#[async_trait]
impl BbnWallet for MockBbnWallet {
    fn connected(&self) -> bool {
        self.connected
    }

    async fn sign_tx(&self, msg: BbnMsg) -> Result<SignedBbnTx, WalletError> {
        // Echo a digest of the type URL so callers can tell responses apart.
        let tx_bytes = msg.type_url.as_bytes().to_vec();
        self.calls.lock().expect("mock lock").push(msg);
        match self.fail_with.lock().expect("mock lock").clone() {
            Some(err) => Err(err),
            None => Ok(SignedBbnTx { tx_bytes }),
        }
    }
}

/// A PSBT over an empty unsigned transaction, good enough for passthrough
/// assertions.
pub fn empty_psbt() -> Psbt {
    use bitcoin::{absolute, transaction, Transaction};

    let tx = Transaction {
        version: transaction::Version::TWO,
        lock_time: absolute::LockTime::ZERO,
        input: vec![],
        output: vec![],
    };

    Psbt::from_unsigned_tx(tx).expect("unsigned tx must convert to psbt")
}

/// A plausible delegation-creation message for the Babylon chain.
pub fn sample_bbn_msg() -> BbnMsg {
    BbnMsg {
        type_url: "/babylon.btcstaking.v1.MsgCreateBTCDelegation".to_owned(),
        value: serde_json::json!({
            "stakerAddr": "bbn1qpervlw34dgqlvm6e54qxuwj3pyqnjnkem5u5t",
            "stakingValue": 50_000,
        }),
    }
}
