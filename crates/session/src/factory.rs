//! Capability-gated construction of [`StakingSession`]s.

use std::{fmt, sync::Arc};

use staking_params::StakingParamsSet;
use tracing::info;
use wallet_proto::{BbnWallet, BtcWallet};

use crate::{
    event::{SigningEvents, SigningListener},
    session::StakingSession,
};

/// Per-capability readiness snapshot for session creation.
///
/// One boolean per precondition, so a failed creation can report exactly
/// which capability was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessReport {
    /// The bitcoin wallet reports an active network.
    pub btc_network: bool,

    /// The bitcoin wallet is connected.
    pub btc_connected: bool,

    /// The Babylon wallet is connected.
    pub bbn_connected: bool,

    /// A PSBT signing capability is available.
    pub sign_psbt: bool,

    /// A message signing capability is available.
    pub sign_message: bool,

    /// A Babylon transaction signing capability is available.
    pub sign_bbn_tx: bool,

    /// A non-empty set of versioned protocol parameters is available.
    pub versioned_params: bool,
}

impl ReadinessReport {
    /// Whether every precondition holds.
    pub const fn is_ready(&self) -> bool {
        self.btc_network
            && self.btc_connected
            && self.bbn_connected
            && self.sign_psbt
            && self.sign_message
            && self.sign_bbn_tx
            && self.versioned_params
    }

    /// Names of the preconditions that do not hold, in report order.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (self.btc_network, "btc_network"),
            (self.btc_connected, "btc_connected"),
            (self.bbn_connected, "bbn_connected"),
            (self.sign_psbt, "sign_psbt"),
            (self.sign_message, "sign_message"),
            (self.sign_bbn_tx, "sign_bbn_tx"),
            (self.versioned_params, "versioned_params"),
        ]
        .into_iter()
        .filter_map(|(ok, name)| (!ok).then_some(name))
        .collect()
    }
}

/// Factory for [`StakingSession`]s over whatever capabilities are currently
/// available.
///
/// Capabilities arrive independently as wallets connect and parameters load;
/// the factory holds each as an explicit option and hands out a session only
/// once all of them are present. A missing capability is never an error:
/// [`SigningSessionFactory::create_session`] simply returns `None` and logs a
/// structured diagnostic.
#[derive(Clone, Default)]
pub struct SigningSessionFactory {
    btc_wallet: Option<Arc<dyn BtcWallet>>,
    bbn_wallet: Option<Arc<dyn BbnWallet>>,
    params: Option<StakingParamsSet>,
    events: SigningEvents,
}

impl SigningSessionFactory {
    /// Creates a factory with no capabilities and a fresh event channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the bitcoin wallet capability.
    pub fn with_btc_wallet(mut self, wallet: Arc<dyn BtcWallet>) -> Self {
        self.btc_wallet = Some(wallet);
        self
    }

    /// Sets the Babylon wallet capability.
    pub fn with_bbn_wallet(mut self, wallet: Arc<dyn BbnWallet>) -> Self {
        self.bbn_wallet = Some(wallet);
        self
    }

    /// Sets the versioned protocol parameters. The set type is non-empty by
    /// construction, so presence alone satisfies the parameter precondition.
    pub fn with_params(mut self, params: StakingParamsSet) -> Self {
        self.params = Some(params);
        self
    }

    /// Computes the current readiness snapshot.
    pub fn readiness(&self) -> ReadinessReport {
        let btc = self.btc_wallet.as_deref();

        ReadinessReport {
            btc_network: btc.is_some_and(|w| w.network().is_some()),
            btc_connected: btc.is_some_and(|w| w.connected()),
            bbn_connected: self.bbn_wallet.as_deref().is_some_and(|w| w.connected()),
            sign_psbt: btc.is_some(),
            sign_message: btc.is_some(),
            sign_bbn_tx: self.bbn_wallet.is_some(),
            versioned_params: self.params.is_some(),
        }
    }

    /// Whether [`SigningSessionFactory::create_session`] would currently
    /// succeed.
    pub fn is_ready(&self) -> bool {
        self.readiness().is_ready()
    }

    /// Creates a signing session over the captured capabilities.
    ///
    /// Returns `None` without raising when any precondition fails, after
    /// logging one structured event enumerating the per-capability state.
    pub fn create_session(&self) -> Option<StakingSession> {
        let report = self.readiness();
        if !report.is_ready() {
            info!(
                btc_network = report.btc_network,
                btc_connected = report.btc_connected,
                bbn_connected = report.bbn_connected,
                sign_psbt = report.sign_psbt,
                sign_message = report.sign_message,
                sign_bbn_tx = report.sign_bbn_tx,
                versioned_params = report.versioned_params,
                "staking session capabilities incomplete"
            );
            return None;
        }

        let btc_wallet = self.btc_wallet.clone()?;
        let bbn_wallet = self.bbn_wallet.clone()?;
        let network = btc_wallet.network()?;
        let params = self.params.clone()?;

        Some(StakingSession::new(
            network,
            params,
            btc_wallet,
            bbn_wallet,
            self.events.clone(),
        ))
    }

    /// Registers a listener on the shared signing event channel.
    pub fn subscribe(&self, listener: Arc<SigningListener>) {
        self.events.subscribe(listener);
    }

    /// Removes one registration of `listener` from the shared channel.
    pub fn unsubscribe(&self, listener: &Arc<SigningListener>) {
        self.events.unsubscribe(listener);
    }

    /// A handle to the shared event channel. Sessions created by this factory
    /// emit on the same channel.
    pub fn events(&self) -> SigningEvents {
        self.events.clone()
    }
}

impl fmt::Debug for SigningSessionFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningSessionFactory")
            .field("readiness", &self.readiness())
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}
