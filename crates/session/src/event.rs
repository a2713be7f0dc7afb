//! This module contains the signing-step event types and the in-process
//! channel that consumers use to observe them.

use std::{
    fmt,
    sync::{Arc, Mutex},
};

use serde::{Deserialize, Serialize};
use wallet_proto::SignPsbtOptions;

/// SigningStep is the phase marker emitted before each delegated signing call.
///
/// The tags are defined by the staking transaction-construction library; the
/// session assigns them no meaning and only forwards them to listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum SigningStep {
    /// Signing the staking transaction itself.
    Staking,

    /// Signing the slashing transaction attached to the staking output.
    StakingSlashing,

    /// Signing the unbonding transaction.
    Unbonding,

    /// Signing the slashing transaction attached to the unbonding output.
    UnbondingSlashing,

    /// Signing the proof-of-possession message.
    ProofOfPossession,

    /// Signing the delegation-creation message on the Babylon chain.
    CreateBtcDelegationMsg,

    /// Withdrawing a naturally expired stake.
    WithdrawStakingExpired,

    /// Withdrawing after the unbonding timelock elapsed.
    WithdrawEarlyUnbonded,

    /// Withdrawing the remainder of a slashed stake.
    WithdrawSlashing,
}

impl SigningStep {
    /// The kebab-case wire tag for this step, matching the serde rendering.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SigningStep::Staking => "staking",
            SigningStep::StakingSlashing => "staking-slashing",
            SigningStep::Unbonding => "unbonding",
            SigningStep::UnbondingSlashing => "unbonding-slashing",
            SigningStep::ProofOfPossession => "proof-of-possession",
            SigningStep::CreateBtcDelegationMsg => "create-btc-delegation-msg",
            SigningStep::WithdrawStakingExpired => "withdraw-staking-expired",
            SigningStep::WithdrawEarlyUnbonded => "withdraw-early-unbonded",
            SigningStep::WithdrawSlashing => "withdraw-slashing",
        }
    }
}

impl fmt::Display for SigningStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Callback invoked synchronously for every signing-step event.
///
/// PSBT signing events carry the request's [`SignPsbtOptions`]; message and
/// Babylon transaction signing events carry `None`.
pub type SigningListener = dyn Fn(SigningStep, Option<SignPsbtOptions>) + Send + Sync;

/// An in-process, in-memory registry of [`SigningListener`]s.
///
/// Clones share the same registry, so the factory, its sessions, and the UI
/// code driving progress indicators all observe one stream of events.
/// Emission is fire-and-forget: whoever is registered at emission time is
/// invoked, in registration order, and nothing is retained for later
/// subscribers.
#[derive(Clone, Default)]
pub struct SigningEvents {
    listeners: Arc<Mutex<Vec<Arc<SigningListener>>>>,
}

impl SigningEvents {
    /// Creates a channel with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener for all future events.
    ///
    /// Registrations are additive: subscribing the same `Arc` twice means it
    /// is invoked twice per event until one registration is removed.
    pub fn subscribe(&self, listener: Arc<SigningListener>) {
        self.lock().push(listener);
    }

    /// Removes at most one registration of `listener`, matched by pointer
    /// identity. The most recently added match is removed; unsubscribing a
    /// listener that is not registered is a no-op.
    pub fn unsubscribe(&self, listener: &Arc<SigningListener>) {
        let mut listeners = self.lock();
        if let Some(idx) = listeners.iter().rposition(|l| Arc::ptr_eq(l, listener)) {
            listeners.remove(idx);
        }
    }

    /// Synchronously invokes every listener registered at the time of the
    /// call, in registration order.
    ///
    /// The registry lock is released before the callbacks run, so a listener
    /// may subscribe or unsubscribe reentrantly; such changes take effect
    /// from the next emission.
    pub fn emit(&self, step: SigningStep, options: Option<SignPsbtOptions>) {
        let listeners = self.lock().clone();
        for listener in listeners {
            listener(step, options.clone());
        }
    }

    /// Number of current registrations.
    pub fn listener_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Arc<SigningListener>>> {
        self.listeners
            .lock()
            .expect("signing listener registry must not be poisoned")
    }
}

impl fmt::Debug for SigningEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningEvents")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
