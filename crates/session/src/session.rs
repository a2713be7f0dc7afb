//! The signing session handed out by the factory.

use std::{fmt, sync::Arc};

use bitcoin::{Network, Psbt};
use staking_params::StakingParamsSet;
use wallet_proto::{
    BbnMsg, BbnWallet, BtcWallet, SignMessageType, SignPsbtOptions, SignedBbnTx, WalletError,
};

use crate::event::{SigningEvents, SigningStep};

/// A signing session over the wallets captured when the factory was ready.
///
/// Each operation emits exactly one [`SigningStep`] event synchronously,
/// before the delegated wallet call is first polled, and returns the wallet's
/// result verbatim. The session imposes no ordering or mutual exclusion on
/// concurrent calls and supports no cancellation beyond the wallet's own.
pub struct StakingSession {
    network: Network,
    params: StakingParamsSet,
    btc_wallet: Arc<dyn BtcWallet>,
    bbn_wallet: Arc<dyn BbnWallet>,
    events: SigningEvents,
}

impl StakingSession {
    pub(crate) fn new(
        network: Network,
        params: StakingParamsSet,
        btc_wallet: Arc<dyn BtcWallet>,
        bbn_wallet: Arc<dyn BbnWallet>,
        events: SigningEvents,
    ) -> Self {
        Self {
            network,
            params,
            btc_wallet,
            bbn_wallet,
            events,
        }
    }

    /// The bitcoin network the session signs for.
    pub const fn network(&self) -> Network {
        self.network
    }

    /// The versioned protocol parameters captured at session creation.
    pub const fn params(&self) -> &StakingParamsSet {
        &self.params
    }

    /// Announces `step`, then asks the bitcoin wallet to sign `psbt`.
    ///
    /// The event carries the same options that are forwarded to the wallet.
    pub async fn sign_psbt(
        &self,
        step: SigningStep,
        psbt: Psbt,
        options: Option<SignPsbtOptions>,
    ) -> Result<Psbt, WalletError> {
        self.events.emit(step, options.clone());
        self.btc_wallet.sign_psbt(psbt, options.as_ref()).await
    }

    /// Announces `step`, then asks the bitcoin wallet to sign `message` with
    /// the given algorithm.
    pub async fn sign_message(
        &self,
        step: SigningStep,
        message: &str,
        sig_type: SignMessageType,
    ) -> Result<String, WalletError> {
        self.events.emit(step, None);
        self.btc_wallet.sign_message(message, sig_type).await
    }

    /// Announces `step`, then asks the Babylon wallet to sign a transaction
    /// wrapping `msg`.
    pub async fn sign_bbn_tx(
        &self,
        step: SigningStep,
        msg: BbnMsg,
    ) -> Result<SignedBbnTx, WalletError> {
        self.events.emit(step, None);
        self.bbn_wallet.sign_tx(msg).await
    }
}

impl fmt::Debug for StakingSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StakingSession")
            .field("network", &self.network)
            .field("params", &self.params)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use staking_test_utils::{
        empty_psbt, params_set, sample_bbn_msg, BtcWalletCall, MockBbnWallet, MockBtcWallet,
    };
    use wallet_proto::ContractInfo;

    use super::*;
    use crate::factory::SigningSessionFactory;

    /// An observed event plus how many wallet calls had been served when the
    /// listener ran, to pin down emission ordering.
    type Observed = (SigningStep, Option<SignPsbtOptions>, usize);

    struct Harness {
        session: StakingSession,
        btc: Arc<MockBtcWallet>,
        bbn: Arc<MockBbnWallet>,
        observed: Arc<Mutex<Vec<Observed>>>,
    }

    fn harness(btc: MockBtcWallet, bbn: MockBbnWallet) -> Harness {
        let btc = Arc::new(btc);
        let bbn = Arc::new(bbn);

        let factory = SigningSessionFactory::new()
            .with_btc_wallet(btc.clone())
            .with_bbn_wallet(bbn.clone())
            .with_params(params_set(2));

        let observed = Arc::new(Mutex::new(Vec::new()));
        let log = observed.clone();
        let btc_probe = btc.clone();
        let bbn_probe = bbn.clone();
        factory.subscribe(Arc::new(move |step, options| {
            let served = btc_probe.calls().len() + bbn_probe.calls().len();
            log.lock().unwrap().push((step, options, served));
        }));

        let session = factory.create_session().expect("all capabilities present");
        Harness {
            session,
            btc,
            bbn,
            observed,
        }
    }

    #[tokio::test]
    async fn test_sign_psbt_emits_once_before_delegating() {
        let h = harness(
            MockBtcWallet::connected_on(Network::Signet),
            MockBbnWallet::connected(),
        );

        let options = SignPsbtOptions {
            auto_finalized: Some(true),
            contracts: vec![ContractInfo {
                id: "staking".to_owned(),
                params: serde_json::Map::new(),
            }],
        };

        let psbt = empty_psbt();
        let signed = h
            .session
            .sign_psbt(SigningStep::Staking, psbt.clone(), Some(options.clone()))
            .await
            .unwrap();

        // Passthrough: the mock echoes the psbt untouched.
        assert_eq!(signed, psbt);
        assert_eq!(
            h.btc.calls(),
            vec![BtcWalletCall::SignPsbt {
                options: Some(options.clone())
            }]
        );

        // Exactly one event, carrying the options, emitted before the wallet
        // served any call.
        assert_eq!(
            *h.observed.lock().unwrap(),
            vec![(SigningStep::Staking, Some(options), 0)]
        );
    }

    #[tokio::test]
    async fn test_sign_message_resolves_with_wallet_signature() {
        let h = harness(
            MockBtcWallet::connected_on(Network::Signet).with_message_signature("sig123"),
            MockBbnWallet::connected(),
        );

        let sig = h
            .session
            .sign_message(SigningStep::ProofOfPossession, "hello", SignMessageType::Ecdsa)
            .await
            .unwrap();

        assert_eq!(sig, "sig123");
        assert_eq!(
            h.btc.calls(),
            vec![BtcWalletCall::SignMessage {
                message: "hello".to_owned(),
                sig_type: SignMessageType::Ecdsa,
            }]
        );
        assert_eq!(
            *h.observed.lock().unwrap(),
            vec![(SigningStep::ProofOfPossession, None, 0)]
        );
    }

    #[tokio::test]
    async fn test_sign_bbn_tx_forwards_typed_message() {
        let h = harness(
            MockBtcWallet::connected_on(Network::Signet),
            MockBbnWallet::connected(),
        );

        let msg = sample_bbn_msg();
        let signed = h
            .session
            .sign_bbn_tx(SigningStep::CreateBtcDelegationMsg, msg.clone())
            .await
            .unwrap();

        assert_eq!(signed.tx_bytes, msg.type_url.as_bytes());
        assert_eq!(h.bbn.calls(), vec![msg]);
        assert_eq!(
            *h.observed.lock().unwrap(),
            vec![(SigningStep::CreateBtcDelegationMsg, None, 0)]
        );
    }

    #[tokio::test]
    async fn test_wallet_failure_propagates_unchanged() {
        let h = harness(
            MockBtcWallet::connected_on(Network::Signet),
            MockBbnWallet::connected(),
        );
        h.btc.fail_with(WalletError::Rejected);

        let result = h
            .session
            .sign_psbt(SigningStep::StakingSlashing, empty_psbt(), None)
            .await;

        assert_eq!(result, Err(WalletError::Rejected));

        // Still exactly the one pre-delegation event, none for the failure.
        assert_eq!(
            *h.observed.lock().unwrap(),
            vec![(SigningStep::StakingSlashing, None, 0)]
        );
    }

    #[tokio::test]
    async fn test_concurrent_calls_each_emit_independently() {
        let h = harness(
            MockBtcWallet::connected_on(Network::Signet),
            MockBbnWallet::connected(),
        );

        let (sig, tx) = tokio::join!(
            h.session
                .sign_message(SigningStep::ProofOfPossession, "pop", SignMessageType::Bip322Simple),
            h.session
                .sign_bbn_tx(SigningStep::CreateBtcDelegationMsg, sample_bbn_msg()),
        );

        assert!(sig.is_ok());
        assert!(tx.is_ok());
        assert_eq!(h.observed.lock().unwrap().len(), 2);
    }
}
