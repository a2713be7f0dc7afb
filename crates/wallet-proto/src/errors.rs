//! Error surface shared by all wallet capabilities.

use thiserror::Error;

/// Failures raised by a wallet while serving a signing request.
///
/// Callers that wrap a wallet must pass these through unmodified; recovery
/// policy belongs to whoever initiated the signing flow.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WalletError {
    /// The wallet has no active connection.
    #[error("wallet is not connected")]
    NotConnected,

    /// The user declined the signing request in the wallet.
    #[error("signing request rejected by the user")]
    Rejected,

    /// The wallet could not parse or finalize the provided PSBT.
    #[error("invalid psbt: {0}")]
    InvalidPsbt(String),

    /// Any other failure reported by the wallet backend.
    #[error("wallet backend error: {0}")]
    Backend(String),
}
