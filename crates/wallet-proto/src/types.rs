//! Value types exchanged with the wallets.

use serde::{Deserialize, Serialize};

/// Algorithm selector for message signing on the bitcoin wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignMessageType {
    /// Plain ECDSA over the message digest.
    Ecdsa,

    /// BIP-322 "simple" signature.
    Bip322Simple,
}

/// Contract metadata a wallet may display alongside a PSBT signing prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractInfo {
    /// Identifier of the contract the PSBT participates in.
    pub id: String,

    /// Free-form contract parameters, forwarded to the wallet untouched.
    #[serde(default)]
    pub params: serde_json::Map<String, serde_json::Value>,
}

/// Options accompanying a PSBT signing request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignPsbtOptions {
    /// Whether the wallet should finalize the inputs it signs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_finalized: Option<bool>,

    /// Contract metadata for wallet display.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contracts: Vec<ContractInfo>,
}

/// A typed message destined for the Babylon chain, in the protobuf `Any`
/// envelope shape the chain's wallets consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BbnMsg {
    /// Protobuf type URL of the wrapped message.
    pub type_url: String,

    /// JSON rendering of the message body.
    pub value: serde_json::Value,
}

/// A fully signed Babylon transaction, ready for broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedBbnTx {
    /// Raw signed transaction bytes.
    #[serde(with = "hex::serde")]
    pub tx_bytes: Vec<u8>,
}
