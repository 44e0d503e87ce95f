//! Shared Types
//!
//! Wire-level data structures for legacy (amino JSON) StdTx transactions
//! and the REST responses that feed them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CosmosError, CosmosResult};
use crate::utils::u64_from_str_or_num;

/// Public key type tag expected by Tendermint-based chains
pub const SECP256K1_PUBKEY_TYPE: &str = "tendermint/PubKeySecp256k1";

// =============================================================================
// Transaction Body
// =============================================================================

/// Coin denomination and amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    /// Denomination (e.g., "uatom", "stake")
    pub denom: String,
    /// Amount as string (to handle large values)
    pub amount: String,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.into(),
        }
    }
}

/// Transaction fee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fee {
    #[serde(default)]
    pub amount: Vec<Coin>,
    #[serde(deserialize_with = "crate::utils::string_from_str_or_num")]
    pub gas: String,
}

/// A single message: type tag plus opaque value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Msg {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub value: serde_json::Value,
}

impl Msg {
    pub fn new(msg_type: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            msg_type: msg_type.into(),
            value,
        }
    }
}

/// Caller-supplied messages, fee and memo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnsignedMessageSet {
    pub msgs: Vec<Msg>,
    pub fee: Fee,
    #[serde(default)]
    pub memo: String,
}

/// Unsigned transaction as returned by REST tx-generation endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnsignedStdTx {
    #[serde(rename = "type")]
    pub tx_type: String,
    pub value: UnsignedStdTxValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnsignedStdTxValue {
    #[serde(default)]
    pub msg: Vec<Msg>,
    pub fee: Fee,
    #[serde(default, deserialize_with = "crate::utils::null_as_default")]
    pub signatures: Vec<serde_json::Value>,
    #[serde(default)]
    pub memo: String,
}

impl UnsignedStdTx {
    pub fn into_message_set(self) -> UnsignedMessageSet {
        UnsignedMessageSet {
            msgs: self.value.msg,
            fee: self.value.fee,
            memo: self.value.memo,
        }
    }
}

// =============================================================================
// Signatures
// =============================================================================

/// Public key attached to a signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PubKey {
    #[serde(rename = "type")]
    pub key_type: String,
    /// Base64 compressed public key
    pub value: String,
}

impl PubKey {
    pub fn secp256k1(value: impl Into<String>) -> Self {
        Self {
            key_type: SECP256K1_PUBKEY_TYPE.to_string(),
            value: value.into(),
        }
    }
}

/// One signer's signature over the sign document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Base64 compact r||s
    pub signature: String,
    pub pub_key: PubKey,
}

/// Fully signed transaction, ready for `POST /txs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedTx {
    pub msg: Vec<Msg>,
    pub fee: Fee,
    pub memo: String,
    pub signatures: Vec<Signature>,
}

// =============================================================================
// Broadcast
// =============================================================================

/// Requested confirmation strength for `POST /txs`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BroadcastMode {
    /// Wait for inclusion in a block
    Block,
    /// Wait for mempool acceptance
    Sync,
    /// Fire-and-forget
    Async,
}

impl BroadcastMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BroadcastMode::Block => "block",
            BroadcastMode::Sync => "sync",
            BroadcastMode::Async => "async",
        }
    }
}

impl fmt::Display for BroadcastMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BroadcastMode {
    type Err = CosmosError;

    fn from_str(s: &str) -> CosmosResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "block" => Ok(BroadcastMode::Block),
            "sync" => Ok(BroadcastMode::Sync),
            "async" => Ok(BroadcastMode::Async),
            other => Err(CosmosError::validation(format!(
                "Unknown broadcast mode '{}', expected block, sync or async",
                other
            ))),
        }
    }
}

/// Request body for `POST /txs`
#[derive(Debug, Clone, Serialize)]
pub struct BroadcastRequest<'a> {
    pub tx: &'a SignedTx,
    pub mode: BroadcastMode,
}

// =============================================================================
// Accounts
// =============================================================================

/// Response of `GET /auth/accounts/{address}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountDetails {
    #[serde(default)]
    pub height: String,
    pub result: AccountResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountResult {
    #[serde(rename = "type", default)]
    pub account_type: String,
    pub value: BaseAccount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseAccount {
    #[serde(default)]
    pub address: String,
    #[serde(default, deserialize_with = "crate::utils::null_as_default")]
    pub coins: Vec<Coin>,
    #[serde(default)]
    pub public_key: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "u64_from_str_or_num")]
    pub account_number: u64,
    #[serde(default, deserialize_with = "u64_from_str_or_num")]
    pub sequence: u64,
}

/// The two numbers a signer needs from chain state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccountInfo {
    pub account_number: u64,
    pub sequence: u64,
}

impl From<&AccountDetails> for AccountInfo {
    fn from(details: &AccountDetails) -> Self {
        Self {
            account_number: details.result.value.account_number,
            sequence: details.result.value.sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_account_details_numeric_and_string_fields() {
        let numeric = json!({
            "height": "120",
            "result": {
                "type": "cosmos-sdk/Account",
                "value": {
                    "address": "cosmos1abc",
                    "coins": [{"denom": "stake", "amount": "100"}],
                    "public_key": null,
                    "account_number": 5,
                    "sequence": 10
                }
            }
        });
        let details: AccountDetails = serde_json::from_value(numeric).unwrap();
        assert_eq!(AccountInfo::from(&details), AccountInfo { account_number: 5, sequence: 10 });
        assert_eq!(details.result.value.coins[0].denom, "stake");

        let stringly = json!({
            "height": "0",
            "result": {
                "type": "cosmos-sdk/Account",
                "value": {
                    "address": "cosmos1abc",
                    "coins": null,
                    "public_key": "cosmospub1...",
                    "account_number": "5",
                    "sequence": "10"
                }
            }
        });
        let details: AccountDetails = serde_json::from_value(stringly).unwrap();
        assert_eq!(AccountInfo::from(&details), AccountInfo { account_number: 5, sequence: 10 });
        assert!(details.result.value.coins.is_empty());
    }

    #[test]
    fn test_signature_wire_format() {
        let sig = Signature {
            signature: "c2ln".to_string(),
            pub_key: PubKey::secp256k1("cHVi"),
        };
        let value = serde_json::to_value(&sig).unwrap();
        assert_eq!(
            value,
            json!({
                "signature": "c2ln",
                "pub_key": {"type": "tendermint/PubKeySecp256k1", "value": "cHVi"}
            })
        );
    }

    #[test]
    fn test_broadcast_mode() {
        assert_eq!("BLOCK".parse::<BroadcastMode>().unwrap(), BroadcastMode::Block);
        assert_eq!(serde_json::to_value(BroadcastMode::Async).unwrap(), json!("async"));
        assert!("eventually".parse::<BroadcastMode>().is_err());
    }

    #[test]
    fn test_unsigned_std_tx_into_message_set() {
        let raw = json!({
            "type": "cosmos-sdk/StdTx",
            "value": {
                "msg": [{"type": "nameservice/BuyName", "value": {"name": "alice"}}],
                "fee": {"amount": [], "gas": 200000},
                "signatures": null,
                "memo": ""
            }
        });
        let tx: UnsignedStdTx = serde_json::from_value(raw).unwrap();
        let set = tx.into_message_set();

        assert_eq!(set.msgs.len(), 1);
        assert_eq!(set.msgs[0].msg_type, "nameservice/BuyName");
        assert_eq!(set.fee.gas, "200000");
    }
}
