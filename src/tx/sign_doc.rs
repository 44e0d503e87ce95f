//! StdSignDoc construction
//!
//! The document a signer commits to: the message set plus chain id and
//! the signer's own account number and sequence, both as decimal strings.

use serde_json::{json, Value};

use crate::canonical::to_canonical_bytes;
use crate::error::CosmosResult;
use crate::types::{AccountInfo, UnsignedMessageSet};

/// Builds the JSON sign document for one signer
pub type SignDocFn = fn(&UnsignedMessageSet, &str, AccountInfo) -> CosmosResult<Value>;

/// Legacy amino JSON `StdSignDoc`
pub fn amino_sign_doc(
    messages: &UnsignedMessageSet,
    chain_id: &str,
    account: AccountInfo,
) -> CosmosResult<Value> {
    let msgs = serde_json::to_value(&messages.msgs)?;
    let fee = serde_json::to_value(&messages.fee)?;

    Ok(json!({
        "msgs": msgs,
        "fee": fee,
        "chain_id": chain_id,
        "account_number": account.account_number.to_string(),
        "sequence": account.sequence.to_string(),
        "memo": messages.memo,
    }))
}

/// Exact bytes to sign for a document
pub fn sign_bytes(doc: &Value) -> CosmosResult<Vec<u8>> {
    to_canonical_bytes(doc)
}
