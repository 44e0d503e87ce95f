//! Transaction Builder
//!
//! Collects a fixed message set and an ordered list of signers, then on
//! `broadcast` runs every signer strictly in registration order:
//!
//! 1. materialize the signer's wallet
//! 2. resolve its current account number and sequence
//! 3. build and canonicalize the sign document
//! 4. sign and append the signature
//!
//! Only after every signer succeeded is the transaction submitted. Any
//! failure aborts the remaining steps and nothing is broadcast.

use zeroize::Zeroizing;

use super::sign_doc::{amino_sign_doc, sign_bytes, SignDocFn};
use super::signer::SignerSpec;
use crate::config::ClientConfig;
use crate::error::{CosmosError, CosmosResult};
use crate::rest::{AccountResolver, Broadcaster, RestClient};
use crate::types::{AccountInfo, BroadcastMode, SignedTx, UnsignedMessageSet, UnsignedStdTx};
use crate::wallet::{KeyEncoding, Wallet};
use crate::{log_debug, log_error, log_info};

/// Multi-signer StdTx pipeline
#[derive(Clone)]
pub struct TransactionBuilder {
    messages: UnsignedMessageSet,
    chain_id: String,
    config: ClientConfig,
    signers: Vec<SignerSpec>,
    sign_doc: SignDocFn,
}

impl TransactionBuilder {
    /// Fails with a validation error when `messages.msgs` is empty
    pub fn new(messages: UnsignedMessageSet, chain_id: impl Into<String>) -> CosmosResult<Self> {
        if messages.msgs.is_empty() {
            return Err(CosmosError::empty_message_set());
        }

        Ok(Self {
            messages,
            chain_id: chain_id.into(),
            config: ClientConfig::default(),
            signers: Vec::new(),
            sign_doc: amino_sign_doc,
        })
    }

    /// Start from a server-generated unsigned StdTx
    pub fn from_unsigned(tx: UnsignedStdTx, chain_id: impl Into<String>) -> CosmosResult<Self> {
        Self::new(tx.into_message_set(), chain_id)
    }

    /// Point account resolution and broadcast at another REST server
    pub fn set_endpoint(mut self, endpoint: &str) -> CosmosResult<Self> {
        self.config = self.config.with_endpoint(endpoint)?;
        Ok(self)
    }

    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the sign document builder (defaults to amino JSON)
    pub fn with_sign_doc(mut self, sign_doc: SignDocFn) -> Self {
        self.sign_doc = sign_doc;
        self
    }

    pub fn add_signer_from_mnemonic(self, mnemonic: &str, prefix: &str, hd_path: &str) -> Self {
        self.add_signer(SignerSpec::FromMnemonic {
            mnemonic: Zeroizing::new(mnemonic.to_string()),
            prefix: prefix.to_string(),
            hd_path: hd_path.to_string(),
        })
    }

    pub fn add_signer_from_private_key(self, key: &str, encoding: KeyEncoding, prefix: &str) -> Self {
        self.add_signer(SignerSpec::FromPrivateKey {
            key: Zeroizing::new(key.to_string()),
            encoding,
            prefix: prefix.to_string(),
        })
    }

    pub fn add_signer_from_wallet(self, wallet: Wallet) -> Self {
        self.add_signer(SignerSpec::FromWallet(wallet))
    }

    pub fn add_signer(mut self, signer: SignerSpec) -> Self {
        self.signers.push(signer);
        self
    }

    pub fn messages(&self) -> &UnsignedMessageSet {
        &self.messages
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    pub fn signers(&self) -> &[SignerSpec] {
        &self.signers
    }

    /// Canonical sign bytes for a given account state
    pub fn sign_document(&self, account: AccountInfo) -> CosmosResult<Vec<u8>> {
        let doc = (self.sign_doc)(&self.messages, &self.chain_id, account)?;
        sign_bytes(&doc)
    }

    /// Run every signer step and return the signed transaction without submitting it
    pub async fn sign_with<R>(&self, resolver: &R) -> CosmosResult<SignedTx>
    where
        R: AccountResolver + ?Sized,
    {
        if self.signers.is_empty() {
            return Err(CosmosError::validation("no signers registered"));
        }

        let mut tx = SignedTx {
            msg: self.messages.msgs.clone(),
            fee: self.messages.fee.clone(),
            memo: self.messages.memo.clone(),
            signatures: Vec::with_capacity(self.signers.len()),
        };

        for (step, signer) in self.signers.iter().enumerate() {
            log_debug!("tx", "Signer step", step = step, kind = signer.kind());

            let wallet = signer.materialize().map_err(|e| {
                log_error!("tx", "Signer could not be materialized", step = step, kind = signer.kind(), error = e);
                e
            })?;

            let account = resolver.account_info(wallet.address()).await.map_err(|e| {
                log_error!("tx", "Account resolution failed", step = step, address = wallet.address(), error = e);
                e
            })?;
            log_debug!(
                "tx",
                "Account resolved",
                address = wallet.address(),
                account_number = account.account_number,
                sequence = account.sequence,
            );

            let bytes = self.sign_document(account)?;
            tx.signatures.push(wallet.sign(&bytes));

            log_info!(
                "tx",
                "Signature appended",
                step = step,
                address = wallet.address(),
                account_number = account.account_number,
                sequence = account.sequence,
            );
        }

        Ok(tx)
    }

    /// Sign with every registered signer, then submit once
    pub async fn broadcast_with<R, B>(
        &self,
        resolver: &R,
        broadcaster: &B,
        mode: BroadcastMode,
    ) -> CosmosResult<serde_json::Value>
    where
        R: AccountResolver + ?Sized,
        B: Broadcaster + ?Sized,
    {
        let tx = self.sign_with(resolver).await?;

        log_info!(
            "tx",
            "Broadcasting transaction",
            chain_id = self.chain_id,
            mode = mode,
            signatures = tx.signatures.len(),
        );

        broadcaster.submit(&tx, mode).await.map_err(|e| {
            log_error!("tx", "Broadcast failed", error = e);
            e
        })
    }

    /// Sign and submit against the configured REST endpoint
    pub async fn broadcast(&self, mode: BroadcastMode) -> CosmosResult<serde_json::Value> {
        let client = RestClient::new(self.config.clone())?;
        self.broadcast_with(&client, &client, mode).await
    }
}

impl std::fmt::Debug for TransactionBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionBuilder")
            .field("messages", &self.messages)
            .field("chain_id", &self.chain_id)
            .field("config", &self.config)
            .field("signers", &self.signers)
            .finish_non_exhaustive()
    }
}
