//! Cosmos StdTx signer
//!
//! Builds legacy amino-JSON `StdTx` transactions for Cosmos SDK chains,
//! signs them with one or more secp256k1 keys, and broadcasts them to an
//! LCD REST server.
//!
//! # Architecture
//!
//! - **wallet**: BIP39/BIP32 key derivation, bech32 addresses, signing
//! - **canonical**: sorted-key JSON used as the exact signing payload
//! - **rest**: account resolution and broadcast over REST
//! - **tx**: the ordered multi-signer pipeline
//! - **config** / **utils**: endpoint configuration, logging, JSON helpers
//!
//! # Security
//!
//! Mnemonics, seeds and entropy are held in `zeroize::Zeroizing` buffers,
//! and log fields naming secrets are redacted.
//!
//! # Example
//!
//! ```rust,ignore
//! use cosmos_stdtx::{BroadcastMode, TransactionBuilder, DEFAULT_HD_PATH, DEFAULT_PREFIX};
//!
//! let response = TransactionBuilder::new(messages, "cosmoshub-4")?
//!     .set_endpoint("https://lcd.example.com")?
//!     .add_signer_from_mnemonic(&phrase, DEFAULT_PREFIX, DEFAULT_HD_PATH)
//!     .broadcast(BroadcastMode::Sync)
//!     .await?;
//! ```

pub mod canonical;
pub mod config;
pub mod error;
pub mod rest;
pub mod tx;
pub mod types;
pub mod utils;
pub mod wallet;

pub use canonical::{canonicalize, to_canonical_bytes};
pub use config::{ClientConfig, DEFAULT_ENDPOINT};
pub use error::{CosmosError, CosmosResult, ErrorCode};
pub use rest::{AccountResolver, Broadcaster, BuyNameRequest, RestClient};
pub use tx::{amino_sign_doc, SignDocFn, SignerSpec, TransactionBuilder};
pub use types::*;
pub use wallet::{
    EntropyFn, EntropySource, KeyEncoding, OsEntropy, Wallet, WalletError, DEFAULT_HD_PATH,
    DEFAULT_PREFIX,
};
