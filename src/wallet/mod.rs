//! Wallet Module
//!
//! Key material for a single Cosmos account: creation from a mnemonic,
//! a raw private key, or fresh entropy, plus address derivation and
//! signing of StdTx sign documents.
//!
//! SECURITY: mnemonics, seeds and entropy are held in `Zeroizing` buffers.

mod derivation;
mod keygen;

pub use derivation::*;
pub use keygen::*;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bitcoin::secp256k1::{ecdsa, Message, PublicKey, Secp256k1, SecretKey};
use sha2::{Digest, Sha256};
use std::fmt;
use zeroize::Zeroizing;

use crate::types::{PubKey, Signature};

/// Default bech32 human-readable part
pub const DEFAULT_PREFIX: &str = "cosmos";

/// Standard Cosmos derivation path (coin type 118)
pub const DEFAULT_HD_PATH: &str = "m/44'/118'/0'/0/0";

/// Error types for key handling
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("Entropy has incorrect length: expected {expected} bytes, got {actual}")]
    EntropyLength { expected: usize, actual: usize },

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Derivation error: {0}")]
    Derivation(String),
}

pub type WalletResult<T> = Result<T, WalletError>;

/// A single secp256k1 account. Immutable after construction.
#[derive(Clone)]
pub struct Wallet {
    secret_key: SecretKey,
    public_key: PublicKey,
    address: String,
    mnemonic: Option<Zeroizing<String>>,
}

impl Wallet {
    pub(crate) fn from_parts(
        secret_key: SecretKey,
        prefix: &str,
        mnemonic: Option<Zeroizing<String>>,
    ) -> WalletResult<Self> {
        let secp = Secp256k1::new();
        let public_key = PublicKey::from_secret_key(&secp, &secret_key);
        let address = encode_address(&public_key, prefix)?;

        Ok(Self {
            secret_key,
            public_key,
            address,
            mnemonic,
        })
    }

    /// Restore a wallet from a BIP39 phrase (no passphrase)
    pub fn from_mnemonic(mnemonic: &str, prefix: &str, hd_path: &str) -> WalletResult<Self> {
        derive_from_mnemonic(mnemonic, prefix, hd_path)
    }

    /// Import a raw private key in the given encoding
    pub fn from_private_key(key: &str, encoding: KeyEncoding, prefix: &str) -> WalletResult<Self> {
        derive_from_private_key(key, encoding, prefix)
    }

    /// Generate a fresh wallet from the supplied entropy source
    pub fn generate<E: EntropySource>(
        source: &mut E,
        prefix: &str,
        hd_path: &str,
    ) -> WalletResult<Self> {
        generate_wallet(source, prefix, hd_path)
    }

    /// Generate a fresh wallet from the operating system RNG
    pub fn new_random(prefix: &str) -> WalletResult<Self> {
        generate_wallet(&mut OsEntropy, prefix, DEFAULT_HD_PATH)
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// The phrase this wallet was derived from, or "" for imported keys
    pub fn mnemonic(&self) -> &str {
        self.mnemonic.as_ref().map(|m| m.as_str()).unwrap_or("")
    }

    /// Compressed (33-byte) public key
    pub fn public_key(&self) -> [u8; 33] {
        self.public_key.serialize()
    }

    pub fn public_key_base64(&self) -> String {
        STANDARD.encode(self.public_key.serialize())
    }

    /// Private key as hex, zeroized on drop
    pub fn secret_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.secret_key.secret_bytes()))
    }

    /// Sign arbitrary bytes: SHA-256 digest, RFC6979 ECDSA, compact r||s
    pub fn sign(&self, payload: &[u8]) -> Signature {
        let secp = Secp256k1::signing_only();
        let digest: [u8; 32] = Sha256::digest(payload).into();
        let msg = Message::from_digest(digest);
        let sig = secp.sign_ecdsa(&msg, &self.secret_key);

        Signature {
            signature: STANDARD.encode(sig.serialize_compact()),
            pub_key: PubKey::secp256k1(self.public_key_base64()),
        }
    }

    /// Check a signature produced by `sign` against this wallet's key
    pub fn verify(&self, payload: &[u8], signature: &Signature) -> bool {
        let Ok(raw) = STANDARD.decode(&signature.signature) else {
            return false;
        };
        let Ok(sig) = ecdsa::Signature::from_compact(&raw) else {
            return false;
        };

        let secp = Secp256k1::verification_only();
        let digest: [u8; 32] = Sha256::digest(payload).into();
        let msg = Message::from_digest(digest);
        secp.verify_ecdsa(&msg, &sig, &self.public_key).is_ok()
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address)
            .field("public_key", &hex::encode(self.public_key.serialize()))
            .field("has_mnemonic", &self.mnemonic.is_some())
            .finish()
    }
}
