//! Scheduled signers
//!
//! Registering a signer only records how to obtain its wallet. Key
//! derivation happens when the pipeline reaches that signer's step.

use std::borrow::Cow;
use std::fmt;
use zeroize::Zeroizing;

use crate::error::CosmosResult;
use crate::wallet::{KeyEncoding, Wallet};

/// How a signer's wallet is obtained
#[derive(Clone)]
pub enum SignerSpec {
    FromMnemonic {
        mnemonic: Zeroizing<String>,
        prefix: String,
        hd_path: String,
    },
    FromPrivateKey {
        key: Zeroizing<String>,
        encoding: KeyEncoding,
        prefix: String,
    },
    FromWallet(Wallet),
}

impl SignerSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            SignerSpec::FromMnemonic { .. } => "mnemonic",
            SignerSpec::FromPrivateKey { .. } => "private_key",
            SignerSpec::FromWallet(_) => "wallet",
        }
    }

    /// Derive the wallet, or borrow it if already built
    pub fn materialize(&self) -> CosmosResult<Cow<'_, Wallet>> {
        let wallet = match self {
            SignerSpec::FromMnemonic { mnemonic, prefix, hd_path } => {
                Cow::Owned(Wallet::from_mnemonic(mnemonic, prefix, hd_path)?)
            }
            SignerSpec::FromPrivateKey { key, encoding, prefix } => {
                Cow::Owned(Wallet::from_private_key(key, *encoding, prefix)?)
            }
            SignerSpec::FromWallet(wallet) => Cow::Borrowed(wallet),
        };
        Ok(wallet)
    }
}

impl fmt::Debug for SignerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignerSpec::FromMnemonic { prefix, hd_path, .. } => f
                .debug_struct("FromMnemonic")
                .field("prefix", prefix)
                .field("hd_path", hd_path)
                .finish_non_exhaustive(),
            SignerSpec::FromPrivateKey { encoding, prefix, .. } => f
                .debug_struct("FromPrivateKey")
                .field("encoding", encoding)
                .field("prefix", prefix)
                .finish_non_exhaustive(),
            SignerSpec::FromWallet(wallet) => f.debug_tuple("FromWallet").field(wallet).finish(),
        }
    }
}
