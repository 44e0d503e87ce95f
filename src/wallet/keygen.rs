//! Key Generation
//!
//! Creates fresh wallets from 256 bits of entropy (24-word phrases).
//!
//! SECURITY: Entropy and the intermediate phrase are zeroized on drop.

use bip39::Mnemonic;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use super::{derive_from_mnemonic, Wallet, WalletError, WalletResult};

/// Bytes of entropy required for a new wallet
pub const ENTROPY_LEN: usize = 32;

/// Pluggable randomness for wallet generation
pub trait EntropySource {
    fn fill(&mut self, len: usize) -> Vec<u8>;
}

/// Cryptographically secure default source
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&mut self, len: usize) -> Vec<u8> {
        let mut buf = vec![0u8; len];
        OsRng.fill_bytes(&mut buf);
        buf
    }
}

/// Adapts a closure into an `EntropySource`
pub struct EntropyFn<F>(pub F);

impl<F> EntropySource for EntropyFn<F>
where
    F: FnMut(usize) -> Vec<u8>,
{
    fn fill(&mut self, len: usize) -> Vec<u8> {
        (self.0)(len)
    }
}

/// Create a new wallet from exactly `ENTROPY_LEN` bytes of entropy
pub fn generate_wallet<E: EntropySource>(
    source: &mut E,
    prefix: &str,
    hd_path: &str,
) -> WalletResult<Wallet> {
    let entropy = Zeroizing::new(source.fill(ENTROPY_LEN));
    if entropy.len() != ENTROPY_LEN {
        return Err(WalletError::EntropyLength {
            expected: ENTROPY_LEN,
            actual: entropy.len(),
        });
    }

    let mnemonic = Mnemonic::from_entropy(entropy.as_slice())
        .map_err(|e| WalletError::InvalidMnemonic(format!("Failed to create mnemonic: {}", e)))?;
    let phrase = Zeroizing::new(mnemonic.to_string());

    derive_from_mnemonic(&phrase, prefix, hd_path)
}
