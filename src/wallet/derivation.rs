//! Key Derivation
//!
//! BIP39 phrase -> BIP32 key at a Cosmos HD path, raw private key import,
//! and bech32 address encoding.
//!
//! SECURITY: The seed is wrapped in Zeroizing and dropped after derivation.

use bech32::{ToBase32, Variant};
use bip39::Mnemonic;
use bitcoin::bip32::{DerivationPath, Xpriv};
use bitcoin::secp256k1::{PublicKey, Secp256k1, SecretKey};
use bitcoin::Network;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroizing;

use super::{Wallet, WalletError, WalletResult};

/// Text encoding of an imported private key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyEncoding {
    #[default]
    Hex,
    Base64,
}

impl KeyEncoding {
    fn decode(&self, encoded: &str) -> WalletResult<Zeroizing<Vec<u8>>> {
        use base64::{engine::general_purpose::STANDARD, Engine as _};

        let trimmed = encoded.trim();
        let bytes = match self {
            KeyEncoding::Hex => {
                let cleaned = trimmed.trim_start_matches("0x").trim_start_matches("0X");
                hex::decode(cleaned)
                    .map_err(|e| WalletError::Encoding(format!("Invalid hex key: {}", e)))?
            }
            KeyEncoding::Base64 => STANDARD
                .decode(trimmed)
                .map_err(|e| WalletError::Encoding(format!("Invalid base64 key: {}", e)))?,
        };
        Ok(Zeroizing::new(bytes))
    }
}

impl FromStr for KeyEncoding {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hex" => Ok(KeyEncoding::Hex),
            "base64" => Ok(KeyEncoding::Base64),
            other => Err(WalletError::Encoding(format!("Unsupported key encoding: {}", other))),
        }
    }
}

impl fmt::Display for KeyEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyEncoding::Hex => write!(f, "hex"),
            KeyEncoding::Base64 => write!(f, "base64"),
        }
    }
}

/// Derive a wallet from a BIP39 phrase at the given HD path
pub fn derive_from_mnemonic(phrase: &str, prefix: &str, hd_path: &str) -> WalletResult<Wallet> {
    let mnemonic = Mnemonic::parse(phrase)
        .map_err(|e| WalletError::InvalidMnemonic(e.to_string()))?;

    let path = DerivationPath::from_str(hd_path)
        .map_err(|e| WalletError::Derivation(format!("Invalid derivation path '{}': {}", hd_path, e)))?;

    let seed = Zeroizing::new(mnemonic.to_seed(""));
    let secp = Secp256k1::new();

    // The network only affects xpriv serialization, never the key bytes
    let master = Xpriv::new_master(Network::Bitcoin, seed.as_ref())
        .map_err(|e| WalletError::InvalidMnemonic(format!("Failed to create master key: {}", e)))?;

    let derived = master
        .derive_priv(&secp, &path)
        .map_err(|e| WalletError::InvalidMnemonic(format!("No key material at {}: {}", hd_path, e)))?;

    Wallet::from_parts(
        derived.private_key,
        prefix,
        Some(Zeroizing::new(mnemonic.to_string())),
    )
}

/// Import a raw 32-byte secp256k1 private key
pub fn derive_from_private_key(
    encoded: &str,
    encoding: KeyEncoding,
    prefix: &str,
) -> WalletResult<Wallet> {
    let bytes = encoding.decode(encoded)?;
    if bytes.len() != 32 {
        return Err(WalletError::InvalidPrivateKey(format!(
            "Expected 32 bytes, got {}",
            bytes.len()
        )));
    }

    let secret_key = SecretKey::from_slice(&bytes)
        .map_err(|e| WalletError::InvalidPrivateKey(e.to_string()))?;

    Wallet::from_parts(secret_key, prefix, None)
}

/// bech32(prefix, RIPEMD160(SHA256(compressed pubkey)))
pub fn encode_address(public_key: &PublicKey, prefix: &str) -> WalletResult<String> {
    let sha256_hash = Sha256::digest(public_key.serialize());
    let ripemd_hash = Ripemd160::digest(sha256_hash);

    bech32::encode(prefix, ripemd_hash.to_base32(), Variant::Bech32)
        .map_err(|e| WalletError::Encoding(format!("Bech32 encoding failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::{DEFAULT_HD_PATH, DEFAULT_PREFIX};

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_known_address_vector() {
        let wallet = derive_from_mnemonic(TEST_MNEMONIC, DEFAULT_PREFIX, DEFAULT_HD_PATH).unwrap();
        assert_eq!(wallet.address(), "cosmos19rl4cm2hmr8afy4kldpxz3fka4jguq0auqdal4");
        assert_eq!(wallet.mnemonic(), TEST_MNEMONIC);
    }

    #[test]
    fn test_address_is_deterministic() {
        let a = derive_from_mnemonic(TEST_MNEMONIC, DEFAULT_PREFIX, DEFAULT_HD_PATH).unwrap();
        let b = derive_from_mnemonic(TEST_MNEMONIC, DEFAULT_PREFIX, DEFAULT_HD_PATH).unwrap();
        assert_eq!(a.address(), b.address());
        assert_eq!(a.public_key(), b.public_key());
    }

    #[test]
    fn test_prefix_changes_only_hrp() {
        let cosmos = derive_from_mnemonic(TEST_MNEMONIC, "cosmos", DEFAULT_HD_PATH).unwrap();
        let osmo = derive_from_mnemonic(TEST_MNEMONIC, "osmo", DEFAULT_HD_PATH).unwrap();

        assert!(osmo.address().starts_with("osmo1"));
        assert_eq!(cosmos.public_key(), osmo.public_key());
        // Same 20-byte payload, so the data part differs only in its checksum
        assert_eq!(&cosmos.address()[7..39], &osmo.address()[5..37]);
    }

    #[test]
    fn test_hd_path_changes_key() {
        let first = derive_from_mnemonic(TEST_MNEMONIC, DEFAULT_PREFIX, "m/44'/118'/0'/0/0").unwrap();
        let second = derive_from_mnemonic(TEST_MNEMONIC, DEFAULT_PREFIX, "m/44'/118'/0'/0/1").unwrap();
        assert_ne!(first.address(), second.address());
    }

    #[test]
    fn test_invalid_mnemonic() {
        let bad_checksum = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon";
        assert!(matches!(
            derive_from_mnemonic(bad_checksum, DEFAULT_PREFIX, DEFAULT_HD_PATH),
            Err(WalletError::InvalidMnemonic(_))
        ));

        assert!(matches!(
            derive_from_mnemonic("not a real phrase", DEFAULT_PREFIX, DEFAULT_HD_PATH),
            Err(WalletError::InvalidMnemonic(_))
        ));
    }

    #[test]
    fn test_invalid_hd_path() {
        assert!(matches!(
            derive_from_mnemonic(TEST_MNEMONIC, DEFAULT_PREFIX, "not/a/path"),
            Err(WalletError::Derivation(_))
        ));
    }

    #[test]
    fn test_private_key_matches_mnemonic_wallet() {
        let from_phrase = derive_from_mnemonic(TEST_MNEMONIC, DEFAULT_PREFIX, DEFAULT_HD_PATH).unwrap();
        let secret = from_phrase.secret_hex();

        let from_key = derive_from_private_key(&secret, KeyEncoding::Hex, DEFAULT_PREFIX).unwrap();
        assert_eq!(from_key.address(), from_phrase.address());
        assert_eq!(from_key.mnemonic(), "");

        let raw = hex::decode(secret.as_str()).unwrap();
        let b64 = {
            use base64::{engine::general_purpose::STANDARD, Engine as _};
            STANDARD.encode(raw)
        };
        let from_b64 = derive_from_private_key(&b64, KeyEncoding::Base64, DEFAULT_PREFIX).unwrap();
        assert_eq!(from_b64.address(), from_phrase.address());
    }

    #[test]
    fn test_generator_point_public_key() {
        let one = format!("0x{}", "00".repeat(31) + "01");
        let wallet = derive_from_private_key(&one, KeyEncoding::Hex, DEFAULT_PREFIX).unwrap();
        assert_eq!(
            hex::encode(wallet.public_key()),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
    }

    #[test]
    fn test_private_key_errors() {
        assert!(matches!(
            derive_from_private_key("zz", KeyEncoding::Hex, DEFAULT_PREFIX),
            Err(WalletError::Encoding(_))
        ));
        assert!(matches!(
            derive_from_private_key("abcd", KeyEncoding::Hex, DEFAULT_PREFIX),
            Err(WalletError::InvalidPrivateKey(_))
        ));
        // Zero is not a valid scalar
        assert!(matches!(
            derive_from_private_key(&"00".repeat(32), KeyEncoding::Hex, DEFAULT_PREFIX),
            Err(WalletError::InvalidPrivateKey(_))
        ));
    }

    #[test]
    fn test_key_encoding_from_str() {
        assert_eq!("hex".parse::<KeyEncoding>().unwrap(), KeyEncoding::Hex);
        assert_eq!("BASE64".parse::<KeyEncoding>().unwrap(), KeyEncoding::Base64);
        assert!(matches!("utf8".parse::<KeyEncoding>(), Err(WalletError::Encoding(_))));
    }
}
