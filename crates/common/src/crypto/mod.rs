//! Cryptographic primitives for 0xBin
//!
//! This module provides the client-side envelope that gates non-public paste content:
//!
//! - **Seeds**: every paid or private paste gets one random 32-byte `EncryptionKey`,
//!   stored on-chain in the paste's `publicKey` field
//! - **Content Encryption**: AES-256-GCM over the UTF-8 paste body with a fresh IV per call
//! - **Access Signatures**: secp256k1 personal-message signatures over
//!   `keccak256(abi.encodePacked(uint256 pasteId, address viewer))`
//! - **Key Derivation**: the symmetric key is `keccak256(seed || signature)`
//!
//! # Payload Format
//!
//! ```text
//! [ iv: 12 bytes ][ ciphertext: n bytes ][ tag: 16 bytes ]
//! ```
//!
//! On-chain the payload travels as the UTF-8 bytes of its `0x`-prefixed hex encoding.
//!
//! # Key Schemes
//!
//! Which `SymmetricKey` seals a paste is decided by the network's [`KeyScheme`]:
//! - `SignatureBound` seals under `derive_decryption_key(seed, signature)`, so only
//!   the holder of the signing key can reproduce it
//! - `RawSeed` reinterprets the seed as the key; it exists only to read data
//!   written by deployments that sealed that way

mod access;
mod key;
mod payload;

use serde::{Deserialize, Serialize};

pub use access::{
    derive_decryption_key, generate_message_to_sign, recover_signer, verify_signature,
    AccessSignature, LocalSigner, SIGNATURE_SIZE,
};
pub use key::{EncryptionKey, SymmetricKey, KEY_SIZE};
pub use payload::{decrypt_content, encrypt_content, EncryptedPayload, IV_SIZE, TAG_SIZE};

/// Errors raised by the crypto core
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("invalid key length, expected {expected}, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },
    #[error("invalid signature: {0}")]
    InvalidSignature(String),
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
    /// The GCM tag did not verify: wrong key, corrupted or truncated payload
    #[error("authentication failed: payload is corrupted or sealed under a different key")]
    AuthenticationFailed,
    #[error("decrypted content is not valid UTF-8")]
    InvalidUtf8,
    #[error("cipher error")]
    Cipher,
    #[error("random source failure: {0}")]
    Random(String),
}

/// How a paste's symmetric key is obtained from its stored seed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyScheme {
    /// `keccak256(seed || access signature)`
    #[default]
    SignatureBound,
    /// The seed bytes are the key. Read-compatibility only.
    RawSeed,
}

impl KeyScheme {
    /// Whether viewers other than the creator can derive the content key
    ///
    /// Signature-bound keys depend on the sealing account's own signature, so
    /// only that account can reopen the content.
    pub fn shares_key(&self) -> bool {
        match self {
            KeyScheme::SignatureBound => false,
            KeyScheme::RawSeed => true,
        }
    }

    /// Produce the symmetric key for a paste under this scheme
    ///
    /// `SignatureBound` requires a signature; `RawSeed` ignores it.
    pub fn content_key(
        &self,
        seed: &EncryptionKey,
        signature: Option<&AccessSignature>,
    ) -> Result<SymmetricKey, CryptoError> {
        match self {
            KeyScheme::SignatureBound => {
                let signature = signature.ok_or_else(|| {
                    CryptoError::InvalidSignature(
                        "signature-bound keys require an access signature".to_string(),
                    )
                })?;
                Ok(derive_decryption_key(seed, signature))
            }
            KeyScheme::RawSeed => {
                tracing::warn!(
                    "using raw-seed key scheme: content is readable by anyone who knows the stored seed"
                );
                Ok(SymmetricKey::from(**seed))
            }
        }
    }
}

impl std::fmt::Display for KeyScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyScheme::SignatureBound => write!(f, "signature-bound"),
            KeyScheme::RawSeed => write!(f, "raw-seed"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloy_primitives::U256;

    #[test]
    fn test_signature_bound_requires_signature() {
        let seed = EncryptionKey::generate().unwrap();
        let result = KeyScheme::SignatureBound.content_key(&seed, None);
        assert!(matches!(result, Err(CryptoError::InvalidSignature(_))));
    }

    #[test]
    fn test_signature_bound_matches_derivation() {
        let seed = EncryptionKey::generate().unwrap();
        let signer = LocalSigner::generate().unwrap();
        let message = generate_message_to_sign(U256::from(7u64), signer.address());
        let signature = signer.sign_message(message.as_slice()).unwrap();

        let key = KeyScheme::SignatureBound
            .content_key(&seed, Some(&signature))
            .unwrap();
        assert_eq!(key, derive_decryption_key(&seed, &signature));
    }

    #[test]
    fn test_only_raw_seed_shares_keys() {
        assert!(!KeyScheme::SignatureBound.shares_key());
        assert!(KeyScheme::RawSeed.shares_key());
    }

    #[test]
    fn test_raw_seed_ignores_signature() {
        let seed = EncryptionKey::generate().unwrap();
        let key = KeyScheme::RawSeed.content_key(&seed, None).unwrap();
        assert_eq!(key.bytes(), seed.bytes());
    }

    #[test]
    fn test_scheme_serde_names() {
        let json = serde_json::to_string(&KeyScheme::RawSeed).unwrap();
        assert_eq!(json, "\"raw-seed\"");
        let parsed: KeyScheme = serde_json::from_str("\"signature-bound\"").unwrap();
        assert_eq!(parsed, KeyScheme::SignatureBound);
    }
}
