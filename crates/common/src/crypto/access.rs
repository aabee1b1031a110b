//! Access messages, signatures and key derivation
//!
//! A viewer proves control of an address by signing a deterministic message
//! bound to `(pasteId, viewer)`. The same signature feeds key derivation, so a
//! signature-bound payload can only be opened by whoever can reproduce it.

use std::fmt;

use alloy_primitives::{eip191_hash_message, keccak256, Address, B256, U256};
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};

use super::{CryptoError, EncryptionKey, SymmetricKey};

/// Size of an `r || s || v` signature in bytes
pub const SIGNATURE_SIZE: usize = 65;

/// A 65-byte `r || s || v` secp256k1 signature over an access message
///
/// `v` is kept as produced by the wallet (`0/1` or `27/28`); recovery and
/// key derivation both normalize it.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccessSignature([u8; SIGNATURE_SIZE]);

impl fmt::Debug for AccessSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessSignature({})", self.to_hex())
    }
}

impl From<[u8; SIGNATURE_SIZE]> for AccessSignature {
    fn from(bytes: [u8; SIGNATURE_SIZE]) -> Self {
        AccessSignature(bytes)
    }
}

impl TryFrom<&[u8]> for AccessSignature {
    type Error = CryptoError;
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(bytes)
    }
}

impl AccessSignature {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != SIGNATURE_SIZE {
            return Err(CryptoError::InvalidSignature(format!(
                "expected {} bytes, got {}",
                SIGNATURE_SIZE,
                bytes.len()
            )));
        }
        let mut buff = [0; SIGNATURE_SIZE];
        buff.copy_from_slice(bytes);
        Ok(Self(buff))
    }

    /// Parse a signature from hex, with or without a `0x` prefix
    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        let hex = hex.strip_prefix("0x").unwrap_or(hex);
        let bytes = hex::decode(hex)
            .map_err(|e| CryptoError::InvalidSignature(format!("hex decode error: {}", e)))?;
        Self::from_slice(&bytes)
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    /// Check this signature against an access message and expected signer
    pub fn verify(&self, message: &B256, expected_signer: Address) -> bool {
        verify_signature(message, &self.0, expected_signer)
    }
}

/// Build the message a viewer signs to access a paste
///
/// `keccak256(abi.encodePacked(uint256 pasteId, address viewer))`: the id as a
/// 32-byte big-endian word followed by the 20 address bytes.
pub fn generate_message_to_sign(paste_id: U256, address: Address) -> B256 {
    let mut packed = [0u8; 32 + 20];
    packed[..32].copy_from_slice(&paste_id.to_be_bytes::<32>());
    packed[32..].copy_from_slice(address.as_slice());
    keccak256(packed)
}

/// Derive the symmetric key bound to a seed and an access signature
///
/// `keccak256(seed || r || s || v)` with `v` in its `27/28` form, so both
/// wallet conventions for the same signature yield the same key.
pub fn derive_decryption_key(seed: &EncryptionKey, signature: &AccessSignature) -> SymmetricKey {
    let mut sig = signature.0;
    sig[64] = canonical_v(sig[64]);

    let mut combined = Vec::with_capacity(seed.bytes().len() + SIGNATURE_SIZE);
    combined.extend_from_slice(seed.bytes());
    combined.extend_from_slice(&sig);
    SymmetricKey::from(keccak256(&combined).0)
}

/// Recover the address that produced a personal-message signature over `message`
///
/// # Errors
///
/// Returns `InvalidSignature` if the signature is malformed or recovery fails.
pub fn recover_signer(message: &[u8], signature: &[u8]) -> Result<Address, CryptoError> {
    if signature.len() != SIGNATURE_SIZE {
        return Err(CryptoError::InvalidSignature(format!(
            "expected {} bytes, got {}",
            SIGNATURE_SIZE,
            signature.len()
        )));
    }

    let digest = eip191_hash_message(message);
    let sig = Signature::from_slice(&signature[..64])
        .map_err(|_| CryptoError::InvalidSignature("invalid r/s values".to_string()))?;
    let recovery_id = RecoveryId::from_byte(normalize_v(signature[64]))
        .ok_or_else(|| CryptoError::InvalidSignature("invalid recovery id".to_string()))?;

    let verifying_key = VerifyingKey::recover_from_prehash(digest.as_slice(), &sig, recovery_id)
        .map_err(|_| CryptoError::InvalidSignature("failed to recover public key".to_string()))?;

    Ok(address_of(&verifying_key))
}

/// Verify that `signature` is `expected_signer`'s personal-message signature over `message`
///
/// Never fails: malformed signatures simply do not verify.
pub fn verify_signature(message: &B256, signature: &[u8], expected_signer: Address) -> bool {
    match recover_signer(message.as_slice(), signature) {
        Ok(recovered) => {
            tracing::debug!(%recovered, expected = %expected_signer, "recovered access signer");
            recovered == expected_signer
        }
        Err(e) => {
            tracing::debug!("signature verification failed: {}", e);
            false
        }
    }
}

fn normalize_v(v: u8) -> u8 {
    match v {
        27 | 28 => v - 27,
        v if v >= 35 => (v - 35) % 2,
        v => v,
    }
}

/// `27/28` for any recognised recovery id, other bytes untouched
fn canonical_v(v: u8) -> u8 {
    match normalize_v(v) {
        id @ (0 | 1) => id + 27,
        _ => v,
    }
}

fn address_of(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}

/// A secp256k1 key that signs access messages locally
///
/// Produces the same personal-message signatures a browser wallet would, with
/// `v` reported as `27/28`.
#[derive(Clone)]
pub struct LocalSigner {
    key: SigningKey,
    address: Address,
}

impl fmt::Debug for LocalSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalSigner")
            .field("address", &self.address)
            .finish()
    }
}

impl LocalSigner {
    /// Generate a new random signing key using a cryptographically secure RNG
    pub fn generate() -> Result<Self, CryptoError> {
        loop {
            let mut bytes = [0u8; 32];
            getrandom::getrandom(&mut bytes).map_err(|e| CryptoError::Random(e.to_string()))?;
            // Out-of-range scalars are astronomically rare; draw again
            if let Ok(signer) = Self::from_bytes(&bytes) {
                return Ok(signer);
            }
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let key = SigningKey::from_slice(bytes)
            .map_err(|_| CryptoError::InvalidSignature("invalid secp256k1 private key".to_string()))?;
        let address = address_of(key.verifying_key());
        Ok(Self { key, address })
    }

    /// Parse a private key from hex, with or without a `0x` prefix
    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        let hex = hex.trim();
        let hex = hex.strip_prefix("0x").unwrap_or(hex);
        let bytes = hex::decode(hex).map_err(|e| {
            CryptoError::InvalidSignature(format!("private key hex decode error: {}", e))
        })?;
        Self::from_bytes(&bytes)
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Sign `message` under the Ethereum personal-message prefix
    pub fn sign_message(&self, message: &[u8]) -> Result<AccessSignature, CryptoError> {
        let digest = eip191_hash_message(message);
        let (sig, recovery_id) = self
            .key
            .sign_prehash_recoverable(digest.as_slice())
            .map_err(|_| CryptoError::InvalidSignature("secp256k1 signing failed".to_string()))?;

        let mut out = [0u8; SIGNATURE_SIZE];
        out[..64].copy_from_slice(&sig.to_bytes());
        out[64] = recovery_id.to_byte() + 27;
        Ok(AccessSignature(out))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::crypto::{decrypt_content, encrypt_content};

    #[test]
    fn test_message_is_deterministic() {
        let address = Address::repeat_byte(0xab);
        let a = generate_message_to_sign(U256::from(42u64), address);
        let b = generate_message_to_sign(U256::from(42u64), address);
        assert_eq!(a, b);

        assert_ne!(a, generate_message_to_sign(U256::from(43u64), address));
        assert_ne!(
            a,
            generate_message_to_sign(U256::from(42u64), Address::repeat_byte(0xac))
        );
    }

    #[test]
    fn test_message_packing() {
        let address = Address::repeat_byte(0x11);
        let mut expected = [0u8; 52];
        expected[31] = 1;
        expected[32..].copy_from_slice(&[0x11; 20]);
        assert_eq!(
            generate_message_to_sign(U256::from(1u64), address),
            keccak256(expected)
        );
    }

    #[test]
    fn test_sign_and_verify() {
        let signer = LocalSigner::generate().unwrap();
        let message = generate_message_to_sign(U256::from(1u64), signer.address());

        let signature = signer.sign_message(message.as_slice()).unwrap();
        assert!(verify_signature(&message, signature.bytes(), signer.address()));
        assert!(signature.verify(&message, signer.address()));

        // Wrong expected signer
        let other = LocalSigner::generate().unwrap();
        assert!(!verify_signature(&message, signature.bytes(), other.address()));

        // Wrong message
        let wrong = generate_message_to_sign(U256::from(2u64), signer.address());
        assert!(!verify_signature(&wrong, signature.bytes(), signer.address()));
    }

    #[test]
    fn test_verify_accepts_both_v_conventions() {
        let signer = LocalSigner::generate().unwrap();
        let message = generate_message_to_sign(U256::from(9u64), signer.address());
        let signature = signer.sign_message(message.as_slice()).unwrap();

        let mut raw = *signature.bytes().first_chunk::<SIGNATURE_SIZE>().unwrap();
        raw[64] -= 27;
        assert!(verify_signature(&message, &raw, signer.address()));
    }

    #[test]
    fn test_verify_malformed_returns_false() {
        let message = B256::repeat_byte(1);
        let address = Address::repeat_byte(2);
        assert!(!verify_signature(&message, &[], address));
        assert!(!verify_signature(&message, &[0u8; 64], address));
        assert!(!verify_signature(&message, &[0u8; SIGNATURE_SIZE], address));
        assert!(!verify_signature(&message, &[0xffu8; SIGNATURE_SIZE], address));
    }

    #[test]
    fn test_signing_is_deterministic() {
        // RFC 6979 nonces: re-signing yields the same bytes, so derived keys are reproducible
        let signer = LocalSigner::generate().unwrap();
        let message = generate_message_to_sign(U256::from(5u64), signer.address());
        let a = signer.sign_message(message.as_slice()).unwrap();
        let b = signer.sign_message(message.as_slice()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_derivation_is_deterministic_and_sensitive() {
        let seed = EncryptionKey::from([1u8; 32]);
        let signature = AccessSignature::from([2u8; SIGNATURE_SIZE]);

        let a = derive_decryption_key(&seed, &signature);
        let b = derive_decryption_key(&seed, &signature);
        assert_eq!(a, b);

        let other_seed = EncryptionKey::from([3u8; 32]);
        assert_ne!(a, derive_decryption_key(&other_seed, &signature));

        let mut other_sig = [2u8; SIGNATURE_SIZE];
        other_sig[64] = 28;
        assert_ne!(
            a,
            derive_decryption_key(&seed, &AccessSignature::from(other_sig))
        );

        // Never the seed passed through unchanged
        assert_ne!(a.bytes(), seed.bytes());
    }

    #[test]
    fn test_derivation_ignores_v_convention() {
        let seed = EncryptionKey::generate().unwrap();
        let signer = LocalSigner::generate().unwrap();
        let message = generate_message_to_sign(U256::from(11u64), signer.address());
        let signature = signer.sign_message(message.as_slice()).unwrap();

        let mut raw = *signature.bytes().first_chunk::<SIGNATURE_SIZE>().unwrap();
        raw[64] -= 27;
        let zero_one = AccessSignature::from(raw);
        assert!(zero_one.verify(&message, signer.address()));
        assert_eq!(
            derive_decryption_key(&seed, &signature),
            derive_decryption_key(&seed, &zero_one)
        );

        // Content sealed under one form opens under the other
        let payload = encrypt_content("secret", &derive_decryption_key(&seed, &signature)).unwrap();
        let opened = decrypt_content(&payload, &derive_decryption_key(&seed, &zero_one)).unwrap();
        assert_eq!(opened, "secret");
    }

    #[test]
    fn test_known_key_address() {
        // Private key 1 is the generator point
        let mut key = [0u8; 32];
        key[31] = 1;
        let signer = LocalSigner::from_bytes(&key).unwrap();
        assert_eq!(
            signer.address(),
            "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"
                .parse::<Address>()
                .unwrap()
        );
    }

    #[test]
    fn test_signature_hex_roundtrip() {
        let signer = LocalSigner::generate().unwrap();
        let signature = signer.sign_message(b"hello").unwrap();
        let parsed = AccessSignature::from_hex(&signature.to_hex()).unwrap();
        assert_eq!(parsed, signature);
        assert!(AccessSignature::from_hex("0x1234").is_err());
    }
}
