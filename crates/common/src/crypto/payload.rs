//! AES-256-GCM sealing of paste bodies

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce,
};

use super::{CryptoError, SymmetricKey};

/// Size of the AES-GCM IV in bytes
pub const IV_SIZE: usize = 12;
/// Size of the AES-GCM authentication tag in bytes
pub const TAG_SIZE: usize = 16;

/// A sealed paste body: `iv (12 bytes) || ciphertext || tag (16 bytes)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedPayload(Vec<u8>);

impl From<Vec<u8>> for EncryptedPayload {
    fn from(bytes: Vec<u8>) -> Self {
        EncryptedPayload(bytes)
    }
}

impl AsRef<[u8]> for EncryptedPayload {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl EncryptedPayload {
    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The IV prefix, if the payload is long enough to carry one
    pub fn iv(&self) -> Option<&[u8]> {
        self.0.get(..IV_SIZE)
    }

    /// `0x`-prefixed lowercase hex
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.0))
    }

    /// Parse hex, with or without a `0x` prefix
    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        let hex = hex.trim();
        let hex = hex.strip_prefix("0x").unwrap_or(hex);
        hex::decode(hex)
            .map(EncryptedPayload)
            .map_err(|e| CryptoError::MalformedPayload(format!("payload hex decode error: {}", e)))
    }

    /// Encode for the contract's `content` field: UTF-8 bytes of the hex form
    pub fn to_wire(&self) -> Vec<u8> {
        self.to_hex().into_bytes()
    }

    /// Decode the contract's `content` field back into a payload
    pub fn from_wire(content: &[u8]) -> Result<Self, CryptoError> {
        let text = std::str::from_utf8(content).map_err(|_| {
            CryptoError::MalformedPayload("stored content is not a hex string".to_string())
        })?;
        Self::from_hex(text)
    }
}

/// Encrypt a paste body under AES-256-GCM
///
/// A fresh random IV is drawn on every call, so encrypting the same body twice
/// under the same key never produces the same payload.
///
/// # Errors
///
/// Returns an error if the random source fails or the cipher rejects the input.
pub fn encrypt_content(plaintext: &str, key: &SymmetricKey) -> Result<EncryptedPayload, CryptoError> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.bytes()));

    let mut iv = [0u8; IV_SIZE];
    getrandom::getrandom(&mut iv).map_err(|e| CryptoError::Random(e.to_string()))?;
    let nonce = Nonce::from_slice(&iv);

    let ciphertext = cipher
        .encrypt(nonce, plaintext.as_bytes())
        .map_err(|_| CryptoError::Cipher)?;

    let mut out = Vec::with_capacity(IV_SIZE + ciphertext.len());
    out.extend_from_slice(&iv);
    out.extend_from_slice(&ciphertext);

    tracing::debug!(size = out.len(), "sealed paste content");
    Ok(EncryptedPayload(out))
}

/// Decrypt a payload produced by [`encrypt_content`]
///
/// # Errors
///
/// - `AuthenticationFailed` if the payload is shorter than the IV, the tag does not
///   verify (wrong key or tampering)
/// - `InvalidUtf8` if the opened bytes are not UTF-8
pub fn decrypt_content(payload: &EncryptedPayload, key: &SymmetricKey) -> Result<String, CryptoError> {
    let data = payload.bytes();
    if data.len() < IV_SIZE {
        return Err(CryptoError::AuthenticationFailed);
    }

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.bytes()));
    let nonce = Nonce::from_slice(&data[..IV_SIZE]);
    let plaintext = cipher
        .decrypt(nonce, &data[IV_SIZE..])
        .map_err(|_| CryptoError::AuthenticationFailed)?;

    String::from_utf8(plaintext).map_err(|_| CryptoError::InvalidUtf8)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::crypto::KEY_SIZE;

    fn key() -> SymmetricKey {
        SymmetricKey::from([42u8; KEY_SIZE])
    }

    #[test]
    fn test_encrypt_decrypt() {
        let key = key();
        let text = "hello world, this is a test message for encryption";

        let payload = encrypt_content(text, &key).unwrap();
        assert_eq!(payload.len(), IV_SIZE + text.len() + TAG_SIZE);
        assert_eq!(decrypt_content(&payload, &key).unwrap(), text);
    }

    #[test]
    fn test_empty_and_multibyte_content() {
        let key = key();
        for text in ["", "ünïcödé 🦀 paste", "line one\nline two\n"] {
            let payload = encrypt_content(text, &key).unwrap();
            assert_eq!(decrypt_content(&payload, &key).unwrap(), text);
        }
    }

    #[test]
    fn test_fresh_iv_per_call() {
        let key = key();
        let a = encrypt_content("same body", &key).unwrap();
        let b = encrypt_content("same body", &key).unwrap();
        assert_ne!(a, b);
        assert_ne!(a.iv(), b.iv());
    }

    #[test]
    fn test_tampering_fails_authentication() {
        let key = key();
        let payload = encrypt_content("tamper with me", &key).unwrap();

        for i in IV_SIZE..payload.len() {
            let mut bytes = payload.bytes().to_vec();
            bytes[i] ^= 0x01;
            let result = decrypt_content(&EncryptedPayload::from(bytes), &key);
            assert_eq!(result, Err(CryptoError::AuthenticationFailed), "byte {}", i);
        }
    }

    #[test]
    fn test_wrong_key_fails_authentication() {
        let payload = encrypt_content("secret", &key()).unwrap();
        let other = SymmetricKey::from([7u8; KEY_SIZE]);
        assert_eq!(
            decrypt_content(&payload, &other),
            Err(CryptoError::AuthenticationFailed)
        );
    }

    #[test]
    fn test_short_payload_fails_authentication() {
        let short = EncryptedPayload::from(vec![0u8; IV_SIZE - 1]);
        assert_eq!(
            decrypt_content(&short, &key()),
            Err(CryptoError::AuthenticationFailed)
        );

        // Exactly an IV but no tag
        let iv_only = EncryptedPayload::from(vec![0u8; IV_SIZE]);
        assert_eq!(
            decrypt_content(&iv_only, &key()),
            Err(CryptoError::AuthenticationFailed)
        );
    }

    #[test]
    fn test_wire_format() {
        let key = key();
        let payload = encrypt_content("on chain", &key).unwrap();

        let wire = payload.to_wire();
        assert!(wire.starts_with(b"0x"));
        assert!(wire[2..].iter().all(|b| b.is_ascii_hexdigit()));

        let parsed = EncryptedPayload::from_wire(&wire).unwrap();
        assert_eq!(parsed, payload);
        assert!(EncryptedPayload::from_wire(&[0xff, 0xfe]).is_err());
    }
}
