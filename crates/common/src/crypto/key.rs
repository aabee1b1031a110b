use std::fmt;
use std::ops::Deref;

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::CryptoError;

/// Size of an encryption seed and of an AES-256 key in bytes
pub const KEY_SIZE: usize = 32;

/// A 256-bit random seed generated once per non-public paste
///
/// The seed is stored on-chain as the paste's `publicKey` field and reused for
/// every later edit of that paste. Despite the field name it is not a public
/// key of any asymmetric scheme.
///
/// # Examples
///
/// ```ignore
/// let seed = EncryptionKey::generate()?;
/// let stored = seed.to_hex(); // "0x..." written to the contract
/// let recovered = EncryptionKey::from_hex(&stored)?;
/// assert_eq!(seed, recovered);
/// ```
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct EncryptionKey([u8; KEY_SIZE]);

impl Deref for EncryptionKey {
    type Target = [u8; KEY_SIZE];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<[u8; KEY_SIZE]> for EncryptionKey {
    fn from(bytes: [u8; KEY_SIZE]) -> Self {
        EncryptionKey(bytes)
    }
}

impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EncryptionKey(..)")
    }
}

impl EncryptionKey {
    /// Generate a new random seed using a cryptographically secure RNG
    pub fn generate() -> Result<Self, CryptoError> {
        let mut buff = [0; KEY_SIZE];
        getrandom::getrandom(&mut buff).map_err(|e| CryptoError::Random(e.to_string()))?;
        Ok(Self(buff))
    }

    /// Create a seed from a byte slice
    ///
    /// # Errors
    ///
    /// Returns `InvalidKeyLength` if the slice is not exactly `KEY_SIZE` bytes.
    pub fn from_slice(data: &[u8]) -> Result<Self, CryptoError> {
        Ok(Self(to_key_bytes(data)?))
    }

    /// Parse a seed from hex, with or without a `0x` prefix
    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        let hex = hex.strip_prefix("0x").unwrap_or(hex);
        let bytes = hex::decode(hex)
            .map_err(|e| CryptoError::MalformedPayload(format!("seed hex decode error: {}", e)))?;
        Self::from_slice(&bytes)
    }

    /// `0x`-prefixed lowercase hex, the form stored in the contract
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    pub fn bytes(&self) -> &[u8] {
        self.0.as_ref()
    }
}

/// The AES-256-GCM key that actually seals or opens a payload
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; KEY_SIZE]);

impl From<[u8; KEY_SIZE]> for SymmetricKey {
    fn from(bytes: [u8; KEY_SIZE]) -> Self {
        SymmetricKey(bytes)
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SymmetricKey(..)")
    }
}

impl SymmetricKey {
    /// # Errors
    ///
    /// Returns `InvalidKeyLength` if the slice is not exactly `KEY_SIZE` bytes.
    pub fn from_slice(data: &[u8]) -> Result<Self, CryptoError> {
        Ok(Self(to_key_bytes(data)?))
    }

    pub fn bytes(&self) -> &[u8] {
        self.0.as_ref()
    }
}

fn to_key_bytes(data: &[u8]) -> Result<[u8; KEY_SIZE], CryptoError> {
    if data.len() != KEY_SIZE {
        return Err(CryptoError::InvalidKeyLength {
            expected: KEY_SIZE,
            actual: data.len(),
        });
    }
    let mut buff = [0; KEY_SIZE];
    buff.copy_from_slice(data);
    Ok(buff)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_generate_is_random() {
        let a = EncryptionKey::generate().unwrap();
        let b = EncryptionKey::generate().unwrap();
        assert_ne!(a, b);
        assert_eq!(a.bytes().len(), KEY_SIZE);
    }

    #[test]
    fn test_key_size_validation() {
        let too_short = [1u8; 16];
        let too_long = [1u8; 64];

        assert_eq!(
            EncryptionKey::from_slice(&too_short),
            Err(CryptoError::InvalidKeyLength {
                expected: KEY_SIZE,
                actual: 16
            })
        );
        assert!(EncryptionKey::from_slice(&too_long).is_err());
        assert!(SymmetricKey::from_slice(&too_short).is_err());

        let just_right = [1u8; KEY_SIZE];
        assert!(EncryptionKey::from_slice(&just_right).is_ok());
        assert!(SymmetricKey::from_slice(&just_right).is_ok());
    }

    #[test]
    fn test_hex_roundtrip_and_prefix() {
        let seed = EncryptionKey::generate().unwrap();
        let hex = seed.to_hex();
        assert!(hex.starts_with("0x"));
        assert_eq!(hex.len(), 2 + KEY_SIZE * 2);

        assert_eq!(EncryptionKey::from_hex(&hex).unwrap(), seed);
        assert_eq!(EncryptionKey::from_hex(&hex[2..]).unwrap(), seed);
    }

    #[test]
    fn test_from_hex_rejects_empty() {
        // Public pastes store an empty publicKey
        assert!(EncryptionKey::from_hex("").is_err());
        assert!(EncryptionKey::from_hex("0xzz").is_err());
    }

    #[test]
    fn test_debug_redacts() {
        let seed = EncryptionKey::from([7u8; KEY_SIZE]);
        assert_eq!(format!("{:?}", seed), "EncryptionKey(..)");
    }
}
