use std::fmt;
use std::str::FromStr;

use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

use super::abi::{consolidated::IPasteBin, legacy::ILegacyPasteBin};
use super::ContractError;

/// Access type of a paste; discriminants match the contract enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum PasteType {
    Public = 0,
    Paid = 1,
    Private = 2,
}

impl PasteType {
    pub fn is_public(&self) -> bool {
        matches!(self, PasteType::Public)
    }
}

impl From<PasteType> for u8 {
    fn from(paste_type: PasteType) -> Self {
        paste_type as u8
    }
}

impl TryFrom<u8> for PasteType {
    type Error = ContractError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PasteType::Public),
            1 => Ok(PasteType::Paid),
            2 => Ok(PasteType::Private),
            other => Err(ContractError::Decode(format!("unknown paste type {}", other))),
        }
    }
}

impl fmt::Display for PasteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasteType::Public => write!(f, "Public"),
            PasteType::Paid => write!(f, "Paid"),
            PasteType::Private => write!(f, "Private"),
        }
    }
}

impl FromStr for PasteType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "public" => Ok(PasteType::Public),
            "paid" => Ok(PasteType::Paid),
            "private" => Ok(PasteType::Private),
            other => Err(format!("unknown paste type '{}'", other)),
        }
    }
}

/// Paste metadata as reported by `getPasteInfo` and the listing calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasteInfo {
    pub id: U256,
    pub creator: Address,
    pub title: String,
    /// Unix seconds
    pub creation_time: u64,
    /// Unix seconds, `0` for never
    pub expiration_time: u64,
    pub paste_type: PasteType,
    /// Wei
    pub price: U256,
    /// The stored encryption seed, empty for public pastes
    pub public_key: String,
    /// Only reported by contracts that keep version history
    pub current_version: Option<u64>,
}

/// Explore listings carry the same fields as [`PasteInfo`]
pub type PasteSummary = PasteInfo;

impl PasteInfo {
    pub fn never_expires(&self) -> bool {
        self.expiration_time == 0
    }

    pub fn is_expired_at(&self, now: u64) -> bool {
        !self.never_expires() && self.expiration_time <= now
    }
}

/// A paste together with its stored content bytes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paste {
    pub info: PasteInfo,
    pub content: Bytes,
}

/// One immutable snapshot in a paste's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasteVersion {
    pub version: u64,
    pub content: Bytes,
    /// Unix seconds
    pub updated_at: u64,
}

/// Arguments for `create_paste`, shared by both contract generations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePaste {
    pub title: String,
    /// Plain text for public pastes, the hex wire form of a sealed payload otherwise
    pub content: String,
    /// Unix seconds, `0` for never
    pub expiration_time: u64,
    pub paste_type: PasteType,
    /// Wei; only meaningful for paid pastes
    pub price: U256,
    /// Encryption seed in hex, empty for public pastes
    pub public_key: String,
    /// Only meaningful for private pastes
    pub allowed_addresses: Vec<Address>,
    /// Wei sent along with the creation call
    pub tip: U256,
}

fn seconds(value: U256) -> u64 {
    value.saturating_to::<u64>()
}

impl TryFrom<ILegacyPasteBin::PasteInfo> for PasteInfo {
    type Error = ContractError;
    fn try_from(info: ILegacyPasteBin::PasteInfo) -> Result<Self, Self::Error> {
        Ok(PasteInfo {
            id: info.id,
            creator: info.creator,
            title: info.title,
            creation_time: seconds(info.creationTime),
            expiration_time: seconds(info.expirationTime),
            paste_type: PasteType::try_from(info.pasteType)?,
            price: info.price,
            public_key: info.publicKey,
            current_version: None,
        })
    }
}

impl TryFrom<IPasteBin::PasteInfo> for PasteInfo {
    type Error = ContractError;
    fn try_from(info: IPasteBin::PasteInfo) -> Result<Self, Self::Error> {
        Ok(PasteInfo {
            id: info.id,
            creator: info.creator,
            title: info.title,
            creation_time: seconds(info.creationTime),
            expiration_time: seconds(info.expirationTime),
            paste_type: PasteType::try_from(info.pasteType)?,
            price: info.price,
            public_key: info.publicKey,
            current_version: Some(seconds(info.currentVersion)),
        })
    }
}

impl TryFrom<ILegacyPasteBin::Paste> for Paste {
    type Error = ContractError;
    fn try_from(paste: ILegacyPasteBin::Paste) -> Result<Self, Self::Error> {
        Ok(Paste {
            info: PasteInfo {
                id: paste.id,
                creator: paste.creator,
                title: paste.title,
                creation_time: seconds(paste.creationTime),
                expiration_time: seconds(paste.expirationTime),
                paste_type: PasteType::try_from(paste.pasteType)?,
                price: paste.price,
                public_key: paste.publicKey,
                current_version: None,
            },
            content: paste.content,
        })
    }
}

impl TryFrom<IPasteBin::Paste> for Paste {
    type Error = ContractError;
    fn try_from(paste: IPasteBin::Paste) -> Result<Self, Self::Error> {
        Ok(Paste {
            info: PasteInfo {
                id: paste.id,
                creator: paste.creator,
                title: paste.title,
                creation_time: seconds(paste.creationTime),
                expiration_time: seconds(paste.expirationTime),
                paste_type: PasteType::try_from(paste.pasteType)?,
                price: paste.price,
                public_key: paste.publicKey,
                current_version: Some(seconds(paste.currentVersion)),
            },
            content: paste.content,
        })
    }
}

impl From<IPasteBin::PasteVersion> for PasteVersion {
    fn from(version: IPasteBin::PasteVersion) -> Self {
        PasteVersion {
            version: seconds(version.version),
            content: version.content,
            updated_at: seconds(version.updatedAt),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_paste_type_ordering_matches_contract() {
        assert_eq!(u8::from(PasteType::Public), 0);
        assert_eq!(u8::from(PasteType::Paid), 1);
        assert_eq!(u8::from(PasteType::Private), 2);
        assert!(PasteType::Public < PasteType::Paid);
        assert!(PasteType::try_from(3).is_err());
    }

    #[test]
    fn test_paste_type_parse_and_display() {
        for paste_type in [PasteType::Public, PasteType::Paid, PasteType::Private] {
            let parsed: PasteType = paste_type.to_string().parse().unwrap();
            assert_eq!(parsed, paste_type);
        }
        assert_eq!("PRIVATE".parse::<PasteType>().unwrap(), PasteType::Private);
        assert!("secret".parse::<PasteType>().is_err());
    }

    #[test]
    fn test_expiry() {
        let mut info = PasteInfo {
            id: U256::from(1),
            creator: Address::ZERO,
            title: "t".to_string(),
            creation_time: 100,
            expiration_time: 0,
            paste_type: PasteType::Public,
            price: U256::ZERO,
            public_key: String::new(),
            current_version: None,
        };
        assert!(!info.is_expired_at(u64::MAX));

        info.expiration_time = 200;
        assert!(!info.is_expired_at(199));
        assert!(info.is_expired_at(200));
    }
}
