use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An EIP-155 chain id
///
/// Displays and serializes as the `0x`-prefixed lowercase hex form wallets
/// report (`0xa4b1`). Parses either hex or decimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChainId(u64);

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[error("invalid chain id: {0}")]
pub struct ChainIdError(String);

impl ChainId {
    pub const ARBITRUM_ONE: ChainId = ChainId(42161);
    pub const ARBITRUM_SEPOLIA: ChainId = ChainId(421614);

    pub const fn new(id: u64) -> Self {
        ChainId(id)
    }

    pub const fn id(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        ChainId(id)
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl FromStr for ChainId {
    type Err = ChainIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => s.parse::<u64>(),
        };
        parsed
            .map(ChainId)
            .map_err(|_| ChainIdError(s.to_string()))
    }
}

impl Serialize for ChainId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ChainId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
