use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use url::Url;

use super::ChainId;
use crate::crypto::KeyScheme;

/// Label reported for chain ids the registry does not know
pub const UNKNOWN_NETWORK: &str = "Unknown Network";

/// Which contract interface a deployment speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContractAbi {
    /// Per-type create calls and `getPublicPaste` / `getPrivatePaste` reads
    Legacy,
    /// Single `createPaste` and signature-gated `getPasteContent`, with versions
    Consolidated,
}

impl std::fmt::Display for ContractAbi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContractAbi::Legacy => write!(f, "legacy"),
            ContractAbi::Consolidated => write!(f, "consolidated"),
        }
    }
}

/// One registry entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Short slug used on the command line and in environment overrides
    pub name: String,
    pub chain_id: ChainId,
    pub label: String,
    #[serde(default = "default_token_symbol")]
    pub token_symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<Url>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<Address>,
    pub contract_abi: ContractAbi,
    #[serde(default)]
    pub key_scheme: KeyScheme,
}

fn default_token_symbol() -> String {
    "ETH".to_string()
}

impl NetworkConfig {
    /// A network is supported once a contract deployment is configured for it
    pub fn is_supported(&self) -> bool {
        self.contract_address.is_some()
    }

    /// Prefix for this entry's environment overrides, e.g. `OXBIN_ARBITRUM_ONE`
    pub fn env_prefix(&self) -> String {
        let slug: String = self
            .name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        format!("OXBIN_{}", slug)
    }
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[error("network {chain_id} ({label}) is not supported")]
pub struct UnsupportedNetwork {
    pub chain_id: ChainId,
    pub label: String,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("network registry must contain at least one network")]
    Empty,
    #[error("chain {0} is configured more than once")]
    DuplicateChain(ChainId),
    #[error("network name '{0}' is configured more than once")]
    DuplicateName(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidOverride { var: String, reason: String },
}

/// Ordered, immutable set of networks the client may bind to
///
/// The first entry is the default network: the one a wallet is switched to on
/// connect and the one read-only views use when nothing else is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<NetworkConfig>", into = "Vec<NetworkConfig>")]
pub struct NetworkRegistry {
    networks: Vec<NetworkConfig>,
}

impl TryFrom<Vec<NetworkConfig>> for NetworkRegistry {
    type Error = RegistryError;
    fn try_from(networks: Vec<NetworkConfig>) -> Result<Self, Self::Error> {
        Self::new(networks)
    }
}

impl From<NetworkRegistry> for Vec<NetworkConfig> {
    fn from(registry: NetworkRegistry) -> Self {
        registry.networks
    }
}

impl Default for NetworkRegistry {
    fn default() -> Self {
        Self {
            networks: vec![
                NetworkConfig {
                    name: "arbitrum-one".to_string(),
                    chain_id: ChainId::ARBITRUM_ONE,
                    label: "Arbitrum One".to_string(),
                    token_symbol: default_token_symbol(),
                    rpc_url: Url::parse("https://arb1.arbitrum.io/rpc").ok(),
                    contract_address: None,
                    contract_abi: ContractAbi::Legacy,
                    key_scheme: KeyScheme::SignatureBound,
                },
                NetworkConfig {
                    name: "arbitrum-sepolia".to_string(),
                    chain_id: ChainId::ARBITRUM_SEPOLIA,
                    label: "Arbitrum Sepolia Testnet".to_string(),
                    token_symbol: default_token_symbol(),
                    rpc_url: Url::parse("https://sepolia-rollup.arbitrum.io/rpc").ok(),
                    contract_address: None,
                    contract_abi: ContractAbi::Consolidated,
                    key_scheme: KeyScheme::SignatureBound,
                },
            ],
        }
    }
}

impl NetworkRegistry {
    /// Build a registry, rejecting empty tables and duplicate chains or names
    pub fn new(networks: Vec<NetworkConfig>) -> Result<Self, RegistryError> {
        if networks.is_empty() {
            return Err(RegistryError::Empty);
        }
        for (i, network) in networks.iter().enumerate() {
            let earlier = &networks[..i];
            if earlier.iter().any(|n| n.chain_id == network.chain_id) {
                return Err(RegistryError::DuplicateChain(network.chain_id));
            }
            if earlier.iter().any(|n| n.name == network.name) {
                return Err(RegistryError::DuplicateName(network.name.clone()));
            }
        }
        Ok(Self { networks })
    }

    pub fn default_network(&self) -> &NetworkConfig {
        // never empty, enforced by `new`
        &self.networks[0]
    }

    pub fn get(&self, chain_id: ChainId) -> Option<&NetworkConfig> {
        self.networks.iter().find(|n| n.chain_id == chain_id)
    }

    /// Look a network up by slug, or by chain id in hex or decimal
    pub fn find(&self, name_or_id: &str) -> Option<&NetworkConfig> {
        let needle = name_or_id.trim();
        self.networks
            .iter()
            .find(|n| n.name.eq_ignore_ascii_case(needle))
            .or_else(|| {
                needle
                    .parse::<ChainId>()
                    .ok()
                    .and_then(|chain_id| self.get(chain_id))
            })
    }

    /// Resolve the entry that owns `chain_id`
    ///
    /// Address and ABI always come from this single entry, so a binding built
    /// from the result can never pair one chain's address with another's ABI.
    pub fn resolve(&self, chain_id: ChainId) -> Result<&NetworkConfig, UnsupportedNetwork> {
        match self.get(chain_id) {
            Some(network) if network.is_supported() => Ok(network),
            _ => Err(UnsupportedNetwork {
                chain_id,
                label: self.network_name(chain_id).to_string(),
            }),
        }
    }

    pub fn is_supported(&self, chain_id: ChainId) -> bool {
        self.get(chain_id).is_some_and(NetworkConfig::is_supported)
    }

    pub fn network_name(&self, chain_id: ChainId) -> &str {
        self.get(chain_id)
            .map(|n| n.label.as_str())
            .unwrap_or(UNKNOWN_NETWORK)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NetworkConfig> {
        self.networks.iter()
    }

    pub fn supported(&self) -> impl Iterator<Item = &NetworkConfig> {
        self.networks.iter().filter(|n| n.is_supported())
    }

    /// Apply `OXBIN_<NAME>_RPC_URL` and `OXBIN_<NAME>_CONTRACT_ADDRESS` from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<(), RegistryError> {
        self.apply_overrides(|var| std::env::var(var).ok())
    }

    /// Apply overrides from an arbitrary lookup; empty values are ignored
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), RegistryError>
    where
        F: Fn(&str) -> Option<String>,
    {
        for network in self.networks.iter_mut() {
            let prefix = network.env_prefix();

            let var = format!("{}_RPC_URL", prefix);
            if let Some(value) = lookup(&var).filter(|v| !v.trim().is_empty()) {
                let url = Url::parse(value.trim()).map_err(|e| RegistryError::InvalidOverride {
                    var: var.clone(),
                    reason: e.to_string(),
                })?;
                tracing::debug!(network = %network.name, %url, "rpc url overridden from environment");
                network.rpc_url = Some(url);
            }

            let var = format!("{}_CONTRACT_ADDRESS", prefix);
            if let Some(value) = lookup(&var).filter(|v| !v.trim().is_empty()) {
                let address = value.trim().parse::<Address>().map_err(|e| {
                    RegistryError::InvalidOverride {
                        var: var.clone(),
                        reason: e.to_string(),
                    }
                })?;
                tracing::debug!(network = %network.name, %address, "contract address overridden from environment");
                network.contract_address = Some(address);
            }
        }
        Ok(())
    }
}
