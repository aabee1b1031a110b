//! Supported networks and their contract deployments
//!
//! The registry is plain configuration: a chain id maps to exactly one
//! `(rpc_url, contract_address, contract_abi, key_scheme)` entry, and the
//! first entry is the default network. Nothing here is derived at runtime.

mod chain_id;
mod registry;

pub use chain_id::{ChainId, ChainIdError};
pub use registry::{
    ContractAbi, NetworkConfig, NetworkRegistry, RegistryError, UnsupportedNetwork,
    UNKNOWN_NETWORK,
};
