use std::sync::Arc;

use alloy_primitives::Address;

use crate::crypto::KeyScheme;
use crate::network::{ChainId, ContractAbi, NetworkRegistry, UnsupportedNetwork};
use crate::rpc::Transport;
use crate::session::ProviderHandle;

/// A consistent `(chain, transport, address, abi, key scheme)` tuple
///
/// Built fresh for every action from a single registry entry.
#[derive(Debug, Clone)]
pub struct NetworkBinding {
    pub chain_id: ChainId,
    pub label: String,
    pub transport: Arc<dyn Transport>,
    pub contract_address: Address,
    pub contract_abi: ContractAbi,
    pub key_scheme: KeyScheme,
}

/// Bind `provider` to the contract deployed on its chain
pub fn resolve_binding(
    registry: &NetworkRegistry,
    provider: &ProviderHandle,
) -> Result<NetworkBinding, UnsupportedNetwork> {
    let network = registry.resolve(provider.chain_id)?;
    let contract_address = network.contract_address.ok_or_else(|| UnsupportedNetwork {
        chain_id: network.chain_id,
        label: network.label.clone(),
    })?;

    tracing::debug!(
        chain_id = %network.chain_id,
        contract = %contract_address,
        abi = %network.contract_abi,
        "resolved contract binding"
    );

    Ok(NetworkBinding {
        chain_id: network.chain_id,
        label: network.label.clone(),
        transport: provider.transport.clone(),
        contract_address,
        contract_abi: network.contract_abi,
        key_scheme: network.key_scheme,
    })
}
