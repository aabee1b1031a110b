use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::Address;
use anyhow::Result;

use super::chain::TestChain;
use super::wallet::TestWallet;
use crate::crypto::KeyScheme;
use crate::network::{ChainId, ContractAbi, NetworkConfig, NetworkRegistry};
use crate::paste::PasteClient;
use crate::rpc::{RpcError, Transport};
use crate::session::{Connector, Session};
use crate::wallet::Wallet;

/// Poll interval used by clients built through the harness
pub const TEST_POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Hands out the in-process chains as read-only transports
#[derive(Debug, Clone)]
pub struct TestConnector {
    chains: HashMap<ChainId, Arc<TestChain>>,
}

impl Connector for TestConnector {
    fn connect(&self, network: &NetworkConfig) -> Result<Arc<dyn Transport>, RpcError> {
        let chain = self
            .chains
            .get(&network.chain_id)
            .cloned()
            .ok_or(RpcError::NoEndpoint(network.chain_id))?;
        Ok(chain)
    }
}

/// A set of in-process chains plus the registry that describes them
///
/// Mirrors the default registry: Arbitrum One runs the legacy contract and
/// Arbitrum Sepolia the consolidated one, each with a deployment configured.
pub struct TestNetwork {
    registry: Arc<NetworkRegistry>,
    chains: HashMap<ChainId, Arc<TestChain>>,
}

impl TestNetwork {
    /// Create the default two-chain network using signature-bound keys
    pub fn new() -> Result<Self> {
        Self::with_key_scheme(KeyScheme::SignatureBound)
    }

    /// Create the default two-chain network with every entry on `scheme`
    pub fn with_key_scheme(scheme: KeyScheme) -> Result<Self> {
        let networks = NetworkRegistry::default()
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, mut network)| {
                network.contract_address = Some(Address::repeat_byte(0xb0 + i as u8));
                network.key_scheme = scheme;
                network
            })
            .collect();
        Self::from_networks(networks)
    }

    /// Create a network from explicit registry entries
    ///
    /// Every entry gets a chain; entries without a contract address get a
    /// chain with nothing deployed on it.
    ///
    /// # Arguments
    /// * `networks` - Registry entries, the first being the default network
    pub fn from_networks(networks: Vec<NetworkConfig>) -> Result<Self> {
        let chains = networks
            .iter()
            .map(|n| {
                let chain = TestChain::new(
                    n.chain_id,
                    n.contract_abi,
                    n.contract_address.unwrap_or(Address::ZERO),
                );
                (n.chain_id, Arc::new(chain))
            })
            .collect();
        let registry = NetworkRegistry::new(networks)?;
        Ok(Self {
            registry: Arc::new(registry),
            chains,
        })
    }

    pub fn registry(&self) -> Arc<NetworkRegistry> {
        self.registry.clone()
    }

    /// Get the chain for `chain_id`
    pub fn chain(&self, chain_id: ChainId) -> Result<Arc<TestChain>> {
        self.chains
            .get(&chain_id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no test chain {}", chain_id))
    }

    /// Add a chain the registry knows nothing about, e.g. Ethereum mainnet
    pub fn add_foreign_chain(&mut self, chain_id: ChainId) -> Arc<TestChain> {
        let chain = Arc::new(TestChain::new(chain_id, ContractAbi::Legacy, Address::ZERO));
        self.chains.insert(chain_id, chain.clone());
        chain
    }

    pub fn connector(&self) -> Arc<TestConnector> {
        Arc::new(TestConnector {
            chains: self.chains.clone(),
        })
    }

    /// A wallet with a fresh account that starts on `chain_id`
    pub fn wallet(&self, chain_id: ChainId) -> Result<Arc<TestWallet>> {
        Ok(Arc::new(TestWallet::new(self.chains.clone(), chain_id)?))
    }

    /// A disconnected session over this network's registry and chains
    pub fn session(&self, wallet: Option<Arc<TestWallet>>) -> Session {
        Session::with_connector(
            self.registry.clone(),
            wallet.map(|w| w as Arc<dyn Wallet>),
            self.connector(),
        )
    }

    /// Connect `wallet` and bind a client to the chain it ends up on
    pub async fn client(&self, wallet: &Arc<TestWallet>) -> Result<PasteClient> {
        let session = self.session(Some(wallet.clone()));
        let info = session.connect().await?;
        let client = PasteClient::from_session(&session, info.chain_id, TEST_POLL_INTERVAL).await?;
        Ok(client)
    }

    /// A client without a wallet, reading from `chain_id`
    pub async fn read_only_client(&self, chain_id: ChainId) -> Result<PasteClient> {
        let session = self.session(None);
        let client = PasteClient::from_session(&session, chain_id, TEST_POLL_INTERVAL).await?;
        Ok(client)
    }
}
