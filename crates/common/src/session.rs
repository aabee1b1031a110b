//! Wallet session state and provider selection
//!
//! ```text
//! Disconnected --connect--> Connecting --accounts--> Connected { address, chain_id }
//!      ^                        |                          |
//!      +------- rejected -------+                          |
//!      +------------------- disconnect --------------------+
//! ```
//!
//! While connected, the wallet may sit on a chain the registry does not
//! support ("chain mismatch"). Views then fall back to a read-only provider
//! for the selected network, and mutations are refused by the contract
//! facade's binding resolution.

use std::sync::Arc;

use alloy_primitives::Address;
use parking_lot::RwLock;
use serde::Serialize;

use crate::network::{ChainId, NetworkConfig, NetworkRegistry, UnsupportedNetwork};
use crate::rpc::{RpcClient, RpcError, Transport};
use crate::wallet::{Wallet, WalletError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    Disconnected,
    Connecting,
    Connected { address: Address, chain_id: ChainId },
}

/// Snapshot returned by [`Session::connect`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    pub address: Address,
    pub chain_id: ChainId,
    /// The wallet is on a chain the registry does not support
    pub chain_mismatch: bool,
    /// Why the automatic switch to the default network failed, if it did
    pub switch_error: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("wallet connection rejected by the user")]
    Rejected,
    #[error("no wallet available: {0}")]
    NoProvider(String),
    #[error("wallet exposed no accounts")]
    NoAccounts,
    #[error("wallet error: {0}")]
    Wallet(WalletError),
}

impl From<WalletError> for ConnectError {
    fn from(e: WalletError) -> Self {
        match e {
            WalletError::Rejected => ConnectError::Rejected,
            WalletError::Unavailable(reason) => ConnectError::NoProvider(reason),
            WalletError::NoAccounts => ConnectError::NoAccounts,
            e => ConnectError::Wallet(e),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SwitchError {
    #[error("network switch rejected by the user")]
    Rejected,
    #[error("network {0} is not supported")]
    Unsupported(ChainId),
    #[error("no wallet connected")]
    NotConnected,
    #[error("wallet error: {0}")]
    Wallet(WalletError),
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no wallet connected")]
    NotConnected,
    #[error(transparent)]
    UnsupportedNetwork(#[from] UnsupportedNetwork),
    #[error("rpc error: {0}")]
    Rpc(#[from] RpcError),
    #[error("wallet error: {0}")]
    Wallet(#[from] WalletError),
}

/// Builds read-only transports for registry entries
pub trait Connector: Send + Sync + std::fmt::Debug {
    fn connect(&self, network: &NetworkConfig) -> Result<Arc<dyn Transport>, RpcError>;
}

/// Connects to a network's configured public RPC URL over HTTP
#[derive(Debug, Clone, Default)]
pub struct HttpConnector;

impl Connector for HttpConnector {
    fn connect(&self, network: &NetworkConfig) -> Result<Arc<dyn Transport>, RpcError> {
        let url = network
            .rpc_url
            .as_ref()
            .ok_or(RpcError::NoEndpoint(network.chain_id))?;
        Ok(Arc::new(RpcClient::new(url)?))
    }
}

/// A transport bound to one chain, signer-backed or read-only
#[derive(Debug, Clone)]
pub struct ProviderHandle {
    pub transport: Arc<dyn Transport>,
    pub chain_id: ChainId,
    /// The account transactions are sent from; `None` for read-only handles
    pub signer: Option<Address>,
}

impl ProviderHandle {
    pub fn read_only(transport: Arc<dyn Transport>, chain_id: ChainId) -> Self {
        Self {
            transport,
            chain_id,
            signer: None,
        }
    }

    pub fn is_read_only(&self) -> bool {
        self.signer.is_none()
    }
}

/// Binds an optional wallet to the network registry
#[derive(Debug)]
pub struct Session {
    wallet: Option<Arc<dyn Wallet>>,
    registry: Arc<NetworkRegistry>,
    connector: Arc<dyn Connector>,
    state: RwLock<SessionState>,
}

impl Session {
    pub fn new(registry: Arc<NetworkRegistry>, wallet: Option<Arc<dyn Wallet>>) -> Self {
        Self::with_connector(registry, wallet, Arc::new(HttpConnector))
    }

    pub fn with_connector(
        registry: Arc<NetworkRegistry>,
        wallet: Option<Arc<dyn Wallet>>,
        connector: Arc<dyn Connector>,
    ) -> Self {
        Self {
            wallet,
            registry,
            connector,
            state: RwLock::new(SessionState::Disconnected),
        }
    }

    pub fn state(&self) -> SessionState {
        *self.state.read()
    }

    pub fn registry(&self) -> &Arc<NetworkRegistry> {
        &self.registry
    }

    pub fn wallet(&self) -> Option<&Arc<dyn Wallet>> {
        self.wallet.as_ref()
    }

    pub fn address(&self) -> Option<Address> {
        match self.state() {
            SessionState::Connected { address, .. } => Some(address),
            _ => None,
        }
    }

    pub fn chain_id(&self) -> Option<ChainId> {
        match self.state() {
            SessionState::Connected { chain_id, .. } => Some(chain_id),
            _ => None,
        }
    }

    /// Connected, but on a chain the registry does not support
    pub fn chain_mismatch(&self) -> bool {
        self.chain_id()
            .is_some_and(|chain_id| !self.registry.is_supported(chain_id))
    }

    /// Ask the wallet for an account and bind to its chain
    ///
    /// If the wallet is on an unsupported chain, a switch to the default
    /// network is attempted. A failed switch leaves the session connected in
    /// the chain-mismatch state and is reported in the returned info.
    pub async fn connect(&self) -> Result<SessionInfo, ConnectError> {
        let wallet = self
            .wallet
            .clone()
            .ok_or_else(|| ConnectError::NoProvider("no wallet endpoint configured".to_string()))?;

        *self.state.write() = SessionState::Connecting;
        match self.establish(wallet.as_ref()).await {
            Ok(info) => Ok(info),
            Err(e) => {
                tracing::warn!("wallet connection failed: {}", e);
                *self.state.write() = SessionState::Disconnected;
                Err(e)
            }
        }
    }

    async fn establish(&self, wallet: &dyn Wallet) -> Result<SessionInfo, ConnectError> {
        let accounts = wallet.request_accounts().await?;
        let address = *accounts.first().ok_or(ConnectError::NoAccounts)?;
        let mut chain_id = wallet.chain_id().await?;
        let mut switch_error = None;

        if !self.registry.is_supported(chain_id) {
            let target = self.registry.default_network();
            tracing::info!(
                from = %chain_id,
                to = %target.chain_id,
                "wallet on unsupported network, switching to {}",
                target.label
            );
            match wallet.switch_chain(target.chain_id).await {
                Ok(()) => chain_id = target.chain_id,
                Err(e) => {
                    tracing::warn!("failed to switch network: {}", e);
                    switch_error = Some(e.to_string());
                }
            }
        }

        *self.state.write() = SessionState::Connected { address, chain_id };
        tracing::info!(%address, %chain_id, "wallet connected");

        Ok(SessionInfo {
            address,
            chain_id,
            chain_mismatch: !self.registry.is_supported(chain_id),
            switch_error,
        })
    }

    /// Forget the connection; always succeeds
    pub fn disconnect(&self) {
        let mut state = self.state.write();
        if matches!(*state, SessionState::Connected { .. }) {
            tracing::info!("wallet disconnected");
        }
        *state = SessionState::Disconnected;
    }

    /// Ask the wallet to move to `target`
    pub async fn switch_network(&self, target: ChainId) -> Result<(), SwitchError> {
        let address = self.address().ok_or(SwitchError::NotConnected)?;
        let wallet = self.wallet.as_ref().ok_or(SwitchError::NotConnected)?;

        if !self.registry.is_supported(target) {
            return Err(SwitchError::Unsupported(target));
        }

        match wallet.switch_chain(target).await {
            Ok(()) => {
                *self.state.write() = SessionState::Connected {
                    address,
                    chain_id: target,
                };
                tracing::info!(chain_id = %target, "switched network");
                Ok(())
            }
            Err(WalletError::Rejected) => Err(SwitchError::Rejected),
            Err(WalletError::UnknownChain(chain_id)) => Err(SwitchError::Unsupported(chain_id)),
            Err(e) => Err(SwitchError::Wallet(e)),
        }
    }

    /// Pick the provider for the next action
    ///
    /// Connected on a supported chain: a signer-backed handle on the wallet's
    /// current chain. Otherwise: a read-only handle for `selected`. The
    /// wallet's chain is re-read each time so out-of-band switches are seen.
    pub async fn provider(&self, selected: ChainId) -> Result<ProviderHandle, SessionError> {
        if let (Some(address), Some(wallet)) = (self.address(), self.wallet.as_ref()) {
            let chain_id = wallet.chain_id().await?;
            *self.state.write() = SessionState::Connected { address, chain_id };

            if self.registry.is_supported(chain_id) {
                tracing::debug!(%chain_id, %address, "using wallet provider");
                return Ok(ProviderHandle {
                    transport: wallet.transport(),
                    chain_id,
                    signer: Some(address),
                });
            }
            tracing::debug!(%chain_id, "wallet on unsupported network, falling back to read-only");
        }

        let network = self.registry.resolve(selected)?;
        let transport = self.connector.connect(network)?;
        tracing::debug!(chain_id = %selected, "using read-only provider");
        Ok(ProviderHandle::read_only(transport, selected))
    }

    /// A signer-backed provider, or an error explaining why there is none
    pub async fn signer_provider(&self) -> Result<ProviderHandle, SessionError> {
        let chain_id = self.chain_id().ok_or(SessionError::NotConnected)?;
        let provider = self.provider(chain_id).await?;
        if provider.is_read_only() {
            let chain_id = self.chain_id().unwrap_or(chain_id);
            return Err(UnsupportedNetwork {
                chain_id,
                label: self.registry.network_name(chain_id).to_string(),
            }
            .into());
        }
        Ok(provider)
    }
}
