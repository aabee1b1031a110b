use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use alloy_primitives::{Address, U256};
use common::network::{ChainId, NetworkConfig, NetworkRegistry};
use common::paste::{PasteClient, PasteError, TxEvent, TxObserver};
use common::price::PriceFeed;
use common::session::{ConnectError, Session, SwitchError};
use common::wallet::{RpcWallet, Wallet, WalletError};
use url::Url;

use crate::state::{AppState, StateError};

#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error(transparent)]
    State(#[from] StateError),
    #[error("unknown network '{0}', see 'oxbin networks'")]
    UnknownNetwork(String),
    #[error(transparent)]
    Wallet(#[from] WalletError),
    #[error(transparent)]
    Connect(#[from] ConnectError),
    #[error(transparent)]
    Switch(#[from] SwitchError),
    #[error("wallet is on unsupported network {chain_id}; switch to {expected} to continue")]
    ChainMismatch { chain_id: ChainId, expected: String },
    #[error(transparent)]
    Paste(#[from] PasteError),
}

#[derive(Clone)]
pub struct OpContext {
    /// Optional custom config path (defaults to ~/.oxbin)
    pub config_path: Option<PathBuf>,
    /// Loaded configuration, or defaults before `oxbin init`
    pub state: AppState,
    /// Explicit `--network` selection
    pub network: Option<String>,
    /// Explicit `--wallet` endpoint
    pub wallet_url: Option<Url>,
}

impl OpContext {
    pub fn new(
        config_path: Option<PathBuf>,
        network: Option<String>,
        wallet_url: Option<Url>,
    ) -> Result<Self, StateError> {
        let state = AppState::load_or_default(config_path.clone())?;
        Ok(Self {
            config_path,
            state,
            network,
            wallet_url,
        })
    }

    pub fn registry(&self) -> Result<Arc<NetworkRegistry>, ContextError> {
        Ok(Arc::new(self.state.registry()?))
    }

    /// The network to read from: `--network`, then the config, then the default
    pub fn selected_network<'a>(
        &self,
        registry: &'a NetworkRegistry,
    ) -> Result<&'a NetworkConfig, ContextError> {
        match self.network.as_ref().or(self.state.config.network.as_ref()) {
            Some(name) => registry
                .find(name)
                .ok_or_else(|| ContextError::UnknownNetwork(name.clone())),
            None => Ok(registry.default_network()),
        }
    }

    pub fn wallet(&self) -> Result<Arc<dyn Wallet>, ContextError> {
        let url = self
            .wallet_url
            .as_ref()
            .unwrap_or(&self.state.config.wallet_url);
        Ok(Arc::new(RpcWallet::new(url)?))
    }

    pub fn price_feed(&self) -> Option<PriceFeed> {
        if self.state.config.price_feed {
            PriceFeed::coingecko()
        } else {
            None
        }
    }

    /// Native token symbol of `chain_id`, `ETH` when unknown
    pub fn token_symbol(&self, chain_id: ChainId) -> String {
        self.registry()
            .ok()
            .and_then(|registry| registry.get(chain_id).map(|n| n.token_symbol.clone()))
            .unwrap_or_else(|| "ETH".to_string())
    }

    /// ETH/USD quote for fiat hints, if the price feed is enabled and answers
    pub async fn eth_usd(&self) -> Option<f64> {
        match self.price_feed() {
            Some(feed) => feed.eth_usd().await,
            None => None,
        }
    }

    /// A client without a wallet, bound to the selected network
    pub async fn read_client(&self) -> Result<PasteClient, ContextError> {
        let registry = self.registry()?;
        let selected = self.selected_network(&registry)?.chain_id;
        let session = Session::new(registry, None);
        let client =
            PasteClient::from_session(&session, selected, self.state.config.poll_interval())
                .await?;
        Ok(client)
    }

    /// A client that signs through the wallet
    ///
    /// An explicit `--network` moves the wallet there first.
    pub async fn signer_client(&self) -> Result<PasteClient, ContextError> {
        let registry = self.registry()?;
        let selected = self.selected_network(&registry)?.chain_id;
        let session = Session::new(registry.clone(), Some(self.wallet()?));

        let info = session.connect().await?;
        if self.network.is_some() && info.chain_id != selected {
            session.switch_network(selected).await?;
        }
        if session.chain_mismatch() {
            let chain_id = session.chain_id().unwrap_or(info.chain_id);
            return Err(ContextError::ChainMismatch {
                chain_id,
                expected: registry.network_name(selected).to_string(),
            });
        }

        let client =
            PasteClient::from_session(&session, selected, self.state.config.poll_interval())
                .await?;
        Ok(client.with_observer(progress_observer()))
    }

    /// The wallet client if one connects, otherwise a read-only client
    pub async fn viewer_client(&self) -> Result<PasteClient, ContextError> {
        match self.signer_client().await {
            Ok(client) => Ok(client),
            Err(e @ (ContextError::Connect(_) | ContextError::ChainMismatch { .. })) => {
                tracing::warn!("continuing without a wallet: {}", e);
                self.read_client().await
            }
            Err(e) => Err(e),
        }
    }
}

/// Report transaction progress on stderr as it happens
pub fn progress_observer() -> TxObserver {
    Arc::new(|event: &TxEvent| match event {
        TxEvent::Submitted { action, hash } => {
            eprintln!("{} submitted: {} (waiting for confirmation)", action, hash)
        }
        TxEvent::Confirmed {
            action,
            hash,
            block,
        } => match block {
            Some(block) => eprintln!("{} confirmed: {} in block {}", action, hash, block),
            None => eprintln!("{} confirmed: {}", action, hash),
        },
    })
}

/// Parse a paste id given in decimal or `0x` hex
pub fn parse_paste_id(value: &str) -> Result<U256, String> {
    value
        .trim()
        .parse::<U256>()
        .map_err(|e| format!("invalid paste id '{}': {}", value, e))
}

pub fn parse_address(value: &str) -> Result<Address, String> {
    value
        .trim()
        .parse::<Address>()
        .map_err(|e| format!("invalid address '{}': {}", value, e))
}

#[async_trait::async_trait]
pub trait Op: Send + Sync {
    type Error: Error + Send + Sync + 'static;
    type Output;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error>;
}

#[macro_export]
macro_rules! command_enum {
    ($(($variant:ident, $type:ty)),* $(,)?) => {
        #[derive(Subcommand, Debug, Clone)]
        pub enum Command {
            $($variant($type),)*
        }

        #[derive(Debug)]
        pub enum OpOutput {
            $($variant(<$type as $crate::cli::op::Op>::Output),)*
        }

        #[derive(Debug, thiserror::Error)]
        pub enum OpError {
            $(
                #[error(transparent)]
                $variant(<$type as $crate::cli::op::Op>::Error),
            )*
        }

        #[async_trait::async_trait]
        impl $crate::cli::op::Op for Command {
            type Output = OpOutput;
            type Error = OpError;

            async fn execute(&self, ctx: &$crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
                match self {
                    $(
                        Command::$variant(op) => {
                            op.execute(ctx).await
                                .map(OpOutput::$variant)
                                .map_err(OpError::$variant)
                        },
                    )*
                }
            }
        }

        impl std::fmt::Display for OpOutput {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        OpOutput::$variant(output) => write!(f, "{}", output),
                    )*
                }
            }
        }
    };
}
