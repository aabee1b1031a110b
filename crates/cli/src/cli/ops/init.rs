use std::path::PathBuf;

use clap::Args;
use url::Url;

use crate::state::{AppConfig, AppState};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// Wallet JSON-RPC endpoint (default: http://127.0.0.1:1248)
    #[arg(long)]
    pub wallet_url: Option<Url>,

    /// Network to use when the wallet does not decide (name or chain id)
    #[arg(long = "default-network")]
    pub default_network: Option<String>,

    /// Receipt polling interval in milliseconds
    #[arg(long, default_value_t = 2_000)]
    pub poll_interval_ms: u64,

    /// Do not fetch ETH/USD quotes
    #[arg(long)]
    pub no_price_feed: bool,

    /// Directory for daily-rolling log files
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    StateFailed(#[from] crate::state::StateError),
    #[error("unknown network '{0}', see 'oxbin networks'")]
    UnknownNetwork(String),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let defaults = AppConfig::default();
        if let Some(name) = &self.default_network {
            if defaults.networks.find(name).is_none() {
                return Err(InitError::UnknownNetwork(name.clone()));
            }
        }

        let config = AppConfig {
            wallet_url: self.wallet_url.clone().unwrap_or(defaults.wallet_url.clone()),
            network: self.default_network.clone(),
            poll_interval_ms: self.poll_interval_ms,
            price_feed: !self.no_price_feed,
            log_dir: self.log_dir.clone(),
            ..defaults
        };

        let state = AppState::init(ctx.config_path.clone(), Some(config))?;

        let supported = state.config.networks.supported().count();
        let output = format!(
            "Initialized oxbin directory at: {}\n\
             - Config: {}\n\
             - Wallet endpoint: {}\n\
             - Default network: {}\n\
             - Networks with a contract configured: {}\n\
             Set contract addresses in the config or via OXBIN_<NETWORK>_CONTRACT_ADDRESS.",
            state.oxbin_dir.display(),
            state.config_path.display(),
            state.config.wallet_url,
            state
                .config
                .network
                .clone()
                .unwrap_or_else(|| state.config.networks.default_network().name.clone()),
            supported,
        );

        Ok(output)
    }
}
