use std::{fs, path::PathBuf, time::Duration};

use common::network::{NetworkRegistry, RegistryError};
use serde::{Deserialize, Serialize};
use url::Url;

pub const APP_NAME: &str = "oxbin";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Frame and similar desktop wallets expose EIP-1193 over this endpoint
pub const DEFAULT_WALLET_URL: &str = "http://127.0.0.1:1248";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// JSON-RPC endpoint of the wallet that signs and sends transactions
    #[serde(default = "default_wallet_url")]
    pub wallet_url: Url,
    /// Network name or chain id used when the wallet does not decide
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    /// How often to poll for transaction receipts
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Show approximate USD values next to ETH amounts
    #[serde(default = "default_price_feed")]
    pub price_feed: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Write daily-rolling log files here in addition to stderr
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
    #[serde(default)]
    pub networks: NetworkRegistry,
}

fn default_wallet_url() -> Url {
    Url::parse(DEFAULT_WALLET_URL).expect("hardcoded URL must parse")
}

fn default_poll_interval_ms() -> u64 {
    2_000
}

fn default_price_feed() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            wallet_url: default_wallet_url(),
            network: None,
            poll_interval_ms: default_poll_interval_ms(),
            price_feed: default_price_feed(),
            log_level: default_log_level(),
            log_dir: None,
            networks: NetworkRegistry::default(),
        }
    }
}

impl AppConfig {
    /// Configured log level, falling back to `warn` on unparseable values
    pub fn level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::WARN)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the oxbin directory (~/.oxbin)
    pub oxbin_dir: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    /// Get the oxbin directory path (custom or default ~/.oxbin)
    pub fn oxbin_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Initialize a new oxbin directory with a config file
    pub fn init(
        custom_path: Option<PathBuf>,
        config: Option<AppConfig>,
    ) -> Result<Self, StateError> {
        let oxbin_dir = Self::oxbin_dir(custom_path)?;
        let config_path = oxbin_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            return Err(StateError::AlreadyInitialized);
        }

        fs::create_dir_all(&oxbin_dir)?;

        let state = Self {
            oxbin_dir,
            config_path,
            config: config.unwrap_or_default(),
        };
        state.save()?;
        Ok(state)
    }

    /// Load existing state from the oxbin directory
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let oxbin_dir = Self::oxbin_dir(custom_path)?;
        let config_path = oxbin_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Err(StateError::NotInitialized);
        }

        let config_toml = fs::read_to_string(&config_path)?;
        let config: AppConfig = toml::from_str(&config_toml)?;

        Ok(Self {
            oxbin_dir,
            config_path,
            config,
        })
    }

    /// Load existing state, or use defaults if `oxbin init` was never run
    pub fn load_or_default(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        match Self::load(custom_path.clone()) {
            Err(StateError::NotInitialized) => {
                let oxbin_dir = Self::oxbin_dir(custom_path)?;
                Ok(Self {
                    config_path: oxbin_dir.join(CONFIG_FILE_NAME),
                    oxbin_dir,
                    config: AppConfig::default(),
                })
            }
            other => other,
        }
    }

    pub fn save(&self) -> Result<(), StateError> {
        let config_toml = toml::to_string_pretty(&self.config)?;
        fs::write(&self.config_path, config_toml)?;
        Ok(())
    }

    /// The configured network table with `OXBIN_*` environment overrides applied
    pub fn registry(&self) -> Result<NetworkRegistry, StateError> {
        let mut registry = self.config.networks.clone();
        registry.apply_env_overrides()?;
        Ok(registry)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("oxbin directory not initialized. Run 'oxbin init' first")]
    NotInitialized,

    #[error("oxbin directory already initialized")]
    AlreadyInitialized,

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("invalid network configuration: {0}")]
    Registry(#[from] RegistryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

#[cfg(test)]
mod test {
    use super::*;
    use common::network::{ChainId, ContractAbi};
    use tempfile::TempDir;

    #[test]
    fn test_init_then_load() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("oxbin");

        let config = AppConfig {
            network: Some("arbitrum-sepolia".to_string()),
            poll_interval_ms: 500,
            ..Default::default()
        };
        let state = AppState::init(Some(dir.clone()), Some(config.clone())).unwrap();
        assert!(state.config_path.exists());

        let loaded = AppState::load(Some(dir.clone())).unwrap();
        assert_eq!(loaded.config, config);
        assert_eq!(loaded.config.poll_interval(), Duration::from_millis(500));

        assert!(matches!(
            AppState::init(Some(dir), None),
            Err(StateError::AlreadyInitialized)
        ));
    }

    #[test]
    fn test_load_uninitialized() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("missing");

        assert!(matches!(
            AppState::load(Some(dir.clone())),
            Err(StateError::NotInitialized)
        ));

        let state = AppState::load_or_default(Some(dir.clone())).unwrap();
        assert_eq!(state.config, AppConfig::default());
        assert!(!dir.exists());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().to_path_buf();
        fs::write(
            dir.join(CONFIG_FILE_NAME),
            r#"
log_level = "debug"

[[networks]]
name = "local"
chain_id = "0x7a69"
label = "Local Devnet"
rpc_url = "http://127.0.0.1:8545/"
contract_address = "0x5FbDB2315678afecb367f032d93F642f64180aa3"
contract_abi = "consolidated"
key_scheme = "raw-seed"
"#,
        )
        .unwrap();

        let state = AppState::load(Some(dir)).unwrap();
        assert_eq!(state.config.level(), tracing::Level::DEBUG);
        assert!(state.config.price_feed);
        assert_eq!(state.config.wallet_url.as_str(), "http://127.0.0.1:1248/");

        let network = state.config.networks.default_network();
        assert_eq!(network.chain_id, ChainId::new(31337));
        assert_eq!(network.contract_abi, ContractAbi::Consolidated);
        assert_eq!(network.token_symbol, "ETH");
        assert!(network.is_supported());
    }

    #[test]
    fn test_unknown_log_level_falls_back() {
        let config = AppConfig {
            log_level: "chatty".to_string(),
            ..Default::default()
        };
        assert_eq!(config.level(), tracing::Level::WARN);
    }
}
