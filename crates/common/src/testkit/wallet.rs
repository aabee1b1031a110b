use std::collections::HashMap;
use std::sync::Arc;

use alloy_primitives::Address;
use parking_lot::Mutex;

use super::chain::TestChain;
use crate::crypto::{AccessSignature, LocalSigner};
use crate::network::ChainId;
use crate::rpc::Transport;
use crate::wallet::{Wallet, WalletError};

#[derive(Debug, Default)]
struct Controls {
    reject_accounts: bool,
    reject_switch: bool,
    reject_signatures: bool,
    /// Sign with this key instead of the requested account's
    impostor: Option<LocalSigner>,
}

/// A wallet holding local keys, attached to a set of test chains
///
/// Every prompt can be made to fail with [`WalletError::Rejected`] to mimic a
/// user declining it.
#[derive(Debug)]
pub struct TestWallet {
    accounts: Vec<LocalSigner>,
    chains: HashMap<ChainId, Arc<TestChain>>,
    current: Mutex<Arc<TestChain>>,
    controls: Mutex<Controls>,
}

impl TestWallet {
    /// Create a wallet with one fresh account, starting on `current`
    ///
    /// # Arguments
    /// * `chains` - Every chain the wallet can switch to
    /// * `current` - The chain the wallet starts on; must be one of `chains`
    pub fn new(
        chains: HashMap<ChainId, Arc<TestChain>>,
        current: ChainId,
    ) -> anyhow::Result<Self> {
        let chain = chains
            .get(&current)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("wallet has no chain {}", current))?;
        Ok(Self {
            accounts: vec![LocalSigner::generate()?],
            chains,
            current: Mutex::new(chain),
            controls: Mutex::new(Controls::default()),
        })
    }

    pub fn address(&self) -> Address {
        self.accounts[0].address()
    }

    pub fn signer(&self) -> &LocalSigner {
        &self.accounts[0]
    }

    pub fn current_chain(&self) -> Arc<TestChain> {
        self.current.lock().clone()
    }

    /// Move the wallet to another chain without going through the client
    pub fn set_chain(&self, chain_id: ChainId) -> anyhow::Result<()> {
        let chain = self
            .chains
            .get(&chain_id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("wallet has no chain {}", chain_id))?;
        *self.current.lock() = chain;
        Ok(())
    }

    pub fn reject_accounts(&self, reject: bool) {
        self.controls.lock().reject_accounts = reject;
    }

    pub fn reject_switch(&self, reject: bool) {
        self.controls.lock().reject_switch = reject;
    }

    pub fn reject_signatures(&self, reject: bool) {
        self.controls.lock().reject_signatures = reject;
    }

    /// Produce signatures from an unrelated key from now on
    pub fn sign_as_impostor(&self) -> anyhow::Result<()> {
        self.controls.lock().impostor = Some(LocalSigner::generate()?);
        Ok(())
    }
}

#[async_trait::async_trait]
impl Wallet for TestWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        if self.controls.lock().reject_accounts {
            return Err(WalletError::Rejected);
        }
        Ok(self.accounts.iter().map(LocalSigner::address).collect())
    }

    async fn chain_id(&self) -> Result<ChainId, WalletError> {
        Ok(self.current.lock().chain_id())
    }

    async fn switch_chain(&self, chain_id: ChainId) -> Result<(), WalletError> {
        if self.controls.lock().reject_switch {
            return Err(WalletError::Rejected);
        }
        let chain = self
            .chains
            .get(&chain_id)
            .cloned()
            .ok_or(WalletError::UnknownChain(chain_id))?;
        *self.current.lock() = chain;
        Ok(())
    }

    async fn sign_message(
        &self,
        address: Address,
        message: &[u8],
    ) -> Result<AccessSignature, WalletError> {
        let controls = self.controls.lock();
        if controls.reject_signatures {
            return Err(WalletError::Rejected);
        }
        if let Some(impostor) = &controls.impostor {
            return Ok(impostor.sign_message(message)?);
        }
        let account = self
            .accounts
            .iter()
            .find(|a| a.address() == address)
            .ok_or_else(|| WalletError::Unavailable(format!("unknown account {}", address)))?;
        Ok(account.sign_message(message)?)
    }

    fn transport(&self) -> Arc<dyn Transport> {
        self.current.lock().clone()
    }
}
