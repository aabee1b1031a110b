//! Wallet abstraction
//!
//! A [`Wallet`] is anything that can reveal accounts, report and switch its
//! chain, sign personal messages, and submit transactions through its own
//! [`Transport`]. Every prompt it raises may be declined; declines surface as
//! [`WalletError::Rejected`] and are never retried automatically.

mod rpc_wallet;

use std::sync::Arc;

use alloy_primitives::Address;

use crate::crypto::{AccessSignature, CryptoError};
use crate::network::ChainId;
use crate::rpc::{RpcError, Transport};

pub use rpc_wallet::RpcWallet;

#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("request rejected by the user")]
    Rejected,
    #[error("wallet does not recognize chain {0}")]
    UnknownChain(ChainId),
    #[error("wallet unavailable: {0}")]
    Unavailable(String),
    #[error("wallet exposed no accounts")]
    NoAccounts,
    #[error("wallet returned an unusable signature: {0}")]
    Crypto(#[from] CryptoError),
    #[error("wallet rpc error: {0}")]
    Rpc(RpcError),
}

impl From<RpcError> for WalletError {
    fn from(e: RpcError) -> Self {
        if e.is_user_rejected() {
            WalletError::Rejected
        } else if e.is_unreachable() {
            WalletError::Unavailable(e.to_string())
        } else {
            WalletError::Rpc(e)
        }
    }
}

/// An EIP-1193 style wallet
#[async_trait::async_trait]
pub trait Wallet: Send + Sync + std::fmt::Debug {
    /// Prompt for account access; the first account is the active one
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError>;

    async fn chain_id(&self) -> Result<ChainId, WalletError>;

    async fn switch_chain(&self, chain_id: ChainId) -> Result<(), WalletError>;

    /// Sign `message` under the Ethereum personal-message prefix
    async fn sign_message(
        &self,
        address: Address,
        message: &[u8],
    ) -> Result<AccessSignature, WalletError>;

    /// Transport that submits transactions on behalf of the wallet's accounts
    fn transport(&self) -> Arc<dyn Transport>;
}
