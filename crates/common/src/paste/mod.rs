//! Paste workflows
//!
//! [`PasteClient`] composes the crypto core, the session's provider and the
//! contract facade into the user-level actions: create, view, edit, delete,
//! explore, list and tip. Each action re-reads on-chain state; nothing is
//! cached between calls.

mod amount;
mod create;
mod edit;
mod explore;
mod expiry;
mod view;

use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{Address, B256, U256};

use crate::contract::{ContractError, PasteContract, PasteType, PendingTransaction};
use crate::crypto::{
    generate_message_to_sign, verify_signature, AccessSignature, CryptoError, KeyScheme,
};
use crate::network::ChainId;
use crate::rpc::TransactionReceipt;
use crate::session::{Session, SessionError};
use crate::wallet::{Wallet, WalletError};

pub use amount::{format_ether, parse_ether, usd_value};
pub use create::{AddressList, CreatedPaste, NewPaste};
pub use explore::{filter_listing, ExplorePage, ExploreQuery, DEFAULT_PAGE_SIZE};
pub use expiry::{expiry_status, format_timestamp};
pub use view::{ViewOptions, ViewedPaste};

#[derive(Debug, thiserror::Error)]
pub enum PasteError {
    #[error(transparent)]
    Crypto(#[from] CryptoError),
    #[error(transparent)]
    Contract(#[from] ContractError),
    #[error(transparent)]
    Wallet(#[from] WalletError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("wallet not connected, please connect your wallet")]
    NotConnected,
    #[error("only the creator of paste {0} can do that")]
    NotCreator(U256),
    #[error("paste title cannot be empty")]
    EmptyTitle,
    #[error("expiration time {0} is in the past")]
    InvalidExpiration(u64),
    #[error("invalid amount '{0}'")]
    InvalidAmount(String),
    #[error("invalid Ethereum address '{0}'")]
    InvalidAddress(String),
    #[error("address {0} already added")]
    DuplicateAddress(Address),
    #[error("transaction receipt did not announce a paste id")]
    MissingPasteId,
    #[error("wallet signature does not match the connected account")]
    SignatureMismatch,
    #[error("paste {0} has no stored encryption key")]
    MissingSeed(U256),
    #[error("paste {0} has no sealed content yet")]
    NoContent(U256),
    /// The network's key scheme ties content keys to the creator's signature
    #[error("{paste_type} pastes readable by other accounts need a shared-key scheme, this network uses {scheme}")]
    SharedKeyRequired {
        paste_type: PasteType,
        scheme: KeyScheme,
    },
    #[error("paste {0} is sealed for its creator only and cannot be opened by this account")]
    CreatorOnly(U256),
    #[error("paste {id} was created but could not be sealed: {source}")]
    Incomplete {
        id: U256,
        #[source]
        source: Box<PasteError>,
    },
}

/// Observable progress of a mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxEvent {
    /// The wallet accepted the transaction
    Submitted { action: &'static str, hash: B256 },
    /// The transaction was mined successfully
    Confirmed {
        action: &'static str,
        hash: B256,
        block: Option<u64>,
    },
}

pub type TxObserver = Arc<dyn Fn(&TxEvent) + Send + Sync>;

/// Paste actions bound to one network
#[derive(Clone)]
pub struct PasteClient {
    contract: PasteContract,
    wallet: Option<Arc<dyn Wallet>>,
    observer: Option<TxObserver>,
}

impl std::fmt::Debug for PasteClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasteClient")
            .field("contract", &self.contract)
            .field("wallet", &self.wallet)
            .finish()
    }
}

impl PasteClient {
    pub fn new(contract: PasteContract, wallet: Option<Arc<dyn Wallet>>) -> Self {
        Self {
            contract,
            wallet,
            observer: None,
        }
    }

    /// Resolve a provider from `session` and bind to its contract
    ///
    /// Uses the wallet when it is connected on a supported chain, otherwise
    /// a read-only provider for `selected`.
    pub async fn from_session(
        session: &Session,
        selected: ChainId,
        poll_interval: Duration,
    ) -> Result<Self, PasteError> {
        let provider = session.provider(selected).await?;
        let contract = PasteContract::from_provider(session.registry(), &provider)?
            .with_poll_interval(poll_interval);
        let wallet = if provider.is_read_only() {
            None
        } else {
            session.wallet().cloned()
        };
        Ok(Self::new(contract, wallet))
    }

    pub fn with_observer(mut self, observer: TxObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn contract(&self) -> &PasteContract {
        &self.contract
    }

    pub fn signer(&self) -> Result<Address, PasteError> {
        match (self.contract.signer(), self.wallet.is_some()) {
            (Some(signer), true) => Ok(signer),
            _ => Err(PasteError::NotConnected),
        }
    }

    fn wallet(&self) -> Result<&Arc<dyn Wallet>, PasteError> {
        self.wallet.as_ref().ok_or(PasteError::NotConnected)
    }

    fn emit(&self, event: TxEvent) {
        if let Some(observer) = &self.observer {
            (observer.as_ref())(&event);
        }
    }

    /// Have the wallet sign the access message for `id` and check it locally
    pub async fn sign_access(&self, id: U256) -> Result<AccessSignature, PasteError> {
        let signer = self.signer()?;
        let message = generate_message_to_sign(id, signer);
        tracing::debug!(paste = %id, %signer, "requesting access signature");

        let signature = self
            .wallet()?
            .sign_message(signer, message.as_slice())
            .await?;
        if !verify_signature(&message, signature.bytes(), signer) {
            return Err(PasteError::SignatureMismatch);
        }
        Ok(signature)
    }

    /// Report submission, wait for the receipt, report confirmation
    async fn settle(&self, pending: PendingTransaction) -> Result<TransactionReceipt, PasteError> {
        let action = pending.label();
        let hash = pending.hash();
        self.emit(TxEvent::Submitted { action, hash });

        let receipt = pending.confirmed().await?;
        self.emit(TxEvent::Confirmed {
            action,
            hash,
            block: receipt.block(),
        });
        Ok(receipt)
    }

    pub async fn delete(&self, id: U256) -> Result<B256, PasteError> {
        self.signer()?;
        let pending = self.contract.delete_paste(id).await?;
        let receipt = self.settle(pending).await?;
        Ok(receipt.transaction_hash)
    }

    /// Send `amount` wei to the creator of paste `id`
    pub async fn tip(&self, id: U256, amount: U256) -> Result<B256, PasteError> {
        self.signer()?;
        if amount.is_zero() {
            return Err(PasteError::InvalidAmount("0".to_string()));
        }
        let record = self.contract.get_paste_record(id).await?;
        let pending = self.contract.tip(record.creator, amount).await?;
        let receipt = self.settle(pending).await?;
        Ok(receipt.transaction_hash)
    }
}
