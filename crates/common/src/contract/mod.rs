//! Contract access facade
//!
//! [`resolve_binding`] pairs a provider with the registry entry for its chain,
//! and [`PasteContract`] exposes one call surface over whichever contract
//! generation that entry names. Mutations return a [`PendingTransaction`]:
//! its hash is known as soon as the wallet accepts the transaction, and
//! [`PendingTransaction::confirmed`] waits for the mined receipt separately.

pub mod abi;
mod binding;
mod facade;
mod pending;
mod types;

use alloy_sol_types::{Revert, SolError};

use crate::network::{ContractAbi, UnsupportedNetwork};
use crate::rpc::RpcError;

pub use binding::{resolve_binding, NetworkBinding};
pub use facade::PasteContract;
pub use pending::{created_paste_id, PendingTransaction, DEFAULT_POLL_INTERVAL};
pub use types::{CreatePaste, Paste, PasteInfo, PasteSummary, PasteType, PasteVersion};

#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error("paste not found: {0}")]
    NotFound(String),
    #[error("access not granted: {0}")]
    AccessDenied(String),
    #[error("insufficient payment: {0}")]
    InsufficientPayment(String),
    #[error("transaction rejected by the user")]
    UserRejected,
    #[error("contract reverted: {0}")]
    Reverted(String),
    #[error(transparent)]
    UnsupportedNetwork(#[from] UnsupportedNetwork),
    #[error("{call} is not available on {abi} contracts")]
    UnsupportedCall { call: &'static str, abi: ContractAbi },
    #[error("a connected wallet is required to send transactions")]
    ReadOnly,
    #[error("rpc error: {0}")]
    Rpc(RpcError),
    #[error("failed to decode contract data: {0}")]
    Decode(String),
}

impl ContractError {
    /// Classify a human-readable revert reason
    pub fn from_revert_reason(reason: String) -> Self {
        let lower = reason.to_lowercase();
        if lower.contains("does not exist") || lower.contains("not found") {
            ContractError::NotFound(reason)
        } else if lower.contains("insufficient") {
            ContractError::InsufficientPayment(reason)
        } else if lower.contains("access")
            || lower.contains("not authorized")
            || lower.contains("not allowed")
            || lower.contains("invalid signature")
        {
            ContractError::AccessDenied(reason)
        } else {
            ContractError::Reverted(reason)
        }
    }
}

impl From<RpcError> for ContractError {
    fn from(e: RpcError) -> Self {
        if e.is_user_rejected() {
            return ContractError::UserRejected;
        }
        if e.is_revert() {
            let decoded = e
                .revert_data()
                .and_then(|data| Revert::abi_decode(&data, true).ok())
                .map(|revert| revert.reason);
            let reason = match (decoded, &e) {
                (Some(reason), _) => reason,
                (None, RpcError::Rpc { message, .. }) => message
                    .strip_prefix("execution reverted: ")
                    .unwrap_or(message)
                    .to_string(),
                (None, other) => other.to_string(),
            };
            tracing::debug!(%reason, "contract call reverted");
            return ContractError::from_revert_reason(reason);
        }
        ContractError::Rpc(e)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn revert(reason: &str) -> RpcError {
        let data = Revert {
            reason: reason.to_string(),
        }
        .abi_encode();
        RpcError::Rpc {
            code: 3,
            message: format!("execution reverted: {}", reason),
            data: Some(json!(alloy_primitives::hex::encode_prefixed(data))),
        }
    }

    #[test]
    fn test_revert_reasons_are_classified() {
        assert!(matches!(
            ContractError::from(revert("Paste does not exist")),
            ContractError::NotFound(_)
        ));
        assert!(matches!(
            ContractError::from(revert("Insufficient payment")),
            ContractError::InsufficientPayment(_)
        ));
        assert!(matches!(
            ContractError::from(revert("Access denied")),
            ContractError::AccessDenied(_)
        ));
        assert!(matches!(
            ContractError::from(revert("Only creator can update")),
            ContractError::Reverted(reason) if reason == "Only creator can update"
        ));
    }

    #[test]
    fn test_revert_without_data_uses_message() {
        let e = RpcError::Rpc {
            code: -32000,
            message: "execution reverted: Access denied".to_string(),
            data: None,
        };
        assert!(matches!(
            ContractError::from(e),
            ContractError::AccessDenied(reason) if reason == "Access denied"
        ));
    }

    #[test]
    fn test_user_rejection() {
        let e = RpcError::Rpc {
            code: 4001,
            message: "User denied transaction signature".to_string(),
            data: None,
        };
        assert!(matches!(ContractError::from(e), ContractError::UserRejected));
    }
}
