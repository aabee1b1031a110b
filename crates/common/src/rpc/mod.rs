//! JSON-RPC transport
//!
//! Every chain interaction, read-only or wallet-backed, goes through a
//! [`Transport`]: one raw `request` method plus typed helpers for the handful
//! of `eth_*` calls the client makes.

mod client;
mod types;

use std::fmt;

use alloy_primitives::{Bytes, B256};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::network::ChainId;

pub use client::RpcClient;
pub use types::{Log, TransactionReceipt, TransactionRequest};

/// The user declined the request in their wallet (EIP-1193)
pub const USER_REJECTED: i64 = 4001;
/// The wallet does not know the requested chain (EIP-3326)
pub const UNRECOGNIZED_CHAIN: i64 = 4902;
/// Geth-style `execution reverted` with revert data attached
pub const EXECUTION_REVERTED: i64 = 3;

#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("HTTP request failed: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error("HTTP status {0}: {1}")]
    HttpStatus(StatusCode, String),
    #[error("JSON-RPC error {code}: {message}")]
    Rpc {
        code: i64,
        message: String,
        data: Option<Value>,
    },
    #[error("invalid JSON-RPC response: {0}")]
    InvalidResponse(String),
    #[error("no RPC endpoint configured for network {0}")]
    NoEndpoint(ChainId),
}

impl RpcError {
    pub fn code(&self) -> Option<i64> {
        match self {
            RpcError::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn is_user_rejected(&self) -> bool {
        self.code() == Some(USER_REJECTED)
    }

    pub fn is_unrecognized_chain(&self) -> bool {
        self.code() == Some(UNRECOGNIZED_CHAIN)
    }

    /// Whether the endpoint could not be reached at all
    pub fn is_unreachable(&self) -> bool {
        matches!(self, RpcError::Reqwest(e) if e.is_connect() || e.is_timeout())
    }

    pub fn is_revert(&self) -> bool {
        match self {
            RpcError::Rpc { code, message, .. } => {
                *code == EXECUTION_REVERTED || message.contains("execution reverted")
            }
            _ => false,
        }
    }

    /// Raw revert data attached to an `execution reverted` error, if any
    pub fn revert_data(&self) -> Option<Bytes> {
        if !self.is_revert() {
            return None;
        }
        match self {
            RpcError::Rpc {
                data: Some(Value::String(hex)),
                ..
            } => hex.parse::<Bytes>().ok(),
            RpcError::Rpc {
                data: Some(Value::Object(obj)),
                ..
            } => obj
                .get("data")
                .and_then(Value::as_str)
                .and_then(|hex| hex.parse::<Bytes>().ok()),
            _ => None,
        }
    }
}

/// A JSON-RPC endpoint speaking the Ethereum API
#[async_trait::async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Issue a raw JSON-RPC request and return its `result`
    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError>;

    async fn chain_id(&self) -> Result<ChainId, RpcError> {
        let value = self.request("eth_chainId", json!([])).await?;
        let hex: String = decode_result(value)?;
        hex.parse::<ChainId>()
            .map_err(|e| RpcError::InvalidResponse(e.to_string()))
    }

    /// `eth_call` against the latest block
    async fn call(&self, tx: &TransactionRequest) -> Result<Bytes, RpcError> {
        let value = self.request("eth_call", json!([tx, "latest"])).await?;
        decode_result(value)
    }

    /// Submit a transaction for the `from` account and return its hash
    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<B256, RpcError> {
        let value = self.request("eth_sendTransaction", json!([tx])).await?;
        decode_result(value)
    }

    /// `None` until the transaction is mined
    async fn transaction_receipt(&self, hash: B256) -> Result<Option<TransactionReceipt>, RpcError> {
        let value = self
            .request("eth_getTransactionReceipt", json!([hash]))
            .await?;
        decode_result(value)
    }
}

pub(crate) fn decode_result<T: DeserializeOwned>(value: Value) -> Result<T, RpcError> {
    serde_json::from_value(value).map_err(|e| RpcError::InvalidResponse(e.to_string()))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_error_classification() {
        let rejected = RpcError::Rpc {
            code: 4001,
            message: "User rejected the request.".to_string(),
            data: None,
        };
        assert!(rejected.is_user_rejected());
        assert!(!rejected.is_revert());

        let unknown = RpcError::Rpc {
            code: 4902,
            message: "Unrecognized chain ID".to_string(),
            data: None,
        };
        assert!(unknown.is_unrecognized_chain());
    }

    #[test]
    fn test_revert_data_forms() {
        let flat = RpcError::Rpc {
            code: 3,
            message: "execution reverted: nope".to_string(),
            data: Some(json!("0x08c379a0")),
        };
        assert_eq!(flat.revert_data().unwrap().as_ref(), &[0x08, 0xc3, 0x79, 0xa0]);

        let nested = RpcError::Rpc {
            code: -32603,
            message: "execution reverted".to_string(),
            data: Some(json!({ "data": "0x01" })),
        };
        assert_eq!(nested.revert_data().unwrap().as_ref(), &[0x01]);

        let other = RpcError::Rpc {
            code: -32000,
            message: "nonce too low".to_string(),
            data: Some(json!("0x01")),
        };
        assert!(other.revert_data().is_none());
    }
}
