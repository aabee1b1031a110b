use std::sync::atomic::{AtomicU64, Ordering};

use reqwest::{header::HeaderMap, header::HeaderValue, Client};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use super::{RpcError, Transport};

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct JsonRpcErrorObject {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcErrorObject>,
}

/// JSON-RPC 2.0 over HTTP
///
/// Serves both as the read-only provider for a network's public RPC URL and
/// as the channel to a local wallet endpoint.
#[derive(Debug)]
pub struct RpcClient {
    pub remote: Url,
    client: Client,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(remote: &Url) -> Result<Self, RpcError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder().default_headers(default_headers).build()?;

        Ok(Self {
            remote: remote.clone(),
            client,
            next_id: AtomicU64::new(1),
        })
    }

    /// Get the endpoint this client talks to
    pub fn base_url(&self) -> &Url {
        &self.remote
    }
}

#[async_trait::async_trait]
impl Transport for RpcClient {
    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = JsonRpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };

        tracing::debug!(remote = %self.remote, method, id, "json-rpc request");
        let response = self
            .client
            .post(self.remote.clone())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RpcError::HttpStatus(
                response.status(),
                response.text().await?,
            ));
        }

        let response: JsonRpcResponse = response.json().await?;
        match (response.error, response.result) {
            (Some(error), _) => {
                tracing::debug!(method, code = error.code, message = %error.message, "json-rpc error");
                Err(RpcError::Rpc {
                    code: error.code,
                    message: error.message,
                    data: error.data,
                })
            }
            (None, Some(result)) => Ok(result),
            // A null result deserializes as absent; receipts rely on this
            (None, None) => Ok(Value::Null),
        }
    }
}
