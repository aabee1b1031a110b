use std::sync::Arc;

use alloy_primitives::{hex, Address};
use serde_json::json;
use url::Url;

use super::{Wallet, WalletError};
use crate::crypto::AccessSignature;
use crate::network::ChainId;
use crate::rpc::{decode_result, RpcClient, Transport};

/// A wallet reached over JSON-RPC, such as a local signer daemon
///
/// Account access, chain switching, signing and transaction submission are
/// all forwarded to the endpoint, which is expected to prompt the user.
#[derive(Debug, Clone)]
pub struct RpcWallet {
    client: Arc<RpcClient>,
}

impl RpcWallet {
    pub fn new(endpoint: &Url) -> Result<Self, WalletError> {
        let client = RpcClient::new(endpoint)?;
        Ok(Self {
            client: Arc::new(client),
        })
    }

    pub fn endpoint(&self) -> &Url {
        self.client.base_url()
    }
}

#[async_trait::async_trait]
impl Wallet for RpcWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        let value = self
            .client
            .request("eth_requestAccounts", json!([]))
            .await?;
        Ok(decode_result(value)?)
    }

    async fn chain_id(&self) -> Result<ChainId, WalletError> {
        Ok(self.client.chain_id().await?)
    }

    async fn switch_chain(&self, chain_id: ChainId) -> Result<(), WalletError> {
        let params = json!([{ "chainId": chain_id.to_string() }]);
        match self
            .client
            .request("wallet_switchEthereumChain", params)
            .await
        {
            Ok(_) => Ok(()),
            Err(e) if e.is_unrecognized_chain() => Err(WalletError::UnknownChain(chain_id)),
            Err(e) => Err(e.into()),
        }
    }

    async fn sign_message(
        &self,
        address: Address,
        message: &[u8],
    ) -> Result<AccessSignature, WalletError> {
        let params = json!([hex::encode_prefixed(message), address]);
        let value = self.client.request("personal_sign", params).await?;
        let signature: String = decode_result(value)?;
        Ok(AccessSignature::from_hex(&signature)?)
    }

    fn transport(&self) -> Arc<dyn Transport> {
        self.client.clone()
    }
}
