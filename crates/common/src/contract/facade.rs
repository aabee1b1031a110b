use std::time::Duration;

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;

use super::abi::{consolidated::IPasteBin, legacy::ILegacyPasteBin};
use super::{
    resolve_binding, ContractError, CreatePaste, NetworkBinding, Paste, PasteInfo, PasteType,
    PasteVersion, PendingTransaction, DEFAULT_POLL_INTERVAL,
};
use crate::crypto::{AccessSignature, KeyScheme};
use crate::network::{ChainId, ContractAbi, NetworkRegistry};
use crate::rpc::TransactionRequest;
use crate::session::ProviderHandle;

/// Uniform call surface over either contract generation
///
/// Reads are `eth_call`s sent from the signer when there is one, since the
/// contract gates some reads on `msg.sender`. Writes require a signer.
#[derive(Debug, Clone)]
pub struct PasteContract {
    binding: NetworkBinding,
    signer: Option<Address>,
    poll_interval: Duration,
}

impl PasteContract {
    pub fn new(binding: NetworkBinding, signer: Option<Address>) -> Self {
        Self {
            binding,
            signer,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Resolve the binding for `provider` and wrap it
    pub fn from_provider(
        registry: &NetworkRegistry,
        provider: &ProviderHandle,
    ) -> Result<Self, ContractError> {
        let binding = resolve_binding(registry, provider)?;
        Ok(Self::new(binding, provider.signer))
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn binding(&self) -> &NetworkBinding {
        &self.binding
    }

    pub fn address(&self) -> Address {
        self.binding.contract_address
    }

    pub fn chain_id(&self) -> ChainId {
        self.binding.chain_id
    }

    pub fn abi(&self) -> ContractAbi {
        self.binding.contract_abi
    }

    pub fn key_scheme(&self) -> KeyScheme {
        self.binding.key_scheme
    }

    pub fn signer(&self) -> Option<Address> {
        self.signer
    }

    async fn read<C>(&self, call: C) -> Result<C::Return, ContractError>
    where
        C: SolCall + Send,
    {
        let tx = TransactionRequest::to(self.binding.contract_address)
            .from(self.signer)
            .data(call.abi_encode());
        let output = self.binding.transport.call(&tx).await?;
        C::abi_decode_returns(&output, true).map_err(|e| {
            ContractError::Decode(format!("{} returned malformed data: {}", C::SIGNATURE, e))
        })
    }

    async fn write<C>(
        &self,
        label: &'static str,
        call: C,
        value: U256,
    ) -> Result<PendingTransaction, ContractError>
    where
        C: SolCall + Send,
    {
        let tx = TransactionRequest::to(self.binding.contract_address).data(call.abi_encode());
        self.send(label, tx, value).await
    }

    async fn send(
        &self,
        label: &'static str,
        tx: TransactionRequest,
        value: U256,
    ) -> Result<PendingTransaction, ContractError> {
        let signer = self.signer.ok_or(ContractError::ReadOnly)?;
        let tx = tx.from(Some(signer)).value(value);
        let hash = self.binding.transport.send_transaction(&tx).await?;

        tracing::info!(tx = %hash, chain_id = %self.binding.chain_id, "{} submitted", label);
        Ok(PendingTransaction::new(
            hash,
            label,
            self.binding.transport.clone(),
            self.poll_interval,
        ))
    }

    /// Submit a new paste; `request.tip` is sent as the call's value
    pub async fn create_paste(
        &self,
        request: &CreatePaste,
    ) -> Result<PendingTransaction, ContractError> {
        let expiration_time = U256::from(request.expiration_time);
        let title = request.title.clone();
        let public_key = request.public_key.clone();

        match (self.binding.contract_abi, request.paste_type) {
            (ContractAbi::Legacy, PasteType::Public) => {
                let call = ILegacyPasteBin::createPublicPasteCall {
                    title,
                    content: request.content.clone(),
                    expirationTime: expiration_time,
                    publicKey: public_key,
                };
                self.write("createPublicPaste", call, request.tip).await
            }
            (ContractAbi::Legacy, PasteType::Paid) => {
                let call = ILegacyPasteBin::createPaidPasteCall {
                    title,
                    content: Bytes::from(request.content.clone().into_bytes()),
                    expirationTime: expiration_time,
                    price: request.price,
                    publicKey: public_key,
                };
                self.write("createPaidPaste", call, request.tip).await
            }
            (ContractAbi::Legacy, PasteType::Private) => {
                let call = ILegacyPasteBin::createPrivatePasteCall {
                    title,
                    content: Bytes::from(request.content.clone().into_bytes()),
                    expirationTime: expiration_time,
                    allowedAddresses: request.allowed_addresses.clone(),
                    publicKey: public_key,
                };
                self.write("createPrivatePaste", call, request.tip).await
            }
            (ContractAbi::Consolidated, paste_type) => {
                let call = IPasteBin::createPasteCall {
                    title,
                    content: Bytes::from(request.content.clone().into_bytes()),
                    expirationTime: expiration_time,
                    pasteType: paste_type.into(),
                    price: request.price,
                    publicKey: public_key,
                    allowedAddresses: request.allowed_addresses.clone(),
                };
                self.write("createPaste", call, request.tip).await
            }
        }
    }

    /// Replace a paste's content; title, type and expiry never change
    pub async fn update_paste(
        &self,
        id: U256,
        content: Bytes,
    ) -> Result<PendingTransaction, ContractError> {
        match self.binding.contract_abi {
            ContractAbi::Legacy => {
                let call = ILegacyPasteBin::updatePasteCall {
                    pasteId: id,
                    content,
                };
                self.write("updatePaste", call, U256::ZERO).await
            }
            ContractAbi::Consolidated => {
                let call = IPasteBin::updatePasteCall {
                    pasteId: id,
                    content,
                };
                self.write("updatePaste", call, U256::ZERO).await
            }
        }
    }

    pub async fn delete_paste(&self, id: U256) -> Result<PendingTransaction, ContractError> {
        match self.binding.contract_abi {
            ContractAbi::Legacy => {
                let call = ILegacyPasteBin::deletePasteCall { pasteId: id };
                self.write("deletePaste", call, U256::ZERO).await
            }
            ContractAbi::Consolidated => {
                let call = IPasteBin::deletePasteCall { pasteId: id };
                self.write("deletePaste", call, U256::ZERO).await
            }
        }
    }

    /// Pay for access to a paid paste
    pub async fn access_paste(
        &self,
        id: U256,
        payment: U256,
    ) -> Result<PendingTransaction, ContractError> {
        match self.binding.contract_abi {
            ContractAbi::Legacy => {
                let call = ILegacyPasteBin::accessPasteCall { pasteId: id };
                self.write("accessPaste", call, payment).await
            }
            ContractAbi::Consolidated => {
                let call = IPasteBin::accessPasteCall { pasteId: id };
                self.write("accessPaste", call, payment).await
            }
        }
    }

    /// Plain value transfer, used to tip a paste's creator
    pub async fn tip(&self, to: Address, value: U256) -> Result<PendingTransaction, ContractError> {
        self.send("tip", TransactionRequest::to(to), value).await
    }

    pub async fn get_paste_info(&self, id: U256) -> Result<PasteInfo, ContractError> {
        let info = match self.binding.contract_abi {
            ContractAbi::Legacy => {
                let call = ILegacyPasteBin::getPasteInfoCall { pasteId: id };
                PasteInfo::try_from(self.read(call).await?.info)?
            }
            ContractAbi::Consolidated => {
                let call = IPasteBin::getPasteInfoCall { pasteId: id };
                PasteInfo::try_from(self.read(call).await?.info)?
            }
        };
        if info.creator == Address::ZERO {
            return Err(ContractError::NotFound(format!("paste {} does not exist", id)));
        }
        Ok(info)
    }

    /// Metadata plus stored content; content may be empty without access
    pub async fn get_paste(&self, id: U256) -> Result<Paste, ContractError> {
        let paste = match self.binding.contract_abi {
            ContractAbi::Legacy => {
                let call = ILegacyPasteBin::getPasteCall { pasteId: id };
                Paste::try_from(self.read(call).await?.paste)?
            }
            ContractAbi::Consolidated => {
                let call = IPasteBin::getPasteCall { pasteId: id };
                Paste::try_from(self.read(call).await?.paste)?
            }
        };
        if paste.info.creator == Address::ZERO {
            return Err(ContractError::NotFound(format!("paste {} does not exist", id)));
        }
        Ok(paste)
    }

    /// The raw record behind the contract's public `pastes` getter
    ///
    /// Open to any caller, so it is the lookup for creator and terms.
    pub async fn get_paste_record(&self, id: U256) -> Result<PasteInfo, ContractError> {
        let info = match self.binding.contract_abi {
            ContractAbi::Legacy => {
                let r = self.read(ILegacyPasteBin::pastesCall { pasteId: id }).await?;
                PasteInfo {
                    id: r.id,
                    creator: r.creator,
                    title: r.title,
                    creation_time: r.creationTime.saturating_to(),
                    expiration_time: r.expirationTime.saturating_to(),
                    paste_type: PasteType::try_from(r.pasteType)?,
                    price: r.price,
                    public_key: r.publicKey,
                    current_version: None,
                }
            }
            ContractAbi::Consolidated => {
                let r = self.read(IPasteBin::pastesCall { pasteId: id }).await?;
                PasteInfo {
                    id: r.id,
                    creator: r.creator,
                    title: r.title,
                    creation_time: r.creationTime.saturating_to(),
                    expiration_time: r.expirationTime.saturating_to(),
                    paste_type: PasteType::try_from(r.pasteType)?,
                    price: r.price,
                    public_key: r.publicKey,
                    current_version: Some(r.currentVersion.saturating_to()),
                }
            }
        };
        if info.creator == Address::ZERO {
            return Err(ContractError::NotFound(format!("paste {} does not exist", id)));
        }
        Ok(info)
    }

    /// Fetch stored content bytes
    ///
    /// Consolidated contracts check `signature` against the caller; legacy
    /// contracts gate on the caller alone and ignore it.
    pub async fn get_paste_content(
        &self,
        id: U256,
        paste_type: PasteType,
        signature: Option<&AccessSignature>,
    ) -> Result<Bytes, ContractError> {
        match self.binding.contract_abi {
            ContractAbi::Legacy => match paste_type {
                PasteType::Public => {
                    let call = ILegacyPasteBin::getPublicPasteCall { pasteId: id };
                    Ok(self.read(call).await?.content)
                }
                PasteType::Paid | PasteType::Private => {
                    let call = ILegacyPasteBin::getPrivatePasteCall { pasteId: id };
                    Ok(self.read(call).await?.content)
                }
            },
            ContractAbi::Consolidated => {
                let call = IPasteBin::getPasteContentCall {
                    pasteId: id,
                    signature: signature_bytes(signature),
                };
                Ok(self.read(call).await?.content)
            }
        }
    }

    /// Fetch one historical version of a paste
    pub async fn get_paste_version(
        &self,
        id: U256,
        version: u64,
        signature: Option<&AccessSignature>,
    ) -> Result<PasteVersion, ContractError> {
        match self.binding.contract_abi {
            ContractAbi::Legacy => Err(ContractError::UnsupportedCall {
                call: "getPasteVersion",
                abi: ContractAbi::Legacy,
            }),
            ContractAbi::Consolidated => {
                let call = IPasteBin::getPasteVersionCall {
                    pasteId: id,
                    version: U256::from(version),
                    signature: signature_bytes(signature),
                };
                Ok(self.read(call).await?.pasteVersion.into())
            }
        }
    }

    pub async fn get_public_pastes(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<PasteInfo>, ContractError> {
        let offset = U256::from(offset);
        let limit = U256::from(limit);
        match self.binding.contract_abi {
            ContractAbi::Legacy => {
                let call = ILegacyPasteBin::getPublicPastesCall { offset, limit };
                self.read(call)
                    .await?
                    .pastes
                    .into_iter()
                    .map(PasteInfo::try_from)
                    .collect()
            }
            ContractAbi::Consolidated => {
                let call = IPasteBin::getPublicPastesCall { offset, limit };
                self.read(call)
                    .await?
                    .pastes
                    .into_iter()
                    .map(PasteInfo::try_from)
                    .collect()
            }
        }
    }

    pub async fn get_user_pastes(&self, user: Address) -> Result<Vec<U256>, ContractError> {
        let ids = match self.binding.contract_abi {
            ContractAbi::Legacy => {
                self.read(ILegacyPasteBin::getUserPastesCall { user })
                    .await?
                    .pasteIds
            }
            ContractAbi::Consolidated => {
                self.read(IPasteBin::getUserPastesCall { user })
                    .await?
                    .pasteIds
            }
        };
        Ok(ids)
    }

    pub async fn get_accessible_pastes(&self, user: Address) -> Result<Vec<U256>, ContractError> {
        let ids = match self.binding.contract_abi {
            ContractAbi::Legacy => {
                self.read(ILegacyPasteBin::getAccessiblePastesCall { user })
                    .await?
                    .pasteIds
            }
            ContractAbi::Consolidated => {
                self.read(IPasteBin::getAccessiblePastesCall { user })
                    .await?
                    .pasteIds
            }
        };
        Ok(ids)
    }
}

fn signature_bytes(signature: Option<&AccessSignature>) -> Bytes {
    signature
        .map(|s| Bytes::copy_from_slice(s.bytes()))
        .unwrap_or_default()
}
