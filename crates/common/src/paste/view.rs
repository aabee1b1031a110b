use alloy_primitives::{Bytes, U256};
use serde::Serialize;

use super::{PasteClient, PasteError};
use crate::contract::{ContractError, PasteInfo, PasteType, PasteVersion};
use crate::crypto::{decrypt_content, AccessSignature, CryptoError, EncryptedPayload, EncryptionKey};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewOptions {
    /// Pay the listed price when a paid paste has not been unlocked yet
    pub pay: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewedPaste {
    pub info: PasteInfo,
    pub content: String,
}

impl PasteClient {
    /// Fetch and, if needed, decrypt a paste
    ///
    /// Public pastes need no wallet. Paid and private pastes require a
    /// connected wallet: the viewer signs the access message, the signature is
    /// checked locally, and the content is opened with the derived key. A paid
    /// paste that has not been unlocked is paid for only when `options.pay`.
    /// Content whose key only its creator can derive is refused up front,
    /// before any signature or payment.
    pub async fn view(&self, id: U256, options: ViewOptions) -> Result<ViewedPaste, PasteError> {
        let info = self.contract().get_paste_info(id).await?;
        tracing::debug!(paste = %id, paste_type = %info.paste_type, "viewing paste");

        if info.paste_type.is_public() {
            let bytes = self
                .contract()
                .get_paste_content(id, PasteType::Public, None)
                .await?;
            let content = String::from_utf8(bytes.to_vec()).map_err(|_| CryptoError::InvalidUtf8)?;
            return Ok(ViewedPaste { info, content });
        }

        self.ensure_openable(&info)?;
        let signature = self.sign_access(id).await?;
        let bytes = self.fetch_sealed(&info, &signature, options).await?;
        let content = self.open(&info, &bytes, &signature)?;
        Ok(ViewedPaste { info, content })
    }

    /// Fetch and decrypt one historical version
    pub async fn view_version(&self, id: U256, version: u64) -> Result<ViewedPaste, PasteError> {
        let info = self.contract().get_paste_info(id).await?;

        if info.paste_type.is_public() {
            let PasteVersion { content, .. } =
                self.contract().get_paste_version(id, version, None).await?;
            let content =
                String::from_utf8(content.to_vec()).map_err(|_| CryptoError::InvalidUtf8)?;
            return Ok(ViewedPaste { info, content });
        }

        self.ensure_openable(&info)?;
        let signature = self.sign_access(id).await?;
        let PasteVersion { content, .. } = self
            .contract()
            .get_paste_version(id, version, Some(&signature))
            .await?;
        let content = self.open(&info, &content, &signature)?;
        Ok(ViewedPaste { info, content })
    }

    fn ensure_openable(&self, info: &PasteInfo) -> Result<(), PasteError> {
        let viewer = self.signer()?;
        if !self.contract().key_scheme().shares_key() && viewer != info.creator {
            tracing::debug!(paste = %info.id, %viewer, "sealed for its creator only");
            return Err(PasteError::CreatorOnly(info.id));
        }
        Ok(())
    }

    async fn fetch_sealed(
        &self,
        info: &PasteInfo,
        signature: &AccessSignature,
        options: ViewOptions,
    ) -> Result<Bytes, PasteError> {
        let contract = self.contract();
        match contract
            .get_paste_content(info.id, info.paste_type, Some(signature))
            .await
        {
            Err(ContractError::AccessDenied(reason))
                if info.paste_type == PasteType::Paid && options.pay =>
            {
                tracing::info!(paste = %info.id, price = %info.price, "paying for access: {}", reason);
                let pending = contract.access_paste(info.id, info.price).await?;
                self.settle(pending).await?;
                Ok(contract
                    .get_paste_content(info.id, info.paste_type, Some(signature))
                    .await?)
            }
            other => Ok(other?),
        }
    }

    fn open(
        &self,
        info: &PasteInfo,
        bytes: &[u8],
        signature: &AccessSignature,
    ) -> Result<String, PasteError> {
        if info.public_key.is_empty() {
            return Err(PasteError::MissingSeed(info.id));
        }
        if bytes.is_empty() {
            return Err(PasteError::NoContent(info.id));
        }

        let seed = EncryptionKey::from_hex(&info.public_key)?;
        let payload = EncryptedPayload::from_wire(bytes)?;
        let key = self
            .contract()
            .key_scheme()
            .content_key(&seed, Some(signature))?;

        decrypt_content(&payload, &key).map_err(|e| {
            if e == CryptoError::AuthenticationFailed {
                tracing::warn!(paste = %info.id, "sealed content did not open with the derived key");
            }
            e.into()
        })
    }
}
