use alloy_primitives::{Bytes, B256, U256};

use super::{PasteClient, PasteError};
use crate::crypto::EncryptionKey;

impl PasteClient {
    /// Replace a paste's content
    ///
    /// Non-public content is re-sealed under the stored seed with a fresh IV.
    /// Title, type and expiry are fixed at creation.
    pub async fn edit(&self, id: U256, content: &str) -> Result<B256, PasteError> {
        let signer = self.signer()?;
        let info = self.contract().get_paste_info(id).await?;
        if info.creator != signer {
            return Err(PasteError::NotCreator(id));
        }

        if info.paste_type.is_public() {
            let pending = self
                .contract()
                .update_paste(id, Bytes::copy_from_slice(content.as_bytes()))
                .await?;
            let receipt = self.settle(pending).await?;
            tracing::info!(paste = %id, "updated public paste");
            return Ok(receipt.transaction_hash);
        }

        if info.public_key.is_empty() {
            return Err(PasteError::MissingSeed(id));
        }
        let seed = EncryptionKey::from_hex(&info.public_key)?;
        let scheme = self.contract().key_scheme();
        let hash = self.seal_and_store(id, &seed, scheme, content).await?;
        tracing::info!(paste = %id, key_scheme = %scheme, "updated sealed paste");
        Ok(hash)
    }
}
