use alloy_primitives::{Address, Bytes, B256, U256};

use super::{PasteClient, PasteError};
use crate::contract::{created_paste_id, CreatePaste, PasteType};
use crate::crypto::{encrypt_content, EncryptionKey, KeyScheme};

/// Allowed viewers of a private paste, free of duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressList(Vec<Address>);

impl AddressList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse every entry, failing on the first invalid or repeated address
    pub fn parse_all<I, S>(entries: I) -> Result<Self, PasteError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::new();
        for entry in entries {
            list.add(entry.as_ref())?;
        }
        Ok(list)
    }

    pub fn add(&mut self, entry: &str) -> Result<Address, PasteError> {
        let address = entry
            .trim()
            .parse::<Address>()
            .map_err(|_| PasteError::InvalidAddress(entry.to_string()))?;
        if self.0.contains(&address) {
            return Err(PasteError::DuplicateAddress(address));
        }
        self.0.push(address);
        Ok(address)
    }

    pub fn remove(&mut self, address: &Address) -> bool {
        let before = self.0.len();
        self.0.retain(|a| a != address);
        self.0.len() != before
    }

    pub fn as_slice(&self) -> &[Address] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// A paste about to be created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPaste {
    pub title: String,
    pub content: String,
    pub paste_type: PasteType,
    /// Unix seconds, `0` for never
    pub expiration_time: u64,
    /// Wei, for paid pastes
    pub price: U256,
    pub allowed_addresses: AddressList,
    /// Wei sent to the contract along with the creation
    pub tip: U256,
}

impl NewPaste {
    pub fn public(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            paste_type: PasteType::Public,
            expiration_time: 0,
            price: U256::ZERO,
            allowed_addresses: AddressList::new(),
            tip: U256::ZERO,
        }
    }

    pub fn paid(title: impl Into<String>, content: impl Into<String>, price: U256) -> Self {
        Self {
            paste_type: PasteType::Paid,
            price,
            ..Self::public(title, content)
        }
    }

    pub fn private(
        title: impl Into<String>,
        content: impl Into<String>,
        allowed_addresses: AddressList,
    ) -> Self {
        Self {
            paste_type: PasteType::Private,
            allowed_addresses,
            ..Self::public(title, content)
        }
    }

    /// Whether accounts other than the creator must be able to open the content
    pub fn is_shared(&self) -> bool {
        match self.paste_type {
            PasteType::Public => false,
            PasteType::Paid => true,
            PasteType::Private => !self.allowed_addresses.is_empty(),
        }
    }

    fn validate(&self, now: u64) -> Result<(), PasteError> {
        if self.title.trim().is_empty() {
            return Err(PasteError::EmptyTitle);
        }
        if self.expiration_time != 0 && self.expiration_time <= now {
            return Err(PasteError::InvalidExpiration(self.expiration_time));
        }
        Ok(())
    }
}

/// Result of a successful creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPaste {
    pub id: U256,
    /// Hash of the creation transaction
    pub tx_hash: B256,
    pub paste_type: PasteType,
    /// How the content was sealed; `None` for public pastes
    pub key_scheme: Option<KeyScheme>,
}

impl PasteClient {
    /// Create a paste, encrypting non-public content client-side
    ///
    /// Under the signature-bound scheme the content key depends on the
    /// creator's access signature for the new paste id, which only exists once
    /// the paste does. Creation then takes two transactions: an empty paste
    /// carrying the seed, then `updatePaste` with the sealed body. If the
    /// second step fails the error is `Incomplete` and an edit can finish it.
    /// Only the creator can reproduce that key, so paid pastes and private
    /// pastes with an allow-list are refused before anything is sent.
    pub async fn create(&self, paste: &NewPaste) -> Result<CreatedPaste, PasteError> {
        let creator = self.signer()?;
        let now = chrono::Utc::now().timestamp().max(0) as u64;
        paste.validate(now)?;

        let scheme = self.contract().key_scheme();
        if paste.is_shared() && !scheme.shares_key() {
            return Err(PasteError::SharedKeyRequired {
                paste_type: paste.paste_type,
                scheme,
            });
        }

        let mut request = CreatePaste {
            title: paste.title.trim().to_string(),
            content: String::new(),
            expiration_time: paste.expiration_time,
            paste_type: paste.paste_type,
            price: if paste.paste_type == PasteType::Paid {
                paste.price
            } else {
                U256::ZERO
            },
            public_key: String::new(),
            allowed_addresses: if paste.paste_type == PasteType::Private {
                paste.allowed_addresses.as_slice().to_vec()
            } else {
                Vec::new()
            },
            tip: paste.tip,
        };

        match paste.paste_type {
            PasteType::Public => {
                request.content = paste.content.clone();
                let (id, tx_hash) = self.submit_create(&request).await?;
                tracing::info!(paste = %id, %creator, "created public paste");
                Ok(CreatedPaste {
                    id,
                    tx_hash,
                    paste_type: PasteType::Public,
                    key_scheme: None,
                })
            }
            PasteType::Paid | PasteType::Private => {
                let seed = EncryptionKey::generate()?;
                request.public_key = seed.to_hex();

                let (id, tx_hash) = match scheme {
                    KeyScheme::RawSeed => {
                        let key = scheme.content_key(&seed, None)?;
                        request.content = encrypt_content(&paste.content, &key)?.to_hex();
                        self.submit_create(&request).await?
                    }
                    KeyScheme::SignatureBound => {
                        let (id, tx_hash) = self.submit_create(&request).await?;
                        if let Err(e) = self.seal_and_store(id, &seed, scheme, &paste.content).await
                        {
                            tracing::warn!(paste = %id, "paste created but sealing failed: {}", e);
                            return Err(PasteError::Incomplete {
                                id,
                                source: Box::new(e),
                            });
                        }
                        (id, tx_hash)
                    }
                };

                tracing::info!(
                    paste = %id,
                    %creator,
                    paste_type = %paste.paste_type,
                    key_scheme = %scheme,
                    "created sealed paste"
                );
                Ok(CreatedPaste {
                    id,
                    tx_hash,
                    paste_type: paste.paste_type,
                    key_scheme: Some(scheme),
                })
            }
        }
    }

    async fn submit_create(&self, request: &CreatePaste) -> Result<(U256, B256), PasteError> {
        let pending = self.contract().create_paste(request).await?;
        let receipt = self.settle(pending).await?;
        let id = created_paste_id(&receipt, self.contract().address())
            .ok_or(PasteError::MissingPasteId)?;
        Ok((id, receipt.transaction_hash))
    }

    /// Seal `content` for paste `id` under `seed` and store it with `updatePaste`
    pub(super) async fn seal_and_store(
        &self,
        id: U256,
        seed: &EncryptionKey,
        scheme: KeyScheme,
        content: &str,
    ) -> Result<B256, PasteError> {
        let signature = match scheme {
            KeyScheme::SignatureBound => Some(self.sign_access(id).await?),
            KeyScheme::RawSeed => None,
        };
        let key = scheme.content_key(seed, signature.as_ref())?;
        let payload = encrypt_content(content, &key)?;

        let pending = self
            .contract()
            .update_paste(id, Bytes::from(payload.to_wire()))
            .await?;
        let receipt = self.settle(pending).await?;
        Ok(receipt.transaction_hash)
    }
}
