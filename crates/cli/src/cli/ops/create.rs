use std::io::Read;
use std::path::PathBuf;

use alloy_primitives::U256;
use clap::Args;
use common::contract::PasteType;
use common::paste::{parse_ether, AddressList, NewPaste, PasteError};

use super::format;
use crate::cli::op::{ContextError, OpContext};

const SECONDS_PER_DAY: u64 = 60 * 60 * 24;

#[derive(Args, Debug, Clone)]
pub struct Create {
    #[arg(long)]
    pub title: String,

    /// Paste body; use --file to read it from a file or stdin
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub content: Option<String>,

    /// Read the body from this file, or from stdin when given '-'
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// public, paid or private
    #[arg(long = "type", default_value = "public")]
    pub paste_type: PasteType,

    /// Price in ETH for paid pastes, e.g. 0.01
    #[arg(long)]
    pub price: Option<String>,

    /// Address allowed to read a private paste; repeat for more
    #[arg(long = "allow")]
    pub allowed: Vec<String>,

    /// Expire after this many days
    #[arg(long)]
    pub expires_in_days: Option<u64>,

    /// Extra ETH sent along with the creation
    #[arg(long)]
    pub tip: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error(transparent)]
    Paste(#[from] PasteError),
    #[error("failed to read content: {0}")]
    Io(#[from] std::io::Error),
    #[error("--price is required for paid pastes")]
    MissingPrice,
    #[error("--price only applies to paid pastes")]
    UnexpectedPrice,
    #[error("--allow only applies to private pastes")]
    UnexpectedAllowList,
}

/// Resolve `--content` / `--file` into the paste body
pub fn read_content(content: &Option<String>, file: &Option<PathBuf>) -> std::io::Result<String> {
    match (content, file) {
        (Some(content), _) => Ok(content.clone()),
        (None, Some(path)) if path.as_os_str() == "-" => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        (None, Some(path)) => std::fs::read_to_string(path),
        (None, None) => Ok(String::new()),
    }
}

impl Create {
    fn build(&self, now: u64) -> Result<NewPaste, CreateError> {
        let content = read_content(&self.content, &self.file)?;
        let mut paste = match self.paste_type {
            PasteType::Public => NewPaste::public(&self.title, content),
            PasteType::Paid => {
                let price = self.price.as_deref().ok_or(CreateError::MissingPrice)?;
                NewPaste::paid(&self.title, content, parse_ether(price)?)
            }
            PasteType::Private => {
                NewPaste::private(&self.title, content, AddressList::parse_all(&self.allowed)?)
            }
        };

        if self.price.is_some() && self.paste_type != PasteType::Paid {
            return Err(CreateError::UnexpectedPrice);
        }
        if !self.allowed.is_empty() && self.paste_type != PasteType::Private {
            return Err(CreateError::UnexpectedAllowList);
        }

        if let Some(days) = self.expires_in_days {
            paste.expiration_time = now.saturating_add(days.saturating_mul(SECONDS_PER_DAY));
        }
        if let Some(tip) = &self.tip {
            paste.tip = parse_ether(tip)?;
        }
        Ok(paste)
    }
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Create {
    type Error = CreateError;
    type Output = String;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let now = chrono::Utc::now().timestamp().max(0) as u64;
        let paste = self.build(now)?;

        let client = ctx.signer_client().await?;
        let created = client.create(&paste).await?;

        let symbol = ctx.token_symbol(client.contract().chain_id());

        let mut lines = vec![
            format!("Created {} paste #{}", created.paste_type, created.id),
            format!("  transaction: {}", created.tx_hash),
        ];
        if paste.paste_type == PasteType::Paid {
            let eth_usd = ctx.eth_usd().await;
            lines.push(format!(
                "  price:       {}",
                format::amount(paste.price, &symbol, eth_usd)
            ));
        }
        if let Some(scheme) = created.key_scheme {
            lines.push(format!("  key scheme:  {}", scheme));
        }
        if paste.tip > U256::ZERO {
            lines.push(format!("  tip:         {}", format::amount(paste.tip, &symbol, None)));
        }
        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn create(paste_type: PasteType) -> Create {
        Create {
            title: "Title".to_string(),
            content: Some("body".to_string()),
            file: None,
            paste_type,
            price: None,
            allowed: Vec::new(),
            expires_in_days: None,
            tip: None,
        }
    }

    #[test]
    fn test_build_paid_requires_price() {
        let mut op = create(PasteType::Paid);
        assert!(matches!(op.build(0), Err(CreateError::MissingPrice)));

        op.price = Some("0.01".to_string());
        let paste = op.build(0).unwrap();
        assert_eq!(paste.price, parse_ether("0.01").unwrap());
    }

    #[test]
    fn test_build_rejects_misplaced_options() {
        let mut op = create(PasteType::Public);
        op.price = Some("1".to_string());
        assert!(matches!(op.build(0), Err(CreateError::UnexpectedPrice)));

        let mut op = create(PasteType::Paid);
        op.price = Some("1".to_string());
        op.allowed = vec!["0x1111111111111111111111111111111111111111".to_string()];
        assert!(matches!(op.build(0), Err(CreateError::UnexpectedAllowList)));
    }

    #[test]
    fn test_build_private_and_expiry() {
        let mut op = create(PasteType::Private);
        op.allowed = vec![
            "0x1111111111111111111111111111111111111111".to_string(),
            "0x2222222222222222222222222222222222222222".to_string(),
        ];
        op.expires_in_days = Some(2);
        let paste = op.build(1_000).unwrap();
        assert_eq!(paste.allowed_addresses.len(), 2);
        assert_eq!(paste.expiration_time, 1_000 + 2 * SECONDS_PER_DAY);

        op.allowed.push("0x1111111111111111111111111111111111111111".to_string());
        assert!(matches!(
            op.build(0),
            Err(CreateError::Paste(PasteError::DuplicateAddress(_)))
        ));
    }

    #[test]
    fn test_read_content_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("paste.txt");
        std::fs::write(&path, "from disk").unwrap();
        assert_eq!(read_content(&None, &Some(path)).unwrap(), "from disk");
    }
}
