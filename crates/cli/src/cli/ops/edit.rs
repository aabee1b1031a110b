use std::path::PathBuf;

use alloy_primitives::U256;
use clap::Args;
use common::paste::PasteError;

use super::create::read_content;
use crate::cli::op::{parse_paste_id, ContextError, OpContext};

#[derive(Args, Debug, Clone)]
pub struct Edit {
    #[arg(value_parser = parse_paste_id)]
    pub id: U256,

    /// New paste body
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub content: Option<String>,

    /// Read the new body from this file, or from stdin when given '-'
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error(transparent)]
    Paste(#[from] PasteError),
    #[error("failed to read content: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Edit {
    type Error = EditError;
    type Output = String;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let content = read_content(&self.content, &self.file)?;
        let client = ctx.signer_client().await?;
        let tx_hash = client.edit(self.id, &content).await?;
        Ok(format!("Updated paste #{}\n  transaction: {}", self.id, tx_hash))
    }
}
