use alloy_primitives::U256;
use clap::Args;
use common::paste::{PasteError, ViewOptions};

use super::format;
use crate::cli::op::{parse_paste_id, ContextError, OpContext};

#[derive(Args, Debug, Clone)]
pub struct View {
    /// Paste id, decimal or 0x-prefixed hex
    #[arg(value_parser = parse_paste_id)]
    pub id: U256,

    /// Pay the listed price if a paid paste is still locked
    #[arg(long)]
    pub pay: bool,

    /// Show a historical version instead of the current content
    #[arg(long)]
    pub version: Option<u64>,

    /// Print the paste as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error(transparent)]
    Paste(#[from] PasteError),
    #[error("failed to encode paste: {0}")]
    Json(#[from] serde_json::Error),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for View {
    type Error = ViewError;
    type Output = String;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let client = ctx.viewer_client().await?;
        let viewed = match self.version {
            Some(version) => client.view_version(self.id, version).await?,
            None => client.view(self.id, ViewOptions { pay: self.pay }).await?,
        };

        if self.json {
            return Ok(serde_json::to_string_pretty(&viewed)?);
        }

        let symbol = ctx.token_symbol(client.contract().chain_id());
        let eth_usd = ctx.eth_usd().await;
        let header = format::header(&viewed.info, &symbol, eth_usd, chrono::Utc::now());
        Ok(format!("{}\n\n{}", header, viewed.content))
    }
}
