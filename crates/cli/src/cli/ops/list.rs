use alloy_primitives::Address;
use clap::Args;
use common::paste::PasteError;

use super::format;
use crate::cli::op::{parse_address, ContextError, OpContext};

/// List your pastes, the pastes you can read, or another user's pastes
#[derive(Args, Debug, Clone)]
pub struct List {
    /// Pastes the connected account has been granted or has paid for
    #[arg(long, conflicts_with = "user")]
    pub accessible: bool,

    /// Pastes created by this address
    #[arg(long, value_parser = parse_address)]
    pub user: Option<Address>,

    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error(transparent)]
    Paste(#[from] PasteError),
    #[error("failed to encode listing: {0}")]
    Json(#[from] serde_json::Error),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for List {
    type Error = ListError;
    type Output = String;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let (client, pastes) = match self.user {
            Some(user) => {
                let client = ctx.viewer_client().await?;
                let pastes = client.user_pastes(user).await?;
                (client, pastes)
            }
            None => {
                let client = ctx.signer_client().await?;
                let pastes = if self.accessible {
                    client.accessible_pastes().await?
                } else {
                    client.my_pastes().await?
                };
                (client, pastes)
            }
        };

        if self.json {
            return Ok(serde_json::to_string_pretty(&pastes)?);
        }
        if pastes.is_empty() {
            return Ok("No pastes found".to_string());
        }

        let symbol = ctx.token_symbol(client.contract().chain_id());
        let now = chrono::Utc::now();
        Ok(pastes
            .iter()
            .map(|info| format::summary_line(info, &symbol, now))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}
