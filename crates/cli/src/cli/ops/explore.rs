use clap::Args;
use common::paste::{ExploreQuery, PasteError, DEFAULT_PAGE_SIZE};

use super::format;
use crate::cli::op::{ContextError, OpContext};

#[derive(Args, Debug, Clone)]
pub struct Explore {
    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    pub page: u64,

    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u64,

    /// Only show pastes whose title or creator contains this text
    #[arg(long)]
    pub search: Option<String>,

    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ExploreError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error(transparent)]
    Paste(#[from] PasteError),
    #[error("failed to encode listing: {0}")]
    Json(#[from] serde_json::Error),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Explore {
    type Error = ExploreError;
    type Output = String;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let client = ctx.read_client().await?;
        let query = ExploreQuery {
            page: self.page,
            page_size: self.page_size,
            search: self.search.clone(),
        };
        let page = client.explore(&query).await?;

        if self.json {
            return Ok(serde_json::to_string_pretty(&page)?);
        }
        if page.pastes.is_empty() {
            return Ok(match &self.search {
                Some(search) => format!("No public pastes match '{}'", search),
                None => "No public pastes yet".to_string(),
            });
        }

        let symbol = ctx.token_symbol(client.contract().chain_id());
        let now = chrono::Utc::now();
        let mut lines: Vec<String> = page
            .pastes
            .iter()
            .map(|info| format::summary_line(info, &symbol, now))
            .collect();
        if page.has_more {
            lines.push(format!(
                "-- more on page {} (--page {})",
                page.page + 1,
                page.page + 1
            ));
        }
        Ok(lines.join("\n"))
    }
}
