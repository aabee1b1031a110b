use alloy_primitives::U256;
use clap::Args;
use common::paste::PasteError;

use crate::cli::op::{parse_paste_id, ContextError, OpContext};

#[derive(Args, Debug, Clone)]
pub struct Delete {
    #[arg(value_parser = parse_paste_id)]
    pub id: U256,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error(transparent)]
    Paste(#[from] PasteError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Delete {
    type Error = DeleteError;
    type Output = String;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let client = ctx.signer_client().await?;
        let tx_hash = client.delete(self.id).await?;
        Ok(format!("Deleted paste #{}\n  transaction: {}", self.id, tx_hash))
    }
}
