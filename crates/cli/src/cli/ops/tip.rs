use alloy_primitives::U256;
use clap::Args;
use common::paste::{parse_ether, PasteError};

use super::format;
use crate::cli::op::{parse_paste_id, ContextError, OpContext};

#[derive(Args, Debug, Clone)]
pub struct Tip {
    #[arg(value_parser = parse_paste_id)]
    pub id: U256,

    /// Amount in ETH, e.g. 0.005
    pub amount: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TipError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error(transparent)]
    Paste(#[from] PasteError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Tip {
    type Error = TipError;
    type Output = String;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let amount = parse_ether(&self.amount)?;
        let client = ctx.signer_client().await?;
        let tx_hash = client.tip(self.id, amount).await?;

        let symbol = ctx.token_symbol(client.contract().chain_id());
        Ok(format!(
            "Tipped the creator of paste #{} {}\n  transaction: {}",
            self.id,
            format::amount(amount, &symbol, ctx.eth_usd().await),
            tx_hash
        ))
    }
}
