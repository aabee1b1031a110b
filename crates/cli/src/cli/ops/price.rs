use clap::Args;
use common::paste::{parse_ether, usd_value, PasteError};

#[derive(Args, Debug, Clone)]
pub struct Price {
    /// Convert this many ETH to USD
    pub amount: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum PriceError {
    #[error("price feed is disabled in the configuration")]
    Disabled,
    #[error("price feed is unavailable right now")]
    Unavailable,
    #[error(transparent)]
    Paste(#[from] PasteError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Price {
    type Error = PriceError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let feed = ctx.price_feed().ok_or(PriceError::Disabled)?;
        let eth_usd = feed.eth_usd().await.ok_or(PriceError::Unavailable)?;

        match &self.amount {
            Some(amount) => {
                let wei = parse_ether(amount)?;
                Ok(format!("{} ETH ~ ${}", amount.trim(), usd_value(wei, eth_usd)))
            }
            None => Ok(format!("1 ETH ~ ${:.2}", eth_usd)),
        }
    }
}
