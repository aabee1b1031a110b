//! ETH/USD quotes for approximate fiat hints
//!
//! Purely informational: every failure is logged and reported as `None`.

use reqwest::Client;
use serde::Deserialize;
use url::Url;

pub const COINGECKO_SIMPLE_PRICE: &str =
    "https://api.coingecko.com/api/v3/simple/price?ids=ethereum&vs_currencies=usd";

#[derive(Debug, Deserialize)]
struct SimplePrice {
    ethereum: UsdQuote,
}

#[derive(Debug, Deserialize)]
struct UsdQuote {
    usd: f64,
}

#[derive(Debug, Clone)]
pub struct PriceFeed {
    endpoint: Url,
    client: Client,
}

impl PriceFeed {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            client: Client::new(),
        }
    }

    pub fn coingecko() -> Option<Self> {
        Url::parse(COINGECKO_SIMPLE_PRICE).ok().map(Self::new)
    }

    /// Current ETH price in USD, or `None` if the feed is unavailable
    pub async fn eth_usd(&self) -> Option<f64> {
        match self.fetch().await {
            Ok(price) => {
                tracing::debug!(price, "fetched ETH price");
                Some(price)
            }
            Err(e) => {
                tracing::warn!("error fetching ETH price: {}", e);
                None
            }
        }
    }

    async fn fetch(&self) -> Result<f64, reqwest::Error> {
        let quote: SimplePrice = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(quote.ethereum.usd)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parses_simple_price_response() {
        let quote: SimplePrice =
            serde_json::from_str(r#"{"ethereum":{"usd":3124.57}}"#).unwrap();
        assert_eq!(quote.ethereum.usd, 3124.57);
    }

    #[tokio::test]
    async fn test_unreachable_feed_degrades_to_none() {
        let feed = PriceFeed::new(Url::parse("http://127.0.0.1:9/price").unwrap());
        assert_eq!(feed.eth_usd().await, None);
    }
}
