use crate::api::PriceSource;
use crate::error::UpstreamError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

pub struct CoingeckoApi {
    client: Client,
    url: String,
}

impl CoingeckoApi {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, UpstreamError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            url: url.into(),
        })
    }
}

#[async_trait]
impl PriceSource for CoingeckoApi {
    async fn fetch_eth_price_usd(&self) -> Result<f64, UpstreamError> {
        debug!("Sending request to {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            debug!("Rate limit hit on price API");
            return Err(UpstreamError::RateLimited);
        }
        if !response.status().is_success() {
            return Err(UpstreamError::Status(response.status().as_u16()));
        }

        let json: Value = response.json().await?;
        parse_eth_price(&json)
    }
}

/// Pulls `ethereum.usd` out of a `simple/price` response.
pub fn parse_eth_price(json: &Value) -> Result<f64, UpstreamError> {
    json.get("ethereum")
        .and_then(|e| e.get("usd"))
        .and_then(|p| p.as_f64())
        .filter(|p| p.is_finite())
        .ok_or_else(|| UpstreamError::Malformed(format!("no ethereum.usd in {}", json)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_simple_price_response() {
        let price = parse_eth_price(&json!({ "ethereum": { "usd": 3187.42 } })).unwrap();
        assert_eq!(price, 3187.42);
    }

    #[test]
    fn integer_price_is_accepted() {
        assert_eq!(parse_eth_price(&json!({ "ethereum": { "usd": 3000 } })).unwrap(), 3000.0);
    }

    #[test]
    fn missing_or_non_numeric_price_is_malformed() {
        for body in [
            json!({}),
            json!({ "ethereum": {} }),
            json!({ "ethereum": { "usd": "3000" } }),
            json!({ "status": { "error_code": 429 } }),
        ] {
            assert!(matches!(parse_eth_price(&body), Err(UpstreamError::Malformed(_))));
        }
    }
}
