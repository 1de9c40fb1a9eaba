pub mod coingecko;
pub mod ethereum_rpc;

use crate::error::UpstreamError;
use async_trait::async_trait;

/// Anything that can quote ETH in USD.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_eth_price_usd(&self) -> Result<f64, UpstreamError>;
}

/// Anything that can report an account balance in wei.
#[async_trait]
pub trait BalanceSource: Send + Sync {
    async fn fetch_balance_wei(&self, address: &str) -> Result<u128, UpstreamError>;
}
