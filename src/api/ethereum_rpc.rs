//! Minimal JSON-RPC client for `eth_getBalance`.

use crate::api::BalanceSource;
use crate::error::UpstreamError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub const WEI_PER_ETH: u128 = 1_000_000_000_000_000_000;

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'static str,
    params: [&'a str; 2],
    id: u64,
}

#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    pub result: Option<String>,
    pub error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
pub struct RpcErrorBody {
    pub code: i64,
    pub message: String,
}

pub struct EthereumRpc {
    client: Client,
    url: String,
}

impl EthereumRpc {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, UpstreamError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            url: url.into(),
        })
    }
}

#[async_trait]
impl BalanceSource for EthereumRpc {
    async fn fetch_balance_wei(&self, address: &str) -> Result<u128, UpstreamError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            method: "eth_getBalance",
            params: [address, "latest"],
            id: 1,
        };

        debug!("eth_getBalance({}) via {}", address, self.url);
        let response = self.client.post(&self.url).json(&request).send().await?;
        if !response.status().is_success() {
            return Err(UpstreamError::Status(response.status().as_u16()));
        }

        let body: RpcResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Malformed(e.to_string()))?;
        balance_from_response(body)
    }
}

pub fn balance_from_response(body: RpcResponse) -> Result<u128, UpstreamError> {
    if let Some(err) = body.error {
        return Err(UpstreamError::Rpc {
            code: err.code,
            message: err.message,
        });
    }
    let result = body
        .result
        .ok_or_else(|| UpstreamError::Malformed("missing result".into()))?;
    parse_hex_quantity(&result)
}

/// Decodes a JSON-RPC hex quantity such as `0x1bc16d674ec80000`.
pub fn parse_hex_quantity(raw: &str) -> Result<u128, UpstreamError> {
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .ok_or_else(|| UpstreamError::Malformed(format!("quantity without 0x prefix: {}", raw)))?;
    if digits.is_empty() {
        return Err(UpstreamError::Malformed("empty quantity".into()));
    }
    u128::from_str_radix(digits, 16)
        .map_err(|e| UpstreamError::Malformed(format!("bad quantity {}: {}", raw, e)))
}

/// Integer division first so large balances keep their whole-ETH part exact.
pub fn wei_to_eth(wei: u128) -> f64 {
    let whole = wei / WEI_PER_ETH;
    let remainder = wei % WEI_PER_ETH;
    whole as f64 + remainder as f64 / WEI_PER_ETH as f64
}
