use crate::error::ConfigError;
use chrono::{DateTime, TimeZone, Utc};
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

pub const PRESALE_ADDRESS: &str = "0xf9ea9da67bb4cb831cf1ed0570ededb070553473";
pub const HARD_CAP_ETH: f64 = 15.0;
pub const PRESALE_PRICE_USD: f64 = 0.0005;
pub const PUBLIC_PRICE_USD: f64 = 0.0015;

pub const PRICE_API_URL: &str =
    "https://api.coingecko.com/api/v3/simple/price?ids=ethereum&vs_currencies=usd";
pub const ETH_RPC_URL: &str = "https://eth.llamarpc.com";

const PRICE_CACHE_MS: u64 = 60_000;
const BALANCE_CACHE_MS: u64 = 30_000;
const UPSTREAM_TIMEOUT_MS: u64 = 5_000;

/// Static presale terms plus the runtime knobs of the server.
#[derive(Debug, Clone)]
pub struct PresaleConfig {
    pub presale_address: String,
    pub hard_cap: f64,
    pub presale_price_usd: f64,
    pub public_price_usd: f64,
    pub presale_end_date: DateTime<Utc>,

    pub price_api_url: String,
    pub eth_rpc_url: String,
    pub price_cache_ms: u64,
    pub balance_cache_ms: u64,
    pub upstream_timeout: Duration,

    pub bind_addr: SocketAddr,
}

pub fn default_end_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 15, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

impl Default for PresaleConfig {
    fn default() -> Self {
        Self {
            presale_address: PRESALE_ADDRESS.to_string(),
            hard_cap: HARD_CAP_ETH,
            presale_price_usd: PRESALE_PRICE_USD,
            public_price_usd: PUBLIC_PRICE_USD,
            presale_end_date: default_end_date(),
            price_api_url: PRICE_API_URL.to_string(),
            eth_rpc_url: ETH_RPC_URL.to_string(),
            price_cache_ms: PRICE_CACHE_MS,
            balance_cache_ms: BALANCE_CACHE_MS,
            upstream_timeout: Duration::from_millis(UPSTREAM_TIMEOUT_MS),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
        }
    }
}

impl PresaleConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset variables keep their defaults; a variable that is set but does
    /// not parse is an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let presale_end_date = match lookup("PRESALE_END_DATE") {
            Some(raw) => DateTime::parse_from_rfc3339(&raw)
                .map(|d| d.with_timezone(&Utc))
                .map_err(|e| ConfigError::Invalid {
                    name: "PRESALE_END_DATE",
                    value: raw.clone(),
                    reason: e.to_string(),
                })?,
            None => defaults.presale_end_date,
        };

        Ok(Self {
            presale_address: lookup("PRESALE_ADDRESS").unwrap_or(defaults.presale_address),
            hard_cap: parse_var(&lookup, "HARD_CAP_ETH", defaults.hard_cap)?,
            presale_price_usd: parse_var(&lookup, "PRESALE_PRICE_USD", defaults.presale_price_usd)?,
            public_price_usd: parse_var(&lookup, "PUBLIC_PRICE_USD", defaults.public_price_usd)?,
            presale_end_date,
            price_api_url: lookup("PRICE_API_URL").unwrap_or(defaults.price_api_url),
            eth_rpc_url: lookup("ETH_RPC_URL").unwrap_or(defaults.eth_rpc_url),
            price_cache_ms: parse_var(&lookup, "PRICE_CACHE_MS", defaults.price_cache_ms)?,
            balance_cache_ms: parse_var(&lookup, "BALANCE_CACHE_MS", defaults.balance_cache_ms)?,
            upstream_timeout: Duration::from_millis(parse_var(
                &lookup,
                "UPSTREAM_TIMEOUT_MS",
                UPSTREAM_TIMEOUT_MS,
            )?),
            bind_addr: parse_var(&lookup, "BIND_ADDR", defaults.bind_addr)?,
        })
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            value: raw.clone(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_match_presale_terms() {
        let config = PresaleConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.presale_address, PRESALE_ADDRESS);
        assert_eq!(config.hard_cap, 15.0);
        assert_eq!(config.presale_price_usd, 0.0005);
        assert_eq!(config.public_price_usd, 0.0015);
        assert_eq!(config.presale_end_date.to_rfc3339(), "2026-02-15T00:00:00+00:00");
        assert_eq!(config.price_cache_ms, 60_000);
        assert_eq!(config.balance_cache_ms, 30_000);
        assert_eq!(config.bind_addr.port(), 5000);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = PresaleConfig::from_lookup(lookup_from(&[
            ("PRICE_CACHE_MS", "1000"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("PRESALE_END_DATE", "2027-01-01T12:00:00Z"),
        ]))
        .unwrap();
        assert_eq!(config.price_cache_ms, 1000);
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.presale_end_date.to_rfc3339(), "2027-01-01T12:00:00+00:00");
    }

    #[test]
    fn malformed_value_is_rejected() {
        let err = PresaleConfig::from_lookup(lookup_from(&[("BALANCE_CACHE_MS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("BALANCE_CACHE_MS"));
    }
}
