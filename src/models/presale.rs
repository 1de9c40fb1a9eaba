use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stats returned by `GET /api/presale/stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresaleSnapshot {
    pub total_raised: f64,
    pub hard_cap: f64,
    pub presale_price_usd: f64,
    pub public_price_usd: f64,
    pub presale_end_date: DateTime<Utc>,
    pub presale_address: String,
    pub eth_price_usd: Option<f64>,
    pub on_chain_balance_eth: f64,
}

impl PresaleSnapshot {
    /// Share of the hard cap raised so far, in percent.
    pub fn progress_percent(&self) -> f64 {
        if self.hard_cap <= 0.0 {
            return 0.0;
        }
        self.total_raised / self.hard_cap * 100.0
    }

    pub fn total_raised_usd(&self) -> Option<f64> {
        self.eth_price_usd.map(|price| price * self.total_raised)
    }
}

/// A client-asserted purchase intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRecord {
    pub wallet_address: String,
    pub eth_amount: f64,
    pub tokens_received: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn purchase_decodes_camel_case_without_tx_hash() {
        let record: PurchaseRecord = serde_json::from_value(json!({
            "walletAddress": "0xabc",
            "ethAmount": 2.5,
            "tokensReceived": 5000000
        }))
        .unwrap();
        assert_eq!(record.wallet_address, "0xabc");
        assert_eq!(record.tokens_received, 5_000_000);
        assert!(record.tx_hash.is_none());
    }

    #[test]
    fn purchase_rejects_fractional_tokens() {
        let result = serde_json::from_value::<PurchaseRecord>(json!({
            "walletAddress": "0xabc",
            "ethAmount": 1.0,
            "tokensReceived": 1.5
        }));
        assert!(result.is_err());
    }

    #[test]
    fn snapshot_serializes_null_price_and_rfc3339_date() {
        let snapshot = PresaleSnapshot {
            total_raised: 3.0,
            hard_cap: 15.0,
            presale_price_usd: 0.0005,
            public_price_usd: 0.0015,
            presale_end_date: "2026-02-15T00:00:00Z".parse().unwrap(),
            presale_address: "0xf9ea9da67bb4cb831cf1ed0570ededb070553473".into(),
            eth_price_usd: None,
            on_chain_balance_eth: 0.0,
        };
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["presaleEndDate"], "2026-02-15T00:00:00Z");
        assert!(value["ethPriceUsd"].is_null());
        assert_eq!(value["hardCap"], 15.0);
        assert!((snapshot.progress_percent() - 20.0).abs() < 1e-9);
        assert_eq!(snapshot.total_raised_usd(), None);
    }
}
