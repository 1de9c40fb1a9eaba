use crate::api::coingecko::CoingeckoApi;
use crate::api::ethereum_rpc::{wei_to_eth, EthereumRpc};
use crate::api::{BalanceSource, PriceSource};
use crate::config::PresaleConfig;
use crate::error::{LedgerError, UpstreamError};
use crate::models::cache::{CacheSlot, CachedValue, Lookup};
use crate::models::presale::{PresaleSnapshot, PurchaseRecord};
use crate::services::ledger::PurchaseLedger;
use crate::utils::clock::{Clock, SystemClock};
use std::sync::Arc;
use tracing::{debug, warn};

/// Owns the price and balance caches and the purchase ledger.
///
/// Refreshes are not de-duplicated: concurrent readers of a stale slot may
/// each hit the upstream. A refresh that started earlier never replaces one
/// that started later.
pub struct PresaleService {
    config: PresaleConfig,
    prices: Arc<dyn PriceSource>,
    balances: Arc<dyn BalanceSource>,
    clock: Arc<dyn Clock>,
    price_cache: CacheSlot<f64>,
    balance_cache: CacheSlot<f64>,
    ledger: PurchaseLedger,
}

impl PresaleService {
    pub fn new(
        config: PresaleConfig,
        prices: Arc<dyn PriceSource>,
        balances: Arc<dyn BalanceSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            price_cache: CacheSlot::new(config.price_cache_ms),
            balance_cache: CacheSlot::new(config.balance_cache_ms),
            config,
            prices,
            balances,
            clock,
            ledger: PurchaseLedger::new(),
        }
    }

    /// Wires the live CoinGecko and JSON-RPC clients.
    pub fn from_config(config: PresaleConfig) -> Result<Self, UpstreamError> {
        let prices = CoingeckoApi::new(config.price_api_url.clone(), config.upstream_timeout)?;
        let balances = EthereumRpc::new(config.eth_rpc_url.clone(), config.upstream_timeout)?;
        Ok(Self::new(
            config,
            Arc::new(prices),
            Arc::new(balances),
            Arc::new(SystemClock),
        ))
    }

    pub fn config(&self) -> &PresaleConfig {
        &self.config
    }

    pub async fn price_lookup(&self) -> Lookup<f64> {
        let now = self.clock.now_millis();
        if let Some(price) = self.price_cache.get_if_fresh(now) {
            debug!("Cache hit for ETH price");
            return Lookup::Cached(price);
        }

        debug!("Cache miss for ETH price");
        let result = self.prices.fetch_eth_price_usd().await;
        resolve(&self.price_cache, result, now, "ETH price")
    }

    pub async fn balance_lookup(&self) -> Lookup<f64> {
        let now = self.clock.now_millis();
        if let Some(balance) = self.balance_cache.get_if_fresh(now) {
            debug!("Cache hit for presale balance");
            return Lookup::Cached(balance);
        }

        debug!("Cache miss for presale balance");
        let result = self
            .balances
            .fetch_balance_wei(&self.config.presale_address)
            .await
            .map(wei_to_eth);
        resolve(&self.balance_cache, result, now, "presale balance")
    }

    pub async fn get_eth_price_usd(&self) -> Option<f64> {
        self.price_lookup().await.value()
    }

    pub async fn get_presale_balance_eth(&self) -> f64 {
        self.balance_lookup().await.value().unwrap_or(0.0)
    }

    pub async fn get_snapshot(&self) -> PresaleSnapshot {
        let (price, balance) = tokio::join!(self.price_lookup(), self.balance_lookup());
        if let Some(e) = price.error() {
            debug!("Snapshot built without a fresh ETH price: {}", e);
        }
        if let Some(e) = balance.error() {
            debug!("Snapshot built without a fresh presale balance: {}", e);
        }

        PresaleSnapshot {
            total_raised: self.ledger.total_raised(),
            hard_cap: self.config.hard_cap,
            presale_price_usd: self.config.presale_price_usd,
            public_price_usd: self.config.public_price_usd,
            presale_end_date: self.config.presale_end_date,
            presale_address: self.config.presale_address.clone(),
            eth_price_usd: price.value(),
            on_chain_balance_eth: balance.value().unwrap_or(0.0),
        }
    }

    pub fn record_purchase(&self, purchase: PurchaseRecord) -> Result<PurchaseRecord, LedgerError> {
        self.ledger.record(purchase)
    }

    pub fn purchases(&self) -> Vec<PurchaseRecord> {
        self.ledger.list()
    }

    pub fn price_cache_entry(&self) -> CachedValue<f64> {
        self.price_cache.snapshot()
    }

    pub fn balance_cache_entry(&self) -> CachedValue<f64> {
        self.balance_cache.snapshot()
    }
}

/// On success the slot is refreshed; on failure it is left untouched so the
/// next call retries.
fn resolve(
    slot: &CacheSlot<f64>,
    result: Result<f64, UpstreamError>,
    now: u64,
    what: &str,
) -> Lookup<f64> {
    match result {
        Ok(value) => match slot.put(value, now) {
            None => Lookup::Fetched(value),
            Some(newer) => {
                debug!("Discarding {} fetched at {}, a newer one is cached", what, now);
                Lookup::Cached(newer)
            }
        },
        Err(e) => {
            warn!("Failed to fetch {}: {}", what, e);
            match slot.last_known() {
                Some(value) => Lookup::Stale {
                    value,
                    error: e.to_string(),
                },
                None => Lookup::Unavailable {
                    error: e.to_string(),
                },
            }
        }
    }
}
