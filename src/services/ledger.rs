use crate::error::LedgerError;
use crate::models::presale::PurchaseRecord;
use std::sync::{Mutex, MutexGuard};
use tracing::info;

#[derive(Default)]
struct LedgerState {
    purchases: Vec<PurchaseRecord>,
    total_raised: f64,
}

/// Append-only in-memory record of purchase intents.
///
/// The append and the running-total update happen under the same lock so
/// concurrent purchases cannot lose an increment.
#[derive(Default)]
pub struct PurchaseLedger {
    state: Mutex<LedgerState>,
}

impl PurchaseLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn record(&self, purchase: PurchaseRecord) -> Result<PurchaseRecord, LedgerError> {
        validate(&purchase)?;

        let mut state = self.lock();
        state.purchases.push(purchase.clone());
        state.total_raised += purchase.eth_amount;
        info!(
            "Recorded purchase of {} ETH from {} (total {} ETH)",
            purchase.eth_amount, purchase.wallet_address, state.total_raised
        );
        Ok(purchase)
    }

    pub fn list(&self) -> Vec<PurchaseRecord> {
        self.lock().purchases.clone()
    }

    pub fn total_raised(&self) -> f64 {
        self.lock().total_raised
    }

    pub fn len(&self) -> usize {
        self.lock().purchases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn validate(purchase: &PurchaseRecord) -> Result<(), LedgerError> {
    if !purchase.eth_amount.is_finite() || purchase.eth_amount < 0.0 {
        return Err(LedgerError::InvalidInput(format!(
            "ethAmount must be a non-negative number, got {}",
            purchase.eth_amount
        )));
    }
    Ok(())
}
