//! Shared material pricing with change notification.
//!
//! Rate edits are published through a [`PricingFeed`]; every open quotation
//! holds a subscription and reprices its cached breakdowns when the value
//! changes. Built on a watch channel, so subscribers always observe the
//! latest complete [`MaterialPricing`] and never a partially applied edit.
//! A subscriber that misses intermediate values only ever skips straight to
//! the newest one.

use tokio::sync::watch;
use tracing::debug;

use crate::models::MaterialPricing;

#[derive(Debug)]
pub struct PricingFeed {
    tx: watch::Sender<MaterialPricing>,
}

impl PricingFeed {
    pub fn new(initial: MaterialPricing) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// The most recently published rates.
    pub fn current(&self) -> MaterialPricing {
        self.tx.borrow().clone()
    }

    /// Publishes new rates, waking every subscriber.
    pub fn publish(&self, pricing: MaterialPricing) {
        debug!(
            kraft = %pricing.kraft_cost_per_kg,
            virgin = %pricing.virgin_cost_per_kg,
            conversion = %pricing.conversion_cost_per_kg,
            "publishing material rates"
        );
        self.tx.send_replace(pricing);
    }

    /// Opens a subscription that sees the current value and every later one.
    pub fn subscribe(&self) -> watch::Receiver<MaterialPricing> {
        self.tx.subscribe()
    }
}
