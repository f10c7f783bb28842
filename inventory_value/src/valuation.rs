//! Profile reference → inventory total
//!
//! Wires resolver, inventory fetcher and aggregator around a single fetcher
//! and clock.

use serde::Deserialize;
use std::sync::Arc;
use steam_common::{AggregationResult, Result};

use crate::aggregator::Aggregator;
use crate::clock::{Clock, TokioClock};
use crate::config::ValuationConfig;
use crate::fetch::{HttpFetch, ReqwestFetcher};
use crate::inventory::InventoryFetcher;
use crate::price::PriceLookup;
use crate::resolver::IdentifierResolver;

/// Per-request replacements for the configured app, context and currency
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ValuationOverrides {
    pub app_id: Option<u32>,
    pub context_id: Option<u64>,
    pub currency: Option<u32>,
}

pub struct InventoryValuator {
    resolver: IdentifierResolver,
    inventory: InventoryFetcher,
    aggregator: Aggregator,
    config: ValuationConfig,
}

impl InventoryValuator {
    /// Valuator talking to Steam over reqwest on the tokio clock
    pub fn from_config(config: ValuationConfig) -> Result<Self> {
        let fetcher = Arc::new(ReqwestFetcher::new(&config)?);
        Ok(Self::new(config, fetcher, Arc::new(TokioClock)))
    }

    pub fn new(
        config: ValuationConfig,
        fetcher: Arc<dyn HttpFetch>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let resolver = IdentifierResolver::new(fetcher.clone(), &config);
        let inventory = InventoryFetcher::new(fetcher.clone(), &config);
        let lookup = PriceLookup::new(fetcher, clock.clone(), &config);
        let aggregator = Aggregator::new(lookup, clock, config.price_request_interval);

        Self {
            resolver,
            inventory,
            aggregator,
            config,
        }
    }

    /// Resolve `reference`, fetch its inventory and price it.
    ///
    /// Only resolution and inventory failures are errors; missing prices
    /// just leave items out of the total.
    pub async fn value(
        &self,
        reference: &str,
        overrides: &ValuationOverrides,
    ) -> Result<AggregationResult> {
        let app_id = overrides.app_id.unwrap_or(self.config.app_id);
        let context_id = overrides.context_id.unwrap_or(self.config.context_id);
        let currency = overrides.currency.unwrap_or(self.config.currency);

        let steam_id = self.resolver.resolve(reference).await?;
        let items = self
            .inventory
            .fetch_inventory(&steam_id, app_id, context_id)
            .await?;
        let result = self.aggregator.aggregate(items, app_id, currency).await;

        log::info!(
            "Valued inventory of {} at {:.2} (currency {}, {} of {} items priced)",
            steam_id,
            result.total_value,
            currency,
            result.priced_count(),
            result.items.len()
        );
        Ok(result)
    }
}
