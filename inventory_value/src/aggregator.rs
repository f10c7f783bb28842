//! Deduplicated pricing and summation of an inventory

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use steam_common::{AggregationResult, NamedItem, PriceQuote, PricedItem};

use crate::clock::Clock;
use crate::price::PriceLookup;
use crate::rate_limit::RequestPacer;

/// Prices each distinct item name once and values every owned copy
pub struct Aggregator {
    lookup: PriceLookup,
    clock: Arc<dyn Clock>,
    request_interval: Duration,
}

impl Aggregator {
    pub fn new(lookup: PriceLookup, clock: Arc<dyn Clock>, request_interval: Duration) -> Self {
        Self {
            lookup,
            clock,
            request_interval,
        }
    }

    /// Value `items` in `currency`.
    ///
    /// Lookups run sequentially behind one pacer created for this call, and the
    /// name → quote cache lives only as long as the call. Items without a name,
    /// without a quote, or with an unparseable lowest price add nothing.
    pub async fn aggregate(
        &self,
        items: Vec<NamedItem>,
        app_id: u32,
        currency: u32,
    ) -> AggregationResult {
        let names = distinct_names(&items);
        log::info!(
            "Pricing {} unique names for {} items",
            names.len(),
            items.len()
        );

        let mut pacer = RequestPacer::new(self.clock.clone(), self.request_interval);
        let mut quotes: HashMap<String, Option<PriceQuote>> = HashMap::with_capacity(names.len());
        for name in names {
            let quote = self
                .lookup
                .lookup_price(&mut pacer, app_id, &name, currency)
                .await;
            quotes.insert(name, quote);
        }

        let items: Vec<PricedItem> = items
            .into_iter()
            .map(|item| {
                let price = item
                    .name
                    .as_ref()
                    .and_then(|name| quotes.get(name).cloned().flatten());
                PricedItem { item, price }
            })
            .collect();

        let total_value: f64 = items.iter().filter_map(PricedItem::value).sum();

        AggregationResult {
            items,
            total_value,
            unique_names: quotes.len(),
        }
    }
}

/// Distinct non-null names, in first-seen order
pub fn distinct_names(items: &[NamedItem]) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter_map(|item| item.name.as_deref())
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "aggregator_tests.rs"]
mod tests;
