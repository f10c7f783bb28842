//! Community Market price lookups with retry and linear backoff

use std::sync::Arc;
use std::time::Duration;
use steam_common::{PriceOverviewResponse, PriceQuote};

use crate::clock::Clock;
use crate::config::ValuationConfig;
use crate::fetch::HttpFetch;
use crate::rate_limit::RequestPacer;

/// Looks up `priceoverview` quotes for item names.
///
/// The endpoint rate-limits and has no data for new or delisted items, so
/// a lookup never fails: every unsuccessful attempt is retried, and running
/// out of attempts means "no price".
pub struct PriceLookup {
    fetcher: Arc<dyn HttpFetch>,
    clock: Arc<dyn Clock>,
    base_url: String,
    max_attempts: u32,
    retry_backoff: Duration,
}

impl PriceLookup {
    pub fn new(
        fetcher: Arc<dyn HttpFetch>,
        clock: Arc<dyn Clock>,
        config: &ValuationConfig,
    ) -> Self {
        Self {
            fetcher,
            clock,
            base_url: config.base_url().to_string(),
            max_attempts: config.price_max_attempts.max(1),
            retry_backoff: config.retry_backoff,
        }
    }

    pub fn price_url(&self, app_id: u32, name: &str, currency: u32) -> String {
        format!(
            "{}/market/priceoverview/?appid={}&currency={}&market_hash_name={}",
            self.base_url,
            app_id,
            currency,
            urlencoding::encode(name)
        )
    }

    /// Quote for `name`, or `None` once every attempt has failed.
    ///
    /// Every attempt waits for a permit from `pacer` first.
    pub async fn lookup_price(
        &self,
        pacer: &mut RequestPacer,
        app_id: u32,
        name: &str,
        currency: u32,
    ) -> Option<PriceQuote> {
        let url = self.price_url(app_id, name, currency);

        for attempt in 1..=self.max_attempts {
            pacer.acquire().await;
            match self.try_fetch(&url).await {
                Ok(quote) => {
                    log::debug!("Price for {:?}: {:?}", name, quote.lowest_price);
                    return Some(quote);
                }
                Err(reason) => {
                    log::warn!(
                        "Price lookup for {:?} failed (attempt {}/{}): {}",
                        name,
                        attempt,
                        self.max_attempts,
                        reason
                    );
                }
            }

            if attempt < self.max_attempts {
                self.clock.sleep(self.retry_backoff * attempt).await;
            }
        }

        log::info!("No price for {:?} after {} attempts", name, self.max_attempts);
        None
    }

    /// One attempt; the error is only used for logging
    async fn try_fetch(&self, url: &str) -> Result<PriceQuote, String> {
        let response = self.fetcher.get(url).await.map_err(|e| e.to_string())?;
        if !response.is_success() {
            return Err(format!("HTTP {}", response.status));
        }

        let payload: PriceOverviewResponse =
            serde_json::from_str(&response.body).map_err(|e| format!("bad payload: {}", e))?;

        payload
            .into_quote()
            .ok_or_else(|| "success flag not set".to_string())
    }
}

#[cfg(test)]
#[path = "price_tests.rs"]
mod tests;
