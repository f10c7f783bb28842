//! Valuation settings shared by every component

use std::time::Duration;

/// Steam Community host serving profiles, inventories and the market
pub const DEFAULT_COMMUNITY_URL: &str = "https://steamcommunity.com";

/// Counter-Strike (app 730), where tradable items live in context 2
pub const DEFAULT_APP_ID: u32 = 730;
pub const DEFAULT_CONTEXT_ID: u64 = 2;

/// Steam currency code 5 = RUB
pub const DEFAULT_CURRENCY: u32 = 5;

/// Upper bound Steam accepts for a single inventory page
pub const DEFAULT_INVENTORY_COUNT: u32 = 2000;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Settings for resolving, fetching and pricing an inventory.
///
/// Every component receives a copy at construction. Per-request values
/// (app, context, currency) can be overridden through
/// [`crate::ValuationOverrides`].
#[derive(Debug, Clone)]
pub struct ValuationConfig {
    /// Base URL for profile, inventory and price requests (no trailing slash)
    pub community_base_url: String,
    pub app_id: u32,
    pub context_id: u64,
    pub currency: u32,
    /// Timeout applied to every outbound request
    pub request_timeout: Duration,
    /// Minimum spacing between two price requests
    pub price_request_interval: Duration,
    /// Attempts per item name before giving up on a price
    pub price_max_attempts: u32,
    /// Backoff unit; attempt `n` waits `retry_backoff * n` before retrying
    pub retry_backoff: Duration,
    pub inventory_count: u32,
    pub user_agent: String,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            community_base_url: DEFAULT_COMMUNITY_URL.to_string(),
            app_id: DEFAULT_APP_ID,
            context_id: DEFAULT_CONTEXT_ID,
            currency: DEFAULT_CURRENCY,
            request_timeout: Duration::from_secs(10),
            price_request_interval: Duration::from_millis(100),
            price_max_attempts: 3,
            retry_backoff: Duration::from_millis(500),
            inventory_count: DEFAULT_INVENTORY_COUNT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ValuationConfig {
    /// Defaults, but talking to a different host (mock servers, proxies)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            community_base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Base URL without a trailing slash, ready for `format!` joins
    pub fn base_url(&self) -> &str {
        self.community_base_url.trim_end_matches('/')
    }
}
