//! Inventory Value - Steam inventory valuation server
//!
//! Serves `POST /check`, which prices a Steam profile's inventory on the
//! Community Market and returns the total.

use clap::Parser;
use inventory_value::config::{
    DEFAULT_APP_ID, DEFAULT_COMMUNITY_URL, DEFAULT_CONTEXT_ID, DEFAULT_CURRENCY,
    DEFAULT_INVENTORY_COUNT, DEFAULT_USER_AGENT,
};
use inventory_value::{InventoryValuator, ValuationConfig};
use std::sync::Arc;
use std::time::Duration;

/// Steam inventory valuation server
#[derive(Parser, Debug)]
#[command(name = "inventory_value")]
#[command(version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// Steam Community base URL
    #[arg(long, env = "STEAM_COMMUNITY_URL", default_value = DEFAULT_COMMUNITY_URL)]
    community_url: String,

    /// Steam app id whose inventory is valued (730 = Counter-Strike)
    #[arg(long, env = "STEAM_APP_ID", default_value_t = DEFAULT_APP_ID)]
    app_id: u32,

    /// Inventory context id
    #[arg(long, env = "STEAM_CONTEXT_ID", default_value_t = DEFAULT_CONTEXT_ID)]
    context_id: u64,

    /// Steam currency code for market prices (5 = RUB)
    #[arg(long, env = "STEAM_CURRENCY", default_value_t = DEFAULT_CURRENCY)]
    currency: u32,

    /// Timeout for each outbound request, in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    /// Minimum delay between two price requests, in milliseconds
    #[arg(long, env = "PRICE_INTERVAL_MS", default_value_t = 100)]
    price_interval_ms: u64,

    /// Attempts per item price before giving up
    #[arg(long, env = "PRICE_MAX_ATTEMPTS", default_value_t = 3)]
    price_attempts: u32,

    /// Backoff unit between price retries, in milliseconds
    #[arg(long, env = "RETRY_BACKOFF_MS", default_value_t = 500)]
    retry_backoff_ms: u64,

    /// Maximum number of inventory items requested
    #[arg(long, default_value_t = DEFAULT_INVENTORY_COUNT)]
    inventory_count: u32,

    /// User agent sent to Steam
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,
}

impl Args {
    fn valuation_config(&self) -> ValuationConfig {
        ValuationConfig {
            community_base_url: self.community_url.clone(),
            app_id: self.app_id,
            context_id: self.context_id,
            currency: self.currency,
            request_timeout: Duration::from_secs(self.timeout_secs),
            price_request_interval: Duration::from_millis(self.price_interval_ms),
            price_max_attempts: self.price_attempts,
            retry_backoff: Duration::from_millis(self.retry_backoff_ms),
            inventory_count: self.inventory_count,
            user_agent: self.user_agent.clone(),
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.valuation_config();

    log::info!("Starting inventory_value...");
    log::info!(
        "Valuing app {} context {} in currency {} via {}",
        config.app_id,
        config.context_id,
        config.currency,
        config.community_base_url
    );

    let valuator = match InventoryValuator::from_config(config) {
        Ok(valuator) => Arc::new(valuator),
        Err(e) => {
            log::error!("Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = inventory_value::web::serve(valuator, args.port).await {
        log::error!("Web server error: {}", e);
        std::process::exit(1);
    }
}
