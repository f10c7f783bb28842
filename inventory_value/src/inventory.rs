//! Steam inventory retrieval
//!
//! The inventory endpoint returns owned units (`assets`) and shared metadata
//! (`descriptions`) as two parallel lists joined on (classid, instanceid).

use std::collections::HashMap;
use std::sync::Arc;
use steam_common::{
    DescriptionKey, InventoryResponse, ItemDescription, NamedItem, Result, SteamError, SteamId,
};

use crate::config::ValuationConfig;
use crate::fetch::HttpFetch;

pub struct InventoryFetcher {
    fetcher: Arc<dyn HttpFetch>,
    base_url: String,
    count: u32,
}

impl InventoryFetcher {
    pub fn new(fetcher: Arc<dyn HttpFetch>, config: &ValuationConfig) -> Self {
        Self {
            fetcher,
            base_url: config.base_url().to_string(),
            count: config.inventory_count,
        }
    }

    /// Inventory endpoint URL for one app/context of a profile
    pub fn inventory_url(&self, steam_id: &SteamId, app_id: u32, context_id: u64) -> String {
        format!(
            "{}/inventory/{}/{}/{}?l=english&count={}",
            self.base_url, steam_id, app_id, context_id, self.count
        )
    }

    /// Fetch the inventory and project every asset onto its description.
    ///
    /// Asset order is preserved. Assets without a description come back with
    /// `name: None` instead of failing the whole fetch.
    pub async fn fetch_inventory(
        &self,
        steam_id: &SteamId,
        app_id: u32,
        context_id: u64,
    ) -> Result<Vec<NamedItem>> {
        let url = self.inventory_url(steam_id, app_id, context_id);
        log::info!(
            "Fetching inventory for {} (app {}, context {})",
            steam_id,
            app_id,
            context_id
        );

        let response = self.fetcher.get(&url).await?;
        if !response.is_success() {
            return Err(SteamError::HttpStatus(response.status));
        }

        let payload: InventoryResponse = serde_json::from_str(&response.body)?;
        if !payload.success {
            let detail = payload
                .error
                .unwrap_or_else(|| "inventory request was not successful".to_string());
            return Err(SteamError::Upstream(detail));
        }
        if payload.is_truncated() {
            log::warn!(
                "Inventory of {} holds {} items, only the first {} are valued",
                steam_id,
                payload.total_inventory_count.unwrap_or_default(),
                payload.assets.len()
            );
        }

        let items = name_assets(payload);
        log::info!("Fetched {} inventory items for {}", items.len(), steam_id);
        Ok(items)
    }
}

/// Join assets with their descriptions, in asset order
pub fn name_assets(payload: InventoryResponse) -> Vec<NamedItem> {
    let index: HashMap<DescriptionKey, ItemDescription> = payload
        .descriptions
        .into_iter()
        .map(|d| (d.key(), d))
        .collect();

    payload
        .assets
        .iter()
        .map(|asset| {
            let description = index.get(&asset.key());
            if description.is_none() {
                log::debug!(
                    "No description for asset {} ({}_{})",
                    asset.asset_id,
                    asset.class_id,
                    asset.instance_id
                );
            }
            NamedItem::from_asset(asset, description)
        })
        .collect()
}

#[cfg(test)]
#[path = "inventory_tests.rs"]
mod tests;
