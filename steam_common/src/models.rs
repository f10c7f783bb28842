//! Steam inventory and market data models

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::price::{parse_price, round_to_cents};

/// Canonical 64-bit Steam account identifier, kept as its decimal string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SteamId(String);

impl SteamId {
    /// Wrap an id that was captured as a run of ASCII digits.
    ///
    /// Returns `None` for empty or non-numeric input.
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(id))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SteamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Composite key shared by assets and descriptions
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DescriptionKey {
    pub class_id: String,
    pub instance_id: String,
}

/// One owned unit in an inventory (`assets[]` in the inventory payload)
#[derive(Debug, Deserialize, Clone)]
pub struct InventoryAsset {
    #[serde(rename = "assetid", deserialize_with = "string_or_number")]
    pub asset_id: String,
    #[serde(rename = "classid", deserialize_with = "string_or_number")]
    pub class_id: String,
    #[serde(
        rename = "instanceid",
        default = "default_instance_id",
        deserialize_with = "string_or_number"
    )]
    pub instance_id: String,
}

impl InventoryAsset {
    pub fn key(&self) -> DescriptionKey {
        DescriptionKey {
            class_id: self.class_id.clone(),
            instance_id: self.instance_id.clone(),
        }
    }
}

/// Shared item metadata (`descriptions[]` in the inventory payload)
#[derive(Debug, Deserialize, Clone)]
pub struct ItemDescription {
    #[serde(rename = "classid", deserialize_with = "string_or_number")]
    pub class_id: String,
    #[serde(
        rename = "instanceid",
        default = "default_instance_id",
        deserialize_with = "string_or_number"
    )]
    pub instance_id: String,
    #[serde(default)]
    pub market_hash_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub item_type: Option<String>,
}

impl ItemDescription {
    pub fn key(&self) -> DescriptionKey {
        DescriptionKey {
            class_id: self.class_id.clone(),
            instance_id: self.instance_id.clone(),
        }
    }

    /// Market name used for price lookups, falling back to the display name
    pub fn display_name(&self) -> Option<&str> {
        non_empty(self.market_hash_name.as_deref()).or_else(|| non_empty(self.name.as_deref()))
    }
}

/// Inventory endpoint payload: `{ success, assets, descriptions }`
#[derive(Debug, Deserialize)]
pub struct InventoryResponse {
    #[serde(default, deserialize_with = "flag")]
    pub success: bool,
    #[serde(default)]
    pub assets: Vec<InventoryAsset>,
    #[serde(default)]
    pub descriptions: Vec<ItemDescription>,
    #[serde(default)]
    pub total_inventory_count: Option<u64>,
    /// Steam's error text, present on some failure payloads
    #[serde(default, alias = "Error")]
    pub error: Option<String>,
}

impl InventoryResponse {
    /// True when Steam reports more items than the page carried
    pub fn is_truncated(&self) -> bool {
        self.total_inventory_count.is_some_and(|total| total > self.assets.len() as u64)
    }
}

/// Price overview endpoint payload
#[derive(Debug, Deserialize)]
pub struct PriceOverviewResponse {
    #[serde(default, deserialize_with = "flag")]
    pub success: bool,
    #[serde(default)]
    pub lowest_price: Option<String>,
    #[serde(default)]
    pub median_price: Option<String>,
    #[serde(default)]
    pub volume: Option<String>,
}

impl PriceOverviewResponse {
    /// Quote carried by a successful payload
    pub fn into_quote(self) -> Option<PriceQuote> {
        if !self.success {
            return None;
        }
        Some(PriceQuote {
            lowest_price: self.lowest_price,
            median_price: self.median_price,
            volume: self.volume,
        })
    }
}

/// The per-asset projection the valuation works on
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct NamedItem {
    pub asset_id: String,
    pub class_id: String,
    pub instance_id: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
}

impl NamedItem {
    /// Project an asset through its (possibly missing) description
    pub fn from_asset(asset: &InventoryAsset, description: Option<&ItemDescription>) -> Self {
        Self {
            asset_id: asset.asset_id.clone(),
            class_id: asset.class_id.clone(),
            instance_id: asset.instance_id.clone(),
            name: description.and_then(|d| d.display_name()).map(str::to_string),
            item_type: description.and_then(|d| d.item_type.clone()),
        }
    }
}

/// Market quote as reported by the price overview endpoint (raw formatted strings)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct PriceQuote {
    pub lowest_price: Option<String>,
    pub median_price: Option<String>,
    pub volume: Option<String>,
}

impl PriceQuote {
    /// Numeric value of the lowest listing
    pub fn lowest_value(&self) -> Option<f64> {
        parse_price(self.lowest_price.as_deref())
    }
}

/// A named item with the quote that was found for its name, if any
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PricedItem {
    #[serde(flatten)]
    pub item: NamedItem,
    pub price: Option<PriceQuote>,
}

impl PricedItem {
    /// Lowest price of this copy, if it was priced and the price parsed
    pub fn value(&self) -> Option<f64> {
        self.price.as_ref().and_then(PriceQuote::lowest_value)
    }
}

/// Outcome of valuing one inventory
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct AggregationResult {
    pub items: Vec<PricedItem>,
    pub total_value: f64,
    pub unique_names: usize,
}

impl AggregationResult {
    /// Total rounded to 2 decimals for presentation
    pub fn rounded_total(&self) -> f64 {
        round_to_cents(self.total_value)
    }

    /// Number of owned copies that contributed to the total
    pub fn priced_count(&self) -> usize {
        self.items.iter().filter(|i| i.value().is_some()).count()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

fn default_instance_id() -> String {
    "0".to_string()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }
    }
}

/// Steam sends ids as strings, but older endpoints emit bare numbers
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(String::from)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Number(i64),
}

/// `success` is `true` on the market endpoints and `1` on the inventory endpoint
fn flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(b)) => b,
        Some(Flag::Number(n)) => n == 1,
        None => false,
    })
}

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;
