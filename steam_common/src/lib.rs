//! Shared types for Steam inventory valuation
//!
//! Inventory payloads, market price quotes, price-string parsing and the
//! error type used across the workspace.

pub mod error;
pub mod models;
pub mod price;

pub use error::{Result, SteamError};
pub use models::{
    AggregationResult, DescriptionKey, InventoryAsset, InventoryResponse, ItemDescription,
    NamedItem, PriceOverviewResponse, PriceQuote, PricedItem, SteamId,
};
pub use price::{parse_price, round_to_cents};
