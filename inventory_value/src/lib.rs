//! Inventory Value - Steam inventory valuation service
//!
//! Resolves a Steam Community profile reference, downloads the inventory and
//! sums the lowest Community Market listing of every owned item.

pub mod aggregator;
pub mod clock;
pub mod config;
pub mod fetch;
pub mod inventory;
pub mod price;
pub mod rate_limit;
pub mod resolver;
pub mod valuation;
pub mod web;

pub use aggregator::Aggregator;
pub use clock::{Clock, TokioClock};
pub use config::ValuationConfig;
pub use fetch::{FetchResponse, HttpFetch, ReqwestFetcher};
pub use inventory::InventoryFetcher;
pub use price::PriceLookup;
pub use rate_limit::RequestPacer;
pub use resolver::IdentifierResolver;
pub use valuation::{InventoryValuator, ValuationOverrides};

pub use steam_common::{AggregationResult, NamedItem, PriceQuote, Result, SteamError, SteamId};
