//! Profile reference → SteamID64 resolution

use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;
use steam_common::{Result, SteamError, SteamId};

use crate::config::ValuationConfig;
use crate::fetch::HttpFetch;

lazy_static! {
    /// `.../profiles/<steamid64>` links carry the id directly
    static ref PROFILE_ID_PATH: Regex = Regex::new(r"/profiles/(\d+)(?:[/?#]|$)").unwrap();
    /// Profile pages embed `"steamid":"<steamid64>"` in their inline JS
    static ref EMBEDDED_STEAM_ID: Regex = Regex::new(r#""steamid"\s*:\s*"(\d+)""#).unwrap();
}

/// Turns direct-id and vanity profile links into a canonical [`SteamId`]
pub struct IdentifierResolver {
    fetcher: Arc<dyn HttpFetch>,
    base_url: String,
}

impl IdentifierResolver {
    pub fn new(fetcher: Arc<dyn HttpFetch>, config: &ValuationConfig) -> Self {
        Self {
            fetcher,
            base_url: config.base_url().to_string(),
        }
    }

    /// Resolve a profile reference.
    ///
    /// Direct `/profiles/<id>` links never touch the network. Anything else is
    /// fetched once and the id is scraped from the page; a missing id is not
    /// retried.
    pub async fn resolve(&self, reference: &str) -> Result<SteamId> {
        let reference = reference.trim();

        if let Some(id) = extract_profile_id(reference) {
            log::debug!("Resolved {} locally to {}", reference, id);
            return Ok(id);
        }

        let url = self.profile_url(reference);
        log::info!("Resolving vanity profile: {}", url);

        let response = self.fetcher.get(&url).await?;
        if !response.is_success() {
            return Err(SteamError::HttpStatus(response.status));
        }

        let id = extract_embedded_id(&response.body).ok_or_else(|| {
            SteamError::Resolution(format!("no steamid found in profile page {}", url))
        })?;

        log::info!("Resolved {} to {}", reference, id);
        Ok(id)
    }

    /// Absolute URL for a reference that is not a direct-id link
    fn profile_url(&self, reference: &str) -> String {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            reference.to_string()
        } else if reference.starts_with('/') {
            format!("{}{}", self.base_url, reference)
        } else if reference.starts_with("id/") {
            format!("{}/{}", self.base_url, reference)
        } else {
            format!("https://{}", reference)
        }
    }
}

/// SteamID64 from a `/profiles/<digits>` reference, if it has that shape
pub fn extract_profile_id(reference: &str) -> Option<SteamId> {
    PROFILE_ID_PATH
        .captures(reference)
        .and_then(|caps| SteamId::new(&caps[1]))
}

/// SteamID64 embedded in a profile page body
pub fn extract_embedded_id(body: &str) -> Option<SteamId> {
    EMBEDDED_STEAM_ID
        .captures(body)
        .and_then(|caps| SteamId::new(&caps[1]))
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
