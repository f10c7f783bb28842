//! Error types for Steam upstream operations

use thiserror::Error;

/// Unified error type for profile resolution and inventory retrieval
#[derive(Debug, Error)]
pub enum SteamError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Failed to parse JSON response
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// HTTP error status code
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),
    /// Steam answered, but flagged the payload as unsuccessful
    #[error("Steam returned an error: {0}")]
    Upstream(String),
    /// No SteamID64 could be derived from the profile reference
    #[error("Could not resolve steamid: {0}")]
    Resolution(String),
}

/// Result alias for Steam operations
pub type Result<T> = std::result::Result<T, SteamError>;
