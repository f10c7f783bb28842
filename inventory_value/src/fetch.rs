//! Outbound HTTP capability
//!
//! Everything that talks to Steam goes through [`HttpFetch`], so resolver,
//! inventory and price logic can run against a stub in tests.

use async_trait::async_trait;
use reqwest::StatusCode;
use steam_common::Result;

use crate::config::ValuationConfig;

/// Status and body of a completed GET
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: StatusCode,
    pub body: String,
}

impl FetchResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Given a URL, return a status + body or fail.
///
/// Non-2xx statuses are returned, not raised; only transport failures
/// (connect errors, timeouts, unreadable bodies) are errors.
#[async_trait]
pub trait HttpFetch: Send + Sync {
    async fn get(&self, url: &str) -> Result<FetchResponse>;
}

/// reqwest-backed fetcher with a browser-like user agent and bounded timeout
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(config: &ValuationConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetcher {
    async fn get(&self, url: &str) -> Result<FetchResponse> {
        log::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        Ok(FetchResponse { status, body })
    }
}

#[cfg(test)]
pub(crate) use stub::StubFetcher;


#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use steam_common::SteamError;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn returns_status_and_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ping"))
            .and(header("user-agent", "Mozilla/5.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
            .mount(&mock_server)
            .await;

        let fetcher = ReqwestFetcher::new(&ValuationConfig::default()).unwrap();
        let response = fetcher
            .get(&format!("{}/ping", mock_server.uri()))
            .await
            .unwrap();

        assert!(response.is_success());
        assert_eq!(response.body, "pong");
    }

    #[tokio::test]
    async fn error_statuses_are_not_errors() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .mount(&mock_server)
            .await;

        let fetcher = ReqwestFetcher::new(&ValuationConfig::default()).unwrap();
        let response = fetcher.get(&mock_server.uri()).await.unwrap();

        assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn hung_upstream_times_out() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&mock_server)
            .await;

        let config = ValuationConfig {
            request_timeout: Duration::from_millis(100),
            ..ValuationConfig::default()
        };
        let fetcher = ReqwestFetcher::new(&config).unwrap();

        match fetcher.get(&mock_server.uri()).await {
            Err(SteamError::Network(e)) => assert!(e.is_timeout()),
            other => panic!("Expected SteamError::Network timeout, got: {other:?}"),
        }
    }
}
