//! HTTP client for the country-scoped customer-review feed.

mod paginate;

use std::time::Duration;

use ireviews_core::HarvesterConfig;
use reqwest::{Client, StatusCode};

use crate::error::HarvestError;

/// Outcome of fetching one page that does not abort the harvest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// HTTP 200 with the page body.
    Success(String),
    /// HTTP 403: the feed refuses to paginate further for this country.
    /// Not an error; treated as end of data.
    SoftStop,
}

/// How a response status is handled by the harvester.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusClass {
    Success,
    SoftStop,
    Fatal,
}

/// Classifies a feed response status. Only 200 carries data and only 403 is a
/// recognised stop signal; every other status aborts the harvest.
pub(crate) fn classify_status(status: StatusCode) -> StatusClass {
    match status {
        StatusCode::OK => StatusClass::Success,
        StatusCode::FORBIDDEN => StatusClass::SoftStop,
        _ => StatusClass::Fatal,
    }
}

/// HTTP client for the customer-review feed service.
///
/// A single failed request is fatal: there is no retry. Cloning is cheap and
/// clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
    base_url: String,
    max_pages: usize,
}

impl FeedClient {
    /// Creates a `FeedClient` from harvester configuration.
    ///
    /// # Errors
    ///
    /// - [`HarvestError::InvalidBaseUrl`] if `feed_base_url` does not parse.
    /// - [`HarvestError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed (e.g., invalid TLS config).
    pub fn new(config: &HarvesterConfig) -> Result<Self, HarvestError> {
        let base_url = config.feed_base_url.trim_end_matches('/').to_owned();
        reqwest::Url::parse(&base_url).map_err(|e| HarvestError::InvalidBaseUrl {
            base_url: base_url.clone(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url,
            max_pages: config.max_pages.max(1),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches one feed page and classifies the response.
    ///
    /// # Errors
    ///
    /// - [`HarvestError::UnexpectedStatus`] — any status other than 200 or 403.
    /// - [`HarvestError::Http`] — network failure, timeout, or unreadable body.
    pub async fn fetch_page(&self, url: &str) -> Result<PageOutcome, HarvestError> {
        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "application/json,application/atom+xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await?;
        let status = response.status();

        match classify_status(status) {
            StatusClass::Success => Ok(PageOutcome::Success(response.text().await?)),
            StatusClass::SoftStop => {
                tracing::debug!(url, status = status.as_u16(), "feed refused page");
                Ok(PageOutcome::SoftStop)
            }
            StatusClass::Fatal => Err(HarvestError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
