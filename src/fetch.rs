// 🌐 Page Fetch - Profile pages over HTTP
// Any non-success response aborts the command; nothing is retried

use crate::extractor::{OwnershipRecord, ProfilePage};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Player profile pages live under this prefix
pub const DEFAULT_PROFILE_BASE_URL: &str = "https://bandit.rip/player/@";

/// Per-request limit for profile fetches
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum FetchError {
    /// Server answered with a non-success status; displays the reason text
    #[error("{reason}")]
    Status { status: u16, reason: String },

    #[error("{0}")]
    Network(#[from] reqwest::Error),
}

// ============================================================================
// PAGE SOURCE
// ============================================================================

/// PageSource - anything that can turn a URL into page text
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// HTTP implementation backed by a shared reqwest client
#[derive(Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        HttpFetcher {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        HttpFetcher { client }
    }

    /// Fetcher whose requests give up after `timeout`
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(HttpFetcher::with_client(client))
    }
}

#[async_trait]
impl PageSource for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!(url, "fetching page");
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let reason = status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.as_str().to_string());
            warn!(url, status = status.as_u16(), "page fetch failed");
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason,
            });
        }

        Ok(response.text().await?)
    }
}

// ============================================================================
// PROFILE QUERIES
// ============================================================================

/// Profile page URL for a player
pub fn profile_url(base: &str, username: &str) -> String {
    format!("{}{}", base, urlencoding::encode(username))
}

/// Fetch a profile page and extract its skin records
pub async fn fetch_skins(
    source: &dyn PageSource,
    url: &str,
) -> Result<Vec<OwnershipRecord>, FetchError> {
    let html = source.fetch(url).await?;
    Ok(ProfilePage::parse(&html).skin_records())
}

/// Fetch a profile page and extract its coin balance
pub async fn fetch_coins(source: &dyn PageSource, url: &str) -> Result<u64, FetchError> {
    let html = source.fetch(url).await?;
    Ok(ProfilePage::parse(&html).coins())
}

// ============================================================================
// TESTS
// ============================================================================
