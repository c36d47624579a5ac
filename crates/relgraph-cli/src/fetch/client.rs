//! HTTP client for the release-notes site

use crate::error::Result;
use crate::fetch::endpoints;
use crate::version::VersionIdentity;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("relgraph/", env!("CARGO_PKG_VERSION"));

/// Fetches the release index and per-version release notes
pub struct ReleaseNotesClient {
    client: Client,
    base_url: String,
}

impl ReleaseNotesClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Download the page listing every release
    pub async fn fetch_index(&self) -> Result<String> {
        self.get_text(&endpoints::release_index_url(&self.base_url))
            .await
    }

    /// Download the release note of `version`
    pub async fn fetch_release_note(&self, version: &VersionIdentity) -> Result<String> {
        self.get_text(&endpoints::release_note_url(&self.base_url, version))
            .await
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        debug!(url, "Fetching");
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}
