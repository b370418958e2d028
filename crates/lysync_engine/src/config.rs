//! Configuration for sync runs.

use crate::error::{SyncError, SyncResult};
use lysync_client::FetchConfig;
use std::time::Duration;

/// Configuration for one orchestrator.
///
/// Owned by the orchestrator instance; there is no shared module-level
/// state, so runs for different entity kinds configure and throttle
/// independently.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Base URL of the remote API.
    pub base_url: String,
    /// Basic-auth username.
    pub username: String,
    /// Basic-auth password.
    pub password: String,
    /// Records requested per page.
    pub page_size: u32,
    /// Pause between page requests.
    pub page_delay: Duration,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
    /// Defensive page cap; `None` fetches until the remote signals done.
    pub max_pages: Option<u32>,
    /// Progress log cadence in records; 0 disables progress logging.
    pub log_every: u64,
    /// Extra filter parameters merged into every page request.
    pub filters: Vec<(String, String)>,
}

impl SyncConfig {
    /// Creates a configuration with default pagination and throttle
    /// settings.
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            username: username.into(),
            password: password.into(),
            page_size: 100,
            page_delay: Duration::from_millis(500),
            timeout: Duration::from_secs(30),
            max_pages: None,
            log_every: 100,
            filters: Vec::new(),
        }
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    /// Sets the inter-page delay.
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the defensive page cap.
    pub fn with_max_pages(mut self, max: u32) -> Self {
        self.max_pages = Some(max);
        self
    }

    /// Sets the progress log cadence.
    pub fn with_log_every(mut self, every: u64) -> Self {
        self.log_every = every;
        self
    }

    /// Adds a filter parameter sent with every page request.
    pub fn with_filter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((name.into(), value.into()));
        self
    }

    /// Validates the required connection parameters.
    ///
    /// This is the engine's only startup-time fatal path; everything after
    /// construction degrades into counters instead of errors.
    pub fn validate(&self) -> SyncResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(SyncError::MissingConfig("base_url"));
        }
        if self.username.trim().is_empty() {
            return Err(SyncError::MissingConfig("username"));
        }
        if self.password.trim().is_empty() {
            return Err(SyncError::MissingConfig("password"));
        }
        Ok(())
    }

    /// Derives the fetcher configuration.
    pub fn fetch_config(&self) -> FetchConfig {
        let mut config = FetchConfig::new(self.base_url.clone())
            .with_page_size(self.page_size)
            .with_page_delay(self.page_delay);
        if let Some(max) = self.max_pages {
            config = config.with_max_pages(max);
        }
        config
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::new("", "", "")
    }
}
