//! Paginated fetch loop.

use crate::endpoints;
use crate::http::HttpClient;
use chrono::{DateTime, Utc};
use lysync_record::RemoteRecord;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Configuration for the pagination loop.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Base URL of the remote API, without a trailing slash.
    pub base_url: String,
    /// Records requested per page.
    pub page_size: u32,
    /// Pause between page requests, to respect the remote rate limits.
    pub page_delay: Duration,
    /// Defensive page cap. `None` fetches until the remote signals
    /// end-of-data.
    pub max_pages: Option<u32>,
}

impl FetchConfig {
    /// Creates a configuration with the default page size and throttle.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            page_size: 100,
            page_delay: Duration::from_millis(500),
            max_pages: None,
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

    /// Sets the defensive page cap.
    pub fn with_max_pages(mut self, max: u32) -> Self {
        self.max_pages = Some(max);
        self
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::new("")
    }
}

/// Result of one complete fetch.
///
/// Always a value, never an error: a failed page truncates the result and
/// sets [`truncated`](Self::truncated).
#[derive(Debug, Clone, Default)]
pub struct FetchResult {
    /// All records accumulated, in remote page order.
    pub records: Vec<RemoteRecord>,
    /// Number of non-empty pages consumed.
    pub pages_fetched: u32,
    /// True when pagination stopped for any reason other than the normal
    /// empty-page signal.
    pub truncated: bool,
}

/// Outcome of a remote health probe.
#[derive(Debug, Clone)]
pub struct HealthStatus {
    /// Whether the remote API answered the probe.
    pub online: bool,
    /// Human-readable detail.
    pub message: String,
    /// When the probe ran.
    pub checked_at: DateTime<Utc>,
}

/// Fetches every page of one remote endpoint.
///
/// Each instance owns its client and throttle state; independent entity
/// kinds run on independent fetchers.
pub struct PageFetcher<C: HttpClient> {
    config: FetchConfig,
    client: C,
}

impl<C: HttpClient> PageFetcher<C> {
    /// Creates a fetcher.
    pub fn new(config: FetchConfig, client: C) -> Self {
        Self { config, client }
    }

    /// Returns the fetch configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetches all pages of `path`, merging `extra` filter parameters into
    /// every request.
    ///
    /// Termination, checked in order: request failure (truncates),
    /// unrecognized body shape (truncates), empty record list (normal end).
    pub fn fetch_all(&self, path: &str, extra: &[(String, String)]) -> FetchResult {
        let mut result = FetchResult::default();
        let mut page = 0u32;

        loop {
            if let Some(cap) = self.config.max_pages {
                if page >= cap {
                    warn!(page, cap, "page cap reached, stopping pagination");
                    result.truncated = true;
                    break;
                }
            }

            let mut query = vec![
                ("page".to_string(), page.to_string()),
                ("size".to_string(), self.config.page_size.to_string()),
            ];
            query.extend(extra.iter().cloned());

            let url = self.url_for(path);
            let response = match self.client.get(&url, &query) {
                Ok(response) => response,
                Err(e) => {
                    warn!(page, error = %e, "page request failed, stopping pagination");
                    result.truncated = true;
                    break;
                }
            };

            let items = match parse_page(&response.body) {
                Some(items) => items,
                None => {
                    error!(page, "unexpected response shape, stopping pagination");
                    result.truncated = true;
                    break;
                }
            };

            if items.is_empty() {
                debug!(page, "empty page, end of data");
                break;
            }

            for item in items {
                match item {
                    Value::Object(map) => result.records.push(map),
                    _ => warn!(page, "dropping non-object record"),
                }
            }
            result.pages_fetched += 1;
            info!(page, total = result.records.len(), "page fetched");

            page += 1;
            if !self.config.page_delay.is_zero() {
                std::thread::sleep(self.config.page_delay);
            }
        }

        result
    }

    /// Probes the remote API with a single one-record request.
    pub fn health_check(&self) -> HealthStatus {
        let url = self.url_for(endpoints::endpoint_for("alunos").unwrap_or("/v2/tabela/alunos"));
        let query = vec![
            ("page".to_string(), "0".to_string()),
            ("size".to_string(), "1".to_string()),
        ];
        match self.client.get(&url, &query) {
            Ok(_) => HealthStatus {
                online: true,
                message: "remote API responding".into(),
                checked_at: Utc::now(),
            },
            Err(e) => HealthStatus {
                online: false,
                message: e.to_string(),
                checked_at: Utc::now(),
            },
        }
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

/// Extracts the record list from a page body.
///
/// Accepts `{"data": [...]}` or a bare array; anything else is an
/// unrecognized shape.
fn parse_page(body: &[u8]) -> Option<Vec<Value>> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value {
        Value::Object(mut obj) => match obj.remove("data") {
            Some(Value::Array(items)) => Some(items),
            _ => None,
        },
        Value::Array(items) => Some(items),
        _ => None,
    }
}
