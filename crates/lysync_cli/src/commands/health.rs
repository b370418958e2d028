//! `lysync health` - probe the remote API.

use super::Credentials;
use lysync_client::{FetchConfig, PageFetcher, ReqwestClient};
use std::time::Duration;

/// Probes the remote API with a single one-record request.
pub fn run(credentials: &Credentials) -> Result<(), Box<dyn std::error::Error>> {
    if credentials.base_url.trim().is_empty() {
        return Err("missing required configuration: base_url".into());
    }

    let client = ReqwestClient::new(
        &credentials.username,
        &credentials.password,
        Duration::from_secs(30),
    )?;
    let fetcher = PageFetcher::new(FetchConfig::new(credentials.base_url.clone()), client);

    let status = fetcher.health_check();
    let state = if status.online { "online" } else { "offline" };
    println!("{state}: {} ({})", status.message, status.checked_at);
    Ok(())
}
