//! `lysync sync` - run one sync and print its statistics.

use super::Credentials;
use lysync_client::ReqwestClient;
use lysync_engine::{Orchestrator, SyncConfig, SyncRunStats};
use lysync_record::EntityMapping;
use lysync_store::MemoryStore;
use std::sync::Arc;
use std::time::Duration;

/// Runs a sync for one entity kind.
///
/// The run reconciles into an in-memory store: a dry-run mirror. A
/// persistent backend slots in behind the same `EntityStore` trait.
#[allow(clippy::too_many_arguments)]
pub fn run(
    credentials: &Credentials,
    entity: &str,
    incremental: bool,
    page_size: Option<u32>,
    max_pages: Option<u32>,
    delay_ms: Option<u64>,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mapping = EntityMapping::for_kind(entity).ok_or_else(|| {
        format!(
            "unknown entity kind {entity:?} (known: {})",
            EntityMapping::known_kinds().join(", ")
        )
    })?;

    let mut config = SyncConfig::new(
        credentials.base_url.clone(),
        credentials.username.clone(),
        credentials.password.clone(),
    );
    if let Some(size) = page_size {
        config = config.with_page_size(size);
    }
    if let Some(max) = max_pages {
        config = config.with_max_pages(max);
    }
    if let Some(ms) = delay_ms {
        config = config.with_page_delay(Duration::from_millis(ms));
    }

    let client = ReqwestClient::new(&config.username, &config.password, config.timeout)?;
    let store = Arc::new(MemoryStore::new());
    let orchestrator = Orchestrator::new(config, mapping, client, store)?;

    let stats = orchestrator.run(incremental);

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&stats)?),
        _ => print_text(entity, &stats),
    }
    Ok(())
}

fn print_text(entity: &str, stats: &SyncRunStats) {
    println!("Sync of {entity}");
    println!("  fetched:  {}", stats.total_fetched);
    println!("  inserted: {}", stats.inserted);
    println!("  updated:  {}", stats.updated);
    println!("  skipped:  {}", stats.skipped);
    println!("  errors:   {}", stats.errors);
    if stats.commit_failed {
        println!("  commit:   FAILED (run rolled back)");
    }
    println!("  duration: {:.2}s", stats.duration_seconds);
}
