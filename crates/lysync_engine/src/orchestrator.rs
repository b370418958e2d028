//! The sync run state machine.

use crate::config::SyncConfig;
use crate::error::SyncResult;
use crate::normalize::normalize;
use crate::reconcile::reconcile;
use crate::stats::SyncRunStats;
use lysync_client::{HttpClient, PageFetcher};
use lysync_record::EntityMapping;
use lysync_store::{EntityStore, StampSnapshot};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{error, info, warn};

/// The state of a sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// No run started yet.
    Init,
    /// Paginating the remote endpoint.
    Fetching,
    /// Normalizing and reconciling records.
    Reconciling,
    /// Persisting the run's mutations.
    Committing,
    /// Run finished; its mutations are durable.
    Done,
    /// The commit failed; the run was rolled back. Reachable only from
    /// [`RunState::Committing`].
    Failed,
}

/// Drives one entity kind through a complete sync run.
///
/// Owns its fetcher, store handle, mapping, and state: multiple entity
/// kinds synchronize concurrently on independent orchestrators, each with
/// its own transaction scope.
pub struct Orchestrator<C: HttpClient, S: EntityStore> {
    config: SyncConfig,
    mapping: EntityMapping,
    fetcher: PageFetcher<C>,
    store: Arc<S>,
    state: RwLock<RunState>,
}

impl<C: HttpClient, S: EntityStore> Orchestrator<C, S> {
    /// Creates an orchestrator.
    ///
    /// Fails only on missing connection parameters; this is the engine's
    /// single construction-time fatal path.
    pub fn new(
        config: SyncConfig,
        mapping: EntityMapping,
        client: C,
        store: Arc<S>,
    ) -> SyncResult<Self> {
        config.validate()?;
        let fetcher = PageFetcher::new(config.fetch_config(), client);
        Ok(Self {
            config,
            mapping,
            fetcher,
            store,
            state: RwLock::new(RunState::Init),
        })
    }

    /// Returns the current run state.
    pub fn state(&self) -> RunState {
        *self.state.read()
    }

    /// Returns the entity mapping this orchestrator synchronizes.
    pub fn mapping(&self) -> &EntityMapping {
        &self.mapping
    }

    fn set_state(&self, state: RunState) {
        *self.state.write() = state;
    }

    /// Executes one sync run and returns its statistics.
    ///
    /// Never raises: transport failures truncate the fetch, record
    /// failures are counted, and a commit failure rolls the run back and
    /// is reported through the stats. Safe to invoke from a background
    /// task.
    pub fn run(&self, incremental: bool) -> SyncRunStats {
        let kind = self.mapping.kind;
        let mut stats = SyncRunStats::start();
        self.set_state(RunState::Init);
        info!(kind, incremental, "sync run starting");

        let snapshot = if incremental {
            self.load_snapshot()
        } else {
            StampSnapshot::new()
        };

        self.set_state(RunState::Fetching);
        let fetched = self
            .fetcher
            .fetch_all(self.mapping.endpoint, &self.config.filters);
        if fetched.truncated {
            warn!(
                kind,
                pages = fetched.pages_fetched,
                records = fetched.records.len(),
                "fetch truncated, reconciling partial result"
            );
        }
        stats.total_fetched = fetched.records.len() as u64;

        if fetched.records.is_empty() {
            warn!(kind, "no records fetched");
            self.set_state(RunState::Done);
            stats.finish();
            return stats;
        }

        self.set_state(RunState::Reconciling);
        for (i, raw) in fetched.records.iter().enumerate() {
            let normalized = normalize(&self.mapping, raw);
            let outcome = reconcile(
                self.store.as_ref(),
                &self.mapping,
                &normalized,
                &snapshot,
                incremental,
            );
            stats.record(outcome);

            let processed = (i + 1) as u64;
            if self.config.log_every > 0 && processed % self.config.log_every == 0 {
                info!(kind, processed, total = stats.total_fetched, "progress");
            }
        }

        self.set_state(RunState::Committing);
        match self.store.commit() {
            Ok(()) => {
                self.set_state(RunState::Done);
            }
            Err(e) => {
                error!(kind, error = %e, "commit failed, rolling back run");
                if let Err(rollback_err) = self.store.rollback() {
                    error!(kind, error = %rollback_err, "rollback failed");
                }
                // Decision counters are kept as attempted work; the commit
                // failure is its own error.
                stats.errors += 1;
                stats.commit_failed = true;
                self.set_state(RunState::Failed);
            }
        }

        stats.finish();
        info!(
            kind,
            total = stats.total_fetched,
            inserted = stats.inserted,
            updated = stats.updated,
            skipped = stats.skipped,
            errors = stats.errors,
            duration_seconds = stats.duration_seconds,
            "sync run finished"
        );
        stats
    }

    /// Loads the key/stamp snapshot for incremental mode.
    ///
    /// A failed load degrades to an empty snapshot: every record then
    /// falls through the stamp check into a full re-apply, which is
    /// correct, just slower.
    fn load_snapshot(&self) -> StampSnapshot {
        match self.store.stamp_snapshot(self.mapping.kind) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(
                    kind = self.mapping.kind,
                    error = %e,
                    "stamp snapshot load failed, re-applying all records"
                );
                StampSnapshot::new()
            }
        }
    }
}
