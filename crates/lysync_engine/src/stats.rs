//! Run statistics.

use crate::reconcile::Outcome;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Statistics for one sync run.
///
/// Counters reflect the engine's in-memory decisions. After a commit
/// failure the persisted state is empty but the counters keep the
/// attempted work, with `commit_failed` set and one extra error counted
/// for the commit itself; the operational question after a rollback is how
/// far the run got, and this is the only record of it.
#[derive(Debug, Clone, Serialize)]
pub struct SyncRunStats {
    /// Records returned by the fetch, across all pages.
    pub total_fetched: u64,
    /// Records that created a new local entity.
    pub inserted: u64,
    /// Records that overwrote an existing local entity.
    pub updated: u64,
    /// Records without a usable key, or unchanged under incremental mode.
    pub skipped: u64,
    /// Isolated record-level failures, plus one for a failed commit.
    pub errors: u64,
    /// True when the final commit failed and the run was rolled back.
    pub commit_failed: bool,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the run finished; set exactly once, at the end.
    pub finished_at: Option<DateTime<Utc>>,
    /// Run duration in seconds.
    pub duration_seconds: f64,
}

impl SyncRunStats {
    /// Starts a new stats record at the current time.
    pub fn start() -> Self {
        Self {
            total_fetched: 0,
            inserted: 0,
            updated: 0,
            skipped: 0,
            errors: 0,
            commit_failed: false,
            started_at: Utc::now(),
            finished_at: None,
            duration_seconds: 0.0,
        }
    }

    /// Counts one reconciliation outcome.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Inserted => self.inserted += 1,
            Outcome::Updated => self.updated += 1,
            Outcome::Skipped => self.skipped += 1,
            Outcome::Errored => self.errors += 1,
        }
    }

    /// Marks the run finished and computes the duration.
    pub fn finish(&mut self) {
        let now = Utc::now();
        self.finished_at = Some(now);
        self.duration_seconds = (now - self.started_at)
            .to_std()
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);
    }

    /// Checks the run invariant: every fetched record is accounted for by
    /// exactly one counter, with a failed commit contributing one extra
    /// error.
    pub fn is_balanced(&self) -> bool {
        self.inserted + self.updated + self.skipped + self.errors
            == self.total_fetched + u64::from(self.commit_failed)
    }
}
