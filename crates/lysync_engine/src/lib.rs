//! # lysync Engine
//!
//! The synchronization engine of the lysync mirror.
//!
//! This crate provides:
//! - [`normalize`] - raw remote record to normalized local field set
//! - [`reconcile`] - per-record insert / update / skip / error decision
//! - [`Orchestrator`] - one full run (fetch, normalize, reconcile, commit)
//!   producing [`SyncRunStats`]
//! - [`SyncConfig`] - per-run configuration, validated at construction
//!
//! ## Architecture
//!
//! One orchestrator instance drives one entity kind through the run state
//! machine (init, fetching, reconciling, committing, done), sequentially,
//! record by record. Independent entity kinds synchronize concurrently on
//! independent orchestrators; they never share a transaction.
//!
//! ## Key Invariants
//!
//! - A run never raises to its caller; it always returns a stats object
//! - `inserted + updated + skipped + errors == total_fetched` (a failed
//!   commit adds its own error on top, see [`SyncRunStats::is_balanced`])
//! - Record-level failures are isolated and counted, never propagated
//! - Only the final commit can negate a run's effect, and it rolls back
//!   everything
//! - The stamp-skip check is an optimization: a stale or missing stamp
//!   falls through to an idempotent full re-apply

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod normalize;
mod orchestrator;
mod reconcile;
mod stats;

pub use config::SyncConfig;
pub use error::{SyncError, SyncResult};
pub use normalize::normalize;
pub use orchestrator::{Orchestrator, RunState};
pub use reconcile::{reconcile, Outcome};
pub use stats::SyncRunStats;
