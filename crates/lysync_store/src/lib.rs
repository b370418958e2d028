//! # lysync Store Boundary
//!
//! The persistence seam of the lysync mirror engine.
//!
//! This crate provides:
//! - [`LocalEntity`] - the persisted counterpart of one remote record
//! - [`EntityStore`] - the trait the reconciliation engine mutates through
//!   (stamp snapshot, point lookup, insert, update, commit/rollback)
//! - [`MemoryStore`] - a staged/committed in-memory implementation used by
//!   tests and dry runs
//!
//! A relational backend implements [`EntityStore`] behind the same
//! contract; schema and migrations live outside this workspace.
//!
//! ## Key Invariants
//!
//! - `unique_key` is unique per entity kind and never mutated
//! - `created_at` is set once, at insert, and never mutated
//! - Entities are only ever written through the reconciliation engine; the
//!   store is exclusively owned by one run while it mutates
//! - `commit` persists all mutations since the last commit or none of them

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod entity;
mod error;
mod memory;
mod store;

pub use entity::LocalEntity;
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use store::{EntityStore, StampSnapshot};
