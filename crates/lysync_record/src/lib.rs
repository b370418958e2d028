//! # lysync Record Model
//!
//! Shared value model for the lysync mirror engine.
//!
//! This crate provides:
//! - [`FieldValue`] - the typed local value a remote scalar coerces into
//! - Safe coercion functions ([`to_int`], [`to_timestamp`], ...) that are
//!   total: any input yields `Some` or `None`, never a panic
//! - [`RemoteRecord`] / [`NormalizedRecord`] - one record before and after
//!   normalization
//! - [`EntityMapping`] - the per-entity-kind configuration (endpoint, unique
//!   field, change-stamp field, field map) consumed by the generic engine
//!
//! ## Key Invariants
//!
//! - Coercion never fails and never partially mutates state
//! - A `NormalizedRecord` always exists, even when every coercion failed
//!   (its unique key is then absent and the engine treats it as
//!   unprocessable)
//! - Field maps are plain values, not trait hierarchies: one engine, many
//!   mappings

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod coerce;
mod mapping;
mod record;
mod value;

pub use coerce::{
    to_bounded_flag, to_float, to_int, to_timestamp, to_trimmed_string, Coercion, YES_NO,
};
pub use mapping::{EntityMapping, FieldRule};
pub use record::{NormalizedRecord, RemoteRecord};
pub use value::FieldValue;
