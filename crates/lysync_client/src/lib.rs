//! # lysync Client
//!
//! Paginated read-only client for the remote academic-records API.
//!
//! This crate provides:
//! - [`HttpClient`] - HTTP GET abstraction (reqwest in production, a
//!   scripted mock in tests)
//! - [`ReqwestClient`] - blocking reqwest implementation with Basic auth
//! - [`PageFetcher`] - the page/size pagination loop with its termination
//!   rules and inter-page throttle
//! - The endpoint table for the known entity kinds, and a health probe
//!
//! ## Key Invariants
//!
//! - Only GET requests are ever issued; the remote system is never written
//! - A failed or malformed page truncates the fetch and returns the
//!   accumulated prefix; it never raises
//! - An empty page is the normal end-of-data signal, not an error
//! - Each fetcher instance owns its throttle state; independent entity
//!   kinds can fetch concurrently

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod endpoints;
mod error;
mod fetcher;
mod http;

pub use endpoints::{endpoint_for, ENDPOINTS};
pub use error::HttpError;
pub use fetcher::{FetchConfig, FetchResult, HealthStatus, PageFetcher};
pub use http::{HttpClient, HttpResponse, MockHttp, ReqwestClient};
