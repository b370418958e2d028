//! HTTP GET abstraction.
//!
//! The fetcher talks to the remote API through the [`HttpClient`] trait so
//! the HTTP library is swappable and tests can script exact page
//! sequences. The production implementation is blocking reqwest.

use crate::error::HttpError;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::time::Duration;

/// A successful HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status code (always 2xx; non-success statuses are errors).
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

/// HTTP client abstraction.
///
/// Implementations issue exactly one GET request per call. Only GET is
/// modeled: the mirror never writes back to the remote system.
pub trait HttpClient: Send + Sync {
    /// Sends a GET request with the given query parameters.
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<HttpResponse, HttpError>;
}

impl<C: HttpClient + ?Sized> HttpClient for std::sync::Arc<C> {
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<HttpResponse, HttpError> {
        (**self).get(url, query)
    }
}

/// Blocking reqwest-based client with Basic authentication.
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
    username: String,
    password: String,
}

impl ReqwestClient {
    /// Creates a client with the given credentials and per-request
    /// timeout.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, HttpError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            username: username.into(),
            password: password.into(),
        })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<HttpResponse, HttpError> {
        tracing::debug!(url, ?query, "GET");
        let response = self
            .client
            .get(url)
            .query(query)
            .basic_auth(&self.username, Some(&self.password))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    HttpError::Timeout
                } else {
                    HttpError::Transport(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            return Err(HttpError::Status { status });
        }

        let body = response
            .bytes()
            .map_err(|e| HttpError::Transport(e.to_string()))?
            .to_vec();
        Ok(HttpResponse { status, body })
    }
}

/// A scripted mock client for tests.
///
/// Responses are consumed in order; running past the script is a transport
/// error. Every call is recorded so tests can assert request counts and
/// page parameters.
#[derive(Debug, Default)]
pub struct MockHttp {
    responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl MockHttp {
    /// Creates an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts a 200 response with a JSON body.
    pub fn push_json(&self, body: serde_json::Value) {
        self.responses.lock().push_back(Ok(HttpResponse {
            status: 200,
            body: body.to_string().into_bytes(),
        }));
    }

    /// Scripts a 200 response with a raw (possibly malformed) body.
    pub fn push_raw(&self, body: &str) {
        self.responses.lock().push_back(Ok(HttpResponse {
            status: 200,
            body: body.as_bytes().to_vec(),
        }));
    }

    /// Scripts an error.
    pub fn push_error(&self, error: HttpError) {
        self.responses.lock().push_back(Err(error));
    }

    /// Number of requests issued so far.
    pub fn request_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Query parameters of each recorded request, in order.
    pub fn queries(&self) -> Vec<Vec<(String, String)>> {
        self.calls.lock().iter().map(|(_, q)| q.clone()).collect()
    }
}

impl HttpClient for MockHttp {
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<HttpResponse, HttpError> {
        self.calls.lock().push((url.to_string(), query.to_vec()));
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(HttpError::Transport("no scripted response".into())))
    }
}
