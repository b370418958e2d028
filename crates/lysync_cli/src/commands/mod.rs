//! CLI subcommands.

pub mod endpoints;
pub mod health;
pub mod sync;

/// Remote API credentials, from flags or the environment.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Base URL of the remote API.
    pub base_url: String,
    /// Basic-auth username.
    pub username: String,
    /// Basic-auth password.
    pub password: String,
}

impl Credentials {
    /// Resolves credentials, preferring flags over environment variables.
    ///
    /// Missing values resolve to empty strings; the engine's configuration
    /// validation reports them as the fatal startup error.
    pub fn resolve(
        base_url: Option<String>,
        username: Option<String>,
        password: Option<String>,
    ) -> Self {
        Self {
            base_url: base_url
                .or_else(|| std::env::var("LYCEUM_API_BASE_URL").ok())
                .unwrap_or_default(),
            username: username
                .or_else(|| std::env::var("LYCEUM_API_USERNAME").ok())
                .unwrap_or_default(),
            password: password
                .or_else(|| std::env::var("LYCEUM_API_PASSWORD").ok())
                .unwrap_or_default(),
        }
    }
}
