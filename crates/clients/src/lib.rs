//! HTTP clients for the services the curator talks to.
//!
//! This crate provides reqwest implementations of the pipeline's service
//! traits:
//! - `SeerrSession`: login, discover pages and acquisition requests against a
//!   Jellyseerr/Overseerr instance, holding the session cookie
//! - `OmdbResolver`: IMDb ratings from the OMDb API
//!
//! Both are plain request/response wrappers: no caching and no retries.

use catalog::CurateError;
use reqwest::Client;
use std::time::Duration;

pub mod omdb;
pub mod seerr;

pub use omdb::OmdbResolver;
pub use seerr::{Credentials, SeerrSession};

/// Default per-request timeout when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Build a reqwest client with the given timeout.
///
/// `cookies` enables the in-memory cookie store the Seerr session lives in.
pub(crate) fn build_client(timeout: Duration, cookies: bool) -> Result<Client, CurateError> {
    Client::builder()
        .timeout(timeout)
        .cookie_store(cookies)
        .user_agent(concat!("reel-curate/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| CurateError::Config {
            field: "http client".to_string(),
            value: e.to_string(),
        })
}

/// Read a response body for an error message, never failing.
pub(crate) async fn body_text(response: reqwest::Response) -> String {
    match response.text().await {
        Ok(text) => text.trim().to_string(),
        Err(e) => format!("<unreadable body: {}>", e),
    }
}
