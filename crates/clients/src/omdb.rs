//! OMDb rating lookups.
//!
//! `GET {base}?apikey=..&t=<title>&y=<year>` answers with
//! `{"Response": "True", "imdbRating": "7.4", ...}` or
//! `{"Response": "False", "Error": "Movie not found!"}`.
//! Every failure mode collapses to an unknown rating.

use crate::{body_text, build_client, DEFAULT_TIMEOUT};
use async_trait::async_trait;
use catalog::{CurateError, UNKNOWN_YEAR};
use pipeline::RatingResolver;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_OMDB_URL: &str = "https://www.omdbapi.com/";

/// The fields of an OMDb title response the resolver cares about.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OmdbPayload {
    #[serde(rename = "Response", default)]
    pub response: Option<String>,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: Option<String>,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

impl OmdbPayload {
    /// `Some` only for a successful response with a numeric 0-10 rating.
    pub fn rating(&self) -> Option<f32> {
        if self.response.as_deref() != Some("True") {
            return None;
        }
        let raw = self.imdb_rating.as_deref()?.trim();
        if raw.eq_ignore_ascii_case("N/A") {
            return None;
        }
        raw.parse::<f32>()
            .ok()
            .filter(|r| r.is_finite() && (0.0..=10.0).contains(r))
    }
}

/// Rating resolver backed by the OMDb API.
pub struct OmdbResolver {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OmdbResolver {
    /// Create a resolver for an OMDb-compatible endpoint
    ///
    /// # Arguments
    /// * `base_url` - Full lookup URL, usually [`DEFAULT_OMDB_URL`]
    /// * `api_key` - Sent as the `apikey` query parameter
    /// * `timeout` - Per-request timeout, [`DEFAULT_TIMEOUT`] when `None`
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, CurateError> {
        Ok(Self {
            client: build_client(timeout.unwrap_or(DEFAULT_TIMEOUT), false)?,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Check if the resolver has an API key configured
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// One lookup. `Err` means the service could not answer at all;
    /// `Ok(None)` means it answered without a usable rating.
    pub async fn lookup(&self, title: &str, year: i32) -> Result<Option<f32>, CurateError> {
        let mut query: Vec<(&str, String)> = vec![
            ("apikey", self.api_key.clone()),
            ("t", title.to_string()),
        ];
        if year != UNKNOWN_YEAR {
            query.push(("y", year.to_string()));
        }

        debug!("Requesting OMDb for: {} ({})", title, year);
        let response = self
            .client
            .get(&self.base_url)
            .query(&query)
            .send()
            .await
            .map_err(|e| CurateError::ResolverUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = body_text(response).await;
            return Err(CurateError::ResolverUnavailable(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body
            )));
        }

        let payload: OmdbPayload = response
            .json()
            .await
            .map_err(|e| CurateError::ResolverUnavailable(e.to_string()))?;
        debug!("OMDb response for {}: {:?}", title, payload);

        Ok(payload.rating())
    }
}

#[async_trait]
impl RatingResolver for OmdbResolver {
    async fn resolve(&self, title: &str, year: i32) -> Option<f32> {
        match self.lookup(title, year).await {
            Ok(rating) => rating,
            Err(e) => {
                debug!("Error querying OMDb for {}: {}", title, e);
                None
            }
        }
    }
}
