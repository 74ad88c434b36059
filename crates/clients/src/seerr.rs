//! Client for the Seerr (Jellyseerr/Overseerr) API.
//!
//! One `SeerrSession` is one authenticated session: `login` stores the
//! session cookie in the client's cookie jar and every later call sends it.
//! After login the session is only read, so it is shared behind `Arc`.

use crate::{body_text, build_client, DEFAULT_TIMEOUT};
use async_trait::async_trait;
use catalog::{parse_discover_page, CandidateItem, CurateError, Feed, MediaId, MediaType};
use pipeline::{Authenticator, DiscoveryFeed, DispatchOutcome, RequestSink};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Local account credentials for `POST /auth/local`.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /request`.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MediaRequest {
    pub media_type: &'static str,
    pub media_id: MediaId,
    /// Shows are requested whole: every season in one request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seasons: Option<&'static str>,
}

impl MediaRequest {
    pub fn for_item(item: &CandidateItem) -> Self {
        Self {
            media_type: item.media_type.wire_name(),
            media_id: item.id,
            seasons: match item.media_type {
                MediaType::Show => Some("all"),
                MediaType::Movie => None,
            },
        }
    }
}

/// An authenticated connection to a Seerr instance.
pub struct SeerrSession {
    client: Client,
    api_base: String,
    credentials: Credentials,
}

impl SeerrSession {
    /// Create a session for a Seerr instance.
    ///
    /// Nothing is sent until [`Authenticator::login`] is called.
    ///
    /// # Arguments
    /// * `base_url` - Instance root (e.g. `http://localhost:5055`); `/api/v1` is appended
    /// * `credentials` - Local account used by `login`
    /// * `timeout` - Per-request timeout, [`DEFAULT_TIMEOUT`] when `None`
    ///
    /// # Returns
    /// The session, or `CurateError::Config` if the HTTP client cannot be built
    pub fn new(
        base_url: &str,
        credentials: Credentials,
        timeout: Option<Duration>,
    ) -> Result<Self, CurateError> {
        let client = build_client(timeout.unwrap_or(DEFAULT_TIMEOUT), true)?;
        Ok(Self {
            client,
            api_base: format!("{}/api/v1", base_url.trim_end_matches('/')),
            credentials,
        })
    }

    /// Get the API root this session talks to.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path)
    }
}

#[async_trait]
impl Authenticator for SeerrSession {
    async fn login(&self) -> Result<(), CurateError> {
        let response = self
            .client
            .post(self.endpoint("auth/local"))
            .json(&self.credentials)
            .send()
            .await
            .map_err(|e| CurateError::Auth {
                status: None,
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            info!("Logged in to Seerr at {} as {}", self.api_base, self.credentials.email);
            Ok(())
        } else {
            Err(CurateError::Auth {
                status: Some(status.as_u16()),
                reason: body_text(response).await,
            })
        }
    }
}

#[async_trait]
impl DiscoveryFeed for SeerrSession {
    async fn fetch_page(&self, feed: Feed, page: u32) -> Result<Vec<CandidateItem>, CurateError> {
        let fetch_error = |reason: String| CurateError::Fetch {
            feed: feed.to_string(),
            page,
            reason,
        };

        let url = self.endpoint(&format!("discover/{}", feed.path_segment()));
        debug!("GET {}?page={}", url, page);
        let response = self
            .client
            .get(&url)
            .query(&[("page", page)])
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = body_text(response).await;
            return Err(fetch_error(format!("HTTP {}: {}", status.as_u16(), body)));
        }

        let body = response.text().await.map_err(|e| fetch_error(e.to_string()))?;
        parse_discover_page(&body, feed, page)
    }
}

#[async_trait]
impl RequestSink for SeerrSession {
    async fn submit(&self, item: &CandidateItem) -> DispatchOutcome {
        let request = MediaRequest::for_item(item);
        debug!("POST request {:?}", request);

        let response = match self
            .client
            .post(self.endpoint("request"))
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Request for {} did not reach Seerr: {}", item, e);
                return DispatchOutcome::Rejected {
                    status: None,
                    message: e.to_string(),
                };
            }
        };

        match response.status() {
            StatusCode::OK | StatusCode::CREATED => DispatchOutcome::Accepted,
            status => DispatchOutcome::Rejected {
                status: Some(status.as_u16()),
                message: body_text(response).await,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_requests_all_seasons() {
        let show = CandidateItem::new(MediaType::Show, 1396, "Breaking Bad");
        let body = serde_json::to_value(MediaRequest::for_item(&show)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"mediaType": "tv", "mediaId": 1396, "seasons": "all"})
        );
    }

    #[test]
    fn test_movie_request_has_no_seasons() {
        let movie = CandidateItem::new(MediaType::Movie, 603, "The Matrix");
        let body = serde_json::to_value(MediaRequest::for_item(&movie)).unwrap();
        assert_eq!(body, serde_json::json!({"mediaType": "movie", "mediaId": 603}));
    }

    #[test]
    fn test_api_base_strips_trailing_slash() {
        let session = SeerrSession::new(
            "http://localhost:5055/",
            Credentials::new("me@example.com", "hunter2"),
            None,
        )
        .unwrap();
        assert_eq!(session.api_base(), "http://localhost:5055/api/v1");
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let rendered = format!("{:?}", Credentials::new("me@example.com", "hunter2"));
        assert!(rendered.contains("me@example.com"));
        assert!(!rendered.contains("hunter2"));
    }
}
