//! Error types shared by every crate in the curation workspace.
//!
//! Only [`CurateError::Auth`] and [`CurateError::Config`] end a run. The other
//! variants are absorbed at the component boundary that produced them:
//! - `Fetch` becomes a stop reason in the collector
//! - `ResolverUnavailable` becomes an unknown rating
//! - `DispatchRejected` becomes a dispatch record

use thiserror::Error;

/// Errors that can occur while curating a run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurateError {
    /// Login to the request service failed. Fatal.
    #[error("Login failed: {reason}")]
    Auth {
        status: Option<u16>,
        reason: String,
    },

    /// A discover page could not be fetched or decoded.
    #[error("Failed to fetch {feed} page {page}: {reason}")]
    Fetch {
        feed: String,
        page: u32,
        reason: String,
    },

    /// The rating service could not answer.
    #[error("Rating service unavailable: {0}")]
    ResolverUnavailable(String),

    /// The request service refused an acquisition request.
    #[error("Request rejected ({}): {message}", status_label(.status))]
    DispatchRejected {
        status: Option<u16>,
        message: String,
    },

    /// A configuration value is missing or malformed.
    #[error("Invalid value for {field}: {value}")]
    Config { field: String, value: String },
}

impl CurateError {
    /// Whether this error aborts the whole run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CurateError::Auth { .. } | CurateError::Config { .. })
    }
}

fn status_label(status: &Option<u16>) -> String {
    status
        .map(|s| s.to_string())
        .unwrap_or_else(|| "no status".to_string())
}

/// Convenience type alias for Results in this workspace
pub type Result<T> = std::result::Result<T, CurateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_auth_and_config_are_fatal() {
        let auth = CurateError::Auth {
            status: Some(401),
            reason: "bad credentials".to_string(),
        };
        let fetch = CurateError::Fetch {
            feed: "movies".to_string(),
            page: 3,
            reason: "HTTP 500".to_string(),
        };
        let config = CurateError::Config {
            field: "MIN_RATING".to_string(),
            value: "high".to_string(),
        };

        assert!(auth.is_fatal());
        assert!(config.is_fatal());
        assert!(!fetch.is_fatal());
        assert!(!CurateError::ResolverUnavailable("timeout".to_string()).is_fatal());
    }

    #[test]
    fn dispatch_rejection_message_includes_status() {
        let err = CurateError::DispatchRejected {
            status: Some(409),
            message: "Request already exists".to_string(),
        };
        assert_eq!(err.to_string(), "Request rejected (409): Request already exists");

        let err = CurateError::DispatchRejected {
            status: None,
            message: "connection reset".to_string(),
        };
        assert_eq!(err.to_string(), "Request rejected (no status): connection reset");
    }
}
