//! Error types for the search client

use thiserror::Error;

/// All failure modes of a search call.
///
/// Local validation failures (`Configuration`, `InvalidQuery`) are raised
/// before any request is sent. `QuotaExceeded` is a distinguishable case of
/// API failure so callers can match on it specifically while still handling
/// every API failure with a single arm.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A local parameter was outside the accepted range or set.
    /// Raised before any network activity.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The query string was empty or all whitespace.
    /// Raised before any network activity.
    #[error("search query must not be empty")]
    InvalidQuery,

    /// The API returned a non-2xx status other than quota exhaustion.
    #[error("API request failed with HTTP {status}")]
    Api { status: u16, body: String },

    /// The daily request quota for this API key has been exhausted
    /// (100 queries/day on the free tier).
    #[error("daily request quota has been exceeded for this API key")]
    QuotaExceeded,

    /// The API returned 2xx but the body did not match the expected shape.
    /// Carries the raw body for diagnostics.
    #[error("could not parse API response payload")]
    UnexpectedPayload { body: String },

    /// Connection-level failure from the underlying HTTP client.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl SearchError {
    /// Whether this error is the quota-exhausted condition.
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, SearchError::QuotaExceeded)
    }

    /// Whether this error came back from the API (as opposed to local
    /// validation or the transport).
    pub fn is_api_failure(&self) -> bool {
        matches!(
            self,
            SearchError::Api { .. }
                | SearchError::QuotaExceeded
                | SearchError::UnexpectedPayload { .. }
        )
    }

    /// The raw response body, when one was captured.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            SearchError::Api { body, .. } | SearchError::UnexpectedPayload { body } => {
                Some(body.as_str())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_is_api_failure() {
        let err = SearchError::QuotaExceeded;
        assert!(err.is_quota_exceeded());
        assert!(err.is_api_failure());
    }

    #[test]
    fn test_local_errors_are_not_api_failures() {
        assert!(!SearchError::InvalidQuery.is_api_failure());
        assert!(!SearchError::Configuration("num out of range".into()).is_api_failure());
    }

    #[test]
    fn test_response_body_capture() {
        let err = SearchError::UnexpectedPayload {
            body: "{\"oops\": true}".into(),
        };
        assert_eq!(err.response_body(), Some("{\"oops\": true}"));
        assert_eq!(SearchError::QuotaExceeded.response_body(), None);
    }
}
