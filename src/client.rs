//! The search client: one HTTPS GET per call against the customsearch API.

use reqwest::StatusCode;
use tracing::{debug, warn};
use url::Url;

use crate::error::SearchError;
use crate::options::SearchOptions;
use crate::results::{SearchResponse, SearchResult};

/// Production endpoint of the customsearch JSON API.
pub const API_ENDPOINT: &str = "https://customsearch.googleapis.com/customsearch/v1";

/// Public demo engine ID, usable when no custom engine has been configured.
pub const DEFAULT_ENGINE_ID: &str = "0013301c62cb228c5";

/// Client for the Google Programmable Search Engine JSON API.
///
/// Holds the API key, the engine ID and a pooled [`reqwest::Client`], and
/// nothing else: there is no per-call state, so one instance can be shared
/// and used concurrently. Each [`SearchClient::search`] call performs exactly
/// one request, with no retries and no caching; serializing calls to stay
/// under the daily quota is the caller's concern.
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    api_key: String,
    engine_id: String,
    base_url: String,
}

impl SearchClient {
    /// Create a client for the given API key and engine ID.
    pub fn new(
        api_key: impl Into<String>,
        engine_id: impl Into<String>,
    ) -> Result<Self, SearchError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("gpse/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            engine_id: engine_id.into(),
            base_url: API_ENDPOINT.to_string(),
        })
    }

    /// Create a client that queries the public demo engine
    /// ([`DEFAULT_ENGINE_ID`]).
    pub fn with_default_engine(api_key: impl Into<String>) -> Result<Self, SearchError> {
        Self::new(api_key, DEFAULT_ENGINE_ID)
    }

    /// Override the endpoint URL. Intended for tests against a local mock
    /// server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The engine ID this client queries.
    pub fn engine_id(&self) -> &str {
        &self.engine_id
    }

    /// Search for web pages matching `query`.
    ///
    /// Issues exactly one GET request and returns the results in API order,
    /// possibly empty. Fails with [`SearchError::InvalidQuery`] on a blank
    /// query and [`SearchError::Configuration`] on out-of-range options,
    /// both before anything is sent.
    pub async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<Vec<SearchResult>, SearchError> {
        if query.trim().is_empty() {
            return Err(SearchError::InvalidQuery);
        }
        options.validate()?;

        let url = self.build_url(query, options)?;
        debug!(query, image = options.image_search, "issuing search request");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            if status == StatusCode::TOO_MANY_REQUESTS || quota_exhausted(&body) {
                warn!(status = status.as_u16(), "request quota exhausted");
                return Err(SearchError::QuotaExceeded);
            }
            warn!(status = status.as_u16(), "search request failed");
            return Err(SearchError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let payload: SearchResponse = serde_json::from_str(&body)
            .map_err(|_| SearchError::UnexpectedPayload { body })?;

        Ok(payload.items.into_iter().map(SearchResult::from).collect())
    }

    /// Search for images matching `query`.
    ///
    /// Same contract as [`SearchClient::search`] with the image-search flag
    /// forced on; items carrying image metadata populate
    /// [`SearchResult::image`].
    pub async fn image_search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let options = options.with_image_search(true);
        self.search(query, &options).await
    }

    fn build_url(&self, query: &str, options: &SearchOptions) -> Result<Url, SearchError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| SearchError::Configuration(format!("invalid endpoint URL: {e}")))?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("key", &self.api_key)
                .append_pair("cx", &self.engine_id)
                .append_pair("q", query);
            for (key, value) in options.to_query_pairs() {
                pairs.append_pair(key, &value);
            }
        }

        Ok(url)
    }
}

/// Quota exhaustion is reported as `RESOURCE_EXHAUSTED` in the error body,
/// not always as HTTP 429.
fn quota_exhausted(body: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("status"))
                .and_then(|s| s.as_str())
                .map(|s| s == "RESOURCE_EXHAUSTED")
        })
        .unwrap_or(false)
}
