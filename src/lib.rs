//! GPSE: an async client for the Google Programmable Search Engine JSON API
//!
//! Builds a query URL from typed, validated options, performs a single GET
//! per call, and parses the JSON payload into [`SearchResult`] values.
//!
//! ```no_run
//! use gpse::{SearchClient, SearchOptions, Language};
//!
//! # async fn run() -> Result<(), gpse::SearchError> {
//! let client = SearchClient::new("api-key", "engine-id")?;
//! let options = SearchOptions::new().with_language(Language::from_code("en")?);
//! for result in client.search("rust programming", &options).await? {
//!     println!("{}: {}", result.title, result.link);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod locales;
pub mod options;
pub mod results;

pub use client::{SearchClient, API_ENDPOINT, DEFAULT_ENGINE_ID};
pub use error::SearchError;
pub use locales::{Country, Language};
pub use options::SearchOptions;
pub use results::{ImageMetadata, SearchResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
