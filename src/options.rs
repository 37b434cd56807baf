//! Per-call search options and their query-string encoding.

use crate::error::SearchError;
use crate::locales::{Country, Language};

/// Highest `start` index the API accepts: it never serves past the first
/// 100 results, and a page may hold up to 10 of them.
pub const MAX_START_INDEX: u32 = 91;

/// Results per page accepted by the `num` parameter.
pub const MAX_RESULT_COUNT: u8 = 10;

/// Optional settings for a single search call.
///
/// All fields have defaults; out-of-range values are rejected by
/// [`SearchOptions::validate`] before a request is made, never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Restrict results to a language (`lr`). None sends no restriction,
    /// which the API treats as English.
    pub language: Option<Language>,
    /// Boost results from a country (`gl`). None sends no restriction.
    pub country: Option<Country>,
    /// SafeSearch content filtering (`safe`), on by default.
    pub safe_search: bool,
    /// Search for images (`searchType=image`) instead of web pages.
    pub image_search: bool,
    /// 1-based index of the first result to return (`start`), in `1..=91`.
    pub start_index: u32,
    /// Number of results to return (`num`), in `1..=10`.
    pub result_count: u8,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            language: None,
            country: None,
            safe_search: true,
            image_search: false,
            start_index: 1,
            result_count: MAX_RESULT_COUNT,
        }
    }
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the language restriction.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Set the country restriction.
    pub fn with_country(mut self, country: Country) -> Self {
        self.country = Some(country);
        self
    }

    /// Toggle SafeSearch filtering.
    pub fn with_safe_search(mut self, enabled: bool) -> Self {
        self.safe_search = enabled;
        self
    }

    /// Toggle image search.
    pub fn with_image_search(mut self, enabled: bool) -> Self {
        self.image_search = enabled;
        self
    }

    /// Set the 1-based start index.
    pub fn with_start_index(mut self, index: u32) -> Self {
        self.start_index = index;
        self
    }

    /// Set the number of results per call.
    pub fn with_result_count(mut self, count: u8) -> Self {
        self.result_count = count;
        self
    }

    /// Check ranges before any request is made.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.result_count < 1 || self.result_count > MAX_RESULT_COUNT {
            return Err(SearchError::Configuration(format!(
                "result_count must be between 1 and {MAX_RESULT_COUNT}, got {}",
                self.result_count
            )));
        }
        if self.start_index < 1 || self.start_index > MAX_START_INDEX {
            return Err(SearchError::Configuration(format!(
                "start_index must be between 1 and {MAX_START_INDEX}, got {}",
                self.start_index
            )));
        }
        Ok(())
    }

    /// Encode these options into query pairs, in a stable order.
    /// Credentials and the query string itself are appended by the client.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(6);

        pairs.push(("num", self.result_count.to_string()));
        pairs.push(("start", self.start_index.to_string()));
        pairs.push((
            "safe",
            if self.safe_search { "active" } else { "off" }.to_string(),
        ));
        if let Some(language) = self.language {
            pairs.push(("lr", language.as_param().to_string()));
        }
        if let Some(country) = self.country {
            pairs.push(("gl", country.as_param().to_string()));
        }
        if self.image_search {
            pairs.push(("searchType", "image".to_string()));
        }

        pairs
    }

    /// Decode options back from query pairs. Inverse of
    /// [`SearchOptions::to_query_pairs`]; unknown keys are ignored so the
    /// full request query (including `key`, `cx` and `q`) can be fed in.
    pub fn from_query_pairs<'a, I>(pairs: I) -> Result<Self, SearchError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut options = Self::default();

        for (key, value) in pairs {
            match key {
                "num" => {
                    options.result_count = value.parse().map_err(|_| {
                        SearchError::Configuration(format!("invalid num parameter: {value:?}"))
                    })?;
                }
                "start" => {
                    options.start_index = value.parse().map_err(|_| {
                        SearchError::Configuration(format!("invalid start parameter: {value:?}"))
                    })?;
                }
                "safe" => {
                    options.safe_search = match value {
                        "active" => true,
                        "off" => false,
                        other => {
                            return Err(SearchError::Configuration(format!(
                                "invalid safe parameter: {other:?}"
                            )))
                        }
                    };
                }
                "lr" => options.language = Some(Language::from_param(value)?),
                "gl" => options.country = Some(Country::from_code(value)?),
                "searchType" => options.image_search = value == "image",
                _ => {}
            }
        }

        Ok(options)
    }
}
