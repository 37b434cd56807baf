//! Result type definitions and the wire-format payload they are parsed from.

use serde::{Deserialize, Serialize};

/// A single search result, in the order the API returned it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    /// Title of the returned page.
    pub title: String,
    /// Target link.
    pub link: String,
    /// Short description of the page, with embedded newlines flattened out.
    pub snippet: String,
    /// Image metadata, populated for image-search results that carry it.
    pub image: Option<ImageMetadata>,
}

/// Metadata attached to an image-search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageMetadata {
    /// Preview (thumbnail) URL for the image.
    pub url: String,
    /// Width of the full image in pixels.
    pub width: u32,
    /// Height of the full image in pixels.
    pub height: u32,
}

/// Top-level response body. Deserialization fails when the `items` key is
/// absent; an explicit `"items": []` is the empty-result case.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub items: Vec<RawItem>,
}

/// One entry of the `items` array as the API serializes it. `title`, `link`
/// and `snippet` are required; a payload missing any of them is malformed.
#[derive(Debug, Deserialize)]
pub(crate) struct RawItem {
    pub title: String,
    pub link: String,
    pub snippet: String,
    #[serde(default)]
    pub image: Option<RawImage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawImage {
    #[serde(rename = "thumbnailLink")]
    pub thumbnail_link: String,
    pub width: u32,
    pub height: u32,
}

impl From<RawItem> for SearchResult {
    fn from(raw: RawItem) -> Self {
        // The API wraps snippets across lines; collapse them as the
        // documented snippet text is a single line.
        let snippet = if raw.snippet.contains('\n') {
            raw.snippet.split('\n').collect()
        } else {
            raw.snippet
        };

        Self {
            title: raw.title,
            link: raw.link,
            snippet,
            image: raw.image.map(|img| ImageMetadata {
                url: img.thumbnail_link,
                width: img.width,
                height: img.height,
            }),
        }
    }
}
