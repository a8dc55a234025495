use serde::Deserialize;
use serde_json::{Map, Value};

use super::thumbnail;

/// The metadata document an extractor emits for one media URL. All five
/// fields must be present; a document missing any of them fails the fetch.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMetadata {
    pub title: String,
    pub description: String,
    /// Duration in whole seconds.
    pub duration: u64,
    pub thumbnails: Vec<RawThumbnail>,
    /// Opaque format-id to format-descriptor mapping, passed through
    /// unexamined.
    pub formats: Map<String, Value>,
}

/// One candidate preview image. Extractors omit `width` for some entries;
/// those are treated as zero-width when ranking candidates.
#[derive(Debug, Clone, Deserialize)]
pub struct RawThumbnail {
    pub url: String,
    #[serde(default)]
    pub width: u32,
}

/// Metadata for a single media URL, as displayed by the UI. Built by
/// `from_raw` from one complete extractor response and replaced wholesale
/// on every fetch; there is no partially populated state.
#[derive(Debug, Clone)]
pub struct MediaInfo {
    pub title: String,
    pub description: String,
    pub duration_secs: u64,
    pub thumbnail_url: Option<String>,
    pub formats: Map<String, Value>,
}

impl MediaInfo {
    pub fn from_raw(raw: RawMetadata, max_thumbnail_width: u32) -> Self {
        let thumbnail_url =
            thumbnail::select(&raw.thumbnails, max_thumbnail_width).map(|t| t.url.clone());

        Self {
            title: raw.title,
            description: raw.description,
            duration_secs: raw.duration,
            thumbnail_url,
            formats: raw.formats,
        }
    }
}
