use serde::{Deserialize, Serialize};

/// All candidates in this domain are progressive mp4 streams.
pub const MP4_MIME: &str = "video/mp4";

/// Title used when the page exposes neither og:title nor a title meta tag.
pub const DEFAULT_TITLE: &str = "Instagram Video";

/// One discovered, deduplicated direct video address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaCandidate {
    pub url: String,
    pub mime_type: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub label: String,
}

impl MediaCandidate {
    pub(crate) fn new(url: String, width: Option<u32>, height: Option<u32>) -> Self {
        let label = match height {
            Some(h) => format!("MP4 {h}p"),
            None => "MP4".to_string(),
        };
        MediaCandidate {
            url,
            mime_type: MP4_MIME.to_string(),
            width,
            height,
            label,
        }
    }
}

/// Result of parsing one post page. `formats` is ordered by descending
/// height, dimensionless candidates last in discovery order; an empty vector
/// means no direct media was found, which is a valid outcome and not an
/// error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostMetadata {
    pub title: String,
    pub thumbnail_url: String,
    pub author: String,
    pub formats: Vec<MediaCandidate>,
}
