use once_cell::sync::Lazy;
use regex::Regex;

static MP4_AT_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.mp4(\?|$)").expect("mp4 extension regex"));

/// Un-escape an address lifted out of embedded JSON: `\/` path separators
/// and the `\u0026` ampersand escape.
pub fn unescape_json_url(url: &str) -> String {
    url.replace("\\/", "/").replace("\\u0026", "&")
}

/// True when the address points at an mp4 resource. The extension must sit
/// at end-of-string or immediately before the query string; `.mp4` in the
/// middle of a path does not qualify.
pub fn is_media_url(url: &str) -> bool {
    MP4_AT_END.is_match(url)
}
