use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static HAS_SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^https?://").expect("scheme regex"));

/// Path segments that mark a content URL (post, reel, tv, story).
const CONTENT_TYPES: &[&str] = &["p", "reel", "reels", "tv", "stories"];

/// Normalize user input into a scheme-qualified address: trim whitespace and
/// prefix `https://` when no scheme is present.
pub fn normalize(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if HAS_SCHEME.is_match(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// True when the address points at an Instagram post, reel, tv video, or
/// story rather than a profile or some other page.
pub fn is_post_url(url: &str) -> bool {
    shortcode(url).is_some()
}

/// Extract the content shortcode, tolerating a leading `/<username>/`
/// segment as in `/someuser/reel/<code>/`.
pub fn shortcode(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_lowercase();
    if host != "instagram.com" && host != "www.instagram.com" {
        return None;
    }

    let segments: Vec<&str> = parsed.path_segments()?.filter(|s| !s.is_empty()).collect();
    if segments.len() >= 2 && CONTENT_TYPES.contains(&segments[0]) {
        return Some(segments[1].to_string());
    }
    if segments.len() >= 3 && CONTENT_TYPES.contains(&segments[1]) {
        return Some(segments[2].to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_adds_scheme() {
        assert_eq!(
            normalize("www.instagram.com/reel/ABC123"),
            "https://www.instagram.com/reel/ABC123"
        );
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(
            normalize("  https://www.instagram.com/p/X/  "),
            "https://www.instagram.com/p/X/"
        );
    }

    #[test]
    fn test_normalize_keeps_existing_scheme() {
        assert_eq!(
            normalize("http://instagram.com/p/X"),
            "http://instagram.com/p/X"
        );
    }

    #[test]
    fn test_normalize_empty_input() {
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_shortcode_reel() {
        assert_eq!(
            shortcode("https://www.instagram.com/reel/ABC123xyz/"),
            Some("ABC123xyz".to_string())
        );
    }

    #[test]
    fn test_shortcode_with_query() {
        assert_eq!(
            shortcode("https://www.instagram.com/reel/ABC123/?igsh=xxx"),
            Some("ABC123".to_string())
        );
    }

    #[test]
    fn test_shortcode_with_username_prefix() {
        assert_eq!(
            shortcode("https://www.instagram.com/someuser/reel/B58TfHTnY2u/"),
            Some("B58TfHTnY2u".to_string())
        );
    }

    #[test]
    fn test_post_url_variants() {
        assert!(is_post_url("https://www.instagram.com/p/DEF456/"));
        assert!(is_post_url("https://instagram.com/tv/JKL012/"));
        assert!(is_post_url("https://www.instagram.com/reels/GHI789/"));
        assert!(is_post_url("https://www.instagram.com/stories/someuser/123/"));
    }

    #[test]
    fn test_rejects_profile_url() {
        assert!(!is_post_url("https://www.instagram.com/someuser/"));
    }

    #[test]
    fn test_rejects_other_host() {
        assert!(!is_post_url("https://www.youtube.com/watch?v=abc"));
    }

    #[test]
    fn test_rejects_unparseable() {
        assert!(!is_post_url("not a url"));
    }
}
