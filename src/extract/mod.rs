pub mod normalize;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{MediaCandidate, PostMetadata, DEFAULT_TITLE};
use normalize::{is_media_url, unescape_json_url};

static DIRECT_VIDEO_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""video_url"\s*:\s*"(https:[^"]+?\.mp4[^"]*)""#).expect("video_url regex")
});

static VERSIONS_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)"video_versions"\s*:\s*\[(.*?)\]"#).expect("video_versions regex")
});

static VERSION_ITEM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?s)\{[^}]*"url"\s*:\s*"(https:[^"]+?\.mp4[^"]*)"[^}]*?"width"\s*:\s*(\d+)[^}]*?"height"\s*:\s*(\d+)"#,
    )
    .expect("version item regex")
});

static ANY_MP4: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(https:[^"']+?\.mp4[^"']*)"#).expect("any mp4 regex"));

static OWNER_USERNAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""owner"\s*:\s*\{[^}]*"username"\s*:\s*"([^"]+)""#).expect("owner regex")
});

fn meta_property(body: &str, prop: &str) -> Option<String> {
    let re = Regex::new(&format!(
        r#"(?i)<meta[^>]+property=["']{}["'][^>]+content=["']([^"']+)["']"#,
        regex::escape(prop)
    ))
    .ok()?;
    re.captures(body).map(|c| c[1].to_string())
}

fn meta_name(body: &str, name: &str) -> Option<String> {
    let re = Regex::new(&format!(
        r#"(?i)<meta[^>]+name=["']{}["'][^>]+content=["']([^"']+)["']"#,
        regex::escape(name)
    ))
    .ok()?;
    re.captures(body).map(|c| c[1].to_string())
}

/// Admit a raw address into the candidate set: unescape it, require the mp4
/// extension at end-of-path, and drop it if an earlier pass already found
/// the same URL.
fn push_candidate(out: &mut Vec<MediaCandidate>, raw: &str, width: Option<u32>, height: Option<u32>) {
    let url = unescape_json_url(raw);
    if !is_media_url(&url) {
        return;
    }
    if out.iter().any(|c| c.url == url) {
        return;
    }
    out.push(MediaCandidate::new(url, width, height));
}

fn parse_author(body: &str) -> String {
    if let Some(cap) = OWNER_USERNAME.captures(body) {
        return cap[1].to_string();
    }
    // og:description is conventionally "username on Instagram: caption"
    if let Some(desc) = meta_property(body, "og:description") {
        if let Some(idx) = desc.find(':') {
            return desc[..idx].trim().to_string();
        }
    }
    String::new()
}

/// Scan a page body for downloadable video candidates and post metadata.
///
/// Pure function of its input and it never fails: absent patterns degrade to
/// documented defaults and an empty `formats` vector is a valid result, to
/// be distinguished downstream from a fetch failure.
pub fn extract(body: &str) -> PostMetadata {
    let mut formats = Vec::new();

    // 1) og:video meta tags, secure variant first
    if let Some(url) = meta_property(body, "og:video:secure_url") {
        push_candidate(&mut formats, &url, None, None);
    }
    if let Some(url) = meta_property(body, "og:video") {
        push_candidate(&mut formats, &url, None, None);
    }

    // 2) explicit "video_url" fields, scanned across the whole body
    for cap in DIRECT_VIDEO_URL.captures_iter(body) {
        push_candidate(&mut formats, &cap[1], None, None);
    }

    // 3) video_versions blocks carrying width/height qualified variants
    for block in VERSIONS_BLOCK.captures_iter(body) {
        for item in VERSION_ITEM.captures_iter(&block[1]) {
            let width: Option<u32> = item[2].parse().ok();
            let height: Option<u32> = item[3].parse().ok();
            push_candidate(&mut formats, &item[1], width, height);
        }
    }

    // 4) last resort: any mp4 address anywhere in the page. Over-broad on
    // purpose; admission filtering is the only precision guard here.
    for cap in ANY_MP4.captures_iter(body) {
        push_candidate(&mut formats, &cap[1], None, None);
    }

    // Stable sort keeps discovery order among equal heights; unknown height
    // ranks as zero so dimensioned candidates come first.
    formats.sort_by_key(|c| std::cmp::Reverse(c.height.unwrap_or(0)));

    if !formats.is_empty() {
        log::debug!("extracted {} candidate(s)", formats.len());
    }

    let title = meta_property(body, "og:title")
        .or_else(|| meta_name(body, "title"))
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let thumbnail_url = meta_property(body, "og:image").unwrap_or_default();
    let author = parse_author(body);

    PostMetadata {
        title,
        thumbnail_url,
        author,
        formats,
    }
}
