//! reelfetch retrieves an Instagram post's markup through a sequence of
//! fallback CORS-relay routes and extracts direct mp4 download candidates
//! plus title/thumbnail/author metadata.
//!
//! The pipeline is `fetch -> extract`: [`fetch::PageFetcher`] tries each
//! configured relay strictly in order and returns the first viable body,
//! [`extract::extract`] scans that body with four pattern passes and ranks
//! the deduplicated candidates by resolution. A page with no discoverable
//! media is a success with an empty `formats` vector, not an error.

pub mod error;
pub mod extract;
pub mod fetch;
pub mod history;
pub mod links;
pub mod types;

pub use error::{Error, FetchError};
pub use fetch::PageFetcher;
pub use types::{MediaCandidate, PostMetadata};

/// Fetch-then-extract pipeline over a configured [`PageFetcher`].
pub struct Retriever {
    fetcher: PageFetcher,
}

impl Retriever {
    /// Pipeline over the default relay routes and timeout.
    pub fn new() -> Self {
        Retriever {
            fetcher: PageFetcher::new(),
        }
    }

    pub fn with_fetcher(fetcher: PageFetcher) -> Self {
        Retriever { fetcher }
    }

    /// Retrieve and parse one post.
    ///
    /// The target URL must already be scheme-qualified (see
    /// [`links::normalize`]). Route exhaustion surfaces as [`Error::Fetch`];
    /// extraction itself cannot fail.
    pub fn retrieve(&self, target_url: &str) -> Result<PostMetadata, Error> {
        let body = self.fetcher.fetch(target_url)?;
        Ok(extract::extract(&body))
    }
}

impl Default for Retriever {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testutil::{Outcome, ScriptedRoute};
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    const PAGE: &str = concat!(
        r#"<html><head><meta property="og:title" content="Reel" />"#,
        r#"<meta property="og:video:secure_url" content="https://a/x.mp4" />"#,
        r#"</head><body>padding padding padding</body></html>"#,
    );

    const EMPTY_PAGE: &str =
        "<html><head></head><body>no media anywhere on this page at all</body></html>";

    #[test]
    fn test_retrieve_parses_fetched_body() {
        let (route, _) = ScriptedRoute::boxed("only", Outcome::Body(PAGE));
        let retriever =
            Retriever::with_fetcher(PageFetcher::with_routes(vec![route], Duration::from_millis(10)));

        let meta = retriever.retrieve("https://www.instagram.com/reel/X/").unwrap();
        assert_eq!(meta.title, "Reel");
        assert_eq!(meta.formats.len(), 1);
        assert_eq!(meta.formats[0].url, "https://a/x.mp4");
    }

    #[test]
    fn test_zero_candidates_is_a_success() {
        let (route, _) = ScriptedRoute::boxed("only", Outcome::Body(EMPTY_PAGE));
        let retriever =
            Retriever::with_fetcher(PageFetcher::with_routes(vec![route], Duration::from_millis(10)));

        let meta = retriever.retrieve("https://www.instagram.com/reel/X/").unwrap();
        assert!(meta.formats.is_empty());
        assert_eq!(meta.title, types::DEFAULT_TITLE);
        assert_eq!(meta.thumbnail_url, "");
        assert_eq!(meta.author, "");
    }

    #[test]
    fn test_all_routes_failing_surfaces_fetch_error() {
        let (a, a_calls) = ScriptedRoute::boxed("a", Outcome::Http(500));
        let (b, b_calls) = ScriptedRoute::boxed("b", Outcome::Http(502));
        let (c, c_calls) = ScriptedRoute::boxed("c", Outcome::Http(503));
        let (d, d_calls) = ScriptedRoute::boxed("d", Outcome::Http(504));

        let retriever = Retriever::with_fetcher(PageFetcher::with_routes(
            vec![a, b, c, d],
            Duration::from_millis(10),
        ));

        let err = retriever
            .retrieve("https://www.instagram.com/reel/X/")
            .unwrap_err();
        let Error::Fetch(fetch_err) = err;
        assert_eq!(fetch_err.attempts, 4);
        assert_eq!(fetch_err.route, "d");

        for calls in [a_calls, b_calls, c_calls, d_calls] {
            assert_eq!(calls.load(Ordering::SeqCst), 1);
        }
    }
}
