pub mod routes;

pub use routes::{default_routes, RetrievalRoute};

use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::{FetchError, RouteError};

const USER_AGENT_DEFAULT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:124.0) Gecko/20100101 Firefox/124.0";

/// A body shorter than this is a proxy error page or an empty response
/// pretending to be a success.
pub const MIN_VIABLE_LEN: usize = 50;

/// Per-route budget; the worst case for one fetch is routes x this value.
pub const DEFAULT_ROUTE_TIMEOUT: Duration = Duration::from_secs(15);

/// Tries an ordered list of relay routes sequentially and returns the first
/// viable page body.
///
/// Routes never overlap in time: attempt n+1 starts only after attempt n has
/// settled. A timed-out attempt is torn down by reqwest's per-request
/// timeout, so a hung route cannot later resolve and race a successor.
pub struct PageFetcher {
    client: Client,
    routes: Vec<Box<dyn RetrievalRoute>>,
    route_timeout: Duration,
}

impl PageFetcher {
    pub fn new() -> Self {
        Self::with_routes(default_routes(), DEFAULT_ROUTE_TIMEOUT)
    }

    /// Build a fetcher over an explicit route list, mainly so tests can
    /// inject scripted routes.
    pub fn with_routes(routes: Vec<Box<dyn RetrievalRoute>>, route_timeout: Duration) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT_DEFAULT)
            .build()
            .expect("http client construction");

        PageFetcher {
            client,
            routes,
            route_timeout,
        }
    }

    /// Try every route in order, short-circuiting on the first viable body.
    ///
    /// Route-local failures are logged and absorbed; only the aggregate
    /// [`FetchError`] carrying the last per-route diagnostic escapes.
    pub fn fetch(&self, target_url: &str) -> Result<String, FetchError> {
        let mut attempts = 0;
        let mut last: Option<(&'static str, RouteError)> = None;

        for route in &self.routes {
            attempts += 1;
            log::debug!("route={}: requesting {}", route.name(), route.request_url(target_url));

            match route.fetch(&self.client, target_url, self.route_timeout) {
                Ok(body) if body.len() >= MIN_VIABLE_LEN => {
                    log::debug!("route={}: viable body ({} bytes)", route.name(), body.len());
                    return Ok(body);
                }
                Ok(body) => {
                    let err = RouteError::Invalid(format!("body too short ({} bytes)", body.len()));
                    log::warn!("route={}: {err}", route.name());
                    last = Some((route.name(), err));
                }
                Err(err) => {
                    log::warn!("route={}: {err}", route.name());
                    last = Some((route.name(), err));
                }
            }
        }

        let (route, reason) =
            last.unwrap_or(("", RouteError::Invalid("no routes configured".into())));
        Err(FetchError {
            attempts,
            route: route.to_string(),
            reason,
        })
    }
}

impl Default for PageFetcher {
    fn default() -> Self {
        Self::new()
    }
}
