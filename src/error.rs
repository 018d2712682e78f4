/// Failure of a single route attempt. These never cross the fetcher
/// boundary individually; the last one is attached to the aggregate
/// [`FetchError`] once every route has been tried.
#[derive(thiserror::Error, Debug)]
pub enum RouteError {
    #[error("request timed out")]
    Timeout,

    #[error("request failed: {message}")]
    Request { status: Option<u16>, message: String },

    #[error("response not viable: {0}")]
    Invalid(String),
}

impl RouteError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RouteError::Timeout
        } else {
            RouteError::Request {
                status: err.status().map(|s| s.as_u16()),
                message: err.to_string(),
            }
        }
    }
}

/// Every configured route was tried and none produced a viable page body.
#[derive(thiserror::Error, Debug)]
#[error("retrieval failed after {attempts} route attempt(s), last route '{route}': {reason}")]
pub struct FetchError {
    pub attempts: usize,
    pub route: String,
    pub reason: RouteError,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
}
