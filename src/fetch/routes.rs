use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;

use crate::error::RouteError;

/// One configured relay path for retrieving a page body.
///
/// Routes are immutable configuration, tried strictly in order by
/// [`super::PageFetcher`]. Each route performs its own request so tests can
/// substitute routes that never touch the network.
pub trait RetrievalRoute: Send + Sync {
    /// Route name for diagnostics.
    fn name(&self) -> &'static str;

    /// Build the concrete relay address for a target URL.
    fn request_url(&self, target: &str) -> String;

    /// Issue the request and return the page body.
    fn fetch(&self, client: &Client, target: &str, timeout: Duration)
        -> Result<String, RouteError>;
}

/// The default route order: enveloped AllOrigins first, then the raw
/// passthrough proxies, with the readability relay as a last resort.
pub fn default_routes() -> Vec<Box<dyn RetrievalRoute>> {
    vec![
        Box::new(AllOriginsJson),
        Box::new(AllOriginsRaw),
        Box::new(CorsProxy),
        Box::new(JinaReader),
    ]
}

fn percent_encode(target: &str) -> String {
    url::form_urlencoded::byte_serialize(target.as_bytes()).collect()
}

fn get_response(
    client: &Client,
    url: &str,
    timeout: Duration,
) -> Result<reqwest::blocking::Response, RouteError> {
    let resp = client
        .get(url)
        .timeout(timeout)
        .send()
        .map_err(RouteError::from_reqwest)?;

    let status = resp.status();
    if !status.is_success() {
        return Err(RouteError::Request {
            status: Some(status.as_u16()),
            message: status.to_string(),
        });
    }
    Ok(resp)
}

fn get_text(client: &Client, url: &str, timeout: Duration) -> Result<String, RouteError> {
    get_response(client, url, timeout)?
        .text()
        .map_err(RouteError::from_reqwest)
}

/// AllOrigins `get` endpoint: wraps the page inside a JSON envelope whose
/// `contents` field carries the markup.
pub struct AllOriginsJson;

pub(crate) fn unwrap_envelope(envelope: &Value) -> Result<String, RouteError> {
    envelope
        .get("contents")
        .and_then(|v| v.as_str())
        .map(str::to_owned)
        .ok_or_else(|| RouteError::Invalid("envelope has no contents field".into()))
}

impl RetrievalRoute for AllOriginsJson {
    fn name(&self) -> &'static str {
        "allorigins-json"
    }

    fn request_url(&self, target: &str) -> String {
        format!("https://api.allorigins.win/get?url={}", percent_encode(target))
    }

    fn fetch(
        &self,
        client: &Client,
        target: &str,
        timeout: Duration,
    ) -> Result<String, RouteError> {
        let resp = get_response(client, &self.request_url(target), timeout)?;
        let envelope = resp.json::<Value>().map_err(|err| {
            if err.is_timeout() {
                RouteError::Timeout
            } else {
                RouteError::Invalid(format!("malformed envelope: {err}"))
            }
        })?;
        unwrap_envelope(&envelope)
    }
}

/// AllOrigins `raw` endpoint: passes the page body through unchanged.
pub struct AllOriginsRaw;

impl RetrievalRoute for AllOriginsRaw {
    fn name(&self) -> &'static str {
        "allorigins-raw"
    }

    fn request_url(&self, target: &str) -> String {
        format!("https://api.allorigins.win/raw?url={}", percent_encode(target))
    }

    fn fetch(
        &self,
        client: &Client,
        target: &str,
        timeout: Duration,
    ) -> Result<String, RouteError> {
        get_text(client, &self.request_url(target), timeout)
    }
}

/// corsproxy.io passthrough.
pub struct CorsProxy;

impl RetrievalRoute for CorsProxy {
    fn name(&self) -> &'static str {
        "corsproxy"
    }

    fn request_url(&self, target: &str) -> String {
        format!("https://corsproxy.io/?url={}", percent_encode(target))
    }

    fn fetch(
        &self,
        client: &Client,
        target: &str,
        timeout: Duration,
    ) -> Result<String, RouteError> {
        get_text(client, &self.request_url(target), timeout)
    }
}

/// Jina reader relay. Returns a readability-style rendition of the page;
/// meta tags are gone but embedded JSON blobs usually survive, so the
/// extractor's field scans still apply.
pub struct JinaReader;

impl RetrievalRoute for JinaReader {
    fn name(&self) -> &'static str {
        "jina-reader"
    }

    fn request_url(&self, target: &str) -> String {
        format!("https://r.jina.ai/{target}")
    }

    fn fetch(
        &self,
        client: &Client,
        target: &str,
        timeout: Duration,
    ) -> Result<String, RouteError> {
        get_text(client, &self.request_url(target), timeout)
    }
}
