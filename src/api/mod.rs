//! HTTP client for the remote product endpoint
//!
//! A thin request wrapper: one call per invocation, JSON in and out,
//! no retries and no caching. Failures are normalized into ApiError so
//! callers never deal with reqwest types directly.

use serde::de::DeserializeOwned;

pub mod table;

/// Fallback shown when a failed response carries no usable message
const GENERIC_FAILURE: &str = "Something went wrong. Please refresh the page and try again!!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Options for a single request
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub method: HttpMethod,
    pub body: Option<serde_json::Value>,
}

impl FetchOptions {
    pub fn get() -> Self {
        Self::default()
    }
}

/// A successful response: HTTP status plus the parsed body
#[derive(Debug, Clone)]
pub struct FetchResponse<T> {
    pub status: u16,
    pub data: T,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Programmer error, caught before any network I/O
    #[error("URL is required")]
    InvalidRequest,

    /// Transport failure before a response arrived
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status
    #[error("request failed ({status}): {message}")]
    RequestFailed { status: u16, message: String },

    /// The response body did not match the expected shape
    #[error("failed to parse response: {0}")]
    Parse(String),
}

/// Issue a single HTTP request and parse the JSON response body as `T`.
///
/// A non-success status becomes `RequestFailed` carrying the server's
/// `message` field when the body has one, whether or not the rest of the
/// body parses. The declared shape is enforced here so unchecked JSON
/// never crosses into the rest of the app.
pub async fn send_request<T: DeserializeOwned>(
    url: &str,
    options: FetchOptions,
) -> Result<FetchResponse<T>, ApiError> {
    if url.is_empty() {
        return Err(ApiError::InvalidRequest);
    }

    let mut request = reqwest::Client::new()
        .request(options.method.into(), url)
        .header(reqwest::header::CONTENT_TYPE, "application/json");

    if let Some(body) = &options.body {
        request = request.json(body);
    }

    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !status.is_success() {
        return Err(ApiError::RequestFailed {
            status: status.as_u16(),
            message: failure_message(&text),
        });
    }

    let data = serde_json::from_str(&text).map_err(|e| ApiError::Parse(e.to_string()))?;

    Ok(FetchResponse {
        status: status.as_u16(),
        data,
    })
}

/// Pull the server-provided `message` out of an error body, if any
fn failure_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message")?.as_str().map(str::to_owned))
        .unwrap_or_else(|| GENERIC_FAILURE.to_owned())
}
