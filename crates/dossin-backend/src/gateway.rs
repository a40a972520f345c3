//! Backend gateway: schema discovery and query proxying.
//!
//! The gateway issues exactly one HTTP request per call, with no retries.
//! SQL is forwarded untouched. Validation and authorization belong to the
//! backend.

use async_trait::async_trait;
use dossin_core::{Error, QueryRequest, Result, Settings};
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

const SCHEMA_PATH: &str = "/database/schema";
const QUERY_PATH: &str = "/database/query";

/// Outbound access to the database backend.
///
/// The dispatcher depends on this trait rather than on [`HttpGateway`]
/// directly, so alternative transports can be substituted.
#[async_trait]
pub trait DatabaseGateway: Send + Sync + std::fmt::Debug {
    /// Fetches the full schema document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BackendUnavailable`] on a non-2xx status, a transport
    /// failure, or a body that is not JSON.
    async fn fetch_schema(&self) -> Result<Value>;

    /// Executes a parameterized query and returns the backend's JSON reply.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BackendUnavailable`] carrying the backend's `error` or
    /// `message` field when present, otherwise a status-derived message.
    async fn run_query(&self, request: &QueryRequest) -> Result<Value>;
}

/// [`DatabaseGateway`] over HTTP.
///
/// # Examples
///
/// ```
/// use dossin_backend::HttpGateway;
/// use dossin_core::Settings;
///
/// let gateway = HttpGateway::new(&Settings::new("http://localhost:8080/api")).unwrap();
/// assert_eq!(gateway.base_url(), "http://localhost:8080/api");
/// ```
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

/// Structured error body returned by the backend.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

impl HttpGateway {
    /// Builds a gateway for the backend configured in `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BackendUnavailable`] if the HTTP client cannot be
    /// constructed (e.g. TLS backend initialization failure).
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.backend_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| Error::BackendUnavailable {
            status: None,
            message: format!("Failed to build HTTP client: {e}"),
        })?;

        Ok(Self {
            client,
            base_url: settings.backend_url.clone(),
        })
    }

    /// Returns the backend base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl DatabaseGateway for HttpGateway {
    async fn fetch_schema(&self) -> Result<Value> {
        let url = self.endpoint(SCHEMA_PATH);
        debug!(url = %url, "GET request");

        let response = self
            .client
            .get(&url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(|e| transport_error(&url, &e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Schema request failed");
            return Err(Error::BackendUnavailable {
                status: Some(status.as_u16()),
                message: format!("Failed to fetch schema: {}", status_line(status)),
            });
        }

        response.json().await.map_err(|e| decode_error(&url, &e))
    }

    async fn run_query(&self, request: &QueryRequest) -> Result<Value> {
        let url = self.endpoint(QUERY_PATH);
        debug!(url = %url, params = request.params.len(), "POST request");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| transport_error(&url, &e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = structured_message(&body).unwrap_or_else(|| {
                format!("Failed to execute query: {}", status_line(status))
            });
            warn!(status = status.as_u16(), %message, "Query request failed");
            return Err(Error::BackendUnavailable {
                status: Some(status.as_u16()),
                message,
            });
        }

        response.json().await.map_err(|e| decode_error(&url, &e))
    }
}

/// Extracts `error` (preferred) or `message` from a JSON error body.
fn structured_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .error
        .filter(|s| !s.is_empty())
        .or_else(|| parsed.message.filter(|s| !s.is_empty()))
}

fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_u16()),
        None => status.as_u16().to_string(),
    }
}

fn transport_error(url: &str, err: &reqwest::Error) -> Error {
    warn!(url, error = %err, "Backend unreachable");
    Error::BackendUnavailable {
        status: None,
        message: format!("Request to {url} failed: {err}"),
    }
}

fn decode_error(url: &str, err: &reqwest::Error) -> Error {
    Error::BackendUnavailable {
        status: None,
        message: format!("Invalid JSON response from {url}: {err}"),
    }
}
