use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use todo_core::ErrorEnvelope;
use url::Url;

use crate::error::{ApiError, Result};

/// Environment variable holding the API base URL
pub const BASE_URL_ENV: &str = "TODO_API_URL";

/// Typed gateway for the todo API
///
/// Cloning is cheap and shares the underlying connection pool. The client
/// holds no per-call state; concurrent calls are fully independent.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: Url,
    http: reqwest::Client,
}

impl TodoClient {
    /// Create a new client pointing at the given base URL
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or not http(s)
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::Config(format!("invalid base URL: {e}")))?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ApiError::Config(format!(
                "base URL must use http or https, got `{}`",
                base_url.scheme()
            )));
        }

        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    /// Create a client from the `TODO_API_URL` environment variable
    ///
    /// The variable is read once, here. A missing value fails immediately
    /// rather than on the first call.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(BASE_URL_ENV)
            .map_err(|_| ApiError::Config(format!("{BASE_URL_ENV} is not set")))?;

        Self::new(&base_url)
    }

    /// Use a preconfigured `reqwest` client (proxies, TLS roots, ...)
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Get the base URL
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Send a `GET` request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request::<T, ()>(Method::GET, path, None, HeaderMap::new())
            .await
    }

    /// Send a `POST` request with a JSON body
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(body), HeaderMap::new())
            .await
    }

    /// Send a `PATCH` request with a JSON body
    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PATCH, path, Some(body), HeaderMap::new())
            .await
    }

    /// Send a `DELETE` request
    ///
    /// Endpoints answering `204 No Content` resolve with `()` (or `None`)
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request::<T, ()>(Method::DELETE, path, None, HeaderMap::new())
            .await
    }

    /// Check server liveness
    pub async fn health(&self) -> Result<serde_json::Value> {
        self.get("/health").await
    }

    /// Issue a single request and apply the response contract
    ///
    /// `Content-Type: application/json` is always sent unless `headers`
    /// carries its own value. The body, when present, is serialized with
    /// `serde_json` and sent as-is.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Api`] for any non-2xx status
    /// - [`ApiError::Http`] for transport failures
    /// - [`ApiError::Serialize`] / [`ApiError::Decode`] for body (de)serialization
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        headers: HeaderMap,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = make_url(&self.base_url, path)?;

        let mut builder = self
            .http
            .request(method.clone(), url.clone())
            .headers(merge_headers(headers));

        if let Some(body) = body {
            let bytes = serde_json::to_vec(body).map_err(ApiError::Serialize)?;
            builder = builder.body(bytes);
        }

        let response = builder.send().await?;
        tracing::debug!(%method, %url, status = response.status().as_u16(), "api response");

        let response = handle_error(response).await?;
        decode(response).await
    }
}

// -- Helper functions --

/// Append a path to the base URL, keeping any path prefix on the base
fn make_url(base_url: &Url, path: &str) -> Result<Url> {
    let base = base_url.as_str().trim_end_matches('/');
    let joined = if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    };

    Url::parse(&joined).map_err(|e| ApiError::Config(format!("invalid request path `{path}`: {e}")))
}

/// Default JSON content type, overridden by any caller-supplied header
fn merge_headers(caller: HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.extend(caller);
    headers
}

/// Check an HTTP response for errors
///
/// The body of a failed response is decoded as an error envelope; anything
/// unreadable or malformed degrades to an empty envelope so the status is
/// never masked by a parse failure.
async fn handle_error(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.bytes().await.unwrap_or_default();
    let envelope = ErrorEnvelope::parse_lenient(&body);

    Err(ApiError::Api {
        status: status.as_u16(),
        message: envelope.error.unwrap_or_else(|| reason_phrase(status)),
        code: envelope.code,
    })
}

fn reason_phrase(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map_or_else(|| format!("HTTP {}", status.as_u16()), str::to_owned)
}

/// Decode a successful response
///
/// `204 No Content` never touches the body; the caller's type is built
/// from JSON `null`, which `()` and `Option<_>` accept.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    if response.status() == StatusCode::NO_CONTENT {
        return T::deserialize(serde_json::Value::Null).map_err(ApiError::Decode);
    }

    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(ApiError::Decode)
}
