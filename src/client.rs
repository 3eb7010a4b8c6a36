//! HTTP client with per-call timeouts and bounded, policy-driven retries.
//!
//! The [`Client`] type is the main entry point. Use [`ClientBuilder`] to
//! configure one, or [`Client::from_env`] to pick the base URL up from the
//! environment.

use crate::{options::RequestOptions, retry::Backoff, Error, Response, Result};
use http::{header, HeaderMap, HeaderName, HeaderValue, Method};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// Environment variable naming the API root.
pub const BASE_URL_ENV: &str = "API_BASE_URL";

/// Base URL used when [`BASE_URL_ENV`] is unset: an API mounted at `/api`
/// next to a locally running frontend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// An HTTP client for JSON APIs with per-call timeouts and bounded retries.
///
/// The client is constructed once and reused: it holds a connection pool and
/// immutable configuration (base URL, default timeout, default headers) that
/// applies to every request. Cloning is cheap and shares the pool.
///
/// Timeouts bound each transport attempt, and only transport-level failures
/// (deadline expiry, network errors) are retried. An HTTP error response is
/// surfaced immediately as [`Error::Api`] without consuming further attempts.
///
/// # Examples
///
/// ```no_run
/// use backstop::Client;
/// use serde::{Deserialize, Serialize};
/// use std::time::Duration;
///
/// #[derive(Serialize)]
/// struct CreateUser {
///     name: String,
///     email: String,
/// }
///
/// #[derive(Deserialize)]
/// struct User {
///     id: String,
///     name: String,
///     email: String,
/// }
///
/// # async fn example() -> Result<(), backstop::Error> {
/// let client = Client::builder()
///     .base_url("https://api.example.com/api")?
///     .timeout(Duration::from_secs(30))
///     .build()?;
///
/// // GET request; up to 3 transport attempts by default.
/// let user = client.get::<User>("/users/u1").await?;
/// println!("User: {}", user.data.name);
///
/// // POST request; a single attempt by default.
/// let created = client
///     .post::<_, User>(
///         "/users",
///         &CreateUser {
///             name: "Alice".to_string(),
///             email: "alice@example.com".to_string(),
///         },
///     )
///     .await?;
/// println!("Created user {}", created.data.id);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    base_url: Url,
    default_headers: HeaderMap,
    timeout: Duration,
}

impl Client {
    /// Creates a new `ClientBuilder` for configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Builds a client from the environment.
    ///
    /// Reads the base URL from `API_BASE_URL`, falling back to
    /// [`DEFAULT_BASE_URL`]. This is the only external configuration knob;
    /// everything else is set per call.
    pub fn from_env() -> Result<Client> {
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Client::builder().base_url(base_url)?.build()
    }

    /// Makes a typed HTTP request.
    ///
    /// This is the core method the verb wrappers delegate to. It serializes
    /// the body once, runs the transport attempt loop, then classifies the
    /// response.
    ///
    /// The effective timeout (per-call override, else client default) bounds
    /// each attempt rather than the whole call: a backoff sleep between
    /// attempts always runs to completion, so total latency can exceed the
    /// timeout when retries are in play.
    ///
    /// # Type Parameters
    ///
    /// * `Req` - The request body type (must implement `Serialize`)
    /// * `Res` - The response body type (must implement `DeserializeOwned`)
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use backstop::{Client, RequestOptions};
    /// use http::Method;
    /// use std::time::Duration;
    ///
    /// # async fn example() -> Result<(), backstop::Error> {
    /// let client = Client::builder()
    ///     .base_url("https://api.example.com/api")?
    ///     .build()?;
    ///
    /// let options = RequestOptions::new(Method::GET, "/users")
    ///     .with_query_param("page", "1")
    ///     .with_timeout(Duration::from_secs(5))
    ///     .with_retries(2);
    ///
    /// let users = client
    ///     .call::<(), serde_json::Value>(options, None)
    ///     .await?;
    /// println!("{}", users.data);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn call<Req, Res>(
        &self,
        options: RequestOptions,
        body: Option<&Req>,
    ) -> Result<Response<Res>>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        let body = match body {
            Some(body) => Some(
                serde_json::to_value(body).map_err(|e| Error::SerializationFailed(e.to_string()))?,
            ),
            None => None,
        };

        let max_attempts = options.effective_retries();
        let timeout = options.effective_timeout(self.inner.timeout);
        let start_time = Instant::now();

        let (response, attempts) = self
            .send_with_retry(&options, body.as_ref(), timeout, max_attempts)
            .await?;

        let latency = start_time.elapsed();
        self.parse_response(response, latency, attempts).await
    }

    /// Runs the transport attempt loop.
    ///
    /// Only transport failures reach the retry path; a response with any HTTP
    /// status, including 5xx, ends the loop. The final attempt's error
    /// propagates unchanged.
    async fn send_with_retry(
        &self,
        options: &RequestOptions,
        body: Option<&serde_json::Value>,
        timeout: Duration,
        max_attempts: usize,
    ) -> Result<(reqwest::Response, usize)> {
        let backoff = Backoff::default();
        let mut attempt = 0;

        loop {
            match self.execute_request(options, body, timeout, attempt).await {
                Ok(response) => return Ok((response, attempt + 1)),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        attempt = attempt + 1,
                        method = %options.method,
                        path = %options.path,
                        "Transport attempt failed"
                    );

                    if attempt + 1 >= max_attempts {
                        return Err(e);
                    }

                    let delay = backoff.delay_for(attempt);
                    tracing::info!(
                        delay_ms = delay.as_millis() as u64,
                        attempt = attempt + 1,
                        "Retrying request after delay"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Executes a single transport attempt under its deadline.
    async fn execute_request(
        &self,
        options: &RequestOptions,
        body: Option<&serde_json::Value>,
        timeout: Duration,
        attempt: usize,
    ) -> Result<reqwest::Response> {
        let url = self.request_url(options)?;

        tracing::debug!(
            method = %options.method,
            url = %url,
            attempt = attempt + 1,
            "Executing HTTP request"
        );

        let mut request = self.inner.http_client.request(options.method.clone(), url);

        for (name, value) in &self.inner.default_headers {
            request = request.header(name, value);
        }

        for (name, value) in &options.headers {
            request = request.header(name, value);
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        // The deadline future created here is the only cancellation source
        // for this attempt; when it fires, the send future is dropped, which
        // aborts the in-flight request.
        match tokio::time::timeout(timeout, request.send()).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(e)) => Err(Error::Network(e)),
            Err(_) => Err(Error::timeout()),
        }
    }

    /// Builds the full request URL: base URL + path, then query pairs.
    fn request_url(&self, options: &RequestOptions) -> Result<Url> {
        let base = self.inner.base_url.as_str().trim_end_matches('/');
        let mut url = Url::parse(&format!("{}{}", base, options.path))?;

        for (key, value) in &options.query_params {
            url.query_pairs_mut().append_pair(key, value);
        }

        Ok(url)
    }

    /// Classifies the response and deserializes a successful JSON body.
    async fn parse_response<Res>(
        &self,
        response: reqwest::Response,
        latency: Duration,
        attempts: usize,
    ) -> Result<Response<Res>>
    where
        Res: DeserializeOwned,
    {
        let status = response.status();
        let headers = response.headers().clone();

        tracing::info!(
            status = status.as_u16(),
            latency_ms = latency.as_millis() as u64,
            attempts = attempts,
            "Received HTTP response"
        );

        if !status.is_success() {
            let status_text = status.canonical_reason().unwrap_or("Unknown error");
            let raw_response = response.text().await.unwrap_or_default();

            // The body is kept only as details; the message is always the
            // status text, which is what service-layer messages are built
            // against.
            let details = serde_json::from_str(&raw_response)
                .unwrap_or_else(|_| serde_json::Value::String(status_text.to_string()));

            if status.is_client_error() {
                tracing::error!(
                    status = status.as_u16(),
                    response = %raw_response,
                    "Client error (4xx)"
                );
            } else if status.is_server_error() {
                tracing::warn!(
                    status = status.as_u16(),
                    response = %raw_response,
                    "Server error (5xx)"
                );
            }

            return Err(Error::Api {
                status,
                message: status_text.to_string(),
                details: Some(details),
            });
        }

        let is_json = headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.contains("application/json"))
            .unwrap_or(false);

        if !is_json {
            tracing::error!(
                status = status.as_u16(),
                "Success response without a JSON content type"
            );
            return Err(Error::invalid_content_type());
        }

        let raw_body = response.text().await?;

        match serde_json::from_str::<Res>(&raw_body) {
            Ok(data) => Ok(Response::new(
                data, raw_body, status, headers, latency, attempts,
            )),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    raw_response = %raw_body,
                    "Failed to deserialize response"
                );

                Err(Error::DeserializationFailed {
                    raw_response: raw_body,
                    serde_error: e.to_string(),
                    status,
                })
            }
        }
    }

    /// Makes a GET request to the specified path.
    ///
    /// Defaults to 3 transport attempts with exponential backoff between
    /// them; use [`Client::call`] with [`RequestOptions`] to override.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use backstop::Client;
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct User { name: String }
    ///
    /// # async fn example() -> Result<(), backstop::Error> {
    /// let client = Client::from_env()?;
    /// let user = client.get::<User>("/users/u1").await?;
    /// println!("User: {}", user.data.name);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get<Res>(&self, path: impl Into<String>) -> Result<Response<Res>>
    where
        Res: DeserializeOwned,
    {
        let options = RequestOptions::new(Method::GET, path);
        self.call::<(), Res>(options, None).await
    }

    /// Makes a POST request with a JSON body.
    ///
    /// Mutating verbs are not retried by default; a transport failure
    /// surfaces after a single attempt.
    pub async fn post<Req, Res>(&self, path: impl Into<String>, body: &Req) -> Result<Response<Res>>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        let options = RequestOptions::new(Method::POST, path);
        self.call(options, Some(body)).await
    }

    /// Makes a PUT request with a JSON body. Not retried by default.
    pub async fn put<Req, Res>(&self, path: impl Into<String>, body: &Req) -> Result<Response<Res>>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        let options = RequestOptions::new(Method::PUT, path);
        self.call(options, Some(body)).await
    }

    /// Makes a PATCH request with a JSON body. Not retried by default.
    pub async fn patch<Req, Res>(
        &self,
        path: impl Into<String>,
        body: &Req,
    ) -> Result<Response<Res>>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        let options = RequestOptions::new(Method::PATCH, path);
        self.call(options, Some(body)).await
    }

    /// Makes a DELETE request to the specified path. Not retried by default.
    pub async fn delete<Res>(&self, path: impl Into<String>) -> Result<Response<Res>>
    where
        Res: DeserializeOwned,
    {
        let options = RequestOptions::new(Method::DELETE, path);
        self.call::<(), Res>(options, None).await
    }
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use backstop::ClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), backstop::Error> {
/// let client = ClientBuilder::new()
///     .base_url("https://api.example.com/api")?
///     .timeout(Duration::from_secs(10))
///     .default_header("User-Agent", "admin-dashboard/1.0")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    base_url: Option<Url>,
    default_headers: HeaderMap,
    timeout: Duration,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with the default 30 second timeout.
    pub fn new() -> Self {
        Self {
            base_url: None,
            default_headers: HeaderMap::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the base URL all request paths are appended to.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        self.base_url = Some(Url::parse(url.as_ref())?);
        Ok(self)
    }

    /// Adds a default header included in every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Sets the default per-attempt timeout. Individual requests can override
    /// it via [`RequestOptions::with_timeout`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns an error if no base URL was provided or the underlying HTTP
    /// client cannot be constructed.
    pub fn build(self) -> Result<Client> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::ConfigurationError("Base URL is required".to_string()))?;

        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::ConfigurationError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Client {
            inner: Arc::new(ClientInner {
                http_client,
                base_url,
                default_headers: self.default_headers,
                timeout: self.timeout,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> Client {
        Client::builder().base_url(base).unwrap().build().unwrap()
    }

    #[test]
    fn request_url_appends_path_to_base_path() {
        let client = client("http://localhost:3000/api");
        let options = RequestOptions::new(Method::GET, "/users/u1");
        let url = client.request_url(&options).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/users/u1");
    }

    #[test]
    fn request_url_tolerates_trailing_slash_on_base() {
        let client = client("http://localhost:3000/api/");
        let options = RequestOptions::new(Method::GET, "/users");
        let url = client.request_url(&options).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/users");
    }

    #[test]
    fn request_url_appends_query_pairs() {
        let client = client("http://localhost:3000/api");
        let options = RequestOptions::new(Method::GET, "/users").with_query_param("page", "2");
        let url = client.request_url(&options).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/users?page=2");
    }
}
