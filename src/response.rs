//! Success wrapper and response-body conventions.
//!
//! The [`Response`] type wraps the deserialized body of a successful call
//! along with the transaction metadata: status, headers, total latency, and
//! how many transport attempts it took. [`Envelope`] is the loose
//! `{ success, data, error, message }` body shape some endpoints use; the
//! client never interprets it, callers opt in by deserializing into it.

use http::{HeaderMap, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A successful HTTP response with its deserialized body.
///
/// Dereferences to the data, so `response.field` works directly when you do
/// not care about the metadata.
///
/// # Type Parameters
///
/// * `T` - The type of the deserialized response body
///
/// # Examples
///
/// ```no_run
/// use backstop::Client;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct User {
///     id: String,
///     name: String,
/// }
///
/// # async fn example() -> Result<(), backstop::Error> {
/// let client = Client::builder()
///     .base_url("https://api.example.com")?
///     .build()?;
///
/// let response = client.get::<User>("/users/u1").await?;
///
/// println!("User: {}", response.data.name);
/// println!("Request took {:?}", response.latency);
/// println!("Attempts: {}", response.attempts);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Response<T> {
    /// The deserialized response body.
    pub data: T,

    /// The raw response body as a string, kept for debugging and logging.
    pub raw_body: String,

    /// The HTTP status code of the response.
    pub status: StatusCode,

    /// The response headers.
    pub headers: HeaderMap,

    /// The total latency of the call, including all retry attempts and the
    /// backoff sleeps between them.
    pub latency: Duration,

    /// The number of transport attempts made.
    ///
    /// `1` for calls that succeeded on the first try.
    pub attempts: usize,
}

impl<T> Response<T> {
    /// Creates a new `Response`. Called by the client after a successful
    /// deserialization.
    pub fn new(
        data: T,
        raw_body: String,
        status: StatusCode,
        headers: HeaderMap,
        latency: Duration,
        attempts: usize,
    ) -> Self {
        Self {
            data,
            raw_body,
            status,
            headers,
            latency,
            attempts,
        }
    }

    /// Maps the response data to a different type, preserving the metadata.
    ///
    /// # Examples
    ///
    /// ```
    /// # use backstop::Response;
    /// # use http::{HeaderMap, StatusCode};
    /// # use std::time::Duration;
    /// let response = Response::new(
    ///     42,
    ///     "42".to_string(),
    ///     StatusCode::OK,
    ///     HeaderMap::new(),
    ///     Duration::from_millis(100),
    ///     1,
    /// );
    ///
    /// let string_response = response.map(|n| n.to_string());
    /// assert_eq!(string_response.data, "42");
    /// ```
    pub fn map<U, F>(self, f: F) -> Response<U>
    where
        F: FnOnce(T) -> U,
    {
        Response {
            data: f(self.data),
            raw_body: self.raw_body,
            status: self.status,
            headers: self.headers,
            latency: self.latency,
            attempts: self.attempts,
        }
    }

    /// Returns `true` if the call needed more than one transport attempt.
    pub fn was_retried(&self) -> bool {
        self.attempts > 1
    }

    /// Returns a response header value by name, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }
}

impl<T> AsRef<T> for Response<T> {
    fn as_ref(&self) -> &T {
        &self.data
    }
}

impl<T> std::ops::Deref for Response<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

/// The `{ success, data, error, message }` body convention used by some
/// endpoints.
///
/// This is a plain deserialization target, not something the client enforces:
/// a call like `client.get::<Envelope<User>>("/users/u1")` opts in, while
/// endpoints returning bare records skip it entirely.
///
/// # Examples
///
/// ```
/// use backstop::Envelope;
///
/// let envelope: Envelope<u32> =
///     serde_json::from_str(r#"{"success":true,"data":7}"#).unwrap();
/// assert_eq!(envelope.into_data(), Some(7));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Whether the server considered the operation successful.
    pub success: bool,

    /// The payload, present on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// A machine-oriented error string, present on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// A human-oriented message, present on either outcome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Consumes the envelope and returns the payload, if any.
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}
