//! Error types for the access layer.
//!
//! Every failure a [`Client`](crate::Client) can produce is an [`Error`]. HTTP
//! error responses, deadline expiries, and non-JSON success bodies are all
//! folded into the [`Error::Api`] variant so callers match on a single shape;
//! transport-level failures are surfaced as whatever `reqwest` reported.

use http::StatusCode;

/// The one error type crossing the client boundary.
///
/// # Examples
///
/// ```no_run
/// use backstop::{Client, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::builder()
///     .base_url("https://api.example.com")?
///     .build()?;
///
/// match client.get::<serde_json::Value>("/endpoint").await {
///     Ok(response) => println!("Success: {:?}", response.data),
///     Err(Error::Api { status, message, details }) => {
///         eprintln!("API error {status}: {message}");
///         if let Some(details) = details {
///             eprintln!("  details: {details}");
///         }
///     }
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A network-level error occurred (connection refused, DNS lookup failed,
    /// TLS handshake failed, etc.).
    ///
    /// This wraps the underlying `reqwest::Error` unchanged and indicates a
    /// problem below the HTTP protocol layer.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The structured API error: a non-2xx response, a normalized timeout, or
    /// a success response whose body was not JSON.
    ///
    /// # Fields
    ///
    /// * `status` - the HTTP status of the response; 408 for deadline
    ///   expiries, 500 for content-type violations
    /// * `message` - for HTTP error responses this is the status text
    ///   (canonical reason), never a message field from the body
    /// * `details` - best-effort parse of the error body as JSON, falling
    ///   back to the status text; `None` for timeouts and content-type
    ///   violations
    #[error("API error {status}: {message}")]
    Api {
        /// The HTTP status code.
        status: StatusCode,
        /// The status text of the response.
        message: String,
        /// The parsed error body, when one was readable.
        details: Option<serde_json::Value>,
    },

    /// A 2xx JSON response did not match the caller's expected type.
    ///
    /// The raw body and the serde message are both preserved so the mismatch
    /// can be debugged from logs alone.
    #[error("Failed to deserialize response (status {status}): {serde_error}")]
    DeserializationFailed {
        /// The raw response body that failed to deserialize.
        raw_response: String,
        /// The serde error message.
        serde_error: String,
        /// The HTTP status code.
        status: StatusCode,
    },

    /// The request body could not be serialized to JSON.
    #[error("Failed to serialize request: {0}")]
    SerializationFailed(String),

    /// Invalid configuration was provided, such as a missing base URL or an
    /// invalid header value.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// An invalid URL was provided or constructed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// The normalized deadline-expiry error: status 408, message
    /// "Request timeout".
    pub(crate) fn timeout() -> Self {
        Error::Api {
            status: StatusCode::REQUEST_TIMEOUT,
            message: "Request timeout".to_string(),
            details: None,
        }
    }

    /// The error for a 2xx response whose content type is not JSON: status
    /// 500, message "Invalid response type".
    pub(crate) fn invalid_content_type() -> Self {
        Error::Api {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Invalid response type".to_string(),
            details: None,
        }
    }

    /// Returns the HTTP status code if this error carries one.
    ///
    /// # Examples
    ///
    /// ```
    /// use backstop::Error;
    /// use http::StatusCode;
    ///
    /// let err = Error::Api {
    ///     status: StatusCode::NOT_FOUND,
    ///     message: "Not Found".to_string(),
    ///     details: None,
    /// };
    ///
    /// assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    /// ```
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::DeserializationFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the parsed error body, if one was captured.
    pub fn details(&self) -> Option<&serde_json::Value> {
        match self {
            Error::Api { details, .. } => details.as_ref(),
            _ => None,
        }
    }

    /// Returns the raw response body if this error preserved one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::DeserializationFailed { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }

    /// Returns `true` if this is the normalized deadline-expiry error.
    ///
    /// A server-produced 408 with the same status text looks identical once
    /// normalized; the distinction is not observable past the client
    /// boundary.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Error::Api { status, message, .. }
                if *status == StatusCode::REQUEST_TIMEOUT && message == "Request timeout"
        )
    }
}

/// A specialized `Result` type for access-layer calls.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_is_normalized_to_408() {
        let err = Error::timeout();
        assert_eq!(err.status(), Some(StatusCode::REQUEST_TIMEOUT));
        assert_eq!(
            err.to_string(),
            "API error 408 Request Timeout: Request timeout"
        );
        assert!(err.is_timeout());
    }

    #[test]
    fn content_type_violation_is_500() {
        let err = Error::invalid_content_type();
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(err.to_string().contains("Invalid response type"));
        assert!(!err.is_timeout());
    }

    #[test]
    fn details_only_on_api_errors() {
        let err = Error::Api {
            status: StatusCode::NOT_FOUND,
            message: "Not Found".to_string(),
            details: Some(serde_json::json!({"error": "no such user"})),
        };
        assert!(err.details().is_some());

        let err = Error::SerializationFailed("boom".to_string());
        assert!(err.details().is_none());
    }
}
