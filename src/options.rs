//! Per-request options and override resolution.

use crate::retry::default_attempts;
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use std::collections::HashMap;
use std::time::Duration;

/// Options for an individual HTTP request.
///
/// Besides the method, path, headers, and query string, a request can
/// override the client's timeout and the verb's default attempt count.
/// Anything left unset falls back to the client-wide or per-verb default.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// The HTTP method (GET, POST, etc.).
    pub method: Method,

    /// The request path (appended to the base URL).
    pub path: String,

    /// Additional headers for this request.
    pub headers: HeaderMap,

    /// Query parameters for this request.
    pub query_params: HashMap<String, String>,

    /// Per-call timeout override.
    pub timeout: Option<Duration>,

    /// Per-call override for the total number of transport attempts.
    pub retries: Option<usize>,
}

impl RequestOptions {
    /// Creates `RequestOptions` with the given method and path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            query_params: HashMap::new(),
            timeout: None,
            retries: None,
        }
    }

    /// Adds a header to the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn with_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, crate::Error> {
        let name = HeaderName::try_from(name.as_ref()).map_err(|e| {
            crate::Error::ConfigurationError(format!("Invalid header name: {}", e))
        })?;
        let value = HeaderValue::try_from(value.as_ref()).map_err(|e| {
            crate::Error::ConfigurationError(format!("Invalid header value: {}", e))
        })?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Adds a query parameter to the request.
    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.insert(key.into(), value.into());
        self
    }

    /// Adds multiple query parameters to the request.
    pub fn with_query_params(
        mut self,
        params: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        self.query_params.extend(params);
        self
    }

    /// Overrides the timeout for this request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Overrides the total number of transport attempts for this request.
    ///
    /// A value of 1 means no retries at all; 0 is treated as 1.
    pub fn with_retries(mut self, retries: usize) -> Self {
        self.retries = Some(retries);
        self
    }

    /// Resolves the attempt count: the per-call override if set, else the
    /// verb default (3 for GET, 1 for mutating verbs). Always at least 1.
    pub fn effective_retries(&self) -> usize {
        self.retries
            .unwrap_or_else(|| default_attempts(&self.method))
            .max(1)
    }

    /// Resolves the timeout: the per-call override if set, else the client
    /// default.
    pub fn effective_timeout(&self, default: Duration) -> Duration {
        self.timeout.unwrap_or(default)
    }
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::new(Method::GET, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_retries_prefers_override() {
        let opts = RequestOptions::new(Method::POST, "/x").with_retries(5);
        assert_eq!(opts.effective_retries(), 5);
    }

    #[test]
    fn effective_retries_falls_back_to_verb_default() {
        assert_eq!(RequestOptions::new(Method::GET, "/x").effective_retries(), 3);
        assert_eq!(RequestOptions::new(Method::PUT, "/x").effective_retries(), 1);
    }

    #[test]
    fn zero_retries_still_makes_one_attempt() {
        let opts = RequestOptions::new(Method::GET, "/x").with_retries(0);
        assert_eq!(opts.effective_retries(), 1);
    }

    #[test]
    fn effective_timeout_prefers_override() {
        let opts = RequestOptions::new(Method::GET, "/x").with_timeout(Duration::from_secs(5));
        assert_eq!(
            opts.effective_timeout(Duration::from_secs(30)),
            Duration::from_secs(5)
        );

        let opts = RequestOptions::new(Method::GET, "/x");
        assert_eq!(
            opts.effective_timeout(Duration::from_secs(30)),
            Duration::from_secs(30)
        );
    }
}
