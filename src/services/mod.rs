//! Domain services: the business-logic layer between callers and the client.
//!
//! Each service owns one resource path (`/users`, `/payments`) and follows
//! the same discipline per operation: validate input, make exactly one
//! client call, optionally re-validate the response, and re-label API
//! failures with a resource-specific message. Services recover nothing; they
//! only translate.

mod payments;
mod types;
mod users;

pub use payments::PaymentService;
pub use types::{
    CreatePayment, CreateUser, Payment, PaymentMethod, PaymentStatus, Role, UpdateUser, User,
    UserStatus,
};
pub use users::UserService;

use crate::Error;
use serde::{Deserialize, Serialize};

/// A single validation violation: which field, and what is wrong with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// The offending field.
    pub field: &'static str,
    /// Human-readable description of the violation.
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors produced by the service layer.
///
/// API failures are wrapped with resource context (`"Failed to fetch users:
/// Not Found"`); everything else from the client passes through unchanged.
#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    /// An API failure re-labelled with the operation's context.
    ///
    /// `message` is the client error's message, which for HTTP error
    /// responses is the status text.
    #[error("{context}: {message}")]
    Domain {
        /// Resource-specific prefix, e.g. "Failed to fetch users".
        context: &'static str,
        /// The underlying API error's message.
        message: String,
        /// The client error that was wrapped.
        #[source]
        source: Error,
    },

    /// A non-API client error (transport, decode), passed through unchanged.
    #[error(transparent)]
    Client(#[from] Error),

    /// Input or response validation failed.
    #[error("Validation failed: {}", format_violations(.0))]
    Validation(Vec<FieldError>),
}

impl ServiceError {
    /// Returns a closure wrapping a client error with the given context.
    ///
    /// Only [`Error::Api`] gets the context label; other errors pass through,
    /// matching how callers distinguish "the API said no" from "the network
    /// broke".
    pub(crate) fn wrap(context: &'static str) -> impl FnOnce(Error) -> ServiceError {
        move |err| {
            if let Error::Api { message, .. } = &err {
                ServiceError::Domain {
                    context,
                    message: message.clone(),
                    source: err,
                }
            } else {
                ServiceError::Client(err)
            }
        }
    }

    /// Returns the validation violations, if this is a validation failure.
    pub fn field_errors(&self) -> Option<&[FieldError]> {
        match self {
            ServiceError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

fn format_violations(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(FieldError::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Accumulates [`FieldError`]s across the checks of one validation pass.
#[derive(Debug, Default)]
pub(crate) struct Violations {
    errors: Vec<FieldError>,
}

impl Violations {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub(crate) fn finish(self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Rejects an empty or whitespace-only identifier before any HTTP call.
pub(crate) fn require(
    field: &'static str,
    value: &str,
    message: &str,
) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        Err(ServiceError::Validation(vec![FieldError {
            field,
            message: message.to_string(),
        }]))
    } else {
        Ok(())
    }
}

/// Pagination parameters for list operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    /// 1-indexed page number.
    pub page: u32,
    /// Page size, at most 100.
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}

impl PageRequest {
    /// Validates the pagination bounds: page >= 1, 1 <= limit <= 100.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut violations = Violations::new();
        if self.page == 0 {
            violations.push("page", "Page must be positive");
        }
        if self.limit == 0 || self.limit > 100 {
            violations.push("limit", "Limit must be between 1 and 100");
        }
        violations.finish()
    }
}

/// One page of a listed resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// The records on this page.
    pub data: Vec<T>,
    /// Total records across all pages.
    pub total: u64,
    /// 1-indexed page number.
    pub page: u32,
    /// Page size used for this query.
    pub limit: u32,
    /// Whether further pages exist.
    pub has_more: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn wrap_labels_api_errors_with_context() {
        let err = Error::Api {
            status: StatusCode::NOT_FOUND,
            message: "Not Found".to_string(),
            details: None,
        };
        let wrapped = ServiceError::wrap("Failed to fetch users")(err);
        assert_eq!(wrapped.to_string(), "Failed to fetch users: Not Found");
    }

    #[test]
    fn wrap_passes_other_errors_through() {
        let err = Error::SerializationFailed("bad body".to_string());
        let wrapped = ServiceError::wrap("Failed to create user")(err);
        assert_eq!(wrapped.to_string(), "Failed to serialize request: bad body");
    }

    #[test]
    fn page_request_bounds() {
        assert!(PageRequest::default().validate().is_ok());
        assert!(PageRequest { page: 0, limit: 10 }.validate().is_err());
        assert!(PageRequest { page: 1, limit: 0 }.validate().is_err());
        assert!(PageRequest { page: 1, limit: 101 }.validate().is_err());
        assert!(PageRequest { page: 1, limit: 100 }.validate().is_ok());
    }

    #[test]
    fn validation_error_lists_fields() {
        let err = ServiceError::Validation(vec![
            FieldError {
                field: "name",
                message: "Name must be at least 2 characters".to_string(),
            },
            FieldError {
                field: "email",
                message: "Invalid email address".to_string(),
            },
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: name: Name must be at least 2 characters, email: Invalid email address"
        );
        assert_eq!(err.field_errors().map(|e| e.len()), Some(2));
    }
}
