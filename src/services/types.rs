//! Domain records and their validation rules.
//!
//! Wire shapes are camelCase to match the dashboard API. `validate` methods
//! check the constraints serde cannot express (lengths, formats, positivity)
//! and report every violation at once rather than stopping at the first.

use crate::services::{FieldError, Violations};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

/// A user's role within the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
    Moderator,
}

/// Account standing of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
    Suspended,
}

/// A user record as the API returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// UUID, assigned by the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Absolute URL of the avatar image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl User {
    /// Checks the record's semantic constraints.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut violations = Violations::new();
        if let Some(id) = &self.id {
            if Uuid::parse_str(id).is_err() {
                violations.push("id", "Invalid UUID");
            }
        }
        check_name(&mut violations, &self.name);
        check_email(&mut violations, &self.email);
        if let Some(avatar) = &self.avatar {
            if Url::parse(avatar).is_err() {
                violations.push("avatar", "Invalid URL");
            }
        }
        violations.finish()
    }
}

/// Input for creating a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl CreateUser {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut violations = Violations::new();
        check_name(&mut violations, &self.name);
        check_email(&mut violations, &self.email);
        violations.finish()
    }
}

/// Input for updating a user; only the set fields change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl UpdateUser {
    /// At least one field must be set; set fields obey the create rules.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut violations = Violations::new();
        if self.name.is_none() && self.email.is_none() && self.phone.is_none() && self.role.is_none()
        {
            violations.push("update", "At least one field is required");
        }
        if let Some(name) = &self.name {
            check_name(&mut violations, name);
        }
        if let Some(email) = &self.email {
            check_email(&mut violations, email);
        }
        violations.finish()
    }
}

/// Lifecycle state of a payment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Failed,
}

/// How a payment was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    BankTransfer,
    Paypal,
    Cryptocurrency,
}

/// A payment record as the API returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// UUID, assigned by the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// UUID of the paying user.
    pub user_id: String,
    pub amount: f64,
    /// ISO 4217 code.
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub status: PaymentStatus,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-form key/value annotations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Payment {
    /// Checks the record's semantic constraints.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut violations = Violations::new();
        if let Some(id) = &self.id {
            if Uuid::parse_str(id).is_err() {
                violations.push("id", "Invalid UUID");
            }
        }
        check_payment_fields(
            &mut violations,
            &self.user_id,
            self.amount,
            &self.currency,
        );
        violations.finish()
    }
}

/// Input for creating a payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePayment {
    /// UUID of the paying user.
    pub user_id: String,
    pub amount: f64,
    /// ISO 4217 code, "USD" unless specified.
    #[serde(default = "default_currency")]
    pub currency: String,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreatePayment {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut violations = Violations::new();
        check_payment_fields(
            &mut violations,
            &self.user_id,
            self.amount,
            &self.currency,
        );
        violations.finish()
    }
}

fn default_currency() -> String {
    "USD".to_string()
}

fn check_name(violations: &mut Violations, name: &str) {
    if name.chars().count() < 2 {
        violations.push("name", "Name must be at least 2 characters");
    }
}

fn check_email(violations: &mut Violations, email: &str) {
    if !is_valid_email(email) {
        violations.push("email", "Invalid email address");
    }
}

fn check_payment_fields(violations: &mut Violations, user_id: &str, amount: f64, currency: &str) {
    if Uuid::parse_str(user_id).is_err() {
        violations.push("userId", "Invalid UUID");
    }
    if !(amount > 0.0) {
        violations.push("amount", "Amount must be positive");
    }
    if currency.chars().count() != 3 {
        violations.push("currency", "Currency must be a 3-letter code");
    }
}

// Deliberately loose: one '@', a non-empty local part, a dotted domain. Full
// RFC 5322 parsing buys nothing against a backend that re-validates anyway.
fn is_valid_email(value: &str) -> bool {
    if value.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains('@')
}
