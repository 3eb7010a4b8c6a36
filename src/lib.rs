//! # Backstop - a resilient access layer for JSON APIs
//!
//! Backstop is a typed HTTP access layer built on top of `reqwest`. It gives
//! every call a bounded latency (per-attempt timeouts enforced by
//! cancellation), bounded retries (exponential backoff, transport failures
//! only), and a single structured error type, plus a thin domain-service
//! layer for the dashboard's `/users` and `/payments` resources.
//!
//! ## Quick Start
//!
//! ```no_run
//! use backstop::Client;
//! use serde::{Deserialize, Serialize};
//! use std::time::Duration;
//!
//! #[derive(Serialize)]
//! struct CreateUser {
//!     name: String,
//!     email: String,
//! }
//!
//! #[derive(Deserialize)]
//! struct User {
//!     id: String,
//!     name: String,
//!     email: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), backstop::Error> {
//!     // Base URL from API_BASE_URL, default http://localhost:3000/api.
//!     let client = Client::from_env()?;
//!
//!     // GET: up to 3 transport attempts, 100ms/200ms backoff between them.
//!     let user = client.get::<User>("/users/u1").await?;
//!     println!("User: {}", user.data.name);
//!     println!("Took {:?} over {} attempt(s)", user.latency, user.attempts);
//!
//!     // POST: one attempt; mutations are never blindly replayed.
//!     let created = client
//!         .post::<_, User>(
//!             "/users",
//!             &CreateUser {
//!                 name: "Alice".to_string(),
//!                 email: "alice@example.com".to_string(),
//!             },
//!         )
//!         .await?;
//!     println!("Created user {}", created.data.id);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Failure model
//!
//! Everything a call can fail with is an [`Error`]:
//!
//! - a non-2xx response becomes [`Error::Api`] with the HTTP status, the
//!   status text as the message, and the parsed body as `details` — it is
//!   surfaced immediately, never retried;
//! - a deadline expiry cancels the in-flight request and becomes
//!   `Error::Api` with status 408 and message "Request timeout";
//! - a 2xx response that is not JSON becomes `Error::Api` with status 500
//!   and message "Invalid response type";
//! - transport failures ([`Error::Network`]) are retried per policy, then
//!   surfaced as the transport reported them.
//!
//! ```no_run
//! use backstop::{Client, Error};
//!
//! # async fn example() -> Result<(), Error> {
//! # let client = Client::from_env()?;
//! match client.get::<serde_json::Value>("/endpoint").await {
//!     Ok(response) => println!("Success: {:?}", response.data),
//!     Err(Error::Api { status, message, .. }) => {
//!         eprintln!("API error {status}: {message}");
//!     }
//!     Err(e) => eprintln!("Other error: {e}"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Services
//!
//! The [`services`] layer wraps the client per resource: it validates input
//! before any HTTP call, re-validates records coming back, and re-labels API
//! failures with resource context (`"Failed to fetch users: Not Found"`).
//!
//! ```no_run
//! use backstop::{Client, services::{PageRequest, UserService}};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let users = UserService::new(Client::from_env()?);
//! let page = users.list(PageRequest::default()).await?;
//! println!("{} of {} users", page.data.len(), page.total);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
pub mod options;
mod response;
pub mod retry;
pub mod services;

pub use client::{Client, ClientBuilder, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use options::RequestOptions;
pub use response::{Envelope, Response};
