//! Per-call overrides and failure handling.
//!
//! This demo shows how to:
//! - Tighten the timeout and widen the retry budget for one call
//! - Match on the single error type the client produces
//!
//! Run with: `cargo run --example resilience`

use backstop::{Client, Error, RequestOptions};
use http::Method;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("backstop=debug,resilience=info")
        .init();

    let client = Client::from_env()?;

    // A latency-sensitive read: 2s deadline per attempt, 5 attempts.
    let options = RequestOptions::new(Method::GET, "/payments/stats")
        .with_timeout(Duration::from_secs(2))
        .with_retries(5);

    match client.call::<(), serde_json::Value>(options, None).await {
        Ok(response) => {
            println!("Stats after {} attempt(s): {}", response.attempts, response.data);
        }
        Err(Error::Api {
            status,
            message,
            details,
        }) => {
            // Timeouts arrive here as 408 "Request timeout"; HTTP errors
            // carry the status text and the parsed body.
            eprintln!("API error {status}: {message}");
            if let Some(details) = details {
                eprintln!("  details: {details}");
            }
        }
        Err(Error::Network(e)) => {
            eprintln!("Transport failure after retries: {e}");
        }
        Err(e) => eprintln!("Unexpected failure: {e}"),
    }

    Ok(())
}
