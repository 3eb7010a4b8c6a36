//! Basic walkthrough: an env-configured client plus the user service.
//!
//! This demo shows how to:
//! - Build a client from `API_BASE_URL` (default `http://localhost:3000/api`)
//! - List users through the service layer
//! - Create a user with input validation in front of the wire call
//!
//! Run with: `cargo run --example basic`

use backstop::services::{CreateUser, PageRequest, UserService};
use backstop::Client;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("backstop=debug,basic=info")
        .init();

    let client = Client::from_env()?;
    let users = UserService::new(client);

    println!("=== Listing users ===");
    let page = users.list(PageRequest::default()).await?;
    println!("{} of {} users on page {}", page.data.len(), page.total, page.page);
    for user in &page.data {
        println!("  {} <{}>", user.name, user.email);
    }

    println!();
    println!("=== Creating a user ===");
    let created = users
        .create(&CreateUser {
            name: "Alice Example".to_string(),
            email: "alice@example.com".to_string(),
            phone: None,
            role: None,
        })
        .await?;
    println!("Created {} ({:?})", created.name, created.id);

    Ok(())
}
