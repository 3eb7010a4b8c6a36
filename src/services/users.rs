//! Business operations on the `/users` resource.

use crate::services::{require, Page, PageRequest, ServiceError};
use crate::services::{CreateUser, UpdateUser, User};
use crate::{Client, Envelope, RequestOptions};
use http::Method;

/// User operations: list, fetch, create, update, delete, search.
///
/// Holds a [`Client`] by value; clone the client when constructing several
/// services over the same pool.
///
/// # Examples
///
/// ```no_run
/// use backstop::{Client, services::{PageRequest, UserService}};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Client::from_env()?;
/// let users = UserService::new(client);
///
/// let page = users.list(PageRequest::default()).await?;
/// println!("{} users total", page.total);
/// # Ok(())
/// # }
/// ```
pub struct UserService {
    client: Client,
}

impl UserService {
    const BASE_PATH: &'static str = "/users";

    /// Creates a service over the given client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetches one page of users.
    pub async fn list(&self, page: PageRequest) -> Result<Page<User>, ServiceError> {
        page.validate().map_err(ServiceError::Validation)?;

        let options = RequestOptions::new(Method::GET, Self::BASE_PATH)
            .with_query_param("page", page.page.to_string())
            .with_query_param("limit", page.limit.to_string());

        let response = self
            .client
            .call::<(), Page<User>>(options, None)
            .await
            .map_err(ServiceError::wrap("Failed to fetch users"))?;
        Ok(response.data)
    }

    /// Fetches a single user by ID and re-validates the record.
    pub async fn get(&self, id: &str) -> Result<User, ServiceError> {
        require("id", id, "User ID is required")?;

        let response = self
            .client
            .get::<User>(format!("{}/{}", Self::BASE_PATH, id))
            .await
            .map_err(ServiceError::wrap("Failed to fetch user"))?;

        response.data.validate().map_err(ServiceError::Validation)?;
        Ok(response.data)
    }

    /// Creates a user from validated input.
    pub async fn create(&self, input: &CreateUser) -> Result<User, ServiceError> {
        input.validate().map_err(ServiceError::Validation)?;

        let response = self
            .client
            .post::<CreateUser, User>(Self::BASE_PATH, input)
            .await
            .map_err(ServiceError::wrap("Failed to create user"))?;

        response.data.validate().map_err(ServiceError::Validation)?;
        Ok(response.data)
    }

    /// Updates an existing user with the set fields of `input`.
    pub async fn update(&self, id: &str, input: &UpdateUser) -> Result<User, ServiceError> {
        require("id", id, "User ID is required")?;
        input.validate().map_err(ServiceError::Validation)?;

        let response = self
            .client
            .put::<UpdateUser, User>(format!("{}/{}", Self::BASE_PATH, id), input)
            .await
            .map_err(ServiceError::wrap("Failed to update user"))?;

        response.data.validate().map_err(ServiceError::Validation)?;
        Ok(response.data)
    }

    /// Deletes a user by ID.
    ///
    /// The route answers with a `{ success: true }` envelope; it is decoded
    /// and discarded.
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        require("id", id, "User ID is required")?;

        self.client
            .delete::<Envelope<serde_json::Value>>(format!("{}/{}", Self::BASE_PATH, id))
            .await
            .map_err(ServiceError::wrap("Failed to delete user"))?;
        Ok(())
    }

    /// Searches users by free-text query.
    ///
    /// The search endpoint's response shape is not pinned down, so this
    /// returns the parsed JSON as-is.
    pub async fn search(&self, query: &str) -> Result<serde_json::Value, ServiceError> {
        require("q", query, "Search query is required")?;

        let options = RequestOptions::new(Method::GET, format!("{}/search", Self::BASE_PATH))
            .with_query_param("q", query);

        let response = self
            .client
            .call::<(), serde_json::Value>(options, None)
            .await
            .map_err(ServiceError::wrap("Failed to search users"))?;
        Ok(response.data)
    }
}
