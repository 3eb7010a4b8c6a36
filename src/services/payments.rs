//! Business operations on the `/payments` resource.

use crate::services::{require, Page, PageRequest, ServiceError};
use crate::services::{CreatePayment, Payment};
use crate::{Client, RequestOptions};
use http::Method;

/// Payment operations: list, fetch, create, per-user listing, stats.
pub struct PaymentService {
    client: Client,
}

impl PaymentService {
    const BASE_PATH: &'static str = "/payments";

    /// Creates a service over the given client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetches one page of payments.
    pub async fn list(&self, page: PageRequest) -> Result<Page<Payment>, ServiceError> {
        page.validate().map_err(ServiceError::Validation)?;

        let options = RequestOptions::new(Method::GET, Self::BASE_PATH)
            .with_query_param("page", page.page.to_string())
            .with_query_param("limit", page.limit.to_string());

        let response = self
            .client
            .call::<(), Page<Payment>>(options, None)
            .await
            .map_err(ServiceError::wrap("Failed to fetch payments"))?;
        Ok(response.data)
    }

    /// Fetches a single payment by ID and re-validates the record.
    pub async fn get(&self, id: &str) -> Result<Payment, ServiceError> {
        require("id", id, "Payment ID is required")?;

        let response = self
            .client
            .get::<Payment>(format!("{}/{}", Self::BASE_PATH, id))
            .await
            .map_err(ServiceError::wrap("Failed to fetch payment"))?;

        response.data.validate().map_err(ServiceError::Validation)?;
        Ok(response.data)
    }

    /// Creates a payment from validated input.
    pub async fn create(&self, input: &CreatePayment) -> Result<Payment, ServiceError> {
        input.validate().map_err(ServiceError::Validation)?;

        let response = self
            .client
            .post::<CreatePayment, Payment>(Self::BASE_PATH, input)
            .await
            .map_err(ServiceError::wrap("Failed to create payment"))?;

        response.data.validate().map_err(ServiceError::Validation)?;
        Ok(response.data)
    }

    /// Fetches one page of a single user's payments.
    pub async fn for_user(
        &self,
        user_id: &str,
        page: PageRequest,
    ) -> Result<Page<Payment>, ServiceError> {
        require("userId", user_id, "User ID is required")?;
        page.validate().map_err(ServiceError::Validation)?;

        let options =
            RequestOptions::new(Method::GET, format!("{}/user/{}", Self::BASE_PATH, user_id))
                .with_query_param("page", page.page.to_string())
                .with_query_param("limit", page.limit.to_string());

        let response = self
            .client
            .call::<(), Page<Payment>>(options, None)
            .await
            .map_err(ServiceError::wrap("Failed to fetch user payments"))?;
        Ok(response.data)
    }

    /// Fetches aggregate payment statistics.
    ///
    /// The stats endpoint's response shape is not pinned down, so this
    /// returns the parsed JSON as-is.
    pub async fn stats(&self) -> Result<serde_json::Value, ServiceError> {
        let response = self
            .client
            .get::<serde_json::Value>(format!("{}/stats", Self::BASE_PATH))
            .await
            .map_err(ServiceError::wrap("Failed to fetch payment stats"))?;
        Ok(response.data)
    }
}
