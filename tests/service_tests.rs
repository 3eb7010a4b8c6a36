//! Service-layer tests: validation, wrapping, and wire paths, over wiremock.

use backstop::services::{
    CreatePayment, CreateUser, PageRequest, PaymentMethod, PaymentService, ServiceError,
    UpdateUser, UserService,
};
use backstop::Client;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER_ID: &str = "550e8400-e29b-41d4-a716-446655440000";

fn client(server: &MockServer) -> Client {
    Client::builder()
        .base_url(server.uri())
        .unwrap()
        .build()
        .unwrap()
}

fn user_json() -> serde_json::Value {
    serde_json::json!({
        "id": USER_ID,
        "name": "Ann",
        "email": "ann@example.com",
        "role": "admin",
        "status": "active"
    })
}

#[tokio::test]
async fn list_users_hits_the_paginated_route() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [user_json()],
            "total": 1,
            "page": 1,
            "limit": 10,
            "hasMore": false
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let users = UserService::new(client(&mock_server));
    let page = users.list(PageRequest::default()).await.unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].name, "Ann");
    assert!(!page.has_more);
}

#[tokio::test]
async fn get_user_wraps_api_errors_with_resource_context() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/users/{USER_ID}")))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"error": "User not found"})),
        )
        .mount(&mock_server)
        .await;

    let users = UserService::new(client(&mock_server));
    let err = users.get(USER_ID).await.unwrap_err();

    assert_eq!(err.to_string(), "Failed to fetch user: Not Found");
    match err {
        ServiceError::Domain { source, .. } => {
            assert_eq!(source.status().map(|s| s.as_u16()), Some(404));
            assert_eq!(
                source.details(),
                Some(&serde_json::json!({"error": "User not found"}))
            );
        }
        other => panic!("Expected Domain error, got {:?}", other),
    }
}

#[tokio::test]
async fn get_user_requires_an_id() {
    let mock_server = MockServer::start().await;
    let users = UserService::new(client(&mock_server));

    let err = users.get("  ").await.unwrap_err();
    let fields = err.field_errors().unwrap();
    assert_eq!(fields[0].field, "id");
    assert_eq!(fields[0].message, "User ID is required");
}

#[tokio::test]
async fn create_user_short_circuits_on_invalid_input() {
    let mock_server = MockServer::start().await;

    // No HTTP call may happen when validation fails.
    Mock::given(method("POST"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(201).set_body_json(user_json()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let users = UserService::new(client(&mock_server));
    let input = CreateUser {
        name: "A".to_string(),
        email: "not-an-email".to_string(),
        phone: None,
        role: None,
    };

    let err = users.create(&input).await.unwrap_err();
    let fields: Vec<_> = err.field_errors().unwrap().iter().map(|e| e.field).collect();
    assert_eq!(fields, vec!["name", "email"]);
}

#[tokio::test]
async fn create_user_posts_and_revalidates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(201).set_body_json(user_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let users = UserService::new(client(&mock_server));
    let input = CreateUser {
        name: "Ann".to_string(),
        email: "ann@example.com".to_string(),
        phone: None,
        role: None,
    };

    let user = users.create(&input).await.unwrap();
    assert_eq!(user.id.as_deref(), Some(USER_ID));
    assert_eq!(user.email, "ann@example.com");
}

#[tokio::test]
async fn update_user_rejects_an_empty_patch() {
    let mock_server = MockServer::start().await;
    let users = UserService::new(client(&mock_server));

    let err = users
        .update(USER_ID, &UpdateUser::default())
        .await
        .unwrap_err();
    assert_eq!(err.field_errors().unwrap()[0].field, "update");
}

#[tokio::test]
async fn delete_user_discards_the_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("/users/{USER_ID}")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": true})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let users = UserService::new(client(&mock_server));
    users.delete(USER_ID).await.unwrap();
}

#[tokio::test]
async fn search_requires_a_query_and_encodes_it() {
    let mock_server = MockServer::start().await;

    let users = UserService::new(client(&mock_server));
    let err = users.search("   ").await.unwrap_err();
    assert_eq!(err.field_errors().unwrap()[0].message, "Search query is required");

    Mock::given(method("GET"))
        .and(path("/users/search"))
        .and(query_param("q", "ann b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([user_json()])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let results = users.search("ann b").await.unwrap();
    assert!(results.is_array());
}

#[tokio::test]
async fn list_payments_round_trip() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/payments"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{
                "id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
                "userId": USER_ID,
                "amount": 25.5,
                "currency": "USD",
                "status": "completed",
                "paymentMethod": "credit_card"
            }],
            "total": 11,
            "page": 2,
            "limit": 5,
            "hasMore": true
        })))
        .mount(&mock_server)
        .await;

    let payments = PaymentService::new(client(&mock_server));
    let page = payments.list(PageRequest { page: 2, limit: 5 }).await.unwrap();

    assert_eq!(page.data[0].amount, 25.5);
    assert_eq!(page.data[0].payment_method, PaymentMethod::CreditCard);
    assert!(page.has_more);
}

#[tokio::test]
async fn create_payment_reports_every_violation() {
    let mock_server = MockServer::start().await;
    let payments = PaymentService::new(client(&mock_server));

    let input = CreatePayment {
        user_id: "not-a-uuid".to_string(),
        amount: -3.0,
        currency: "DOLLARS".to_string(),
        payment_method: PaymentMethod::Paypal,
        description: None,
    };

    let err = payments.create(&input).await.unwrap_err();
    let fields: Vec<_> = err.field_errors().unwrap().iter().map(|e| e.field).collect();
    assert_eq!(fields, vec!["userId", "amount", "currency"]);
}

#[tokio::test]
async fn user_payments_use_the_nested_route() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/payments/user/{USER_ID}")))
        .and(query_param("page", "1"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [],
            "total": 0,
            "page": 1,
            "limit": 10,
            "hasMore": false
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let payments = PaymentService::new(client(&mock_server));
    let page = payments
        .for_user(USER_ID, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn payment_stats_pass_through_untyped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/payments/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "totalRevenue": 1234.5,
            "byStatus": {"completed": 10, "failed": 2}
        })))
        .mount(&mock_server)
        .await;

    let payments = PaymentService::new(client(&mock_server));
    let stats = payments.stats().await.unwrap();
    assert_eq!(stats["byStatus"]["completed"], 10);
}

#[tokio::test]
async fn payment_errors_carry_payment_context() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/payments"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let payments = PaymentService::new(client(&mock_server));
    let err = payments.list(PageRequest::default()).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Failed to fetch payments: Internal Server Error"
    );
}
