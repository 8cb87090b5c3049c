//! HTTP-level tests for the client intake API
//!
//! These run the real router against the in-memory repository and a
//! recording event bus, so every layer except the database is exercised.

use std::sync::Arc;

use axum_test::TestServer;
use rust_decimal_macros::dec;
use serde_json::json;

use domain_clients::mock::{InMemoryClientRepository, RecordingEventBus};
use domain_clients::{ClientStatus, RegisterClientUseCase};
use interface_api::{create_router, AppState};
use test_utils::{StringFixtures, TestClientBuilder, TestRegisterInputBuilder};

struct TestContext {
    server: TestServer,
    repository: Arc<InMemoryClientRepository>,
    events: Arc<RecordingEventBus>,
}

fn setup() -> TestContext {
    let repository = Arc::new(InMemoryClientRepository::new());
    let events = Arc::new(RecordingEventBus::new());
    let use_case = Arc::new(RegisterClientUseCase::new(
        repository.clone(),
        events.clone(),
    ));

    let app = create_router(AppState {
        use_case,
        repository: repository.clone(),
    });

    TestContext {
        server: TestServer::new(app).unwrap(),
        repository,
        events,
    }
}

fn valid_body() -> serde_json::Value {
    json!({
        "name": "Ana Paz",
        "email": "ana@example.com",
        "rut": "12345678-9",
        "phone": "912345678",
        "age": 30,
        "region": "Metropolitana",
        "commune": "Maipú",
        "income": 500000,
        "dependents": 2,
        "healthInsurance": "Fonasa"
    })
}

#[tokio::test]
async fn test_register_client_created() {
    let ctx = setup();

    let response = ctx.server.post("/api/v1/clients").json(&valid_body()).await;
    response.assert_status(axum::http::StatusCode::CREATED);

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["email"], "ana@example.com");
    assert_eq!(body["status"], "PENDING");
    assert!(body.get("id").is_some());

    assert_eq!(ctx.repository.save_count(), 1);
    assert_eq!(ctx.events.published().len(), 1);
}

#[tokio::test]
async fn test_duplicate_email_is_bad_request() {
    let ctx = setup();

    ctx.server.post("/api/v1/clients").json(&valid_body()).await;
    let response = ctx.server.post("/api/v1/clients").json(&valid_body()).await;

    response.assert_status_bad_request();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"], "bad_request");

    // Only the first registration reached persistence and the event bus
    assert_eq!(ctx.repository.save_count(), 1);
    assert_eq!(ctx.events.published().len(), 1);
}

#[tokio::test]
async fn test_invalid_field_is_bad_request() {
    let ctx = setup();

    let mut body = valid_body();
    body["rut"] = json!("12-345678");
    let response = ctx.server.post("/api/v1/clients").json(&body).await;

    response.assert_status_bad_request();
    assert_eq!(ctx.repository.save_count(), 0);
    assert!(ctx.events.published().is_empty());
}

#[tokio::test]
async fn test_system_field_in_request_is_bad_request() {
    let ctx = setup();

    let mut body = valid_body();
    body["status"] = json!("ACTIVE");
    let response = ctx.server.post("/api/v1/clients").json(&body).await;

    assert!(response.status_code().is_client_error());
    assert_eq!(ctx.repository.save_count(), 0);
}

#[tokio::test]
async fn test_get_client_by_id() {
    let ctx = setup();
    let client = TestClientBuilder::new()
        .with_email("luis@example.com")
        .with_income(dec!(750000))
        .with_status(ClientStatus::Active)
        .build();
    ctx.repository.insert(client.clone()).await;

    let response = ctx
        .server
        .get(&format!("/api/v1/clients/{}", client.id.as_uuid()))
        .await;

    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["email"], "luis@example.com");
    assert_eq!(body["status"], "ACTIVE");
}

#[tokio::test]
async fn test_get_unknown_client_is_not_found() {
    let ctx = setup();

    let response = ctx
        .server
        .get(&format!("/api/v1/clients/{}", uuid::Uuid::new_v4()))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_workflow_registers_distinct_clients() {
    let ctx = setup();

    let use_case = RegisterClientUseCase::new(ctx.repository.clone(), ctx.events.clone());
    use_case
        .execute(TestRegisterInputBuilder::new().build())
        .await
        .unwrap();
    let saved = use_case
        .execute(
            TestRegisterInputBuilder::new()
                .with_name("Luis Soto")
                .with_email(StringFixtures::other_email())
                .with_rut(StringFixtures::rut_with_k())
                .build(),
        )
        .await
        .unwrap();

    assert_eq!(saved.email, StringFixtures::other_email());
    assert_eq!(saved.rut, StringFixtures::rut_with_k());
    assert_eq!(ctx.repository.save_count(), 2);
    assert_eq!(ctx.events.published().len(), 2);
}

#[tokio::test]
async fn test_workflow_rejects_negative_income_input() {
    let ctx = setup();

    let use_case = RegisterClientUseCase::new(ctx.repository.clone(), ctx.events.clone());
    let input = TestRegisterInputBuilder::new().with_income(dec!(-1)).build();
    let err = use_case.execute(input).await.unwrap_err();

    assert!(err.is_validation());
    assert_eq!(ctx.repository.save_count(), 0);
}

#[tokio::test]
async fn test_health_endpoint() {
    let ctx = setup();

    let response = ctx.server.get("/health").await;
    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_readiness_endpoint() {
    let ctx = setup();

    let response = ctx.server.get("/health/ready").await;
    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["status"], "ready");
}
