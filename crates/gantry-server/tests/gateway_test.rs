//! End-to-end tests for the interception pipeline.
//!
//! The real router is driven with `tower::ServiceExt::oneshot`; downstream
//! servers are stub axum apps bound to ephemeral ports.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use gantry_audit::{AuditRecorder, AuditStorage, MemoryStorage};
use gantry_core::GatewayConfig;
use gantry_jwt::{Role, TokenValidator};
use gantry_server::proxy::ProxyClient;
use gantry_server::{app, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const SECRET: &str = "integration-test-secret";

async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn stub_erp() -> Router {
    Router::new()
        .route(
            "/api/employees",
            get(|| async { Json(json!([{ "employeeNm": "Kim", "position": "welder" }])) }),
        )
        .route(
            "/api/inventory/deduct",
            post(|| async { StatusCode::OK }),
        )
}

fn stub_drone() -> Router {
    Router::new().route(
        "/api/images/{id}",
        get(|| async { ([(header::CONTENT_TYPE, "image/jpeg")], vec![0u8; 2048]) }),
    )
}

async fn test_state(erp: &str, mes: &str, drone: &str) -> (Arc<AppState>, Arc<MemoryStorage>) {
    let mut config = GatewayConfig::default();
    config.auth.secret = SECRET.to_string();
    config.upstream.erp_base_url = erp.to_string();
    config.upstream.mes_base_url = mes.to_string();
    config.upstream.drone_base_url = drone.to_string();

    let storage = Arc::new(MemoryStorage::new());
    let state = AppState {
        validator: TokenValidator::new(SECRET),
        recorder: AuditRecorder::with_storage(storage.clone()),
        proxy: ProxyClient::new(config.upstream.clone()).unwrap(),
        config,
    };
    (Arc::new(state), storage)
}

/// Gateway wired to stub upstreams where the tests need them; anything
/// not stubbed points at a port nothing listens on.
async fn gateway() -> (Router, Arc<MemoryStorage>) {
    let erp = spawn_upstream(stub_erp()).await;
    let drone = spawn_upstream(stub_drone()).await;
    let (state, storage) = test_state(&erp, "http://127.0.0.1:1", &drone).await;
    (app(state), storage)
}

fn bearer(role: Role) -> String {
    let token = TokenValidator::new(SECRET).issue("EMP-7", role, 600).unwrap();
    format!("Bearer {}", token)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn authenticated_request_is_forwarded_and_audited() {
    let (gateway, storage) = gateway().await;

    let response = gateway
        .oneshot(
            Request::builder()
                .uri("/gateway/employees?name=Kim")
                .header(header::AUTHORIZATION, bearer(Role::Manager))
                .header("x-forwarded-for", "203.0.113.9")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body[0]["employeeNm"], "Kim");

    let records = storage.fetch_all().await.unwrap();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.service_name, "ERP Server");
    assert_eq!(record.endpoint, "/gateway/employees");
    assert_eq!(record.http_method, "GET");
    assert_eq!(record.response_status, 200);
    assert_eq!(record.client_addr, "203.0.113.9");
    assert!(!record.trace_id.is_empty());
    assert!(record
        .response_payload
        .as_deref()
        .unwrap()
        .contains("Kim"));
}

#[tokio::test]
async fn identity_is_installed_from_a_valid_token() {
    let (gateway, _storage) = gateway().await;

    let response = gateway
        .oneshot(
            Request::builder()
                .uri("/gateway/whoami")
                .header(header::AUTHORIZATION, bearer(Role::Manager))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["subject_id"], "EMP-7");
    assert_eq!(body["role"], "MANAGER");
    assert_eq!(body["authority"], "ROLE_MANAGER");
}

#[tokio::test]
async fn missing_token_is_rejected_before_the_handler_but_still_audited() {
    let (gateway, storage) = gateway().await;

    let response = gateway
        .oneshot(
            Request::builder()
                .uri("/gateway/employees")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let records = storage.fetch_all().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].response_status, 401);
    assert_eq!(records[0].service_name, "ERP Server");
}

#[tokio::test]
async fn garbage_token_authenticates_nobody() {
    let (gateway, _storage) = gateway().await;

    let response = gateway
        .oneshot(
            Request::builder()
                .uri("/gateway/employees")
                .header(header::AUTHORIZATION, "Bearer garbage")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_authenticates_nobody() {
    let (gateway, _storage) = gateway().await;

    // Issue with a TTL that is already over.
    let validator = TokenValidator::new(SECRET);
    let claims = gantry_jwt::Claims {
        sub: "EMP-7".to_string(),
        role: "ADMIN".to_string(),
        iat: chrono_now() - 7200,
        exp: chrono_now() - 3600,
    };
    let token = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();
    assert!(!validator.validate(&token));

    let response = gateway
        .oneshot(
            Request::builder()
                .uri("/gateway/employees")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

fn chrono_now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

#[tokio::test]
async fn unrecognized_role_claim_authenticates_nobody() {
    let (gateway, _storage) = gateway().await;

    let claims = serde_json::json!({
        "sub": "EMP-7",
        "role": "SUPERVISOR",
        "iat": chrono_now(),
        "exp": chrono_now() + 600,
    });
    let token = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    let response = gateway
        .oneshot(
            Request::builder()
                .uri("/gateway/employees")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Signature is fine but the role is not recognized.
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn handler_failure_is_recorded_as_500_and_relayed_unchanged() {
    let (gateway, storage) = gateway().await;

    // Shipments point at a dead MES upstream.
    let response = gateway
        .oneshot(
            Request::builder()
                .uri("/gateway/shipments/by-order/SO-42")
                .header(header::AUTHORIZATION, bearer(Role::Worker))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("downstream"));

    let records = storage.fetch_all().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].response_status, 500);
    assert_eq!(records[0].service_name, "MES Server");
    assert!(records[0]
        .response_payload
        .as_deref()
        .unwrap()
        .contains("error"));
}

#[tokio::test]
async fn binary_response_is_summarized_not_stored() {
    let (gateway, storage) = gateway().await;

    let response = gateway
        .oneshot(
            Request::builder()
                .uri("/gateway/drone-images/42")
                .header(header::AUTHORIZATION, bearer(Role::Admin))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(bytes.len(), 2048);

    let records = storage.fetch_all().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].service_name, "Drone Server");
    assert_eq!(
        records[0].response_payload.as_deref(),
        Some("Image byte data (size: 2048 bytes)")
    );
}

#[tokio::test]
async fn request_payloads_are_summarized() {
    let (gateway, storage) = gateway().await;

    let response = gateway
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/gateway/inventory/deduct")
                .header(header::AUTHORIZATION, bearer(Role::Worker))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"materialId": "M-9", "quantity": 3}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let records = storage.fetch_all().await.unwrap();
    assert_eq!(records.len(), 1);
    let summary = records[0].request_payload.as_deref().unwrap();
    assert!(summary.contains("M-9"));
    assert!(summary.contains("quantity"));
}

#[tokio::test]
async fn logs_endpoint_is_exempt_from_auditing() {
    let (gateway, storage) = gateway().await;

    let response = gateway
        .oneshot(
            Request::builder()
                .uri("/gateway/logs")
                .header(header::AUTHORIZATION, bearer(Role::Admin))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    // Reading the logs produced no record of itself.
    assert!(storage.fetch_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn ingested_records_come_back_newest_first() {
    let (gateway, storage) = gateway().await;

    for endpoint in ["/gateway/materials", "/gateway/positions"] {
        let response = gateway
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/gateway/logs")
                    .header(header::AUTHORIZATION, bearer(Role::Admin))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({
                            "service_name": "ERP Server",
                            "endpoint": endpoint,
                            "http_method": "GET",
                            "response_status": 200
                        })
                        .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = gateway
        .oneshot(
            Request::builder()
                .uri("/gateway/logs")
                .header(header::AUTHORIZATION, bearer(Role::Admin))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["endpoint"], "/gateway/positions");
    assert_eq!(list[1]["endpoint"], "/gateway/materials");

    // Only the two ingested records exist; the log calls themselves were
    // not audited.
    assert_eq!(storage.fetch_all().await.unwrap().len(), 2);
}

#[tokio::test]
async fn healthz_needs_no_token_and_is_not_audited() {
    let (gateway, storage) = gateway().await;

    let response = gateway
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(storage.fetch_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn dashboard_degrades_to_an_empty_list_when_erp_is_down() {
    let drone = spawn_upstream(stub_drone()).await;
    let (state, storage) = test_state(
        "http://127.0.0.1:1",
        "http://127.0.0.1:1",
        &drone,
    )
    .await;
    let gateway = app(state);

    let response = gateway
        .oneshot(
            Request::builder()
                .uri("/gateway/dashboard/projects")
                .header(header::AUTHORIZATION, bearer(Role::Manager))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, json!([]));

    let records = storage.fetch_all().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].response_status, 200);
}
