//! 网关集成测试
//!
//! 使用未连接的文档库客户端构造状态，只覆盖认证、限流、健康检查和
//! 版本描述符这些不触达文档库的路径。聚合逻辑在 reports 模块的
//! 单元测试中覆盖。

use api_server::core::{Config, ServerState, into_service};
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use surrealdb::Surreal;
use surrealdb::engine::remote::ws::Client;
use tower::ServiceExt;

fn test_config() -> Config {
    Config {
        http_port: 0,
        api_key: Some("test-key".into()),
        cors_origins: vec!["*".into()],
        rate_limit_window_ms: 60_000,
        rate_limit_max_requests: 100,
        store_endpoint: "localhost:8000".into(),
        store_namespace: "crumb".into(),
        store_database: "pos".into(),
        store_credential_file: None,
        version_file: "version.json".into(),
        environment: "test".into(),
    }
}

/// 未连接的文档库客户端；触达它的测试会失败，正好验证
/// 认证/限流路径不产生文档库副作用。
fn test_state(config: Config) -> ServerState {
    let db: Surreal<Client> = Surreal::init();
    ServerState::with_store(config, db)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_responds_without_api_key() {
    let app = into_service(test_state(test_config()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["status"], "healthy");
}

#[tokio::test]
async fn api_route_without_key_is_unauthorized() {
    let app = into_service(test_state(test_config()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/sales/recent")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "unauthorized");
}

#[tokio::test]
async fn api_route_with_wrong_key_is_unauthorized() {
    let app = into_service(test_state(test_config()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/shifts/active")
                .header("x-api-key", "wrong-key")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unconfigured_key_rejects_every_api_route() {
    let mut config = test_config();
    config.api_key = None;
    let app = into_service(test_state(config));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/cashiers/performance")
                .header("x-api-key", "anything")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn version_descriptor_served_without_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("version.json");
    std::fs::write(
        &path,
        r#"{"version":"2.3.0","changes":["Seasonal menu support"]}"#,
    )
    .unwrap();

    let mut config = test_config();
    config.version_file = path.to_string_lossy().into_owned();
    let app = into_service(test_state(config));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/version.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["version"], "2.3.0");
    assert_eq!(json["changes"][0], "Seasonal menu support");
}

#[tokio::test]
async fn version_descriptor_falls_back_when_file_missing() {
    let mut config = test_config();
    config.version_file = "/nonexistent/version.json".into();
    let app = into_service(test_state(config));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/version.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn rate_limit_rejects_over_ceiling_per_source() {
    let mut config = test_config();
    config.rate_limit_max_requests = 2;
    let app = into_service(test_state(config));

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .header("x-forwarded-for", "203.0.113.7")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header("x-forwarded-for", "203.0.113.7")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let json = body_json(response).await;
    assert_eq!(json["error"], "rate_limited");

    // 其他来源不受影响
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header("x-forwarded-for", "203.0.113.8")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn preflight_skips_authentication() {
    let app = into_service(test_state(test_config()));

    let response = app
        .oneshot(
            Request::builder()
                .method(http::Method::OPTIONS)
                .uri("/api/sales/recent")
                .header(header::ORIGIN, "https://admin.example.com")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_ne!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = into_service(test_state(test_config()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/definitely-not-a-route")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
