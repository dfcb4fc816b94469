//! In-process tests of `POST /echo` through the full middleware stack.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use merge_echo::config::ServerConfig;
use merge_echo::echo::MergeMode;

mod common;

#[tokio::test]
async fn test_empty_body_echoes_default() {
    let res = common::post_echo(common::router(ServerConfig::default()), "{}").await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );
    assert_eq!(common::json_body(res).await, json!({"echo": "echo"}));
}

#[tokio::test]
async fn test_value_is_echoed() {
    let res = common::post_echo(common::router(ServerConfig::default()), r#"{"value":"hi"}"#).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(common::json_body(res).await, json!({"echo": "hi"}));
}

#[tokio::test]
async fn test_structured_value_is_echoed_whole() {
    let body = json!({"value": {"nested": {"a": 1}}, "unrelated": [1, 2]});
    let res = common::post_echo(common::router(ServerConfig::default()), body.to_string()).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(common::json_body(res).await, json!({"echo": {"nested": {"a": 1}}}));
}

#[tokio::test]
async fn test_configured_default_value() {
    let mut config = ServerConfig::default();
    config.echo.default_value = "ping".into();

    let res = common::post_echo(common::router(config), r#"{"other":1}"#).await;
    assert_eq!(common::json_body(res).await, json!({"echo": "ping"}));
}

#[tokio::test]
async fn test_overwriting_formatter_with_string_fails() {
    let res = common::post_echo(
        common::router(ServerConfig::default()),
        r#"{"formatter":"not a function"}"#,
    )
    .await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"Internal Server Error");
}

#[tokio::test]
async fn test_overwriting_formatter_with_any_data_fails() {
    for payload in [
        json!({"formatter": null}),
        json!({"formatter": 42}),
        json!({"formatter": {"call": "echo"}}),
        json!({"formatter": [], "value": "hi"}),
    ] {
        let res = common::post_echo(common::router(ServerConfig::default()), payload.to_string()).await;
        assert_eq!(
            res.status(),
            StatusCode::INTERNAL_SERVER_ERROR,
            "payload {payload} should break the formatter"
        );
    }
}

#[tokio::test]
async fn test_guarded_mode_refuses_formatter_writes() {
    let mut config = ServerConfig::default();
    config.echo.merge_mode = MergeMode::Guarded;
    let app = common::router(config);

    let res = common::post_echo(app.clone(), r#"{"formatter":"x"}"#).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = common::post_echo(app, r#"{"value":"still works"}"#).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(common::json_body(res).await, json!({"echo": "still works"}));
}

#[tokio::test]
async fn test_malformed_json_is_client_error() {
    let res = common::post_echo(common::router(ServerConfig::default()), r#"{"value": "#).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_top_level_array_merges_as_indexed_keys() {
    let res = common::post_echo(common::router(ServerConfig::default()), "[1, 2, 3]").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(common::json_body(res).await, json!({"echo": "echo"}));
}

#[tokio::test]
async fn test_top_level_scalar_or_null_is_client_error() {
    for body in ["null", "42", "\"value\""] {
        let res = common::post_echo(common::router(ServerConfig::default()), body).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "body {body}");
    }
}

#[tokio::test]
async fn test_missing_content_type_treated_as_empty_body() {
    let app = common::router(ServerConfig::default());
    let request = Request::builder()
        .method("POST")
        .uri("/echo")
        .body(Body::from(r#"{"value":"ignored"}"#))
        .unwrap();

    let res = app.oneshot(request).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(common::json_body(res).await, json!({"echo": "echo"}));
}

#[tokio::test]
async fn test_empty_json_body_echoes_default() {
    let res = common::post_echo(common::router(ServerConfig::default()), "").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(common::json_body(res).await, json!({"echo": "echo"}));
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let mut config = ServerConfig::default();
    config.limits.max_body_bytes = 64;

    let body = json!({"value": "x".repeat(256)}).to_string();
    let res = common::post_echo(common::router(config), body).await;
    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_get_is_not_allowed() {
    let app = common::router(ServerConfig::default());
    let request = Request::builder()
        .method("GET")
        .uri("/echo")
        .body(Body::empty())
        .unwrap();

    let res = app.oneshot(request).await.unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = common::router(ServerConfig::default());
    let request = Request::builder()
        .method("POST")
        .uri("/other")
        .header("content-type", "application/json")
        .body(Body::from("{}"))
        .unwrap();

    let res = app.oneshot(request).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_request_id_generated_and_propagated() {
    let res = common::post_echo(common::router(ServerConfig::default()), "{}").await;
    let generated = res.headers()["x-request-id"].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(generated).is_ok());

    let app = common::router(ServerConfig::default());
    let request = Request::builder()
        .method("POST")
        .uri("/echo")
        .header("content-type", "application/json")
        .header("x-request-id", "client-chosen-id")
        .body(Body::from("{}"))
        .unwrap();
    let res = app.oneshot(request).await.unwrap();
    assert_eq!(res.headers()["x-request-id"], "client-chosen-id");
}
