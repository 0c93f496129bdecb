//! End-to-end normalization against a live mock server.

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use serde::Deserialize;
use serde_json::json;
use skybridge_remote_errors::{
    ClientConfig, RemoteCallError, check_status, fallback_body, normalize_response, read_json,
};
use tokio::net::TcpListener;

async fn spawn_server(app: Router) -> (String, tokio::sync::oneshot::Sender<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local_addr");

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = shutdown_rx.await;
    });
    tokio::spawn(async move {
        let _ = server.await;
    });

    (format!("http://{addr}"), shutdown_tx)
}

#[tokio::test]
async fn not_found_response_normalizes_with_parsed_body() {
    async fn handler() -> (StatusCode, axum::Json<serde_json::Value>) {
        (StatusCode::NOT_FOUND, axum::Json(json!({"name": "test"})))
    }

    let (base_url, shutdown) = spawn_server(Router::new().route("/apps/unknown", get(handler))).await;
    let url = format!("{base_url}/apps/unknown");

    let response = reqwest::get(&url).await.expect("request");
    let err = normalize_response(response, &ClientConfig::default()).await;

    assert_eq!(err.status(), 404);
    assert_eq!(err.url(), url);
    assert_eq!(
        err.response_body().and_then(|b| b.get("name")),
        Some(&json!("test"))
    );
    assert!(err.message().contains("404"));
    assert_eq!(err.retryable(), Some(false));

    // Header lookup is case-insensitive regardless of how axum sent it.
    assert_eq!(
        err.headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("application/json")
    );

    let _ = shutdown.send(());
}

#[tokio::test]
async fn undecodable_error_body_yields_fallback_sentinel() {
    async fn handler() -> (StatusCode, &'static str) {
        (StatusCode::SERVICE_UNAVAILABLE, "<html>down</html>")
    }

    let (base_url, shutdown) = spawn_server(Router::new().route("/health", get(handler))).await;

    let response = reqwest::get(format!("{base_url}/health"))
        .await
        .expect("request");
    let err = normalize_response(response, &ClientConfig::default()).await;

    assert_eq!(err.status(), 503);
    assert_eq!(err.response_body(), Some(fallback_body()));
    assert_eq!(err.retryable(), None);

    let _ = shutdown.send(());
}

#[tokio::test]
async fn check_status_passes_successful_responses_through() {
    async fn handler() -> axum::Json<serde_json::Value> {
        axum::Json(json!({"name": "test"}))
    }

    let (base_url, shutdown) = spawn_server(Router::new().route("/apps/one", get(handler))).await;

    let response = reqwest::get(format!("{base_url}/apps/one"))
        .await
        .expect("request");
    let response = check_status(response, &ClientConfig::default())
        .await
        .expect("2xx passes through");
    assert_eq!(response.status().as_u16(), 200);

    let _ = shutdown.send(());
}

#[derive(Debug, Deserialize)]
struct App {
    name: String,
}

#[tokio::test]
async fn read_json_deserializes_successful_bodies() {
    async fn handler() -> axum::Json<serde_json::Value> {
        axum::Json(json!({"name": "test"}))
    }

    let (base_url, shutdown) = spawn_server(Router::new().route("/apps/one", get(handler))).await;

    let response = reqwest::get(format!("{base_url}/apps/one"))
        .await
        .expect("request");
    let app: App = read_json(response, &ClientConfig::default())
        .await
        .expect("deserializes");
    assert_eq!(app.name, "test");

    let _ = shutdown.send(());
}

#[tokio::test]
async fn read_json_maps_bad_success_bodies_to_conversion_errors() {
    async fn handler() -> &'static str {
        "definitely not json"
    }

    let (base_url, shutdown) = spawn_server(Router::new().route("/apps/one", get(handler))).await;

    let response = reqwest::get(format!("{base_url}/apps/one"))
        .await
        .expect("request");
    let err = read_json::<App>(response, &ClientConfig::default())
        .await
        .expect_err("garbage body");

    assert!(matches!(err, RemoteCallError::Conversion(_)));
    assert_eq!(err.retryable(), Some(false));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn read_json_maps_error_statuses_to_http_errors() {
    async fn handler() -> (StatusCode, axum::Json<serde_json::Value>) {
        (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({"message": "missing field"})),
        )
    }

    let (base_url, shutdown) = spawn_server(Router::new().route("/apps", get(handler))).await;

    let response = reqwest::get(format!("{base_url}/apps"))
        .await
        .expect("request");
    let err = read_json::<App>(response, &ClientConfig::default())
        .await
        .expect_err("400 fails");

    let RemoteCallError::Http(http) = err else {
        panic!("expected http error");
    };
    assert_eq!(http.status(), 400);
    assert_eq!(http.retryable(), Some(false));
    assert_eq!(
        http.response_body().and_then(|b| b.get("message")),
        Some(&json!("missing field"))
    );

    let _ = shutdown.send(());
}
