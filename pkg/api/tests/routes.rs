use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use pkg_api::AppState;
use pkg_api::server::router;
use pkg_cloud::memory::{MemoryBlobStore, MemoryVault};
use serde_json::{Value, json};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    vault: Arc<MemoryVault>,
    blobs: Arc<MemoryBlobStore>,
}

fn app() -> TestApp {
    let vault = Arc::new(
        MemoryVault::new("https://kv.test")
            .with_secret("greeting-db-user", "app_user")
            .with_secret("greeting-db-password", "s3cr3t!"),
    );
    let blobs = Arc::new(MemoryBlobStore::new("acct", "box"));
    let state = AppState {
        vault: vault.clone(),
        blobs: blobs.clone(),
    };
    TestApp {
        router: router(state),
        vault,
        blobs,
    }
}

async fn send(app: &Router, method: Method, uri: &str, body: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = send(app, Method::GET, uri, "").await;
    (status, serde_json::from_str(&body).unwrap())
}

#[tokio::test]
async fn greeting_defaults_to_world() {
    let t = app();
    let (status, body) = get_json(&t.router, "/greeting").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"greeting": "hello world"}));
}

#[tokio::test]
async fn greeting_uses_name_verbatim() {
    let t = app();
    let (status, body) = get_json(&t.router, "/greeting?name=marek").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"greeting": "hello marek"}));

    let (_, body) = get_json(&t.router, "/greeting?name=Jan%20Kowalski").await;
    assert_eq!(body, json!({"greeting": "hello Jan Kowalski"}));

    let (_, body) = get_json(&t.router, "/greeting?name=").await;
    assert_eq!(body, json!({"greeting": "hello "}));
}

#[tokio::test]
async fn responses_carry_request_id() {
    let t = app();
    let request = Request::builder()
        .uri("/greeting")
        .body(Body::empty())
        .unwrap();
    let response = t.router.clone().oneshot(request).await.unwrap();
    let id = response.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert_eq!(id.len(), 36);
}

#[tokio::test]
async fn health_status_matches_both_checks() {
    let cases = [
        (true, true, StatusCode::OK, "UP"),
        (true, false, StatusCode::SERVICE_UNAVAILABLE, "DEGRADED"),
        (false, true, StatusCode::SERVICE_UNAVAILABLE, "DEGRADED"),
        (false, false, StatusCode::SERVICE_UNAVAILABLE, "DEGRADED"),
    ];

    for (vault_up, blobs_up, code, status) in cases {
        let t = app();
        t.vault.set_online(vault_up);
        t.blobs.set_online(blobs_up);

        let (got, body) = get_json(&t.router, "/azure/health").await;
        assert_eq!(got, code, "vault={} blobs={}", vault_up, blobs_up);
        assert_eq!(body["status"], status);
        assert_eq!(body["service"], "greeting-service");
        assert_eq!(body["keyVault"], json!({"url": "https://kv.test", "healthy": vault_up}));
        assert_eq!(
            body["blobStorage"],
            json!({"accountName": "acct", "containerName": "box", "healthy": blobs_up})
        );
        assert!(body["timestamp"].is_string());
    }
}

#[tokio::test]
async fn secret_is_returned_raw() {
    let t = app();
    let (status, body) = get_json(&t.router, "/azure/secrets/greeting-db-password").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["secretName"], "greeting-db-password");
    assert_eq!(body["value"], "s3cr3t!");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn missing_secret_is_500_with_name() {
    let t = app();
    let (status, body) = get_json(&t.router, "/azure/secrets/unknown").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["secretName"], "unknown");
    assert!(body["error"].as_str().unwrap().contains("unknown"));
    assert!(body.get("value").is_none());
}

#[tokio::test]
async fn config_masks_password() {
    let t = app();
    let (status, body) = get_json(&t.router, "/azure/config").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dbUser"], "app_user");
    assert_eq!(body["dbPassword"], "s3***");

    t.vault.set_secret("greeting-db-password", "ab").await;
    let (_, body) = get_json(&t.router, "/azure/config").await;
    assert_eq!(body["dbPassword"], "***");
}

#[tokio::test]
async fn config_fails_when_vault_is_down() {
    let t = app();
    t.vault.set_online(false);
    let (status, body) = get_json(&t.router, "/azure/config").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
    assert!(body.get("dbUser").is_none());
}

#[tokio::test]
async fn upload_then_download_round_trips() {
    let t = app();
    let content = "Zażółć gęślą jaźń\nsecond line";

    let (status, body) = send(&t.router, Method::POST, "/azure/blobs/notes.txt", content).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["blobName"], "notes.txt");
    assert_eq!(body["size"], "29");

    let (status, body) = send(&t.router, Method::GET, "/azure/blobs/notes.txt", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, content);
}

#[tokio::test]
async fn upload_size_counts_utf16_code_units() {
    let t = app();
    let (status, body) = send(&t.router, Method::POST, "/azure/blobs/rocket.txt", "go 🚀").await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["size"], "5");
}

#[tokio::test]
async fn upload_accepts_bodies_larger_than_two_mebibytes() {
    let t = app();
    let content = "0123456789abcdef".repeat(256 * 1024);
    assert!(content.len() > 2 * 1024 * 1024);

    let (status, body) = send(&t.router, Method::POST, "/azure/blobs/big.txt", &content).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["size"], content.len().to_string());

    let (status, body) = send(&t.router, Method::GET, "/azure/blobs/big.txt", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, content);
}

#[tokio::test]
async fn upload_of_invalid_utf8_is_500_json() {
    let t = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/azure/blobs/binary.bin")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(vec![0x66, 0x6f, 0xff, 0xfe]))
        .unwrap();
    let response = t.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["blobName"], "binary.bin");
    assert!(body["error"].as_str().unwrap().contains("UTF-8"));

    let (status, _) = send(&t.router, Method::GET, "/azure/blobs/binary.bin", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn download_of_missing_blob_is_404() {
    let t = app();
    let (status, body) = send(&t.router, Method::GET, "/azure/blobs/ghost.txt", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.starts_with("Blob not found: "));
    assert!(body.contains("ghost.txt"));
}

#[tokio::test]
async fn list_reports_container_and_count() {
    let t = app();
    for name in ["b.txt", "a.txt"] {
        send(&t.router, Method::POST, &format!("/azure/blobs/{}", name), "x").await;
    }

    let (status, body) = get_json(&t.router, "/azure/blobs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"containerName": "box", "count": 2, "blobs": ["a.txt", "b.txt"]})
    );
}

#[tokio::test]
async fn list_failure_is_500() {
    let t = app();
    t.blobs.set_online(false);
    let (status, body) = get_json(&t.router, "/azure/blobs").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn upload_failure_is_500_with_blob_name() {
    let t = app();
    t.blobs.set_online(false);
    let (status, body) = send(&t.router, Method::POST, "/azure/blobs/a.txt", "x").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["blobName"], "a.txt");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn delete_removes_blob() {
    let t = app();
    send(&t.router, Method::POST, "/azure/blobs/a.txt", "x").await;

    let (status, body) = send(&t.router, Method::DELETE, "/azure/blobs/a.txt", "").await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["blobName"], "a.txt");

    let (status, _) = send(&t.router, Method::GET, "/azure/blobs/a.txt", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_missing_blob_is_an_error() {
    let t = app();
    let (status, body) = send(&t.router, Method::DELETE, "/azure/blobs/ghost.txt", "").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["blobName"], "ghost.txt");
    assert!(body["error"].as_str().unwrap().contains("ghost.txt"));
}

#[tokio::test]
async fn head_reports_existence() {
    let t = app();
    let (status, _) = send(&t.router, Method::HEAD, "/azure/blobs/a.txt", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send(&t.router, Method::POST, "/azure/blobs/a.txt", "x").await;
    let (status, _) = send(&t.router, Method::HEAD, "/azure/blobs/a.txt", "").await;
    assert_eq!(status, StatusCode::OK);
}
