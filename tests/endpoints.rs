//! End-to-end checks of the non-stress endpoints over real TCP.

use reqwest::StatusCode;
use resilient_gitops::http::X_REQUEST_ID;

mod common;

#[tokio::test]
async fn test_home_returns_versioned_envelope() {
    let app = common::spawn_app(common::config_with_cores(2)).await;

    let res = app.get("/").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "application/json");

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Welcome to the Resilient GitOps Platform!");
    assert_eq!(body["version"], "v1.0.0");
}

#[tokio::test]
async fn test_health_returns_ok() {
    let app = common::spawn_app(common::config_with_cores(2)).await;

    let res = app.get("/health").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_metrics_count_home_but_not_health() {
    let app = common::spawn_app(common::config_with_cores(2)).await;

    for _ in 0..3 {
        app.get("/").await;
    }
    app.get("/health").await;

    let body = app.get("/metrics").await.text().await.unwrap();
    let counters: Vec<&str> = body
        .lines()
        .filter(|line| line.starts_with("http_requests_total{"))
        .collect();

    assert_eq!(counters.len(), 1, "unexpected counters: {counters:?}");
    assert!(counters[0].contains("path=\"/\""));
    assert!(counters[0].contains("method=\"GET\""));
    assert!(counters[0].ends_with(" 3"));

    // Every request is timed, tracked or not.
    assert!(body
        .lines()
        .any(|line| line.starts_with("http_request_duration_seconds_count{")
            && line.contains("path=\"/health\"")));
}

#[tokio::test]
async fn test_unknown_path_and_wrong_method() {
    let app = common::spawn_app(common::config_with_cores(2)).await;

    let res = app.get("/does-not-exist").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(res.headers().contains_key(X_REQUEST_ID.as_str()));

    let res = app.client.post(app.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);

    let body = app.get("/metrics").await.text().await.unwrap();
    assert!(body.contains("path=\"unmatched\""));
}

#[tokio::test]
async fn test_request_id_generated_or_echoed() {
    let app = common::spawn_app(common::config_with_cores(2)).await;

    let res = app.get("/").await;
    let generated = res.headers()[X_REQUEST_ID.as_str()].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(generated).is_ok());

    let res = app
        .client
        .get(app.url("/"))
        .header(X_REQUEST_ID.as_str(), "trace-me")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()[X_REQUEST_ID.as_str()], "trace-me");
}
