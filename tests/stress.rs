//! Stress endpoint behaviour over real TCP.

use std::time::{Duration, Instant};

use reqwest::StatusCode;
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

mod common;

async fn stress(app: &common::TestApp, query: &str) -> (StatusCode, Value, Duration) {
    let start = Instant::now();
    let res = app.get(&format!("/stress{}", query)).await;
    let status = res.status();
    let body = res.json().await.unwrap();
    (status, body, start.elapsed())
}

#[tokio::test]
async fn test_negative_workers_rejected() {
    let app = common::spawn_app(common::config_with_cores(4)).await;

    let (status, body, _) = stress(&app, "?workers=-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "workers must be between 1 and 8");
}

#[tokio::test]
async fn test_zero_workers_rejected() {
    let app = common::spawn_app(common::config_with_cores(3)).await;

    let (status, body, _) = stress(&app, "?duration=1s&workers=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "workers must be between 1 and 6");
}

#[tokio::test]
async fn test_sub_second_durations_rejected() {
    let app = common::spawn_app(common::config_with_cores(2)).await;

    for query in ["?duration=500ms", "?duration=0s", "?duration=-2s", "?duration=0&workers=0"] {
        let (status, body, elapsed) = stress(&app, query).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "query {query}");
        assert_eq!(body["message"], "duration must be between 1s and 30s");
        assert!(elapsed < Duration::from_secs(1));
    }
}

#[tokio::test]
async fn test_workers_clamped_and_duration_honoured() {
    let app = common::spawn_app(common::config_with_cores(2)).await;

    let (status, body, elapsed) = stress(&app, "?duration=1s&workers=100").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "stress_complete");
    assert_eq!(body["message"], "CPU load simulation finished");
    assert_eq!(body["workers"], 4);
    assert!(elapsed >= Duration::from_secs(1));

    let reported = body["duration"].as_str().unwrap();
    assert!(reported.starts_with("1.") || reported == "1s", "reported {reported}");
}

#[tokio::test]
async fn test_unparseable_duration_uses_default() {
    let app = common::spawn_app(common::config_with_cores(1)).await;

    let (status, body, elapsed) = stress(&app, "?duration=banana&workers=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["workers"], 1);
    assert!(elapsed >= Duration::from_secs(2));
}

#[tokio::test]
async fn test_long_duration_clamped_to_ceiling() {
    let mut config = common::config_with_cores(1);
    config.stress.default_duration_secs = 1;
    config.stress.max_duration_secs = 1;
    let app = common::spawn_app(config).await;

    let (status, body, elapsed) = stress(&app, "?duration=45s&workers=1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(elapsed >= Duration::from_secs(1));
    assert!(elapsed < Duration::from_secs(10));
    assert_eq!(body["workers"], 1);
}

#[tokio::test]
async fn test_disconnected_client_still_observed() {
    let app = common::spawn_app(common::config_with_cores(1)).await;

    let mut socket = TcpStream::connect(app.addr).await.unwrap();
    socket
        .write_all(b"GET /stress?duration=1s&workers=1 HTTP/1.1\r\nHost: localhost\r\n\r\n")
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;
    drop(socket);

    // Let the burst run out its deadline after the client has gone.
    tokio::time::sleep(Duration::from_millis(2500)).await;

    let body = app.get("/metrics").await.text().await.unwrap();
    let observed = body.lines().find(|line| {
        line.starts_with("http_request_duration_seconds_count{") && line.contains("path=\"/stress\"")
    });
    assert!(
        observed.is_some_and(|line| line.ends_with(" 1")),
        "metrics were:\n{body}"
    );
}
