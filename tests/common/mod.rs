//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use resilient_gitops::config::{AppConfig, StressConfig};
use resilient_gitops::{HttpServer, Shutdown, Telemetry};
use tokio::net::TcpListener;

/// A server running on an ephemeral port. Shuts down when dropped.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    shutdown: Shutdown,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client.get(self.url(path)).send().await.unwrap()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Config with a fixed core count so worker limits are predictable.
pub fn config_with_cores(cores: usize) -> AppConfig {
    AppConfig {
        stress: StressConfig {
            cores: Some(cores),
            ..StressConfig::default()
        },
        ..AppConfig::default()
    }
}

/// Start the service on 127.0.0.1 with an OS-assigned port.
pub async fn spawn_app(config: AppConfig) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config, Arc::new(Telemetry::new().unwrap()));
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestApp {
        addr,
        client: reqwest::Client::new(),
        shutdown,
    }
}
