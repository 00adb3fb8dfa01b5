//! Test fixtures for HTTP API integration tests.

use std::time::Duration;

use batepapo_rs::{ServerConfig, scheduler::SweepConfig};

/// A server instance running inside the test runtime.
pub struct TestServer {
    port: u16,
}

impl TestServer {
    /// Start a server whose sweep is effectively disabled, so presence
    /// tests are not disturbed by background eviction.
    pub async fn start(port: u16) -> Self {
        Self::start_with_sweep(
            port,
            SweepConfig {
                interval: Duration::from_secs(3600),
                idle_timeout: Duration::from_secs(3600),
            },
        )
        .await
    }

    /// Start a server with explicit sweep timing.
    pub async fn start_with_sweep(port: u16, sweep: SweepConfig) -> Self {
        let config = ServerConfig { port, sweep };
        tokio::spawn(async move {
            if let Err(e) = batepapo_rs::run_server(config).await {
                eprintln!("test server error: {e}");
            }
        });

        let server = Self { port };
        server.wait_ready().await;
        server
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    async fn wait_ready(&self) {
        let client = reqwest::Client::new();
        for _ in 0..100 {
            if let Ok(response) = client
                .get(format!("{}/health", self.base_url()))
                .send()
                .await
            {
                if response.status() == 200 {
                    return;
                }
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("server on port {} did not become ready", self.port);
    }
}
