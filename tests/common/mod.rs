//! Shared utilities for integration tests.

use std::net::SocketAddr;

use http_quest::config::QuestConfig;
use http_quest::http::HttpServer;
use http_quest::lifecycle::Shutdown;
use tokio::net::TcpListener;

/// A quest server on an ephemeral port, stopped when dropped.
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::with_config(QuestConfig::default()).await
    }

    pub async fn with_config(config: QuestConfig) -> Self {
        let server = HttpServer::new(config).expect("valid config");
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = Shutdown::new();
        let server_shutdown = shutdown.subscribe();
        tokio::spawn(async move {
            let _ = server.run(listener, server_shutdown).await;
        });

        Self { addr, shutdown }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Client that reports redirects instead of following them.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
