//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use secure_greeter::config::AppConfig;
use secure_greeter::http::HttpServer;
use secure_greeter::lifecycle::Shutdown;
use secure_greeter::security::HeaderProfile;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A server running on an ephemeral loopback port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start a server with the given header profile.
pub async fn start_server(profile: HeaderProfile) -> TestServer {
    let mut config = AppConfig::default();
    config.server.bind_address = "127.0.0.1:0".into();
    config.security.profile = profile;
    start_with_config(config).await
}

/// Start a server from a full config. The bind address is honoured as given.
pub async fn start_with_config(config: AppConfig) -> TestServer {
    let listener = TcpListener::bind(&config.server.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(config).unwrap();
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let handle = tokio::spawn(async move { server.run(listener, rx).await });

    tokio::time::sleep(Duration::from_millis(50)).await;
    TestServer { addr, shutdown, handle }
}

/// A client that never pools or proxies.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
