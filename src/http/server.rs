//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the greeting route
//! - Wire up middleware (tracing, timeout, security headers)
//! - Bind server to listener
//! - Stop on the shutdown broadcast

use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{AppConfig, ConfigError};
use crate::http::handlers::greeting_handler;
use crate::security::headers::{security_headers_middleware, SecurityHeaderSet};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub greeting: Arc<str>,
}

/// HTTP server for the greeter.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails only if the `custom` header profile is empty or holds unusable headers.
    pub fn new(config: AppConfig) -> Result<Self, ConfigError> {
        let headers = Arc::new(SecurityHeaderSet::for_profile(
            config.security.profile,
            &config.security.headers,
        )?);

        tracing::info!(
            profile = ?config.security.profile,
            header_count = headers.len(),
            "Security headers configured"
        );

        let state = AppState {
            greeting: Arc::from(config.app.greeting.as_str()),
        };

        let timeout = Duration::from_secs(config.server.request_timeout_secs);
        let router = Self::with_layers(Self::routes(state), timeout, headers);
        Ok(Self { router, config })
    }

    /// The route table.
    fn routes(state: AppState) -> Router {
        Router::new()
            .route("/", get(greeting_handler))
            .with_state(state)
    }

    /// Wrap `routes` in all middleware layers.
    ///
    /// The header layer sits outside the timeout so framework-generated
    /// responses (404, 405, 408) carry the headers too.
    #[allow(deprecated)]
    fn with_layers(routes: Router, timeout: Duration, headers: Arc<SecurityHeaderSet>) -> Router {
        routes
            .layer(TimeoutLayer::new(timeout))
            .layer(middleware::from_fn_with_state(
                headers,
                security_headers_middleware,
            ))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            debug = self.config.server.debug,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// A clone of the router, for serving in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
