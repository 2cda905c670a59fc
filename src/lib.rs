//! Greeting server that hardens every response with security headers.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use security::{HeaderProfile, SecurityHeaderSet};
