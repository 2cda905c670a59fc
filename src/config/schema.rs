//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::security::headers::HeaderProfile;

/// Root configuration for the greeter.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Listener and runtime settings.
    pub server: ServerConfig,

    /// Application content.
    pub app: AppSection,

    /// Security response headers.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:5000").
    pub bind_address: String,

    /// Debug mode: verbose logging by default.
    pub debug: bool,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5000".to_string(),
            debug: false,
            request_timeout_secs: 30,
        }
    }
}

/// Application content served on `/`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AppSection {
    pub greeting: String,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            greeting: "Olá, DevSecOps Lab!".to_string(),
        }
    }
}

/// Security header configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct SecurityConfig {
    /// Which header set to send.
    pub profile: HeaderProfile,

    /// Ordered headers for the `custom` profile.
    pub headers: Vec<HeaderEntry>,
}

/// A single configured response header.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct HeaderEntry {
    pub name: String,
    pub value: String,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Deployment presets for bind address and debug mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Preset {
    /// Listen on all interfaces with debug enabled.
    Development,
    /// Listen on loopback only with debug disabled.
    Production,
}

impl Preset {
    pub fn apply(self, server: &mut ServerConfig) {
        let (bind_address, debug) = match self {
            Preset::Development => ("0.0.0.0:5000", true),
            Preset::Production => ("127.0.0.1:5000", false),
        };
        server.bind_address = bind_address.to_string();
        server.debug = debug;
    }
}
