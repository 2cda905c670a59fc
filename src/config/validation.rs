//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeout > 0, bind address parses)
//! - Check the custom header list is usable as response headers
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use axum::http::{HeaderName, HeaderValue};
use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::security::headers::HeaderProfile;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("server.bind_address {0:?} is not a socket address")]
    BindAddress(String),

    #[error("server.request_timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("app.greeting must not be empty")]
    EmptyGreeting,

    #[error("security.headers is empty but profile is custom")]
    EmptyCustomHeaders,

    #[error("security.headers is only used by the custom profile")]
    UnusedCustomHeaders,

    #[error("security.headers[{index}]: invalid header name {name:?}")]
    HeaderName { index: usize, name: String },

    #[error("security.headers[{index}]: invalid value for {name}")]
    HeaderValue { index: usize, name: String },

    #[error("security.headers[{index}]: duplicate header {name}")]
    DuplicateHeader { index: usize, name: String },
}

pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.server.bind_address.clone()));
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if config.app.greeting.is_empty() {
        errors.push(ValidationError::EmptyGreeting);
    }

    let headers = &config.security.headers;
    match config.security.profile {
        HeaderProfile::Custom if headers.is_empty() => {
            errors.push(ValidationError::EmptyCustomHeaders);
        }
        HeaderProfile::Custom => {
            let mut seen = HashSet::new();
            for (index, entry) in headers.iter().enumerate() {
                let Ok(name) = HeaderName::from_bytes(entry.name.as_bytes()) else {
                    errors.push(ValidationError::HeaderName {
                        index,
                        name: entry.name.clone(),
                    });
                    continue;
                };
                if HeaderValue::from_str(&entry.value).is_err() {
                    errors.push(ValidationError::HeaderValue {
                        index,
                        name: entry.name.clone(),
                    });
                }
                if !seen.insert(name) {
                    errors.push(ValidationError::DuplicateHeader {
                        index,
                        name: entry.name.clone(),
                    });
                }
            }
        }
        _ if !headers.is_empty() => errors.push(ValidationError::UnusedCustomHeaders),
        _ => {}
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
