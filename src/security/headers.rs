//! Security response headers.
//!
//! # Responsibilities
//! - Hold the ordered, immutable set of security headers for a deployment
//! - Provide the built-in `minimal` and `comprehensive` profiles
//! - Overwrite those headers on every outgoing response
//!
//! # Design Decisions
//! - Built once at startup, shared via `Arc`, never mutated afterwards
//! - Insert (overwrite) semantics so applying twice equals applying once
//! - Body and status are never touched

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{
        header::{
            CACHE_CONTROL, CONTENT_SECURITY_POLICY, EXPIRES, PRAGMA, X_CONTENT_TYPE_OPTIONS,
            X_FRAME_OPTIONS,
        },
        HeaderMap, HeaderName, HeaderValue, Response,
    },
    middleware::Next,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::HeaderEntry;

pub const CROSS_ORIGIN_RESOURCE_POLICY: HeaderName =
    HeaderName::from_static("cross-origin-resource-policy");
pub const CROSS_ORIGIN_EMBEDDER_POLICY: HeaderName =
    HeaderName::from_static("cross-origin-embedder-policy");
pub const CROSS_ORIGIN_OPENER_POLICY: HeaderName =
    HeaderName::from_static("cross-origin-opener-policy");
pub const PERMISSIONS_POLICY: HeaderName = HeaderName::from_static("permissions-policy");

/// CSP written by the minimal profile.
pub const MINIMAL_CSP: &str = "default-src 'self';";

/// CSP written by the comprehensive profile.
pub const STRICT_CSP: &str = "default-src 'self'; frame-ancestors 'self'; form-action 'self';";

/// Which header set a deployment sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HeaderProfile {
    /// A single Content-Security-Policy directive.
    #[default]
    Minimal,
    /// Anti-clickjacking, MIME-sniffing, cross-origin isolation and cache suppression.
    Comprehensive,
    /// Headers listed under `[[security.headers]]` in the config file.
    Custom,
}

/// Error building a header set from configuration.
#[derive(Debug, Error)]
pub enum HeaderSetError {
    #[error("invalid header name: {0:?}")]
    InvalidName(String),

    #[error("invalid value for header {name}: {value:?}")]
    InvalidValue { name: String, value: String },

    #[error("duplicate header name: {0}")]
    Duplicate(String),

    #[error("custom header profile has no headers")]
    Empty,
}

/// Ordered collection of security headers with unique names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecurityHeaderSet {
    entries: Vec<(HeaderName, HeaderValue)>,
}

impl SecurityHeaderSet {
    /// Build a set from name/value pairs, rejecting duplicates and malformed input.
    pub fn try_from_pairs<I, N, V>(pairs: I) -> Result<Self, HeaderSetError>
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: AsRef<str>,
    {
        let mut set = Self::default();
        for (name, value) in pairs {
            let (name, value) = (name.as_ref(), value.as_ref());
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| HeaderSetError::InvalidName(name.to_string()))?;
            let header_value =
                HeaderValue::from_str(value).map_err(|_| HeaderSetError::InvalidValue {
                    name: name.to_string(),
                    value: value.to_string(),
                })?;
            set.push(header_name, header_value)?;
        }
        Ok(set)
    }

    /// Only `Content-Security-Policy: default-src 'self';`.
    pub fn minimal() -> Self {
        Self {
            entries: vec![(CONTENT_SECURITY_POLICY, HeaderValue::from_static(MINIMAL_CSP))],
        }
    }

    /// The full hardening set.
    pub fn comprehensive() -> Self {
        Self {
            entries: vec![
                (CONTENT_SECURITY_POLICY, HeaderValue::from_static(STRICT_CSP)),
                (X_FRAME_OPTIONS, HeaderValue::from_static("SAMEORIGIN")),
                (X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
                (CROSS_ORIGIN_RESOURCE_POLICY, HeaderValue::from_static("same-origin")),
                (CROSS_ORIGIN_EMBEDDER_POLICY, HeaderValue::from_static("require-corp")),
                (CROSS_ORIGIN_OPENER_POLICY, HeaderValue::from_static("same-origin")),
                (
                    PERMISSIONS_POLICY,
                    HeaderValue::from_static("camera=(), microphone=(), geolocation=(), fullscreen=()"),
                ),
                (
                    CACHE_CONTROL,
                    HeaderValue::from_static("no-cache, no-store, must-revalidate, private"),
                ),
                (PRAGMA, HeaderValue::from_static("no-cache")),
                (EXPIRES, HeaderValue::from_static("0")),
            ],
        }
    }

    /// Resolve a profile to its header set.
    ///
    /// `custom` entries come from configuration and may be rejected, including
    /// an empty list.
    pub fn for_profile(
        profile: HeaderProfile,
        custom: &[HeaderEntry],
    ) -> Result<Self, HeaderSetError> {
        match profile {
            HeaderProfile::Minimal => Ok(Self::minimal()),
            HeaderProfile::Comprehensive => Ok(Self::comprehensive()),
            HeaderProfile::Custom if custom.is_empty() => Err(HeaderSetError::Empty),
            HeaderProfile::Custom => {
                Self::try_from_pairs(custom.iter().map(|h| (&h.name, &h.value)))
            }
        }
    }

    fn push(&mut self, name: HeaderName, value: HeaderValue) -> Result<(), HeaderSetError> {
        // HeaderName is already lowercased, so equality is case-insensitive.
        if self.entries.iter().any(|(existing, _)| *existing == name) {
            return Err(HeaderSetError::Duplicate(name.to_string()));
        }
        self.entries.push((name, value));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the headers in application order.
    pub fn iter(&self) -> impl Iterator<Item = (&HeaderName, &HeaderValue)> {
        self.entries.iter().map(|(n, v)| (n, v))
    }

    /// Overwrite every header of the set on `headers`.
    pub fn apply_to_headers(&self, headers: &mut HeaderMap) {
        for (name, value) in &self.entries {
            headers.insert(name.clone(), value.clone());
        }
    }

    /// Set the headers on a response and hand it back with body and status untouched.
    pub fn apply<B>(&self, mut response: Response<B>) -> Response<B> {
        self.apply_to_headers(response.headers_mut());
        response
    }
}

/// Post-processing hook applied to every outgoing response.
pub async fn security_headers_middleware(
    State(headers): State<Arc<SecurityHeaderSet>>,
    request: Request,
    next: Next,
) -> axum::response::Response {
    let response = next.run(request).await;
    headers.apply(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;

    fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
        headers.get(name).and_then(|v| v.to_str().ok())
    }

    #[test]
    fn test_minimal_profile() {
        let set = SecurityHeaderSet::minimal();
        assert_eq!(set.len(), 1);

        let mut headers = HeaderMap::new();
        set.apply_to_headers(&mut headers);
        assert_eq!(headers.len(), 1);
        assert_eq!(header(&headers, "content-security-policy"), Some("default-src 'self';"));
    }

    #[test]
    fn test_comprehensive_profile() {
        let set = SecurityHeaderSet::comprehensive();
        let mut headers = HeaderMap::new();
        set.apply_to_headers(&mut headers);

        let expected = [
            ("Content-Security-Policy", STRICT_CSP),
            ("X-Frame-Options", "SAMEORIGIN"),
            ("X-Content-Type-Options", "nosniff"),
            ("Cross-Origin-Resource-Policy", "same-origin"),
            ("Cross-Origin-Embedder-Policy", "require-corp"),
            ("Cross-Origin-Opener-Policy", "same-origin"),
            ("Permissions-Policy", "camera=(), microphone=(), geolocation=(), fullscreen=()"),
            ("Cache-Control", "no-cache, no-store, must-revalidate, private"),
            ("Pragma", "no-cache"),
            ("Expires", "0"),
        ];
        assert_eq!(headers.len(), expected.len());
        for (name, value) in expected {
            assert_eq!(header(&headers, name), Some(value), "header {name}");
        }
    }

    #[test]
    fn test_comprehensive_order() {
        let names: Vec<_> = SecurityHeaderSet::comprehensive()
            .iter()
            .map(|(n, _)| n.as_str().to_string())
            .collect();
        assert_eq!(names.first().map(String::as_str), Some("content-security-policy"));
        assert_eq!(names.last().map(String::as_str), Some("expires"));
    }

    #[test]
    fn test_apply_overwrites_existing() {
        let mut headers = HeaderMap::new();
        headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
        headers.append(CACHE_CONTROL, HeaderValue::from_static("public"));
        headers.append(CACHE_CONTROL, HeaderValue::from_static("max-age=60"));

        SecurityHeaderSet::comprehensive().apply_to_headers(&mut headers);

        assert_eq!(header(&headers, "x-frame-options"), Some("SAMEORIGIN"));
        let cache: Vec<_> = headers.get_all(CACHE_CONTROL).iter().collect();
        assert_eq!(cache.len(), 1);
        assert_eq!(cache[0], "no-cache, no-store, must-revalidate, private");
    }

    #[test]
    fn test_apply_is_idempotent() {
        let set = SecurityHeaderSet::comprehensive();
        let mut once = HeaderMap::new();
        set.apply_to_headers(&mut once);

        let mut twice = HeaderMap::new();
        set.apply_to_headers(&mut twice);
        set.apply_to_headers(&mut twice);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_apply_preserves_status_and_unrelated_headers() {
        let response = Response::builder()
            .status(StatusCode::IM_A_TEAPOT)
            .header("x-custom", "kept")
            .body(Body::from("teapot"))
            .unwrap();

        let response = SecurityHeaderSet::minimal().apply(response);

        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
        assert_eq!(header(response.headers(), "x-custom"), Some("kept"));
        assert_eq!(header(response.headers(), "content-security-policy"), Some(MINIMAL_CSP));
    }

    #[test]
    fn test_try_from_pairs_rejects_duplicates() {
        let err = SecurityHeaderSet::try_from_pairs([
            ("X-Frame-Options", "DENY"),
            ("x-frame-options", "SAMEORIGIN"),
        ])
        .unwrap_err();
        assert!(matches!(err, HeaderSetError::Duplicate(name) if name == "x-frame-options"));
    }

    #[test]
    fn test_try_from_pairs_rejects_malformed() {
        assert!(matches!(
            SecurityHeaderSet::try_from_pairs([("bad name", "x")]),
            Err(HeaderSetError::InvalidName(_))
        ));
        assert!(matches!(
            SecurityHeaderSet::try_from_pairs([("x-ok", "line\nbreak")]),
            Err(HeaderSetError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_custom_profile() {
        let custom = vec![HeaderEntry {
            name: "Referrer-Policy".into(),
            value: "no-referrer".into(),
        }];
        let set = SecurityHeaderSet::for_profile(HeaderProfile::Custom, &custom).unwrap();
        assert_eq!(set.len(), 1);

        // Built-in profiles ignore the custom list.
        let set = SecurityHeaderSet::for_profile(HeaderProfile::Minimal, &custom).unwrap();
        assert_eq!(set, SecurityHeaderSet::minimal());
    }

    #[test]
    fn test_empty_custom_profile_rejected() {
        assert!(matches!(
            SecurityHeaderSet::for_profile(HeaderProfile::Custom, &[]),
            Err(HeaderSetError::Empty)
        ));
        // Built-in profiles never need the custom list.
        assert!(SecurityHeaderSet::for_profile(HeaderProfile::Comprehensive, &[]).is_ok());
    }
}
