//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Outgoing response:
//!     → headers.rs (overwrite configured security headers)
//!     → Send to client
//! ```

pub mod headers;

pub use headers::{security_headers_middleware, HeaderProfile, HeaderSetError, SecurityHeaderSet};
