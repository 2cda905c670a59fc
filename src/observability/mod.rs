//! Observability subsystem.
//!
//! Diagnostic logging only: startup, bind, shutdown, and per-request spans
//! from `tower_http::trace`. No metrics endpoint is exposed.

pub mod logging;

pub use logging::init_logging;
