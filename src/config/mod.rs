//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults / deployment preset
//!     → loader.rs (TOML file, if given)
//!     → CLI overrides (main.rs)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no hot reload
//! - All fields have defaults so an empty file is valid
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, read_config, ConfigError};
pub use schema::{
    AppConfig, AppSection, HeaderEntry, ObservabilityConfig, Preset, SecurityConfig, ServerConfig,
};
pub use validation::{validate_config, ValidationError};
