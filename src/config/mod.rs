//! Settings subsystem.
//!
//! # Data Flow
//! ```text
//! settings file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → Settings (validated, immutable)
//!     → grammar mode to the merger, style property to the resolver
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal or empty files
//! - Validation separates syntactic (serde) from semantic checks
//! - Settings are fixed for the lifetime of a component instance

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_settings, parse_settings, ConfigError};
pub use schema::{GrammarConfig, LoggingConfig, Settings, StyleConfig};
pub use validation::ValidationError;
