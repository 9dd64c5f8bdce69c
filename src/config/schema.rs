//! Settings schema definitions.
//!
//! Host-level settings for a background-srcset component. All types derive
//! Serde traits for deserialization from TOML.

use serde::{Deserialize, Serialize};

use crate::source::GrammarMode;

/// Root settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Candidate-list checking.
    pub grammar: GrammarConfig,

    /// Where the resolved source is written.
    pub style: StyleConfig,

    /// Log output.
    pub logging: LoggingConfig,
}

/// Candidate-list grammar settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct GrammarConfig {
    /// `strict` requires a descriptor on every candidate; `relaxed` allows a bare URL.
    pub mode: GrammarMode,
}

/// Style side-effect settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct StyleConfig {
    /// CSS property receiving `url(...)`.
    pub property: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            property: "background-image".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directives; `RUST_LOG` wins when set.
    pub filter: String,

    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "background_srcset=info".to_string(),
            json: false,
        }
    }
}
