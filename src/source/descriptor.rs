//! Source configuration types.
//!
//! # Responsibilities
//! - Hold the running `src`/`srcset`/`sizes` accumulation
//! - Apply partial updates with shallow-merge semantics
//! - Hand out validated snapshots to the resolver

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of one host input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputName {
    /// Primary source URL.
    Src,
    /// Candidate list.
    SrcSet,
    /// Sizing hint.
    Sizes,
}

impl InputName {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputName::Src => "src",
            InputName::SrcSet => "srcset",
            InputName::Sizes => "sizes",
        }
    }
}

impl fmt::Display for InputName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when a host names an input this component does not have.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown input `{0}` (expected src, srcset or sizes)")]
    UnknownInput(String),
}

impl FromStr for InputName {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "src" => Ok(InputName::Src),
            "srcset" => Ok(InputName::SrcSet),
            "sizes" => Ok(InputName::Sizes),
            other => Err(InputError::UnknownInput(other.to_string())),
        }
    }
}

/// The accumulated configuration. Any field may still be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceConfig {
    pub src: Option<String>,
    pub srcset: Option<String>,
    pub sizes: Option<String>,
}

impl SourceConfig {
    /// Shallow merge: fields named by `partial` overwrite, the rest persist.
    pub fn merge(&self, partial: &PartialSourceConfig) -> SourceConfig {
        let pick = |update: &Option<Option<String>>, current: &Option<String>| match update {
            Some(value) => value.clone(),
            None => current.clone(),
        };

        SourceConfig {
            src: pick(&partial.src, &self.src),
            srcset: pick(&partial.srcset, &self.srcset),
            sizes: pick(&partial.sizes, &self.sizes),
        }
    }
}

/// A partial update naming one or more inputs.
///
/// The outer `Option` says whether the field is named at all; the inner one
/// carries the new value, where `None` resets the field to absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialSourceConfig {
    pub src: Option<Option<String>>,
    pub srcset: Option<Option<String>>,
    pub sizes: Option<Option<String>>,
}

impl PartialSourceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn src(mut self, value: impl Into<String>) -> Self {
        self.src = Some(Some(value.into()));
        self
    }

    pub fn srcset(mut self, value: impl Into<String>) -> Self {
        self.srcset = Some(Some(value.into()));
        self
    }

    pub fn sizes(mut self, value: impl Into<String>) -> Self {
        self.sizes = Some(Some(value.into()));
        self
    }

    /// Name a single input with a possibly absent value.
    pub fn with(mut self, name: InputName, value: Option<String>) -> Self {
        match name {
            InputName::Src => self.src = Some(value),
            InputName::SrcSet => self.srcset = Some(value),
            InputName::Sizes => self.sizes = Some(value),
        }
        self
    }

    /// True if the update names no input at all.
    pub fn is_empty(&self) -> bool {
        self.src.is_none() && self.srcset.is_none() && self.sizes.is_none()
    }
}

impl FromIterator<(InputName, Option<String>)> for PartialSourceConfig {
    fn from_iter<I: IntoIterator<Item = (InputName, Option<String>)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(PartialSourceConfig::new(), |partial, (name, value)| partial.with(name, value))
    }
}

/// A configuration that passed validation: `src` present, `srcset` well formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSourceConfig {
    pub src: String,
    pub srcset: String,
    pub sizes: Option<String>,
}

impl ValidSourceConfig {
    /// Sizing hint as handed to the probe; absent becomes empty.
    pub fn sizes_or_empty(&self) -> &str {
        self.sizes.as_deref().unwrap_or("")
    }
}
