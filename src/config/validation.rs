//! Settings validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the style property is a plausible CSS property name
//! - Check the log filter is present
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: Settings → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::Settings;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("style.property must not be empty")]
    EmptyStyleProperty,

    #[error("style.property `{0}` is not a CSS property name (lowercase letters and '-')")]
    InvalidStyleProperty(String),

    #[error("logging.filter must not be empty")]
    EmptyLogFilter,
}

pub fn validate_settings(settings: &Settings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let property = settings.style.property.as_str();
    if property.is_empty() {
        errors.push(ValidationError::EmptyStyleProperty);
    } else if !property.chars().all(|c| c.is_ascii_lowercase() || c == '-') {
        errors.push(ValidationError::InvalidStyleProperty(property.to_string()));
    }

    if settings.logging.filter.trim().is_empty() {
        errors.push(ValidationError::EmptyLogFilter);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
