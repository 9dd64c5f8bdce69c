//! Settings loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::Settings;
use crate::config::validation::{validate_settings, ValidationError};

/// Error type for settings loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(
        "Validation failed: {}",
        .0.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
    )]
    Validation(Vec<ValidationError>),
}

/// Parse and validate settings from TOML text.
pub fn parse_settings(content: &str) -> Result<Settings, ConfigError> {
    let settings: Settings = toml::from_str(content)?;
    validate_settings(&settings).map_err(ConfigError::Validation)?;
    Ok(settings)
}

/// Load and validate settings from a TOML file.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_settings(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::GrammarMode;
    use std::io::Write;

    #[test]
    fn empty_file_yields_defaults() {
        let settings = parse_settings("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.style.property, "background-image");
        assert_eq!(settings.grammar.mode, GrammarMode::Strict);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let settings = parse_settings(
            r#"
            [grammar]
            mode = "relaxed"

            [logging]
            json = true
            "#,
        )
        .unwrap();

        assert_eq!(settings.grammar.mode, GrammarMode::Relaxed);
        assert!(settings.logging.json);
        assert_eq!(settings.logging.filter, "background_srcset=info");
    }

    #[test]
    fn unknown_mode_is_a_parse_error() {
        let err = parse_settings("[grammar]\nmode = \"lenient\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn validation_errors_are_joined() {
        let err = parse_settings("[style]\nproperty = \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
        assert_eq!(
            err.to_string(),
            "Validation failed: style.property must not be empty"
        );
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[style]\nproperty = \"mask-image\"").unwrap();

        let settings = load_settings(file.path()).unwrap();
        assert_eq!(settings.style.property, "mask-image");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_settings(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
