use colored::Colorize;
use std::fmt;

/// A single validation failure for one declared field.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A required environment variable is absent and has no default
    Missing {
        key: String,
        doc: Option<String>,
    },
    /// A present value (or a declared default) failed type conversion
    Conversion {
        key: String,
        value: String,
        type_tag: String,
        message: String,
        doc: Option<String>,
    },
    /// A field was declared both required and with a default value
    ConflictingOptions { key: String },
    /// A declaration referenced a type tag with no registered converter
    UnknownType { key: String, type_tag: String },
    /// A finalized config was asked for a key that was never declared
    UnknownKey { key: String },
}

impl ConfigError {
    /// The environment variable key this error is about.
    pub fn key(&self) -> &str {
        match self {
            ConfigError::Missing { key, .. }
            | ConfigError::Conversion { key, .. }
            | ConfigError::ConflictingOptions { key }
            | ConfigError::UnknownType { key, .. }
            | ConfigError::UnknownKey { key } => key,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing { key, doc } => {
                write!(
                    f,
                    "{}: Is missing from environment and is required",
                    key.magenta().bold()
                )?;
                if let Some(doc) = doc {
                    write!(f, "\n\tDescription: {}", doc)?;
                }
                Ok(())
            }
            ConfigError::Conversion {
                key,
                value,
                type_tag,
                message,
                doc,
            } => {
                write!(
                    f,
                    "{}: Invalid value {} for type {} ({})",
                    key.magenta().bold(),
                    format!("'{}'", value).red(),
                    type_tag.cyan(),
                    message,
                )?;
                if let Some(doc) = doc {
                    write!(f, "\n\tDescription: {}", doc)?;
                }
                Ok(())
            }
            ConfigError::ConflictingOptions { key } => {
                write!(
                    f,
                    "{}: Is declared both required and with a default value",
                    key.magenta().bold()
                )
            }
            ConfigError::UnknownType { key, type_tag } => {
                write!(
                    f,
                    "{}: Declared with unregistered type {}",
                    key.magenta().bold(),
                    format!("'{}'", type_tag).red()
                )
            }
            ConfigError::UnknownKey { key } => {
                write!(
                    f,
                    "{}: Is not a declared configuration key",
                    key.magenta().bold()
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Every validation failure from one load, in declaration order.
///
/// Raised exactly once, at finalization; individual field failures are
/// never raised on their own.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedError {
    errors: Vec<ConfigError>,
}

impl AggregatedError {
    pub(crate) fn new(errors: Vec<ConfigError>) -> Self {
        debug_assert!(!errors.is_empty());
        Self { errors }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ConfigError] {
        &self.errors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ConfigError> {
        self.errors.iter()
    }
}

impl fmt::Display for AggregatedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Configuration failed with {} error(s):",
            self.errors.len().to_string().yellow().bold()
        )?;
        for error in &self.errors {
            writeln!(f, "  - {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for AggregatedError {}

impl IntoIterator for AggregatedError {
    type Item = ConfigError;
    type IntoIter = std::vec::IntoIter<ConfigError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_with_doc() {
        colored::control::set_override(false);

        let error = ConfigError::Missing {
            key: "DATABASE_URL".to_string(),
            doc: Some("PostgreSQL connection string".to_string()),
        };

        let output = error.to_string();
        assert!(output.contains("DATABASE_URL:"));
        assert!(output.contains("missing from environment"));
        assert!(output.contains("Description: PostgreSQL connection string"));
    }

    #[test]
    fn test_missing_without_doc() {
        colored::control::set_override(false);

        let error = ConfigError::Missing {
            key: "SECRET_KEY".to_string(),
            doc: None,
        };

        let output = error.to_string();
        assert!(output.contains("SECRET_KEY:"));
        assert!(!output.contains("Description:"));
    }

    #[test]
    fn test_conversion_display() {
        colored::control::set_override(false);

        let error = ConfigError::Conversion {
            key: "PORT".to_string(),
            value: "not-a-number".to_string(),
            type_tag: "integer".to_string(),
            message: "invalid digit found in string".to_string(),
            doc: None,
        };

        let output = error.to_string();
        assert!(output.contains("PORT"));
        assert!(output.contains("Invalid value 'not-a-number'"));
        assert!(output.contains("integer"));
        assert!(output.contains("invalid digit"));
    }

    #[test]
    fn test_conflicting_options_display() {
        colored::control::set_override(false);

        let error = ConfigError::ConflictingOptions {
            key: "PORT".to_string(),
        };
        assert!(error.to_string().contains("both required and with a default"));
    }

    #[test]
    fn test_unknown_key_display() {
        colored::control::set_override(false);

        let error = ConfigError::UnknownKey {
            key: "TYPO".to_string(),
        };
        assert!(error.to_string().contains("not a declared configuration key"));
    }

    #[test]
    fn test_key_accessor() {
        let error = ConfigError::UnknownType {
            key: "X".to_string(),
            type_tag: "nope".to_string(),
        };
        assert_eq!(error.key(), "X");
    }

    #[test]
    fn test_aggregated_display_lists_every_error_in_order() {
        colored::control::set_override(false);

        let aggregated = AggregatedError::new(vec![
            ConfigError::Missing {
                key: "VAR1".to_string(),
                doc: None,
            },
            ConfigError::Conversion {
                key: "VAR2".to_string(),
                value: "bad".to_string(),
                type_tag: "integer".to_string(),
                message: "invalid digit found in string".to_string(),
                doc: None,
            },
        ]);

        let output = aggregated.to_string();
        assert!(output.contains("Configuration failed with 2 error(s)"));
        let pos1 = output.find("VAR1").unwrap();
        let pos2 = output.find("VAR2").unwrap();
        assert!(pos1 < pos2);
    }

    #[test]
    fn test_aggregated_iteration() {
        let aggregated = AggregatedError::new(vec![ConfigError::Missing {
            key: "ONLY".to_string(),
            doc: None,
        }]);
        assert_eq!(aggregated.len(), 1);
        assert_eq!(aggregated.iter().count(), 1);
        let keys: Vec<_> = aggregated.into_iter().map(|e| e.key().to_string()).collect();
        assert_eq!(keys, vec!["ONLY"]);
    }
}
