use crate::value::ConfigValue;

/// One declared field: its key, type tag, and required/default policy.
///
/// Specs are kept in declaration order; that order drives the order of the
/// aggregated error report and the documentation table.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FieldSpec {
    /// Environment variable key
    pub key: String,
    /// Type tag resolved against the converter registry
    pub type_tag: String,
    /// Whether the variable must be present
    pub required: bool,
    /// Default used when the variable is absent; raw string or already typed
    pub default: Option<ConfigValue>,
    /// Human-readable description, used in error messages and docs
    pub doc: Option<String>,
}

/// Options for a single declaration: `required`, `default`, and an optional
/// description.
///
/// Declaring a field both required and with a default is a conflict; the
/// builder records it as an error rather than picking a winner.
#[derive(Debug, Clone, Default)]
pub struct FieldOptions {
    pub(crate) required: bool,
    pub(crate) default: Option<ConfigValue>,
    pub(crate) doc: Option<String>,
}

impl FieldOptions {
    /// Optional field, no default.
    pub fn new() -> Self {
        Self {
            required: false,
            default: None,
            doc: None,
        }
    }

    /// Shorthand for `FieldOptions::new().required(true)`.
    pub fn required_value() -> Self {
        Self::new().required(true)
    }

    /// Shorthand for `FieldOptions::new().default(value)`.
    pub fn with_default(value: impl Into<ConfigValue>) -> Self {
        Self::new().default(value)
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Default applied when the variable is absent. The value runs through
    /// the declared converter, so it may be a raw string or already typed.
    pub fn default(mut self, value: impl Into<ConfigValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}
