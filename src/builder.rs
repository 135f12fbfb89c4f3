use std::{fs, path::Path};

use crate::config::Config;
use crate::environment::{EnvSource, ProcessEnv};
use crate::error::{AggregatedError, ConfigError};
use crate::field::{FieldOptions, FieldSpec};
use crate::types::{self, Registry};
use crate::value::ConfigValue;

/// The declaration and validation engine.
///
/// One [`Builder::declare`] call per expected key: each call looks the key
/// up in the environment snapshot, runs the declared converter, and records
/// either a typed value or an error. Failing keys never stop evaluation of
/// later keys; every problem is reported together at finalization.
///
/// # Example
/// ```rust
/// use environment_config::{Builder, FieldOptions, MapEnv};
///
/// let env = MapEnv::new().set("PORT", "8080");
/// let mut builder = Builder::with_source(env);
/// builder.integer("PORT", FieldOptions::required_value());
/// let config = builder.config().unwrap();
/// assert_eq!(config.get("PORT").unwrap().as_i64(), Some(8080));
/// ```
pub struct Builder {
    source: Box<dyn EnvSource>,
    registry: Registry,
    draft: Config,
    fields: Vec<FieldSpec>,
    errors: Vec<ConfigError>,
}

impl Builder {
    /// A builder over a snapshot of the real process environment.
    pub fn new() -> Self {
        Self::with_source(ProcessEnv::capture())
    }

    /// A builder over an injected environment source.
    pub fn with_source(source: impl EnvSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            registry: Registry::with_builtins(),
            draft: Config::new(),
            fields: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// The converter registry. Register custom tags here before declaring
    /// fields that use them.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Every field declared so far, in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Declare one expected key with an explicit type tag.
    ///
    /// The per-type methods (`string`, `integer`, ...) are sugar over this
    /// entry point; use it directly for custom registered tags.
    pub fn declare(
        &mut self,
        key: impl Into<String>,
        type_tag: &str,
        options: FieldOptions,
    ) -> &mut Self {
        let key = key.into();
        self.fields.push(FieldSpec {
            key: key.clone(),
            type_tag: type_tag.to_string(),
            required: options.required,
            default: options.default.clone(),
            doc: options.doc.clone(),
        });

        if options.required && options.default.is_some() {
            self.errors.push(ConfigError::ConflictingOptions { key });
            return self;
        }
        if !self.registry.contains(type_tag) {
            self.errors.push(ConfigError::UnknownType {
                key,
                type_tag: type_tag.to_string(),
            });
            return self;
        }

        match self.source.lookup(&key) {
            Some(raw) => self.convert_and_store(key, type_tag, raw.clone(), raw, options.doc),
            None => match options.default {
                Some(default) => {
                    let rendered = default.to_string();
                    self.convert_and_store(key, type_tag, rendered, default, options.doc);
                }
                None if options.required => {
                    self.errors.push(ConfigError::Missing {
                        key,
                        doc: options.doc,
                    });
                }
                // Absent, optional, no default: the key still belongs to the
                // closed set, with a null value.
                None => self.draft.store(key, ConfigValue::Null),
            },
        }
        self
    }

    fn convert_and_store(
        &mut self,
        key: String,
        type_tag: &str,
        rendered: String,
        input: impl Into<ConfigValue>,
        doc: Option<String>,
    ) {
        // Tag presence was checked in declare.
        match self.registry.convert(type_tag, input.into()) {
            Some(Ok(value)) => self.draft.store(key, value),
            Some(Err(message)) => self.errors.push(ConfigError::Conversion {
                key,
                value: rendered,
                type_tag: type_tag.to_string(),
                message,
                doc,
            }),
            None => self.errors.push(ConfigError::UnknownType {
                key,
                type_tag: type_tag.to_string(),
            }),
        }
    }

    /// Check the declarations so far without consuming the builder.
    ///
    /// Use this for validate-only flows, or before `write_docs`.
    pub fn validate(&self) -> Result<(), AggregatedError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AggregatedError::new(self.errors.clone()))
        }
    }

    /// Finalize: return the immutable [`Config`], or every recorded error.
    ///
    /// Consumes the builder, so no field can be declared after
    /// finalization.
    pub fn config(self) -> Result<Config, AggregatedError> {
        if self.errors.is_empty() {
            Ok(self.draft)
        } else {
            Err(AggregatedError::new(self.errors))
        }
    }

    /// Write a markdown summary table of all declared fields.
    pub fn write_docs(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let mut md = String::new();

        md.push_str("## Environment Variables Summary\n\n");
        md.push_str("| Variable | Type | Required | Default | Description |\n");
        md.push_str("|----------|------|----------|---------|-------------|\n");
        for field in &self.fields {
            let required_str = if field.required { "Yes" } else { "No" };
            let default_display = match &field.default {
                Some(default) => default.to_string(),
                None => "-".to_string(),
            };
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                field.key,
                field.type_tag,
                required_str,
                default_display,
                field.doc.as_deref().unwrap_or("-"),
            ));
        }

        fs::write(path, md)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

environment_config_macros::declare_type_methods! {
    /// Declare a string field. The empty string is a valid value.
    string => types::STRING,
    /// Declare an integer (`i64`) field.
    integer => types::INTEGER,
    /// Declare a float (`f64`) field.
    float => types::FLOAT,
    /// Declare a boolean field (`true`/`false`, `1`/`0`, `yes`/`no`).
    boolean => types::BOOLEAN,
    /// Declare a structural field parsed as JSON; the empty string becomes
    /// null.
    json => types::JSON,
    /// Declare a comma-separated list of strings.
    string_list => types::STRING_LIST,
    /// Declare a comma-separated list of integers.
    integer_list => types::INTEGER_LIST,
}
