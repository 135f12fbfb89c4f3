use std::collections::BTreeMap;
use std::sync::Arc;

use crate::value::ConfigValue;

/// Pass the raw string through unchanged. The empty string is a valid
/// (empty) string.
pub const STRING: &str = "string";
/// Parse as `i64`. The empty string is invalid.
pub const INTEGER: &str = "integer";
/// Parse as `f64`. The empty string is invalid. An already-typed integer
/// widens to a float.
pub const FLOAT: &str = "float";
/// Accepts `true`/`false`, `1`/`0`, `yes`/`no`, case-insensitive. The empty
/// string is invalid.
pub const BOOLEAN: &str = "boolean";
/// Parse as a JSON document. The empty string converts to null.
pub const JSON: &str = "json";
/// Comma-separated strings, each element trimmed. The empty string converts
/// to an empty list.
pub const STRING_LIST: &str = "string_list";
/// Comma-separated integers, each element trimmed. The empty string converts
/// to an empty list.
pub const INTEGER_LIST: &str = "integer_list";

/// A conversion function. The input is either a raw environment string
/// (`ConfigValue::String`) or an already-typed default value; outputs in the
/// converter's target shape pass through unchanged, so conversion is
/// idempotent. Failures carry a short human-readable message.
pub type ConvertFn = dyn Fn(ConfigValue) -> Result<ConfigValue, String> + Send + Sync;

/// Maps type tags to conversion functions.
///
/// The registry is open: [`Registry::register`] adds a tag without any
/// change to the builder, and the generated per-type declaration methods
/// are plain delegations keyed by tag.
#[derive(Clone)]
pub struct Registry {
    converters: BTreeMap<String, Arc<ConvertFn>>,
}

impl Registry {
    /// An empty registry with no converters at all.
    pub fn empty() -> Self {
        Self {
            converters: BTreeMap::new(),
        }
    }

    /// A registry holding every built-in converter.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register(STRING, convert_string);
        registry.register(INTEGER, convert_integer);
        registry.register(FLOAT, convert_float);
        registry.register(BOOLEAN, convert_boolean);
        registry.register(JSON, convert_json);
        registry.register(STRING_LIST, list_of(convert_string));
        registry.register(INTEGER_LIST, list_of(convert_integer));
        registry
    }

    /// Register a converter under `tag`, replacing any previous one.
    pub fn register<F>(&mut self, tag: impl Into<String>, convert: F)
    where
        F: Fn(ConfigValue) -> Result<ConfigValue, String> + Send + Sync + 'static,
    {
        self.converters.insert(tag.into(), Arc::new(convert));
    }

    pub fn get(&self, tag: &str) -> Option<&Arc<ConvertFn>> {
        self.converters.get(tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.converters.contains_key(tag)
    }

    /// Run the converter registered under `tag` over `input`.
    ///
    /// Returns `None` if no converter is registered for the tag.
    pub fn convert(&self, tag: &str, input: ConfigValue) -> Option<Result<ConfigValue, String>> {
        self.converters.get(tag).map(|convert| convert(input))
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("tags", &self.converters.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn mismatch(input: &ConfigValue, expected: &str) -> String {
    format!("expected {}, got {}", expected, input.type_name())
}

fn convert_string(input: ConfigValue) -> Result<ConfigValue, String> {
    match input {
        ConfigValue::String(_) => Ok(input),
        other => Err(mismatch(&other, "a string")),
    }
}

fn convert_integer(input: ConfigValue) -> Result<ConfigValue, String> {
    match input {
        ConfigValue::Integer(_) => Ok(input),
        ConfigValue::String(s) if s.is_empty() => {
            Err("the empty string is not an integer".to_string())
        }
        ConfigValue::String(s) => s
            .parse::<i64>()
            .map(ConfigValue::Integer)
            .map_err(|e| e.to_string()),
        other => Err(mismatch(&other, "an integer")),
    }
}

fn convert_float(input: ConfigValue) -> Result<ConfigValue, String> {
    match input {
        ConfigValue::Float(_) => Ok(input),
        ConfigValue::Integer(i) => Ok(ConfigValue::Float(i as f64)),
        ConfigValue::String(s) if s.is_empty() => {
            Err("the empty string is not a number".to_string())
        }
        ConfigValue::String(s) => s
            .parse::<f64>()
            .map(ConfigValue::Float)
            .map_err(|e| e.to_string()),
        other => Err(mismatch(&other, "a number")),
    }
}

fn convert_boolean(input: ConfigValue) -> Result<ConfigValue, String> {
    match input {
        ConfigValue::Bool(_) => Ok(input),
        ConfigValue::String(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(ConfigValue::Bool(true)),
            "false" | "0" | "no" => Ok(ConfigValue::Bool(false)),
            _ => Err("expected true/false, 1/0 or yes/no".to_string()),
        },
        other => Err(mismatch(&other, "a boolean")),
    }
}

fn convert_json(input: ConfigValue) -> Result<ConfigValue, String> {
    match input {
        ConfigValue::Json(_) | ConfigValue::Null => Ok(input),
        ConfigValue::String(s) if s.is_empty() => Ok(ConfigValue::Null),
        ConfigValue::String(s) => serde_json::from_str(&s)
            .map(ConfigValue::Json)
            .map_err(|e| e.to_string()),
        other => Err(mismatch(&other, "a JSON document")),
    }
}

/// Build a list converter from an element converter. Splits on commas,
/// trims each element, and converts it; an already-typed list is checked
/// element-wise and passed through.
fn list_of<F>(element: F) -> impl Fn(ConfigValue) -> Result<ConfigValue, String>
where
    F: Fn(ConfigValue) -> Result<ConfigValue, String>,
{
    move |input| match input {
        ConfigValue::List(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(element(item)?);
            }
            Ok(ConfigValue::List(out))
        }
        ConfigValue::String(s) if s.is_empty() => Ok(ConfigValue::List(Vec::new())),
        ConfigValue::String(s) => {
            let mut out = Vec::new();
            for part in s.split(',') {
                out.push(element(ConfigValue::String(part.trim().to_string()))?);
            }
            Ok(ConfigValue::List(out))
        }
        other => Err(mismatch(&other, "a list")),
    }
}
