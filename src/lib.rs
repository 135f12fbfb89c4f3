//! Typed, validated application configuration from environment variables.
//!
//! Declare every expected variable in one place, with its type and
//! required/default policy; get back an immutable [`Config`], or one
//! [`AggregatedError`] listing every problem at once.
//!
//! ```rust
//! use environment_config::{FieldOptions, MapEnv};
//! use serde_json::json;
//!
//! let env = MapEnv::new().set("PORT", "8080");
//! let config = environment_config::load_from(env, |env| {
//!     env.integer("PORT", FieldOptions::required_value());
//!     env.json("FLAGS", FieldOptions::with_default(json!({})));
//! })
//! .unwrap();
//!
//! assert_eq!(config.get("PORT").unwrap().as_i64(), Some(8080));
//! assert_eq!(config.get("FLAGS").unwrap().as_json(), Some(&json!({})));
//! ```

pub mod builder;
pub mod config;
pub mod environment;
pub mod error;
pub mod field;
pub mod symbol;
pub mod types;
pub mod value;

// Re-export main types
pub use builder::Builder;
pub use config::Config;
pub use environment::{EnvSource, MapEnv, ProcessEnv};
pub use error::{AggregatedError, ConfigError};
pub use field::{FieldOptions, FieldSpec};
pub use symbol::Symbol;
pub use types::Registry;
pub use value::ConfigValue;

/// Load a configuration from the process environment.
///
/// Applies `.env` via dotenvy first, snapshots the environment, runs the
/// declarations in `f`, and finalizes.
pub fn load(f: impl FnOnce(&mut Builder)) -> Result<Config, AggregatedError> {
    let _ = dotenvy::dotenv();
    let mut builder = Builder::new();
    f(&mut builder);
    builder.config()
}

/// Load a configuration from an injected environment source.
pub fn load_from(
    source: impl EnvSource + 'static,
    f: impl FnOnce(&mut Builder),
) -> Result<Config, AggregatedError> {
    let mut builder = Builder::with_source(source);
    f(&mut builder);
    builder.config()
}

/// Validate the same declarations `load` would, discarding the result.
///
/// Returns nothing on success; fails with the same [`AggregatedError`] as
/// [`load`] otherwise.
pub fn ensure(f: impl FnOnce(&mut Builder)) -> Result<(), AggregatedError> {
    load(f).map(|_| ())
}

/// Validate-only counterpart of [`load_from`].
pub fn ensure_from(
    source: impl EnvSource + 'static,
    f: impl FnOnce(&mut Builder),
) -> Result<(), AggregatedError> {
    load_from(source, f).map(|_| ())
}
