use std::collections::BTreeMap;
use std::env;

/// A source of environment variables with a single lookup operation.
///
/// The builder reads every declared key through this trait, so tests can
/// inject a [`MapEnv`] instead of touching real process state.
pub trait EnvSource {
    /// Look up a variable by name. `None` means the variable is unset.
    fn lookup(&self, name: &str) -> Option<String>;
}

/// An immutable snapshot of the real process environment.
///
/// The snapshot is taken once, in [`ProcessEnv::capture`], so repeated
/// lookups during a single load see the same values even if the process
/// environment is mutated concurrently.
#[derive(Debug, Clone)]
pub struct ProcessEnv {
    vars: BTreeMap<String, String>,
}

impl ProcessEnv {
    /// Snapshot the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn capture() -> Self {
        Self {
            vars: env::vars_os()
                .filter_map(|(name, value)| {
                    Some((name.into_string().ok()?, value.into_string().ok()?))
                })
                .collect(),
        }
    }
}

impl EnvSource for ProcessEnv {
    fn lookup(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// An in-memory environment, used as a deterministic stand-in for the
/// process environment in tests.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: BTreeMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable, replacing any existing value under the same name.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvSource for MapEnv {
    fn lookup(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}
