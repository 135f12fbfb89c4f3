use std::collections::BTreeMap;

use crate::error::ConfigError;
use crate::symbol::Symbol;
use crate::value::ConfigValue;

/// The immutable result of a successful load: a closed, typed key-value
/// store.
///
/// The key set is fixed at finalization and equals exactly the set of
/// declared fields. Asking for anything outside that set is a programmer
/// error and fails with [`ConfigError::UnknownKey`] instead of returning a
/// placeholder, so a typo surfaces immediately.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    store: BTreeMap<String, ConfigValue>,
}

impl Config {
    pub(crate) fn new() -> Self {
        Self {
            store: BTreeMap::new(),
        }
    }

    /// Accumulation-time mutator. Not reachable through the public read
    /// surface of a finalized config.
    pub(crate) fn store(&mut self, key: impl Into<String>, value: ConfigValue) {
        self.store.insert(key.into(), value);
    }

    /// Typed access by declared key.
    pub fn get(&self, key: &str) -> Result<&ConfigValue, ConfigError> {
        self.store.get(key).ok_or_else(|| ConfigError::UnknownKey {
            key: key.to_string(),
        })
    }

    /// Membership against the closed declared set; agrees exactly with
    /// [`Config::get`].
    pub fn contains(&self, key: &str) -> bool {
        self.store.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.store.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// A fresh copy keyed by the original string keys. Mutating the returned
    /// map never affects this config or later exports.
    pub fn to_string_map(&self) -> BTreeMap<String, ConfigValue> {
        self.store.clone()
    }

    /// A fresh copy keyed by interned [`Symbol`]s. Mutating the returned map
    /// never affects this config or later exports.
    ///
    /// There is deliberately no undifferentiated `to_map`: callers must pick
    /// a key representation, this one or [`Config::to_string_map`].
    pub fn to_symbol_map(&self) -> BTreeMap<Symbol, ConfigValue> {
        self.store
            .iter()
            .map(|(k, v)| (Symbol::intern(k), v.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        let mut config = Config::new();
        config.store("PORT", ConfigValue::Integer(8080));
        config.store("HOST", ConfigValue::from("localhost"));
        config
    }

    #[test]
    fn test_get_declared_key() {
        let config = sample();
        assert_eq!(config.get("PORT"), Ok(&ConfigValue::Integer(8080)));
        // Repeated access returns equal values.
        assert_eq!(config.get("PORT"), config.get("PORT"));
    }

    #[test]
    fn test_get_unknown_key_fails() {
        let config = sample();
        let err = config.get("TYPO").unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownKey {
                key: "TYPO".to_string()
            }
        );
    }

    #[test]
    fn test_contains_agrees_with_get() {
        let config = sample();
        assert!(config.contains("PORT"));
        assert!(config.get("PORT").is_ok());
        assert!(!config.contains("TYPO"));
        assert!(config.get("TYPO").is_err());
    }

    #[test]
    fn test_string_and_symbol_maps_hold_identical_values() {
        let config = sample();
        let by_string = config.to_string_map();
        let by_symbol = config.to_symbol_map();

        assert_eq!(by_string.len(), by_symbol.len());
        for (key, value) in &by_string {
            assert_eq!(by_symbol.get(&Symbol::intern(key)), Some(value));
        }
    }

    #[test]
    fn test_exports_are_fresh_copies() {
        let config = sample();

        let mut by_string = config.to_string_map();
        by_string.insert("PORT".to_string(), ConfigValue::Integer(1));
        by_string.insert("EXTRA".to_string(), ConfigValue::Null);

        let again = config.to_string_map();
        assert_eq!(again.get("PORT"), Some(&ConfigValue::Integer(8080)));
        assert!(!again.contains_key("EXTRA"));

        let mut by_symbol = config.to_symbol_map();
        by_symbol.insert(Symbol::intern("PORT"), ConfigValue::Null);
        assert_eq!(
            config.to_symbol_map().get(&Symbol::intern("PORT")),
            Some(&ConfigValue::Integer(8080))
        );
    }

    #[test]
    fn test_keys_iterates_declared_set() {
        let config = sample();
        let keys: Vec<_> = config.keys().collect();
        assert_eq!(keys, vec!["HOST", "PORT"]);
        assert_eq!(config.len(), 2);
        assert!(!config.is_empty());
    }
}
