use environment_config::{ConfigError, ConfigValue, FieldOptions, MapEnv, Symbol};

fn loaded() -> environment_config::Config {
    let env = MapEnv::new()
        .set("PORT", "8080")
        .set("HOST", "localhost")
        .set("DEBUG", "true");

    environment_config::load_from(env, |env| {
        env.integer("PORT", FieldOptions::required_value());
        env.string("HOST", FieldOptions::required_value());
        env.boolean("DEBUG", FieldOptions::with_default(false));
    })
    .unwrap()
}

#[test]
fn test_typed_access_by_declared_key() {
    let config = loaded();
    assert_eq!(config.get("PORT").unwrap().as_i64(), Some(8080));
    assert_eq!(config.get("HOST").unwrap().as_str(), Some("localhost"));
    assert_eq!(config.get("DEBUG").unwrap().as_bool(), Some(true));
}

#[test]
fn test_repeated_access_returns_equal_values() {
    let config = loaded();
    assert_eq!(config.get("PORT"), config.get("PORT"));
}

#[test]
fn test_unknown_key_fails_loudly() {
    let config = loaded();
    assert_eq!(
        config.get("PROT"),
        Err(ConfigError::UnknownKey {
            key: "PROT".to_string()
        })
    );
}

#[test]
fn test_membership_matches_typed_access() {
    let config = loaded();
    for key in ["PORT", "HOST", "DEBUG"] {
        assert!(config.contains(key));
        assert!(config.get(key).is_ok());
    }
    assert!(!config.contains("PROT"));
    assert!(config.get("PROT").is_err());
}

#[test]
fn test_both_exports_hold_value_identical_entries() {
    let config = loaded();
    let by_string = config.to_string_map();
    let by_symbol = config.to_symbol_map();

    assert_eq!(by_string.len(), by_symbol.len());
    for (key, value) in &by_string {
        assert_eq!(by_symbol.get(&Symbol::intern(key)), Some(value));
    }
}

#[test]
fn test_export_copies_are_independent() {
    let config = loaded();

    let mut first = config.to_string_map();
    first.clear();
    assert_eq!(config.to_string_map().len(), 3);

    let mut first_symbols = config.to_symbol_map();
    first_symbols.insert(Symbol::intern("PORT"), ConfigValue::Null);
    assert_eq!(
        config.to_symbol_map().get(&Symbol::intern("PORT")),
        Some(&ConfigValue::Integer(8080))
    );
}

#[test]
fn test_config_is_shareable_across_threads() {
    let config = loaded();
    let handle = std::thread::spawn(move || config.get("PORT").unwrap().as_i64());
    assert_eq!(handle.join().unwrap(), Some(8080));
}
