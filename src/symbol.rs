use std::collections::HashSet;
use std::fmt;
use std::sync::{Mutex, OnceLock};

/// An interned configuration key.
///
/// Two `Symbol`s created from equal strings compare equal and share the same
/// backing storage. Interned strings live for the rest of the process, which
/// is fine for configuration keys: the set is small and fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(&'static str);

fn pool() -> &'static Mutex<HashSet<&'static str>> {
    static POOL: OnceLock<Mutex<HashSet<&'static str>>> = OnceLock::new();
    POOL.get_or_init(|| Mutex::new(HashSet::new()))
}

impl Symbol {
    /// Intern `name`, returning the canonical symbol for it.
    pub fn intern(name: &str) -> Self {
        let mut pool = pool().lock().expect("symbol pool poisoned");
        if let Some(existing) = pool.get(name) {
            return Symbol(*existing);
        }
        let leaked: &'static str = Box::leak(name.to_string().into_boxed_str());
        pool.insert(leaked);
        Symbol(leaked)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol::intern(name)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Symbol {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_strings_intern_to_equal_symbols() {
        let a = Symbol::intern("PORT");
        let b = Symbol::intern("PORT");
        assert_eq!(a, b);
        assert!(std::ptr::eq(a.as_str(), b.as_str()));
    }

    #[test]
    fn test_distinct_strings_stay_distinct() {
        assert_ne!(Symbol::intern("HOST"), Symbol::intern("PORT"));
    }

    #[test]
    fn test_display_and_as_str() {
        let sym = Symbol::intern("DATABASE_URL");
        assert_eq!(sym.as_str(), "DATABASE_URL");
        assert_eq!(sym.to_string(), "DATABASE_URL");
    }
}
