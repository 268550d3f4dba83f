//! Symbolic key identifiers

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Layout-independent identity of a key, such as `DeadGrave` or `LetterA`.
///
/// Keys compare and hash by name. The glyph a layout happens to draw on the
/// key plays no part, so the same dead key composes identically under every
/// visual layout. Cloning is a reference-count bump.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolicKey(Arc<str>);

impl SymbolicKey {
    /// Creates a key from its semantic name
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    /// Gets the key name
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SymbolicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.0)
    }
}

impl fmt::Display for SymbolicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SymbolicKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for SymbolicKey {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl AsRef<str> for SymbolicKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for SymbolicKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Deduplicates key names so every occurrence of a name shares one allocation.
///
/// Tables with thousands of entries mention the same few dozen keys over and
/// over; the builder and the loader both route names through an interner.
#[derive(Debug, Default)]
pub struct KeyInterner {
    keys: HashSet<SymbolicKey>,
}

impl KeyInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the shared key for `name`, creating it on first use
    pub fn intern(&mut self, name: &str) -> SymbolicKey {
        if let Some(existing) = self.keys.get(name) {
            return existing.clone();
        }
        let key = SymbolicKey::new(name);
        self.keys.insert(key.clone());
        key
    }

    /// Returns the shared copy of `key`, adopting it if unseen
    pub fn intern_key(&mut self, key: &SymbolicKey) -> SymbolicKey {
        if let Some(existing) = self.keys.get(key.name()) {
            return existing.clone();
        }
        self.keys.insert(key.clone());
        key.clone()
    }

    /// Looks a name up without creating it
    pub fn get(&self, name: &str) -> Option<&SymbolicKey> {
        self.keys.get(name)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// All interned keys sorted by name
    pub fn sorted_keys(&self) -> Vec<SymbolicKey> {
        let mut keys: Vec<SymbolicKey> = self.keys.iter().cloned().collect();
        keys.sort();
        keys
    }
}
