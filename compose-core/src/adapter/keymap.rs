//! Raw event to symbolic key mapping

use std::collections::HashMap;

use super::{KeyInput, ModifierState};
use crate::types::{KeyInterner, SymbolicKey};

/// Turns raw host events into symbolic keys.
///
/// The same physical intent must always yield the same key regardless of the
/// active layout or the glyph it shows.
pub trait KeyMapper {
    fn map_key(&self, input: &KeyInput) -> Option<SymbolicKey>;
}

impl<F> KeyMapper for F
where
    F: Fn(&KeyInput) -> Option<SymbolicKey>,
{
    fn map_key(&self, input: &KeyInput) -> Option<SymbolicKey> {
        self(input)
    }
}

/// Binding table from key codes (and, as a fallback, characters) to keys.
///
/// Code bindings win over character bindings, so a dead key bound by
/// position keeps its identity on every layout. Caps lock is ignored when
/// matching.
#[derive(Debug, Default)]
pub struct KeyMap {
    by_code: HashMap<(u16, ModifierState), SymbolicKey>,
    by_char: HashMap<char, SymbolicKey>,
    interner: KeyInterner,
}

impl KeyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind_code(&mut self, key_code: u16, modifiers: ModifierState, name: &str) -> &mut Self {
        let key = self.interner.intern(name);
        self.by_code.insert((key_code, modifiers.without_locks()), key);
        self
    }

    pub fn bind_char(&mut self, ch: char, name: &str) -> &mut Self {
        let key = self.interner.intern(name);
        self.by_char.insert(ch, key);
        self
    }

    pub fn len(&self) -> usize {
        self.by_code.len() + self.by_char.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyMapper for KeyMap {
    fn map_key(&self, input: &KeyInput) -> Option<SymbolicKey> {
        let modifiers = input.modifiers.without_locks();
        input
            .key_code
            .and_then(|code| self.by_code.get(&(code, modifiers)))
            .or_else(|| input.character.and_then(|ch| self.by_char.get(&ch)))
            .cloned()
    }
}
