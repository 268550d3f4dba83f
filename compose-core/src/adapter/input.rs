//! Raw input events as delivered by the host

/// One key press as the host reports it, before any mapping to a
/// [`SymbolicKey`](crate::types::SymbolicKey)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    /// Host key code identifying the physical key; `None` for events that
    /// only carry text (on-screen keyboards, synthesized input)
    pub key_code: Option<u16>,
    pub modifiers: ModifierState,
    /// Glyph the active layout prints for this press
    pub character: Option<char>,
}

impl KeyInput {
    pub fn new(key_code: u16, modifiers: ModifierState, character: Option<char>) -> Self {
        Self {
            key_code: Some(key_code),
            modifiers,
            character,
        }
    }

    /// Text-only event with no physical key behind it
    pub fn from_char(ch: char) -> Self {
        Self {
            key_code: None,
            modifiers: ModifierState::default(),
            character: Some(ch),
        }
    }

    /// Physical key that produces no text (Enter, arrows, a bare Compose key)
    pub fn from_code(key_code: u16, modifiers: ModifierState) -> Self {
        Self {
            key_code: Some(key_code),
            modifiers,
            character: None,
        }
    }
}

/// Modifiers held during a press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModifierState {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub caps_lock: bool,
}

impl ModifierState {
    pub fn new(shift: bool, ctrl: bool, alt: bool, caps_lock: bool) -> Self {
        Self {
            shift,
            ctrl,
            alt,
            caps_lock,
        }
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::default()
        }
    }

    /// Same state with caps lock cleared; lock state never changes a key's identity
    pub fn without_locks(self) -> Self {
        Self {
            caps_lock: false,
            ..self
        }
    }
}
