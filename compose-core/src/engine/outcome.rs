//! Result of feeding one event to the compose engine

use crate::types::SymbolicKey;

/// What the caller must do after `advance` or `cancel_last`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The engine declined the event; handle the key as ordinary input
    NotComposing,
    /// The key extended a partial sequence; nothing to deliver yet
    Continue,
    /// A sequence completed; insert the text.
    ///
    /// When the commit was forced by a key that could not extend the
    /// sequence, that key was not consumed and must be delivered again.
    Commit(String),
    /// The partial sequence cannot complete.
    ///
    /// Deliver `replay` in order as ordinary input, then deliver `then` to
    /// the engine again on its fresh idle state.
    Abort {
        replay: Vec<SymbolicKey>,
        then: SymbolicKey,
    },
    /// `cancel_last` removed the only buffered key
    Idle,
}

impl Outcome {
    pub fn is_commit(&self) -> bool {
        matches!(self, Outcome::Commit(_))
    }

    /// Committed text, if any
    pub fn text(&self) -> Option<&str> {
        match self {
            Outcome::Commit(text) => Some(text),
            _ => None,
        }
    }
}
