//! Event adapter between a host input stream and a compose session
//!
//! The adapter maps raw events to symbolic keys, feeds them to a session and
//! turns each [`Outcome`] into calls on a [`TextSink`]: committed text goes
//! in as text, abandoned sequences are replayed as the raw events the user
//! typed.

mod input;
mod keymap;

pub use input::{KeyInput, ModifierState};
pub use keymap::{KeyMap, KeyMapper};

use log::trace;

use crate::engine::{ComposeSession, Outcome};
use crate::table::SequenceTable;
use crate::types::SymbolicKey;

/// Receives what the engine decided to deliver to the editor
pub trait TextSink {
    fn commit_text(&mut self, text: &str);
    /// Deliver a raw event as ordinary, uncomposed input
    fn replay_key(&mut self, input: &KeyInput);
}

/// A recorded sink call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Text(String),
    Key(KeyInput),
}

impl TextSink for Vec<SinkEvent> {
    fn commit_text(&mut self, text: &str) {
        self.push(SinkEvent::Text(text.to_string()));
    }

    fn replay_key(&mut self, input: &KeyInput) {
        self.push(SinkEvent::Key(input.clone()));
    }
}

/// Drives one compose session from raw host events.
///
/// The raw event behind every buffered key is kept so that an abort can
/// replay exactly what the user pressed.
pub struct ComposeAdapter<'t, M, S> {
    session: ComposeSession<'t>,
    mapper: M,
    sink: S,
    pending: Vec<KeyInput>,
}

impl<'t, M: KeyMapper, S: TextSink> ComposeAdapter<'t, M, S> {
    pub fn new(table: &'t SequenceTable, mapper: M, sink: S) -> Self {
        Self {
            session: ComposeSession::new(table),
            mapper,
            sink,
            pending: Vec::new(),
        }
    }

    /// Handles one raw event.
    ///
    /// Returns `true` when the event was absorbed by composition (buffered,
    /// or part of a committed sequence) and `false` when it reached the sink
    /// as ordinary input.
    pub fn process_key(&mut self, input: KeyInput) -> bool {
        match self.mapper.map_key(&input) {
            Some(key) => self.deliver(input, key),
            None => {
                // A key the table cannot know ends any partial sequence
                self.resolve_pending();
                self.sink.replay_key(&input);
                false
            }
        }
    }

    /// Backspace; returns `false` when there is nothing composed and the
    /// host should perform an ordinary backspace
    pub fn backspace(&mut self) -> bool {
        match self.session.cancel_last() {
            Outcome::NotComposing => false,
            _ => {
                self.pending.pop();
                true
            }
        }
    }

    /// Focus change: drop the partial sequence without output
    pub fn reset(&mut self) {
        self.session.reset();
        self.pending.clear();
    }

    pub fn is_composing(&self) -> bool {
        self.session.is_composing()
    }

    /// Characters of the buffered events, for preedit display
    pub fn composing_text(&self) -> String {
        self.pending.iter().filter_map(|i| i.character).collect()
    }

    pub fn session(&self) -> &ComposeSession<'t> {
        &self.session
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn deliver(&mut self, input: KeyInput, key: SymbolicKey) -> bool {
        let consumed = self.session.accepts(&key);

        match self.session.advance(key) {
            Outcome::NotComposing => {
                self.sink.replay_key(&input);
                false
            }
            Outcome::Continue => {
                self.pending.push(input);
                true
            }
            Outcome::Commit(text) => {
                self.pending.clear();
                self.sink.commit_text(&text);
                if consumed {
                    true
                } else {
                    // The disambiguating key starts over on a fresh idle state
                    self.redeliver(input)
                }
            }
            Outcome::Abort { replay, then } => {
                trace!("Replaying {} keys before {:?}", replay.len(), then);
                for event in self.pending.drain(..) {
                    self.sink.replay_key(&event);
                }
                self.deliver(input, then)
            }
            // Only cancel_last reports Idle
            Outcome::Idle => true,
        }
    }

    fn redeliver(&mut self, input: KeyInput) -> bool {
        match self.mapper.map_key(&input) {
            Some(key) => self.deliver(input, key),
            None => {
                self.sink.replay_key(&input);
                false
            }
        }
    }

    fn resolve_pending(&mut self) {
        if !self.session.is_composing() {
            return;
        }
        match self.session.pending_output() {
            Some(text) => {
                self.sink.commit_text(text);
                self.pending.clear();
            }
            None => {
                for event in self.pending.drain(..) {
                    self.sink.replay_key(&event);
                }
            }
        }
        self.session.reset();
    }
}
