//! Compose session bound to a table

use super::{ComposeState, Outcome};
use crate::table::{NodeId, SequenceTable};
use crate::types::SymbolicKey;

/// Composition state for one input stream, bound to a shared table.
///
/// Sessions are cheap; create one per input view. The table is only read,
/// so any number of sessions may borrow it at once.
#[derive(Debug, Clone)]
pub struct ComposeSession<'t> {
    table: &'t SequenceTable,
    state: ComposeState,
}

impl<'t> ComposeSession<'t> {
    pub fn new(table: &'t SequenceTable) -> Self {
        Self {
            table,
            state: ComposeState::new(),
        }
    }

    pub fn table(&self) -> &'t SequenceTable {
        self.table
    }

    /// Feeds one key; see [`Outcome`] for what the caller must do next
    pub fn advance(&mut self, key: SymbolicKey) -> Outcome {
        self.state.advance(self.table, key)
    }

    /// Backspace during composition
    pub fn cancel_last(&mut self) -> Outcome {
        self.state.cancel_last()
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }

    pub fn is_composing(&self) -> bool {
        self.state.is_composing()
    }

    pub fn typed(&self) -> &[SymbolicKey] {
        self.state.typed()
    }

    pub fn current_node(&self) -> Option<NodeId> {
        self.state.current_node()
    }

    pub fn accepts(&self, key: &SymbolicKey) -> bool {
        self.state.accepts(self.table, key)
    }

    pub fn pending_output(&self) -> Option<&'t str> {
        self.state.pending_output(self.table)
    }

    pub fn state(&self) -> &ComposeState {
        &self.state
    }
}

/// Starts a fresh, idle session on `table`
pub fn new_session(table: &SequenceTable) -> ComposeSession<'_> {
    ComposeSession::new(table)
}
