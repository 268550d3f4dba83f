//! Compose state machine

use log::{debug, trace};

use super::Outcome;
use crate::table::{NodeId, SequenceTable};
use crate::types::SymbolicKey;

/// Mutable per-stream composition state.
///
/// The state is `Idle` when no key is buffered, otherwise `Composing`. Each
/// consumed key is recorded together with the node it led to, so that
/// `cancel_last` pops one step without walking the trie again.
///
/// The table is passed on every call rather than stored; use
/// [`ComposeSession`](super::ComposeSession) for a bound pair. A partial
/// sequence belongs to the table it was typed against: passing a different
/// table drops it, and queries treat the state as idle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeState {
    /// Node reached after each typed key; same length as `typed`
    path: Vec<NodeId>,
    typed: Vec<SymbolicKey>,
    /// Table the nodes in `path` belong to
    table_id: Option<u64>,
}

impl ComposeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_composing(&self) -> bool {
        !self.typed.is_empty()
    }

    /// Keys consumed since the last reset
    pub fn typed(&self) -> &[SymbolicKey] {
        &self.typed
    }

    /// Current trie position, `None` while idle
    pub fn current_node(&self) -> Option<NodeId> {
        self.path.last().copied()
    }

    /// Whether `key` would extend the current position (or start a sequence)
    pub fn accepts(&self, table: &SequenceTable, key: &SymbolicKey) -> bool {
        table.child(self.position(table), key).is_some()
    }

    /// Output the partial sequence would commit if it ended here
    pub fn pending_output<'t>(&self, table: &'t SequenceTable) -> Option<&'t str> {
        self.node_in(table).and_then(|id| table.node(id).output())
    }

    /// Feeds one key.
    ///
    /// The longest sequence wins: a node that is complete but still has
    /// children keeps composing, and only commits once a later key fails to
    /// extend it.
    pub fn advance(&mut self, table: &SequenceTable, key: SymbolicKey) -> Outcome {
        if self.table_id != Some(table.id()) {
            if self.is_composing() {
                debug!("Table changed; dropping {} typed keys", self.typed.len());
                self.clear();
            }
            self.table_id = Some(table.id());
        }
        let position = self.position(table);

        match table.child(position, &key) {
            Some(child) => {
                let node = table.node(child);
                if node.is_leaf() {
                    // Nothing longer is reachable, resolve now
                    let text = node.output().unwrap_or_default().to_string();
                    trace!("Commit {:?} on {:?} (sequence complete)", text, key);
                    self.clear();
                    return Outcome::Commit(text);
                }
                trace!("Continue on {:?} (depth {})", key, self.typed.len() + 1);
                self.path.push(child);
                self.typed.push(key);
                Outcome::Continue
            }
            None if !self.is_composing() => Outcome::NotComposing,
            None => match table.node(position).output() {
                Some(output) => {
                    let text = output.to_string();
                    trace!("Commit {:?}; {:?} not consumed", text, key);
                    self.clear();
                    Outcome::Commit(text)
                }
                None => {
                    let replay = std::mem::take(&mut self.typed);
                    self.path.clear();
                    trace!("Abort after {} keys on {:?}", replay.len(), key);
                    Outcome::Abort { replay, then: key }
                }
            },
        }
    }

    /// Removes the last consumed key
    pub fn cancel_last(&mut self) -> Outcome {
        if self.typed.pop().is_none() {
            return Outcome::NotComposing;
        }
        self.path.pop();

        if self.typed.is_empty() {
            Outcome::Idle
        } else {
            Outcome::Continue
        }
    }

    /// Drops any partial sequence without output or replay
    pub fn reset(&mut self) {
        if self.is_composing() {
            trace!("Reset discards {} keys", self.typed.len());
        }
        self.clear();
    }

    fn position(&self, table: &SequenceTable) -> NodeId {
        self.node_in(table).unwrap_or_else(|| table.root())
    }

    /// Current node, if it belongs to `table`
    fn node_in(&self, table: &SequenceTable) -> Option<NodeId> {
        if self.table_id == Some(table.id()) {
            self.current_node()
        } else {
            None
        }
    }

    fn clear(&mut self) {
        self.path.clear();
        self.typed.clear();
    }
}
