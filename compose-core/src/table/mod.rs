//! Sequence table: an immutable trie of compose sequences
//!
//! A table is built once, either from in-memory entries through
//! [`TableBuilder`] or from a compiled `.ctab` file, and is read-only from
//! then on. Any number of sessions may share it.

mod builder;
mod error;
mod node;

pub use builder::{build_table, TableBuilder};
pub use error::BuildError;
pub use node::{NodeId, SequenceNode};

use std::sync::atomic::{AtomicU64, Ordering};

use crate::types::{SymbolicKey, TableMetadata};

static NEXT_TABLE_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone)]
pub struct SequenceTable {
    /// Identity of the node arena; clones share it since their arenas match
    id: u64,
    /// Node arena; index 0 is the root
    nodes: Vec<SequenceNode>,
    /// Every distinct key used by some sequence, sorted by name
    keys: Vec<SymbolicKey>,
    sequence_count: usize,
    metadata: TableMetadata,
}

impl SequenceTable {
    pub(crate) fn from_parts(
        nodes: Vec<SequenceNode>,
        keys: Vec<SymbolicKey>,
        sequence_count: usize,
        metadata: TableMetadata,
    ) -> Self {
        debug_assert!(nodes[0].output.is_none(), "root node must not carry an output");
        Self {
            id: NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed),
            nodes,
            keys,
            sequence_count,
            metadata,
        }
    }

    /// A table with no sequences; every key is declined
    pub fn empty() -> Self {
        TableBuilder::new().build()
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn node(&self, id: NodeId) -> &SequenceNode {
        &self.nodes[id.index()]
    }

    /// Single-hop lookup
    pub fn child(&self, id: NodeId, key: &SymbolicKey) -> Option<NodeId> {
        self.nodes[id.index()].child(key)
    }

    /// Output of a complete sequence, if `sequence` is one
    pub fn lookup(&self, sequence: &[SymbolicKey]) -> Option<&str> {
        self.walk(sequence)
            .and_then(|id| self.nodes[id.index()].output())
    }

    /// Whether `sequence` can be extended to a longer sequence
    pub fn is_prefix(&self, sequence: &[SymbolicKey]) -> bool {
        self.walk(sequence)
            .map(|id| self.nodes[id.index()].has_children())
            .unwrap_or(false)
    }

    /// Number of complete sequences
    pub fn len(&self) -> usize {
        self.sequence_count
    }

    pub fn is_empty(&self) -> bool {
        self.sequence_count == 0
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Distinct keys used by the table, sorted by name
    pub fn keys(&self) -> &[SymbolicKey] {
        &self.keys
    }

    pub fn metadata(&self) -> &TableMetadata {
        &self.metadata
    }

    /// All sequences in depth-first order, children visited by key name.
    ///
    /// The order is stable across builds of the same entries, which keeps
    /// compiled files byte-for-byte reproducible.
    pub fn entries(&self) -> Entries<'_> {
        let mut stack = Vec::new();
        self.push_children(&mut stack, NodeId::ROOT, &[]);
        Entries { table: self, stack }
    }

    fn walk(&self, sequence: &[SymbolicKey]) -> Option<NodeId> {
        let mut current = NodeId::ROOT;
        for key in sequence {
            current = self.child(current, key)?;
        }
        Some(current)
    }

    fn push_children(&self, stack: &mut Vec<(NodeId, Vec<SymbolicKey>)>, id: NodeId, path: &[SymbolicKey]) {
        // Reversed so the smallest key is popped first
        for (key, child) in self.nodes[id.index()].sorted_children().into_iter().rev() {
            let mut child_path = path.to_vec();
            child_path.push(key.clone());
            stack.push((child, child_path));
        }
    }
}

/// Iterator over `(sequence, output)` pairs of a table
pub struct Entries<'t> {
    table: &'t SequenceTable,
    stack: Vec<(NodeId, Vec<SymbolicKey>)>,
}

impl<'t> Iterator for Entries<'t> {
    type Item = (Vec<SymbolicKey>, &'t str);

    fn next(&mut self) -> Option<Self::Item> {
        let table = self.table;
        while let Some((id, path)) = self.stack.pop() {
            table.push_children(&mut self.stack, id, &path);
            if let Some(output) = table.nodes[id.index()].output() {
                return Some((path, output));
            }
        }
        None
    }
}
