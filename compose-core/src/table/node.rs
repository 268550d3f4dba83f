//! Trie nodes

use std::collections::HashMap;

use crate::types::SymbolicKey;

/// Index of a node inside its table's node arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single trie node.
///
/// `output` is set iff the path from the root to this node is a complete
/// sequence. A node may have both an output and children when a shorter
/// sequence is a prefix of a longer one.
#[derive(Debug, Clone, Default)]
pub struct SequenceNode {
    pub(crate) children: HashMap<SymbolicKey, NodeId>,
    pub(crate) output: Option<String>,
}

impl SequenceNode {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub fn child(&self, key: &SymbolicKey) -> Option<NodeId> {
        self.children.get(key).copied()
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Complete and not extensible; reaching it resolves immediately
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Children sorted by key name
    pub fn sorted_children(&self) -> Vec<(&SymbolicKey, NodeId)> {
        let mut children: Vec<(&SymbolicKey, NodeId)> =
            self.children.iter().map(|(k, id)| (k, *id)).collect();
        children.sort_by(|a, b| a.0.cmp(b.0));
        children
    }
}
