//! Construction of sequence tables

use std::collections::HashMap;

use log::debug;

use super::error::{BuildError, Result};
use super::node::{NodeId, SequenceNode};
use super::SequenceTable;
use crate::types::{KeyInterner, SymbolicKey, TableMetadata};

/// Accumulates `(sequence, output)` entries into a trie.
///
/// Every entry is validated as it is inserted, so a conflict is reported
/// against the entry that introduced it. A failed `add` leaves the builder
/// exactly as it was before the call.
#[derive(Debug)]
pub struct TableBuilder {
    nodes: Vec<SequenceNode>,
    interner: KeyInterner,
    /// Entry index that attached the output of each complete node
    origins: HashMap<NodeId, usize>,
    entries_seen: usize,
    sequence_count: usize,
    metadata: TableMetadata,
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TableBuilder {
    pub fn new() -> Self {
        Self {
            nodes: vec![SequenceNode::new()],
            interner: KeyInterner::new(),
            origins: HashMap::new(),
            entries_seen: 0,
            sequence_count: 0,
            metadata: TableMetadata::new(),
        }
    }

    pub fn with_metadata(mut self, metadata: TableMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn metadata_mut(&mut self) -> &mut TableMetadata {
        &mut self.metadata
    }

    /// Inserts one sequence.
    ///
    /// An empty sequence fails with `MalformedSequence`. Re-adding a sequence
    /// with the same output is accepted; with a different output it fails
    /// with `ConflictingSequence` naming both outputs.
    pub fn add(&mut self, sequence: &[SymbolicKey], output: impl Into<String>) -> Result<()> {
        let index = self.entries_seen;
        self.entries_seen += 1;

        if sequence.is_empty() {
            return Err(BuildError::MalformedSequence { index });
        }
        let output = output.into();

        // Conflicts are detected before any node is created: a conflicting
        // path necessarily exists already.
        if let Some(existing_node) = self.find(sequence) {
            if let Some(existing) = &self.nodes[existing_node.index()].output {
                if *existing == output {
                    debug!("Duplicate compose sequence at entry {} ignored", index);
                    return Ok(());
                }
                return Err(BuildError::ConflictingSequence {
                    sequence: sequence.to_vec(),
                    existing: existing.clone(),
                    existing_index: self.origins.get(&existing_node).copied().unwrap_or(0),
                    incoming: output,
                    incoming_index: index,
                });
            }
        }

        let mut current = NodeId::ROOT;
        for key in sequence {
            current = match self.nodes[current.index()].child(key) {
                Some(child) => child,
                None => {
                    let child = NodeId(self.nodes.len() as u32);
                    self.nodes.push(SequenceNode::new());
                    let key = self.interner.intern_key(key);
                    self.nodes[current.index()].children.insert(key, child);
                    child
                }
            };
        }

        self.nodes[current.index()].output = Some(output);
        self.origins.insert(current, index);
        self.sequence_count += 1;
        Ok(())
    }

    /// Inserts a sequence given as key names
    pub fn add_names(&mut self, names: &[&str], output: impl Into<String>) -> Result<()> {
        let sequence: Vec<SymbolicKey> = names.iter().map(|n| self.interner.intern(n)).collect();
        self.add(&sequence, output)
    }

    /// Number of distinct complete sequences added so far
    pub fn len(&self) -> usize {
        self.sequence_count
    }

    pub fn is_empty(&self) -> bool {
        self.sequence_count == 0
    }

    /// Freezes the trie into an immutable table
    pub fn build(self) -> SequenceTable {
        let keys = self.interner.sorted_keys();
        debug!(
            "Built compose table: {} sequences, {} nodes, {} keys",
            self.sequence_count,
            self.nodes.len(),
            keys.len()
        );
        SequenceTable::from_parts(self.nodes, keys, self.sequence_count, self.metadata)
    }

    fn find(&self, sequence: &[SymbolicKey]) -> Option<NodeId> {
        let mut current = NodeId::ROOT;
        for key in sequence {
            current = self.nodes[current.index()].child(key)?;
        }
        Some(current)
    }
}

/// Builds a table from `(sequence, output)` entries in one call
pub fn build_table<I, S>(entries: I) -> Result<SequenceTable>
where
    I: IntoIterator<Item = (Vec<SymbolicKey>, S)>,
    S: Into<String>,
{
    let mut builder = TableBuilder::new();
    for (sequence, output) in entries {
        builder.add(&sequence, output)?;
    }
    Ok(builder.build())
}
