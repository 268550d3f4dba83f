use thiserror::Error;

use crate::types::SymbolicKey;

/// Reasons a set of entries cannot become a table
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("Malformed sequence at entry {index}: a sequence needs at least one key")]
    MalformedSequence { index: usize },

    #[error("Conflicting outputs for sequence {}: {existing:?} (entry {existing_index}) vs {incoming:?} (entry {incoming_index})", format_sequence(.sequence))]
    ConflictingSequence {
        sequence: Vec<SymbolicKey>,
        existing: String,
        existing_index: usize,
        incoming: String,
        incoming_index: usize,
    },
}

fn format_sequence(sequence: &[SymbolicKey]) -> String {
    let names: Vec<&str> = sequence.iter().map(|k| k.name()).collect();
    format!("[{}]", names.join(" "))
}

pub type Result<T> = std::result::Result<T, BuildError>;
