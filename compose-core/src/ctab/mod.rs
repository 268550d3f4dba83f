//! Compiled sequence tables (`.ctab`)
//!
//! The compiled file is the only form in which a table crosses a
//! persistence boundary. Loading always runs the entries back through
//! [`TableBuilder`], so a file can never yield a table that could not have
//! been built in memory: conflicting duplicates and empty sequences are
//! rejected the same way.

mod error;
mod loader;
mod writer;

pub use error::{CtabError, Result};
pub use loader::{CtabLoader, LoadLimits};
pub use writer::CtabWriter;

use std::collections::HashMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::table::{SequenceTable, TableBuilder};
use crate::types::{CtabFile, CtabHeader, KeyInterner, RawEntry, SymbolicKey, TableMetadata};

impl CtabFile {
    /// Flatten a table into its on-disk structure
    pub fn from_table(table: &SequenceTable) -> Result<CtabFile> {
        let key_names: Vec<String> = table.keys().iter().map(|k| k.name().to_string()).collect();
        if key_names.len() > u16::MAX as usize {
            return Err(CtabError::LimitExceeded(format!("{} distinct keys", key_names.len())));
        }
        let index: HashMap<&SymbolicKey, u16> = table
            .keys()
            .iter()
            .enumerate()
            .map(|(i, k)| (k, i as u16))
            .collect();

        let mut entries = Vec::with_capacity(table.len());
        for (sequence, output) in table.entries() {
            let keys = sequence
                .iter()
                .map(|k| index.get(k).copied())
                .collect::<Option<Vec<u16>>>()
                .ok_or_else(|| CtabError::LimitExceeded("key missing from key table".to_string()))?;
            entries.push(RawEntry {
                keys,
                output: output.to_string(),
            });
        }

        Ok(CtabFile {
            header: CtabHeader::new(),
            key_names,
            info: table.metadata().entries().to_vec(),
            entries,
        })
    }

    /// Resolve key indices and build the table
    pub fn into_table(self) -> Result<SequenceTable> {
        let mut interner = KeyInterner::new();
        let keys: Vec<SymbolicKey> = self.key_names.iter().map(|n| interner.intern(n)).collect();

        let mut builder = TableBuilder::new().with_metadata(TableMetadata::from_entries(self.info));
        for (entry, raw) in self.entries.into_iter().enumerate() {
            let sequence = raw
                .keys
                .iter()
                .map(|&k| {
                    keys.get(k as usize).cloned().ok_or(CtabError::InvalidKeyIndex {
                        entry,
                        key: k,
                        count: keys.len(),
                    })
                })
                .collect::<Result<Vec<SymbolicKey>>>()?;
            builder.add(&sequence, raw.output)?;
        }

        Ok(builder.build())
    }
}

impl SequenceTable {
    /// Load and validate a compiled table from memory
    pub fn from_ctab(data: &[u8]) -> Result<SequenceTable> {
        CtabLoader::load(data)?.into_table()
    }

    /// Load and validate a compiled table from disk
    pub fn load_file(path: impl AsRef<Path>) -> Result<SequenceTable> {
        let data = std::fs::read(path)?;
        Self::from_ctab(&data)
    }

    /// Serialize to a compiled table in memory
    pub fn to_ctab(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        CtabWriter::new(&mut buffer).write_table(self)?;
        Ok(buffer)
    }

    pub fn save_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        CtabWriter::new(BufWriter::new(file)).write_table(self)
    }
}
