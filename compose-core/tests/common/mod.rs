#![allow(dead_code)]

pub mod engine_helpers;
pub use engine_helpers::*;

use compose_core::{CtabFile, InfoEntry, RawEntry, SequenceTable, SymbolicKey, TableBuilder};

/// Key list from names
pub fn keys(names: &[&str]) -> Vec<SymbolicKey> {
    names.iter().map(|n| SymbolicKey::new(n)).collect()
}

pub fn key(name: &str) -> SymbolicKey {
    SymbolicKey::new(name)
}

/// Builds a table from `(names, output)` pairs, panicking on invalid input
pub fn table_from(entries: &[(&[&str], &str)]) -> SequenceTable {
    let mut builder = TableBuilder::new();
    for (names, output) in entries {
        builder.add_names(names, *output).unwrap();
    }
    builder.build()
}

/// The accent table used across tests
pub fn grave_table() -> SequenceTable {
    table_from(&[
        (&["DeadGrave", "LetterA"], "à"),
        (&["DeadGrave", "LetterE"], "è"),
    ])
}

/// `[X,Y] -> p`, `[X,Y,Z] -> q`
pub fn prefix_table() -> SequenceTable {
    table_from(&[(&["X", "Y"], "p"), (&["X", "Y", "Z"], "q")])
}

/// Creates an empty compiled-table structure
pub fn create_basic_ctab() -> CtabFile {
    CtabFile::default()
}

/// Adds a key name and returns its index
pub fn add_key_name(file: &mut CtabFile, name: &str) -> u16 {
    file.key_names.push(name.to_string());
    (file.key_names.len() - 1) as u16
}

pub fn add_entry(file: &mut CtabFile, keys: &[u16], output: &str) {
    file.entries.push(RawEntry {
        keys: keys.to_vec(),
        output: output.to_string(),
    });
}

pub fn add_info_text(file: &mut CtabFile, id: &str, text: &str) {
    file.info.push(InfoEntry {
        id: id.as_bytes().try_into().unwrap_or([0; 4]),
        data: text.as_bytes().to_vec(),
    });
}

/// Serializes a file structure with the library writer
pub fn create_ctab_binary(file: &CtabFile) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let mut buffer = Vec::new();
    compose_core::CtabWriter::new(&mut buffer).write_ctab_file(file)?;
    Ok(buffer)
}
