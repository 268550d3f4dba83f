//! Descriptive metadata carried alongside a sequence table

use super::ctab::{InfoEntry, INFO_DESC, INFO_LANG, INFO_NAME};

/// Info entries attached to a table.
///
/// Known ids get typed accessors; anything else is kept verbatim so that a
/// load/write cycle does not drop it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableMetadata {
    entries: Vec<InfoEntry>,
}

impl TableMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<InfoEntry>) -> Self {
        Self { entries }
    }

    /// Display name of the table
    pub fn name(&self) -> Option<&str> {
        self.text(INFO_NAME)
    }

    pub fn description(&self) -> Option<&str> {
        self.text(INFO_DESC)
    }

    /// Locale tag, e.g. `fr-FR`
    pub fn language(&self) -> Option<&str> {
        self.text(INFO_LANG)
    }

    pub fn set_name(&mut self, name: &str) {
        self.set(*INFO_NAME, name.as_bytes().to_vec());
    }

    pub fn set_description(&mut self, description: &str) {
        self.set(*INFO_DESC, description.as_bytes().to_vec());
    }

    pub fn set_language(&mut self, language: &str) {
        self.set(*INFO_LANG, language.as_bytes().to_vec());
    }

    /// Replaces or appends the entry with the given id
    pub fn set(&mut self, id: [u8; 4], data: Vec<u8>) {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => entry.data = data,
            None => self.entries.push(InfoEntry { id, data }),
        }
    }

    pub fn get(&self, id: &[u8; 4]) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|e| &e.id == id)
            .map(|e| e.data.as_slice())
    }

    pub fn entries(&self) -> &[InfoEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn text(&self, id: &[u8; 4]) -> Option<&str> {
        self.get(id).and_then(|data| std::str::from_utf8(data).ok())
    }
}
