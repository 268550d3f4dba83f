use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

use super::error::{CtabError, Result};
use crate::table::SequenceTable;
use crate::types::{CtabFile, CtabHeader, InfoEntry, RawEntry};

pub struct CtabWriter<W: Write> {
    writer: W,
}

impl<W: Write> CtabWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Serialize a built table
    pub fn write_table(self, table: &SequenceTable) -> Result<()> {
        let file = CtabFile::from_table(table)?;
        self.write_ctab_file(&file)
    }

    /// Serialize a file structure as-is.
    ///
    /// Counts in the header are taken from the actual sections; magic and
    /// version are written as given.
    pub fn write_ctab_file(mut self, file: &CtabFile) -> Result<()> {
        let key_count = checked_u16(file.key_names.len(), "key names")?;
        let info_count = checked_u16(file.info.len(), "info entries")?;
        let entry_count = u32::try_from(file.entries.len())
            .map_err(|_| CtabError::LimitExceeded(format!("{} entries", file.entries.len())))?;

        self.write_header(&CtabHeader {
            key_count,
            info_count,
            entry_count,
            ..file.header
        })?;

        for name in &file.key_names {
            self.write_utf8(name)?;
        }

        for info in &file.info {
            self.write_info(info)?;
        }

        for entry in &file.entries {
            self.write_entry(entry)?;
        }

        self.writer.flush()?;
        Ok(())
    }

    fn write_header(&mut self, header: &CtabHeader) -> Result<()> {
        // Magic code
        self.writer.write_all(&header.magic_code)?;

        // Version
        self.writer.write_u8(header.major_version)?;
        self.writer.write_u8(header.minor_version)?;

        // Counts
        self.writer.write_u16::<LittleEndian>(header.key_count)?;
        self.writer.write_u16::<LittleEndian>(header.info_count)?;
        self.writer.write_u32::<LittleEndian>(header.entry_count)?;

        self.writer.write_u8(header.flags)?;

        // Padding byte keeps the header at 16 bytes
        self.writer.write_u8(0)?;

        Ok(())
    }

    fn write_utf8(&mut self, s: &str) -> Result<()> {
        let length = checked_u16(s.len(), "string bytes")?;
        self.writer.write_u16::<LittleEndian>(length)?;
        self.writer.write_all(s.as_bytes())?;
        Ok(())
    }

    fn write_info(&mut self, info: &InfoEntry) -> Result<()> {
        self.writer.write_all(&info.id)?;
        let length = checked_u16(info.data.len(), "info bytes")?;
        self.writer.write_u16::<LittleEndian>(length)?;
        self.writer.write_all(&info.data)?;
        Ok(())
    }

    fn write_entry(&mut self, entry: &RawEntry) -> Result<()> {
        let seq_len = u8::try_from(entry.keys.len())
            .map_err(|_| CtabError::LimitExceeded(format!("sequence of {} keys", entry.keys.len())))?;
        self.writer.write_u8(seq_len)?;

        for key in &entry.keys {
            self.writer.write_u16::<LittleEndian>(*key)?;
        }

        self.write_utf8(&entry.output)
    }
}

fn checked_u16(value: usize, what: &str) -> Result<u16> {
    u16::try_from(value).map_err(|_| CtabError::LimitExceeded(format!("{} {}", value, what)))
}
