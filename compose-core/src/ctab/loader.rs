use std::collections::HashSet;
use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};
use log::{debug, warn};

use super::error::{CtabError, Result};
use crate::types::{
    CtabFile, CtabHeader, InfoEntry, RawEntry, CTAB_HEADER_SIZE, CTAB_MAGIC, CTAB_MAJOR_VERSION,
};

/// Bounds applied while reading a compiled table from untrusted bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadLimits {
    pub max_entries: usize,
    pub max_sequence_len: usize,
}

impl Default for LoadLimits {
    fn default() -> Self {
        Self {
            max_entries: 1_000_000,
            max_sequence_len: u8::MAX as usize,
        }
    }
}

// Counts come from the file; never trust them for up-front allocation
const MAX_PREALLOC: usize = 4096;

pub struct CtabLoader;

impl CtabLoader {
    /// Parse a compiled table with default limits
    pub fn load(data: &[u8]) -> Result<CtabFile> {
        Self::load_with_limits(data, &LoadLimits::default())
    }

    pub fn load_with_limits(data: &[u8], limits: &LoadLimits) -> Result<CtabFile> {
        let mut cursor = Cursor::new(data);

        let header = Self::read_header(&mut cursor)?;

        if header.major_version != CTAB_MAJOR_VERSION {
            return Err(CtabError::UnsupportedVersion {
                major: header.major_version,
                minor: header.minor_version,
            });
        }
        if header.entry_count as usize > limits.max_entries {
            return Err(CtabError::LimitExceeded(format!(
                "{} entries (max {})",
                header.entry_count, limits.max_entries
            )));
        }

        let key_names = Self::read_key_names(&mut cursor, header.key_count as usize)?;
        let info = Self::read_info(&mut cursor, header.info_count as usize)?;
        let entries = Self::read_entries(&mut cursor, header.entry_count as usize, key_names.len(), limits)?;

        let remaining = data.len() - cursor.position() as usize;
        if remaining > 0 {
            return Err(CtabError::TrailingData(remaining));
        }

        debug!(
            "Loaded compiled table v{}.{}: {} keys, {} info, {} entries",
            header.major_version,
            header.minor_version,
            key_names.len(),
            info.len(),
            entries.len()
        );

        Ok(CtabFile {
            header,
            key_names,
            info,
            entries,
        })
    }

    fn read_header(cursor: &mut Cursor<&[u8]>) -> Result<CtabHeader> {
        if cursor.get_ref().len() < CTAB_HEADER_SIZE {
            return Err(CtabError::FileTooSmall(cursor.get_ref().len()));
        }

        let mut magic_code = [0u8; 4];
        cursor.read_exact(&mut magic_code)?;

        if &magic_code != CTAB_MAGIC {
            return Err(CtabError::InvalidMagicCode(magic_code));
        }

        let major_version = cursor.read_u8()?;
        let minor_version = cursor.read_u8()?;
        let key_count = cursor.read_u16::<LittleEndian>()?;
        let info_count = cursor.read_u16::<LittleEndian>()?;
        let entry_count = cursor.read_u32::<LittleEndian>()?;
        let flags = cursor.read_u8()?;

        // Padding byte
        cursor.read_u8()?;

        if flags != 0 {
            warn!("Ignoring reserved header flags {:#04X}", flags);
        }

        Ok(CtabHeader {
            magic_code,
            major_version,
            minor_version,
            key_count,
            info_count,
            entry_count,
            flags,
        })
    }

    fn read_key_names(cursor: &mut Cursor<&[u8]>, count: usize) -> Result<Vec<String>> {
        let mut names = Vec::with_capacity(count.min(MAX_PREALLOC));
        let mut seen = HashSet::new();

        for i in 0..count {
            let name = Self::read_utf8(cursor)?;
            if name.is_empty() {
                return Err(CtabError::InvalidKeyName(i, "empty name".to_string()));
            }
            if !seen.insert(name.clone()) {
                return Err(CtabError::InvalidKeyName(i, format!("duplicate name {:?}", name)));
            }
            names.push(name);
        }

        Ok(names)
    }

    fn read_info(cursor: &mut Cursor<&[u8]>, count: usize) -> Result<Vec<InfoEntry>> {
        let mut info = Vec::with_capacity(count.min(MAX_PREALLOC));

        for _ in 0..count {
            let mut id = [0u8; 4];
            cursor.read_exact(&mut id)?;

            let length = cursor.read_u16::<LittleEndian>()? as usize;
            let mut data = vec![0u8; length];
            cursor.read_exact(&mut data)?;

            info.push(InfoEntry { id, data });
        }

        Ok(info)
    }

    fn read_entries(
        cursor: &mut Cursor<&[u8]>,
        count: usize,
        key_count: usize,
        limits: &LoadLimits,
    ) -> Result<Vec<RawEntry>> {
        let mut entries = Vec::with_capacity(count.min(MAX_PREALLOC));

        for entry in 0..count {
            let seq_len = cursor.read_u8()? as usize;
            if seq_len > limits.max_sequence_len {
                return Err(CtabError::LimitExceeded(format!(
                    "entry {} has {} keys (max {})",
                    entry, seq_len, limits.max_sequence_len
                )));
            }

            let mut keys = Vec::with_capacity(seq_len);
            for _ in 0..seq_len {
                let key = cursor.read_u16::<LittleEndian>()?;
                if key as usize >= key_count {
                    return Err(CtabError::InvalidKeyIndex {
                        entry,
                        key,
                        count: key_count,
                    });
                }
                keys.push(key);
            }

            let output = Self::read_utf8(cursor)?;
            entries.push(RawEntry { keys, output });
        }

        Ok(entries)
    }

    /// Length-prefixed UTF-8 string
    fn read_utf8(cursor: &mut Cursor<&[u8]>) -> Result<String> {
        let length = cursor.read_u16::<LittleEndian>()? as usize;
        let offset = cursor.position() as usize;
        let mut bytes = vec![0u8; length];
        cursor.read_exact(&mut bytes)?;
        String::from_utf8(bytes).map_err(|_| CtabError::InvalidUtf8(offset))
    }
}
