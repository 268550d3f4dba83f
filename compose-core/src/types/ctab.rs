
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CtabHeader {
    /// Always `CSQT`
    pub magic_code: [u8; 4],
    pub major_version: u8,
    pub minor_version: u8,
    pub key_count: u16,
    pub info_count: u16,
    pub entry_count: u32,
    /// Reserved, written as 0
    pub flags: u8,
}

impl CtabHeader {
    pub fn new() -> Self {
        CtabHeader {
            magic_code: *CTAB_MAGIC,
            major_version: CTAB_MAJOR_VERSION,
            minor_version: CTAB_MINOR_VERSION,
            key_count: 0,
            info_count: 0,
            entry_count: 0,
            flags: 0,
        }
    }
}

impl Default for CtabHeader {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoEntry {
    pub id: [u8; 4],
    pub data: Vec<u8>,
}

/// One sequence as stored on disk: indices into the key-name table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub keys: Vec<u16>,
    pub output: String,
}

/// A parsed but not yet validated compiled table
#[derive(Debug, Clone, Default)]
pub struct CtabFile {
    pub header: CtabHeader,
    pub key_names: Vec<String>,
    pub info: Vec<InfoEntry>,
    pub entries: Vec<RawEntry>,
}

pub const CTAB_MAGIC: &[u8; 4] = b"CSQT";
pub const CTAB_MAJOR_VERSION: u8 = 1;
pub const CTAB_MINOR_VERSION: u8 = 0;
pub const CTAB_HEADER_SIZE: usize = 16;

// Standard info IDs
pub const INFO_NAME: &[u8; 4] = b"name";
pub const INFO_DESC: &[u8; 4] = b"desc";
pub const INFO_LANG: &[u8; 4] = b"lang";
