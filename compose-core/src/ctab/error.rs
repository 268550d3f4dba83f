use thiserror::Error;

use crate::table::BuildError;

#[derive(Error, Debug)]
pub enum CtabError {
    #[error("Invalid magic code: expected 'CSQT', got {0:?}")]
    InvalidMagicCode([u8; 4]),

    #[error("Unsupported version: {major}.{minor}")]
    UnsupportedVersion { major: u8, minor: u8 },

    #[error("File too small: {0} bytes")]
    FileTooSmall(usize),

    #[error("Invalid UTF-8 string at offset {0}")]
    InvalidUtf8(usize),

    #[error("Invalid key name at index {0}: {1}")]
    InvalidKeyName(usize, String),

    #[error("Entry {entry} refers to key {key} (key table has {count})")]
    InvalidKeyIndex { entry: usize, key: u16, count: usize },

    #[error("Trailing data: {0} bytes after the last entry")]
    TrailingData(usize),

    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("Table construction failed: {0}")]
    Build(#[from] BuildError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CtabError>;
