//! Error types for the compose engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Table build error: {0}")]
    Build(#[from] crate::table::BuildError),

    #[error("Compiled table error: {0}")]
    Ctab(#[from] crate::ctab::CtabError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
