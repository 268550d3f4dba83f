pub mod adapter;
pub mod ctab;
pub mod engine;
pub mod error;
pub mod ffi;
pub mod table;
pub mod types;

pub use types::*;

// Re-export commonly used types
pub use adapter::{ComposeAdapter, KeyInput, KeyMap, KeyMapper, ModifierState, SinkEvent, TextSink};
pub use ctab::{CtabError, CtabLoader, CtabWriter, LoadLimits};
pub use engine::{new_session, ComposeSession, ComposeState, Outcome};
pub use error::{Error, Result};
pub use table::{build_table, BuildError, NodeId, SequenceNode, SequenceTable, TableBuilder};
