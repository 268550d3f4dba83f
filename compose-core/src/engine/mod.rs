//! Compose engine - runtime side of sequence composition
//!
//! A session consumes symbolic keys one at a time and reports whether the
//! caller should wait, insert composed text, or replay what was typed.

mod outcome;
mod session;
mod state;

pub use outcome::Outcome;
pub use session::{new_session, ComposeSession};
pub use state::ComposeState;
