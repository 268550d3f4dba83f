pub mod ctab;
pub mod key;
pub mod metadata;

pub use ctab::*;
pub use key::*;
pub use metadata::*;
