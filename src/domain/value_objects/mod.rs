//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod ignore_patterns;
mod language;
pub mod path;

pub use ignore_patterns::{IgnorePatterns, IGNORE_FILE_NAME};
pub use language::Language;
