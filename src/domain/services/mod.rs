//! Domain Services
//!
//! - `discovery` - finds schema files and their include directories
//! - `resolver` - picks the governing config and expands it into targets
//! - `postprocess` - text transforms for generated artifacts

pub mod discovery;
pub mod postprocess;
pub mod resolver;

pub use discovery::{build_include_set, discover_sources};
pub use postprocess::localize_python_imports;
pub use resolver::{enabled_targets, ConfigResolver};
