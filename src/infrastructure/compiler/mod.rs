//! Compiler binary location and process spawning

mod locator;
mod process;

pub use locator::{binary_name, platform_dir, ProtocLocator, BUNDLED_DIR};
pub use process::ProcessCompiler;
