//! File system helpers: atomic writes and output directory locks

mod local;
mod locks;

pub use local::atomic_write;
pub use locks::{acquire, OutputDirLocks};
