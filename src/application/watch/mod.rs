//! Watch Use Case
//!
//! Continuous recompilation while schema files are edited:
//! - File system monitoring (via `notify` crate)
//! - Debouncing (100ms default)
//! - Content hashing so saves without changes compile nothing
//! - One `on_sources_changed` batch per debounce window
//!
//! ## Usage
//!
//! ```ignore
//! let use_case = WatchUseCase::new(&orchestrator, WatchOptions::new());
//! use_case.start(running, |event| { ... });
//! ```

mod cache;
mod event;
mod use_case;

#[cfg(test)]
mod tests;

pub use cache::{compute_content_hash, ContentHashes};
pub use event::{WatchEvent, WatchOptions, WatcherState, DEBOUNCE_MS};
pub use use_case::WatchUseCase;
