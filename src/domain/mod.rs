//! Domain Layer
//!
//! The compilation model: what a schema source is, which config governs it,
//! which targets it expands into and what a compile produced.
//!
//! ## Structure
//!
//! - `entities/` - IncludeSet, CompilationTarget, CompilationResult
//! - `value_objects/` - Language, IgnorePatterns, path algebra
//! - `services/` - discovery, config resolution, post-processing
//! - `ports/` - ConfigStore, CompilerRunner, AssetSink
//!
//! Nothing here spawns processes or talks to the host; that goes through
//! the traits in `ports/`.

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
