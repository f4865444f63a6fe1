//! Domain Entities
//!
//! - `IncludeSet` - include directories for one discovery pass
//! - `CompilationTarget` / `CompilerArgs` - one enabled language per compile call
//! - `CompilationResult` / `BatchReport` - what a compile or batch produced

mod compilation;
mod include_set;

pub use compilation::{
    BatchReport, CompilationResult, CompilationTarget, CompilerArgs, PostProcessor, SkipReason,
    TargetOutcome, TargetStatus,
};
pub use include_set::IncludeSet;
