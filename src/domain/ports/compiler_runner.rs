//! Compiler runner port - spawning the external schema compiler.

use std::ffi::OsString;
use std::path::Path;

/// Captured output of one finished compiler process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilerOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, if the process exited normally
    pub exit_code: Option<i32>,
}

/// Runs the compiler binary to completion with both output streams captured.
///
/// Implementations:
/// - `ProcessCompiler` - spawns a real process
/// - test fakes recording invocations
pub trait CompilerRunner: Send + Sync {
    /// Run `binary` with `args`, blocking until it exits.
    ///
    /// `Err` means the process could not be started at all.
    fn run(&self, binary: &Path, args: &[OsString]) -> std::io::Result<CompilerOutput>;
}
