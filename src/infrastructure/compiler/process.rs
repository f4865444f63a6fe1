//! Process-backed compiler runner

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::domain::ports::{CompilerOutput, CompilerRunner};

/// Spawns the compiler directly (no shell) and waits for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessCompiler;

impl ProcessCompiler {
    pub fn new() -> Self {
        Self
    }
}

impl CompilerRunner for ProcessCompiler {
    fn run(&self, binary: &Path, args: &[OsString]) -> std::io::Result<CompilerOutput> {
        let output = Command::new(binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        Ok(CompilerOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        })
    }
}
