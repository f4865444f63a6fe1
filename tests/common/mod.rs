//! Shared helpers for protosync integration tests.
//!
//! - `TestProject`: a temp project directory with file helpers
//! - `FAKE_PROTOC`: a shell stand-in for `protoc` (unix only)
//! - `run_cli`: runs the binary with preferences isolated from the host

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Result of running the protosync binary
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Minimal `protoc` replacement.
///
/// Writes the files the real compiler would produce for the requested
/// backend and appends its arguments to `calls.log` next to itself. Python
/// and C++ output lands below the source's directory relative to the first
/// `--proto_path` containing it. Any source containing `BROKEN` gets a
/// diagnostic on stderr instead.
pub const FAKE_PROTOC: &str = r#"#!/bin/sh
out_flag=""
out_dir=""
src=""
for arg in "$@"; do
  case "$arg" in
    --proto_path=*) ;;
    --*_out=*) out_flag="${arg%%=*}"; out_dir="${arg#*=}" ;;
    *) src="$arg" ;;
  esac
done
echo "$@" >> "$(dirname "$0")/calls.log"
if grep -q BROKEN "$src"; then
  echo "$(basename "$src"):1:1: Expected top-level statement." >&2
  exit 1
fi
base=$(basename "$src" .proto)
rel=$(basename "$src")
for arg in "$@"; do
  case "$arg" in
    --proto_path=*)
      dir="${arg#*=}"
      case "$src" in
        "$dir"/*) rel="${src#"$dir"/}"; break ;;
      esac ;;
  esac
done
nested="$out_dir/$(dirname "$rel")"
case "$out_flag" in
  --python_out) mkdir -p "$nested"; printf 'import common_pb2\nfrom google.protobuf import descriptor as _descriptor\n' > "$nested/${base}_pb2.py" ;;
  --go_out) echo "package main" > "$out_dir/$base.pb.go" ;;
  --cpp_out) mkdir -p "$nested"; : > "$nested/$base.pb.h"; : > "$nested/$base.pb.cc" ;;
esac
"#;

pub const SCHEMA: &str = "syntax = \"proto3\";\n\nmessage Ping {\n  string id = 1;\n}\n";

pub struct TestProject {
    pub dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp project");
        Self { dir }
    }

    /// Canonical project root
    pub fn root(&self) -> PathBuf {
        fs::canonicalize(self.dir.path()).expect("canonical project root")
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, content).expect("write file");
        path
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).expect("read file")
    }

    /// Install the fake compiler at `bin/protoc` and return its path
    #[cfg(unix)]
    pub fn install_fake_protoc(&self) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.write("bin/protoc", FAKE_PROTOC);
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod protoc");
        path
    }

    /// Lines the fake compiler logged, one per invocation
    pub fn protoc_calls(&self) -> Vec<String> {
        fs::read_to_string(self.path("bin/calls.log"))
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Run the CLI with `--project <root>` prepended
    pub fn run(&self, args: &[&str]) -> TestResult {
        let root = self.root();
        let mut full = vec!["--project", root.to_str().expect("utf-8 temp path")];
        full.extend_from_slice(args);
        run_cli(&root, &full)
    }
}

pub fn run_cli(cwd: &Path, args: &[&str]) -> TestResult {
    let output = Command::new(env!("CARGO_BIN_EXE_protosync"))
        .args(args)
        .current_dir(cwd)
        .env("PROTOSYNC_PREFERENCES", cwd.join("no-such-preferences.toml"))
        .env_remove("PROTOSYNC_ENABLED")
        .env_remove("PROTOSYNC_LOG_ERRORS")
        .env_remove("PROTOSYNC_LOG_DEBUG")
        .env_remove("PROTOSYNC_PROTOC")
        .env_remove("RUST_LOG")
        .output()
        .expect("run protosync binary");

    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}
