//! Compilation entities
//!
//! `CompilationTarget` and `CompilerArgs` are built fresh for every compile
//! call; `CompilationResult` and `BatchReport` describe what happened.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::IncludeSet;
use crate::domain::value_objects::path::base_name;
use crate::domain::value_objects::Language;

/// Transform applied to generated output after a successful invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PostProcessor {
    /// Rewrite Python imports to package-relative form
    LocalizePythonImports,
}

/// One enabled language for one compile request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompilationTarget {
    pub language: Language,
    /// Absolute output directory
    pub output_dir: PathBuf,
    pub post_processor: Option<PostProcessor>,
}

impl CompilationTarget {
    pub fn new(language: Language, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            language,
            output_dir: output_dir.into(),
            post_processor: None,
        }
    }

    pub fn with_post_processor(mut self, post_processor: PostProcessor) -> Self {
        self.post_processor = Some(post_processor);
        self
    }

    /// Directory the compiler writes this target's files for `source` into
    pub fn generated_dir(&self, source: &Path, includes: &IncludeSet) -> PathBuf {
        if self.language.mirrors_virtual_path() {
            self.output_dir.join(includes.virtual_dir(source))
        } else {
            self.output_dir.clone()
        }
    }

    /// Paths this target is expected to generate for `source`
    pub fn expected_outputs(&self, source: &Path, includes: &IncludeSet) -> Vec<PathBuf> {
        let dir = self.generated_dir(source, includes);
        self.language
            .expected_files(&base_name(source))
            .into_iter()
            .map(|name| dir.join(name))
            .collect()
    }
}

/// Argument list for one compiler invocation:
/// `<output flag> <one --proto_path per include dir> <source>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerArgs {
    language: Language,
    output_dir: PathBuf,
    include_dirs: Vec<PathBuf>,
    source: PathBuf,
}

impl CompilerArgs {
    pub fn new(
        language: Language,
        output_dir: &Path,
        includes: &IncludeSet,
        source: &Path,
    ) -> Self {
        Self {
            language,
            output_dir: output_dir.to_path_buf(),
            include_dirs: includes.as_slice().to_vec(),
            source: source.to_path_buf(),
        }
    }

    /// Arguments as handed to the process, one element per argument.
    ///
    /// No shell is involved, so values are never quoted here.
    pub fn argv(&self) -> Vec<OsString> {
        let mut args = Vec::with_capacity(self.include_dirs.len() + 2);

        let mut out = OsString::from(format!("{}=", self.language.output_flag()));
        out.push(&self.output_dir);
        args.push(out);

        for dir in &self.include_dirs {
            let mut inc = OsString::from("--proto_path=");
            inc.push(dir);
            args.push(inc);
        }

        args.push(self.source.clone().into_os_string());
        args
    }

    /// Human-readable command line with every path quoted.
    pub fn render(&self) -> String {
        let mut parts = Vec::with_capacity(self.include_dirs.len() + 2);
        parts.push(
            self.language
                .flag_template()
                .replace("{0}", &self.output_dir.display().to_string()),
        );
        for dir in &self.include_dirs {
            parts.push(format!("--proto_path=\"{}\"", dir.display()));
        }
        parts.push(format!("\"{}\"", self.source.display()));
        parts.join(" ")
    }
}

/// Classification of one target invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TargetStatus {
    /// Compiler ran and wrote nothing to stderr
    Succeeded,
    /// Compiler wrote diagnostics to stderr (kept verbatim in `stderr`)
    Diagnostic,
    /// Compiler binary could not be started
    LaunchFailed { message: String },
}

/// Outcome of compiling one source for one target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetOutcome {
    pub language: Language,
    pub output_dir: PathBuf,
    /// Rendered command line
    pub arguments: String,
    #[serde(flatten)]
    pub status: TargetStatus,
    pub stdout: String,
    pub stderr: String,
    /// Generated files found on disk after the invocation
    pub produced: Vec<PathBuf>,
    pub post_process_error: Option<String>,
}

impl TargetOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, TargetStatus::Succeeded)
    }
}

/// Outcome of compiling one source for every enabled target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompilationResult {
    pub source: PathBuf,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
    pub targets: Vec<TargetOutcome>,
}

impl CompilationResult {
    /// Result for a source whose config has compilation switched off.
    pub fn disabled(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            success: false,
            stdout: String::new(),
            stderr: String::new(),
            targets: Vec::new(),
        }
    }

    /// Build from target outcomes; success requires at least one target and
    /// no failures.
    pub fn from_targets(source: impl Into<PathBuf>, targets: Vec<TargetOutcome>) -> Self {
        let success = !targets.is_empty() && targets.iter().all(TargetOutcome::is_success);
        let stdout = join_streams(targets.iter().map(|t| t.stdout.as_str()));
        let stderr = join_streams(targets.iter().map(|t| t.stderr.as_str()));
        Self {
            source: source.into(),
            success,
            stdout,
            stderr,
            targets,
        }
    }

    pub fn attempted(&self) -> usize {
        self.targets.len()
    }

    pub fn failed(&self) -> impl Iterator<Item = &TargetOutcome> {
        self.targets.iter().filter(|t| !t.is_success())
    }

    /// All produced files, deduplicated, in target order
    pub fn produced_files(&self) -> Vec<&Path> {
        let mut files: Vec<&Path> = Vec::new();
        for path in self.targets.iter().flat_map(|t| t.produced.iter()) {
            if !files.contains(&path.as_path()) {
                files.push(path);
            }
        }
        files
    }
}

fn join_streams<'a>(streams: impl Iterator<Item = &'a str>) -> String {
    streams
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Why a file in a batch was not compiled
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NotSchema,
    Ignored,
    NoConfig,
}

/// Aggregate of one change batch or full rebuild
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub results: Vec<CompilationResult>,
    pub skipped: Vec<(PathBuf, SkipReason)>,
    /// Sources rejected before compilation, with the error message
    pub failures: Vec<(PathBuf, String)>,
    /// True if any artifact was registered with the asset sink
    pub changed_any: bool,
}

impl BatchReport {
    pub fn compiled(&self) -> usize {
        self.results.iter().filter(|r| r.attempted() > 0).count()
    }

    pub fn failed_targets(&self) -> usize {
        self.results.iter().map(|r| r.failed().count()).sum()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && self.failed_targets() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(language: Language, status: TargetStatus, stderr: &str) -> TargetOutcome {
        TargetOutcome {
            language,
            output_dir: PathBuf::from("/out"),
            arguments: String::new(),
            status,
            stdout: String::new(),
            stderr: stderr.to_string(),
            produced: vec![PathBuf::from("/out/Msg.cs")],
            post_process_error: None,
        }
    }

    #[test]
    fn render_matches_documented_layout() {
        let mut includes = IncludeSet::new();
        includes.insert("/root/a");
        includes.insert("/root/b");
        let args = CompilerArgs::new(
            Language::CSharp,
            Path::new("/out/cs"),
            &includes,
            Path::new("/root/a/msg.proto"),
        );
        insta::assert_snapshot!(
            args.render(),
            @r#"--csharp_out="/out/cs" --proto_path="/root/a" --proto_path="/root/b" "/root/a/msg.proto""#
        );
    }

    #[test]
    fn argv_is_unquoted() {
        let mut includes = IncludeSet::new();
        includes.insert("/root/a");
        let args = CompilerArgs::new(
            Language::Python,
            Path::new("/out"),
            &includes,
            Path::new("/root/a/msg.proto"),
        );
        assert_eq!(
            args.argv(),
            vec![
                OsString::from("--python_out=/out"),
                OsString::from("--proto_path=/root/a"),
                OsString::from("/root/a/msg.proto"),
            ]
        );
    }

    #[test]
    fn expected_outputs_join_output_dir() {
        let target = CompilationTarget::new(Language::Cpp, "/gen");
        let source = Path::new("/root/a/msg.proto");
        assert_eq!(
            target.expected_outputs(source, &IncludeSet::from_sources(&[source])),
            vec![PathBuf::from("/gen/msg.pb.h"), PathBuf::from("/gen/msg.pb.cc")]
        );
    }

    #[test]
    fn nested_schema_output_follows_include_relative_dir() {
        let source = Path::new("/p/z/msg.proto");
        let includes = IncludeSet::from_sources(&[Path::new("/p/a.proto"), source]);

        let python = CompilationTarget::new(Language::Python, "/p/gen");
        assert_eq!(
            python.expected_outputs(source, &includes),
            vec![PathBuf::from("/p/gen/z/msg_pb2.py")]
        );
        let csharp = CompilationTarget::new(Language::CSharp, "/p/gen");
        assert_eq!(
            csharp.expected_outputs(source, &includes),
            vec![PathBuf::from("/p/gen/Msg.cs")]
        );
    }

    #[test]
    fn result_success_requires_all_targets() {
        let ok = CompilationResult::from_targets(
            "/a.proto",
            vec![outcome(Language::CSharp, TargetStatus::Succeeded, "")],
        );
        assert!(ok.success);

        let mixed = CompilationResult::from_targets(
            "/a.proto",
            vec![
                outcome(Language::CSharp, TargetStatus::Succeeded, ""),
                outcome(Language::Go, TargetStatus::Diagnostic, "bad"),
            ],
        );
        assert!(!mixed.success);
        assert_eq!(mixed.stderr, "bad");
        assert_eq!(mixed.failed().count(), 1);
    }

    #[test]
    fn disabled_result_attempts_nothing() {
        let result = CompilationResult::disabled("/a.proto");
        assert!(!result.success);
        assert_eq!(result.attempted(), 0);
        let empty = CompilationResult::from_targets("/a.proto", Vec::new());
        assert!(!empty.success);
    }

    #[test]
    fn produced_files_are_deduplicated() {
        let result = CompilationResult::from_targets(
            "/a.proto",
            vec![
                outcome(Language::CSharp, TargetStatus::Succeeded, ""),
                outcome(Language::CSharp, TargetStatus::Succeeded, ""),
            ],
        );
        assert_eq!(result.produced_files(), vec![Path::new("/out/Msg.cs")]);
    }
}
