//! Output Rendering
//!
//! Provides a unified interface for rendering output to different formats.
//! Renderers return strings; the caller decides where they go.

use std::fmt::Write as _;
use std::path::Path;

use crate::application::{Explanation, WatchEvent};
use crate::config::ConfigScope;
use crate::domain::entities::{BatchReport, PostProcessor, SkipReason, TargetStatus};
use crate::domain::value_objects::path::relative_to;

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// One JSON object per line, for scripting
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Icons for output rendering
struct Icons {
    check: &'static str,
    cross: &'static str,
    warn: &'static str,
    write: &'static str,
    skip: &'static str,
}

impl Icons {
    fn unicode() -> Self {
        Self {
            check: "✓",
            cross: "✗",
            warn: "⚠",
            write: "→",
            skip: "○",
        }
    }

    fn ascii() -> Self {
        Self {
            check: "[OK]",
            cross: "[FAIL]",
            warn: "[!]",
            write: "->",
            skip: "[ ]",
        }
    }
}

/// Renders command results
pub trait Renderer {
    /// Summary of a compile batch or rebuild
    fn render_report(&self, command: &str, report: &BatchReport, root: &Path) -> String;

    /// Result of `explain`
    fn render_explanation(&self, explanation: &Explanation, root: &Path) -> String;

    /// One watch event; `timestamp` is `HH:MM:SS`
    fn render_watch_event(&self, event: &WatchEvent, timestamp: &str) -> String;
}

/// Text renderer
pub struct TextRenderer {
    /// Whether to use unicode icons
    pub unicode: bool,
    /// Verbosity level
    pub verbose: u8,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            unicode: true,
            verbose: 0,
        }
    }
}

impl TextRenderer {
    fn icons(&self) -> Icons {
        if self.unicode {
            Icons::unicode()
        } else {
            Icons::ascii()
        }
    }
}

fn display(path: &Path, root: &Path) -> String {
    relative_to(path, root)
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}

fn skip_label(reason: &SkipReason) -> &'static str {
    match reason {
        SkipReason::NotSchema => "not a schema",
        SkipReason::Ignored => "ignored",
        SkipReason::NoConfig => "no config",
    }
}

fn indent(out: &mut String, text: &str, prefix: &str) {
    for line in text.lines() {
        let _ = writeln!(out, "{}{}", prefix, line);
    }
}

impl Renderer for TextRenderer {
    fn render_report(&self, _command: &str, report: &BatchReport, root: &Path) -> String {
        let icons = self.icons();
        let mut out = String::new();

        for result in &report.results {
            let source = display(&result.source, root);
            if result.targets.is_empty() {
                if self.verbose > 0 {
                    let _ = writeln!(out, "{} {} (disabled)", icons.skip, source);
                }
                continue;
            }

            let languages = result
                .targets
                .iter()
                .map(|t| t.language.display_name())
                .collect::<Vec<_>>()
                .join(", ");
            let icon = if result.success { icons.check } else { icons.cross };
            let _ = writeln!(out, "{} {}  {}", icon, source, languages);

            for target in &result.targets {
                match &target.status {
                    TargetStatus::Succeeded => {}
                    TargetStatus::Diagnostic => {
                        let _ = writeln!(out, "    {}:", target.language.display_name());
                        indent(&mut out, &target.stderr, "      ");
                    }
                    TargetStatus::LaunchFailed { message } => {
                        let _ = writeln!(
                            out,
                            "    {}: {}",
                            target.language.display_name(),
                            message
                        );
                    }
                }
                if let Some(error) = &target.post_process_error {
                    let _ = writeln!(out, "    {} {}", icons.warn, error);
                }
                if self.verbose > 0 {
                    for path in &target.produced {
                        let _ = writeln!(out, "    {} {}", icons.write, display(path, root));
                    }
                }
            }
        }

        for (path, message) in &report.failures {
            let _ = writeln!(out, "{} {}: {}", icons.cross, display(path, root), message);
        }

        if self.verbose > 0 {
            for (path, reason) in &report.skipped {
                let _ = writeln!(
                    out,
                    "{} {} ({})",
                    icons.skip,
                    display(path, root),
                    skip_label(reason)
                );
            }
        }

        if !out.is_empty() {
            out.push('\n');
        }
        let _ = writeln!(
            out,
            "Compiled {} file(s), {} failed target(s), {} rejected, {} skipped",
            report.compiled(),
            report.failed_targets(),
            report.failures.len(),
            report.skipped.len()
        );
        out
    }

    fn render_explanation(&self, explanation: &Explanation, root: &Path) -> String {
        let icons = self.icons();
        let mut out = String::new();

        let _ = writeln!(out, "Source:   {}", display(&explanation.source, root));
        match &explanation.config {
            None => {
                let _ = writeln!(out, "Config:   none (file is not compiled)");
                return out;
            }
            Some(located) => {
                let scope = match &located.scope {
                    ConfigScope::ProjectWide => "project-wide".to_string(),
                    ConfigScope::Scoped { dir } => format!("scoped to {}", display(dir, root)),
                };
                let _ = writeln!(
                    out,
                    "Config:   {} ({})",
                    display(&located.path, root),
                    scope
                );
                if !located.config.enabled {
                    let _ = writeln!(out, "Targets:  none (compilation disabled)");
                    return out;
                }
            }
        }

        let _ = writeln!(out, "Compiler: {}", explanation.protoc.display());
        if explanation.targets.is_empty() {
            let _ = writeln!(out, "Targets:  none (no language enabled)");
            return out;
        }

        let _ = writeln!(out, "Targets:");
        for target in &explanation.targets {
            let _ = writeln!(
                out,
                "  {} {} {}",
                target.language.display_name(),
                icons.write,
                display(&target.output_dir, root)
            );
            let _ = writeln!(
                out,
                "    {} {}",
                explanation.protoc.display(),
                target.arguments
            );
            if let Some(PostProcessor::LocalizePythonImports) = target.post_processor {
                let _ = writeln!(out, "    then localize Python imports");
            }
        }
        out
    }

    fn render_watch_event(&self, event: &WatchEvent, timestamp: &str) -> String {
        let icons = self.icons();
        let line = match event {
            WatchEvent::WatchStarted { source } => {
                format!("Watching {} (Ctrl+C to stop)", source)
            }
            WatchEvent::FileChanged { path } => format!("{} {}", icons.write, path),
            WatchEvent::CompileStarted { files: 0 } => "Compiling all schema files".to_string(),
            WatchEvent::CompileStarted { files } => format!("Compiling {} file(s)", files),
            WatchEvent::CompileComplete {
                compiled,
                failed,
                skipped,
                ..
            } => {
                let icon = if *failed > 0 { icons.cross } else { icons.check };
                format!(
                    "{} {} compiled, {} failed, {} skipped",
                    icon, compiled, failed, skipped
                )
            }
            WatchEvent::Error { message } => format!("{} {}", icons.cross, message),
            WatchEvent::Shutdown => "Stopped watching".to_string(),
        };
        format!("[{}] {}\n", timestamp, line)
    }
}

/// JSON renderer (single-line objects)
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render_report(&self, command: &str, report: &BatchReport, _root: &Path) -> String {
        let json = serde_json::json!({
            "event": "complete",
            "command": command,
            "success": report.is_success(),
            "compiled": report.compiled(),
            "failed_targets": report.failed_targets(),
            "changed": report.changed_any,
            "results": report.results,
            "failures": report.failures.iter().map(|(path, message)| serde_json::json!({
                "path": path.display().to_string(),
                "message": message,
            })).collect::<Vec<_>>(),
            "skipped": report.skipped.iter().map(|(path, reason)| serde_json::json!({
                "path": path.display().to_string(),
                "reason": reason,
            })).collect::<Vec<_>>(),
        });
        format!("{}\n", json)
    }

    fn render_explanation(&self, explanation: &Explanation, _root: &Path) -> String {
        let mut json = serde_json::to_value(explanation).unwrap_or_default();
        if let Some(map) = json.as_object_mut() {
            map.insert("event".to_string(), "explain".into());
            map.insert("would_compile".to_string(), explanation.would_compile().into());
        }
        format!("{}\n", json)
    }

    fn render_watch_event(&self, event: &WatchEvent, _timestamp: &str) -> String {
        format!("{}\n", event.to_json())
    }
}

/// Create a renderer based on format
pub fn create_renderer(format: OutputFormat, unicode: bool, verbose: u8) -> Box<dyn Renderer> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer { unicode, verbose }),
        OutputFormat::Json => Box::new(JsonRenderer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::PlannedTarget;
    use crate::config::{CompilationConfig, LocatedConfig};
    use crate::domain::entities::{CompilationResult, TargetOutcome};
    use crate::domain::value_objects::Language;
    use std::path::PathBuf;

    fn outcome(language: Language, status: TargetStatus, stderr: &str) -> TargetOutcome {
        TargetOutcome {
            language,
            output_dir: PathBuf::from("/p/gen"),
            arguments: String::new(),
            status,
            stdout: String::new(),
            stderr: stderr.to_string(),
            produced: vec![PathBuf::from("/p/gen/Msg.cs")],
            post_process_error: None,
        }
    }

    fn report() -> BatchReport {
        BatchReport {
            results: vec![
                CompilationResult::from_targets(
                    "/p/net/ok.proto",
                    vec![outcome(Language::CSharp, TargetStatus::Succeeded, "")],
                ),
                CompilationResult::from_targets(
                    "/p/net/bad.proto",
                    vec![outcome(
                        Language::Go,
                        TargetStatus::Diagnostic,
                        "bad.proto:3:1: Expected \"message\".\n",
                    )],
                ),
            ],
            skipped: vec![(PathBuf::from("/p/readme.txt"), SkipReason::NotSchema)],
            failures: vec![(PathBuf::from("/elsewhere/x.proto"), "outside".to_string())],
            changed_any: true,
        }
    }

    fn text(verbose: u8) -> TextRenderer {
        TextRenderer {
            unicode: false,
            verbose,
        }
    }

    #[test]
    fn output_format_from_flag() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_json_flag(true), OutputFormat::Json);
        assert_eq!(OutputFormat::from_json_flag(false), OutputFormat::Text);
    }

    #[test]
    fn text_report() {
        let out = text(0).render_report("build", &report(), Path::new("/p"));
        insta::assert_snapshot!(out, @r#"
        [OK] net/ok.proto  C#
        [FAIL] net/bad.proto  Go
            Go:
              bad.proto:3:1: Expected "message".
        [FAIL] /elsewhere/x.proto: outside

        Compiled 2 file(s), 1 failed target(s), 1 rejected, 1 skipped
        "#);
    }

    #[test]
    fn text_report_verbose_lists_outputs_and_skips() {
        let out = text(1).render_report("build", &report(), Path::new("/p"));
        assert!(out.contains("    -> gen/Msg.cs\n"));
        assert!(out.contains("[ ] readme.txt (not a schema)\n"));
    }

    #[test]
    fn text_report_empty() {
        let out = text(0).render_report("build", &BatchReport::default(), Path::new("/p"));
        assert_eq!(
            out,
            "Compiled 0 file(s), 0 failed target(s), 0 rejected, 0 skipped\n"
        );
    }

    #[test]
    fn json_report_is_one_line() {
        let out = JsonRenderer.render_report("compile", &report(), Path::new("/p"));
        assert_eq!(out.matches('\n').count(), 1);

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["event"], "complete");
        assert_eq!(value["command"], "compile");
        assert_eq!(value["success"], false);
        assert_eq!(value["compiled"], 2);
        assert_eq!(value["failed_targets"], 1);
        assert_eq!(value["results"][1]["targets"][0]["status"], "diagnostic");
        assert_eq!(value["skipped"][0]["reason"], "not_schema");
        assert_eq!(value["failures"][0]["message"], "outside");
    }

    fn explanation(config: Option<CompilationConfig>) -> Explanation {
        Explanation {
            source: PathBuf::from("/p/net/msg.proto"),
            protoc: PathBuf::from("protoc"),
            targets: match &config {
                Some(c) if c.enabled => vec![PlannedTarget {
                    language: Language::Python,
                    output_dir: PathBuf::from("/p/gen"),
                    arguments: "--python_out=\"/p/gen\" --proto_path=\"/p/net\" \"/p/net/msg.proto\""
                        .to_string(),
                    post_processor: Some(PostProcessor::LocalizePythonImports),
                }],
                _ => Vec::new(),
            },
            config: config.map(|config| LocatedConfig {
                path: PathBuf::from("/p/net/protosync.toml"),
                scope: ConfigScope::Scoped {
                    dir: PathBuf::from("/p/net"),
                },
                config,
            }),
        }
    }

    #[test]
    fn text_explanation() {
        let out = text(0).render_explanation(
            &explanation(Some(CompilationConfig::default())),
            Path::new("/p"),
        );
        insta::assert_snapshot!(out, @r#"
        Source:   net/msg.proto
        Config:   net/protosync.toml (scoped to net)
        Compiler: protoc
        Targets:
          Python -> gen
            protoc --python_out="/p/gen" --proto_path="/p/net" "/p/net/msg.proto"
            then localize Python imports
        "#);
    }

    #[test]
    fn text_explanation_without_config() {
        let out = text(0).render_explanation(&explanation(None), Path::new("/p"));
        assert!(out.ends_with("Config:   none (file is not compiled)\n"));
    }

    #[test]
    fn text_explanation_disabled() {
        let config = CompilationConfig {
            enabled: false,
            ..CompilationConfig::default()
        };
        let out = text(0).render_explanation(&explanation(Some(config)), Path::new("/p"));
        assert!(out.ends_with("Targets:  none (compilation disabled)\n"));
    }

    #[test]
    fn json_explanation() {
        let out = JsonRenderer.render_explanation(
            &explanation(Some(CompilationConfig::default())),
            Path::new("/p"),
        );
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["event"], "explain");
        assert_eq!(value["would_compile"], true);
        assert_eq!(value["config"]["scope"]["kind"], "scoped");
        assert_eq!(value["targets"][0]["language"], "python");
    }

    #[test]
    fn text_watch_events() {
        let r = text(0);
        assert_eq!(
            r.render_watch_event(&WatchEvent::CompileStarted { files: 2 }, "10:00:00"),
            "[10:00:00] Compiling 2 file(s)\n"
        );
        assert_eq!(
            r.render_watch_event(
                &WatchEvent::CompileComplete {
                    compiled: 1,
                    failed: 1,
                    skipped: 0,
                    changed: true
                },
                "10:00:01"
            ),
            "[10:00:01] [FAIL] 1 compiled, 1 failed, 0 skipped\n"
        );
        assert_eq!(
            r.render_watch_event(&WatchEvent::Shutdown, "10:00:02"),
            "[10:00:02] Stopped watching\n"
        );
    }

    #[test]
    fn json_watch_event_ignores_timestamp() {
        let out = JsonRenderer.render_watch_event(&WatchEvent::Shutdown, "10:00:00");
        assert_eq!(out, format!("{}\n", WatchEvent::Shutdown.to_json()));
    }

    #[test]
    fn icons() {
        assert_eq!(Icons::unicode().check, "✓");
        assert_eq!(Icons::ascii().check, "[OK]");
    }
}
