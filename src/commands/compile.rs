use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;

use protosync::domain::ports::AssetSink;
use protosync::domain::value_objects::path::absolutize;
use protosync::infrastructure::{JsonAssetSink, LoggingAssetSink};

use super::CommandContext;

pub fn cmd_compile(ctx: &CommandContext, files: &[PathBuf]) -> Result<bool> {
    let files: Vec<PathBuf> = files.iter().map(|f| resolve(f, &ctx.cwd)).collect();
    if ctx.is_json() {
        run(ctx, &files, JsonAssetSink::stdout())
    } else {
        run(ctx, &files, LoggingAssetSink::new())
    }
}

fn run<A: AssetSink>(ctx: &CommandContext, files: &[PathBuf], sink: A) -> Result<bool> {
    let orchestrator = ctx.orchestrator(sink)?;
    if !orchestrator.preferences().enabled {
        tracing::warn!("compilation is disabled in preferences; nothing to do");
    }

    let report = orchestrator.on_sources_changed(files);
    print!(
        "{}",
        ctx.renderer()
            .render_report("compile", &report, orchestrator.project_root())
    );
    Ok(report.is_success())
}

/// Command-line paths are relative to the working directory. Existing files
/// are canonicalized so they compare equal to the canonical project root.
fn resolve(path: &Path, cwd: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| absolutize(path, cwd))
}
