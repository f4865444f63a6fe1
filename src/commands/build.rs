use anyhow::Result;

use protosync::domain::ports::AssetSink;
use protosync::infrastructure::{JsonAssetSink, LoggingAssetSink};

use super::CommandContext;

pub fn cmd_build(ctx: &CommandContext, jobs: usize) -> Result<bool> {
    if ctx.is_json() {
        run(ctx, jobs, JsonAssetSink::stdout())
    } else {
        run(ctx, jobs, LoggingAssetSink::new())
    }
}

fn run<A: AssetSink>(ctx: &CommandContext, jobs: usize, sink: A) -> Result<bool> {
    let orchestrator = ctx.orchestrator(sink)?;
    tracing::info!(
        "rebuilding every schema under {} with {} job(s)",
        orchestrator.source_root().display(),
        jobs.max(1)
    );

    let report = orchestrator.force_recompile_all(jobs)?;
    print!(
        "{}",
        ctx.renderer()
            .render_report("build", &report, orchestrator.project_root())
    );
    Ok(report.is_success())
}
