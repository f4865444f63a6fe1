use std::path::Path;

use anyhow::Result;

use protosync::domain::value_objects::path::absolutize;
use protosync::infrastructure::NoopAssetSink;

use super::CommandContext;

pub fn cmd_explain(ctx: &CommandContext, file: &Path) -> Result<bool> {
    let orchestrator = ctx.orchestrator(NoopAssetSink)?;
    let file = std::fs::canonicalize(file).unwrap_or_else(|_| absolutize(file, &ctx.cwd));

    let explanation = orchestrator.explain(&file)?;
    print!(
        "{}",
        ctx.renderer()
            .render_explanation(&explanation, orchestrator.project_root())
    );
    Ok(true)
}
