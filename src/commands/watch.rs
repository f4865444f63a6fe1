use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};

use protosync::application::{WatchEvent, WatchOptions, WatchUseCase};
use protosync::domain::ports::AssetSink;
use protosync::infrastructure::{JsonAssetSink, LoggingAssetSink};

use super::CommandContext;

pub fn cmd_watch(ctx: &CommandContext, build: bool) -> Result<bool> {
    if ctx.is_json() {
        run(ctx, build, JsonAssetSink::stdout())
    } else {
        run(ctx, build, LoggingAssetSink::new())
    }
}

fn run<A: AssetSink>(ctx: &CommandContext, build: bool, sink: A) -> Result<bool> {
    let orchestrator = ctx.orchestrator(sink)?;
    let options = WatchOptions::new()
        .with_build_on_start(build)
        .with_json(ctx.is_json());
    let use_case = WatchUseCase::new(&orchestrator, options);

    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("cannot install Ctrl+C handler")?;

    let renderer = ctx.renderer();
    let json = ctx.is_json();
    use_case.start(running, |event| {
        let rendered = renderer.render_watch_event(&event, &timestamp());
        match event {
            WatchEvent::Error { .. } if !json => eprint!("{rendered}"),
            _ => print!("{rendered}"),
        }
    })?;

    Ok(true)
}

/// Wall-clock time of day (UTC) as `HH:MM:SS`
fn timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 86_400;
            format!(
                "{:02}:{:02}:{:02}",
                secs / 3600,
                (secs % 3600) / 60,
                secs % 60
            )
        })
        .unwrap_or_else(|_| "00:00:00".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_shape() {
        let ts = timestamp();
        assert_eq!(ts.len(), 8);
        assert_eq!(ts.as_bytes()[2], b':');
        assert_eq!(ts.as_bytes()[5], b':');
    }
}
