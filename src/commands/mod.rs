//! Command handlers for the protosync binary
//!
//! Each handler returns `Ok(true)` when everything it was asked to do
//! succeeded, `Ok(false)` when it ran to completion with failures.

pub mod build;
pub mod compile;
pub mod explain;
pub mod new;
pub mod project_root;
pub mod watch;

use std::path::PathBuf;

use anyhow::{Context, Result};

use protosync::domain::ports::AssetSink;
use protosync::presentation::{
    create_orchestrator, create_renderer, Cli, ConcreteOrchestrator, FactoryOptions, OutputFormat,
    Renderer,
};

use project_root::discover_project_root;

/// Settings shared by every command
pub struct CommandContext {
    pub cwd: PathBuf,
    pub project_root: PathBuf,
    pub overrides: FactoryOptions,
    pub format: OutputFormat,
    pub verbose: u8,
}

impl CommandContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("cannot read current directory")?;
        let project_root = match &cli.project {
            Some(dir) => cwd.join(dir),
            None => discover_project_root(&cwd),
        };
        Ok(Self {
            cwd,
            project_root,
            overrides: FactoryOptions {
                source_dir: cli.source_dir.clone(),
                protoc: cli.protoc.clone(),
            },
            format: OutputFormat::from_json_flag(cli.json),
            verbose: cli.verbose,
        })
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    pub fn renderer(&self) -> Box<dyn Renderer> {
        create_renderer(self.format, !cfg!(windows), self.verbose)
    }

    pub fn orchestrator<A: AssetSink>(&self, sink: A) -> Result<ConcreteOrchestrator<A>> {
        create_orchestrator(&self.project_root, &self.overrides, sink).with_context(|| {
            format!(
                "cannot open project at {}",
                self.project_root.display()
            )
        })
    }
}
