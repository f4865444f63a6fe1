//! protosync CLI - keeps generated protobuf code in sync with .proto sources
//!
//! Usage: protosync [OPTIONS] <COMMAND>
//!
//! Commands:
//!   compile  Compile the given schema files
//!   build    Recompile every schema file in the project
//!   watch    Watch for changes and recompile continuously
//!   new      Create a new schema file from the template
//!   explain  Show which config applies to a schema file

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use protosync::presentation::{Cli, Commands};

use commands::CommandContext;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = CommandContext::from_cli(&cli)?;
    let success = match &cli.command {
        Commands::Compile { files } => commands::compile::cmd_compile(&ctx, files)?,
        Commands::Build { jobs } => commands::build::cmd_build(&ctx, *jobs)?,
        Commands::Watch { build } => commands::watch::cmd_watch(&ctx, *build)?,
        Commands::New { dir, name } => commands::new::cmd_new(&ctx, dir, name.as_deref())?,
        Commands::Explain { file } => commands::explain::cmd_explain(&ctx, file)?,
    };

    if !success {
        std::process::exit(1);
    }
    Ok(())
}

/// `RUST_LOG` wins; otherwise `-v` raises the default `warn` level.
fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
