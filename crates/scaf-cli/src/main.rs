use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use scaf_config::ScafConfig;

mod cli;
mod commands;
mod context;
mod descriptor;
mod output;
mod write_lock;

fn main() {
    if let Err(error) = run() {
        eprintln!("scaf error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();

    if let cli::Commands::Schema(args) = &cli.command {
        return commands::schema::handle(args, &flags);
    }

    let project_root = resolve_project_root(flags.project.as_deref())?;

    if let cli::Commands::Init(args) = &cli.command {
        return commands::init::handle(args, &project_root, &flags);
    }

    let config = ScafConfig::load_with_dotenv(&project_root).with_context(|| {
        format!(
            "failed to load configuration for {}",
            project_root.display()
        )
    })?;

    let command = cli.command;
    let write_lock = if command_requires_write_lock(&command) {
        Some(write_lock::acquire_for_project(&project_root)?)
    } else {
        None
    };

    let ctx = context::AppContext::new(project_root, config);
    let result = commands::dispatch::dispatch(command, &ctx, &flags);
    drop(write_lock);
    result
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("SCAF_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

/// `--project` wins; otherwise the nearest ancestor with a project marker,
/// else the current directory.
fn resolve_project_root(project_override: Option<&str>) -> anyhow::Result<PathBuf> {
    if let Some(path) = project_override {
        let explicit = PathBuf::from(path);

        if explicit
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name == scaf_config::PROJECT_DIR)
        {
            return explicit
                .parent()
                .map(Path::to_path_buf)
                .context("invalid --project path: '.scaf' directory has no parent");
        }

        if explicit.is_dir() {
            return Ok(explicit);
        }

        anyhow::bail!(
            "invalid --project '{}': directory does not exist",
            explicit.display()
        );
    }

    let start = std::env::current_dir().context("failed to read current directory")?;
    Ok(context::find_project_root(&start).unwrap_or(start))
}

fn command_requires_write_lock(command: &cli::Commands) -> bool {
    match command {
        cli::Commands::Generate(args) => !args.dry_run,
        cli::Commands::Resolve(_) | cli::Commands::Schema(_) | cli::Commands::Init(_) => false,
    }
}
