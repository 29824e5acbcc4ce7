use std::path::PathBuf;

use clap::{Args, Subcommand};

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Write `.scaf/config.toml` with the default settings.
    Init(InitArgs),
    /// Generate model, migration, repository, controller, views, routes and
    /// navigation entry for one entity.
    Generate(GenerateArgs),
    /// Show resolved relationships (accessor names and keys) without writing.
    Resolve(ResolveArgs),
    /// Print a JSON Schema, or list the available ones.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(long)]
    pub force: bool,
}

#[derive(Clone, Debug, Args)]
pub struct GenerateArgs {
    /// Entity descriptor file (.json or .toml).
    pub descriptor: PathBuf,

    /// Report what would change without touching the project.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ResolveArgs {
    /// Entity descriptor file (.json or .toml).
    pub descriptor: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Schema name; omit to list every registered schema.
    pub name: Option<String>,
}
