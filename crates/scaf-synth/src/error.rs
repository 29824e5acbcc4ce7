use std::path::PathBuf;

use scaf_core::errors::CoreError;
use scaf_sink::SinkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SynthError {
    /// The migration exists but has no `Schema::create(...)` block to replace.
    #[error("no Schema::create block found in migration '{path}'")]
    MigrationBlockNotFound { path: PathBuf },

    /// The layout exists but has no sidebar menu to merge into.
    #[error("navigation layout has no sidebar menu (<ul class=\"nav nav-pills nav-sidebar flex-column\">)")]
    SidebarNotFound,

    /// No migration exists and creating one is disabled.
    #[error("no migration matching '{name}' exists and migration.create_missing is off")]
    MigrationMissing { name: String },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}
