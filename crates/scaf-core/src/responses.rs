//! CLI response types returned as JSON by `scaf` commands.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::relationship::ResolvedRelationship;

/// Which generated artifact a record refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    BaseRepository,
    Model,
    Migration,
    Controller,
    Repository,
    Layout,
    Routes,
    IndexView,
    CreateView,
    EditView,
    ShowView,
}

impl ArtifactKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BaseRepository => "base_repository",
            Self::Model => "model",
            Self::Migration => "migration",
            Self::Controller => "controller",
            Self::Repository => "repository",
            Self::Layout => "layout",
            Self::Routes => "routes",
            Self::IndexView => "index_view",
            Self::CreateView => "create_view",
            Self::EditView => "edit_view",
            Self::ShowView => "show_view",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened to an artifact during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactAction {
    /// Written to a path that did not exist.
    Created,
    /// Written over an existing file.
    Overwritten,
    /// An existing file was spliced or merged in place.
    Updated,
    /// An existing file already contained the generated content.
    Unchanged,
    /// Text appended to an existing file.
    Appended,
    /// Deliberately left alone (e.g. shared base already present).
    Skipped,
}

impl ArtifactAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Overwritten => "overwritten",
            Self::Updated => "updated",
            Self::Unchanged => "unchanged",
            Self::Appended => "appended",
            Self::Skipped => "skipped",
        }
    }
}

impl fmt::Display for ArtifactAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ArtifactRecord {
    pub kind: ArtifactKind,
    pub path: String,
    pub action: ArtifactAction,
}

/// Response from `scaf generate`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct GenerationReport {
    pub entity: String,
    pub table: String,
    pub route_segment: String,
    pub dry_run: bool,
    pub eager_load: Vec<String>,
    pub relationships: Vec<ResolvedRelationship>,
    pub artifacts: Vec<ArtifactRecord>,
}

impl GenerationReport {
    /// First record for `kind`, if the run produced one.
    #[must_use]
    pub fn artifact(&self, kind: ArtifactKind) -> Option<&ArtifactRecord> {
        self.artifacts.iter().find(|record| record.kind == kind)
    }
}

/// Response from `scaf resolve`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ResolveResponse {
    pub entity: String,
    pub relationships: Vec<ResolvedRelationship>,
}
