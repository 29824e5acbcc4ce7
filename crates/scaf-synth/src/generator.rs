//! One full scaffolding run over a [`Sink`].

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use scaf_config::ScafConfig;
use scaf_core::relationship::{self, ResolvedRelationship};
use scaf_core::responses::{ArtifactAction, ArtifactKind, ArtifactRecord, GenerationReport};
use scaf_core::schema::SchemaDescriptor;
use scaf_sink::Sink;

use crate::layout::{self, NavEntry};
use crate::views::{self, ViewKind};
use crate::{SynthError, controller, migration, model, repository, routes};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Timestamp used to name a newly created migration.
    pub timestamp: NaiveDateTime,
    /// Recorded in the report. The caller supplies a capturing sink.
    pub dry_run: bool,
}

impl GenerateOptions {
    #[must_use]
    pub fn now() -> Self {
        Self {
            timestamp: Local::now().naive_local(),
            dry_run: false,
        }
    }

    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

pub struct Generator<'a, S: Sink> {
    sink: &'a mut S,
    config: &'a ScafConfig,
}

impl<'a, S: Sink> Generator<'a, S> {
    pub const fn new(sink: &'a mut S, config: &'a ScafConfig) -> Self {
        Self { sink, config }
    }

    /// Produce every artifact for `descriptor`.
    ///
    /// Artifacts are written in a fixed order: base repository, model,
    /// migration, controller, repository, layout, routes, views. A failure
    /// stops the run; artifacts already written stay written.
    ///
    /// # Errors
    ///
    /// Sink failures, a migration without a create block (strict mode), a
    /// missing migration with `create_missing` off (strict mode), or a
    /// layout without a sidebar menu.
    pub fn generate(
        &mut self,
        descriptor: &SchemaDescriptor,
        options: &GenerateOptions,
    ) -> Result<GenerationReport, SynthError> {
        let entity = descriptor.entity_name();
        tracing::info!(entity, dry_run = options.dry_run, "generating scaffold");

        let resolved = relationship::resolve_all(descriptor);
        let mut artifacts = Vec::new();

        artifacts.push(self.base_repository()?);
        artifacts.push(self.model(descriptor, &resolved)?);
        artifacts.push(self.migration(descriptor, options)?);
        artifacts.push(self.controller(descriptor, &resolved)?);
        artifacts.push(self.repository(descriptor)?);
        artifacts.push(self.layout(descriptor)?);
        artifacts.push(self.routes(descriptor)?);
        artifacts.extend(self.views(descriptor)?);

        tracing::info!(entity, artifacts = artifacts.len(), "scaffold generated");

        Ok(GenerationReport {
            entity: entity.to_string(),
            table: descriptor.table_name(),
            route_segment: descriptor.route_segment(),
            dry_run: options.dry_run,
            eager_load: controller::eager_load(&resolved),
            relationships: resolved,
            artifacts,
        })
    }

    fn base_repository(&mut self) -> Result<ArtifactRecord, SynthError> {
        let path = Path::new(&self.config.paths.repositories_dir)
            .join(format!("{}.php", repository::BASE_CLASS));
        if self.sink.exists(&path) {
            tracing::debug!(path = %path.display(), "base repository present, leaving it alone");
            return Ok(record(ArtifactKind::BaseRepository, &path, ArtifactAction::Skipped));
        }
        let content = repository::render_base(&self.config.namespaces.repositories);
        self.put(ArtifactKind::BaseRepository, path, &content)
    }

    fn model(
        &mut self,
        descriptor: &SchemaDescriptor,
        resolved: &[ResolvedRelationship],
    ) -> Result<ArtifactRecord, SynthError> {
        let plan = model::plan(descriptor, resolved, &self.config.namespaces.models);
        let path = Path::new(&self.config.paths.models_dir)
            .join(format!("{}.php", descriptor.entity_name()));
        self.put(ArtifactKind::Model, path, &model::render(&plan))
    }

    fn migration(
        &mut self,
        descriptor: &SchemaDescriptor,
        options: &GenerateOptions,
    ) -> Result<ArtifactRecord, SynthError> {
        let dir = Path::new(&self.config.paths.migrations_dir);
        let hint = migration::name_hint(descriptor.entity_name());
        let plan = migration::plan(descriptor);

        let Some(path) = self.sink.find_migration(dir, &hint)? else {
            if self.config.migration.create_missing {
                let path = dir.join(migration::file_name(options.timestamp, &plan.table));
                return self.put(ArtifactKind::Migration, path, &migration::render_new(&plan));
            }
            if self.config.migration.strict {
                return Err(SynthError::MigrationMissing { name: hint });
            }
            tracing::warn!(name = %hint, "no migration found, skipping");
            return Ok(record(ArtifactKind::Migration, dir, ArtifactAction::Skipped));
        };

        let content = self.sink.read(&path)?;
        match migration::splice(&content, &plan) {
            Some(spliced) if spliced == content => {
                Ok(record(ArtifactKind::Migration, &path, ArtifactAction::Unchanged))
            }
            Some(spliced) => {
                self.sink.write(&path, &spliced)?;
                tracing::debug!(path = %path.display(), "spliced migration");
                Ok(record(ArtifactKind::Migration, &path, ArtifactAction::Updated))
            }
            None if self.config.migration.strict => {
                Err(SynthError::MigrationBlockNotFound { path })
            }
            None => {
                tracing::warn!(path = %path.display(), "migration has no create block, left unchanged");
                Ok(record(ArtifactKind::Migration, &path, ArtifactAction::Skipped))
            }
        }
    }

    fn controller(
        &mut self,
        descriptor: &SchemaDescriptor,
        resolved: &[ResolvedRelationship],
    ) -> Result<ArtifactRecord, SynthError> {
        let plan = controller::plan(
            descriptor,
            resolved,
            &self.config.namespaces.controllers,
            &self.config.namespaces.repositories,
        );
        let path =
            Path::new(&self.config.paths.controllers_dir).join(format!("{}.php", plan.class_name));
        self.put(ArtifactKind::Controller, path, &controller::render(&plan))
    }

    fn repository(&mut self, descriptor: &SchemaDescriptor) -> Result<ArtifactRecord, SynthError> {
        let content = repository::render(
            descriptor,
            &self.config.namespaces.repositories,
            &self.config.namespaces.models,
        );
        let path = Path::new(&self.config.paths.repositories_dir)
            .join(format!("{}.php", repository::class_name(descriptor)));
        self.put(ArtifactKind::Repository, path, &content)
    }

    fn layout(&mut self, descriptor: &SchemaDescriptor) -> Result<ArtifactRecord, SynthError> {
        let path = PathBuf::from(&self.config.paths.layout_file);
        let entry = NavEntry::new(
            descriptor.entity_name(),
            &descriptor.route_segment(),
            &self.config.layout,
        );

        let existing = self.sink.read_optional(&path)?;
        let merged = layout::merge(existing.as_deref(), &entry, &self.config.layout)?;
        let action = match existing {
            None => ArtifactAction::Created,
            Some(current) if current == merged => {
                return Ok(record(ArtifactKind::Layout, &path, ArtifactAction::Unchanged));
            }
            Some(_) => ArtifactAction::Updated,
        };

        self.sink.write(&path, &merged)?;
        tracing::debug!(path = %path.display(), %action, "merged navigation entry");
        Ok(record(ArtifactKind::Layout, &path, action))
    }

    fn routes(&mut self, descriptor: &SchemaDescriptor) -> Result<ArtifactRecord, SynthError> {
        let path = PathBuf::from(&self.config.paths.routes_file);
        let statement = routes::statement(descriptor, &self.config.namespaces.controllers);

        let existing = self.sink.read_optional(&path)?;
        let Some(text) = routes::append_text(existing.as_deref(), &statement) else {
            tracing::warn!(route = %statement, "route already registered, not appending");
            return Ok(record(ArtifactKind::Routes, &path, ArtifactAction::Unchanged));
        };

        self.sink.append(&path, &text)?;
        let action = if existing.is_some() {
            ArtifactAction::Appended
        } else {
            ArtifactAction::Created
        };
        Ok(record(ArtifactKind::Routes, &path, action))
    }

    fn views(&mut self, descriptor: &SchemaDescriptor) -> Result<Vec<ArtifactRecord>, SynthError> {
        let plan = views::plan(descriptor);
        let dir = Path::new(&self.config.paths.views_dir).join(&plan.route_segment);

        ViewKind::ALL
            .into_iter()
            .map(|kind| {
                let artifact = match kind {
                    ViewKind::Index => ArtifactKind::IndexView,
                    ViewKind::Create => ArtifactKind::CreateView,
                    ViewKind::Edit => ArtifactKind::EditView,
                    ViewKind::Show => ArtifactKind::ShowView,
                };
                self.put(artifact, dir.join(kind.file_name()), &views::render(&plan, kind))
            })
            .collect()
    }

    /// Write a whole artifact, reporting whether it was new, replaced, or
    /// already identical.
    fn put(
        &mut self,
        kind: ArtifactKind,
        path: PathBuf,
        content: &str,
    ) -> Result<ArtifactRecord, SynthError> {
        let action = match self.sink.read_optional(&path)? {
            None => ArtifactAction::Created,
            Some(existing) if existing == content => ArtifactAction::Unchanged,
            Some(_) => ArtifactAction::Overwritten,
        };
        if action != ArtifactAction::Unchanged {
            self.sink.write(&path, content)?;
        }
        tracing::debug!(%kind, path = %path.display(), %action, "artifact");
        Ok(record(kind, &path, action))
    }
}

fn record(kind: ArtifactKind, path: &Path, action: ArtifactAction) -> ArtifactRecord {
    ArtifactRecord {
        kind,
        path: path.to_string_lossy().replace('\\', "/"),
        action,
    }
}
