//! The Schema Descriptor: everything scaf needs to know about one entity.
//!
//! [`SchemaInput`] is the wire form read from a descriptor file. It is turned
//! into a [`SchemaDescriptor`] by [`SchemaDescriptor::new`], which enforces
//! structural validity and is the only way to obtain a descriptor.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{InputKind, RelationKind, SqlType};
use crate::errors::CoreError;
use crate::naming;
use crate::relationship;

// ---------------------------------------------------------------------------
// Attributes and columns
// ---------------------------------------------------------------------------

/// A mass-assignable attribute and the form element used to edit it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AttributeDescriptor {
    pub name: String,
    #[serde(default)]
    pub input_kind: InputKind,
}

impl AttributeDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, input_kind: InputKind) -> Self {
        Self {
            name: name.into(),
            input_kind,
        }
    }
}

fn default_reference_column() -> String {
    "id".to_string()
}

/// Target of a foreign-key constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ForeignKeyRef {
    pub reference_table: String,
    #[serde(default = "default_reference_column")]
    pub reference_column: String,
}

/// One column spliced into the create-table migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MigrationColumn {
    pub name: String,
    pub sql_type: SqlType,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<ForeignKeyRef>,
}

impl MigrationColumn {
    #[must_use]
    pub fn new(name: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            name: name.into(),
            sql_type,
            nullable: false,
            foreign_key: None,
        }
    }

    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    #[must_use]
    pub fn references(mut self, table: impl Into<String>, column: impl Into<String>) -> Self {
        self.foreign_key = Some(ForeignKeyRef {
            reference_table: table.into(),
            reference_column: column.into(),
        });
        self
    }
}

// ---------------------------------------------------------------------------
// Relationships
// ---------------------------------------------------------------------------

/// Detail for `hasOneThrough` / `hasManyThrough`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ThroughDetail {
    pub through_entity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_key: Option<String>,
}

/// Detail for `morphOne` / `morphMany` / `morphTo`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MorphDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub morphable_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub morphable_id: Option<String>,
}

/// Kind-specific overrides of a relationship. The variant is the kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RelationDetail {
    HasOne,
    HasMany,
    BelongsTo {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        foreign_key: Option<String>,
    },
    BelongsToMany {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pivot_table: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        foreign_pivot_key: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        related_pivot_key: Option<String>,
    },
    HasOneThrough(ThroughDetail),
    HasManyThrough(ThroughDetail),
    MorphOne(MorphDetail),
    MorphMany(MorphDetail),
    MorphTo(MorphDetail),
}

impl RelationDetail {
    #[must_use]
    pub const fn kind(&self) -> RelationKind {
        match self {
            Self::HasOne => RelationKind::HasOne,
            Self::HasMany => RelationKind::HasMany,
            Self::BelongsTo { .. } => RelationKind::BelongsTo,
            Self::BelongsToMany { .. } => RelationKind::BelongsToMany,
            Self::HasOneThrough(_) => RelationKind::HasOneThrough,
            Self::HasManyThrough(_) => RelationKind::HasManyThrough,
            Self::MorphOne(_) => RelationKind::MorphOne,
            Self::MorphMany(_) => RelationKind::MorphMany,
            Self::MorphTo(_) => RelationKind::MorphTo,
        }
    }

    /// Detail with every optional override left out.
    #[must_use]
    pub fn defaults_for(kind: RelationKind) -> Self {
        match kind {
            RelationKind::HasOne => Self::HasOne,
            RelationKind::HasMany => Self::HasMany,
            RelationKind::BelongsTo => Self::BelongsTo { foreign_key: None },
            RelationKind::BelongsToMany => Self::BelongsToMany {
                pivot_table: None,
                foreign_pivot_key: None,
                related_pivot_key: None,
            },
            RelationKind::HasOneThrough => Self::HasOneThrough(ThroughDetail::default()),
            RelationKind::HasManyThrough => Self::HasManyThrough(ThroughDetail::default()),
            RelationKind::MorphOne => Self::MorphOne(MorphDetail::default()),
            RelationKind::MorphMany => Self::MorphMany(MorphDetail::default()),
            RelationKind::MorphTo => Self::MorphTo(MorphDetail::default()),
        }
    }

    fn through(&self) -> Option<&ThroughDetail> {
        match self {
            Self::HasOneThrough(detail) | Self::HasManyThrough(detail) => Some(detail),
            _ => None,
        }
    }

    fn through_mut(&mut self) -> Option<&mut ThroughDetail> {
        match self {
            Self::HasOneThrough(detail) | Self::HasManyThrough(detail) => Some(detail),
            _ => None,
        }
    }
}

/// A user-declared relationship from the entity to `related_entity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RelationshipDeclaration {
    pub related_entity: String,
    #[serde(flatten)]
    pub detail: RelationDetail,
}

impl RelationshipDeclaration {
    #[must_use]
    pub fn new(related_entity: impl Into<String>, detail: RelationDetail) -> Self {
        Self {
            related_entity: related_entity.into(),
            detail,
        }
    }

    /// Declaration of `kind` with no overrides.
    #[must_use]
    pub fn of_kind(kind: RelationKind, related_entity: impl Into<String>) -> Self {
        Self::new(related_entity, RelationDetail::defaults_for(kind))
    }

    #[must_use]
    pub const fn kind(&self) -> RelationKind {
        self.detail.kind()
    }
}

// ---------------------------------------------------------------------------
// Descriptor
// ---------------------------------------------------------------------------

/// Wire form of a descriptor file (JSON or TOML).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SchemaInput {
    pub entity_name: String,
    #[serde(default)]
    pub attributes: Vec<AttributeDescriptor>,
    #[serde(default)]
    pub migration_columns: Vec<MigrationColumn>,
    #[serde(default)]
    pub relationships: Vec<RelationshipDeclaration>,
}

/// A validated description of one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDescriptor {
    entity_name: String,
    attributes: Vec<AttributeDescriptor>,
    migration_columns: Vec<MigrationColumn>,
    relationships: Vec<RelationshipDeclaration>,
}

impl SchemaDescriptor {
    /// Validate `input` and normalize entity names to StudlyCase.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MalformedSchema`] for an empty or non-identifier
    /// entity name, empty or duplicate attribute/column names, a foreign key
    /// whose table or column is not an identifier, a missing through entity,
    /// or two relationships resolving to the same accessor.
    pub fn new(input: SchemaInput) -> Result<Self, CoreError> {
        let entity_name = input.entity_name.trim();
        if entity_name.is_empty() {
            return Err(CoreError::malformed("<unnamed>", "entity name is empty"));
        }
        if !is_identifier(entity_name) {
            return Err(CoreError::malformed(
                entity_name,
                "entity name must start with a letter and contain only letters, digits or '_'",
            ));
        }
        let entity_name = naming::studly_case(entity_name);

        check_names(
            &entity_name,
            "attribute",
            input.attributes.iter().map(|attr| attr.name.as_str()),
        )?;
        check_names(
            &entity_name,
            "migration column",
            input.migration_columns.iter().map(|col| col.name.as_str()),
        )?;

        for column in &input.migration_columns {
            let invalid_fk = column.foreign_key.as_ref().is_some_and(|fk| {
                !is_identifier(&fk.reference_table) || !is_identifier(&fk.reference_column)
            });
            if invalid_fk {
                return Err(CoreError::malformed(
                    &entity_name,
                    format!(
                        "foreign key on column '{}' needs an identifier reference table and column",
                        column.name
                    ),
                ));
            }
        }

        let relationships = input
            .relationships
            .into_iter()
            .map(|declaration| normalize_relationship(&entity_name, declaration))
            .collect::<Result<Vec<_>, _>>()?;

        let mut methods = HashSet::new();
        for declaration in &relationships {
            let method = relationship::method_name(declaration.kind(), &declaration.related_entity);
            if !methods.insert(method.clone()) {
                return Err(CoreError::malformed(
                    &entity_name,
                    format!(
                        "relationships resolve to the same accessor '{method}' (last: {} {})",
                        declaration.kind(),
                        declaration.related_entity
                    ),
                ));
            }
        }

        Ok(Self {
            entity_name,
            attributes: input.attributes,
            migration_columns: input.migration_columns,
            relationships,
        })
    }

    #[must_use]
    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    #[must_use]
    pub fn attributes(&self) -> &[AttributeDescriptor] {
        &self.attributes
    }

    #[must_use]
    pub fn migration_columns(&self) -> &[MigrationColumn] {
        &self.migration_columns
    }

    #[must_use]
    pub fn relationships(&self) -> &[RelationshipDeclaration] {
        &self.relationships
    }

    /// `blog_posts` for `BlogPost`.
    #[must_use]
    pub fn table_name(&self) -> String {
        naming::table_name(&self.entity_name)
    }

    /// `blogposts` for `BlogPost`.
    #[must_use]
    pub fn route_segment(&self) -> String {
        naming::route_segment(&self.entity_name)
    }
}

impl TryFrom<SchemaInput> for SchemaDescriptor {
    type Error = CoreError;

    fn try_from(input: SchemaInput) -> Result<Self, Self::Error> {
        Self::new(input)
    }
}

fn normalize_relationship(
    entity: &str,
    mut declaration: RelationshipDeclaration,
) -> Result<RelationshipDeclaration, CoreError> {
    let related = declaration.related_entity.trim();
    if !is_identifier(related) {
        return Err(CoreError::malformed(
            entity,
            format!(
                "{} relationship has an invalid related entity '{related}'",
                declaration.kind()
            ),
        ));
    }
    declaration.related_entity = naming::studly_case(related);

    if let Some(through) = declaration.detail.through() {
        let through_entity = through.through_entity.trim();
        if !is_identifier(through_entity) {
            return Err(CoreError::malformed(
                entity,
                format!(
                    "{} relationship to '{}' needs an intermediate entity",
                    declaration.kind(),
                    declaration.related_entity
                ),
            ));
        }
        let through_entity = naming::studly_case(through_entity);
        if let Some(detail) = declaration.detail.through_mut() {
            detail.through_entity = through_entity;
        }
    }

    Ok(declaration)
}

fn check_names<'a>(
    entity: &str,
    what: &str,
    names: impl Iterator<Item = &'a str>,
) -> Result<(), CoreError> {
    let mut seen = HashSet::new();
    for name in names {
        if !is_identifier(name) {
            return Err(CoreError::malformed(
                entity,
                format!("invalid {what} name '{name}'"),
            ));
        }
        if !seen.insert(name) {
            return Err(CoreError::malformed(
                entity,
                format!("duplicate {what} name '{name}'"),
            ));
        }
    }
    Ok(())
}

fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    chars.next().is_some_and(|ch| ch.is_ascii_alphabetic())
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}
