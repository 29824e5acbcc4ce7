//! Relationship Model: accessor method names and default key names.
//!
//! Resolution never fails. An override that is absent or blank falls back to
//! the derived default; through keys have no default and stay absent, which
//! makes the generated accessor pass fewer arguments.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::RelationKind;
use crate::naming;
use crate::schema::{RelationDetail, RelationshipDeclaration, SchemaDescriptor};

/// Keys and names a generated accessor needs, after defaults are applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ResolvedKeys {
    None,
    BelongsTo {
        foreign_key: String,
    },
    BelongsToMany {
        pivot_table: String,
        foreign_pivot_key: String,
        related_pivot_key: String,
    },
    Through {
        through_entity: String,
        first_key: Option<String>,
        second_key: Option<String>,
    },
    Morph {
        morph_name: String,
        morphable_type: String,
        morphable_id: String,
    },
}

/// A declaration together with everything derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ResolvedRelationship {
    pub declaration: RelationshipDeclaration,
    pub method_name: String,
    pub keys: ResolvedKeys,
}

impl ResolvedRelationship {
    #[must_use]
    pub const fn kind(&self) -> RelationKind {
        self.declaration.kind()
    }

    #[must_use]
    pub fn related_entity(&self) -> &str {
        &self.declaration.related_entity
    }
}

/// Accessor name for a relationship to `related`.
///
/// Collection kinds lower-case the whole camel form (`BlogPost` ->
/// `blogpost`), every other kind keeps plain camel case (`blogPost`).
/// Generated code in the wild depends on this exact output.
#[must_use]
pub fn method_name(kind: RelationKind, related: &str) -> String {
    let camel = naming::camel_case(related);
    if kind.is_plural() {
        camel.to_lowercase()
    } else {
        camel
    }
}

/// Default pivot table for a many-to-many between `entity` and `related`.
/// Independent of which side declares the relationship.
#[must_use]
pub fn pivot_table(entity: &str, related: &str) -> String {
    let (first, second) = naming::ordered_pair(entity, related);
    format!("{}_{}", naming::snake_case(first), naming::snake_case(second))
}

/// `Post` -> `post_id`.
#[must_use]
pub fn id_key(entity: &str) -> String {
    format!("{}_id", naming::snake_case(entity))
}

/// Resolve one declaration made on `entity`.
#[must_use]
pub fn resolve(entity: &str, declaration: &RelationshipDeclaration) -> ResolvedRelationship {
    let related = declaration.related_entity.as_str();
    let method_name = method_name(declaration.kind(), related);

    let keys = match &declaration.detail {
        RelationDetail::HasOne | RelationDetail::HasMany => ResolvedKeys::None,
        RelationDetail::BelongsTo { foreign_key } => ResolvedKeys::BelongsTo {
            foreign_key: provided(foreign_key.as_ref()).unwrap_or_else(|| id_key(related)),
        },
        RelationDetail::BelongsToMany {
            pivot_table: pivot,
            foreign_pivot_key,
            related_pivot_key,
        } => ResolvedKeys::BelongsToMany {
            pivot_table: provided(pivot.as_ref()).unwrap_or_else(|| pivot_table(entity, related)),
            foreign_pivot_key: provided(foreign_pivot_key.as_ref())
                .unwrap_or_else(|| id_key(entity)),
            related_pivot_key: provided(related_pivot_key.as_ref())
                .unwrap_or_else(|| id_key(related)),
        },
        RelationDetail::HasOneThrough(detail) | RelationDetail::HasManyThrough(detail) => {
            ResolvedKeys::Through {
                through_entity: detail.through_entity.clone(),
                first_key: provided(detail.first_key.as_ref()),
                second_key: provided(detail.second_key.as_ref()),
            }
        }
        RelationDetail::MorphOne(detail)
        | RelationDetail::MorphMany(detail)
        | RelationDetail::MorphTo(detail) => ResolvedKeys::Morph {
            morph_name: naming::snake_case(&method_name),
            morphable_type: provided(detail.morphable_type.as_ref())
                .unwrap_or_else(|| format!("{}_type", naming::snake_case(entity))),
            morphable_id: provided(detail.morphable_id.as_ref())
                .unwrap_or_else(|| id_key(entity)),
        },
    };

    ResolvedRelationship {
        declaration: declaration.clone(),
        method_name,
        keys,
    }
}

/// Resolve every relationship of a descriptor, in declaration order.
#[must_use]
pub fn resolve_all(descriptor: &SchemaDescriptor) -> Vec<ResolvedRelationship> {
    descriptor
        .relationships()
        .iter()
        .map(|declaration| resolve(descriptor.entity_name(), declaration))
        .collect()
}

fn provided(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}
