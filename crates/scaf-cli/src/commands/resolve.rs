use serde::Serialize;

use scaf_core::relationship::{ResolvedKeys, ResolvedRelationship, resolve_all};
use scaf_core::responses::ResolveResponse;

use crate::cli::root_commands::ResolveArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::descriptor;
use crate::output::output;

/// Handle `scaf resolve`.
pub fn handle(args: &ResolveArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let descriptor = descriptor::load(&args.descriptor)?;
    let response = ResolveResponse {
        entity: descriptor.entity_name().to_string(),
        relationships: resolve_all(&descriptor),
    };

    match flags.format {
        OutputFormat::Table => {
            let rows = response.relationships.iter().map(ResolveRow::from).collect::<Vec<_>>();
            output(&rows, flags.format)
        }
        OutputFormat::Json | OutputFormat::Raw => output(&response, flags.format),
    }
}

#[derive(Debug, Serialize)]
struct ResolveRow {
    method: String,
    kind: String,
    related: String,
    keys: String,
}

impl From<&ResolvedRelationship> for ResolveRow {
    fn from(resolved: &ResolvedRelationship) -> Self {
        Self {
            method: resolved.method_name.clone(),
            kind: resolved.kind().to_string(),
            related: resolved.related_entity().to_string(),
            keys: describe_keys(&resolved.keys),
        }
    }
}

fn describe_keys(keys: &ResolvedKeys) -> String {
    match keys {
        ResolvedKeys::None => String::from("-"),
        ResolvedKeys::BelongsTo { foreign_key } => foreign_key.clone(),
        ResolvedKeys::BelongsToMany {
            pivot_table,
            foreign_pivot_key,
            related_pivot_key,
        } => format!("{pivot_table} ({foreign_pivot_key}, {related_pivot_key})"),
        ResolvedKeys::Through {
            through_entity,
            first_key,
            second_key,
        } => {
            let keys = [first_key, second_key]
                .into_iter()
                .flatten()
                .map(String::as_str)
                .collect::<Vec<_>>();
            if keys.is_empty() {
                format!("via {through_entity}")
            } else {
                format!("via {through_entity} ({})", keys.join(", "))
            }
        }
        ResolvedKeys::Morph {
            morph_name,
            morphable_type,
            morphable_id,
        } => format!("{morph_name} ({morphable_type}, {morphable_id})"),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use scaf_core::enums::RelationKind;
    use scaf_core::relationship::resolve_all;
    use scaf_core::schema::{RelationshipDeclaration, SchemaDescriptor, SchemaInput};

    use super::ResolveRow;

    #[test]
    fn rows_summarize_resolved_keys() {
        let descriptor = SchemaDescriptor::new(SchemaInput {
            entity_name: "Post".into(),
            relationships: vec![
                RelationshipDeclaration::of_kind(RelationKind::BelongsTo, "User"),
                RelationshipDeclaration::of_kind(RelationKind::BelongsToMany, "Tag"),
                RelationshipDeclaration::of_kind(RelationKind::HasMany, "Comment"),
            ],
            ..SchemaInput::default()
        })
        .expect("descriptor should validate");

        let rows = resolve_all(&descriptor)
            .iter()
            .map(ResolveRow::from)
            .collect::<Vec<_>>();

        assert_eq!(rows[0].method, "user");
        assert_eq!(rows[0].keys, "user_id");
        assert_eq!(rows[1].kind, "belongsToMany");
        assert_eq!(rows[1].keys, "post_tag (post_id, tag_id)");
        assert_eq!(rows[2].method, "comment");
        assert_eq!(rows[2].keys, "-");
    }
}
