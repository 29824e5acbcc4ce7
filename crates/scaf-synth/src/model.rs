//! Eloquent model class.

use std::fmt::Write as _;

use scaf_core::enums::RelationKind;
use scaf_core::relationship::{ResolvedKeys, ResolvedRelationship};
use scaf_core::schema::{RelationDetail, SchemaDescriptor};

use crate::php;

/// One argument of a relationship call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallArgument {
    /// `Name::class`
    Class(String),
    /// `'value'`
    Literal(String),
}

impl CallArgument {
    fn render(&self) -> String {
        match self {
            Self::Class(name) => format!("{name}::class"),
            Self::Literal(value) => php::quote(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorPlan {
    pub method_name: String,
    /// Eloquent builder method, e.g. `belongsToMany`.
    pub call: &'static str,
    pub arguments: Vec<CallArgument>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelPlan {
    pub namespace: String,
    pub class_name: String,
    pub fillable: Vec<String>,
    pub accessors: Vec<AccessorPlan>,
}

#[must_use]
pub fn plan(
    descriptor: &SchemaDescriptor,
    relationships: &[ResolvedRelationship],
    namespace: &str,
) -> ModelPlan {
    ModelPlan {
        namespace: namespace.to_string(),
        class_name: descriptor.entity_name().to_string(),
        fillable: descriptor
            .attributes()
            .iter()
            .map(|attr| attr.name.clone())
            .collect(),
        accessors: relationships.iter().map(accessor).collect(),
    }
}

fn accessor(relationship: &ResolvedRelationship) -> AccessorPlan {
    let related = CallArgument::Class(relationship.related_entity().to_string());
    let arguments = match &relationship.keys {
        ResolvedKeys::None => vec![related],
        ResolvedKeys::BelongsTo { foreign_key } => {
            vec![related, CallArgument::Literal(foreign_key.clone())]
        }
        ResolvedKeys::BelongsToMany {
            pivot_table,
            foreign_pivot_key,
            related_pivot_key,
        } => vec![
            related,
            CallArgument::Literal(pivot_table.clone()),
            CallArgument::Literal(foreign_pivot_key.clone()),
            CallArgument::Literal(related_pivot_key.clone()),
        ],
        ResolvedKeys::Through {
            through_entity,
            first_key,
            second_key,
        } => {
            let mut args = vec![related, CallArgument::Class(through_entity.clone())];
            args.extend(first_key.iter().cloned().map(CallArgument::Literal));
            args.extend(second_key.iter().cloned().map(CallArgument::Literal));
            args
        }
        ResolvedKeys::Morph {
            morph_name,
            morphable_type,
            morphable_id,
        } => {
            let mut args = Vec::with_capacity(4);
            if relationship.kind() != RelationKind::MorphTo {
                args.push(related);
            }
            args.push(CallArgument::Literal(morph_name.clone()));
            // Eloquent derives the columns from the name unless both are given.
            if has_morph_override(&relationship.declaration.detail) {
                args.push(CallArgument::Literal(morphable_type.clone()));
                args.push(CallArgument::Literal(morphable_id.clone()));
            }
            args
        }
    };

    AccessorPlan {
        method_name: relationship.method_name.clone(),
        call: relationship.kind().as_str(),
        arguments,
    }
}

fn has_morph_override(detail: &RelationDetail) -> bool {
    let morph = match detail {
        RelationDetail::MorphOne(morph)
        | RelationDetail::MorphMany(morph)
        | RelationDetail::MorphTo(morph) => morph,
        _ => return false,
    };
    [&morph.morphable_type, &morph.morphable_id]
        .into_iter()
        .flatten()
        .any(|value| !value.trim().is_empty())
}

#[must_use]
pub fn render(plan: &ModelPlan) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<?php\n\nnamespace {};\n\n\
         use Illuminate\\Database\\Eloquent\\Factories\\HasFactory;\n\
         use Illuminate\\Database\\Eloquent\\Model;\n\n\
         class {} extends Model\n{{\n    use HasFactory;\n\n    protected $fillable = {};\n",
        plan.namespace,
        plan.class_name,
        php::string_array(&plan.fillable),
    );

    for accessor in &plan.accessors {
        let args = accessor
            .arguments
            .iter()
            .map(CallArgument::render)
            .collect::<Vec<_>>()
            .join(", ");
        let _ = write!(
            out,
            "\n    public function {}()\n    {{\n        return $this->{}({args});\n    }}\n",
            accessor.method_name, accessor.call,
        );
    }

    out.push_str("}\n");
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use scaf_core::enums::InputKind;
    use scaf_core::relationship::resolve_all;
    use scaf_core::schema::{
        AttributeDescriptor, MorphDetail, RelationshipDeclaration, SchemaInput, ThroughDetail,
    };

    use super::*;

    fn descriptor(relationships: Vec<RelationshipDeclaration>) -> SchemaDescriptor {
        SchemaDescriptor::new(SchemaInput {
            entity_name: "Post".into(),
            attributes: vec![
                AttributeDescriptor::new("title", InputKind::Text),
                AttributeDescriptor::new("body", InputKind::Textarea),
            ],
            relationships,
            ..SchemaInput::default()
        })
        .expect("descriptor should validate")
    }

    fn render_for(relationships: Vec<RelationshipDeclaration>) -> String {
        let descriptor = descriptor(relationships);
        let resolved = resolve_all(&descriptor);
        render(&plan(&descriptor, &resolved, r"App\Models"))
    }

    #[test]
    fn renders_class_without_relationships() {
        let expected = "<?php

namespace App\\Models;

use Illuminate\\Database\\Eloquent\\Factories\\HasFactory;
use Illuminate\\Database\\Eloquent\\Model;

class Post extends Model
{
    use HasFactory;

    protected $fillable = ['title', 'body'];
}
";
        assert_eq!(render_for(vec![]), expected);
    }

    #[test]
    fn renders_accessor_shapes() {
        let rendered = render_for(vec![
            RelationshipDeclaration::of_kind(RelationKind::BelongsTo, "User"),
            RelationshipDeclaration::of_kind(RelationKind::HasMany, "Comment"),
            RelationshipDeclaration::of_kind(RelationKind::BelongsToMany, "Tag"),
            RelationshipDeclaration::of_kind(RelationKind::MorphMany, "Image"),
            RelationshipDeclaration::of_kind(RelationKind::MorphTo, "Postable"),
            RelationshipDeclaration::new(
                "Country",
                RelationDetail::HasOneThrough(ThroughDetail {
                    through_entity: "User".into(),
                    first_key: Some("user_id".into()),
                    second_key: None,
                }),
            ),
        ]);

        assert!(rendered.contains(
            "    public function user()\n    {\n        return $this->belongsTo(User::class, 'user_id');\n    }\n"
        ));
        assert!(rendered.contains("return $this->hasMany(Comment::class);"));
        assert!(rendered.contains(
            "public function tag()\n    {\n        return $this->belongsToMany(Tag::class, 'post_tag', 'post_id', 'tag_id');"
        ));
        assert!(rendered.contains("public function image()"));
        assert!(rendered.contains("return $this->morphMany(Image::class, 'image');"));
        assert!(rendered.contains("return $this->morphTo('postable');"));
        assert!(
            rendered.contains("return $this->hasOneThrough(Country::class, User::class, 'user_id');")
        );
    }

    #[test]
    fn morph_overrides_reach_the_accessor() {
        let rendered = render_for(vec![
            RelationshipDeclaration::new(
                "Image",
                RelationDetail::MorphOne(MorphDetail {
                    morphable_type: Some("imageable_kind".into()),
                    morphable_id: None,
                }),
            ),
            RelationshipDeclaration::new(
                "Commentable",
                RelationDetail::MorphTo(MorphDetail {
                    morphable_type: Some("owner_type".into()),
                    morphable_id: Some("owner_id".into()),
                }),
            ),
            RelationshipDeclaration::new(
                "Video",
                RelationDetail::MorphMany(MorphDetail {
                    morphable_type: Some("  ".into()),
                    morphable_id: None,
                }),
            ),
        ]);

        assert!(rendered.contains(
            "return $this->morphOne(Image::class, 'image', 'imageable_kind', 'post_id');"
        ));
        assert!(rendered.contains(
            "return $this->morphTo('commentable', 'owner_type', 'owner_id');"
        ));
        assert!(rendered.contains("return $this->morphMany(Video::class, 'video');"));
    }

    #[test]
    fn custom_namespace_is_used() {
        let descriptor = descriptor(vec![]);
        let rendered = render(&plan(&descriptor, &[], r"Domain\Blog"));
        assert!(rendered.starts_with("<?php\n\nnamespace Domain\\Blog;\n"));
    }

    #[test]
    fn empty_attribute_list_renders_empty_array() {
        let descriptor = SchemaDescriptor::new(SchemaInput {
            entity_name: "Tag".into(),
            ..SchemaInput::default()
        })
        .expect("descriptor should validate");
        let rendered = render(&plan(&descriptor, &[], r"App\Models"));
        assert!(rendered.contains("protected $fillable = [];"));
    }
}
