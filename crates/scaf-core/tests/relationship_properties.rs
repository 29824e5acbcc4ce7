//! Cross-cutting properties of the Relationship Model.

use pretty_assertions::assert_eq;
use rstest::rstest;
use scaf_core::enums::RelationKind;
use scaf_core::naming;
use scaf_core::relationship::{ResolvedKeys, pivot_table, resolve, resolve_all};
use scaf_core::schema::{RelationshipDeclaration, SchemaDescriptor, SchemaInput};

const RELATED_NAMES: [&str; 5] = ["Tag", "BlogPost", "UserProfileImage", "Category", "X"];

#[rstest]
fn method_names_follow_kind_plurality(
    #[values(
        RelationKind::HasOne,
        RelationKind::HasMany,
        RelationKind::BelongsTo,
        RelationKind::BelongsToMany,
        RelationKind::HasOneThrough,
        RelationKind::HasManyThrough,
        RelationKind::MorphOne,
        RelationKind::MorphMany,
        RelationKind::MorphTo
    )]
    kind: RelationKind,
    #[values("Post", "Comment", "UserAccount")] entity: &str,
) {
    for related in RELATED_NAMES {
        let resolved = resolve(entity, &RelationshipDeclaration::of_kind(kind, related));
        let camel = naming::camel_case(related);
        let expected = if matches!(
            kind,
            RelationKind::HasMany
                | RelationKind::BelongsToMany
                | RelationKind::HasManyThrough
                | RelationKind::MorphMany
        ) {
            camel.to_lowercase()
        } else {
            camel
        };
        assert_eq!(resolved.method_name, expected, "{kind} {entity} -> {related}");
    }
}

#[rstest]
#[case("Post", "Tag")]
#[case("User", "Role")]
#[case("BlogPost", "Category")]
#[case("Alpha", "Alphabet")]
fn pivot_table_is_order_independent(#[case] left: &str, #[case] right: &str) {
    assert_eq!(pivot_table(left, right), pivot_table(right, left));
}

#[test]
fn post_belongs_to_many_tag_scenario() {
    let declaration = RelationshipDeclaration::of_kind(RelationKind::BelongsToMany, "Tag");
    let resolved = resolve("Post", &declaration);

    assert_eq!(resolved.method_name, "tag");
    assert_eq!(
        resolved.keys,
        ResolvedKeys::BelongsToMany {
            pivot_table: "post_tag".into(),
            foreign_pivot_key: "post_id".into(),
            related_pivot_key: "tag_id".into(),
        }
    );
}

#[test]
fn tag_side_gets_the_same_pivot() {
    let from_tag = resolve(
        "Tag",
        &RelationshipDeclaration::of_kind(RelationKind::BelongsToMany, "Post"),
    );
    let ResolvedKeys::BelongsToMany { pivot_table, .. } = from_tag.keys else {
        panic!("expected belongsToMany keys");
    };
    assert_eq!(pivot_table, "post_tag");
}

#[test]
fn comment_morph_to_scenario() {
    let resolved = resolve(
        "Comment",
        &RelationshipDeclaration::of_kind(RelationKind::MorphTo, "Commentable"),
    );

    let ResolvedKeys::Morph {
        morphable_type,
        morphable_id,
        morph_name,
    } = resolved.keys
    else {
        panic!("expected morph keys");
    };
    assert_eq!(morphable_type, "comment_type");
    assert_eq!(morphable_id, "comment_id");
    assert_eq!(morph_name, "commentable");
}

#[test]
fn resolve_all_keeps_declaration_order() {
    let descriptor = SchemaDescriptor::new(SchemaInput {
        entity_name: "Post".into(),
        relationships: vec![
            RelationshipDeclaration::of_kind(RelationKind::BelongsTo, "User"),
            RelationshipDeclaration::of_kind(RelationKind::HasMany, "Comment"),
            RelationshipDeclaration::of_kind(RelationKind::BelongsToMany, "Tag"),
        ],
        ..SchemaInput::default()
    })
    .expect("descriptor should validate");

    let methods: Vec<_> = resolve_all(&descriptor)
        .into_iter()
        .map(|r| r.method_name)
        .collect();
    assert_eq!(methods, vec!["user", "comment", "tag"]);
}
