//! Resource controller wired to the entity repository.

use std::fmt::Write as _;

use scaf_core::enums::InputKind;
use scaf_core::relationship::ResolvedRelationship;
use scaf_core::schema::SchemaDescriptor;

use crate::{php, repository};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerPlan {
    pub namespace: String,
    pub entity: String,
    pub class_name: String,
    /// Fully qualified repository class.
    pub repository: String,
    pub repository_class: String,
    pub route_segment: String,
    /// Relations loaded with every listing and lookup.
    pub eager_load: Vec<String>,
    /// Attribute the `search` query parameter filters on.
    pub search_attribute: Option<String>,
}

#[must_use]
pub fn plan(
    descriptor: &SchemaDescriptor,
    relationships: &[ResolvedRelationship],
    namespace: &str,
    repositories_namespace: &str,
) -> ControllerPlan {
    let repository_class = repository::class_name(descriptor);
    ControllerPlan {
        namespace: namespace.to_string(),
        entity: descriptor.entity_name().to_string(),
        class_name: format!("{}Controller", descriptor.entity_name()),
        repository: format!("{repositories_namespace}\\{repository_class}"),
        repository_class,
        route_segment: descriptor.route_segment(),
        eager_load: eager_load(relationships),
        search_attribute: search_attribute(descriptor),
    }
}

/// Relation names to eager-load: the accessor names, in declaration order.
#[must_use]
pub fn eager_load(relationships: &[ResolvedRelationship]) -> Vec<String> {
    relationships
        .iter()
        .map(|relationship| relationship.method_name.clone())
        .collect()
}

/// `name` when declared, else the first text attribute.
#[must_use]
pub fn search_attribute(descriptor: &SchemaDescriptor) -> Option<String> {
    let attributes = descriptor.attributes();
    attributes
        .iter()
        .find(|attr| attr.name == "name")
        .or_else(|| {
            attributes
                .iter()
                .find(|attr| attr.input_kind == InputKind::Text)
        })
        .map(|attr| attr.name.clone())
}

#[must_use]
pub fn render(plan: &ControllerPlan) -> String {
    let relations = php::string_array(&plan.eager_load);
    let segment = &plan.route_segment;
    let entity = &plan.entity;
    let redirect = |verb: &str| {
        format!(
            "return redirect()->route('{segment}.index')->with('success', '{entity} {verb} successfully.');"
        )
    };

    let mut out = format!("<?php\n\nnamespace {};\n\n", plan.namespace);
    let _ = writeln!(out, "use {};", plan.repository);
    out.push_str("use Illuminate\\Http\\Request;\n");
    if plan.search_attribute.is_some() {
        out.push_str("use Illuminate\\Support\\Str;\n");
    }

    let _ = write!(
        out,
        "
class {class} extends Controller
{{
    protected $repository;

    public function __construct({repository} $repository)
    {{
        $this->repository = $repository;
    }}

    public function index(Request $request)
    {{
        $items = $this->repository->all({relations});
",
        class = plan.class_name,
        repository = plan.repository_class,
    );

    if let Some(attribute) = &plan.search_attribute {
        let _ = write!(
            out,
            "
        if ($request->has('search')) {{
            $search = (string) $request->input('search');
            $items = $items->filter(
                fn ($item) => Str::contains(Str::lower((string) $item->{attribute}), Str::lower($search))
            );
        }}
"
        );
    }

    let _ = write!(
        out,
        "
        return view('{segment}.index', compact('items'));
    }}

    public function create()
    {{
        return view('{segment}.create');
    }}

    public function store(Request $request)
    {{
        $this->repository->create($request->all());

        {created}
    }}

    public function show($id)
    {{
        $item = $this->repository->find($id, {relations});

        return view('{segment}.show', compact('item'));
    }}

    public function edit($id)
    {{
        $item = $this->repository->find($id, {relations});

        return view('{segment}.edit', compact('item'));
    }}

    public function update(Request $request, $id)
    {{
        $this->repository->update($id, $request->all());

        {updated}
    }}

    public function destroy($id)
    {{
        $this->repository->delete($id);

        {deleted}
    }}
}}
",
        created = redirect("created"),
        updated = redirect("updated"),
        deleted = redirect("deleted"),
    );

    out
}

#[cfg(test)]
mod tests {
    use scaf_core::enums::RelationKind;
    use scaf_core::relationship::resolve_all;
    use scaf_core::schema::{AttributeDescriptor, RelationshipDeclaration, SchemaInput};

    use super::*;

    fn descriptor(attributes: Vec<AttributeDescriptor>) -> SchemaDescriptor {
        SchemaDescriptor::new(SchemaInput {
            entity_name: "Post".into(),
            attributes,
            relationships: vec![
                RelationshipDeclaration::of_kind(RelationKind::BelongsTo, "User"),
                RelationshipDeclaration::of_kind(RelationKind::BelongsToMany, "Tag"),
            ],
            ..SchemaInput::default()
        })
        .expect("descriptor should validate")
    }

    fn render_for(descriptor: &SchemaDescriptor) -> String {
        let resolved = resolve_all(descriptor);
        render(&plan(
            descriptor,
            &resolved,
            r"App\Http\Controllers",
            r"App\Repositories",
        ))
    }

    #[test]
    fn eager_load_uses_resolved_method_names() {
        let descriptor = descriptor(vec![]);
        let rendered = render_for(&descriptor);
        assert!(rendered.contains("$items = $this->repository->all(['user', 'tag']);"));
        assert!(rendered.contains("$item = $this->repository->find($id, ['user', 'tag']);"));
    }

    #[test]
    fn search_prefers_name_attribute() {
        let descriptor = descriptor(vec![
            AttributeDescriptor::new("title", InputKind::Text),
            AttributeDescriptor::new("name", InputKind::Text),
        ]);
        assert_eq!(search_attribute(&descriptor).as_deref(), Some("name"));
        let rendered = render_for(&descriptor);
        assert!(rendered.contains("Str::lower((string) $item->name)"));
        assert!(rendered.contains("use Illuminate\\Support\\Str;"));
    }

    #[test]
    fn search_falls_back_to_first_text_attribute() {
        let descriptor = descriptor(vec![
            AttributeDescriptor::new("views", InputKind::Number),
            AttributeDescriptor::new("title", InputKind::Text),
        ]);
        assert_eq!(search_attribute(&descriptor).as_deref(), Some("title"));
    }

    #[test]
    fn search_is_omitted_without_candidates() {
        let descriptor = descriptor(vec![AttributeDescriptor::new("views", InputKind::Number)]);
        let rendered = render_for(&descriptor);
        assert!(!rendered.contains("search"));
        assert!(!rendered.contains("Str::"));
    }

    #[test]
    fn actions_and_redirects() {
        let rendered = render_for(&descriptor(vec![]));
        assert!(rendered.contains("use App\\Repositories\\PostRepository;"));
        assert!(rendered.contains("class PostController extends Controller"));
        for action in ["index", "create", "store", "show", "edit", "update", "destroy"] {
            assert!(
                rendered.contains(&format!("public function {action}(")),
                "missing {action}"
            );
        }
        assert!(rendered.contains("return view('posts.index', compact('items'));"));
        assert!(rendered.contains(
            "return redirect()->route('posts.index')->with('success', 'Post created successfully.');"
        ));
        assert!(rendered.contains("'Post deleted successfully.'"));
    }
}
