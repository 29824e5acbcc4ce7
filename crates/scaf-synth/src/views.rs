//! Blade templates: listing, create form, edit form, and detail page.

use std::fmt::Write as _;

use scaf_core::enums::InputKind;
use scaf_core::naming;
use scaf_core::schema::SchemaDescriptor;

/// Which template of the view set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Index,
    Create,
    Edit,
    Show,
}

impl ViewKind {
    pub const ALL: [Self; 4] = [Self::Index, Self::Create, Self::Edit, Self::Show];

    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Index => "index.blade.php",
            Self::Create => "create.blade.php",
            Self::Edit => "edit.blade.php",
            Self::Show => "show.blade.php",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub kind: InputKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewPlan {
    pub route_segment: String,
    pub singular_title: String,
    pub plural_title: String,
    pub fields: Vec<FormField>,
}

#[must_use]
pub fn plan(descriptor: &SchemaDescriptor) -> ViewPlan {
    let entity = descriptor.entity_name();
    ViewPlan {
        route_segment: descriptor.route_segment(),
        singular_title: entity.to_string(),
        plural_title: naming::pluralize(entity),
        fields: descriptor
            .attributes()
            .iter()
            .map(|attr| FormField {
                name: attr.name.clone(),
                label: naming::capitalize(&attr.name),
                kind: attr.input_kind,
            })
            .collect(),
    }
}

#[must_use]
pub fn render(plan: &ViewPlan, kind: ViewKind) -> String {
    match kind {
        ViewKind::Index => render_index(plan),
        ViewKind::Create => render_form(plan, false),
        ViewKind::Edit => render_form(plan, true),
        ViewKind::Show => render_show(plan),
    }
}

const HEADER: &str = "@extends('layouts.app')\n\n@section('content')\n    <div class=\"container\">\n";
const FOOTER: &str = "    </div>\n@endsection\n";

fn render_index(plan: &ViewPlan) -> String {
    let segment = &plan.route_segment;
    let mut out = String::from(HEADER);
    let _ = write!(
        out,
        "        <h1>List of {}</h1>
        <a href=\"{{{{ route('{segment}.create') }}}}\" class=\"btn btn-primary\">Create New</a>
        <table class=\"table\">
            <thead>
                <tr>
",
        plan.plural_title
    );
    for field in &plan.fields {
        let _ = writeln!(out, "                    <th>{}</th>", field.label);
    }
    out.push_str(
        "                    <th>Actions</th>
                </tr>
            </thead>
            <tbody>
                @foreach($items as $item)
                    <tr>
",
    );
    for field in &plan.fields {
        let _ = writeln!(out, "                        <td>{{{{ $item->{} }}}}</td>", field.name);
    }
    let _ = write!(
        out,
        "                        <td>
                            <a href=\"{{{{ route('{segment}.show', $item->id) }}}}\" class=\"btn btn-info\">View</a>
                            <a href=\"{{{{ route('{segment}.edit', $item->id) }}}}\" class=\"btn btn-warning\">Edit</a>
                            <form action=\"{{{{ route('{segment}.destroy', $item->id) }}}}\" method=\"POST\" style=\"display:inline\">
                                @csrf
                                @method('DELETE')
                                <button type=\"submit\" class=\"btn btn-danger\">Delete</button>
                            </form>
                        </td>
                    </tr>
                @endforeach
            </tbody>
        </table>
"
    );
    out.push_str(FOOTER);
    out
}

fn render_form(plan: &ViewPlan, edit: bool) -> String {
    let segment = &plan.route_segment;
    let mut out = String::from(HEADER);
    if edit {
        let _ = write!(
            out,
            "        <h1>Edit {}</h1>
        <form action=\"{{{{ route('{segment}.update', $item->id) }}}}\" method=\"POST\">
            @csrf
            @method('PUT')
",
            plan.singular_title
        );
    } else {
        let _ = write!(
            out,
            "        <h1>Create {}</h1>
        <form action=\"{{{{ route('{segment}.store') }}}}\" method=\"POST\">
            @csrf
",
            plan.singular_title
        );
    }

    for field in &plan.fields {
        let _ = write!(
            out,
            "            <div class=\"form-group\">
                <label for=\"{name}\">{label}</label>
                {element}
            </div>
",
            name = field.name,
            label = field.label,
            element = field_element(field, edit),
        );
    }

    out.push_str(
        "            <button type=\"submit\" class=\"btn btn-primary\">Submit</button>
        </form>
",
    );
    out.push_str(FOOTER);
    out
}

/// Form control for one field. With `bind`, the current value of
/// `$item` is shown.
fn field_element(field: &FormField, bind: bool) -> String {
    let name = &field.name;
    let binding = format!("{{{{ $item->{name} }}}}");
    match field.kind {
        InputKind::Select => {
            let selected = if bind {
                format!(
                    "\n                    <option value=\"{binding}\" selected>{binding}</option>"
                )
            } else {
                String::new()
            };
            format!(
                "<select name=\"{name}\" id=\"{name}\" class=\"form-control\" required>
                    <option value=\"\">Select {label}</option>{selected}
                    <!-- Add options dynamically -->
                </select>",
                label = field.label,
            )
        }
        InputKind::Textarea => {
            let content = if bind { binding.as_str() } else { "" };
            format!(
                "<textarea name=\"{name}\" id=\"{name}\" class=\"form-control\" rows=\"4\" required>{content}</textarea>"
            )
        }
        InputKind::Text | InputKind::Number | InputKind::Password | InputKind::Tel => {
            let value = if bind {
                format!(" value=\"{binding}\"")
            } else {
                String::new()
            };
            format!(
                "<input type=\"{kind}\" name=\"{name}\" id=\"{name}\"{value} class=\"form-control\" required>",
                kind = field.kind.as_str(),
            )
        }
    }
}

fn render_show(plan: &ViewPlan) -> String {
    let mut out = String::from(HEADER);
    let _ = write!(
        out,
        "        <h1>{} Details</h1>
        <table class=\"table\">
            <tbody>
",
        plan.singular_title
    );
    for field in &plan.fields {
        let _ = write!(
            out,
            "                <tr>
                    <th>{}</th>
                    <td>{{{{ $item->{} }}}}</td>
                </tr>
",
            field.label, field.name
        );
    }
    out.push_str(
        "            </tbody>
        </table>
        <a href=\"{{ route('",
    );
    out.push_str(&plan.route_segment);
    out.push_str(".index') }}\" class=\"btn btn-secondary\">Back</a>\n");
    out.push_str(FOOTER);
    out
}
