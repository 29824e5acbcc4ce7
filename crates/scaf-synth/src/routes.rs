//! Resource route registration.

use scaf_core::schema::SchemaDescriptor;

/// `Route::resource('posts', App\Http\Controllers\PostController::class);`
#[must_use]
pub fn statement(descriptor: &SchemaDescriptor, controllers_namespace: &str) -> String {
    format!(
        "Route::resource('{}', {controllers_namespace}\\{}Controller::class);",
        descriptor.route_segment(),
        descriptor.entity_name()
    )
}

/// Text to append to the routes file, or `None` when the statement is
/// already registered.
#[must_use]
pub fn append_text(existing: Option<&str>, statement: &str) -> Option<String> {
    match existing {
        Some(content) if content.contains(statement) => None,
        _ => Some(format!("\n{statement}")),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use scaf_core::schema::SchemaInput;

    use super::*;

    fn descriptor(name: &str) -> SchemaDescriptor {
        SchemaDescriptor::new(SchemaInput {
            entity_name: name.into(),
            ..SchemaInput::default()
        })
        .expect("descriptor should validate")
    }

    #[test]
    fn statement_names_segment_and_controller() {
        assert_eq!(
            statement(&descriptor("Category"), r"App\Http\Controllers"),
            r"Route::resource('categories', App\Http\Controllers\CategoryController::class);"
        );
    }

    #[test]
    fn append_skips_existing_registration() {
        let stmt = statement(&descriptor("Post"), r"App\Http\Controllers");
        let existing = format!("<?php\n\n{stmt}\n");
        assert_eq!(append_text(Some(&existing), &stmt), None);
        assert_eq!(
            append_text(Some("<?php\n"), &stmt),
            Some(format!("\n{stmt}"))
        );
        assert_eq!(append_text(None, &stmt), Some(format!("\n{stmt}")));
    }
}
