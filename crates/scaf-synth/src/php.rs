//! Small helpers for emitting PHP literals.

/// Single-quoted PHP string literal.
pub(crate) fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// `['a', 'b']`, or `[]` for an empty list.
pub(crate) fn string_array<S: AsRef<str>>(values: &[S]) -> String {
    let items = values
        .iter()
        .map(|v| quote(v.as_ref()))
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{items}]")
}
