//! Naming rules shared by every generated artifact.
//!
//! All artifacts derive class names, table names, route segments and key
//! names through these functions, so the same entity always yields the same
//! strings everywhere. Pluralization only covers regular English nouns.

use heck::{ToLowerCamelCase, ToSnakeCase};

/// `BlogPost` -> `blogPost`, `post_tag` -> `postTag`.
#[must_use]
pub fn camel_case(value: &str) -> String {
    value.to_lower_camel_case()
}

/// `BlogPost` -> `blog_post`.
#[must_use]
pub fn snake_case(value: &str) -> String {
    value.to_snake_case()
}

/// Upper-case the first character and leave the rest untouched.
#[must_use]
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `blog_post` -> `BlogPost`. Each `_`/`-` separated word gets a leading
/// capital; the rest of the word keeps its casing, so `BlogPost` and `URL`
/// come back unchanged.
#[must_use]
pub fn studly_case(value: &str) -> String {
    value
        .split(['_', '-'])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect()
}

/// Plural form of a regular English noun, preserving the stem's casing.
#[must_use]
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    let lower = word.to_ascii_lowercase();
    if lower.ends_with('y') && !ends_with_vowel_before_last(&lower) {
        return format!("{}ies", &word[..word.len() - 1]);
    }
    if ["s", "x", "z", "ch", "sh"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
    {
        return format!("{word}es");
    }
    format!("{word}s")
}

/// Singular form of a regular English plural, preserving the stem's casing.
#[must_use]
pub fn singularize(word: &str) -> String {
    let lower = word.to_ascii_lowercase();

    if lower.len() > 3 && lower.ends_with("ies") {
        return format!("{}y", &word[..word.len() - 3]);
    }
    let sibilant = ["sses", "xes", "zes", "ches", "shes"]
        .iter()
        .any(|suffix| lower.ends_with(suffix));
    if sibilant || (lower.ends_with("uses") && !lower.ends_with("ouses")) {
        return word[..word.len() - 2].to_string();
    }
    if lower.ends_with("ss") || lower.ends_with("us") || lower.len() <= 1 {
        return word.to_string();
    }
    match word.strip_suffix(|ch: char| ch.eq_ignore_ascii_case(&'s')) {
        Some(stem) => stem.to_string(),
        None => word.to_string(),
    }
}

/// `BlogPost` -> `blogposts`. Used for route names and view directories.
#[must_use]
pub fn lower_plural(value: &str) -> String {
    pluralize(value).to_lowercase()
}

/// `Categories` -> `category`.
#[must_use]
pub fn lower_singular(value: &str) -> String {
    singularize(value).to_lowercase()
}

/// Database table for an entity: `BlogPost` -> `blog_posts`.
#[must_use]
pub fn table_name(entity: &str) -> String {
    snake_case(&pluralize(entity))
}

/// Route and view segment for an entity: `BlogPost` -> `blogposts`.
#[must_use]
pub fn route_segment(entity: &str) -> String {
    lower_plural(entity)
}

/// Migration name for an entity's create-table migration.
#[must_use]
pub fn migration_name(entity: &str) -> String {
    format!("create_{}_table", table_name(entity))
}

/// Order two names byte-lexicographically, smallest first.
#[must_use]
pub fn ordered_pair<'a>(left: &'a str, right: &'a str) -> (&'a str, &'a str) {
    if left <= right {
        (left, right)
    } else {
        (right, left)
    }
}

fn ends_with_vowel_before_last(lower: &str) -> bool {
    let mut chars = lower.chars().rev();
    chars.next();
    chars
        .next()
        .is_some_and(|ch| matches!(ch, 'a' | 'e' | 'i' | 'o' | 'u'))
}
