//! Loading entity descriptor files.

use std::path::Path;

use anyhow::{Context, bail};
use scaf_core::schema::{SchemaDescriptor, SchemaInput};
use scaf_schema::{DESCRIPTOR_SCHEMA, SchemaRegistry};

/// Read a `.json` or `.toml` descriptor, check it against the descriptor
/// schema, and build a validated [`SchemaDescriptor`].
pub fn load(path: &Path) -> anyhow::Result<SchemaDescriptor> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read descriptor {}", path.display()))?;
    let value = parse(path, &raw)?;

    SchemaRegistry::new()
        .validate(DESCRIPTOR_SCHEMA, &value)
        .with_context(|| format!("invalid descriptor {}", path.display()))?;

    let input: SchemaInput = serde_json::from_value(value)
        .with_context(|| format!("invalid descriptor {}", path.display()))?;
    let descriptor = SchemaDescriptor::new(input)
        .with_context(|| format!("invalid descriptor {}", path.display()))?;

    tracing::debug!(
        path = %path.display(),
        entity = descriptor.entity_name(),
        "loaded descriptor"
    );
    Ok(descriptor)
}

fn parse(path: &Path, raw: &str) -> anyhow::Result<serde_json::Value> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("json") => serde_json::from_str(raw)
            .with_context(|| format!("failed to parse JSON in {}", path.display())),
        Some("toml") => toml::from_str::<serde_json::Value>(raw)
            .with_context(|| format!("failed to parse TOML in {}", path.display())),
        _ => bail!(
            "unsupported descriptor '{}': expected a .json or .toml file",
            path.display()
        ),
    }
}
