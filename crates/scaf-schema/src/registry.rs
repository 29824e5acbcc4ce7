use std::collections::HashMap;

use schemars::schema_for;
use scaf_core::responses::{GenerationReport, ResolveResponse};
use scaf_core::schema::SchemaInput;

use crate::error::SchemaError;

/// Name of the schema that descriptor files are validated against.
pub const DESCRIPTOR_SCHEMA: &str = "schema_input";

/// Named JSON Schemas for descriptor input and CLI output.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

/// `schemars` output is plain JSON, so the conversion cannot fail.
macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert(
            $name,
            serde_json::to_value(schema_for!($ty)).unwrap_or_default(),
        );
    };
}

impl SchemaRegistry {
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        register!(schemas, DESCRIPTOR_SCHEMA, SchemaInput);
        register!(schemas, "generation_report", GenerationReport);
        register!(schemas, "resolve_response", ResolveResponse);

        Self { schemas }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate `instance` against the schema registered as `name`.
    ///
    /// # Errors
    ///
    /// [`SchemaError::NotFound`] for an unknown name,
    /// [`SchemaError::ValidationFailed`] with every violation otherwise.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| {
                let location = e.instance_path.to_string();
                if location.is_empty() {
                    format!("{e}")
                } else {
                    format!("{location}: {e}")
                }
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn registers_input_and_output_schemas() {
        let registry = SchemaRegistry::new();
        assert_eq!(registry.schema_count(), 3);
        assert_eq!(
            registry.list(),
            vec!["generation_report", "resolve_response", "schema_input"]
        );
    }

    #[test]
    fn unknown_schema_is_not_found() {
        let registry = SchemaRegistry::new();
        let err = registry.validate("nope", &json!({})).unwrap_err();
        assert!(matches!(err, SchemaError::NotFound(name) if name == "nope"));
    }

    #[test]
    fn schemas_are_objects() {
        let registry = SchemaRegistry::new();
        for name in registry.list() {
            let schema = registry.get(name).expect("listed schema exists");
            assert!(schema.is_object(), "{name} should be a JSON object");
        }
    }
}
