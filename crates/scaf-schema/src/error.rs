use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Schema not found: {0}")]
    NotFound(String),

    /// The value did not pass validation. One message per violation.
    #[error("Validation failed: {}", errors.join("; "))]
    ValidationFailed { errors: Vec<String> },

    /// A registered schema could not be compiled.
    #[error("Schema generation error: {0}")]
    Generation(String),
}
