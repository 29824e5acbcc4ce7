//! Error types raised while building a Schema Descriptor.
//!
//! Rendering and sink errors live in `scaf-synth` and `scaf-sink`; the CLI
//! converges all of them into `anyhow::Error`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// The descriptor is structurally invalid (empty or duplicate names).
    #[error("Malformed schema for '{entity}': {reason}")]
    MalformedSchema { entity: String, reason: String },
}

impl CoreError {
    pub(crate) fn malformed(entity: &str, reason: impl Into<String>) -> Self {
        Self::MalformedSchema {
            entity: entity.to_string(),
            reason: reason.into(),
        }
    }
}
