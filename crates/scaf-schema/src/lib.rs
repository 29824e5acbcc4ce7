//! # scaf-schema
//!
//! JSON Schemas for everything `scaf` reads or prints.
//!
//! Types are defined in `scaf-core` with `#[derive(JsonSchema)]`; this crate
//! collects them into a [`SchemaRegistry`] used to validate descriptor files
//! before they are deserialized, and to export schemas (`scaf schema`) for
//! editors and other tooling.

mod error;
mod registry;

pub use error::SchemaError;
pub use registry::{DESCRIPTOR_SCHEMA, SchemaRegistry};
