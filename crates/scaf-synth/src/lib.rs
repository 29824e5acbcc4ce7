//! # scaf-synth
//!
//! Artifact synthesis for a Laravel CRUD feature.
//!
//! Every artifact is built in two steps: a plan (plain data: fields,
//! accessors, column statements) derived from the
//! [`SchemaDescriptor`](scaf_core::schema::SchemaDescriptor) and its resolved
//! relationships, then a render of that plan to text. Artifacts that must
//! coexist with hand-written code are edited at located anchors instead of
//! regenerated:
//! - [`migration::splice`] replaces only the `Schema::create` block
//! - [`layout::merge`] inserts a menu entry before the sidebar's closing tag
//! - [`routes::append_text`] appends a resource route once
//!
//! [`Generator`] drives a full run against any [`Sink`](scaf_sink::Sink).

pub mod controller;
mod error;
pub mod generator;
pub mod layout;
pub mod migration;
pub mod model;
mod php;
pub mod repository;
pub mod routes;
pub mod views;

pub use error::SynthError;
pub use generator::{GenerateOptions, Generator};
