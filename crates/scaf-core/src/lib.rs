//! # scaf-core
//!
//! Core types for the scaf scaffolding generator.
//!
//! This crate provides the pieces every other scaf crate builds on:
//! - Naming rules (case conversion, pluralization, derived table and route names)
//! - Input enums (form input kinds, migration column types, relationship kinds)
//! - The Schema Descriptor and its structural validation
//! - The Relationship Model (accessor method names and default keys)
//! - Report types returned by the `scaf` CLI
//! - Error types

pub mod enums;
pub mod errors;
pub mod naming;
pub mod relationship;
pub mod responses;
pub mod schema;
