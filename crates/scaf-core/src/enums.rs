//! Input kinds, migration column types, and relationship kinds.
//!
//! Serialized names match what the descriptor file uses and, for column
//! types and relationship kinds, the method names emitted into generated code.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// InputKind
// ---------------------------------------------------------------------------

/// Form element used for an attribute in the create/edit templates.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    #[default]
    Text,
    Number,
    Select,
    Textarea,
    Password,
    Tel,
}

impl InputKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Select => "select",
            Self::Textarea => "textarea",
            Self::Password => "password",
            Self::Tel => "tel",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SqlType
// ---------------------------------------------------------------------------

/// Column type of a migration column. `as_str` is the Blueprint method name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum SqlType {
    String,
    Integer,
    BigInteger,
    Boolean,
    Text,
    Date,
    Datetime,
    Float,
    Double,
    Decimal,
    Json,
    Jsonb,
}

impl SqlType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::BigInteger => "bigInteger",
            Self::Boolean => "boolean",
            Self::Text => "text",
            Self::Date => "date",
            Self::Datetime => "datetime",
            Self::Float => "float",
            Self::Double => "double",
            Self::Decimal => "decimal",
            Self::Json => "json",
            Self::Jsonb => "jsonb",
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RelationKind
// ---------------------------------------------------------------------------

/// Kind of an Eloquent relationship. `as_str` is the accessor call name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum RelationKind {
    HasOne,
    HasMany,
    BelongsTo,
    BelongsToMany,
    HasOneThrough,
    HasManyThrough,
    MorphOne,
    MorphMany,
    MorphTo,
}

impl RelationKind {
    pub const ALL: [Self; 9] = [
        Self::HasOne,
        Self::HasMany,
        Self::BelongsTo,
        Self::BelongsToMany,
        Self::HasOneThrough,
        Self::HasManyThrough,
        Self::MorphOne,
        Self::MorphMany,
        Self::MorphTo,
    ];

    /// Kinds whose accessor returns a collection. Their method names are
    /// fully lower-cased rather than camel-cased.
    #[must_use]
    pub const fn is_plural(self) -> bool {
        matches!(
            self,
            Self::HasMany | Self::BelongsToMany | Self::HasManyThrough | Self::MorphMany
        )
    }

    #[must_use]
    pub const fn is_morph(self) -> bool {
        matches!(self, Self::MorphOne | Self::MorphMany | Self::MorphTo)
    }

    #[must_use]
    pub const fn is_through(self) -> bool {
        matches!(self, Self::HasOneThrough | Self::HasManyThrough)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HasOne => "hasOne",
            Self::HasMany => "hasMany",
            Self::BelongsTo => "belongsTo",
            Self::BelongsToMany => "belongsToMany",
            Self::HasOneThrough => "hasOneThrough",
            Self::HasManyThrough => "hasManyThrough",
            Self::MorphOne => "morphOne",
            Self::MorphMany => "morphMany",
            Self::MorphTo => "morphTo",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
