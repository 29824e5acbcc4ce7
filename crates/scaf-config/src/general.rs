//! Migration policy and layout cosmetics.

use serde::{Deserialize, Serialize};

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MigrationConfig {
    /// Fail the run when the existing migration has no create-table block.
    /// When false the migration is left untouched and a warning is logged.
    #[serde(default = "default_true")]
    pub strict: bool,

    /// Write a fresh create-table migration when none exists yet.
    #[serde(default = "default_true")]
    pub create_missing: bool,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            strict: true,
            create_missing: true,
        }
    }
}

/// Text used when a navigation layout has to be created from scratch, and
/// for the per-entity menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub title: String,
    pub brand: String,
    pub entry_icon: String,
    pub footer: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            title: "admin".to_string(),
            brand: "AdminLTE 3".to_string(),
            entry_icon: "nav-icon fas fa-cogs".to_string(),
            footer: "Anything you want".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let migration = MigrationConfig::default();
        assert!(migration.strict);
        assert!(migration.create_missing);

        let layout = LayoutConfig::default();
        assert_eq!(layout.title, "admin");
        assert_eq!(layout.entry_icon, "nav-icon fas fa-cogs");
    }
}
