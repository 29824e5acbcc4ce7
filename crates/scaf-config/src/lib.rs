//! # scaf-config
//!
//! Layered configuration for the scaffolding generator, built on figment.
//!
//! Sources, highest priority first:
//! 1. Environment variables (`SCAF_*` prefix, `__` separates sections)
//! 2. Project-level `<project>/.scaf/config.toml`
//! 3. User-level `~/.config/scaf/config.toml`
//! 4. Built-in defaults
//!
//! `SCAF_PATHS__MODELS_DIR` maps to `paths.models_dir`,
//! `SCAF_MIGRATION__STRICT` to `migration.strict`, and so on.
//!
//! ```no_run
//! use std::path::Path;
//! use scaf_config::ScafConfig;
//!
//! let config = ScafConfig::load_with_dotenv(Path::new(".")).expect("config");
//! println!("models go to {}", config.paths.models_dir);
//! ```

mod error;
mod general;
mod paths;

pub use error::ConfigError;
pub use general::{LayoutConfig, MigrationConfig};
pub use paths::{NamespaceConfig, PathsConfig};

use std::path::{Component, Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Directory inside a project that holds scaf state.
pub const PROJECT_DIR: &str = ".scaf";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScafConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub namespaces: NamespaceConfig,
    #[serde(default)]
    pub migration: MigrationConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
}

impl ScafConfig {
    /// Load from TOML files and environment variables, then validate.
    ///
    /// Does not read `.env`; see [`Self::load_with_dotenv`].
    pub fn load(project_root: &Path) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(project_root).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`Self::load`], but first loads `<project>/.env` when present.
    /// Variables already set in the process environment win.
    pub fn load_with_dotenv(project_root: &Path) -> Result<Self, ConfigError> {
        let env_path = project_root.join(".env");
        if env_path.is_file() {
            let _ = dotenvy::from_path(&env_path);
        }
        Self::load(project_root)
    }

    /// Build the provider chain. Public so callers can layer extra providers.
    #[must_use]
    pub fn figment(project_root: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.is_file() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = Self::project_config_path(project_root);
        if local_path.is_file() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("SCAF_").split("__"))
    }

    /// User-global config file, if the platform has a config directory.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("scaf").join("config.toml"))
    }

    #[must_use]
    pub fn project_config_path(project_root: &Path) -> PathBuf {
        project_root.join(PROJECT_DIR).join("config.toml")
    }

    /// Reject values that would send artifacts outside the project or
    /// produce unparseable PHP.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in self.paths.entries() {
            validate_relative_path(field, value)?;
        }

        for (field, value) in [
            ("namespaces.models", &self.namespaces.models),
            ("namespaces.repositories", &self.namespaces.repositories),
            ("namespaces.controllers", &self.namespaces.controllers),
        ] {
            validate_namespace(field, value)?;
        }

        Ok(())
    }

    /// Render the effective configuration, as written by `scaf init`.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.into(),
    }
}

fn validate_relative_path(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(invalid(field, "must not be empty"));
    }
    let path = Path::new(value);
    if path.is_absolute() {
        return Err(invalid(field, "must be relative to the project root"));
    }
    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(invalid(field, "must not contain '..'"));
    }
    Ok(())
}

fn validate_namespace(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(invalid(field, "must not be empty"));
    }
    let valid_segment = |segment: &str| {
        let mut chars = segment.chars();
        chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    };
    if !value.split('\\').all(valid_segment) {
        return Err(invalid(
            field,
            format!("'{value}' is not a valid PHP namespace"),
        ));
    }
    Ok(())
}
