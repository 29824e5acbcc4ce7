use std::path::Path;

use anyhow::{Context, bail};
use scaf_config::ScafConfig;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InitArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct InitResponse {
    config_path: String,
    overwritten: bool,
}

/// Handle `scaf init`.
pub fn handle(args: &InitArgs, project_root: &Path, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = write_default_config(project_root, args.force)?;
    output(&response, flags.format)
}

fn write_default_config(project_root: &Path, force: bool) -> anyhow::Result<InitResponse> {
    let path = ScafConfig::project_config_path(project_root);
    let exists = path.exists();
    if exists && !force {
        bail!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let toml = ScafConfig::default().to_toml()?;
    std::fs::write(&path, toml).with_context(|| format!("failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), "wrote default config");
    Ok(InitResponse {
        config_path: path.display().to_string(),
        overwritten: exists,
    })
}

#[cfg(test)]
mod tests {
    use scaf_config::ScafConfig;

    use super::write_default_config;

    #[test]
    fn writes_loadable_default_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let response = write_default_config(dir.path(), false).expect("init should succeed");
        assert!(!response.overwritten);

        let written = std::fs::read_to_string(ScafConfig::project_config_path(dir.path()))
            .expect("config written");
        let parsed: ScafConfig = toml::from_str(&written).expect("config parses");
        assert_eq!(parsed, ScafConfig::default());
    }

    #[test]
    fn existing_config_requires_force() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_default_config(dir.path(), false).expect("first init");

        let err = write_default_config(dir.path(), false).expect_err("second init");
        assert!(err.to_string().contains("--force"));

        let response = write_default_config(dir.path(), true).expect("forced init");
        assert!(response.overwritten);
    }
}
