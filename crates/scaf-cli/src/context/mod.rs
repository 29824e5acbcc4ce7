mod project_root;

use std::path::PathBuf;

use scaf_config::ScafConfig;

pub use project_root::find_project_root;

/// Everything a command needs after startup.
#[derive(Debug)]
pub struct AppContext {
    pub project_root: PathBuf,
    pub config: ScafConfig,
}

impl AppContext {
    #[must_use]
    pub const fn new(project_root: PathBuf, config: ScafConfig) -> Self {
        Self {
            project_root,
            config,
        }
    }
}
