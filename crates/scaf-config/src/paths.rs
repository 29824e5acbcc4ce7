//! Where artifacts live inside the target project.

use serde::{Deserialize, Serialize};

/// Project-relative locations of generated artifacts. Defaults follow the
/// standard Laravel layout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PathsConfig {
    pub models_dir: String,
    pub repositories_dir: String,
    pub controllers_dir: String,
    /// Each entity gets its own sub-directory for its Blade templates.
    pub views_dir: String,
    /// Shared navigation layout that every entity is merged into.
    pub layout_file: String,
    pub routes_file: String,
    pub migrations_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            models_dir: "app/Models".to_string(),
            repositories_dir: "app/Repositories".to_string(),
            controllers_dir: "app/Http/Controllers".to_string(),
            views_dir: "resources/views".to_string(),
            layout_file: "resources/views/layouts/app.blade.php".to_string(),
            routes_file: "routes/web.php".to_string(),
            migrations_dir: "database/migrations".to_string(),
        }
    }
}

impl PathsConfig {
    pub(crate) fn entries(&self) -> [(&'static str, &str); 7] {
        [
            ("paths.models_dir", &self.models_dir),
            ("paths.repositories_dir", &self.repositories_dir),
            ("paths.controllers_dir", &self.controllers_dir),
            ("paths.views_dir", &self.views_dir),
            ("paths.layout_file", &self.layout_file),
            ("paths.routes_file", &self.routes_file),
            ("paths.migrations_dir", &self.migrations_dir),
        ]
    }
}

/// PHP namespaces the generated classes are declared in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NamespaceConfig {
    pub models: String,
    pub repositories: String,
    pub controllers: String,
}

impl Default for NamespaceConfig {
    fn default() -> Self {
        Self {
            models: r"App\Models".to_string(),
            repositories: r"App\Repositories".to_string(),
            controllers: r"App\Http\Controllers".to_string(),
        }
    }
}
