use std::path::{Path, PathBuf};

/// Laravel's console entry point, present at every project root.
const ARTISAN: &str = "artisan";

/// Walk upwards from `start` until a directory holds `.scaf/` or `artisan`.
#[must_use]
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(scaf_config::PROJECT_DIR).is_dir() || current.join(ARTISAN).is_file() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::find_project_root;

    #[test]
    fn finds_scaf_dir_in_current_directory() {
        let temp = TempDir::new().expect("tempdir should create");
        std::fs::create_dir(temp.path().join(".scaf")).expect(".scaf should create");

        let found = find_project_root(temp.path());
        assert_eq!(found.as_deref(), Some(temp.path()));
    }

    #[test]
    fn finds_artisan_in_parent_directory() {
        let temp = TempDir::new().expect("tempdir should create");
        std::fs::write(temp.path().join("artisan"), "#!/usr/bin/env php\n")
            .expect("artisan should write");
        std::fs::create_dir_all(temp.path().join("app/Models")).expect("nested dirs should create");

        let found = find_project_root(&temp.path().join("app/Models"));
        assert_eq!(found.as_deref(), Some(temp.path()));
    }

    #[test]
    fn returns_none_when_not_found() {
        let temp = TempDir::new().expect("tempdir should create");
        std::fs::create_dir_all(temp.path().join("a/b/c")).expect("nested dirs should create");

        let found = find_project_root(&temp.path().join("a/b/c"));
        assert!(found.is_none());
    }
}
