use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::{Sink, SinkError, latest_match};

/// Sink rooted at a project directory.
#[derive(Debug, Clone)]
pub struct FsSink {
    root: PathBuf,
}

impl FsSink {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    fn ensure_parent(full: &Path) -> Result<(), SinkError> {
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).map_err(|e| SinkError::io(parent, e))?;
        }
        Ok(())
    }
}

impl Sink for FsSink {
    fn read(&self, path: &Path) -> Result<String, SinkError> {
        let full = self.resolve(path);
        match fs::read_to_string(&full) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(SinkError::NotFound(path.to_path_buf()))
            }
            Err(e) => Err(SinkError::io(full, e)),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).is_file()
    }

    fn write(&mut self, path: &Path, content: &str) -> Result<(), SinkError> {
        let full = self.resolve(path);
        Self::ensure_parent(&full)?;
        fs::write(&full, content).map_err(|e| SinkError::io(&full, e))?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "wrote artifact");
        Ok(())
    }

    fn append(&mut self, path: &Path, content: &str) -> Result<(), SinkError> {
        let full = self.resolve(path);
        Self::ensure_parent(&full)?;
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&full)
            .map_err(|e| SinkError::io(&full, e))?;
        file.write_all(content.as_bytes())
            .map_err(|e| SinkError::io(&full, e))?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "appended to artifact");
        Ok(())
    }

    fn find_migration(&self, dir: &Path, name_hint: &str) -> Result<Option<PathBuf>, SinkError> {
        let full = self.resolve(dir);
        if !full.is_dir() {
            return Ok(None);
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&full).map_err(|e| SinkError::io(&full, e))? {
            let entry = entry.map_err(|e| SinkError::io(&full, e))?;
            if entry.path().is_file() {
                names.push(entry.file_name().to_string_lossy().to_string());
            }
        }

        Ok(latest_match(names.iter().map(String::as_str), name_hint).map(|name| dir.join(name)))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn write_creates_parent_directories() {
        let temp = TempDir::new().expect("tempdir should create");
        let mut sink = FsSink::new(temp.path());
        let path = Path::new("app/Models/Post.php");

        sink.write(path, "<?php").expect("write should succeed");

        assert!(sink.exists(path));
        assert_eq!(sink.read(path).expect("read should succeed"), "<?php");
    }

    #[test]
    fn read_missing_is_not_found() {
        let temp = TempDir::new().expect("tempdir should create");
        let sink = FsSink::new(temp.path());

        let err = sink.read(Path::new("routes/web.php")).unwrap_err();
        assert!(matches!(err, SinkError::NotFound(_)));
        assert!(
            sink.read_optional(Path::new("routes/web.php"))
                .expect("optional read should succeed")
                .is_none()
        );
    }

    #[test]
    fn append_extends_existing_file() {
        let temp = TempDir::new().expect("tempdir should create");
        let mut sink = FsSink::new(temp.path());
        let path = Path::new("routes/web.php");

        sink.write(path, "<?php\n").expect("write should succeed");
        sink.append(path, "Route::get('/');\n")
            .expect("append should succeed");

        assert_eq!(
            sink.read(path).expect("read should succeed"),
            "<?php\nRoute::get('/');\n"
        );
    }

    #[test]
    fn find_migration_picks_latest_timestamp() {
        let temp = TempDir::new().expect("tempdir should create");
        let mut sink = FsSink::new(temp.path());
        let dir = Path::new("database/migrations");
        for name in [
            "2024_01_01_000000_create_posts_table.php",
            "2024_03_01_000000_create_posts_table.php",
            "2024_05_01_000000_create_tags_table.php",
        ] {
            sink.write(&dir.join(name), "").expect("write should succeed");
        }

        let found = sink
            .find_migration(dir, "create_posts_table")
            .expect("lookup should succeed");
        assert_eq!(
            found,
            Some(dir.join("2024_03_01_000000_create_posts_table.php"))
        );
    }

    #[test]
    fn find_migration_without_directory_is_none() {
        let temp = TempDir::new().expect("tempdir should create");
        let sink = FsSink::new(temp.path());
        let found = sink
            .find_migration(Path::new("database/migrations"), "create_posts_table")
            .expect("lookup should succeed");
        assert!(found.is_none());
    }
}
