use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::{Sink, SinkError, latest_match};

/// Sink that keeps every artifact in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    files: BTreeMap<PathBuf, String>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an artifact, e.g. a pre-existing migration or layout.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    #[must_use]
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub(crate) fn files_in<'a>(&'a self, dir: &'a Path) -> impl Iterator<Item = &'a str> + 'a {
        self.files.keys().filter_map(move |path| {
            if path.parent() == Some(dir) {
                path.file_name().and_then(|name| name.to_str())
            } else {
                None
            }
        })
    }
}

impl Sink for MemorySink {
    fn read(&self, path: &Path) -> Result<String, SinkError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| SinkError::NotFound(path.to_path_buf()))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn write(&mut self, path: &Path, content: &str) -> Result<(), SinkError> {
        self.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn append(&mut self, path: &Path, content: &str) -> Result<(), SinkError> {
        self.files
            .entry(path.to_path_buf())
            .or_default()
            .push_str(content);
        Ok(())
    }

    fn find_migration(&self, dir: &Path, name_hint: &str) -> Result<Option<PathBuf>, SinkError> {
        Ok(latest_match(self.files_in(dir), name_hint).map(|name| dir.join(name)))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn append_creates_missing_file() {
        let mut sink = MemorySink::new();
        sink.append(Path::new("routes/web.php"), "a").unwrap();
        sink.append(Path::new("routes/web.php"), "b").unwrap();
        assert_eq!(sink.get("routes/web.php"), Some("ab"));
    }

    #[test]
    fn find_migration_ignores_other_directories() {
        let sink = MemorySink::new()
            .with_file("database/migrations/2024_01_01_000000_create_posts_table.php", "")
            .with_file("backup/2025_01_01_000000_create_posts_table.php", "");

        let found = sink
            .find_migration(Path::new("database/migrations"), "create_posts_table")
            .unwrap();
        assert_eq!(
            found,
            Some(PathBuf::from(
                "database/migrations/2024_01_01_000000_create_posts_table.php"
            ))
        );
    }
}
