use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::{Sink, SinkError, latest_match};

/// Read-through sink that captures writes instead of persisting them.
///
/// Reads see captured content first, then the wrapped sink, so a whole
/// generation run behaves exactly as it would against the real project.
#[derive(Debug)]
pub struct PreviewSink<'a, S: Sink> {
    inner: &'a S,
    captured: BTreeMap<PathBuf, String>,
}

impl<'a, S: Sink> PreviewSink<'a, S> {
    #[must_use]
    pub const fn new(inner: &'a S) -> Self {
        Self {
            inner,
            captured: BTreeMap::new(),
        }
    }

    /// Artifacts the run would have written, with their final content.
    #[must_use]
    pub const fn captured(&self) -> &BTreeMap<PathBuf, String> {
        &self.captured
    }
}

impl<S: Sink> Sink for PreviewSink<'_, S> {
    fn read(&self, path: &Path) -> Result<String, SinkError> {
        match self.captured.get(path) {
            Some(content) => Ok(content.clone()),
            None => self.inner.read(path),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        self.captured.contains_key(path) || self.inner.exists(path)
    }

    fn write(&mut self, path: &Path, content: &str) -> Result<(), SinkError> {
        self.captured.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn append(&mut self, path: &Path, content: &str) -> Result<(), SinkError> {
        let mut existing = self.read_optional(path)?.unwrap_or_default();
        existing.push_str(content);
        self.captured.insert(path.to_path_buf(), existing);
        Ok(())
    }

    fn find_migration(&self, dir: &Path, name_hint: &str) -> Result<Option<PathBuf>, SinkError> {
        let from_inner = self.inner.find_migration(dir, name_hint)?;
        let inner_name = from_inner
            .as_deref()
            .and_then(Path::file_name)
            .and_then(|name| name.to_str());

        let captured_names = self.captured.keys().filter_map(|path| {
            if path.parent() == Some(dir) {
                path.file_name().and_then(|name| name.to_str())
            } else {
                None
            }
        });

        Ok(latest_match(captured_names.chain(inner_name), name_hint).map(|name| dir.join(name)))
    }
}
