//! # scaf-sink
//!
//! Where generated artifacts go.
//!
//! The synthesis engine never touches the filesystem directly. It talks to a
//! [`Sink`], addressing artifacts by paths relative to the project root:
//! - [`FsSink`] writes into a project directory
//! - [`MemorySink`] keeps everything in a map (tests, previews)
//! - [`PreviewSink`] reads through to another sink and captures writes,
//!   which backs `scaf generate --dry-run`
//!
//! Sinks are used from a single thread; concurrent runs against the same
//! project must be serialized by the caller.

mod error;
mod fs;
mod memory;
mod preview;

use std::path::{Path, PathBuf};

pub use error::SinkError;
pub use fs::FsSink;
pub use memory::MemorySink;
pub use preview::PreviewSink;

/// Persistence capability consumed by the generator.
pub trait Sink {
    /// Read an artifact. Missing artifacts are [`SinkError::NotFound`].
    fn read(&self, path: &Path) -> Result<String, SinkError>;

    fn exists(&self, path: &Path) -> bool;

    /// Create or overwrite an artifact, creating parent directories.
    fn write(&mut self, path: &Path, content: &str) -> Result<(), SinkError>;

    /// Append to an artifact, creating it if missing.
    fn append(&mut self, path: &Path, content: &str) -> Result<(), SinkError>;

    /// Most recent artifact in `dir` whose file name contains `name_hint`.
    ///
    /// Migration file names start with a sortable timestamp, so the last
    /// match in lexical order is the most recently created one.
    fn find_migration(&self, dir: &Path, name_hint: &str) -> Result<Option<PathBuf>, SinkError>;

    /// [`Sink::read`] that maps a missing artifact to `None`.
    fn read_optional(&self, path: &Path) -> Result<Option<String>, SinkError> {
        match self.read(path) {
            Ok(content) => Ok(Some(content)),
            Err(SinkError::NotFound(_)) => Ok(None),
            Err(error) => Err(error),
        }
    }
}

/// Pick the lexically last file name containing `name_hint`.
pub(crate) fn latest_match<'a>(
    names: impl Iterator<Item = &'a str>,
    name_hint: &str,
) -> Option<&'a str> {
    names.filter(|name| name.contains(name_hint)).max()
}
