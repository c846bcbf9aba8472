//! Registry of the files a codebase was loaded from.

use std::sync::Arc;

use indexmap::IndexSet;

use crate::base::{FileId, FileLocation};

/// The set of all input files contributing items to a codebase.
///
/// Loaders register a path once and stamp the returned [`FileId`] on every
/// [`FileLocation`] they create; the model only resolves ids back to paths
/// when rendering messages.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceRoot {
    files: IndexSet<Arc<str>>,
}

impl SourceRoot {
    /// Create a new empty source root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a path, returning its id. Registering the same path twice
    /// returns the first id.
    pub fn add(&mut self, path: impl Into<Arc<str>>) -> FileId {
        let (index, _) = self.files.insert_full(path.into());
        FileId::new(index as u32)
    }

    /// Get the path for a file.
    pub fn path(&self, file: FileId) -> Option<&str> {
        self.files.get_index(file.index()).map(|s| s.as_ref())
    }

    /// Render a location as `path:line`, `path`, or `<unknown>`.
    pub fn display(&self, location: &FileLocation) -> String {
        let path = match location.file {
            Some(file) => self
                .path(file)
                .map(str::to_string)
                .unwrap_or_else(|| file.to_string()),
            None => return "<unknown>".to_string(),
        };
        match location.line {
            Some(line) => format!("{}:{}", path, line.line_one_indexed()),
            None => path,
        }
    }

    /// Iterate over all files.
    pub fn iter(&self) -> impl Iterator<Item = (FileId, &str)> + '_ {
        self.files
            .iter()
            .enumerate()
            .map(|(index, path)| (FileId::new(index as u32), path.as_ref()))
    }

    /// Get the number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if the source root is empty.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
