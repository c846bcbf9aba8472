//! Handles for the files a codebase was loaded from.

use std::fmt;

/// Identifies one input of a codebase: a `.java`/`.kt` source, a class file
/// inside a jar, or a signature text file.
///
/// Ids are handed out by [`SourceRoot`](crate::model::SourceRoot) in
/// registration order, so an id is only meaningful for the codebase that
/// minted it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct FileId(u32);

impl FileId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Registration index of the file.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file#{}", self.0)
    }
}

/// Shown in messages when the owning [`SourceRoot`](crate::model::SourceRoot)
/// no longer knows the path.
impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<file #{}>", self.0)
    }
}
