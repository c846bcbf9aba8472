//! Foundation types for the API surface model.
//!
//! This module provides the primitives every item carries:
//! - [`FileId`] - Handle for a source file, class file or signature file
//! - [`LineCol`] - Line/column inside that file
//! - [`FileLocation`] - Where an item was declared
//!
//! This module has NO dependencies on other surface modules.

mod file_id;
mod location;

pub use file_id::FileId;
pub use location::{FileLocation, LineCol};
