//! Packages.

use once_cell::unsync::OnceCell;
use smol_str::SmolStr;

use super::ids::{ClassId, PackageId};
use super::item::ItemData;

/// A package; the root package has the empty name.
#[derive(Debug)]
pub struct PackageItem {
    pub(crate) data: ItemData,
    pub(crate) qualified_name: SmolStr,
    pub(crate) containing_package: OnceCell<Option<PackageId>>,
    pub(crate) top_level_classes: Vec<ClassId>,
    pub(crate) emit: bool,
    /// Set once a declaration (package-info or docs) supplied the modifiers.
    pub(crate) declared: bool,
}

impl PackageItem {
    pub(crate) fn new(data: ItemData, qualified_name: SmolStr, emit: bool, declared: bool) -> Self {
        Self {
            data,
            qualified_name,
            containing_package: OnceCell::new(),
            top_level_classes: Vec::new(),
            emit,
            declared,
        }
    }

    pub fn data(&self) -> &ItemData {
        &self.data
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn is_root(&self) -> bool {
        self.qualified_name.is_empty()
    }

    /// Top-level classes in the order they were added.
    pub fn top_level_classes(&self) -> &[ClassId] {
        &self.top_level_classes
    }

    /// Whether the package appears in emitted output.
    pub fn emit(&self) -> bool {
        self.emit
    }

    pub fn is_declared(&self) -> bool {
        self.declared
    }
}

/// The name of the package containing `name`, `None` for the root.
pub fn containing_package_name(name: &str) -> Option<&str> {
    if name.is_empty() {
        return None;
    }
    Some(name.rfind('.').map_or("", |pos| &name[..pos]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_containing_package_name() {
        assert_eq!(containing_package_name("a.b.c"), Some("a.b"));
        assert_eq!(containing_package_name("a"), Some(""));
        assert_eq!(containing_package_name(""), None);
    }
}
