//! Explicit and implicit deprecation.
//!
//! Explicit deprecation belongs to the item (modifiers or doc comment) and
//! travels with duplicates. Implicit deprecation comes from the enclosing
//! classes and callables and is always recomputed from the item's current
//! container.

use super::codebase::Codebase;
use super::ids::ItemId;

impl Codebase {
    pub fn is_explicitly_deprecated(&self, id: ItemId) -> bool {
        self.item_data(id).is_explicitly_deprecated()
    }

    /// Deprecated because something enclosing it is. Packages do not pass
    /// deprecation on to their classes.
    pub fn is_implicitly_deprecated(&self, id: ItemId) -> bool {
        let mut current = self.parent(id);
        while let Some(parent) = current {
            if matches!(parent, ItemId::Package(_)) {
                return false;
            }
            if self.is_explicitly_deprecated(parent) {
                return true;
            }
            current = self.parent(parent);
        }
        false
    }

    pub fn is_deprecated(&self, id: ItemId) -> bool {
        self.is_explicitly_deprecated(id) || self.is_implicitly_deprecated(id)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::CodebaseConfig;
    use crate::model::{ClassContainer, ClassKind, ClassOrigin, Codebase, ItemDetails, ItemId, TypeItem};

    #[test]
    fn test_nested_class_inherits_deprecation() {
        let mut codebase = Codebase::new(CodebaseConfig::default());
        let mut factory = codebase.factory();
        let pkg = factory.find_or_create_package("p", None).unwrap();
        let outer = factory
            .create_class_item(
                ClassContainer::Package(pkg),
                "Outer",
                ClassKind::Class,
                ClassOrigin::CommandLine,
                ItemDetails::public().with_documentation("/** @deprecated use Other */"),
            )
            .unwrap();
        let inner = factory
            .create_class_item(ClassContainer::Class(outer), "Inner", ClassKind::Class, ClassOrigin::CommandLine, ItemDetails::public())
            .unwrap();
        let field = factory.create_field_item(inner, "X", TypeItem::string(), false, None, ItemDetails::public());

        assert!(codebase.is_explicitly_deprecated(ItemId::Class(outer)));
        assert!(!codebase.is_explicitly_deprecated(ItemId::Class(inner)));
        assert!(codebase.is_implicitly_deprecated(ItemId::Class(inner)));
        assert!(codebase.is_deprecated(ItemId::Field(field)));
        assert!(!codebase.is_deprecated(ItemId::Package(pkg)));
    }
}
