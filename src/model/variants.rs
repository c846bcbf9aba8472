//! Hidden, removed and doc-only state.
//!
//! Each flag is the item's own marking OR the effective flag of its parent
//! item (see [`Codebase::parent`]). Values are cached in the item's
//! [`ApiVariantSelectors`](super::ApiVariantSelectors) on first read; forcing
//! can later turn a flag on, never off.

use tracing::trace;

use super::codebase::Codebase;
use super::ids::ItemId;

impl Codebase {
    /// Hidden by its own doc comment (`@hide`, `@pending`) or by one of the
    /// configured hide annotations, ignoring containers.
    pub fn is_originally_hidden(&self, id: ItemId) -> bool {
        let data = self.item_data(id);
        data.selectors.originally_hidden(|| {
            data.documentation.is_hidden()
                || data
                    .modifiers
                    .annotations
                    .iter()
                    .any(|a| self.config().is_hide_annotation(&a.qualified_name))
        })
    }

    pub fn is_hidden(&self, id: ItemId) -> bool {
        self.item_data(id).selectors.hidden(|| {
            self.is_originally_hidden(id) || self.parent(id).is_some_and(|parent| self.is_hidden(parent))
        })
    }

    pub fn is_removed(&self, id: ItemId) -> bool {
        let data = self.item_data(id);
        data.selectors.removed(|| {
            data.documentation.is_removed() || self.parent(id).is_some_and(|parent| self.is_removed(parent))
        })
    }

    pub fn is_doc_only(&self, id: ItemId) -> bool {
        let data = self.item_data(id);
        data.selectors.doc_only(|| {
            data.documentation.is_doc_only() || self.parent(id).is_some_and(|parent| self.is_doc_only(parent))
        })
    }

    /// Force `id` and everything it contains hidden.
    pub fn hide(&self, id: ItemId) {
        trace!(item = ?id, "forcing hidden");
        self.for_each_descendant(id, &mut |codebase, item| codebase.item_data(item).selectors.force_hidden());
    }

    /// Force `id` and everything it contains removed.
    pub fn remove(&self, id: ItemId) {
        trace!(item = ?id, "forcing removed");
        self.for_each_descendant(id, &mut |codebase, item| codebase.item_data(item).selectors.force_removed());
    }

    fn for_each_descendant(&self, id: ItemId, action: &mut dyn FnMut(&Codebase, ItemId)) {
        action(self, id);
        for child in self.children(id) {
            self.for_each_descendant(child, action);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::CodebaseConfig;
    use crate::model::{
        AnnotationItem, ClassContainer, ClassKind, ClassOrigin, Codebase, ItemDetails, ItemId, ModifierList,
        PrimitiveKind, TypeItem,
    };

    #[test]
    fn test_hidden_propagates_from_class() {
        let mut codebase = Codebase::new(CodebaseConfig::default());
        let mut factory = codebase.factory();
        let pkg = factory.find_or_create_package("p", None).unwrap();
        let class = factory
            .create_class_item(
                ClassContainer::Package(pkg),
                "C",
                ClassKind::Class,
                ClassOrigin::CommandLine,
                ItemDetails::public().with_documentation("/** @hide */"),
            )
            .unwrap();
        let method = factory.create_method_item(class, "m", TypeItem::primitive(PrimitiveKind::Void), ItemDetails::public());

        assert!(codebase.is_originally_hidden(ItemId::Class(class)));
        assert!(!codebase.is_originally_hidden(ItemId::Callable(method)));
        assert!(codebase.is_hidden(ItemId::Callable(method)));
        assert!(!codebase.is_hidden(ItemId::Package(pkg)));
    }

    #[test]
    fn test_hide_annotation_from_config() {
        let config = CodebaseConfig::default().with_hide_annotation("p.Internal");
        let mut codebase = Codebase::new(config);
        let mut factory = codebase.factory();
        let pkg = factory.find_or_create_package("p", None).unwrap();
        let modifiers = ModifierList::public().with_annotation(AnnotationItem::new("p.Internal"));
        let class = factory
            .create_class_item(
                ClassContainer::Package(pkg),
                "C",
                ClassKind::Class,
                ClassOrigin::CommandLine,
                ItemDetails::new(Default::default(), modifiers),
            )
            .unwrap();
        assert!(codebase.is_hidden(ItemId::Class(class)));
    }

    #[test]
    fn test_remove_forces_descendants_after_read() {
        let mut codebase = Codebase::new(CodebaseConfig::default());
        let mut factory = codebase.factory();
        let pkg = factory.find_or_create_package("p", None).unwrap();
        let class = factory
            .create_class_item(ClassContainer::Package(pkg), "C", ClassKind::Class, ClassOrigin::CommandLine, ItemDetails::public())
            .unwrap();
        let field = factory.create_field_item(class, "F", TypeItem::string(), false, None, ItemDetails::public());

        assert!(!codebase.is_removed(ItemId::Field(field)));
        codebase.remove(ItemId::Class(class));
        assert!(codebase.is_removed(ItemId::Class(class)));
        assert!(codebase.is_removed(ItemId::Field(field)));
    }
}
