//! Traversal of a codebase for writers and checkers.

use super::codebase::Codebase;
use super::ids::{CallableId, ClassId, FieldId, PackageId, ParameterId, PropertyId};

/// Callbacks for [`Codebase::accept`]. Every hook defaults to doing nothing.
#[allow(unused_variables)]
pub trait ItemVisitor {
    fn visit_package(&mut self, codebase: &Codebase, package: PackageId) {}

    fn after_visit_package(&mut self, codebase: &Codebase, package: PackageId) {}

    fn visit_class(&mut self, codebase: &Codebase, class: ClassId) {}

    fn after_visit_class(&mut self, codebase: &Codebase, class: ClassId) {}

    fn visit_constructor(&mut self, codebase: &Codebase, constructor: CallableId) {}

    fn visit_method(&mut self, codebase: &Codebase, method: CallableId) {}

    fn visit_parameter(&mut self, codebase: &Codebase, parameter: ParameterId) {}

    fn visit_field(&mut self, codebase: &Codebase, field: FieldId) {}

    fn visit_property(&mut self, codebase: &Codebase, property: PropertyId) {}
}

impl Codebase {
    /// Walk packages in name order, then each package's top-level classes;
    /// within a class: constructors, methods, fields, properties, then
    /// nested classes. Parameters are visited after their callable.
    pub fn accept(&self, visitor: &mut dyn ItemVisitor) {
        for package in self.packages() {
            visitor.visit_package(self, package);
            for &class in self.package(package).top_level_classes() {
                self.accept_class(class, visitor);
            }
            visitor.after_visit_package(self, package);
        }
    }

    pub fn accept_class(&self, class: ClassId, visitor: &mut dyn ItemVisitor) {
        visitor.visit_class(self, class);
        let item = self.class(class);
        for &constructor in item.constructors() {
            visitor.visit_constructor(self, constructor);
            self.accept_parameters(constructor, visitor);
        }
        for &method in item.methods() {
            visitor.visit_method(self, method);
            self.accept_parameters(method, visitor);
        }
        for &field in item.fields() {
            visitor.visit_field(self, field);
        }
        for &property in item.properties() {
            visitor.visit_property(self, property);
        }
        for &nested in item.nested_classes() {
            self.accept_class(nested, visitor);
        }
        visitor.after_visit_class(self, class);
    }

    fn accept_parameters(&self, callable: CallableId, visitor: &mut dyn ItemVisitor) {
        for &parameter in self.callable(callable).parameters() {
            visitor.visit_parameter(self, parameter);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CodebaseConfig;
    use crate::model::{ClassContainer, ClassKind, ClassOrigin, ItemDetails, ItemId, TypeItem};

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl ItemVisitor for Recorder {
        fn visit_package(&mut self, codebase: &Codebase, package: PackageId) {
            self.events.push(codebase.baseline_key(ItemId::Package(package)));
        }

        fn visit_class(&mut self, codebase: &Codebase, class: ClassId) {
            self.events.push(codebase.baseline_key(ItemId::Class(class)));
        }

        fn after_visit_class(&mut self, codebase: &Codebase, class: ClassId) {
            self.events.push(format!("/{}", codebase.class(class).simple_name()));
        }

        fn visit_field(&mut self, codebase: &Codebase, field: FieldId) {
            self.events.push(codebase.baseline_key(ItemId::Field(field)));
        }
    }

    #[test]
    fn test_visit_order() {
        let mut codebase = Codebase::new(CodebaseConfig::default());
        let mut factory = codebase.factory();
        let b = factory.find_or_create_package("b", None).unwrap();
        let a = factory.find_or_create_package("a", None).unwrap();
        let outer = factory
            .create_class_item(ClassContainer::Package(b), "Outer", ClassKind::Class, ClassOrigin::CommandLine, ItemDetails::public())
            .unwrap();
        factory
            .create_class_item(ClassContainer::Class(outer), "Inner", ClassKind::Class, ClassOrigin::CommandLine, ItemDetails::public())
            .unwrap();
        factory.create_field_item(outer, "F", TypeItem::string(), false, None, ItemDetails::public());
        factory
            .create_class_item(ClassContainer::Package(a), "A", ClassKind::Class, ClassOrigin::CommandLine, ItemDetails::public())
            .unwrap();

        let mut recorder = Recorder::default();
        codebase.accept(&mut recorder);
        assert_eq!(
            recorder.events,
            ["", "a", "a.A", "/A", "b", "b.Outer", "b.Outer#F", "b.Outer.Inner", "/Inner", "/Outer"]
        );
    }
}
