//! Shared builders for integration tests.

#![allow(dead_code)]

use surface::model::{
    CallableId, ClassContainer, ClassId, ClassKind, ClassOrigin, Codebase, ItemDetails, ModifierList, PackageId,
    PrimitiveKind, TypeItem,
};
use surface::{CodebaseConfig, ItemFactory};

pub fn new_codebase() -> Codebase {
    Codebase::new(CodebaseConfig::new("test"))
}

pub fn void() -> TypeItem {
    TypeItem::primitive(PrimitiveKind::Void)
}

pub fn int() -> TypeItem {
    TypeItem::primitive(PrimitiveKind::Int)
}

pub fn package(factory: &mut ItemFactory<'_>, name: &str) -> PackageId {
    factory.find_or_create_package(name, None).unwrap()
}

pub fn class(factory: &mut ItemFactory<'_>, package: PackageId, name: &str, kind: ClassKind) -> ClassId {
    factory
        .create_class_item(
            ClassContainer::Package(package),
            name,
            kind,
            ClassOrigin::CommandLine,
            ItemDetails::public(),
        )
        .unwrap()
}

pub fn nested(factory: &mut ItemFactory<'_>, outer: ClassId, name: &str) -> ClassId {
    factory
        .create_class_item(
            ClassContainer::Class(outer),
            name,
            ClassKind::Class,
            ClassOrigin::CommandLine,
            ItemDetails::public(),
        )
        .unwrap()
}

/// A public method with one unnamed parameter per entry of `parameters`.
pub fn method(factory: &mut ItemFactory<'_>, class: ClassId, name: &str, parameters: &[TypeItem]) -> CallableId {
    method_with(factory, class, name, parameters, ModifierList::public())
}

pub fn method_with(
    factory: &mut ItemFactory<'_>,
    class: ClassId,
    name: &str,
    parameters: &[TypeItem],
    modifiers: ModifierList,
) -> CallableId {
    let details = ItemDetails::new(surface::FileLocation::UNKNOWN, modifiers);
    let method = factory.create_method_item(class, name, void(), details);
    for ty in parameters {
        factory.create_parameter_item(
            method,
            None,
            ty.clone(),
            std::rc::Rc::new(surface::value::NoDefaultValue),
            ItemDetails::public(),
        );
    }
    method
}
