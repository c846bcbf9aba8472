//! Super-method resolution across class and interface hierarchies.

mod common;

use common::*;
use surface::model::{ClassKind, ItemDetails, ItemId, ModifierList, TypeItem};
use surface::{Codebase, CodebaseConfig};

#[test]
fn test_superclass_match_precedes_interfaces() {
    let mut codebase = new_codebase();
    let mut factory = codebase.factory();
    let pkg = package(&mut factory, "p");
    let base = class(&mut factory, pkg, "Base", ClassKind::Class);
    let first = class(&mut factory, pkg, "First", ClassKind::Interface);
    let second = class(&mut factory, pkg, "Second", ClassKind::Interface);
    let child = class(&mut factory, pkg, "Child", ClassKind::Class);

    let base_run = method(&mut factory, base, "run", &[TypeItem::string()]);
    let first_run = method(&mut factory, first, "run", &[TypeItem::string()]);
    let second_run = method(&mut factory, second, "run", &[TypeItem::string()]);
    method(&mut factory, second, "run", &[int()]);
    let child_run = method(&mut factory, child, "run", &[TypeItem::string()]);

    let child_item = codebase.class_mut(child);
    child_item.set_super_class_type(Some(TypeItem::class("p.Base")));
    child_item.set_interface_types(vec![TypeItem::class("p.Second"), TypeItem::class("p.First")]);

    let expected = [base_run, second_run, first_run];
    assert_eq!(codebase.super_methods(child_run), expected);
    assert_eq!(codebase.super_methods(child_run), expected);
}

#[test]
fn test_interface_found_once_through_diamond() {
    let mut codebase = new_codebase();
    let mut factory = codebase.factory();
    let pkg = package(&mut factory, "p");
    let root = class(&mut factory, pkg, "Root", ClassKind::Interface);
    let left = class(&mut factory, pkg, "Left", ClassKind::Interface);
    let right = class(&mut factory, pkg, "Right", ClassKind::Interface);
    let child = class(&mut factory, pkg, "Child", ClassKind::Class);
    let root_close = method(&mut factory, root, "close", &[]);
    let child_close = method(&mut factory, child, "close", &[]);

    codebase.class_mut(left).set_interface_types(vec![TypeItem::class("p.Root")]);
    codebase.class_mut(right).set_interface_types(vec![TypeItem::class("p.Root")]);
    codebase
        .class_mut(child)
        .set_interface_types(vec![TypeItem::class("p.Left"), TypeItem::class("p.Right")]);

    assert_eq!(codebase.super_methods(child_close), [root_close]);
    assert_eq!(codebase.all_interfaces(child), [left, right, root]);
}

#[test]
fn test_generic_parameters_match_after_substitution() {
    let mut codebase = new_codebase();
    let mut factory = codebase.factory();
    let pkg = package(&mut factory, "p");
    let base = class(&mut factory, pkg, "Base", ClassKind::Class);
    let t = factory.create_type_parameter_item(ItemId::Class(base), "T", false, ItemDetails::public());
    factory.set_type_parameter_bounds(t, Vec::new()).unwrap();
    let variable = TypeItem::Variable {
        name: "T".into(),
        parameter: t,
    };
    let base_accept = method(&mut factory, base, "accept", &[variable]);
    let child = class(&mut factory, pkg, "Child", ClassKind::Class);
    let child_accept = method(&mut factory, child, "accept", &[TypeItem::string()]);
    let child_object = method(&mut factory, child, "accept", &[TypeItem::object()]);

    codebase
        .class_mut(child)
        .set_super_class_type(Some(TypeItem::generic("p.Base", vec![TypeItem::string()])));

    assert_eq!(codebase.super_methods(child_accept), [base_accept]);
    assert!(codebase.super_methods(child_object).is_empty());
}

#[test]
fn test_static_and_constructor_have_no_super_methods() {
    let mut codebase = new_codebase();
    let mut factory = codebase.factory();
    let pkg = package(&mut factory, "p");
    let base = class(&mut factory, pkg, "Base", ClassKind::Class);
    let child = class(&mut factory, pkg, "Child", ClassKind::Class);
    let is_static = || ModifierList::public().with_flags(|flags| flags.is_static = true);
    method_with(&mut factory, base, "of", &[], is_static());
    let child_of = method_with(&mut factory, child, "of", &[], is_static());
    factory.create_constructor_item(base, ItemDetails::public(), false);
    let constructor = factory.create_constructor_item(child, ItemDetails::public(), false);

    codebase.class_mut(child).set_super_class_type(Some(TypeItem::class("p.Base")));

    assert!(codebase.super_methods(child_of).is_empty());
    assert!(codebase.super_methods(constructor).is_empty());
}

#[test]
fn test_filter_excludes_candidate() {
    let config = CodebaseConfig::new("filtered").with_super_method_filter(|codebase, _method, candidate| {
        codebase.class(codebase.callable(candidate).containing_class()).qualified_name() == "p.Legacy"
    });
    let mut codebase = Codebase::new(config);
    let mut factory = codebase.factory();
    let pkg = package(&mut factory, "p");
    let legacy = class(&mut factory, pkg, "Legacy", ClassKind::Interface);
    let modern = class(&mut factory, pkg, "Modern", ClassKind::Interface);
    let child = class(&mut factory, pkg, "Child", ClassKind::Class);
    method(&mut factory, legacy, "apply", &[int()]);
    let modern_apply = method(&mut factory, modern, "apply", &[int()]);
    let child_apply = method(&mut factory, child, "apply", &[int()]);

    codebase
        .class_mut(child)
        .set_interface_types(vec![TypeItem::class("p.Legacy"), TypeItem::class("p.Modern")]);

    assert_eq!(codebase.super_methods(child_apply), [modern_apply]);
}
