//! Member duplication: flag normalization, deprecation and inheritance.

mod common;

use common::*;
use surface::model::{ClassKind, Documentation, ItemDetails, ItemId, ModifierList, TypeItem};
use surface::{Codebase, FileLocation};

fn default_method(codebase: &mut Codebase) -> (surface::model::CallableId, surface::model::ClassId, surface::model::ClassId) {
    let mut factory = codebase.factory();
    let pkg = package(&mut factory, "p");
    let source = class(&mut factory, pkg, "Source", ClassKind::Interface);
    let concrete = class(&mut factory, pkg, "Concrete", ClassKind::Class);
    let other = class(&mut factory, pkg, "Other", ClassKind::Interface);
    let modifiers = ModifierList::public().with_flags(|flags| flags.is_default = true);
    let method = method_with(&mut factory, source, "describe", &[], modifiers);
    (method, concrete, other)
}

#[test]
fn test_default_dropped_in_concrete_class() {
    let mut codebase = new_codebase();
    let (method, concrete, _) = default_method(&mut codebase);

    let copy = codebase.duplicate_method(method, concrete);
    assert!(!codebase.callable(copy).is_default());
    assert!(codebase.callable(method).is_default());
}

#[test]
fn test_default_kept_in_interface() {
    let mut codebase = new_codebase();
    let (method, _, other) = default_method(&mut codebase);

    let copy = codebase.duplicate_method(method, other);
    assert!(codebase.callable(copy).is_default());
}

#[test]
fn test_deprecation_follows_new_container() {
    let mut codebase = new_codebase();
    let mut factory = codebase.factory();
    let pkg = package(&mut factory, "p");
    let plain = class(&mut factory, pkg, "Plain", ClassKind::Class);
    let deprecated_details = ItemDetails::new(FileLocation::UNKNOWN, ModifierList::public())
        .with_documentation(Documentation::new("/** @deprecated use Plain */"));
    let deprecated = factory
        .create_class_item(
            surface::model::ClassContainer::Package(pkg),
            "Old",
            ClassKind::Class,
            surface::model::ClassOrigin::CommandLine,
            deprecated_details,
        )
        .unwrap();
    let fresh = method(&mut factory, plain, "fresh", &[]);
    let stale = method(&mut factory, deprecated, "stale", &[int()]);
    let stale_param = codebase.callable(stale).parameters()[0];

    assert!(codebase.is_implicitly_deprecated(stale.into()));
    assert!(codebase.is_deprecated(stale_param.into()));

    let into_deprecated = codebase.duplicate_method(fresh, deprecated);
    assert!(!codebase.is_explicitly_deprecated(into_deprecated.into()));
    assert!(codebase.is_implicitly_deprecated(into_deprecated.into()));

    let into_plain = codebase.duplicate_method(stale, plain);
    assert!(!codebase.is_deprecated(into_plain.into()));
    let copied_param = codebase.callable(into_plain).parameters()[0];
    assert!(!codebase.is_deprecated(copied_param.into()));
}

#[test]
fn test_explicit_deprecation_travels() {
    let mut codebase = new_codebase();
    let mut factory = codebase.factory();
    let pkg = package(&mut factory, "p");
    let source = class(&mut factory, pkg, "Source", ClassKind::Class);
    let target = class(&mut factory, pkg, "Target", ClassKind::Class);
    let modifiers = ModifierList::public().with_flags(|flags| flags.is_deprecated = true);
    let old = method_with(&mut factory, source, "old", &[], modifiers);

    let copy = codebase.duplicate_method(old, target);
    assert!(codebase.is_explicitly_deprecated(copy.into()));
}

#[test]
fn test_inherit_replaces_matching_member() {
    let mut codebase = new_codebase();
    let mut factory = codebase.factory();
    let pkg = package(&mut factory, "p");
    let source = class(&mut factory, pkg, "Source", ClassKind::Class);
    let target = class(&mut factory, pkg, "Target", ClassKind::Class);
    let inherited = method(&mut factory, source, "size", &[int()]);
    let existing = method(&mut factory, target, "size", &[int()]);
    let overload = method(&mut factory, target, "size", &[TypeItem::string()]);
    let source_field = factory.create_field_item(source, "COUNT", int(), false, None, ItemDetails::public());
    let existing_field = factory.create_field_item(target, "COUNT", int(), false, None, ItemDetails::public());

    let copy = codebase.inherit_method(inherited, target);
    assert_eq!(codebase.class(target).methods(), [copy, overload]);
    assert_ne!(copy, existing);
    assert_eq!(codebase.callable(copy).inherited_from(), Some(source));
    assert_eq!(codebase.baseline_key(copy.into()), "p.Target#size(int)");

    let field_copy = codebase.inherit_field(source_field, target);
    assert_eq!(codebase.class(target).fields(), [field_copy]);
    assert_ne!(field_copy, existing_field);
}

#[test]
fn test_copy_into_hidden_class_is_hidden() {
    let mut codebase = new_codebase();
    let mut factory = codebase.factory();
    let pkg = package(&mut factory, "p");
    let source = class(&mut factory, pkg, "Source", ClassKind::Class);
    let target = class(&mut factory, pkg, "Target", ClassKind::Class);
    let visible = method(&mut factory, source, "visible", &[]);
    codebase.hide(ItemId::Class(target));

    let copy = codebase.duplicate_method(visible, target);
    assert!(codebase.is_hidden(copy.into()));
    assert!(!codebase.is_hidden(visible.into()));
}
