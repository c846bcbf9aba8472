//! The item graph of an API surface.
//!
//! This module provides:
//! - [`Codebase`] - owner of every item, with name lookup and registration
//! - [`ItemFactory`] - the single entry point for creating items
//! - The item kinds: [`PackageItem`], [`ClassItem`], [`CallableItem`],
//!   [`FieldItem`], [`PropertyItem`], [`ParameterItem`], [`TypeParameterItem`]
//! - [`TypeItem`] - type uses in signatures
//!
//! Structural algorithms (super methods, duplication, deprecation, variant
//! flags, naming) are `impl Codebase` blocks in their own files.

mod annotation;
mod callable;
mod class;
mod codebase;
mod constructors;
mod deprecation;
mod documentation;
mod duplicate;
mod factory;
mod field;
mod hierarchy;
mod ids;
mod item;
mod members;
mod modifiers;
mod naming;
mod package;
mod packages;
mod parameter;
mod property;
mod selectors;
mod sources;
mod super_methods;
mod type_parameter;
mod types;
mod variants;
mod visitor;

pub use annotation::{
    AnnotationAttribute, AnnotationItem, JAVA_DEPRECATED, JAVA_RETENTION, KOTLIN_DEPRECATED, KOTLIN_RETENTION,
};
pub use callable::{CallableItem, CallableKind};
pub use class::{ClassContainer, ClassItem, ClassKind, ClassOrigin, RetentionPolicy};
pub use codebase::{ClassAssembler, Codebase};
pub use documentation::Documentation;
pub use factory::{ItemDetails, ItemFactory};
pub use field::FieldItem;
pub use ids::{CallableId, ClassId, FieldId, ItemId, PackageId, ParameterId, PropertyId, TypeParameterId};
pub use item::{ItemData, Language};
pub use modifiers::{ModifierFlags, ModifierList, Visibility};
pub use package::{PackageItem, containing_package_name};
pub use packages::PackageTracker;
pub use parameter::ParameterItem;
pub use property::{PropertyAccessors, PropertyItem};
pub use selectors::ApiVariantSelectors;
pub use sources::SourceRoot;
pub use type_parameter::{TypeParameterBounds, TypeParameterItem};
pub use types::{
    ClassTypeItem, JAVA_LANG_OBJECT, JAVA_LANG_STRING, PrimitiveKind, TypeItem, TypeVariableMap, erased_type_string,
};
pub use visitor::ItemVisitor;
