//! Classes, interfaces, enums, annotation types and Kotlin objects.

use std::fmt;

use once_cell::unsync::OnceCell;
use smol_str::SmolStr;

use super::ids::{CallableId, ClassId, FieldId, PackageId, PropertyId, TypeParameterId};
use super::item::ItemData;
use super::types::TypeItem;

/// What sort of type declaration a class is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
    AnnotationType,
    /// Kotlin `object`.
    Object,
}

impl ClassKind {
    pub fn is_interface(self) -> bool {
        matches!(self, ClassKind::Interface | ClassKind::AnnotationType)
    }

    pub fn keyword(self) -> &'static str {
        match self {
            ClassKind::Class => "class",
            ClassKind::Interface => "interface",
            ClassKind::Enum => "enum",
            ClassKind::AnnotationType => "@interface",
            ClassKind::Object => "object",
        }
    }
}

/// How a class entered the codebase, which decides whether it is emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClassOrigin {
    /// Named directly on the command line: part of the API being described.
    CommandLine,
    /// Found on the source path to satisfy a reference.
    SourcePath,
    /// Materialized from the class path.
    ClassPath,
}

impl ClassOrigin {
    pub fn is_emittable(self) -> bool {
        self == ClassOrigin::CommandLine
    }
}

/// Retention of an annotation type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RetentionPolicy {
    Source,
    Class,
    Runtime,
}

impl RetentionPolicy {
    /// Map a `RetentionPolicy`/`AnnotationRetention` constant name.
    pub fn from_constant(name: &str) -> Option<Self> {
        match name {
            "SOURCE" => Some(RetentionPolicy::Source),
            "CLASS" | "BINARY" => Some(RetentionPolicy::Class),
            "RUNTIME" => Some(RetentionPolicy::Runtime),
            _ => None,
        }
    }
}

/// The single direct container of a class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClassContainer {
    Package(PackageId),
    Class(ClassId),
}

#[derive(Debug)]
pub struct ClassItem {
    pub(crate) data: ItemData,
    pub(crate) qualified_name: SmolStr,
    pub(crate) simple_name: SmolStr,
    /// Name relative to the package, e.g. `Outer.Inner`.
    pub(crate) full_name: SmolStr,
    pub(crate) kind: ClassKind,
    pub(crate) origin: ClassOrigin,
    pub(crate) container: ClassContainer,
    pub(crate) package: PackageId,
    pub(crate) type_parameters: Vec<TypeParameterId>,
    pub(crate) super_class_type: Option<TypeItem>,
    pub(crate) interface_types: Vec<TypeItem>,
    pub(crate) constructors: Vec<CallableId>,
    pub(crate) methods: Vec<CallableId>,
    pub(crate) fields: Vec<FieldId>,
    pub(crate) properties: Vec<PropertyId>,
    pub(crate) nested_classes: Vec<ClassId>,
    pub(crate) super_class: OnceCell<Option<ClassId>>,
    pub(crate) all_interfaces: OnceCell<Vec<ClassId>>,
    pub(crate) retention: OnceCell<RetentionPolicy>,
}

impl ClassItem {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        data: ItemData,
        qualified_name: SmolStr,
        simple_name: SmolStr,
        full_name: SmolStr,
        kind: ClassKind,
        origin: ClassOrigin,
        container: ClassContainer,
        package: PackageId,
    ) -> Self {
        Self {
            data,
            qualified_name,
            simple_name,
            full_name,
            kind,
            origin,
            container,
            package,
            type_parameters: Vec::new(),
            super_class_type: None,
            interface_types: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
            properties: Vec::new(),
            nested_classes: Vec::new(),
            super_class: OnceCell::new(),
            all_interfaces: OnceCell::new(),
            retention: OnceCell::new(),
        }
    }

    pub fn data(&self) -> &ItemData {
        &self.data
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn kind(&self) -> ClassKind {
        self.kind
    }

    pub fn is_interface(&self) -> bool {
        self.kind.is_interface()
    }

    pub fn is_annotation_type(&self) -> bool {
        self.kind == ClassKind::AnnotationType
    }

    pub fn is_enum(&self) -> bool {
        self.kind == ClassKind::Enum
    }

    pub fn origin(&self) -> ClassOrigin {
        self.origin
    }

    pub fn emit(&self) -> bool {
        self.origin.is_emittable()
    }

    pub fn container(&self) -> ClassContainer {
        self.container
    }

    pub fn containing_class(&self) -> Option<ClassId> {
        match self.container {
            ClassContainer::Class(id) => Some(id),
            ClassContainer::Package(_) => None,
        }
    }

    pub fn is_top_level(&self) -> bool {
        matches!(self.container, ClassContainer::Package(_))
    }

    /// The package the class belongs to, through any nesting.
    pub fn package(&self) -> PackageId {
        self.package
    }

    pub fn type_parameters(&self) -> &[TypeParameterId] {
        &self.type_parameters
    }

    pub fn super_class_type(&self) -> Option<&TypeItem> {
        self.super_class_type.as_ref()
    }

    pub fn interface_types(&self) -> &[TypeItem] {
        &self.interface_types
    }

    /// Rebind the superclass. Clears this class's cached superclass and
    /// interface closure; caches of subclasses are not touched.
    pub fn set_super_class_type(&mut self, ty: Option<TypeItem>) {
        self.super_class_type = ty;
        self.super_class = OnceCell::new();
        self.all_interfaces = OnceCell::new();
    }

    /// Rebind the directly implemented interfaces. Clears this class's
    /// cached interface closure only.
    pub fn set_interface_types(&mut self, types: Vec<TypeItem>) {
        self.interface_types = types;
        self.all_interfaces = OnceCell::new();
    }

    pub fn constructors(&self) -> &[CallableId] {
        &self.constructors
    }

    pub fn methods(&self) -> &[CallableId] {
        &self.methods
    }

    pub fn fields(&self) -> &[FieldId] {
        &self.fields
    }

    pub fn properties(&self) -> &[PropertyId] {
        &self.properties
    }

    pub fn nested_classes(&self) -> &[ClassId] {
        &self.nested_classes
    }
}

impl fmt::Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
