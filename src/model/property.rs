//! Kotlin properties.

use smol_str::SmolStr;

use super::ids::{CallableId, ClassId, FieldId, ParameterId};
use super::item::ItemData;
use super::types::TypeItem;

/// A Kotlin property and the JVM members that implement it.
#[derive(Debug)]
pub struct PropertyItem {
    pub(crate) data: ItemData,
    pub(crate) name: SmolStr,
    pub(crate) containing_class: ClassId,
    pub(crate) ty: TypeItem,
    pub(crate) getter: Option<CallableId>,
    pub(crate) setter: Option<CallableId>,
    pub(crate) backing_field: Option<FieldId>,
    pub(crate) constructor_parameter: Option<ParameterId>,
    pub(crate) inherited_from: Option<ClassId>,
}

/// The JVM members backing a property, all optional.
#[derive(Clone, Copy, Debug, Default)]
pub struct PropertyAccessors {
    pub getter: Option<CallableId>,
    pub setter: Option<CallableId>,
    pub backing_field: Option<FieldId>,
    pub constructor_parameter: Option<ParameterId>,
}

impl PropertyItem {
    pub(crate) fn new(
        data: ItemData,
        name: SmolStr,
        containing_class: ClassId,
        ty: TypeItem,
        accessors: PropertyAccessors,
    ) -> Self {
        Self {
            data,
            name,
            containing_class,
            ty,
            getter: accessors.getter,
            setter: accessors.setter,
            backing_field: accessors.backing_field,
            constructor_parameter: accessors.constructor_parameter,
            inherited_from: None,
        }
    }

    pub fn data(&self) -> &ItemData {
        &self.data
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn containing_class(&self) -> ClassId {
        self.containing_class
    }

    pub fn ty(&self) -> &TypeItem {
        &self.ty
    }

    pub fn set_type(&mut self, ty: TypeItem) {
        self.ty = ty;
    }

    pub fn getter(&self) -> Option<CallableId> {
        self.getter
    }

    pub fn setter(&self) -> Option<CallableId> {
        self.setter
    }

    pub fn backing_field(&self) -> Option<FieldId> {
        self.backing_field
    }

    pub fn constructor_parameter(&self) -> Option<ParameterId> {
        self.constructor_parameter
    }

    pub fn inherited_from(&self) -> Option<ClassId> {
        self.inherited_from
    }
}
