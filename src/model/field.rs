//! Fields and enum constants.

use std::rc::Rc;

use smol_str::SmolStr;

use crate::value::FieldValue;

use super::ids::ClassId;
use super::item::ItemData;
use super::types::TypeItem;

#[derive(Debug)]
pub struct FieldItem {
    pub(crate) data: ItemData,
    pub(crate) name: SmolStr,
    pub(crate) containing_class: ClassId,
    pub(crate) ty: TypeItem,
    pub(crate) is_enum_constant: bool,
    pub(crate) value: Option<Rc<dyn FieldValue>>,
    pub(crate) inherited_from: Option<ClassId>,
}

impl FieldItem {
    pub(crate) fn new(
        data: ItemData,
        name: SmolStr,
        containing_class: ClassId,
        ty: TypeItem,
        is_enum_constant: bool,
        value: Option<Rc<dyn FieldValue>>,
    ) -> Self {
        Self {
            data,
            name,
            containing_class,
            ty,
            is_enum_constant,
            value,
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

    pub fn is_enum_constant(&self) -> bool {
        self.is_enum_constant
    }

    pub fn value(&self) -> Option<&Rc<dyn FieldValue>> {
        self.value.as_ref()
    }

    pub fn inherited_from(&self) -> Option<ClassId> {
        self.inherited_from
    }
}
