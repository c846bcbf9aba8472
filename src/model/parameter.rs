//! Callable parameters.

use std::rc::Rc;

use smol_str::SmolStr;

use crate::value::DefaultValue;

use super::ids::CallableId;
use super::item::ItemData;
use super::types::TypeItem;

#[derive(Debug)]
pub struct ParameterItem {
    pub(crate) data: ItemData,
    /// Class files compiled without `-parameters` carry no names.
    pub(crate) name: Option<SmolStr>,
    pub(crate) index: usize,
    pub(crate) containing_callable: CallableId,
    pub(crate) ty: TypeItem,
    pub(crate) default_value: Rc<dyn DefaultValue>,
}

impl ParameterItem {
    pub(crate) fn new(
        data: ItemData,
        name: Option<SmolStr>,
        index: usize,
        containing_callable: CallableId,
        ty: TypeItem,
        default_value: Rc<dyn DefaultValue>,
    ) -> Self {
        Self {
            data,
            name,
            index,
            containing_callable,
            ty,
            default_value,
        }
    }

    pub fn data(&self) -> &ItemData {
        &self.data
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Position within the containing callable, from zero.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn containing_callable(&self) -> CallableId {
        self.containing_callable
    }

    pub fn ty(&self) -> &TypeItem {
        &self.ty
    }

    pub fn set_type(&mut self, ty: TypeItem) {
        self.ty = ty;
    }

    pub fn default_value(&self) -> &Rc<dyn DefaultValue> {
        &self.default_value
    }

    pub fn has_default_value(&self) -> bool {
        self.default_value.has_default_value()
    }

    pub fn is_default_value_known(&self) -> bool {
        self.default_value.is_default_value_known()
    }
}
