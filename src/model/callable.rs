//! Constructors and methods.

use std::rc::Rc;

use once_cell::unsync::OnceCell;
use smol_str::SmolStr;

use crate::value::DefaultValue;

use super::ids::{CallableId, ClassId, ParameterId, TypeParameterId};
use super::item::ItemData;
use super::types::TypeItem;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallableKind {
    Constructor {
        /// Declared implicitly in source (no constructor written), as opposed
        /// to one synthesized by the model.
        is_implicit: bool,
    },
    Method,
}

/// A constructor or method. Parameters are attached in a second step once
/// the callable's id exists; see [`ItemFactory::create_parameter_item`](super::ItemFactory::create_parameter_item).
#[derive(Debug)]
pub struct CallableItem {
    pub(crate) data: ItemData,
    pub(crate) name: SmolStr,
    pub(crate) kind: CallableKind,
    pub(crate) containing_class: ClassId,
    pub(crate) type_parameters: Vec<TypeParameterId>,
    pub(crate) return_type: TypeItem,
    pub(crate) parameters: Vec<ParameterId>,
    pub(crate) throws_types: Vec<TypeItem>,
    pub(crate) inherited_from: Option<ClassId>,
    /// Default of an annotation type element (`int x() default 5;`).
    pub(crate) default_value: Option<Rc<dyn DefaultValue>>,
    pub(crate) super_methods: OnceCell<Vec<CallableId>>,
}

impl CallableItem {
    pub(crate) fn new(
        data: ItemData,
        name: SmolStr,
        kind: CallableKind,
        containing_class: ClassId,
        return_type: TypeItem,
    ) -> Self {
        Self {
            data,
            name,
            kind,
            containing_class,
            type_parameters: Vec::new(),
            return_type,
            parameters: Vec::new(),
            throws_types: Vec::new(),
            inherited_from: None,
            default_value: None,
            super_methods: OnceCell::new(),
        }
    }

    pub fn data(&self) -> &ItemData {
        &self.data
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> CallableKind {
        self.kind
    }

    pub fn is_constructor(&self) -> bool {
        matches!(self.kind, CallableKind::Constructor { .. })
    }

    pub fn is_method(&self) -> bool {
        self.kind == CallableKind::Method
    }

    pub fn is_implicit_constructor(&self) -> bool {
        matches!(self.kind, CallableKind::Constructor { is_implicit: true })
    }

    pub fn containing_class(&self) -> ClassId {
        self.containing_class
    }

    pub fn type_parameters(&self) -> &[TypeParameterId] {
        &self.type_parameters
    }

    pub fn return_type(&self) -> &TypeItem {
        &self.return_type
    }

    pub fn set_return_type(&mut self, ty: TypeItem) {
        self.return_type = ty;
    }

    pub fn parameters(&self) -> &[ParameterId] {
        &self.parameters
    }

    pub fn throws_types(&self) -> &[TypeItem] {
        &self.throws_types
    }

    pub fn set_throws_types(&mut self, types: Vec<TypeItem>) {
        self.throws_types = types;
    }

    /// The class this callable was copied from, if it is a duplicate.
    pub fn inherited_from(&self) -> Option<ClassId> {
        self.inherited_from
    }

    pub fn default_value(&self) -> Option<&Rc<dyn DefaultValue>> {
        self.default_value.as_ref()
    }

    pub fn set_default_value(&mut self, value: Rc<dyn DefaultValue>) {
        self.default_value = Some(value);
    }

    pub fn is_default(&self) -> bool {
        self.data.modifiers.flags.is_default
    }

    pub fn is_static(&self) -> bool {
        self.data.modifiers.flags.is_static
    }

    /// Whether a subclass method can override this one.
    pub fn is_overrideable(&self) -> bool {
        !self.data.modifiers.is_private() && !self.is_static() && self.is_method()
    }
}
