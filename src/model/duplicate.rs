//! Copying members into another class.
//!
//! A duplicate is a new item owned by the target class. Its types are
//! rewritten with the type-variable bindings of the source class as seen
//! from the target, and it records the source class as `inherited_from`.
//! The duplicate is not added to the target's member lists; use
//! `inherit_*` for copy-and-add.

use tracing::debug;

use super::callable::CallableItem;
use super::codebase::Codebase;
use super::field::FieldItem;
use super::ids::{CallableId, ClassId, FieldId, ItemId, PropertyId};
use super::parameter::ParameterItem;
use super::property::{PropertyAccessors, PropertyItem};
use super::type_parameter::{TypeParameterBounds, TypeParameterItem};

impl Codebase {
    /// Copy `method` into `target`.
    ///
    /// A `default` method copied into a class that is not an interface loses
    /// the `default` flag; every other modifier, `static` included, is kept.
    /// The copy owns fresh type parameters and parameters, and its types
    /// refer to those rather than to the original's.
    pub fn duplicate_method(&mut self, method: CallableId, target: ClassId) -> CallableId {
        let source = self.callable(method);
        let source_class = source.containing_class();
        let mut bindings = self.map_type_variables(target, source_class);

        let mut data = source.data.duplicate();
        if data.modifiers.flags.is_default && !self.class(target).is_interface() {
            data.modifiers.flags.is_default = false;
        }
        let mut copy = CallableItem::new(
            data,
            source.name.clone(),
            source.kind,
            target,
            source.return_type.clone(),
        );
        copy.throws_types = source.throws_types.clone();
        copy.inherited_from = Some(source_class);
        copy.default_value = source.default_value.clone();
        let source_type_parameters = source.type_parameters.clone();
        let source_parameters = source.parameters.clone();
        let copy = self.alloc_callable(copy);

        let mut type_parameters = Vec::with_capacity(source_type_parameters.len());
        for original in source_type_parameters {
            let item = self.type_parameter(original);
            let fresh = TypeParameterItem::new(item.data.duplicate(), item.name.clone(), copy.into(), item.is_reified);
            let bounds = item.bounds.clone();
            let fresh = self.alloc_type_parameter(fresh);
            bindings.insert(original, self.type_parameter(fresh).as_type(fresh));
            type_parameters.push((fresh, bounds));
        }
        for (fresh, bounds) in &type_parameters {
            self.type_parameters[fresh.index()].bounds = match bounds {
                TypeParameterBounds::Resolved(bounds) => {
                    TypeParameterBounds::Resolved(bounds.iter().map(|ty| ty.substitute(&bindings)).collect())
                }
                TypeParameterBounds::Pending => TypeParameterBounds::Pending,
            };
        }

        let parameters: Vec<ParameterItem> = source_parameters
            .iter()
            .map(|&id| {
                let param = self.parameter(id);
                ParameterItem::new(
                    param.data.duplicate(),
                    param.name.clone(),
                    param.index,
                    copy,
                    param.ty.substitute(&bindings),
                    param.default_value.clone(),
                )
            })
            .collect();
        let parameters: Vec<_> = parameters.into_iter().map(|param| self.alloc_parameter(param)).collect();

        let item = self.callable_mut(copy);
        item.type_parameters = type_parameters.into_iter().map(|(fresh, _)| fresh).collect();
        item.parameters = parameters;
        item.return_type = item.return_type.substitute(&bindings);
        item.throws_types = item.throws_types.iter().map(|ty| ty.substitute(&bindings)).collect();

        self.inherit_variant_flags(copy.into(), target);
        debug!(
            method = %self.callable(copy).name(),
            from = %self.class(source_class).qualified_name(),
            to = %self.class(target).qualified_name(),
            "duplicated method"
        );
        copy
    }

    pub fn duplicate_field(&mut self, field: FieldId, target: ClassId) -> FieldId {
        let source = self.field(field);
        let source_class = source.containing_class();
        let bindings = self.map_type_variables(target, source_class);
        let mut copy = FieldItem::new(
            source.data.duplicate(),
            source.name.clone(),
            target,
            source.ty.substitute(&bindings),
            source.is_enum_constant,
            source.value.clone(),
        );
        copy.inherited_from = Some(source_class);

        let copy = self.alloc_field(copy);
        self.inherit_variant_flags(copy.into(), target);
        debug!(field = %self.field(copy).name(), to = %self.class(target).qualified_name(), "duplicated field");
        copy
    }

    /// Copy `property` into `target`.
    ///
    /// The copy has no getter, setter, backing field or constructor
    /// parameter: those belong to the source class. Callers that materialize
    /// accessors in `target` attach them to the copy afterwards.
    pub fn duplicate_property(&mut self, property: PropertyId, target: ClassId) -> PropertyId {
        let source = self.property(property);
        let source_class = source.containing_class();
        let bindings = self.map_type_variables(target, source_class);
        let mut copy = PropertyItem::new(
            source.data.duplicate(),
            source.name.clone(),
            target,
            source.ty.substitute(&bindings),
            PropertyAccessors::default(),
        );
        copy.inherited_from = Some(source_class);

        let copy = self.alloc_property(copy);
        self.inherit_variant_flags(copy.into(), target);
        copy
    }

    /// Duplicate `method` into `target` and put it in place of any method
    /// with the same signature there.
    pub fn inherit_method(&mut self, method: CallableId, target: ClassId) -> CallableId {
        let copy = self.duplicate_method(method, target);
        self.replace_or_add_method(target, copy);
        copy
    }

    /// Duplicate `field` into `target` and put it in place of any field with
    /// the same name there.
    pub fn inherit_field(&mut self, field: FieldId, target: ClassId) -> FieldId {
        let copy = self.duplicate_field(field, target);
        self.replace_or_add_field(target, copy);
        copy
    }

    /// Hidden, removed and doc-only state of the new owner carries over to a
    /// copy. Only ever adds a flag.
    fn inherit_variant_flags(&self, copy: ItemId, target: ClassId) {
        let target = ItemId::Class(target);
        let selectors = &self.item_data(copy).selectors;
        if self.is_hidden(target) {
            selectors.force_hidden();
        }
        if self.is_removed(target) {
            selectors.force_removed();
        }
        if self.is_doc_only(target) {
            selectors.force_doc_only();
        }
    }
}
