//! Member lists of classes: lookup by signature and in-place replacement.

use tracing::trace;

use super::codebase::Codebase;
use super::ids::{CallableId, ClassId, FieldId, PropertyId};
use super::types::erased_type_string;

impl Codebase {
    /// Erased parameter types of a callable, in order.
    pub fn erased_parameter_types(&self, callable: CallableId) -> Vec<String> {
        self.callable(callable)
            .parameters()
            .iter()
            .map(|&param| erased_type_string(self, self.parameter(param).ty()))
            .collect()
    }

    /// The method of `class` called `name` whose erased parameter types are
    /// `parameter_types`. Only the class's own methods are searched.
    pub fn find_method(&self, class: ClassId, name: &str, parameter_types: &[&str]) -> Option<CallableId> {
        self.class(class).methods().iter().copied().find(|&method| {
            self.callable(method).name() == name
                && self.erased_parameter_types(method).iter().map(String::as_str).eq(parameter_types.iter().copied())
        })
    }

    pub fn find_field(&self, class: ClassId, name: &str) -> Option<FieldId> {
        self.class(class)
            .fields()
            .iter()
            .copied()
            .find(|&field| self.field(field).name() == name)
    }

    pub fn find_property(&self, class: ClassId, name: &str) -> Option<PropertyId> {
        self.class(class)
            .properties()
            .iter()
            .copied()
            .find(|&property| self.property(property).name() == name)
    }

    /// Append a method that was created without being added, such as a
    /// duplicate.
    pub fn add_method(&mut self, class: ClassId, method: CallableId) {
        self.class_mut(class).methods.push(method);
    }

    pub fn add_field(&mut self, class: ClassId, field: FieldId) {
        self.class_mut(class).fields.push(field);
    }

    pub fn add_property(&mut self, class: ClassId, property: PropertyId) {
        self.class_mut(class).properties.push(property);
    }

    /// Put `method` in place of the method of `class` with the same name and
    /// erased parameter types, or append it. Returns the replaced method.
    pub fn replace_or_add_method(&mut self, class: ClassId, method: CallableId) -> Option<CallableId> {
        let name = self.callable(method).name().to_owned();
        let signature = self.erased_parameter_types(method);
        let position = self.class(class).methods().iter().position(|&existing| {
            existing != method
                && self.callable(existing).name() == name
                && self.erased_parameter_types(existing) == signature
        });
        match position {
            Some(index) => {
                let replaced = std::mem::replace(&mut self.class_mut(class).methods[index], method);
                trace!(class = %self.class(class).qualified_name(), method = %name, "replaced method");
                Some(replaced)
            }
            None => {
                self.add_method(class, method);
                None
            }
        }
    }

    /// Put `field` in place of the field of `class` with the same name, or
    /// append it. Returns the replaced field.
    pub fn replace_or_add_field(&mut self, class: ClassId, field: FieldId) -> Option<FieldId> {
        let name = self.field(field).name().to_owned();
        let position = self
            .class(class)
            .fields()
            .iter()
            .position(|&existing| existing != field && self.field(existing).name() == name);
        match position {
            Some(index) => {
                let replaced = std::mem::replace(&mut self.class_mut(class).fields[index], field);
                trace!(class = %self.class(class).qualified_name(), field = %name, "replaced field");
                Some(replaced)
            }
            None => {
                self.add_field(class, field);
                None
            }
        }
    }
}
