//! Human readable descriptions and baseline keys of items.
//!
//! Baseline keys identify an item across versions of an API and are stored
//! in baseline files to suppress known issues, so their format must not
//! change:
//!
//! | item            | key                                   |
//! |-----------------|---------------------------------------|
//! | package         | `a.b`                                 |
//! | class           | `a.b.Outer.Inner`                     |
//! | method/ctor     | `a.b.C#name(int, java.lang.String[])` |
//! | field/property  | `a.b.C#NAME`                          |
//! | parameter       | `a.b.C#name(int) parameter #0`        |
//! | type parameter  | `a.b.C type parameter T`              |

use super::class::ClassKind;
use super::codebase::Codebase;
use super::ids::{CallableId, ItemId};

impl Codebase {
    pub fn baseline_key(&self, id: ItemId) -> String {
        match id {
            ItemId::Package(id) => self.package(id).qualified_name().to_string(),
            ItemId::Class(id) => self.class(id).qualified_name().to_string(),
            ItemId::Callable(id) => {
                let callable = self.callable(id);
                format!(
                    "{}#{}({})",
                    self.class(callable.containing_class()).qualified_name(),
                    callable.name(),
                    self.erased_parameter_types(id).join(", ")
                )
            }
            ItemId::Field(id) => {
                let field = self.field(id);
                format!("{}#{}", self.class(field.containing_class()).qualified_name(), field.name())
            }
            ItemId::Property(id) => {
                let property = self.property(id);
                format!("{}#{}", self.class(property.containing_class()).qualified_name(), property.name())
            }
            ItemId::Parameter(id) => {
                let parameter = self.parameter(id);
                format!(
                    "{} parameter #{}",
                    self.baseline_key(parameter.containing_callable().into()),
                    parameter.index()
                )
            }
            ItemId::TypeParameter(id) => {
                let type_parameter = self.type_parameter(id);
                format!(
                    "{} type parameter {}",
                    self.baseline_key(type_parameter.owner()),
                    type_parameter.name()
                )
            }
        }
    }

    /// Describe an item for messages, e.g. `method a.b.C.run(int)`.
    pub fn describe(&self, id: ItemId) -> String {
        match id {
            ItemId::Package(id) => format!("package {}", self.package(id).qualified_name()),
            ItemId::Class(id) => {
                let class = self.class(id);
                let kind = match class.kind() {
                    ClassKind::Class => "class",
                    ClassKind::Interface => "interface",
                    ClassKind::Enum => "enum",
                    ClassKind::AnnotationType => "annotation",
                    ClassKind::Object => "object",
                };
                format!("{kind} {}", class.qualified_name())
            }
            ItemId::Callable(id) => {
                let callable = self.callable(id);
                let kind = if callable.is_constructor() { "constructor" } else { "method" };
                format!("{kind} {}", self.callable_signature(id))
            }
            ItemId::Field(id) => {
                let field = self.field(id);
                let kind = if field.is_enum_constant() { "enum constant" } else { "field" };
                format!("{kind} {}.{}", self.class(field.containing_class()).qualified_name(), field.name())
            }
            ItemId::Property(id) => {
                let property = self.property(id);
                format!(
                    "property {}.{}",
                    self.class(property.containing_class()).qualified_name(),
                    property.name()
                )
            }
            ItemId::Parameter(id) => {
                let parameter = self.parameter(id);
                let owner = self.describe(parameter.containing_callable().into());
                match parameter.name() {
                    Some(name) => format!("parameter {name} in {owner}"),
                    None => format!("parameter #{} in {owner}", parameter.index()),
                }
            }
            ItemId::TypeParameter(id) => {
                let type_parameter = self.type_parameter(id);
                format!(
                    "type parameter {} of {}",
                    type_parameter.name(),
                    self.describe(type_parameter.owner())
                )
            }
        }
    }

    fn callable_signature(&self, id: CallableId) -> String {
        let callable = self.callable(id);
        let class = self.class(callable.containing_class());
        let parameters: Vec<String> = callable
            .parameters()
            .iter()
            .map(|&p| self.parameter(p).ty().to_type_string())
            .collect();
        if callable.is_constructor() {
            format!("{}({})", class.qualified_name(), parameters.join(", "))
        } else {
            format!("{}.{}({})", class.qualified_name(), callable.name(), parameters.join(", "))
        }
    }
}
