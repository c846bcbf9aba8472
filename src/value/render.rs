//! Values at their use sites.
//!
//! Writers ask for values through these methods rather than the providers
//! directly, so that references between constant fields resolve against the
//! codebase the same way for every backend.

use tracing::{trace, warn};

use crate::error::{ModelError, Result};
use crate::model::{AnnotationItem, CallableId, ClassId, Codebase, FieldId, ItemId, ParameterId};

use super::constant::Value;
use super::{ConstantResolver, DefaultValue};

/// Chains of field references longer than this are treated as cycles.
const MAX_REFERENCE_DEPTH: usize = 32;

/// Resolves field references as seen from inside `class`.
struct ScopedConstants<'a> {
    codebase: &'a Codebase,
    class: ClassId,
    depth: usize,
}

impl ConstantResolver for ScopedConstants<'_> {
    fn resolve_constant(&self, class: Option<&str>, name: &str) -> Option<Value> {
        if self.depth >= MAX_REFERENCE_DEPTH {
            warn!(
                class = %self.codebase.class(self.class).qualified_name(),
                name,
                "constant reference chain too deep, giving up"
            );
            return None;
        }
        let field = match class {
            Some(qualifier) => {
                let owner = self.codebase.lookup_class_name(self.class, qualifier)?;
                self.codebase.find_field_in_hierarchy(owner, name)
            }
            None => std::iter::successors(Some(self.class), |&c| self.codebase.class(c).containing_class())
                .find_map(|c| self.codebase.find_field_in_hierarchy(c, name)),
        };
        let Some(field) = field else {
            trace!(?class, name, "unresolved constant reference");
            return None;
        };
        self.codebase.field_value_at_depth(field, true, self.depth + 1)
    }
}

impl Codebase {
    /// Resolve a class name as written inside `context`: qualified, then in
    /// the same package, then nested in `context` or one of its outer classes.
    fn lookup_class_name(&self, context: ClassId, name: &str) -> Option<ClassId> {
        if let Some(class) = self.find_class(name) {
            return Some(class);
        }
        let package = self.package(self.class(context).package()).qualified_name();
        if !package.is_empty() {
            if let Some(class) = self.find_class(&format!("{package}.{name}")) {
                return Some(class);
            }
        }
        std::iter::successors(Some(context), |&c| self.class(c).containing_class())
            .find_map(|c| self.find_class(&format!("{}.{name}", self.class(c).qualified_name())))
    }

    /// A field declared in `class`, a superclass or an implemented interface.
    fn find_field_in_hierarchy(&self, class: ClassId, name: &str) -> Option<FieldId> {
        std::iter::once(class)
            .chain(self.all_super_classes(class))
            .chain(self.all_interfaces(class).iter().copied())
            .find_map(|c| self.find_field(c, name))
    }

    fn field_value_at_depth(&self, field: FieldId, require_constant: bool, depth: usize) -> Option<Value> {
        let item = self.field(field);
        if item.is_enum_constant() {
            return Some(Value::Enum {
                class: self.class(item.containing_class()).qualified_name().into(),
                constant: item.name().into(),
            });
        }
        let scope = ScopedConstants {
            codebase: self,
            class: item.containing_class(),
            depth,
        };
        item.value()?.initial_value(&scope, require_constant)
    }

    /// The initial value of a field, with references to other fields
    /// resolved. See [`FieldValue::initial_value`](super::FieldValue::initial_value).
    pub fn field_initial_value(&self, field: FieldId, require_constant: bool) -> Option<Value> {
        self.field_value_at_depth(field, require_constant, 0)
    }

    /// The constant value of a field as source text.
    pub fn field_value_source(&self, field: FieldId) -> Option<String> {
        self.field_initial_value(field, true).map(|value| value.to_source())
    }

    /// The tail of a field declaration: `" = 5;"` for a constant, `";"`
    /// otherwise.
    pub fn field_write_source(&self, field: FieldId) -> String {
        match self.field_value_source(field) {
            Some(source) => format!(" = {source};"),
            None => ";".to_string(),
        }
    }

    /// The default value of a parameter.
    ///
    /// Fails when the parameter has no default or the default is not known.
    pub fn parameter_default_value(&self, parameter: ParameterId) -> Result<Value> {
        let item = self.parameter(parameter);
        let class = self.callable(item.containing_callable()).containing_class();
        self.known_default(parameter.into(), &**item.default_value(), class)
    }

    pub fn parameter_default_value_source(&self, parameter: ParameterId) -> Result<String> {
        self.parameter_default_value(parameter).map(|value| value.to_source())
    }

    /// The default of an annotation type method.
    pub fn annotation_default_value(&self, method: CallableId) -> Result<Value> {
        let callable = self.callable(method);
        let Some(default) = callable.default_value() else {
            return Err(ModelError::MissingDefaultValue {
                item: self.describe(method.into()),
            });
        };
        self.known_default(method.into(), &**default, callable.containing_class())
    }

    pub fn annotation_default_value_source(&self, method: CallableId) -> Result<String> {
        self.annotation_default_value(method).map(|value| value.to_source())
    }

    fn known_default(&self, item: ItemId, default: &dyn DefaultValue, class: ClassId) -> Result<Value> {
        if !default.has_default_value() {
            return Err(ModelError::MissingDefaultValue {
                item: self.describe(item),
            });
        }
        let scope = ScopedConstants {
            codebase: self,
            class,
            depth: 0,
        };
        default
            .known_value(&scope)
            .filter(|_| default.is_default_value_known())
            .ok_or_else(|| ModelError::UnknownDefaultValue {
                item: self.describe(item),
            })
    }
}

/// The value of one attribute of an annotation use, as source text.
pub fn annotation_attribute_source(annotation: &AnnotationItem, name: &str) -> Option<String> {
    annotation
        .find_attribute(name)
        .map(|attribute| attribute.value.to_source())
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::config::CodebaseConfig;
    use crate::model::{ClassContainer, ClassKind, ClassOrigin, ItemDetails, PrimitiveKind, TypeItem};
    use crate::value::{
        ConstantDefaultValue, Expression, ExpressionDefaultValue, ExpressionFieldValue, FieldValue, NoDefaultValue,
        UnknownDefaultValue,
    };

    fn int() -> TypeItem {
        TypeItem::primitive(PrimitiveKind::Int)
    }

    fn source_field(text: &str, ty: TypeItem) -> Option<Rc<dyn FieldValue>> {
        let expression = Expression::parse(text).unwrap();
        Some(Rc::new(ExpressionFieldValue::new(ty, expression)))
    }

    #[test]
    fn test_field_references_resolve_across_classes() {
        let mut codebase = Codebase::new(CodebaseConfig::default());
        let mut factory = codebase.factory();
        let pkg = factory.find_or_create_package("p", None).unwrap();
        let limits = factory
            .create_class_item(
                ClassContainer::Package(pkg),
                "Limits",
                ClassKind::Class,
                ClassOrigin::CommandLine,
                ItemDetails::public(),
            )
            .unwrap();
        let user = factory
            .create_class_item(
                ClassContainer::Package(pkg),
                "User",
                ClassKind::Class,
                ClassOrigin::CommandLine,
                ItemDetails::public(),
            )
            .unwrap();
        let max = factory.create_field_item(limits, "MAX", int(), false, source_field("1 << 4", int()), ItemDetails::public());
        let double = factory.create_field_item(limits, "DOUBLE", int(), false, source_field("MAX * 2", int()), ItemDetails::public());
        let label = factory.create_field_item(
            user,
            "LABEL",
            TypeItem::string(),
            false,
            source_field(r#""max=" + Limits.MAX"#, TypeItem::string()),
            ItemDetails::public(),
        );

        assert_eq!(codebase.field_value_source(max).as_deref(), Some("16"));
        assert_eq!(codebase.field_initial_value(double, true), Some(Value::Int(32)));
        assert_eq!(codebase.field_write_source(label), r#" = "max=16";"#);
    }

    #[test]
    fn test_cyclic_references_have_no_value() {
        let mut codebase = Codebase::new(CodebaseConfig::default());
        let mut factory = codebase.factory();
        let pkg = factory.find_or_create_package("p", None).unwrap();
        let class = factory
            .create_class_item(
                ClassContainer::Package(pkg),
                "C",
                ClassKind::Class,
                ClassOrigin::CommandLine,
                ItemDetails::public(),
            )
            .unwrap();
        let a = factory.create_field_item(class, "A", int(), false, source_field("B + 1", int()), ItemDetails::public());
        factory.create_field_item(class, "B", int(), false, source_field("A + 1", int()), ItemDetails::public());

        assert_eq!(codebase.field_initial_value(a, true), None);
        assert_eq!(codebase.field_write_source(a), ";");
    }

    #[test]
    fn test_enum_constant_reference() {
        let mut codebase = Codebase::new(CodebaseConfig::default());
        let mut factory = codebase.factory();
        let pkg = factory.find_or_create_package("p", None).unwrap();
        let mode = factory
            .create_class_item(
                ClassContainer::Package(pkg),
                "Mode",
                ClassKind::Enum,
                ClassOrigin::CommandLine,
                ItemDetails::public(),
            )
            .unwrap();
        let mode_type = TypeItem::class("p.Mode");
        factory.create_field_item(mode, "FAST", mode_type.clone(), true, None, ItemDetails::public());
        let default = factory.create_field_item(
            mode,
            "DEFAULT",
            mode_type.clone(),
            false,
            source_field("Mode.FAST", mode_type),
            ItemDetails::public(),
        );

        assert_eq!(codebase.field_value_source(default), None);
        assert_eq!(
            codebase.field_initial_value(default, false).map(|v| v.to_source()).as_deref(),
            Some("p.Mode.FAST")
        );
    }

    #[test]
    fn test_default_value_contract() {
        let mut codebase = Codebase::new(CodebaseConfig::default());
        let mut factory = codebase.factory();
        let pkg = factory.find_or_create_package("p", None).unwrap();
        let class = factory
            .create_class_item(
                ClassContainer::Package(pkg),
                "Api",
                ClassKind::AnnotationType,
                ClassOrigin::CommandLine,
                ItemDetails::public(),
            )
            .unwrap();
        let method = factory.create_method_item(class, "run", TypeItem::primitive(PrimitiveKind::Void), ItemDetails::public());
        let none = factory.create_parameter_item(method, Some("a"), int(), Rc::new(NoDefaultValue), ItemDetails::public());
        let unknown =
            factory.create_parameter_item(method, Some("b"), int(), Rc::new(UnknownDefaultValue), ItemDetails::public());
        let known = factory.create_parameter_item(
            method,
            Some("c"),
            int(),
            Rc::new(ExpressionDefaultValue::new(int(), Expression::parse("Integer.MAX_VALUE").unwrap())),
            ItemDetails::public(),
        );
        let element = factory.create_method_item(class, "level", int(), ItemDetails::public());
        factory
            .codebase_mut()
            .callable_mut(element)
            .set_default_value(Rc::new(ConstantDefaultValue::new(Value::Int(3), &int()).unwrap()));

        assert!(matches!(
            codebase.parameter_default_value(none),
            Err(ModelError::MissingDefaultValue { .. })
        ));
        assert!(matches!(
            codebase.parameter_default_value(unknown),
            Err(ModelError::UnknownDefaultValue { .. })
        ));
        assert_eq!(codebase.parameter_default_value_source(known).as_deref(), Ok("2147483647"));
        assert_eq!(codebase.annotation_default_value_source(element).as_deref(), Ok("3"));
        assert!(matches!(
            codebase.annotation_default_value(method),
            Err(ModelError::MissingDefaultValue { .. })
        ));
    }

    #[test]
    fn test_annotation_attribute_source() {
        let annotation = crate::value::parse_annotation("@a.Size(min = 1, max = 10L)").unwrap();
        assert_eq!(annotation_attribute_source(&annotation, "max").as_deref(), Some("10L"));
        assert_eq!(annotation_attribute_source(&annotation, "other"), None);
    }
}
