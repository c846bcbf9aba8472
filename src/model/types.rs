//! Type references as they appear in API signatures.
//!
//! [`TypeItem`] is a structural description of a Java/Kotlin type use. Type
//! variables refer back to their declaring [`TypeParameter`](super::TypeParameterItem)
//! by id, which lets bounds be filled in after every parameter of a
//! (possibly self-referential) list exists.

use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;

use super::codebase::Codebase;
use super::ids::TypeParameterId;

pub const JAVA_LANG_OBJECT: &str = "java.lang.Object";
pub const JAVA_LANG_STRING: &str = "java.lang.String";

/// Substitution from type parameters to the types bound to them.
pub type TypeVariableMap = FxHashMap<TypeParameterId, TypeItem>;

/// The primitive types, plus `void` for return types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl PrimitiveKind {
    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Void => "void",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "boolean" => PrimitiveKind::Boolean,
            "byte" => PrimitiveKind::Byte,
            "char" => PrimitiveKind::Char,
            "short" => PrimitiveKind::Short,
            "int" => PrimitiveKind::Int,
            "long" => PrimitiveKind::Long,
            "float" => PrimitiveKind::Float,
            "double" => PrimitiveKind::Double,
            "void" => PrimitiveKind::Void,
            _ => return None,
        })
    }

    /// The `java.lang` wrapper class for this primitive.
    pub fn boxed_name(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "java.lang.Boolean",
            PrimitiveKind::Byte => "java.lang.Byte",
            PrimitiveKind::Char => "java.lang.Character",
            PrimitiveKind::Short => "java.lang.Short",
            PrimitiveKind::Int => "java.lang.Integer",
            PrimitiveKind::Long => "java.lang.Long",
            PrimitiveKind::Float => "java.lang.Float",
            PrimitiveKind::Double => "java.lang.Double",
            PrimitiveKind::Void => "java.lang.Void",
        }
    }

    pub fn from_boxed_name(name: &str) -> Option<Self> {
        [
            PrimitiveKind::Boolean,
            PrimitiveKind::Byte,
            PrimitiveKind::Char,
            PrimitiveKind::Short,
            PrimitiveKind::Int,
            PrimitiveKind::Long,
            PrimitiveKind::Float,
            PrimitiveKind::Double,
        ]
        .into_iter()
        .find(|kind| kind.boxed_name() == name)
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, PrimitiveKind::Boolean | PrimitiveKind::Void)
    }
}

/// A reference to a class type with optional type arguments.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassTypeItem {
    pub qualified_name: SmolStr,
    pub arguments: Vec<TypeItem>,
}

/// A type use in a signature.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeItem {
    Primitive(PrimitiveKind),
    Class(ClassTypeItem),
    Array {
        component: Box<TypeItem>,
        /// Rendered as `T...` in a trailing parameter position.
        varargs: bool,
    },
    Variable {
        name: SmolStr,
        parameter: TypeParameterId,
    },
    Wildcard {
        extends: Option<Box<TypeItem>>,
        super_bound: Option<Box<TypeItem>>,
    },
}

impl TypeItem {
    pub fn primitive(kind: PrimitiveKind) -> Self {
        TypeItem::Primitive(kind)
    }

    pub fn class(qualified_name: impl Into<SmolStr>) -> Self {
        TypeItem::Class(ClassTypeItem {
            qualified_name: qualified_name.into(),
            arguments: Vec::new(),
        })
    }

    pub fn generic(qualified_name: impl Into<SmolStr>, arguments: Vec<TypeItem>) -> Self {
        TypeItem::Class(ClassTypeItem {
            qualified_name: qualified_name.into(),
            arguments,
        })
    }

    pub fn array(component: TypeItem) -> Self {
        TypeItem::Array {
            component: Box::new(component),
            varargs: false,
        }
    }

    pub fn varargs(component: TypeItem) -> Self {
        TypeItem::Array {
            component: Box::new(component),
            varargs: true,
        }
    }

    pub fn string() -> Self {
        TypeItem::class(JAVA_LANG_STRING)
    }

    pub fn object() -> Self {
        TypeItem::class(JAVA_LANG_OBJECT)
    }

    pub fn wildcard() -> Self {
        TypeItem::Wildcard {
            extends: None,
            super_bound: None,
        }
    }

    pub fn as_primitive(&self) -> Option<PrimitiveKind> {
        match self {
            TypeItem::Primitive(kind) => Some(*kind),
            _ => None,
        }
    }

    /// The qualified name of a class type, ignoring arguments.
    pub fn class_name(&self) -> Option<&str> {
        match self {
            TypeItem::Class(class) => Some(&class.qualified_name),
            _ => None,
        }
    }

    pub fn array_component(&self) -> Option<&TypeItem> {
        match self {
            TypeItem::Array { component, .. } => Some(component),
            _ => None,
        }
    }

    pub fn is_string(&self) -> bool {
        self.class_name() == Some(JAVA_LANG_STRING)
    }

    /// Whether a `static final` field of this type can hold a compile-time
    /// constant: primitives and `java.lang.String`.
    pub fn is_constant_type(&self) -> bool {
        match self {
            TypeItem::Primitive(kind) => *kind != PrimitiveKind::Void,
            _ => self.is_string(),
        }
    }

    /// The primitive this type unboxes to, for primitives and their wrappers.
    pub fn unboxed(&self) -> Option<PrimitiveKind> {
        match self {
            TypeItem::Primitive(kind) => Some(*kind),
            TypeItem::Class(class) => PrimitiveKind::from_boxed_name(&class.qualified_name),
            _ => None,
        }
    }

    /// Render the type the way it is written in a signature.
    pub fn to_type_string(&self) -> String {
        let mut out = String::new();
        self.write_type(&mut out);
        out
    }

    fn write_type(&self, out: &mut String) {
        match self {
            TypeItem::Primitive(kind) => out.push_str(kind.keyword()),
            TypeItem::Class(class) => {
                out.push_str(&class.qualified_name);
                if !class.arguments.is_empty() {
                    out.push('<');
                    for (i, arg) in class.arguments.iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        arg.write_type(out);
                    }
                    out.push('>');
                }
            }
            TypeItem::Array { component, varargs } => {
                component.write_type(out);
                out.push_str(if *varargs { "..." } else { "[]" });
            }
            TypeItem::Variable { name, .. } => out.push_str(name),
            TypeItem::Wildcard {
                extends,
                super_bound,
            } => {
                out.push('?');
                if let Some(bound) = extends {
                    out.push_str(" extends ");
                    bound.write_type(out);
                }
                if let Some(bound) = super_bound {
                    out.push_str(" super ");
                    bound.write_type(out);
                }
            }
        }
    }

    /// Replace type variables found in `map`, leaving all others untouched.
    pub fn substitute(&self, map: &TypeVariableMap) -> TypeItem {
        if map.is_empty() {
            return self.clone();
        }
        match self {
            TypeItem::Variable { parameter, .. } => match map.get(parameter) {
                Some(replacement) => replacement.clone(),
                None => self.clone(),
            },
            TypeItem::Class(class) => TypeItem::Class(ClassTypeItem {
                qualified_name: class.qualified_name.clone(),
                arguments: class.arguments.iter().map(|a| a.substitute(map)).collect(),
            }),
            TypeItem::Array { component, varargs } => TypeItem::Array {
                component: Box::new(component.substitute(map)),
                varargs: *varargs,
            },
            TypeItem::Wildcard {
                extends,
                super_bound,
            } => TypeItem::Wildcard {
                extends: extends.as_ref().map(|b| Box::new(b.substitute(map))),
                super_bound: super_bound.as_ref().map(|b| Box::new(b.substitute(map))),
            },
            TypeItem::Primitive(_) => self.clone(),
        }
    }
}

impl fmt::Display for TypeItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_type_string())
    }
}

/// Render the erasure of `ty`: arguments dropped, variables replaced by the
/// erasure of their first bound (or `java.lang.Object`), varargs as arrays.
pub fn erased_type_string(codebase: &Codebase, ty: &TypeItem) -> String {
    let mut visiting = FxHashSet::default();
    erase(codebase, ty, &mut visiting)
}

fn erase(codebase: &Codebase, ty: &TypeItem, visiting: &mut FxHashSet<TypeParameterId>) -> String {
    match ty {
        TypeItem::Primitive(kind) => kind.keyword().to_string(),
        TypeItem::Class(class) => class.qualified_name.to_string(),
        TypeItem::Array { component, .. } => format!("{}[]", erase(codebase, component, visiting)),
        TypeItem::Variable { parameter, .. } => {
            if !visiting.insert(*parameter) {
                return JAVA_LANG_OBJECT.to_string();
            }
            let bound = codebase
                .type_parameter(*parameter)
                .resolved_bounds()
                .and_then(|bounds| bounds.first());
            let erased = match bound {
                Some(bound) => erase(codebase, bound, visiting),
                None => JAVA_LANG_OBJECT.to_string(),
            };
            visiting.remove(parameter);
            erased
        }
        TypeItem::Wildcard { extends, .. } => match extends {
            Some(bound) => erase(codebase, bound, visiting),
            None => JAVA_LANG_OBJECT.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str, id: u32) -> TypeItem {
        TypeItem::Variable {
            name: name.into(),
            parameter: TypeParameterId(id),
        }
    }

    #[test]
    fn test_type_string() {
        let ty = TypeItem::generic(
            "java.util.Map",
            vec![
                TypeItem::string(),
                TypeItem::generic(
                    "java.util.List",
                    vec![TypeItem::Wildcard {
                        extends: Some(Box::new(var("T", 0))),
                        super_bound: None,
                    }],
                ),
            ],
        );
        assert_eq!(
            ty.to_type_string(),
            "java.util.Map<java.lang.String, java.util.List<? extends T>>"
        );
        assert_eq!(TypeItem::varargs(TypeItem::primitive(PrimitiveKind::Int)).to_string(), "int...");
    }

    #[test]
    fn test_substitute_replaces_only_mapped_variables() {
        let mut map = TypeVariableMap::default();
        map.insert(TypeParameterId(0), TypeItem::string());

        let ty = TypeItem::generic("java.util.Map", vec![var("K", 0), var("V", 1)]);
        assert_eq!(
            ty.substitute(&map).to_type_string(),
            "java.util.Map<java.lang.String, V>"
        );
    }

    #[test]
    fn test_constant_types() {
        assert!(TypeItem::primitive(PrimitiveKind::Long).is_constant_type());
        assert!(TypeItem::string().is_constant_type());
        assert!(!TypeItem::primitive(PrimitiveKind::Void).is_constant_type());
        assert!(!TypeItem::class("java.lang.Integer").is_constant_type());
        assert_eq!(
            TypeItem::class("java.lang.Integer").unboxed(),
            Some(PrimitiveKind::Int)
        );
    }
}
