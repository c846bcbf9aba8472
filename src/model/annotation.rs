//! Annotations attached to items.

use smol_str::SmolStr;

use crate::value::Value;

pub const JAVA_DEPRECATED: &str = "java.lang.Deprecated";
pub const KOTLIN_DEPRECATED: &str = "kotlin.Deprecated";
pub const JAVA_RETENTION: &str = "java.lang.annotation.Retention";
pub const KOTLIN_RETENTION: &str = "kotlin.annotation.Retention";

/// One `name=value` pair of an annotation use.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationAttribute {
    pub name: SmolStr,
    pub value: Value,
}

impl AnnotationAttribute {
    pub fn new(name: impl Into<SmolStr>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// An annotation use such as `@java.lang.annotation.Retention(RUNTIME)`.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationItem {
    pub qualified_name: SmolStr,
    pub attributes: Vec<AnnotationAttribute>,
}

impl AnnotationItem {
    pub fn new(qualified_name: impl Into<SmolStr>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<SmolStr>, value: Value) -> Self {
        self.attributes.push(AnnotationAttribute::new(name, value));
        self
    }

    pub fn find_attribute(&self, name: &str) -> Option<&AnnotationAttribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn simple_name(&self) -> &str {
        self.qualified_name
            .rsplit('.')
            .next()
            .unwrap_or(&self.qualified_name)
    }

    pub fn is_deprecated(&self) -> bool {
        matches!(self.qualified_name.as_str(), JAVA_DEPRECATED | KOTLIN_DEPRECATED)
    }

    /// Render as source: `@a.B`, `@a.B(1)` when the only attribute is
    /// `value`, otherwise `@a.B(x=1, y="s")`.
    pub fn to_source(&self) -> String {
        let mut out = format!("@{}", self.qualified_name);
        match self.attributes.as_slice() {
            [] => {}
            [only] if only.name == "value" => {
                out.push('(');
                out.push_str(&only.value.to_source());
                out.push(')');
            }
            attributes => {
                out.push('(');
                for (i, attribute) in attributes.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(&attribute.name);
                    out.push('=');
                    out.push_str(&attribute.value.to_source());
                }
                out.push(')');
            }
        }
        out
    }

    /// Same annotation name and equal attribute values, in any order.
    pub fn equivalent_to(&self, other: &AnnotationItem) -> bool {
        self.qualified_name == other.qualified_name
            && self.attributes.len() == other.attributes.len()
            && self.attributes.iter().all(|a| {
                other
                    .find_attribute(&a.name)
                    .is_some_and(|b| a.value.to_source() == b.value.to_source())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_source_forms() {
        assert_eq!(AnnotationItem::new("a.B").to_source(), "@a.B");
        assert_eq!(
            AnnotationItem::new("a.B")
                .with_attribute("value", Value::Int(1))
                .to_source(),
            "@a.B(1)"
        );
        assert_eq!(
            AnnotationItem::new("a.B")
                .with_attribute("x", Value::Int(1))
                .with_attribute("y", Value::string("s"))
                .to_source(),
            "@a.B(x=1, y=\"s\")"
        );
    }

    #[test]
    fn test_equivalent_ignores_attribute_order() {
        let a = AnnotationItem::new("a.B")
            .with_attribute("x", Value::Int(1))
            .with_attribute("y", Value::Boolean(true));
        let b = AnnotationItem::new("a.B")
            .with_attribute("y", Value::Boolean(true))
            .with_attribute("x", Value::Int(1));
        let c = AnnotationItem::new("a.B").with_attribute("x", Value::Int(2));

        assert!(a.equivalent_to(&b));
        assert!(!a.equivalent_to(&c));
    }
}
