//! Default values of parameters and annotation methods.
//!
//! A default has three observable states: absent, present but not
//! retrievable (for example a Kotlin default whose body is a call), and
//! known. [`DefaultValue::has_default_value`] and
//! [`DefaultValue::is_default_value_known`] distinguish them; the value
//! itself is only asked for once it is known.

use std::fmt;

use crate::error::{ModelError, Result};
use crate::model::TypeItem;

use super::ConstantResolver;
use super::constant::Value;
use super::expression::Expression;
use super::literal::parse_literal;

pub trait DefaultValue: fmt::Debug {
    /// Whether a default is present at all.
    fn has_default_value(&self) -> bool;

    /// Whether the default can be retrieved. Implies
    /// [`has_default_value`](Self::has_default_value).
    fn is_default_value_known(&self) -> bool;

    /// The default value, for a known default. `None` otherwise.
    fn known_value(&self, constants: &dyn ConstantResolver) -> Option<Value>;
}

/// No default.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDefaultValue;

impl DefaultValue for NoDefaultValue {
    fn has_default_value(&self) -> bool {
        false
    }

    fn is_default_value_known(&self) -> bool {
        false
    }

    fn known_value(&self, _constants: &dyn ConstantResolver) -> Option<Value> {
        None
    }
}

/// A default that exists but whose value is not available, such as a
/// compiled Kotlin `$default` bridge.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnknownDefaultValue;

impl DefaultValue for UnknownDefaultValue {
    fn has_default_value(&self) -> bool {
        true
    }

    fn is_default_value_known(&self) -> bool {
        false
    }

    fn known_value(&self, _constants: &dyn ConstantResolver) -> Option<Value> {
        None
    }
}

/// An already evaluated default: an `AnnotationDefault` attribute from a
/// class file, or a literal from signature text.
#[derive(Clone, Debug)]
pub struct ConstantDefaultValue {
    value: Value,
}

impl ConstantDefaultValue {
    pub fn new(value: Value, ty: &TypeItem) -> Result<Self> {
        let coerced = value.coerce_to(ty).ok_or_else(|| {
            ModelError::invalid_literal(value.to_source(), format!("not assignable to {ty}"))
        })?;
        Ok(Self { value: coerced })
    }

    /// Read a default from signature text.
    pub fn parse(text: &str, ty: &TypeItem) -> Result<Self> {
        Ok(Self {
            value: parse_literal(text, ty)?,
        })
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl DefaultValue for ConstantDefaultValue {
    fn has_default_value(&self) -> bool {
        true
    }

    fn is_default_value_known(&self) -> bool {
        true
    }

    fn known_value(&self, _constants: &dyn ConstantResolver) -> Option<Value> {
        Some(self.value.clone())
    }
}

/// A default expression from source.
///
/// The default is known when the expression contains nothing opaque.
#[derive(Clone, Debug)]
pub struct ExpressionDefaultValue {
    ty: TypeItem,
    expression: Expression,
}

impl ExpressionDefaultValue {
    pub fn new(ty: TypeItem, expression: Expression) -> Self {
        Self { ty, expression }
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }
}

impl DefaultValue for ExpressionDefaultValue {
    fn has_default_value(&self) -> bool {
        true
    }

    fn is_default_value_known(&self) -> bool {
        self.expression.is_representable()
    }

    fn known_value(&self, constants: &dyn ConstantResolver) -> Option<Value> {
        if !self.is_default_value_known() {
            return None;
        }
        self.expression.evaluate(constants)?.coerce_to(&self.ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PrimitiveKind;
    use crate::value::NoConstants;

    #[test]
    fn test_tri_state() {
        assert!(!NoDefaultValue.has_default_value());
        assert!(UnknownDefaultValue.has_default_value());
        assert!(!UnknownDefaultValue.is_default_value_known());

        let ty = TypeItem::primitive(PrimitiveKind::Int);
        let call = ExpressionDefaultValue::new(ty.clone(), Expression::parse("compute(2)").unwrap());
        assert!(call.has_default_value());
        assert!(!call.is_default_value_known());
        assert_eq!(call.known_value(&NoConstants), None);

        let literal = ExpressionDefaultValue::new(ty, Expression::parse("-3").unwrap());
        assert!(literal.is_default_value_known());
        assert_eq!(literal.known_value(&NoConstants), Some(Value::Int(-3)));
    }

    #[test]
    fn test_constant_default_wraps_single_element() {
        let ty = TypeItem::array(TypeItem::string());
        let value = ConstantDefaultValue::new(Value::string("a"), &ty).unwrap();
        assert_eq!(value.value(), &Value::Array(vec![Value::string("a")]));
        assert!(ConstantDefaultValue::new(Value::string("a"), &TypeItem::primitive(PrimitiveKind::Int)).is_err());
    }
}
