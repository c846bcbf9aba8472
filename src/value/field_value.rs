//! Initial values of fields.
//!
//! Each input backend supplies its own provider: compiled classes hand over
//! the constant-pool value, source loaders the initializer expression, and
//! signature files the literal text. All of them answer through
//! [`FieldValue::initial_value`].

use std::fmt;

use crate::error::Result;
use crate::model::{PrimitiveKind, TypeItem};

use super::ConstantResolver;
use super::constant::Value;
use super::expression::Expression;
use super::literal::parse_literal;

pub trait FieldValue: fmt::Debug {
    /// The field's initial value.
    ///
    /// With `require_constant` only compile-time constants (primitives and
    /// strings of a constant-typed field) are returned; otherwise arrays,
    /// class literals and enum references are returned too. References to
    /// other fields go through `constants`.
    fn initial_value(&self, constants: &dyn ConstantResolver, require_constant: bool) -> Option<Value>;
}

fn constant_filter(ty: &TypeItem, value: Value, require_constant: bool) -> Option<Value> {
    if require_constant && !(value.is_constant() && ty.is_constant_type()) {
        return None;
    }
    Some(value)
}

/// A `ConstantValue` attribute read from a class file.
///
/// Class files only record constants for primitive and `String` fields, so
/// this never yields anything for other types even when the source shows an
/// initializer.
#[derive(Debug)]
pub struct ConstantFieldValue {
    value: Option<Value>,
}

impl ConstantFieldValue {
    pub fn new(ty: &TypeItem, raw: Option<Value>) -> Self {
        let value = raw.filter(|_| ty.is_constant_type()).and_then(|raw| {
            // The constant pool stores booleans as ints.
            let raw = match (ty.unboxed(), raw) {
                (Some(PrimitiveKind::Boolean), Value::Int(v)) => Value::Boolean(v != 0),
                (_, raw) => raw,
            };
            raw.coerce_to(ty)
        });
        Self { value }
    }
}

impl FieldValue for ConstantFieldValue {
    fn initial_value(&self, _constants: &dyn ConstantResolver, _require_constant: bool) -> Option<Value> {
        self.value.clone()
    }
}

/// An initializer expression from source, folded each time it is asked for.
///
/// Duplicated fields share the provider while resolving references from
/// different classes, so nothing is cached here.
#[derive(Debug)]
pub struct ExpressionFieldValue {
    ty: TypeItem,
    expression: Expression,
}

impl ExpressionFieldValue {
    pub fn new(ty: TypeItem, expression: Expression) -> Self {
        Self { ty, expression }
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }
}

impl FieldValue for ExpressionFieldValue {
    fn initial_value(&self, constants: &dyn ConstantResolver, require_constant: bool) -> Option<Value> {
        let value = self.expression.evaluate(constants)?.coerce_to(&self.ty)?;
        constant_filter(&self.ty, value, require_constant)
    }
}

/// A literal read from signature text, parsed once up front.
#[derive(Debug)]
pub struct TextFieldValue {
    ty: TypeItem,
    value: Value,
}

impl TextFieldValue {
    pub fn parse(text: &str, ty: &TypeItem) -> Result<Self> {
        Ok(Self {
            ty: ty.clone(),
            value: parse_literal(text, ty)?,
        })
    }
}

impl FieldValue for TextFieldValue {
    fn initial_value(&self, _constants: &dyn ConstantResolver, require_constant: bool) -> Option<Value> {
        constant_filter(&self.ty, self.value.clone(), require_constant)
    }
}
