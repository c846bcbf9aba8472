//! Constant expressions as written in source.
//!
//! Source loaders keep initializers and defaults as an [`Expression`] tree
//! and fold it on demand, following the Java rules for constant
//! expressions: binary numeric promotion, wrapping integer arithmetic,
//! masked shift distances and string conversion on concatenation. Parts the
//! model cannot evaluate (method calls, object creation) are kept as
//! [`Expression::Opaque`] text.

use smol_str::SmolStr;

use crate::error::Result;
use crate::model::{AnnotationAttribute, AnnotationItem, PrimitiveKind, TypeItem};

use super::ConstantResolver;
use super::constant::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Plus,
    Not,
    BitNot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    UShr,
    BitAnd,
    BitOr,
    BitXor,
    And,
    Or,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    Literal(Value),
    Unary(UnaryOp, Box<Expression>),
    Binary(BinaryOp, Box<Expression>, Box<Expression>),
    Conditional(Box<Expression>, Box<Expression>, Box<Expression>),
    Cast(TypeItem, Box<Expression>),
    /// A reference to a constant field, qualified by a class name or not.
    FieldRef { class: Option<SmolStr>, name: SmolStr },
    ArrayInit(Vec<Expression>),
    Annotation {
        name: SmolStr,
        attributes: Vec<(SmolStr, Expression)>,
    },
    Opaque(SmolStr),
}

impl Expression {
    /// Parse Java expression text.
    pub fn parse(text: &str) -> Result<Expression> {
        super::literal::parse_expression(text)
    }

    pub fn literal(value: Value) -> Self {
        Expression::Literal(value)
    }

    pub fn binary(op: BinaryOp, lhs: Expression, rhs: Expression) -> Self {
        Expression::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    /// Whether the tree is free of parts the model cannot evaluate.
    pub fn is_representable(&self) -> bool {
        match self {
            Expression::Opaque(_) => false,
            Expression::Literal(_) | Expression::FieldRef { .. } => true,
            Expression::Unary(_, operand) | Expression::Cast(_, operand) => operand.is_representable(),
            Expression::Binary(_, lhs, rhs) => lhs.is_representable() && rhs.is_representable(),
            Expression::Conditional(c, t, e) => {
                c.is_representable() && t.is_representable() && e.is_representable()
            }
            Expression::ArrayInit(items) => items.iter().all(Expression::is_representable),
            Expression::Annotation { attributes, .. } => {
                attributes.iter().all(|(_, value)| value.is_representable())
            }
        }
    }

    /// Fold the expression, resolving field references through `constants`.
    /// `None` when any part is opaque or not constant.
    pub fn evaluate(&self, constants: &dyn ConstantResolver) -> Option<Value> {
        match self {
            Expression::Literal(value) => Some(value.clone()),
            Expression::Opaque(_) => None,
            Expression::FieldRef { class, name } => well_known_constant(class.as_deref(), name)
                .or_else(|| constants.resolve_constant(class.as_deref(), name)),
            Expression::Unary(op, operand) => unary(*op, operand.evaluate(constants)?),
            Expression::Binary(op, lhs, rhs) => match op {
                // Short circuit, as the right side need not be constant.
                BinaryOp::And | BinaryOp::Or => {
                    let Value::Boolean(left) = lhs.evaluate(constants)? else {
                        return None;
                    };
                    if left == (*op == BinaryOp::Or) {
                        return Some(Value::Boolean(left));
                    }
                    match rhs.evaluate(constants)? {
                        Value::Boolean(right) => Some(Value::Boolean(right)),
                        _ => None,
                    }
                }
                _ => binary(*op, lhs.evaluate(constants)?, rhs.evaluate(constants)?),
            },
            Expression::Conditional(condition, then, otherwise) => match condition.evaluate(constants)? {
                Value::Boolean(true) => then.evaluate(constants),
                Value::Boolean(false) => otherwise.evaluate(constants),
                _ => None,
            },
            Expression::Cast(ty, operand) => cast(ty, operand.evaluate(constants)?),
            Expression::ArrayInit(items) => items
                .iter()
                .map(|item| item.evaluate(constants))
                .collect::<Option<Vec<_>>>()
                .map(Value::Array),
            Expression::Annotation { name, attributes } => {
                let attributes = attributes
                    .iter()
                    .map(|(key, value)| Some(AnnotationAttribute::new(key.clone(), value.evaluate(constants)?)))
                    .collect::<Option<Vec<_>>>()?;
                Some(Value::Annotation(Box::new(AnnotationItem {
                    qualified_name: name.clone(),
                    attributes,
                })))
            }
        }
    }
}

/// `MIN_VALUE`/`MAX_VALUE` of the numeric wrappers and the special
/// floating-point constants, by simple or `java.lang` qualified class name.
pub(crate) fn well_known_constant(class: Option<&str>, name: &str) -> Option<Value> {
    let class = class?;
    let class = class.strip_prefix("java.lang.").unwrap_or(class);
    Some(match (class, name) {
        ("Byte", "MIN_VALUE") => Value::Byte(i8::MIN),
        ("Byte", "MAX_VALUE") => Value::Byte(i8::MAX),
        ("Short", "MIN_VALUE") => Value::Short(i16::MIN),
        ("Short", "MAX_VALUE") => Value::Short(i16::MAX),
        ("Character", "MIN_VALUE") => Value::Char(u16::MIN),
        ("Character", "MAX_VALUE") => Value::Char(u16::MAX),
        ("Integer", "MIN_VALUE") => Value::Int(i32::MIN),
        ("Integer", "MAX_VALUE") => Value::Int(i32::MAX),
        ("Long", "MIN_VALUE") => Value::Long(i64::MIN),
        ("Long", "MAX_VALUE") => Value::Long(i64::MAX),
        ("Float", "MIN_VALUE") => Value::Float(f32::from_bits(1)),
        ("Float", "MAX_VALUE") => Value::Float(f32::MAX),
        ("Float", "NaN") => Value::Float(f32::NAN),
        ("Float", "POSITIVE_INFINITY") => Value::Float(f32::INFINITY),
        ("Float", "NEGATIVE_INFINITY") => Value::Float(f32::NEG_INFINITY),
        ("Double", "MIN_VALUE") => Value::Double(f64::from_bits(1)),
        ("Double", "MAX_VALUE") => Value::Double(f64::MAX),
        ("Double", "NaN") => Value::Double(f64::NAN),
        ("Double", "POSITIVE_INFINITY") => Value::Double(f64::INFINITY),
        ("Double", "NEGATIVE_INFINITY") => Value::Double(f64::NEG_INFINITY),
        _ => return None,
    })
}

/// Operands after binary numeric promotion.
enum Promoted {
    Int(i32, i32),
    Long(i64, i64),
    Float(f32, f32),
    Double(f64, f64),
}

fn promote(lhs: &Value, rhs: &Value) -> Option<Promoted> {
    let (l, r) = (lhs.primitive_kind()?, rhs.primitive_kind()?);
    if !l.is_numeric() || !r.is_numeric() {
        return None;
    }
    Some(if l == PrimitiveKind::Double || r == PrimitiveKind::Double {
        Promoted::Double(lhs.as_f64()?, rhs.as_f64()?)
    } else if l == PrimitiveKind::Float || r == PrimitiveKind::Float {
        Promoted::Float(as_f32(lhs)?, as_f32(rhs)?)
    } else if l == PrimitiveKind::Long || r == PrimitiveKind::Long {
        Promoted::Long(lhs.as_i64()?, rhs.as_i64()?)
    } else {
        Promoted::Int(lhs.as_i64()? as i32, rhs.as_i64()? as i32)
    })
}

fn as_f32(value: &Value) -> Option<f32> {
    match value {
        Value::Float(v) => Some(*v),
        other => other.as_i64().map(|v| v as f32),
    }
}

fn unary(op: UnaryOp, operand: Value) -> Option<Value> {
    match (op, operand) {
        (UnaryOp::Not, Value::Boolean(b)) => Some(Value::Boolean(!b)),
        (UnaryOp::Not, _) => None,
        (op, operand) => match promote(&operand, &Value::Int(0))? {
            Promoted::Int(v, _) => match op {
                UnaryOp::Neg => Some(Value::Int(v.wrapping_neg())),
                UnaryOp::Plus => Some(Value::Int(v)),
                UnaryOp::BitNot => Some(Value::Int(!v)),
                UnaryOp::Not => None,
            },
            Promoted::Long(v, _) => match op {
                UnaryOp::Neg => Some(Value::Long(v.wrapping_neg())),
                UnaryOp::Plus => Some(Value::Long(v)),
                UnaryOp::BitNot => Some(Value::Long(!v)),
                UnaryOp::Not => None,
            },
            Promoted::Float(v, _) => match op {
                UnaryOp::Neg => Some(Value::Float(-v)),
                UnaryOp::Plus => Some(Value::Float(v)),
                _ => None,
            },
            Promoted::Double(v, _) => match op {
                UnaryOp::Neg => Some(Value::Double(-v)),
                UnaryOp::Plus => Some(Value::Double(v)),
                _ => None,
            },
        },
    }
}

fn binary(op: BinaryOp, lhs: Value, rhs: Value) -> Option<Value> {
    if op == BinaryOp::Add && (matches!(lhs, Value::String(_)) || matches!(rhs, Value::String(_))) {
        let mut text = lhs.to_java_string()?;
        text.push_str(&rhs.to_java_string()?);
        return Some(Value::String(text.into()));
    }
    if let (Value::Boolean(l), Value::Boolean(r)) = (&lhs, &rhs) {
        let (l, r) = (*l, *r);
        return Some(Value::Boolean(match op {
            BinaryOp::BitAnd | BinaryOp::And => l & r,
            BinaryOp::BitOr | BinaryOp::Or => l | r,
            BinaryOp::BitXor | BinaryOp::Ne => l ^ r,
            BinaryOp::Eq => l == r,
            _ => return None,
        }));
    }
    if matches!(op, BinaryOp::Shl | BinaryOp::Shr | BinaryOp::UShr) {
        return shift(op, &lhs, &rhs);
    }
    match promote(&lhs, &rhs)? {
        Promoted::Int(l, r) => match op {
            BinaryOp::Add => Some(Value::Int(l.wrapping_add(r))),
            BinaryOp::Sub => Some(Value::Int(l.wrapping_sub(r))),
            BinaryOp::Mul => Some(Value::Int(l.wrapping_mul(r))),
            BinaryOp::Div => (r != 0).then(|| Value::Int(l.wrapping_div(r))),
            BinaryOp::Rem => (r != 0).then(|| Value::Int(l.wrapping_rem(r))),
            BinaryOp::BitAnd => Some(Value::Int(l & r)),
            BinaryOp::BitOr => Some(Value::Int(l | r)),
            BinaryOp::BitXor => Some(Value::Int(l ^ r)),
            _ => compare(op, l.partial_cmp(&r)),
        },
        Promoted::Long(l, r) => match op {
            BinaryOp::Add => Some(Value::Long(l.wrapping_add(r))),
            BinaryOp::Sub => Some(Value::Long(l.wrapping_sub(r))),
            BinaryOp::Mul => Some(Value::Long(l.wrapping_mul(r))),
            BinaryOp::Div => (r != 0).then(|| Value::Long(l.wrapping_div(r))),
            BinaryOp::Rem => (r != 0).then(|| Value::Long(l.wrapping_rem(r))),
            BinaryOp::BitAnd => Some(Value::Long(l & r)),
            BinaryOp::BitOr => Some(Value::Long(l | r)),
            BinaryOp::BitXor => Some(Value::Long(l ^ r)),
            _ => compare(op, l.partial_cmp(&r)),
        },
        Promoted::Float(l, r) => match op {
            BinaryOp::Add => Some(Value::Float(l + r)),
            BinaryOp::Sub => Some(Value::Float(l - r)),
            BinaryOp::Mul => Some(Value::Float(l * r)),
            BinaryOp::Div => Some(Value::Float(l / r)),
            BinaryOp::Rem => Some(Value::Float(l % r)),
            _ => compare(op, l.partial_cmp(&r)),
        },
        Promoted::Double(l, r) => match op {
            BinaryOp::Add => Some(Value::Double(l + r)),
            BinaryOp::Sub => Some(Value::Double(l - r)),
            BinaryOp::Mul => Some(Value::Double(l * r)),
            BinaryOp::Div => Some(Value::Double(l / r)),
            BinaryOp::Rem => Some(Value::Double(l % r)),
            _ => compare(op, l.partial_cmp(&r)),
        },
    }
}

/// Relational and equality operators. An unordered comparison (NaN) is
/// false for everything but `!=`.
fn compare(op: BinaryOp, ordering: Option<std::cmp::Ordering>) -> Option<Value> {
    use std::cmp::Ordering::{Equal, Greater, Less};
    let result = match op {
        BinaryOp::Eq => ordering == Some(Equal),
        BinaryOp::Ne => ordering != Some(Equal),
        BinaryOp::Lt => ordering == Some(Less),
        BinaryOp::Le => matches!(ordering, Some(Less | Equal)),
        BinaryOp::Gt => ordering == Some(Greater),
        BinaryOp::Ge => matches!(ordering, Some(Greater | Equal)),
        _ => return None,
    };
    Some(Value::Boolean(result))
}

/// The type of a shift is the promoted type of its left operand alone.
fn shift(op: BinaryOp, lhs: &Value, rhs: &Value) -> Option<Value> {
    let distance = rhs.as_i64()?;
    match lhs.primitive_kind()? {
        PrimitiveKind::Long => {
            let v = lhs.as_i64()?;
            let n = (distance & 0x3f) as u32;
            Some(Value::Long(match op {
                BinaryOp::Shl => v.wrapping_shl(n),
                BinaryOp::Shr => v.wrapping_shr(n),
                _ => ((v as u64) >> n) as i64,
            }))
        }
        PrimitiveKind::Int | PrimitiveKind::Short | PrimitiveKind::Byte | PrimitiveKind::Char => {
            let v = lhs.as_i64()? as i32;
            let n = (distance & 0x1f) as u32;
            Some(Value::Int(match op {
                BinaryOp::Shl => v.wrapping_shl(n),
                BinaryOp::Shr => v.wrapping_shr(n),
                _ => ((v as u32) >> n) as i32,
            }))
        }
        _ => None,
    }
}

fn cast(ty: &TypeItem, value: Value) -> Option<Value> {
    if let Some(kind) = ty.as_primitive() {
        return value.cast_to(kind);
    }
    if ty.is_string() {
        return matches!(value, Value::String(_) | Value::Null).then_some(value);
    }
    match ty.unboxed() {
        Some(kind) if value.primitive_kind() == Some(kind) => Some(value),
        Some(_) => None,
        None => Some(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::NoConstants;

    fn eval(text: &str) -> Option<Value> {
        Expression::parse(text).unwrap().evaluate(&NoConstants)
    }

    #[test]
    fn test_integer_arithmetic_wraps() {
        assert_eq!(eval("2147483647 + 1"), Some(Value::Int(i32::MIN)));
        assert_eq!(eval("-2147483648 / -1"), Some(Value::Int(i32::MIN)));
        assert_eq!(eval("7 % -3"), Some(Value::Int(1)));
        assert_eq!(eval("1 / 0"), None);
    }

    #[test]
    fn test_promotion() {
        assert_eq!(eval("1 + 2L"), Some(Value::Long(3)));
        assert_eq!(eval("1 / 2.0f"), Some(Value::Float(0.5)));
        assert_eq!(eval("'a' + 1"), Some(Value::Int(98)));
        assert_eq!(eval("1.0 / 0"), Some(Value::Double(f64::INFINITY)));
    }

    #[test]
    fn test_shifts_mask_distance() {
        assert_eq!(eval("1 << 33"), Some(Value::Int(2)));
        assert_eq!(eval("1L << 33"), Some(Value::Long(1 << 33)));
        assert_eq!(eval("-1 >>> 28"), Some(Value::Int(15)));
        assert_eq!(eval("-16 >> 2"), Some(Value::Int(-4)));
    }

    #[test]
    fn test_string_concatenation() {
        assert_eq!(eval(r#""a" + 1 + 'b' + 2.0f + true"#), Some(Value::string("a1b2.0true")));
        assert_eq!(eval(r#"1 + 2 + "x""#), Some(Value::string("3x")));
    }

    #[test]
    fn test_conditional_and_logic() {
        assert_eq!(eval("1 < 2 ? 10 : 20"), Some(Value::Int(10)));
        assert_eq!(eval("false && (1 / 0 == 0)"), Some(Value::Boolean(false)));
        assert_eq!(eval("0.0 / 0.0 != 0.0 / 0.0"), Some(Value::Boolean(true)));
    }

    #[test]
    fn test_casts() {
        assert_eq!(eval("(byte) 200"), Some(Value::Byte(-56)));
        assert_eq!(eval("(char) 65"), Some(Value::Char(65)));
        assert_eq!(eval("(int) 3.99"), Some(Value::Int(3)));
    }

    #[test]
    fn test_well_known_constants() {
        assert_eq!(eval("Integer.MAX_VALUE"), Some(Value::Int(i32::MAX)));
        assert_eq!(eval("java.lang.Long.MIN_VALUE"), Some(Value::Long(i64::MIN)));
        assert!(matches!(eval("Double.NaN"), Some(Value::Double(v)) if v.is_nan()));
    }

    #[test]
    fn test_opaque_is_not_representable() {
        let expression = Expression::Binary(
            BinaryOp::Add,
            Box::new(Expression::Literal(Value::Int(1))),
            Box::new(Expression::Opaque("compute()".into())),
        );
        assert!(!expression.is_representable());
        assert_eq!(expression.evaluate(&NoConstants), None);
    }
}
