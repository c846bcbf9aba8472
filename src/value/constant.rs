//! Literal values and their canonical source form.
//!
//! Whatever produced a value (a class-file constant, a folded source
//! expression, or a literal re-parsed from signature text), it ends up as a
//! [`Value`], and [`Value::to_source`] is the single place that decides how
//! it is written back out.

use smol_str::SmolStr;

use crate::model::{AnnotationItem, PrimitiveKind, TypeItem};

/// A literal value attached to a field, parameter or annotation attribute.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    /// A UTF-16 code unit, as in Java.
    Char(u16),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(SmolStr),
    /// A class literal; holds the qualified name without `.class`.
    Class(SmolStr),
    /// A reference to an enum constant.
    Enum { class: SmolStr, constant: SmolStr },
    Array(Vec<Value>),
    Annotation(Box<AnnotationItem>),
}

impl Value {
    pub fn string(s: impl Into<SmolStr>) -> Self {
        Value::String(s.into())
    }

    /// A `char` value, or `None` for a supplementary character, which
    /// needs two UTF-16 units.
    pub fn char(c: char) -> Option<Self> {
        u16::try_from(u32::from(c)).ok().map(Value::Char)
    }

    /// Whether this is a Java compile-time constant: a primitive or a string.
    pub fn is_constant(&self) -> bool {
        matches!(
            self,
            Value::Boolean(_)
                | Value::Char(_)
                | Value::Byte(_)
                | Value::Short(_)
                | Value::Int(_)
                | Value::Long(_)
                | Value::Float(_)
                | Value::Double(_)
                | Value::String(_)
        )
    }

    /// The primitive kind of a numeric, char or boolean value.
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        Some(match self {
            Value::Boolean(_) => PrimitiveKind::Boolean,
            Value::Char(_) => PrimitiveKind::Char,
            Value::Byte(_) => PrimitiveKind::Byte,
            Value::Short(_) => PrimitiveKind::Short,
            Value::Int(_) => PrimitiveKind::Int,
            Value::Long(_) => PrimitiveKind::Long,
            Value::Float(_) => PrimitiveKind::Float,
            Value::Double(_) => PrimitiveKind::Double,
            _ => return None,
        })
    }

    pub(crate) fn as_i64(&self) -> Option<i64> {
        Some(match *self {
            Value::Char(c) => c as i64,
            Value::Byte(v) => v as i64,
            Value::Short(v) => v as i64,
            Value::Int(v) => v as i64,
            Value::Long(v) => v,
            _ => return None,
        })
    }

    pub(crate) fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Float(v) => Some(v as f64),
            Value::Double(v) => Some(v),
            _ => self.as_i64().map(|v| v as f64),
        }
    }

    /// Convert a numeric or char value with Java cast semantics.
    pub fn cast_to(&self, kind: PrimitiveKind) -> Option<Value> {
        if let Value::Boolean(b) = self {
            return (kind == PrimitiveKind::Boolean).then_some(Value::Boolean(*b));
        }
        let is_floating = matches!(self, Value::Float(_) | Value::Double(_));
        let wide = self.as_i64();
        let real = self.as_f64()?;
        // Floating to integral conversions saturate, matching `as` in Rust.
        let integral = |bits: fn(i64) -> Value, sat: fn(f64) -> Value| match wide {
            Some(v) if !is_floating => Some(bits(v)),
            _ => Some(sat(real)),
        };
        match kind {
            PrimitiveKind::Byte => integral(|v| Value::Byte(v as i8), |f| Value::Byte(f as i32 as i8)),
            PrimitiveKind::Short => integral(|v| Value::Short(v as i16), |f| Value::Short(f as i32 as i16)),
            PrimitiveKind::Char => integral(|v| Value::Char(v as u16), |f| Value::Char(f as i32 as u16)),
            PrimitiveKind::Int => integral(|v| Value::Int(v as i32), |f| Value::Int(f as i32)),
            PrimitiveKind::Long => integral(Value::Long, |f| Value::Long(f as i64)),
            PrimitiveKind::Float => Some(Value::Float(match wide {
                Some(v) if !is_floating => v as f32,
                _ => real as f32,
            })),
            PrimitiveKind::Double => Some(Value::Double(match (wide, self) {
                (_, Value::Float(f)) => *f as f64,
                (Some(v), _) if !is_floating => v as f64,
                _ => real,
            })),
            PrimitiveKind::Boolean | PrimitiveKind::Void => None,
        }
    }

    /// Adapt a value to the declared type of the item holding it.
    ///
    /// Numeric values are converted to the declared primitive (or the
    /// primitive a wrapper unboxes to), a lone value assigned to an array
    /// type is wrapped into a one-element array, and array elements are
    /// adapted to the component type. Returns `None` for values the type
    /// cannot hold.
    pub fn coerce_to(&self, ty: &TypeItem) -> Option<Value> {
        if let Some(component) = ty.array_component() {
            return match self {
                Value::Array(items) => items
                    .iter()
                    .map(|item| item.coerce_to(component))
                    .collect::<Option<Vec<_>>>()
                    .map(Value::Array),
                Value::Null => Some(Value::Null),
                single => single.coerce_to(component).map(|v| Value::Array(vec![v])),
            };
        }
        if let Some(kind) = ty.unboxed() {
            return match self {
                Value::Null if ty.as_primitive().is_none() => Some(Value::Null),
                _ => self.cast_to(kind),
            };
        }
        match self {
            Value::String(_) if ty.is_string() => Some(self.clone()),
            Value::String(_) => ty.class_name().is_some().then(|| self.clone()),
            _ if ty.as_primitive().is_some() => None,
            _ => Some(self.clone()),
        }
    }

    /// `String.valueOf` of a constant, as used by string concatenation.
    pub(crate) fn to_java_string(&self) -> Option<String> {
        Some(match self {
            Value::Null => "null".to_string(),
            Value::Boolean(b) => b.to_string(),
            // A lone surrogate has no UTF-8 form; leave the expression unfolded.
            Value::Char(c) => String::from_utf16(&[*c]).ok()?,
            Value::Byte(v) => v.to_string(),
            Value::Short(v) => v.to_string(),
            Value::Int(v) => v.to_string(),
            Value::Long(v) => v.to_string(),
            Value::Float(v) if v.is_nan() => "NaN".to_string(),
            Value::Float(v) if v.is_infinite() => if *v > 0.0 { "Infinity" } else { "-Infinity" }.to_string(),
            Value::Float(v) => java_decimal(format!("{}", v), format!("{:e}", v), v.abs() as f64, *v == 0.0),
            Value::Double(v) if v.is_nan() => "NaN".to_string(),
            Value::Double(v) if v.is_infinite() => if *v > 0.0 { "Infinity" } else { "-Infinity" }.to_string(),
            Value::Double(v) => java_decimal(format!("{}", v), format!("{:e}", v), v.abs(), *v == 0.0),
            Value::String(s) => s.to_string(),
            _ => return None,
        })
    }

    /// Render the value as Java source text.
    pub fn to_source(&self) -> String {
        let mut out = String::new();
        self.write_source(&mut out);
        out
    }

    fn write_source(&self, out: &mut String) {
        match self {
            Value::Null => out.push_str("null"),
            Value::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::Char(c) => {
                out.push('\'');
                escape_unit(*c, '\'', out);
                out.push('\'');
            }
            Value::Byte(v) => out.push_str(&v.to_string()),
            Value::Short(v) => out.push_str(&v.to_string()),
            Value::Int(v) => out.push_str(&v.to_string()),
            Value::Long(v) => {
                out.push_str(&v.to_string());
                out.push('L');
            }
            Value::Float(v) => out.push_str(&float_source(*v)),
            Value::Double(v) => out.push_str(&double_source(*v)),
            Value::String(s) => {
                out.push('"');
                for unit in s.encode_utf16() {
                    escape_unit(unit, '"', out);
                }
                out.push('"');
            }
            Value::Class(name) => {
                out.push_str(name);
                out.push_str(".class");
            }
            Value::Enum { class, constant } => {
                out.push_str(class);
                out.push('.');
                out.push_str(constant);
            }
            Value::Array(items) => {
                out.push('{');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    item.write_source(out);
                }
                out.push('}');
            }
            Value::Annotation(annotation) => out.push_str(&annotation.to_source()),
        }
    }
}

fn escape_unit(unit: u16, quote: char, out: &mut String) {
    match unit {
        0x5c => out.push_str("\\\\"),
        0x0a => out.push_str("\\n"),
        0x09 => out.push_str("\\t"),
        0x0d => out.push_str("\\r"),
        0x08 => out.push_str("\\b"),
        0x0c => out.push_str("\\f"),
        0x22 if quote == '"' => out.push_str("\\\""),
        0x27 if quote == '\'' => out.push_str("\\'"),
        0x20..=0x7e => out.push(unit as u8 as char),
        _ => out.push_str(&format!("\\u{:04x}", unit)),
    }
}

fn float_source(v: f32) -> String {
    if v.is_nan() {
        return "(0.0f/0.0f)".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "(1.0f/0.0f)" } else { "(-1.0f/0.0f)" }.to_string();
    }
    let text = java_decimal(format!("{}", v), format!("{:e}", v), v.abs() as f64, v == 0.0);
    format!("{}f", text)
}

fn double_source(v: f64) -> String {
    if v.is_nan() {
        return "(0.0/0.0)".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "(1.0/0.0)" } else { "(-1.0/0.0)" }.to_string();
    }
    java_decimal(format!("{}", v), format!("{:e}", v), v.abs(), v == 0.0)
}

/// Apply `Double.toString` layout rules to Rust's shortest round-trip digits:
/// plain notation in `[1e-3, 1e7)`, otherwise `d.dddE±n`, and always at
/// least one fractional digit.
fn java_decimal(plain: String, scientific: String, magnitude: f64, is_zero: bool) -> String {
    if is_zero || (1e-3..1e7).contains(&magnitude) {
        if plain.contains('.') {
            plain
        } else {
            format!("{}.0", plain)
        }
    } else {
        let (mantissa, exponent) = scientific
            .split_once('e')
            .unwrap_or((scientific.as_str(), "0"));
        if mantissa.contains('.') {
            format!("{}E{}", mantissa, exponent)
        } else {
            format!("{}.0E{}", mantissa, exponent)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_source() {
        assert_eq!(Value::Int(-5).to_source(), "-5");
        assert_eq!(Value::Long(5).to_source(), "5L");
        assert_eq!(Value::Float(1.0).to_source(), "1.0f");
        assert_eq!(Value::Float(0.5).to_source(), "0.5f");
        assert_eq!(Value::Double(1.0e10).to_source(), "1.0E10");
        assert_eq!(Value::Double(1.5e-5).to_source(), "1.5E-5");
        assert_eq!(Value::Double(1234567.0).to_source(), "1234567.0");
        assert_eq!(Value::Double(-0.0).to_source(), "-0.0");
    }

    #[test]
    fn test_special_floating_source() {
        assert_eq!(Value::Float(f32::NAN).to_source(), "(0.0f/0.0f)");
        assert_eq!(Value::Double(f64::INFINITY).to_source(), "(1.0/0.0)");
        assert_eq!(Value::Double(f64::NEG_INFINITY).to_source(), "(-1.0/0.0)");
    }

    #[test]
    fn test_text_source_escapes() {
        assert_eq!(Value::Char(0x0a).to_source(), "'\\n'");
        assert_eq!(Value::Char(0x27).to_source(), "'\\''");
        assert_eq!(Value::Char(0x22).to_source(), "'\"'");
        assert_eq!(Value::string("a\"b\\c").to_source(), "\"a\\\"b\\\\c\"");
        assert_eq!(Value::string("caf\u{e9}").to_source(), "\"caf\\u00e9\"");
    }

    #[test]
    fn test_char_outside_basic_plane() {
        assert_eq!(Value::char('\u{e9}'), Some(Value::Char(0xe9)));
        assert_eq!(Value::char('\u{ffff}'), Some(Value::Char(0xffff)));
        assert_eq!(Value::char('\u{1F600}'), None);
    }

    #[test]
    fn test_lone_surrogate_does_not_concatenate() {
        assert_eq!(Value::Char(0xd800).to_java_string(), None);
        assert_eq!(Value::Char(0x41).to_java_string(), Some("A".to_string()));
        assert_eq!(Value::Char(0xd800).to_source(), "'\\ud800'");
    }

    #[test]
    fn test_reference_source() {
        let value = Value::Array(vec![
            Value::Class("java.lang.String".into()),
            Value::Enum {
                class: "java.lang.annotation.ElementType".into(),
                constant: "FIELD".into(),
            },
        ]);
        assert_eq!(
            value.to_source(),
            "{java.lang.String.class, java.lang.annotation.ElementType.FIELD}"
        );
    }

    #[test]
    fn test_coerce_numeric_to_declared_type() {
        let long = TypeItem::primitive(PrimitiveKind::Long);
        assert_eq!(Value::Int(3).coerce_to(&long), Some(Value::Long(3)));

        let float = TypeItem::class("java.lang.Float");
        assert_eq!(Value::Int(2).coerce_to(&float), Some(Value::Float(2.0)));

        let chars = TypeItem::primitive(PrimitiveKind::Char);
        assert_eq!(Value::Int(65).coerce_to(&chars), Some(Value::Char(65)));

        assert_eq!(Value::string("x").coerce_to(&long), None);
    }

    #[test]
    fn test_coerce_wraps_single_value_into_array() {
        let ints = TypeItem::array(TypeItem::primitive(PrimitiveKind::Int));
        assert_eq!(
            Value::Int(1).coerce_to(&ints),
            Some(Value::Array(vec![Value::Int(1)]))
        );
    }

    #[test]
    fn test_cast_narrowing_wraps() {
        assert_eq!(Value::Int(300).cast_to(PrimitiveKind::Byte), Some(Value::Byte(44)));
        assert_eq!(Value::Double(3.9).cast_to(PrimitiveKind::Int), Some(Value::Int(3)));
    }
}
