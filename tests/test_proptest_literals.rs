//! Property tests for literal rendering and constant folding.
//!
//! Rendered literals are what signature files store, so anything
//! [`Value::to_source`] writes must read back to the same value, and folding
//! must follow Java arithmetic for every operand, not just the handful in the
//! unit tests.
#![cfg(feature = "proptest")]

use proptest::prelude::*;
use surface::model::{PrimitiveKind, TypeItem};
use surface::value::{Expression, NoConstants, Value, parse_literal};

fn reparse(value: &Value, ty: &TypeItem) -> Value {
    parse_literal(&value.to_source(), ty).unwrap()
}

proptest! {
    #[test]
    fn int_literals_read_back(v in any::<i32>()) {
        let ty = TypeItem::primitive(PrimitiveKind::Int);
        prop_assert_eq!(reparse(&Value::Int(v), &ty), Value::Int(v));
    }

    #[test]
    fn long_literals_read_back(v in any::<i64>()) {
        let ty = TypeItem::primitive(PrimitiveKind::Long);
        prop_assert_eq!(reparse(&Value::Long(v), &ty), Value::Long(v));
    }

    #[test]
    fn double_literals_read_back(v in any::<f64>()) {
        let ty = TypeItem::primitive(PrimitiveKind::Double);
        match reparse(&Value::Double(v), &ty) {
            Value::Double(back) if v.is_nan() => prop_assert!(back.is_nan()),
            Value::Double(back) => prop_assert_eq!(back.to_bits(), v.to_bits()),
            other => prop_assert!(false, "expected a double, got {:?}", other),
        }
    }

    #[test]
    fn float_literals_read_back(v in any::<f32>().prop_filter("finite", |v| v.is_finite())) {
        let ty = TypeItem::primitive(PrimitiveKind::Float);
        prop_assert_eq!(reparse(&Value::Float(v), &ty), Value::Float(v));
    }

    #[test]
    fn char_literals_read_back(unit in any::<u16>()) {
        let ty = TypeItem::primitive(PrimitiveKind::Char);
        prop_assert_eq!(reparse(&Value::Char(unit), &ty), Value::Char(unit));
    }

    #[test]
    fn string_literals_read_back(s in "\\PC{0,24}") {
        let value = Value::string(s.as_str());
        prop_assert_eq!(reparse(&value, &TypeItem::string()), value);
    }

    #[test]
    fn int_folding_wraps(a in any::<i32>(), b in any::<i32>()) {
        let text = format!("({}) * ({}) + ({})", a, b, a);
        let folded = Expression::parse(&text).unwrap().evaluate(&NoConstants);
        prop_assert_eq!(folded, Some(Value::Int(a.wrapping_mul(b).wrapping_add(a))));
    }

    #[test]
    fn long_shift_masks_distance(v in any::<i64>(), n in 0i32..256) {
        let text = format!("{}L >>> {}", v, n);
        let folded = Expression::parse(&text).unwrap().evaluate(&NoConstants);
        prop_assert_eq!(folded, Some(Value::Long(((v as u64) >> (n & 63)) as i64)));
    }
}
