//! Literal values attached to fields, parameters and annotations.
//!
//! - [`Value`]: a constant in canonical form, rendered by [`Value::to_source`]
//! - [`Expression`]: source initializer trees, folded on demand
//! - [`parse_literal`] / [`parse_annotation`]: signature-text literals
//! - [`FieldValue`] / [`DefaultValue`]: lazy per-backend value providers
//!
//! Whichever backend populated a codebase, the renderers in `render` produce
//! the same text for the same logical API.

mod constant;
mod default_value;
mod expression;
mod field_value;
mod lexer;
mod literal;
mod render;

pub use constant::Value;
pub use default_value::{
    ConstantDefaultValue, DefaultValue, ExpressionDefaultValue, NoDefaultValue, UnknownDefaultValue,
};
pub use expression::{BinaryOp, Expression, UnaryOp};
pub use field_value::{ConstantFieldValue, ExpressionFieldValue, FieldValue, TextFieldValue};
pub use literal::{parse_annotation, parse_literal};
pub use render::annotation_attribute_source;

/// Looks up the value of a constant field referenced from an expression.
///
/// `class` is the qualifier as written (`Foo.BAR` gives `Some("Foo")`),
/// `None` for a bare name.
pub trait ConstantResolver {
    fn resolve_constant(&self, class: Option<&str>, name: &str) -> Option<Value>;
}

/// A resolver that knows no fields.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoConstants;

impl ConstantResolver for NoConstants {
    fn resolve_constant(&self, _class: Option<&str>, _name: &str) -> Option<Value> {
        None
    }
}
