//! Parsing of literal and expression text.
//!
//! Signature files carry values as Java source text (`5L`, `"a\tb"`,
//! `(1.0/0.0)`, `{@a.B, @a.C}`); source loaders hand over initializer text.
//! Both go through the recursive-descent parser here, which produces an
//! [`Expression`]. Unary minus applied directly to a numeric literal is
//! folded into it so that `-2147483648` and `-9223372036854775808L` are
//! accepted.

use smol_str::SmolStr;

use crate::error::{ModelError, Result};
use crate::model::{AnnotationItem, PrimitiveKind, TypeItem};

use super::ConstantResolver;
use super::constant::Value;
use super::expression::{BinaryOp, Expression, UnaryOp};
use super::lexer::{Lexeme, Token, tokenize};

/// Parse signature-text `text` as a value of type `ty`.
///
/// Qualified names that are not well-known constants are read as enum
/// constants, since the text carries no other kind of reference.
pub fn parse_literal(text: &str, ty: &TypeItem) -> Result<Value> {
    let value = parse_expression(text)?
        .evaluate(&TextReferences)
        .ok_or_else(|| ModelError::invalid_literal(text, "not a constant value"))?;
    value
        .coerce_to(ty)
        .ok_or_else(|| ModelError::invalid_literal(text, format!("not assignable to {ty}")))
}

/// Parse annotation text such as `@a.B(x = 1, y = "s")`.
pub fn parse_annotation(text: &str) -> Result<AnnotationItem> {
    match parse_expression(text)?.evaluate(&TextReferences) {
        Some(Value::Annotation(annotation)) => Ok(*annotation),
        _ => Err(ModelError::invalid_literal(text, "not an annotation")),
    }
}

/// Resolves `a.b.E.X` to an enum constant and nothing else.
struct TextReferences;

impl ConstantResolver for TextReferences {
    fn resolve_constant(&self, class: Option<&str>, name: &str) -> Option<Value> {
        class.map(|class| Value::Enum {
            class: class.into(),
            constant: name.into(),
        })
    }
}

pub(crate) fn parse_expression(text: &str) -> Result<Expression> {
    let mut parser = Parser {
        source: text,
        tokens: tokenize(text)?,
        pos: 0,
    };
    if parser.tokens.is_empty() {
        return Err(parser.error("empty expression"));
    }
    let expression = parser.conditional()?;
    if parser.pos != parser.tokens.len() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(expression)
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Lexeme<'a>>,
    pos: usize,
}

/// Binary operators with their precedence, loosest first.
fn binary_operator(token: Token) -> Option<(BinaryOp, u8)> {
    Some(match token {
        Token::OrOr => (BinaryOp::Or, 1),
        Token::AndAnd => (BinaryOp::And, 2),
        Token::Pipe => (BinaryOp::BitOr, 3),
        Token::Caret => (BinaryOp::BitXor, 4),
        Token::Amp => (BinaryOp::BitAnd, 5),
        Token::EqEq => (BinaryOp::Eq, 6),
        Token::NotEq => (BinaryOp::Ne, 6),
        Token::Lt => (BinaryOp::Lt, 7),
        Token::LtEq => (BinaryOp::Le, 7),
        Token::Gt => (BinaryOp::Gt, 7),
        Token::GtEq => (BinaryOp::Ge, 7),
        Token::Shl => (BinaryOp::Shl, 8),
        Token::Shr => (BinaryOp::Shr, 8),
        Token::UShr => (BinaryOp::UShr, 8),
        Token::Plus => (BinaryOp::Add, 9),
        Token::Minus => (BinaryOp::Sub, 9),
        Token::Star => (BinaryOp::Mul, 10),
        Token::Slash => (BinaryOp::Div, 10),
        Token::Percent => (BinaryOp::Rem, 10),
        _ => return None,
    })
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<Token> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<Token> {
        self.tokens.get(self.pos + offset).map(|l| l.token)
    }

    fn bump(&mut self) -> Result<Lexeme<'a>> {
        let lexeme = *self
            .tokens
            .get(self.pos)
            .ok_or_else(|| self.error("unexpected end of input"))?;
        self.pos += 1;
        Ok(lexeme)
    }

    fn eat(&mut self, token: Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: Token, what: &str) -> Result<Lexeme<'a>> {
        if self.peek() == Some(token) {
            self.bump()
        } else {
            Err(self.error(&format!("expected {what}")))
        }
    }

    fn error(&self, reason: &str) -> ModelError {
        ModelError::invalid_literal(self.source, reason)
    }

    fn conditional(&mut self) -> Result<Expression> {
        let condition = self.binary(1)?;
        if !self.eat(Token::Question) {
            return Ok(condition);
        }
        let then = self.conditional()?;
        self.expect(Token::Colon, "':'")?;
        let otherwise = self.conditional()?;
        Ok(Expression::Conditional(
            Box::new(condition),
            Box::new(then),
            Box::new(otherwise),
        ))
    }

    fn binary(&mut self, min_precedence: u8) -> Result<Expression> {
        let mut lhs = self.unary()?;
        while let Some((op, precedence)) = self.peek().and_then(binary_operator) {
            if precedence < min_precedence {
                break;
            }
            self.pos += 1;
            let rhs = self.binary(precedence + 1)?;
            lhs = Expression::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expression> {
        let op = match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                return match self.peek() {
                    Some(Token::Int) => Ok(Expression::Literal(int_literal(self.bump()?.text, true)?)),
                    Some(Token::Float) => Ok(Expression::Literal(float_literal(self.bump()?.text, true)?)),
                    _ => Ok(Expression::Unary(UnaryOp::Neg, Box::new(self.unary()?))),
                };
            }
            Some(Token::Plus) => UnaryOp::Plus,
            Some(Token::Bang) => UnaryOp::Not,
            Some(Token::Tilde) => UnaryOp::BitNot,
            Some(Token::LParen) => {
                if let Some(ty) = self.cast_type() {
                    let operand = self.unary()?;
                    return Ok(Expression::Cast(ty, Box::new(operand)));
                }
                return self.primary();
            }
            _ => return self.primary(),
        };
        self.pos += 1;
        Ok(Expression::Unary(op, Box::new(self.unary()?)))
    }

    /// Consume `(type)` if the parenthesis opens a cast. Primitive casts are
    /// always casts; `(String)` and the wrapper classes only when an operand
    /// that cannot continue a parenthesized expression follows.
    fn cast_type(&mut self) -> Option<TypeItem> {
        let mut offset = 1;
        let mut name = String::new();
        loop {
            let lexeme = self.tokens.get(self.pos + offset)?;
            if lexeme.token != Token::Ident {
                return None;
            }
            name.push_str(lexeme.text);
            offset += 1;
            if self.peek_at(offset) == Some(Token::Dot) {
                name.push('.');
                offset += 1;
            } else {
                break;
            }
        }
        if self.peek_at(offset) != Some(Token::RParen) {
            return None;
        }
        let ty = match PrimitiveKind::from_keyword(&name) {
            Some(PrimitiveKind::Void) => return None,
            Some(kind) => TypeItem::primitive(kind),
            None => {
                let qualified = if name.contains('.') { name } else { format!("java.lang.{name}") };
                let is_cast_target = qualified == crate::model::JAVA_LANG_STRING
                    || PrimitiveKind::from_boxed_name(&qualified).is_some();
                let operand_follows = matches!(
                    self.peek_at(offset + 1),
                    Some(
                        Token::Int
                            | Token::Float
                            | Token::Char
                            | Token::String
                            | Token::True
                            | Token::False
                            | Token::Null
                            | Token::Ident
                            | Token::LParen
                            | Token::Bang
                            | Token::Tilde
                    )
                );
                if !is_cast_target || !operand_follows {
                    return None;
                }
                TypeItem::class(qualified)
            }
        };
        self.pos += offset + 1;
        Some(ty)
    }

    fn primary(&mut self) -> Result<Expression> {
        let lexeme = self.bump()?;
        let value = match lexeme.token {
            Token::Int => int_literal(lexeme.text, false)?,
            Token::Float => float_literal(lexeme.text, false)?,
            Token::Char => char_literal(lexeme.text)?,
            Token::String => string_literal(lexeme.text)?,
            Token::True => Value::Boolean(true),
            Token::False => Value::Boolean(false),
            Token::Null => Value::Null,
            Token::LParen => {
                let inner = self.conditional()?;
                self.expect(Token::RParen, "')'")?;
                return Ok(inner);
            }
            Token::LBrace => return self.array_init(),
            Token::At => return self.annotation(),
            Token::Ident if lexeme.text == "new" => return Ok(self.opaque_from(lexeme.start)),
            Token::Ident => return self.name(lexeme),
            _ => return Err(self.error(&format!("unexpected '{}'", lexeme.text))),
        };
        Ok(Expression::Literal(value))
    }

    fn array_init(&mut self) -> Result<Expression> {
        let mut items = Vec::new();
        while !self.eat(Token::RBrace) {
            items.push(self.conditional()?);
            if !self.eat(Token::Comma) {
                self.expect(Token::RBrace, "'}'")?;
                break;
            }
        }
        Ok(Expression::ArrayInit(items))
    }

    fn annotation(&mut self) -> Result<Expression> {
        let name = self.qualified_name()?;
        let mut attributes = Vec::new();
        if self.eat(Token::LParen) && !self.eat(Token::RParen) {
            if self.peek() == Some(Token::Ident) && self.peek_at(1) == Some(Token::Assign) {
                loop {
                    let key = self.expect(Token::Ident, "attribute name")?.text;
                    self.expect(Token::Assign, "'='")?;
                    attributes.push((SmolStr::from(key), self.conditional()?));
                    if !self.eat(Token::Comma) {
                        break;
                    }
                }
            } else {
                attributes.push((SmolStr::new_static("value"), self.conditional()?));
            }
            self.expect(Token::RParen, "')'")?;
        }
        Ok(Expression::Annotation { name, attributes })
    }

    fn qualified_name(&mut self) -> Result<SmolStr> {
        let mut name = self.expect(Token::Ident, "name")?.text.to_string();
        while self.peek() == Some(Token::Dot) && self.peek_at(1) == Some(Token::Ident) {
            self.pos += 1;
            name.push('.');
            name.push_str(self.bump()?.text);
        }
        Ok(name.into())
    }

    /// A field reference, class literal, or a call kept as opaque text.
    fn name(&mut self, first: Lexeme<'a>) -> Result<Expression> {
        let mut segments = vec![first.text];
        while self.peek() == Some(Token::Dot) && self.peek_at(1) == Some(Token::Ident) {
            self.pos += 1;
            segments.push(self.bump()?.text);
            if segments.last() == Some(&"class") {
                break;
            }
        }
        if self.peek() == Some(Token::LParen) {
            return Ok(self.opaque_from(first.start));
        }

        let mut dimensions = 0;
        while self.peek() == Some(Token::LBracket) && self.peek_at(1) == Some(Token::RBracket) {
            self.pos += 2;
            dimensions += 1;
        }
        if dimensions > 0 {
            self.expect(Token::Dot, "'.class'")?;
            let class = self.expect(Token::Ident, "'class'")?;
            if class.text != "class" {
                return Err(self.error("expected '.class'"));
            }
            segments.push("class");
        }

        let last = segments.len() - 1;
        if segments[last] == "class" && last > 0 {
            let mut name = segments[..last].join(".");
            name.push_str(&"[]".repeat(dimensions));
            return Ok(Expression::Literal(Value::Class(name.into())));
        }
        let class = (last > 0).then(|| SmolStr::from(segments[..last].join(".")));
        Ok(Expression::FieldRef {
            class,
            name: segments[last].into(),
        })
    }

    /// Skip to the end of the current operand, keeping its text. Stops
    /// before a separator or operator outside any brackets.
    fn opaque_from(&mut self, start: usize) -> Expression {
        let mut depth = 0usize;
        let mut end = start;
        while let Some(lexeme) = self.tokens.get(self.pos) {
            match lexeme.token {
                Token::LParen | Token::LBrace | Token::LBracket => depth += 1,
                Token::RParen | Token::RBrace | Token::RBracket => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                Token::Comma | Token::Question | Token::Colon if depth == 0 => break,
                token if depth == 0 && binary_operator(token).is_some() => break,
                _ => {}
            }
            end = lexeme.end();
            self.pos += 1;
        }
        let end = end.max(self.tokens[self.pos.saturating_sub(1)].end());
        Expression::Opaque(self.source[start..end].into())
    }
}

fn int_literal(text: &str, negative: bool) -> Result<Value> {
    let out_of_range = || ModelError::invalid_literal(text, "integer literal out of range");
    let (digits, is_long) = match text.strip_suffix(['l', 'L']) {
        Some(digits) => (digits, true),
        None => (text, false),
    };
    let digits = digits.replace('_', "");
    let (radix, body) = if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        (16, hex)
    } else if let Some(binary) = digits.strip_prefix("0b").or_else(|| digits.strip_prefix("0B")) {
        (2, binary)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (8, &digits[1..])
    } else {
        (10, digits.as_str())
    };
    let magnitude = u64::from_str_radix(body, radix).map_err(|_| out_of_range())?;

    // Decimal literals are bounded by the signed range (one more when
    // negated); the other radixes may use every bit.
    let limit = match (is_long, radix == 10, negative) {
        (true, true, false) => i64::MAX as u64,
        (true, true, true) => 1 << 63,
        (true, false, _) => u64::MAX,
        (false, true, false) => i32::MAX as u64,
        (false, true, true) => 1 << 31,
        (false, false, _) => u32::MAX as u64,
    };
    if magnitude > limit {
        return Err(out_of_range());
    }
    Ok(if is_long {
        let value = magnitude as i64;
        Value::Long(if negative { value.wrapping_neg() } else { value })
    } else {
        let value = magnitude as u32 as i32;
        Value::Int(if negative { value.wrapping_neg() } else { value })
    })
}

fn float_literal(text: &str, negative: bool) -> Result<Value> {
    let invalid = || ModelError::invalid_literal(text, "malformed floating-point literal");
    let digits = text.replace('_', "");
    let sign = if negative { -1.0 } else { 1.0 };
    if let Some(body) = digits.strip_suffix(['f', 'F']) {
        let value: f32 = body.parse().map_err(|_| invalid())?;
        return Ok(Value::Float(sign as f32 * value));
    }
    let body = digits.strip_suffix(['d', 'D']).unwrap_or(&digits);
    let value: f64 = body.parse().map_err(|_| invalid())?;
    Ok(Value::Double(sign * value))
}

fn char_literal(text: &str) -> Result<Value> {
    let units = unescape(text, &text[1..text.len() - 1])?;
    match units.as_slice() {
        [unit] => Ok(Value::Char(*unit)),
        _ => Err(ModelError::invalid_literal(text, "character literal must hold one character")),
    }
}

fn string_literal(text: &str) -> Result<Value> {
    let units = unescape(text, &text[1..text.len() - 1])?;
    // Strings are held as UTF-8, which has no encoding for an unpaired surrogate.
    let decoded = String::from_utf16(&units)
        .map_err(|_| ModelError::invalid_literal(text, "unpaired surrogate in string literal"))?;
    Ok(Value::String(decoded.into()))
}

/// Decode Java escape sequences into UTF-16 code units.
fn unescape(text: &str, body: &str) -> Result<Vec<u16>> {
    let invalid = |reason: &str| ModelError::invalid_literal(text, reason);
    let mut units = Vec::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            let mut buffer = [0u16; 2];
            units.extend_from_slice(c.encode_utf16(&mut buffer));
            continue;
        }
        let escape = chars.next().ok_or_else(|| invalid("dangling escape"))?;
        let unit = match escape {
            'n' => 0x0a,
            't' => 0x09,
            'b' => 0x08,
            'r' => 0x0d,
            'f' => 0x0c,
            's' => 0x20,
            '\'' => 0x27,
            '"' => 0x22,
            '\\' => 0x5c,
            'u' => {
                while chars.peek() == Some(&'u') {
                    chars.next();
                }
                let hex: String = chars.by_ref().take(4).collect();
                if hex.len() != 4 {
                    return Err(invalid("truncated unicode escape"));
                }
                u16::from_str_radix(&hex, 16).map_err(|_| invalid("malformed unicode escape"))?
            }
            '0'..='7' => {
                // Up to three octal digits, at most \377.
                let max_digits = if escape <= '3' { 3 } else { 2 };
                let mut value = escape as u16 - '0' as u16;
                for _ in 1..max_digits {
                    match chars.peek() {
                        Some(&d @ '0'..='7') => {
                            value = value * 8 + (d as u16 - '0' as u16);
                            chars.next();
                        }
                        _ => break,
                    }
                }
                value
            }
            other => return Err(invalid(&format!("unknown escape '\\{other}'"))),
        };
        units.push(unit);
    }
    Ok(units)
}
