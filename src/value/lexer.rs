//! Tokens of Java literal and constant-expression text.

use logos::Logos;

use crate::error::{ModelError, Result};

#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub(crate) enum Token {
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("@")]
    At,
    #[token("=")]
    Assign,
    #[token("?")]
    Question,
    #[token(":")]
    Colon,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token(">>>")]
    UShr,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,
    #[token("!")]
    Bang,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,

    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    /// Decimal, octal, hex or binary integer, optionally `L`-suffixed.
    #[regex(r"(0[xX][0-9a-fA-F_]+|0[bB][01_]+|[0-9][0-9_]*)[lL]?")]
    Int,
    #[regex(r"([0-9][0-9_]*\.[0-9_]*([eE][+-]?[0-9]+)?|\.[0-9][0-9_]*([eE][+-]?[0-9]+)?|[0-9][0-9_]*[eE][+-]?[0-9]+)[fFdD]?")]
    #[regex(r"[0-9][0-9_]*[fFdD]")]
    Float,
    #[regex(r"'([^'\\]|\\.)*'")]
    Char,
    #[regex(r#""([^"\\]|\\.)*""#)]
    String,
    #[regex(r"([A-Za-z_$]|[^\x00-\x7F])([A-Za-z0-9_$]|[^\x00-\x7F])*", is_identifier)]
    Ident,
}

/// Java identifiers may use any Unicode letter; reject the other non-ASCII
/// characters the pattern lets through.
fn is_identifier(lexer: &mut logos::Lexer<'_, Token>) -> bool {
    let mut chars = lexer.slice().chars();
    chars
        .next()
        .is_some_and(|c| c == '$' || c == '_' || unicode_ident::is_xid_start(c))
        && chars.all(|c| c == '$' || unicode_ident::is_xid_continue(c))
}

/// A token with the text it was read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Lexeme<'a> {
    pub token: Token,
    pub text: &'a str,
    /// Byte offset of `text` in the input.
    pub start: usize,
}

impl Lexeme<'_> {
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

/// Split `text` into lexemes.
pub(crate) fn tokenize(text: &str) -> Result<Vec<Lexeme<'_>>> {
    let mut lexer = Token::lexer(text);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next() {
        match token {
            Ok(token) => tokens.push(Lexeme {
                token,
                text: lexer.slice(),
                start: lexer.span().start,
            }),
            Err(()) => {
                return Err(ModelError::invalid_literal(
                    text,
                    format!("unexpected character at offset {}", lexer.span().start),
                ));
            }
        }
    }
    Ok(tokens)
}
