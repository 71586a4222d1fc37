//! Lexer for Tagsum using logos with string interning.
//!
//! This lexer:
//! - Interns identifiers, string literals and attribute text
//! - Captures `#[...]` attributes whole, with balanced brackets
//! - Skips whitespace and `//` comments
//! - Records errors and keeps going, emitting [`TokenKind::Error`] in place

mod lex_error;
mod token;

use logos::Logos;
use tagsum_ir::{Span, StringInterner};

pub use lex_error::{LexError, LexErrorKind};
pub use token::{Token, TokenKind};

/// Raw token from logos (before interning).
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"([ \t\r\n]+|//[^\n]*)")]
enum RawToken {
    // === Keywords ===
    #[token("variant")]
    Variant,
    #[token("fn")]
    Fn,
    #[token("let")]
    Let,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("true")]
    True,
    #[token("false")]
    False,

    // === Symbols ===
    #[token("#[", lex_attribute)]
    Attr,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("=>")]
    FatArrow,
    #[token("_", priority = 3)]
    Underscore,

    // === Operators ===
    #[token("==")]
    EqEq,
    #[token("=")]
    Eq,
    #[token("!=")]
    NotEq,
    #[token("!")]
    Bang,
    #[token("<=")]
    LtEq,
    #[token("<")]
    Lt,
    #[token(">=")]
    GtEq,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,

    // === Literals ===
    #[regex(r"[0-9][0-9_]*", |lex| {
        lex.slice().replace('_', "").parse::<i64>().ok()
    })]
    Int(i64),

    #[regex(r#""([^"\\]|\\.)*""#)]
    String,

    #[regex(r#""([^"\\]|\\.)*"#)]
    UnterminatedString,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

/// Consume an attribute body up to the `]` matching the opening `#[`.
///
/// Returns `false` (an error token) when the input ends first.
fn lex_attribute(lex: &mut logos::Lexer<RawToken>) -> bool {
    let rest = lex.remainder();
    let mut depth = 1usize;
    for (i, c) in rest.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    lex.bump(i + 1);
                    return true;
                }
            }
            _ => {}
        }
    }
    lex.bump(rest.len());
    false
}

/// Tokens and lex errors for one source file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LexOutput {
    /// Tokens, always terminated by [`TokenKind::Eof`].
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl LexOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Lex `source`, interning names into `interner`.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn lex(source: &str, interner: &StringInterner) -> LexOutput {
    let mut output = LexOutput::default();
    let mut logos = RawToken::lexer(source);

    while let Some(result) = logos.next() {
        let span = Span::try_from_range(logos.span()).unwrap_or(Span::DUMMY);
        let slice = logos.slice();

        let kind = match result {
            Ok(raw) => convert_token(raw, slice, span, interner, &mut output.errors),
            Err(()) => {
                output.errors.push(classify_error(slice, span));
                TokenKind::Error
            }
        };
        output.tokens.push(Token::new(kind, span));
    }

    let end = u32::try_from(source.len()).unwrap_or(u32::MAX);
    output.tokens.push(Token::new(TokenKind::Eof, Span::point(end)));

    tracing::debug!(
        tokens = output.tokens.len(),
        errors = output.errors.len(),
        "lexed"
    );
    output
}

fn convert_token(
    raw: RawToken,
    slice: &str,
    span: Span,
    interner: &StringInterner,
    errors: &mut Vec<LexError>,
) -> TokenKind {
    match raw {
        RawToken::Int(n) => TokenKind::Int(n),
        RawToken::String => {
            let content = &slice[1..slice.len() - 1];
            TokenKind::Str(interner.intern(&unescape_string(content)))
        }
        RawToken::UnterminatedString => {
            errors.push(LexError::new(LexErrorKind::UnterminatedString, span));
            TokenKind::Error
        }
        RawToken::Attr => {
            let body = &slice[2..slice.len() - 1];
            TokenKind::Attr(interner.intern(body.trim()))
        }
        RawToken::Ident => TokenKind::Ident(interner.intern(slice)),

        RawToken::Variant => TokenKind::Variant,
        RawToken::Fn => TokenKind::Fn,
        RawToken::Let => TokenKind::Let,
        RawToken::If => TokenKind::If,
        RawToken::Else => TokenKind::Else,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,

        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::FatArrow => TokenKind::FatArrow,
        RawToken::Underscore => TokenKind::Underscore,

        RawToken::EqEq => TokenKind::EqEq,
        RawToken::Eq => TokenKind::Eq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Bang => TokenKind::Bang,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
    }
}

/// Work out why logos rejected `slice`.
fn classify_error(slice: &str, span: Span) -> LexError {
    let kind = if slice.starts_with("#[") {
        LexErrorKind::UnterminatedAttribute
    } else if !slice.is_empty() && slice.bytes().all(|b| b.is_ascii_digit() || b == b'_') {
        LexErrorKind::IntOverflow
    } else {
        LexErrorKind::InvalidCharacter(slice.chars().next().unwrap_or('\0'))
    };
    LexError::new(kind, span)
}

/// Process the escapes `\n`, `\t`, `\r`, `\0`, `\\` and `\"`.
///
/// Any other escaped character stands for itself.
fn unescape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('0') => result.push('\0'),
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }
    result
}
