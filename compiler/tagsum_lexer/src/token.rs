//! Token types produced by the lexer.

use std::fmt;

use tagsum_ir::{Name, Span};

/// A token with its span in the source.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.span)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TokenKind {
    // === Literals ===
    /// Integer literal: 42, 1_000
    Int(i64),
    /// String literal, unescaped and interned
    Str(Name),
    /// `#[...]` attribute; the interned text between the brackets
    Attr(Name),

    /// Identifier (interned)
    Ident(Name),

    // === Keywords ===
    Variant,
    Fn,
    Let,
    If,
    Else,
    True,
    False,

    // === Symbols ===
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Semicolon,
    Eq,
    FatArrow,
    Bang,
    Underscore,

    // === Operators ===
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Plus,
    Minus,
    Star,

    /// Unrecognized input; a lex error was recorded for it.
    Error,
    Eof,
}

impl TokenKind {
    /// Human-readable description for "expected X, found Y" messages.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Int(_) => "integer literal",
            TokenKind::Str(_) => "string literal",
            TokenKind::Attr(_) => "attribute",
            TokenKind::Ident(_) => "identifier",
            TokenKind::Variant => "`variant`",
            TokenKind::Fn => "`fn`",
            TokenKind::Let => "`let`",
            TokenKind::If => "`if`",
            TokenKind::Else => "`else`",
            TokenKind::True => "`true`",
            TokenKind::False => "`false`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::Comma => "`,`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Eq => "`=`",
            TokenKind::FatArrow => "`=>`",
            TokenKind::Bang => "`!`",
            TokenKind::Underscore => "`_`",
            TokenKind::EqEq => "`==`",
            TokenKind::NotEq => "`!=`",
            TokenKind::Lt => "`<`",
            TokenKind::LtEq => "`<=`",
            TokenKind::Gt => "`>`",
            TokenKind::GtEq => "`>=`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Error => "invalid token",
            TokenKind::Eof => "end of file",
        }
    }

    /// Check if this token starts an expression.
    pub fn starts_expr(&self) -> bool {
        matches!(
            self,
            TokenKind::Int(_)
                | TokenKind::Str(_)
                | TokenKind::Ident(_)
                | TokenKind::True
                | TokenKind::False
                | TokenKind::If
                | TokenKind::LParen
                | TokenKind::LBrace
                | TokenKind::Minus
        )
    }
}
