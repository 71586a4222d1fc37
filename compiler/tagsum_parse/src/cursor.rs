//! Token cursor for navigating the token stream.
//!
//! Provides low-level token access, lookahead and consumption methods.

use tagsum_ir::ast::Ident;
use tagsum_ir::{Span, StringInterner};
use tagsum_lexer::{Token, TokenKind};
use tracing::trace;

use crate::{ParseError, ParseErrorKind};

/// Cursor over a token slice that always ends in [`TokenKind::Eof`].
pub struct Cursor<'a> {
    tokens: &'a [Token],
    interner: &'a StringInterner,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a [Token], interner: &'a StringInterner) -> Self {
        debug_assert!(
            matches!(tokens.last(), Some(t) if t.kind == TokenKind::Eof),
            "token stream must end in Eof"
        );
        Cursor {
            tokens,
            interner,
            pos: 0,
        }
    }

    pub fn interner(&self) -> &'a StringInterner {
        self.interner
    }

    #[inline]
    pub fn current(&self) -> Token {
        self.peek(0)
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Token `n` positions ahead; clamps to the trailing `Eof`.
    pub fn peek(&self, n: usize) -> Token {
        let last = self.tokens.len().saturating_sub(1);
        self.tokens
            .get((self.pos + n).min(last))
            .copied()
            .unwrap_or(Token::new(TokenKind::Eof, Span::DUMMY))
    }

    #[inline]
    pub fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::DUMMY
        }
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Advance past the current token and return it. Never moves past `Eof`.
    pub fn advance(&mut self) -> Token {
        let token = self.current();
        if !self.is_at_end() {
            trace!(kind = ?token.kind, span = %token.span, "advance");
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it is `kind`.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or fail with "expected `expected`".
    pub fn expect(&mut self, kind: TokenKind) -> Result<Span, ParseError> {
        if self.check(kind) {
            Ok(self.advance().span)
        } else {
            Err(ParseError::new(
                ParseErrorKind::UnexpectedToken {
                    expected: kind.describe(),
                    found: self.current_kind(),
                },
                self.current_span(),
            ))
        }
    }

    /// Consume an identifier.
    pub fn expect_ident(&mut self) -> Result<Ident, ParseError> {
        match self.current_kind() {
            TokenKind::Ident(name) => {
                let span = self.advance().span;
                Ok(Ident::new(name, span))
            }
            found => Err(ParseError::new(
                ParseErrorKind::ExpectedIdent { found },
                self.current_span(),
            )),
        }
    }

    /// Skip tokens until one satisfying `stop` (or `Eof`). Always makes progress.
    pub fn skip_until(&mut self, stop: impl Fn(TokenKind) -> bool) {
        self.advance();
        while !self.is_at_end() && !stop(self.current_kind()) {
            self.advance();
        }
    }
}
