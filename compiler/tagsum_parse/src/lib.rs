//! Recursive descent parser for Tagsum source files.
//!
//! Produces an [`ast::Module`](tagsum_ir::ast::Module). Errors are collected
//! rather than aborting: a malformed item is reported once and the parser
//! resynchronizes at the next `variant`, `fn` or attribute.

mod cursor;
mod error;
mod grammar;

use tagsum_ir::ast::{Item, Module};
use tagsum_ir::{Span, StringInterner};
use tagsum_lexer::{Token, TokenKind};
use tracing::debug;

pub use cursor::Cursor;
pub use error::{ErrorContext, ParseError, ParseErrorKind};

/// Result of parsing one file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseOutput {
    pub module: Module,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Parse a token stream (as produced by [`tagsum_lexer::lex`]).
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse(tokens: &[Token], interner: &StringInterner) -> ParseOutput {
    let mut parser = Parser::new(tokens, interner);
    let module = parser.parse_module();
    debug!(
        items = module.items.len(),
        errors = parser.errors.len(),
        "parsed"
    );
    ParseOutput {
        module,
        errors: parser.errors,
    }
}

/// Parser state: a cursor plus the errors collected so far.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], interner: &'a StringInterner) -> Self {
        Parser {
            cursor: Cursor::new(tokens, interner),
            errors: Vec::new(),
        }
    }

    fn parse_module(&mut self) -> Module {
        let mut items = Vec::new();
        while !self.cursor.is_at_end() {
            match self.parse_item() {
                Ok(item) => items.push(item),
                Err(error) => {
                    self.errors.push(error);
                    self.recover_to_item();
                }
            }
        }
        Module { items }
    }

    fn parse_item(&mut self) -> Result<Item, ParseError> {
        let options = self.parse_options();
        match self.cursor.current_kind() {
            TokenKind::Variant => self.parse_variant(options).map(Item::Variant),
            TokenKind::Fn if options.is_empty() => self.parse_function().map(Item::Function),
            found => Err(ParseError::new(
                ParseErrorKind::UnexpectedToken {
                    expected: if options.is_empty() {
                        "`variant` or `fn`"
                    } else {
                        "`variant` after attributes"
                    },
                    found,
                },
                self.cursor.current_span(),
            )),
        }
    }

    /// Skip to the next token that can begin an item.
    fn recover_to_item(&mut self) {
        self.cursor.skip_until(|kind| {
            matches!(
                kind,
                TokenKind::Variant | TokenKind::Fn | TokenKind::Attr(_)
            )
        });
    }

    /// Consume the closing delimiter `kind` of a construct opened at `open`.
    ///
    /// Running out of input reports an unclosed delimiter instead of an
    /// unexpected end of file.
    fn expect_close(&mut self, kind: TokenKind, open: Span, close: char) -> Result<Span, ParseError> {
        if self.cursor.is_at_end() {
            return Err(ParseError::new(
                ParseErrorKind::UnclosedDelimiter { open, close },
                self.cursor.current_span(),
            ));
        }
        self.cursor.expect(kind)
    }
}

#[cfg(test)]
mod tests;
