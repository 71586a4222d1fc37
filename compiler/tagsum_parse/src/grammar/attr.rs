//! Attribute parsing.
//!
//! Attributes are opaque: the lexer captures the text between `#[` and the
//! matching `]`, and the parser only groups consecutive attributes into an
//! [`Options`] list in source order.

use tagsum_ir::ast::{Attribute, Options};
use tagsum_lexer::TokenKind;

use crate::Parser;

impl Parser<'_> {
    /// Parse zero or more attributes.
    pub(crate) fn parse_options(&mut self) -> Options {
        let mut attrs = Vec::new();
        while let TokenKind::Attr(text) = self.cursor.current_kind() {
            let span = self.cursor.advance().span;
            attrs.push(Attribute {
                text: self.cursor.interner().lookup(text).to_owned(),
                span,
            });
        }
        Options { attrs }
    }
}
