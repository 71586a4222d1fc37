//! Item parsing: `variant` declarations and `fn` definitions.

use tagsum_ir::ast::{CaseSpec, FieldSpec, FunctionDef, Options, VariantSpec};
use tagsum_lexer::TokenKind;

use crate::{ErrorContext, ParseError, Parser};

impl Parser<'_> {
    /// `variant Name { case, case(field, ...), ... }`
    pub(crate) fn parse_variant(&mut self, options: Options) -> Result<VariantSpec, ParseError> {
        self.parse_variant_inner(options)
            .map_err(|e| e.in_context(ErrorContext::Variant))
    }

    fn parse_variant_inner(&mut self, options: Options) -> Result<VariantSpec, ParseError> {
        let start = options
            .attrs
            .first()
            .map_or(self.cursor.current_span(), |attr| attr.span);
        self.cursor.expect(TokenKind::Variant)?;
        let name = self.cursor.expect_ident()?;
        let open = self.cursor.expect(TokenKind::LBrace)?;

        let mut cases = Vec::new();
        while !self.cursor.check(TokenKind::RBrace) && !self.cursor.is_at_end() {
            cases.push(self.parse_case()?);
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        let end = self.expect_close(TokenKind::RBrace, open, '}')?;

        Ok(VariantSpec {
            name,
            options,
            cases,
            span: start.merge(end),
        })
    }

    fn parse_case(&mut self) -> Result<CaseSpec, ParseError> {
        let options = self.parse_options();
        let label = self
            .cursor
            .expect_ident()
            .map_err(|e| e.in_context(ErrorContext::Case))?;

        let mut fields = Vec::new();
        let mut end = label.span;
        if self.cursor.check(TokenKind::LParen) {
            let open = self.cursor.advance().span;
            while !self.cursor.check(TokenKind::RParen) && !self.cursor.is_at_end() {
                let options = self.parse_options();
                let name = self
                    .cursor
                    .expect_ident()
                    .map_err(|e| e.in_context(ErrorContext::Case))?;
                fields.push(FieldSpec { name, options });
                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
            end = self.expect_close(TokenKind::RParen, open, ')')?;
        }

        let start = options.attrs.first().map_or(label.span, |attr| attr.span);
        Ok(CaseSpec {
            label,
            options,
            fields,
            span: start.merge(end),
        })
    }

    /// `fn name(params) = expr`
    pub(crate) fn parse_function(&mut self) -> Result<FunctionDef, ParseError> {
        self.parse_function_inner()
            .map_err(|e| e.in_context(ErrorContext::FunctionDef))
    }

    fn parse_function_inner(&mut self) -> Result<FunctionDef, ParseError> {
        let start = self.cursor.expect(TokenKind::Fn)?;
        let name = self.cursor.expect_ident()?;
        let open = self.cursor.expect(TokenKind::LParen)?;

        let mut params = Vec::new();
        while !self.cursor.check(TokenKind::RParen) && !self.cursor.is_at_end() {
            params.push(self.cursor.expect_ident()?);
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect_close(TokenKind::RParen, open, ')')?;
        self.cursor.expect(TokenKind::Eq)?;

        let body = self.parse_expr()?;
        let span = start.merge(body.span);
        Ok(FunctionDef {
            name,
            params,
            body,
            span,
        })
    }
}
