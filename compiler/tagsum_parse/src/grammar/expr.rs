//! Expression parsing.
//!
//! Precedence, loosest first: comparison, additive, multiplicative, unary
//! minus, call. `if`, blocks and match use sites are primaries.

use tagsum_ir::ast::{
    BinaryOp, ClausePattern, Expr, ExprKind, Ident, MatchClause, MatchUse, Param, ParamSpec, Stmt,
};
use tagsum_ir::Span;
use tagsum_lexer::TokenKind;

use crate::{ErrorContext, ParseError, ParseErrorKind, Parser};

fn comparison_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::EqEq => Some(BinaryOp::Eq),
        TokenKind::NotEq => Some(BinaryOp::NotEq),
        TokenKind::Lt => Some(BinaryOp::Lt),
        TokenKind::LtEq => Some(BinaryOp::LtEq),
        TokenKind::Gt => Some(BinaryOp::Gt),
        TokenKind::GtEq => Some(BinaryOp::GtEq),
        _ => None,
    }
}

fn additive_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Sub),
        _ => None,
    }
}

fn multiplicative_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Star => Some(BinaryOp::Mul),
        _ => None,
    }
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    let span = lhs.span.merge(rhs.span);
    Expr::new(
        ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
        span,
    )
}

impl Parser<'_> {
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(comparison_op, Self::parse_additive)
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(additive_op, Self::parse_multiplicative)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(multiplicative_op, Self::parse_unary)
    }

    /// One left-associative precedence level.
    fn parse_binary_level(
        &mut self,
        op_of: fn(TokenKind) -> Option<BinaryOp>,
        operand: fn(&mut Self) -> Result<Expr, ParseError>,
    ) -> Result<Expr, ParseError> {
        let mut lhs = operand(self)?;
        while let Some(op) = op_of(self.cursor.current_kind()) {
            self.cursor.advance();
            let rhs = operand(self)?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    /// `-x` is sugar for `0 - x`.
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if self.cursor.check(TokenKind::Minus) {
            let minus = self.cursor.advance().span;
            let operand = self.parse_unary()?;
            let zero = Expr::new(ExprKind::Int(0), minus);
            return Ok(binary(BinaryOp::Sub, zero, operand));
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;
        while self.cursor.check(TokenKind::LParen) {
            let open = self.cursor.advance().span;
            let args = self
                .parse_call_args(open)
                .map_err(|e| e.in_context(ErrorContext::Call))?;
            let span = expr.span.merge(self.cursor.previous_span());
            expr = Expr::new(
                ExprKind::Call {
                    callee: Box::new(expr),
                    args,
                },
                span,
            );
        }
        Ok(expr)
    }

    fn parse_call_args(&mut self, open: Span) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();
        while !self.cursor.check(TokenKind::RParen) && !self.cursor.is_at_end() {
            args.push(self.parse_expr()?);
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect_close(TokenKind::RParen, open, ')')?;
        Ok(args)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.cursor.current();
        match token.kind {
            TokenKind::Int(n) => {
                self.cursor.advance();
                Ok(Expr::new(ExprKind::Int(n), token.span))
            }
            TokenKind::Str(name) => {
                self.cursor.advance();
                let text = self.cursor.interner().lookup(name).to_owned();
                Ok(Expr::new(ExprKind::Str(text), token.span))
            }
            TokenKind::True | TokenKind::False => {
                self.cursor.advance();
                let value = token.kind == TokenKind::True;
                Ok(Expr::new(ExprKind::Bool(value), token.span))
            }
            TokenKind::LParen => {
                let open = self.cursor.advance().span;
                if self.cursor.check(TokenKind::RParen) {
                    let close = self.cursor.advance().span;
                    return Ok(Expr::new(ExprKind::Unit, open.merge(close)));
                }
                let inner = self.parse_expr()?;
                let close = self.expect_close(TokenKind::RParen, open, ')')?;
                Ok(Expr::new(inner.kind, open.merge(close)))
            }
            TokenKind::LBrace => self.parse_block(),
            TokenKind::If => self.parse_if(),
            TokenKind::Ident(_) if self.cursor.peek(1).kind == TokenKind::Bang => {
                self.parse_match_use()
            }
            TokenKind::Ident(name) => {
                self.cursor.advance();
                Ok(Expr::new(ExprKind::Ident(name), token.span))
            }
            found => Err(ParseError::new(
                ParseErrorKind::ExpectedExpression { found },
                token.span,
            )
            .in_context(ErrorContext::Expression)),
        }
    }

    /// `{ stmt; stmt; expr }`
    fn parse_block(&mut self) -> Result<Expr, ParseError> {
        self.parse_block_inner()
            .map_err(|e| e.in_context(ErrorContext::Block))
    }

    fn parse_block_inner(&mut self) -> Result<Expr, ParseError> {
        let open = self.cursor.expect(TokenKind::LBrace)?;
        let mut stmts = Vec::new();
        while !self.cursor.check(TokenKind::RBrace) && !self.cursor.is_at_end() {
            stmts.push(self.parse_stmt()?);
            if !self.cursor.eat(TokenKind::Semicolon) {
                break;
            }
        }
        let close = self.expect_close(TokenKind::RBrace, open, '}')?;
        Ok(Expr::new(ExprKind::Block(stmts), open.merge(close)))
    }

    fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        if self.cursor.eat(TokenKind::Let) {
            let name = self.cursor.expect_ident()?;
            self.cursor.expect(TokenKind::Eq)?;
            let value = self.parse_expr()?;
            return Ok(Stmt::Let { name, value });
        }
        Ok(Stmt::Expr(self.parse_expr()?))
    }

    /// `if cond { .. } else { .. }` or `.. else if ..`
    fn parse_if(&mut self) -> Result<Expr, ParseError> {
        self.parse_if_inner()
            .map_err(|e| e.in_context(ErrorContext::IfExpression))
    }

    fn parse_if_inner(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.expect(TokenKind::If)?;
        let cond = self.parse_expr()?;
        let then_branch = self.parse_block()?;
        self.cursor.expect(TokenKind::Else)?;
        let else_branch = if self.cursor.check(TokenKind::If) {
            self.parse_if()?
        } else {
            self.parse_block()?
        };
        let span = start.merge(else_branch.span);
        Ok(Expr::new(
            ExprKind::If {
                cond: Box::new(cond),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            },
            span,
        ))
    }

    /// `operator!(scrutinee) { clause, clause, ... }`
    fn parse_match_use(&mut self) -> Result<Expr, ParseError> {
        self.parse_match_use_inner()
            .map_err(|e| e.in_context(ErrorContext::MatchUse))
    }

    fn parse_match_use_inner(&mut self) -> Result<Expr, ParseError> {
        let operator = self.cursor.expect_ident()?;
        self.cursor.expect(TokenKind::Bang)?;
        let open_paren = self.cursor.expect(TokenKind::LParen)?;
        let scrutinee = self.parse_expr()?;
        self.expect_close(TokenKind::RParen, open_paren, ')')?;

        let open = self.cursor.expect(TokenKind::LBrace)?;
        let mut clauses = Vec::new();
        while !self.cursor.check(TokenKind::RBrace) && !self.cursor.is_at_end() {
            clauses.push(self.parse_clause()?);
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        let close = self.expect_close(TokenKind::RBrace, open, '}')?;

        let span = operator.span.merge(close);
        Ok(Expr::new(
            ExprKind::MatchUse(Box::new(MatchUse {
                operator,
                scrutinee,
                clauses,
                span,
            })),
            span,
        ))
    }

    fn parse_clause(&mut self) -> Result<MatchClause, ParseError> {
        self.parse_clause_inner()
            .map_err(|e| e.in_context(ErrorContext::MatchClause))
    }

    fn parse_clause_inner(&mut self) -> Result<MatchClause, ParseError> {
        let start = self.cursor.current_span();
        let pattern = self.parse_clause_pattern()?;
        self.cursor.expect(TokenKind::FatArrow)?;

        let body = self.parse_expr()?;
        let span = start.merge(body.span);
        let body = match body.kind {
            ExprKind::Block(stmts) => stmts,
            kind => vec![Stmt::Expr(Expr::new(kind, body.span))],
        };

        Ok(MatchClause {
            pattern,
            body,
            span,
        })
    }

    fn parse_clause_pattern(&mut self) -> Result<ClausePattern, ParseError> {
        let token = self.cursor.current();
        let label = match token.kind {
            TokenKind::Underscore => {
                self.cursor.advance();
                return Ok(ClausePattern::Default);
            }
            TokenKind::Ident(name) => {
                self.cursor.advance();
                Ident::new(name, token.span)
            }
            found => return Err(invalid_pattern(found, token.span)),
        };

        let next = self.cursor.current();
        let params = match next.kind {
            TokenKind::LParen => {
                let open = self.cursor.advance().span;
                let mut params = Vec::new();
                while !self.cursor.check(TokenKind::RParen) && !self.cursor.is_at_end() {
                    params.push(self.parse_param()?);
                    if !self.cursor.eat(TokenKind::Comma) {
                        break;
                    }
                }
                self.expect_close(TokenKind::RParen, open, ')')?;
                ParamSpec::List(params)
            }
            TokenKind::Ident(_) | TokenKind::Underscore => ParamSpec::Ignore(self.parse_param()?),
            found => return Err(invalid_pattern(found, next.span)),
        };

        Ok(ClausePattern::Case { label, params })
    }

    fn parse_param(&mut self) -> Result<Param, ParseError> {
        let token = self.cursor.current();
        match token.kind {
            TokenKind::Underscore => {
                self.cursor.advance();
                Ok(Param::Wildcard(token.span))
            }
            TokenKind::Ident(name) => {
                self.cursor.advance();
                Ok(Param::Named(Ident::new(name, token.span)))
            }
            found => Err(invalid_pattern(found, token.span)),
        }
    }
}

fn invalid_pattern(found: TokenKind, span: Span) -> ParseError {
    ParseError::new(ParseErrorKind::InvalidClausePattern { found }, span)
}
