use core::cell::Cell;

use ast::Expr;
use ast::expr::{
    AssignOp, AssignmentExpr, BinaryExpr, BinaryOp, CallExpr, ConditionalExpr, ExpressionKind, FunctionIdentifier,
    FunctionIdentifierKind, IdentifierExpr, LiteralExpr, MemberAccessExpr, MemberCallExpr, UnaryExpr, UnaryOp,
};
use lexer::TokenKind;

use super::{Parser, Result};

/// Binary operators, from lowest to highest precedence.
/// All of them are left associative.
const BINARY_LEVELS: &[&[TokenKind]] = &[
    &[TokenKind::PipePipe],
    &[TokenKind::CaretCaret],
    &[TokenKind::AmpersandAmpersand],
    &[TokenKind::Pipe],
    &[TokenKind::Caret],
    &[TokenKind::Ampersand],
    &[TokenKind::EqualEqual, TokenKind::BangEqual],
    &[TokenKind::Less, TokenKind::Greater, TokenKind::LessEqual, TokenKind::GreaterEqual],
    &[TokenKind::LessLess, TokenKind::GreaterGreater],
    &[TokenKind::Plus, TokenKind::Minus],
    &[TokenKind::Star, TokenKind::Slash, TokenKind::Percent],
];

impl<'ctx> Parser<'_, '_, 'ctx> {
    /// `assignment (, assignment)*`
    pub(super) fn expression(&mut self) -> Result<Expr<'ctx>> {
        let mut left = self.assignment()?;
        while self.match_type(TokenKind::Comma) {
            let right = self.assignment()?;
            left = self.binary_expr(BinaryOp::Comma, left, right);
        }
        Ok(left)
    }

    pub(super) fn assignment(&mut self) -> Result<Expr<'ctx>> {
        self.nested(|p| {
            let left = p.conditional()?;
            let Ok(op) = AssignOp::try_from(p.peek().kind) else {
                return Ok(left);
            };
            p.bump();
            let right = p.assignment()?;
            let span = left.span.join(&right.span);
            Ok(p.expr(ExpressionKind::Assignment(AssignmentExpr { op, left, right }), span))
        })
    }

    pub(super) fn conditional(&mut self) -> Result<Expr<'ctx>> {
        let cond = self.binary(0)?;
        if !self.match_type(TokenKind::Question) {
            return Ok(cond);
        }
        let if_true = self.expression()?;
        self.consume(TokenKind::Colon)?;
        let if_false = self.assignment()?;
        let span = cond.span.join(&if_false.span);
        Ok(self.expr(
            ExpressionKind::Conditional(ConditionalExpr {
                cond,
                if_true,
                if_false,
            }),
            span,
        ))
    }

    fn binary_expr(&self, op: BinaryOp, left: Expr<'ctx>, right: Expr<'ctx>) -> Expr<'ctx> {
        let span = left.span.join(&right.span);
        self.expr(ExpressionKind::Binary(BinaryExpr { op, left, right }), span)
    }

    fn binary(&mut self, level: usize) -> Result<Expr<'ctx>> {
        let Some(ops) = BINARY_LEVELS.get(level) else {
            return self.unary();
        };
        let mut left = self.binary(level + 1)?;
        loop {
            let kind = self.peek().kind;
            if !ops.contains(&kind) {
                break;
            }
            let Ok(op) = BinaryOp::try_from(kind) else { break };
            self.bump();
            let right = self.binary(level + 1)?;
            left = self.binary_expr(op, left, right);
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Expr<'ctx>> {
        let Some(op) = UnaryOp::prefix(self.peek().kind) else {
            return self.postfix();
        };
        let start = self.advance().span;
        let expr = self.nested(Self::unary)?;
        let span = start.join(&expr.span);
        Ok(self.expr(ExpressionKind::Unary(UnaryExpr { op, expr }), span))
    }

    fn postfix(&mut self) -> Result<Expr<'ctx>> {
        let mut expr = self.primary()?;
        loop {
            match self.peek().kind {
                TokenKind::LeftBracket => {
                    self.bump();
                    let index = self.expression()?;
                    self.consume(TokenKind::RightBracket)?;
                    let span = expr.span.join(&self.previous_span());
                    expr = self.expr(
                        ExpressionKind::Binary(BinaryExpr {
                            op: BinaryOp::Index,
                            left: expr,
                            right: index,
                        }),
                        span,
                    );
                }
                TokenKind::Dot => {
                    self.bump();
                    let (field, field_span) = self.consume_name(TokenKind::Identifier)?;
                    let kind = if self.check(TokenKind::LeftParen) {
                        let args = self.arguments()?;
                        ExpressionKind::MemberCall(MemberCallExpr {
                            base: expr,
                            method: field,
                            args,
                        })
                    } else {
                        ExpressionKind::MemberAccess(MemberAccessExpr {
                            base: expr,
                            field,
                            field_span,
                        })
                    };
                    expr = self.expr(kind, expr.span.join(&self.previous_span()));
                }
                tok @ (TokenKind::PlusPlus | TokenKind::MinusMinus) => {
                    self.bump();
                    let op = if tok == TokenKind::PlusPlus {
                        UnaryOp::PostIncrement
                    } else {
                        UnaryOp::PostDecrement
                    };
                    let span = expr.span.join(&self.previous_span());
                    expr = self.expr(ExpressionKind::Unary(UnaryExpr { op, expr }), span);
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    fn primary(&mut self) -> Result<Expr<'ctx>> {
        let tok = *self.peek();
        match tok.kind {
            TokenKind::Identifier => {
                let (name, span) = self.consume_name(TokenKind::Identifier)?;
                if self.check(TokenKind::LeftParen) {
                    return self.call(FunctionIdentifierKind::Name(name), span);
                }
                Ok(self.expr(
                    ExpressionKind::Identifier(IdentifierExpr {
                        name,
                        symbol: Cell::new(None),
                    }),
                    span,
                ))
            }
            TokenKind::Number | TokenKind::True | TokenKind::False => {
                let Some(value) = tok.name() else {
                    return self.unexpected();
                };
                self.bump();
                Ok(self.expr(ExpressionKind::Literal(LiteralExpr { value }), tok.span))
            }
            TokenKind::LeftParen => {
                self.bump();
                let expr = self.expression()?;
                self.consume(TokenKind::RightParen)?;
                Ok(expr)
            }
            /* Constructors: vec3(1.0), float[2](a, b), S(x) */
            kind if kind == TokenKind::TypeName || kind.is_builtin_type() || kind.is_precision() => {
                let ty = self.type_specifier()?;
                self.call(FunctionIdentifierKind::Type(ty), ty.span)
            }
            _ => self.unexpected(),
        }
    }

    fn call(&mut self, kind: FunctionIdentifierKind<'ctx>, span: span::Span) -> Result<Expr<'ctx>> {
        let callee = self.sess.alloc(FunctionIdentifier { kind, span });
        let args = self.arguments()?;
        Ok(self.expr(
            ExpressionKind::Call(CallExpr {
                callee,
                args,
                function: Cell::new(None),
            }),
            span.join(&self.previous_span()),
        ))
    }

    /// `( )`, `( void )` or `( assignment (, assignment)* )`
    fn arguments(&mut self) -> Result<&'ctx [Expr<'ctx>]> {
        self.consume(TokenKind::LeftParen)?;
        let mut args = Vec::new();
        if self.check(TokenKind::Void) && self.nth(1).kind == TokenKind::RightParen {
            self.bump();
        } else if !self.check(TokenKind::RightParen) {
            loop {
                args.push(self.assignment()?);
                if !self.match_type(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.consume(TokenKind::RightParen)?;
        Ok(self.list(args))
    }
}
