use core::cell::Cell;

use ast::expr::{DeclarationExpr, ExpressionKind};
use ast::stmt::{
    CaseLabel, CompoundStmt, DeclarationStmt, DoStmt, ExprStmt, ForStmt, IfStmt, JumpKind, ReturnStmt, StatementKind,
    SwitchStmt, WhileStmt,
};
use ast::{Expr, Stmt};
use lexer::TokenKind;

use super::{Parser, Result};

impl<'ctx> Parser<'_, '_, 'ctx> {
    pub(super) fn statement(&mut self) -> Result<Stmt<'ctx>> { self.nested(Self::statement_inner) }

    fn statement_inner(&mut self) -> Result<Stmt<'ctx>> {
        self.disambiguate();
        let start = self.peek().span;

        if self.check(TokenKind::LeftBrace) {
            self.compound_statement()
        } else if self.match_type(TokenKind::If) {
            self.if_stmt()
        } else if self.match_type(TokenKind::Switch) {
            self.switch_stmt()
        } else if self.match_type(TokenKind::Case) {
            let expr = self.expression()?;
            self.consume(TokenKind::Colon)?;
            Ok(self.stmt(StatementKind::Case(CaseLabel { expr }), start.join(&self.previous_span())))
        } else if self.match_type(TokenKind::Default) {
            self.consume(TokenKind::Colon)?;
            Ok(self.stmt(StatementKind::Default, start.join(&self.previous_span())))
        } else if self.match_type(TokenKind::While) {
            self.while_stmt()
        } else if self.match_type(TokenKind::Do) {
            self.do_stmt()
        } else if self.match_type(TokenKind::For) {
            self.for_stmt()
        } else if let Some(jump) = self.try_jump() {
            self.consume(TokenKind::Semicolon)?;
            Ok(self.stmt(StatementKind::Jump(jump), start.join(&self.previous_span())))
        } else if self.match_type(TokenKind::Return) {
            self.ret_stmt()
        } else {
            self.simple_statement()
        }
    }

    /// An empty, declaration or expression statement
    fn simple_statement(&mut self) -> Result<Stmt<'ctx>> {
        let start = self.peek().span;
        if self.match_type(TokenKind::Semicolon) {
            return Ok(self.stmt(StatementKind::Expression(ExprStmt { expr: None }), start));
        }
        if self.is_declaration_start() {
            let decl = self.declaration(false)?;
            return Ok(self.stmt(StatementKind::Declaration(DeclarationStmt { decl }), decl.span));
        }
        let expr = self.expression()?;
        self.consume(TokenKind::Semicolon)?;
        Ok(self.stmt(
            StatementKind::Expression(ExprStmt { expr: Some(expr) }),
            start.join(&self.previous_span()),
        ))
    }

    pub(super) fn compound_statement(&mut self) -> Result<Stmt<'ctx>> {
        let start = self.consume(TokenKind::LeftBrace)?.span;
        let mut stmts = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_finished() {
            stmts.push(self.statement()?);
        }
        self.consume(TokenKind::RightBrace)?;
        Ok(self.stmt(
            StatementKind::Compound(CompoundStmt {
                stmts: self.list(stmts),
                scope: Cell::new(None),
            }),
            start.join(&self.previous_span()),
        ))
    }

    fn try_jump(&mut self) -> Option<JumpKind> {
        let jump = match self.peek().kind {
            TokenKind::Break => JumpKind::Break,
            TokenKind::Continue => JumpKind::Continue,
            TokenKind::Discard => JumpKind::Discard,
            _ => return None,
        };
        self.bump();
        Some(jump)
    }

    fn parenthesized(&mut self) -> Result<Expr<'ctx>> {
        self.consume(TokenKind::LeftParen)?;
        let expr = self.expression()?;
        self.consume(TokenKind::RightParen)?;
        Ok(expr)
    }

    fn if_stmt(&mut self) -> Result<Stmt<'ctx>> {
        let kw_if = self.previous_span();
        let cond = self.parenthesized()?;
        let if_true = self.statement()?;
        let if_false = if self.match_type(TokenKind::Else) {
            Some(self.statement()?)
        } else {
            None
        };
        let span = kw_if.join(&self.previous_span());
        Ok(self.stmt(StatementKind::If(IfStmt { cond, if_true, if_false }), span))
    }

    fn switch_stmt(&mut self) -> Result<Stmt<'ctx>> {
        let kw_switch = self.previous_span();
        let expr = self.parenthesized()?;
        let body = self.compound_statement()?;
        let span = kw_switch.join(&body.span);
        Ok(self.stmt(StatementKind::Switch(SwitchStmt { expr, body }), span))
    }

    /// An expression, or a declaration with an initializer:
    /// `while (bool b = next())`
    fn condition(&mut self) -> Result<Expr<'ctx>> {
        self.disambiguate();
        let kind = self.peek().kind;
        let is_decl = kind == TokenKind::TypeName
            || kind.is_precision()
            || self.is_type_qualifier()
            || (kind.is_builtin_type() && !self.is_constructor_call());
        if !is_decl {
            return self.expression();
        }

        let ty = self.fully_specified_type()?;
        let (name, _) = self.consume_name(TokenKind::Identifier)?;
        self.consume(TokenKind::Equal)?;
        let init = self.assignment()?;
        let span = ty.span.join(&init.span);
        Ok(self.expr(
            ExpressionKind::Declaration(DeclarationExpr {
                ty,
                name,
                init,
                symbol: Cell::new(None),
            }),
            span,
        ))
    }

    fn while_stmt(&mut self) -> Result<Stmt<'ctx>> {
        let kw_while = self.previous_span();
        self.consume(TokenKind::LeftParen)?;
        let cond = self.condition()?;
        self.consume(TokenKind::RightParen)?;
        let body = self.statement()?;
        let span = kw_while.join(&body.span);
        Ok(self.stmt(
            StatementKind::While(WhileStmt {
                cond,
                body,
                scope: Cell::new(None),
            }),
            span,
        ))
    }

    fn do_stmt(&mut self) -> Result<Stmt<'ctx>> {
        let kw_do = self.previous_span();
        let body = self.statement()?;
        self.consume(TokenKind::While)?;
        let cond = self.parenthesized()?;
        self.consume(TokenKind::Semicolon)?;
        let span = kw_do.join(&self.previous_span());
        Ok(self.stmt(StatementKind::Do(DoStmt { body, cond }), span))
    }

    fn for_stmt(&mut self) -> Result<Stmt<'ctx>> {
        let kw_for = self.previous_span();
        self.consume(TokenKind::LeftParen)?;

        self.disambiguate();
        let init = self.simple_statement()?;
        let cond = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.condition()?)
        };
        self.consume(TokenKind::Semicolon)?;
        let inc = if self.check(TokenKind::RightParen) {
            None
        } else {
            Some(self.expression()?)
        };
        self.consume(TokenKind::RightParen)?;

        let body = self.statement()?;
        let span = kw_for.join(&body.span);
        Ok(self.stmt(
            StatementKind::For(ForStmt {
                init,
                cond,
                inc,
                body,
                scope: Cell::new(None),
            }),
            span,
        ))
    }

    fn ret_stmt(&mut self) -> Result<Stmt<'ctx>> {
        let kw_ret = self.previous_span();
        let expr = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.consume(TokenKind::Semicolon)?;
        let span = kw_ret.join(&self.previous_span());
        Ok(self.stmt(StatementKind::Return(ReturnStmt { expr }), span))
    }
}
