//! Statements

use core::cell::Cell;

use semantic::Symbol;
use span::Span;

use crate::declaration::Declaration;
use crate::{Expr, Kind};

pub type Stmt<'ctx> = &'ctx Statement<'ctx>;

/// An expression followed by `;`. The expression is missing in an
/// empty statement.
#[derive(Debug)]
pub struct ExprStmt<'ctx> {
    pub expr: Option<Expr<'ctx>>,
}

#[derive(Debug)]
pub struct CompoundStmt<'ctx> {
    pub stmts: &'ctx [Stmt<'ctx>],
    /// The block scope, set by the analyzer
    pub scope: Cell<Option<&'ctx Symbol<'ctx>>>,
}

#[derive(Debug)]
pub struct IfStmt<'ctx> {
    pub cond: Expr<'ctx>,
    pub if_true: Stmt<'ctx>,
    pub if_false: Option<Stmt<'ctx>>,
}

#[derive(Debug)]
pub struct WhileStmt<'ctx> {
    /// Can declare a variable, scoped to the loop
    pub cond: Expr<'ctx>,
    pub body: Stmt<'ctx>,
    pub scope: Cell<Option<&'ctx Symbol<'ctx>>>,
}

#[derive(Debug)]
pub struct DoStmt<'ctx> {
    pub body: Stmt<'ctx>,
    pub cond: Expr<'ctx>,
}

#[derive(Debug)]
pub struct ForStmt<'ctx> {
    /// Either an expression or a declaration statement
    pub init: Stmt<'ctx>,
    pub cond: Option<Expr<'ctx>>,
    pub inc: Option<Expr<'ctx>>,
    pub body: Stmt<'ctx>,
    pub scope: Cell<Option<&'ctx Symbol<'ctx>>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JumpKind {
    Break,
    Continue,
    Discard,
}

#[derive(Debug)]
pub struct ReturnStmt<'ctx> {
    pub expr: Option<Expr<'ctx>>,
}

#[derive(Debug)]
pub struct SwitchStmt<'ctx> {
    pub expr: Expr<'ctx>,
    pub body: Stmt<'ctx>,
}

#[derive(Debug)]
pub struct CaseLabel<'ctx> {
    pub expr: Expr<'ctx>,
}

#[derive(Debug)]
pub struct DeclarationStmt<'ctx> {
    pub decl: &'ctx Declaration<'ctx>,
}

#[derive(Debug)]
pub enum StatementKind<'ctx> {
    Expression(ExprStmt<'ctx>),
    Compound(CompoundStmt<'ctx>),
    If(IfStmt<'ctx>),
    While(WhileStmt<'ctx>),
    Do(DoStmt<'ctx>),
    For(ForStmt<'ctx>),
    Jump(JumpKind),
    Return(ReturnStmt<'ctx>),
    Switch(SwitchStmt<'ctx>),
    Case(CaseLabel<'ctx>),
    Default,
    Declaration(DeclarationStmt<'ctx>),
}

#[derive(Debug)]
pub struct Statement<'ctx> {
    pub kind: StatementKind<'ctx>,
    pub span: Span,
}

impl<'ctx> Statement<'ctx> {
    pub fn new(kind: StatementKind<'ctx>, span: Span) -> Self { Self { kind, span } }

    pub fn kind(&self) -> Kind {
        use StatementKind as SK;
        match &self.kind {
            SK::Expression(_) => Kind::ExpressionStatement,
            SK::Compound(_) => Kind::CompoundStatement,
            SK::If(_) => Kind::If,
            SK::While(_) => Kind::While,
            SK::Do(_) => Kind::Do,
            SK::For(_) => Kind::For,
            SK::Jump(JumpKind::Break) => Kind::Break,
            SK::Jump(JumpKind::Continue) => Kind::Continue,
            SK::Jump(JumpKind::Discard) => Kind::Discard,
            SK::Return(ReturnStmt { expr: None }) => Kind::Return,
            SK::Return(ReturnStmt { expr: Some(_) }) => Kind::ReturnExpression,
            SK::Switch(_) => Kind::Switch,
            SK::Case(_) => Kind::CaseLabel,
            SK::Default => Kind::DefaultLabel,
            SK::Declaration(_) => Kind::DeclarationStatement,
        }
    }
}
