//! Visitor protocol
//!
//! Every node has an `accept` method, that does the following:
//!
//! 1. Calls [`Visitor::pre_visit`]. If it returns false, skips to step 4.
//! 2. Calls the `visit_*` hook for the node. If it returns true, the
//!    children are accepted, in a fixed order.
//! 3. Calls the matching `end_visit_*` hook.
//! 4. Calls [`Visitor::post_visit`].
//!
//! Children are visited in source order. Namely:
//!
//! | Node                   | Children                          |
//! |------------------------|-----------------------------------|
//! | if statement           | condition, then, else             |
//! | for statement          | init, condition, increment, body  |
//! | do statement           | body, condition                   |
//! | function declaration   | return type, parameters, body     |
//! | variable declaration   | type, initializer                 |
//! | call                   | callee, arguments                 |
//! | member call            | base, arguments                   |
//! | array type             | element type, size                |

use interner::Name;
use lexer::TokenKind;

use crate::declaration::{
    DeclarationKind, FunctionDecl, InitDecl, InvariantDecl, ParameterDecl, PrecisionDecl,
    TypeAndVariableDecl, TypeDecl, VariableDecl,
};
use crate::expr::{
    AssignmentExpr, BinaryExpr, CallExpr, ConditionalExpr, DeclarationExpr, ExpressionKind,
    FunctionIdentifier, FunctionIdentifierKind, IdentifierExpr, LiteralExpr, MemberAccessExpr,
    MemberCallExpr, UnaryExpr,
};
use crate::stmt::{
    CaseLabel, CompoundStmt, DeclarationStmt, DoStmt, ExprStmt, ForStmt, IfStmt, JumpKind,
    ReturnStmt, StatementKind, SwitchStmt, WhileStmt,
};
use crate::types::{ArraySpec, QualifiedSpec, StructField, StructSpec, TypeSpecKind};
use crate::{Declaration, Expression, Node, Statement, TranslationUnit, TypeSpec};

macro_rules! hooks {
    ($( $(#[$meta:meta])* $visit:ident, $end:ident ( $($ty:ty),* ); )*) => {
        $(
            $(#[$meta])*
            fn $visit(&mut self, $(_: $ty),*) -> bool { true }
            fn $end(&mut self, $(_: $ty),*) {}
        )*
    };
}

/// A visitor over the AST. See the [module documentation](self)
pub trait Visitor<'ctx> {
    /// Called for every node, before anything else
    fn pre_visit(&mut self, _node: Node<'ctx>) -> bool { true }

    /// Called for every node, after everything else
    fn post_visit(&mut self, _node: Node<'ctx>) {}

    hooks! {
        visit_translation_unit, end_visit_translation_unit(&'ctx TranslationUnit<'ctx>);

        /* Expressions */
        visit_identifier, end_visit_identifier(&'ctx Expression<'ctx>, &'ctx IdentifierExpr<'ctx>);
        visit_literal, end_visit_literal(&'ctx Expression<'ctx>, &'ctx LiteralExpr);
        visit_unary, end_visit_unary(&'ctx Expression<'ctx>, &'ctx UnaryExpr<'ctx>);
        visit_binary, end_visit_binary(&'ctx Expression<'ctx>, &'ctx BinaryExpr<'ctx>);
        visit_conditional, end_visit_conditional(&'ctx Expression<'ctx>, &'ctx ConditionalExpr<'ctx>);
        visit_assignment, end_visit_assignment(&'ctx Expression<'ctx>, &'ctx AssignmentExpr<'ctx>);
        visit_member_access, end_visit_member_access(&'ctx Expression<'ctx>, &'ctx MemberAccessExpr<'ctx>);
        visit_function_call, end_visit_function_call(&'ctx Expression<'ctx>, &'ctx CallExpr<'ctx>);
        visit_member_function_call, end_visit_member_function_call(&'ctx Expression<'ctx>, &'ctx MemberCallExpr<'ctx>);
        visit_declaration_expression, end_visit_declaration_expression(&'ctx Expression<'ctx>, &'ctx DeclarationExpr<'ctx>);
        visit_function_identifier, end_visit_function_identifier(&'ctx FunctionIdentifier<'ctx>);

        /* Statements */
        visit_expression_statement, end_visit_expression_statement(&'ctx Statement<'ctx>, &'ctx ExprStmt<'ctx>);
        visit_compound_statement, end_visit_compound_statement(&'ctx Statement<'ctx>, &'ctx CompoundStmt<'ctx>);
        visit_if_statement, end_visit_if_statement(&'ctx Statement<'ctx>, &'ctx IfStmt<'ctx>);
        visit_while_statement, end_visit_while_statement(&'ctx Statement<'ctx>, &'ctx WhileStmt<'ctx>);
        visit_do_statement, end_visit_do_statement(&'ctx Statement<'ctx>, &'ctx DoStmt<'ctx>);
        visit_for_statement, end_visit_for_statement(&'ctx Statement<'ctx>, &'ctx ForStmt<'ctx>);
        /// `break`, `continue` and `discard`
        visit_jump_statement, end_visit_jump_statement(&'ctx Statement<'ctx>, JumpKind);
        visit_return_statement, end_visit_return_statement(&'ctx Statement<'ctx>, &'ctx ReturnStmt<'ctx>);
        visit_switch_statement, end_visit_switch_statement(&'ctx Statement<'ctx>, &'ctx SwitchStmt<'ctx>);
        visit_case_label, end_visit_case_label(&'ctx Statement<'ctx>, &'ctx CaseLabel<'ctx>);
        visit_default_label, end_visit_default_label(&'ctx Statement<'ctx>);
        visit_declaration_statement, end_visit_declaration_statement(&'ctx Statement<'ctx>, &'ctx DeclarationStmt<'ctx>);

        /* Types */
        visit_basic_type, end_visit_basic_type(&'ctx TypeSpec<'ctx>, TokenKind);
        visit_named_type, end_visit_named_type(&'ctx TypeSpec<'ctx>, Name);
        visit_array_type, end_visit_array_type(&'ctx TypeSpec<'ctx>, &'ctx ArraySpec<'ctx>);
        visit_struct_type, end_visit_struct_type(&'ctx TypeSpec<'ctx>, &'ctx StructSpec<'ctx>);
        visit_qualified_type, end_visit_qualified_type(&'ctx TypeSpec<'ctx>, &'ctx QualifiedSpec<'ctx>);
        visit_struct_field, end_visit_struct_field(&'ctx StructField<'ctx>);

        /* Declarations */
        visit_precision_declaration, end_visit_precision_declaration(&'ctx Declaration<'ctx>, &'ctx PrecisionDecl<'ctx>);
        visit_parameter_declaration, end_visit_parameter_declaration(&'ctx Declaration<'ctx>, &'ctx ParameterDecl<'ctx>);
        visit_variable_declaration, end_visit_variable_declaration(&'ctx Declaration<'ctx>, &'ctx VariableDecl<'ctx>);
        visit_type_declaration, end_visit_type_declaration(&'ctx Declaration<'ctx>, &'ctx TypeDecl<'ctx>);
        visit_type_and_variable_declaration, end_visit_type_and_variable_declaration(&'ctx Declaration<'ctx>, &'ctx TypeAndVariableDecl<'ctx>);
        visit_invariant_declaration, end_visit_invariant_declaration(&'ctx Declaration<'ctx>, &'ctx InvariantDecl);
        visit_init_declaration, end_visit_init_declaration(&'ctx Declaration<'ctx>, &'ctx InitDecl<'ctx>);
        visit_function_declaration, end_visit_function_declaration(&'ctx Declaration<'ctx>, &'ctx FunctionDecl<'ctx>);
    }
}

fn accept_all<'ctx, T, V>(nodes: &'ctx [&'ctx T], v: &mut V, accept: fn(&'ctx T, &mut V))
where
    V: ?Sized,
{
    for &node in nodes {
        accept(node, v);
    }
}

impl<'ctx> TranslationUnit<'ctx> {
    pub fn accept<V: Visitor<'ctx> + ?Sized>(&'ctx self, v: &mut V) {
        if v.pre_visit(Node::TranslationUnit(self)) {
            if v.visit_translation_unit(self) {
                accept_all(self.decls, v, Declaration::accept);
            }
            v.end_visit_translation_unit(self);
        }
        v.post_visit(Node::TranslationUnit(self));
    }
}

impl<'ctx> Expression<'ctx> {
    pub fn accept<V: Visitor<'ctx> + ?Sized>(&'ctx self, v: &mut V) {
        if v.pre_visit(Node::Expression(self)) {
            walk_expression(v, self);
        }
        v.post_visit(Node::Expression(self));
    }
}

impl<'ctx> FunctionIdentifier<'ctx> {
    pub fn accept<V: Visitor<'ctx> + ?Sized>(&'ctx self, v: &mut V) {
        if v.pre_visit(Node::FunctionIdentifier(self)) {
            if v.visit_function_identifier(self) {
                if let FunctionIdentifierKind::Type(ty) = &self.kind {
                    ty.accept(v);
                }
            }
            v.end_visit_function_identifier(self);
        }
        v.post_visit(Node::FunctionIdentifier(self));
    }
}

impl<'ctx> Statement<'ctx> {
    pub fn accept<V: Visitor<'ctx> + ?Sized>(&'ctx self, v: &mut V) {
        if v.pre_visit(Node::Statement(self)) {
            walk_statement(v, self);
        }
        v.post_visit(Node::Statement(self));
    }
}

impl<'ctx> TypeSpec<'ctx> {
    pub fn accept<V: Visitor<'ctx> + ?Sized>(&'ctx self, v: &mut V) {
        if v.pre_visit(Node::TypeSpec(self)) {
            walk_type(v, self);
        }
        v.post_visit(Node::TypeSpec(self));
    }
}

impl<'ctx> StructField<'ctx> {
    pub fn accept<V: Visitor<'ctx> + ?Sized>(&'ctx self, v: &mut V) {
        if v.pre_visit(Node::StructField(self)) {
            if v.visit_struct_field(self) {
                self.ty.accept(v);
            }
            v.end_visit_struct_field(self);
        }
        v.post_visit(Node::StructField(self));
    }
}

impl<'ctx> Declaration<'ctx> {
    pub fn accept<V: Visitor<'ctx> + ?Sized>(&'ctx self, v: &mut V) {
        if v.pre_visit(Node::Declaration(self)) {
            walk_declaration(v, self);
        }
        v.post_visit(Node::Declaration(self));
    }
}

fn accept_opt<'ctx, V>(expr: Option<&'ctx Expression<'ctx>>, v: &mut V)
where
    V: Visitor<'ctx> + ?Sized,
{
    if let Some(expr) = expr {
        expr.accept(v);
    }
}

pub fn walk_expression<'ctx, V>(v: &mut V, expr: &'ctx Expression<'ctx>)
where
    V: Visitor<'ctx> + ?Sized,
{
    use ExpressionKind as EK;
    match &expr.kind {
        EK::Identifier(id) => {
            v.visit_identifier(expr, id);
            v.end_visit_identifier(expr, id);
        }
        EK::Literal(lit) => {
            v.visit_literal(expr, lit);
            v.end_visit_literal(expr, lit);
        }
        EK::Unary(u) => {
            if v.visit_unary(expr, u) {
                u.expr.accept(v);
            }
            v.end_visit_unary(expr, u);
        }
        EK::Binary(b) => {
            if v.visit_binary(expr, b) {
                b.left.accept(v);
                b.right.accept(v);
            }
            v.end_visit_binary(expr, b);
        }
        EK::Conditional(c) => {
            if v.visit_conditional(expr, c) {
                c.cond.accept(v);
                c.if_true.accept(v);
                c.if_false.accept(v);
            }
            v.end_visit_conditional(expr, c);
        }
        EK::Assignment(a) => {
            if v.visit_assignment(expr, a) {
                a.left.accept(v);
                a.right.accept(v);
            }
            v.end_visit_assignment(expr, a);
        }
        EK::MemberAccess(m) => {
            if v.visit_member_access(expr, m) {
                m.base.accept(v);
            }
            v.end_visit_member_access(expr, m);
        }
        EK::Call(call) => {
            if v.visit_function_call(expr, call) {
                call.callee.accept(v);
                accept_all(call.args, v, Expression::accept);
            }
            v.end_visit_function_call(expr, call);
        }
        EK::MemberCall(call) => {
            if v.visit_member_function_call(expr, call) {
                call.base.accept(v);
                accept_all(call.args, v, Expression::accept);
            }
            v.end_visit_member_function_call(expr, call);
        }
        EK::Declaration(decl) => {
            if v.visit_declaration_expression(expr, decl) {
                decl.ty.accept(v);
                decl.init.accept(v);
            }
            v.end_visit_declaration_expression(expr, decl);
        }
    }
}

pub fn walk_statement<'ctx, V>(v: &mut V, stmt: &'ctx Statement<'ctx>)
where
    V: Visitor<'ctx> + ?Sized,
{
    use StatementKind as SK;
    match &stmt.kind {
        SK::Expression(e) => {
            if v.visit_expression_statement(stmt, e) {
                accept_opt(e.expr, v);
            }
            v.end_visit_expression_statement(stmt, e);
        }
        SK::Compound(c) => {
            if v.visit_compound_statement(stmt, c) {
                accept_all(c.stmts, v, Statement::accept);
            }
            v.end_visit_compound_statement(stmt, c);
        }
        SK::If(i) => {
            if v.visit_if_statement(stmt, i) {
                i.cond.accept(v);
                i.if_true.accept(v);
                if let Some(if_false) = i.if_false {
                    if_false.accept(v);
                }
            }
            v.end_visit_if_statement(stmt, i);
        }
        SK::While(w) => {
            if v.visit_while_statement(stmt, w) {
                w.cond.accept(v);
                w.body.accept(v);
            }
            v.end_visit_while_statement(stmt, w);
        }
        SK::Do(d) => {
            if v.visit_do_statement(stmt, d) {
                d.body.accept(v);
                d.cond.accept(v);
            }
            v.end_visit_do_statement(stmt, d);
        }
        SK::For(f) => {
            if v.visit_for_statement(stmt, f) {
                f.init.accept(v);
                accept_opt(f.cond, v);
                accept_opt(f.inc, v);
                f.body.accept(v);
            }
            v.end_visit_for_statement(stmt, f);
        }
        SK::Jump(kind) => {
            v.visit_jump_statement(stmt, *kind);
            v.end_visit_jump_statement(stmt, *kind);
        }
        SK::Return(r) => {
            if v.visit_return_statement(stmt, r) {
                accept_opt(r.expr, v);
            }
            v.end_visit_return_statement(stmt, r);
        }
        SK::Switch(s) => {
            if v.visit_switch_statement(stmt, s) {
                s.expr.accept(v);
                s.body.accept(v);
            }
            v.end_visit_switch_statement(stmt, s);
        }
        SK::Case(c) => {
            if v.visit_case_label(stmt, c) {
                c.expr.accept(v);
            }
            v.end_visit_case_label(stmt, c);
        }
        SK::Default => {
            v.visit_default_label(stmt);
            v.end_visit_default_label(stmt);
        }
        SK::Declaration(d) => {
            if v.visit_declaration_statement(stmt, d) {
                d.decl.accept(v);
            }
            v.end_visit_declaration_statement(stmt, d);
        }
    }
}

pub fn walk_type<'ctx, V>(v: &mut V, ty: &'ctx TypeSpec<'ctx>)
where
    V: Visitor<'ctx> + ?Sized,
{
    match &ty.kind {
        TypeSpecKind::Basic(kind) => {
            v.visit_basic_type(ty, *kind);
            v.end_visit_basic_type(ty, *kind);
        }
        TypeSpecKind::Named(name) => {
            v.visit_named_type(ty, *name);
            v.end_visit_named_type(ty, *name);
        }
        TypeSpecKind::Array(arr) => {
            if v.visit_array_type(ty, arr) {
                arr.element.accept(v);
                accept_opt(arr.size, v);
            }
            v.end_visit_array_type(ty, arr);
        }
        TypeSpecKind::Struct(st) => {
            if v.visit_struct_type(ty, st) {
                accept_all(st.fields, v, StructField::accept);
            }
            v.end_visit_struct_type(ty, st);
        }
        TypeSpecKind::Qualified(q) => {
            if v.visit_qualified_type(ty, q) {
                if let Some(inner) = q.ty {
                    inner.accept(v);
                }
            }
            v.end_visit_qualified_type(ty, q);
        }
    }
}

pub fn walk_declaration<'ctx, V>(v: &mut V, decl: &'ctx Declaration<'ctx>)
where
    V: Visitor<'ctx> + ?Sized,
{
    use DeclarationKind as DK;
    match &decl.kind {
        DK::Precision(p) => {
            if v.visit_precision_declaration(decl, p) {
                p.ty.accept(v);
            }
            v.end_visit_precision_declaration(decl, p);
        }
        DK::Parameter(p) => {
            if v.visit_parameter_declaration(decl, p) {
                p.ty.accept(v);
            }
            v.end_visit_parameter_declaration(decl, p);
        }
        DK::Variable(var) => {
            if v.visit_variable_declaration(decl, var) {
                var.ty.accept(v);
                accept_opt(var.init, v);
            }
            v.end_visit_variable_declaration(decl, var);
        }
        DK::Type(t) => {
            if v.visit_type_declaration(decl, t) {
                t.ty.accept(v);
            }
            v.end_visit_type_declaration(decl, t);
        }
        DK::TypeAndVariable(tv) => {
            if v.visit_type_and_variable_declaration(decl, tv) {
                tv.type_decl.accept(v);
                tv.var_decl.accept(v);
            }
            v.end_visit_type_and_variable_declaration(decl, tv);
        }
        DK::Invariant(i) => {
            v.visit_invariant_declaration(decl, i);
            v.end_visit_invariant_declaration(decl, i);
        }
        DK::Init(init) => {
            if v.visit_init_declaration(decl, init) {
                accept_all(init.decls, v, Declaration::accept);
            }
            v.end_visit_init_declaration(decl, init);
        }
        DK::Function(f) => {
            if v.visit_function_declaration(decl, f) {
                f.return_type.accept(v);
                accept_all(f.params, v, Declaration::accept);
                if let Some(body) = f.body {
                    body.accept(v);
                }
            }
            v.end_visit_function_declaration(decl, f);
        }
    }
}
