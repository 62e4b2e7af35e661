//! Semantic analysis
//!
//! Walks the [AST](ast), declaring every symbol in the session's scope
//! graph, and annotating each expression and type specifier with it's
//! [type](Ty). Errors are reported to the [Session] and never stop the
//! analysis: the offending expression is typed as undefined, and
//! undefined operands don't produce any more errors.
//!
//! # Example
//! ```
//! use arena::DroplessArena;
//! use semantic::Session;
//!
//! let arena = DroplessArena::default();
//! let sess = Session::new(&arena);
//! let global = sess.new_namespace();
//!
//! let unit = parser::parse_translation_unit("float x = 1.0; int y = z;", &sess);
//! typecheck::analyze(unit, &sess, global);
//!
//! let diags = sess.diagnostics();
//! assert_eq!(diags.n_errors(), 1);
//! assert_eq!(diags.diagnostics()[0].message(), "'z' was not declared in this scope");
//! ```

use ast::declaration::{
    FunctionDecl, InvariantDecl, ParameterDecl, TypeAndVariableDecl, TypeDecl, VariableDecl,
};
use ast::expr::{
    AssignmentExpr, BinaryExpr, BinaryOp, CallExpr, ConditionalExpr, DeclarationExpr,
    FunctionIdentifierKind, IdentifierExpr, LiteralExpr, MemberAccessExpr, MemberCallExpr, UnaryExpr,
    UnaryOp,
};
use ast::stmt::{CompoundStmt, ForStmt, WhileStmt};
use ast::types::{ArraySpec, QualifiedSpec, StructField, StructSpec};
use ast::{Declaration, Expr, Expression, Node, Statement, TranslationUnit, TypeSpec, Visitor};
use interner::Name;
use lexer::TokenKind;
use log::{debug, trace};
use semantic::errors::{SemanticError, SemanticErrorKind};
use semantic::rules::SemanticRule;
use semantic::rules::decl::{CheckRedefinition, DeclareFunction};
use semantic::rules::expr::{
    ResolveCall, TypeLiteral, ValidateIndex, ValidateMemberAccess, ValidateMemberCall,
};
use semantic::{Qualifiers, Session, Symbol, Ty};
use span::Span;

/// Analyzes a translation unit, declaring it's symbols in `global`
pub fn analyze<'ctx>(unit: &'ctx TranslationUnit<'ctx>, sess: &Session<'ctx>, global: &'ctx Symbol<'ctx>) {
    let before = sess.symbol_count();
    let mut analyzer = Analyzer::new(sess, global);
    unit.accept(&mut analyzer);
    debug!(
        "Analyzed {} declarations, {} new symbols",
        unit.decls.len(),
        sess.symbol_count() - before
    );
}

/// Analyzes a standalone expression, resolving names from `scope`.
/// Returns the type of the expression.
pub fn analyze_expression<'ctx>(
    expr: Expr<'ctx>,
    sess: &Session<'ctx>,
    scope: &'ctx Symbol<'ctx>,
) -> &'ctx Ty<'ctx> {
    let mut analyzer = Analyzer::new(sess, scope);
    expr.accept(&mut analyzer);
    analyzer.type_of(expr)
}

struct Analyzer<'a, 'ctx> {
    sess: &'a Session<'ctx>,
    scope: &'ctx Symbol<'ctx>,
    /// Set while visiting the type of `uniform Block { ... } instance;`.
    /// Only blocks without an instance put their members in scope.
    declaring_instance: bool,
}

impl<'a, 'ctx> Analyzer<'a, 'ctx> {
    fn new(sess: &'a Session<'ctx>, scope: &'ctx Symbol<'ctx>) -> Self {
        Self {
            sess,
            scope,
            declaring_instance: false,
        }
    }

    fn undefined(&self) -> &'ctx Ty<'ctx> { self.sess.undefined_type() }

    fn type_of(&self, expr: &Expression<'ctx>) -> &'ctx Ty<'ctx> {
        expr.ty().unwrap_or_else(|| self.undefined())
    }

    fn spec_type(&self, spec: &TypeSpec<'ctx>) -> &'ctx Ty<'ctx> {
        spec.ty().unwrap_or_else(|| self.undefined())
    }

    fn error(&self, kind: SemanticErrorKind, span: Span) {
        self.sess.emit_error(SemanticError { kind, span });
    }

    fn undeclared(&self, name: Name, span: Span) -> &'ctx Ty<'ctx> {
        self.error(SemanticErrorKind::Undeclared(self.sess.name_to_string(name)), span);
        self.undefined()
    }

    fn enter(&mut self, scope: &'ctx Symbol<'ctx>) { self.scope = scope; }

    fn exit(&mut self) {
        if let Some(parent) = self.scope.scope() {
            self.scope = parent;
        }
    }

    /// Declares a variable in the current scope
    fn declare_variable(
        &self,
        name: Name,
        ty: &'ctx Ty<'ctx>,
        qualifiers: Qualifiers,
        span: Span,
    ) -> &'ctx Symbol<'ctx> {
        let sym = self.sess.new_variable(self.scope, Some(name), ty, qualifiers, span.line);
        if (CheckRedefinition { scope: self.scope, name, span }).apply(self.sess) {
            self.scope.add(self.sess, sym);
        }
        sym
    }

    /// A block scope, nested in the current one
    fn new_block(&mut self, line: u32) -> &'ctx Symbol<'ctx> {
        let block = self.sess.new_block(self.scope, line);
        self.scope.add(self.sess, block);
        self.enter(block);
        block
    }
}

impl<'ctx> Visitor<'ctx> for Analyzer<'_, 'ctx> {
    /// Type specifiers can be shared by several declarations
    /// (`float a, b[2];`). They're only resolved once.
    fn pre_visit(&mut self, node: Node<'ctx>) -> bool {
        match node {
            Node::TypeSpec(spec) => spec.ty().is_none(),
            _ => true,
        }
    }

    /* ==== Expressions ==== */

    fn end_visit_identifier(&mut self, expr: &'ctx Expression<'ctx>, id: &'ctx IdentifierExpr<'ctx>) {
        let ty = match self.scope.lookup(id.name) {
            Some(sym) => {
                id.symbol.set(Some(sym));
                sym.ty()
            }
            None => self.undeclared(id.name, expr.span),
        };
        expr.set_ty(ty);
    }

    fn end_visit_literal(&mut self, expr: &'ctx Expression<'ctx>, lit: &'ctx LiteralExpr) {
        expr.set_ty(TypeLiteral { value: lit.value }.apply(self.sess));
        expr.set_constant(true);
    }

    fn end_visit_unary(&mut self, expr: &'ctx Expression<'ctx>, u: &'ctx UnaryExpr<'ctx>) {
        let ty = match u.op {
            UnaryOp::Not => self.sess.bool_type(),
            _ => self.type_of(u.expr),
        };
        expr.set_ty(ty);
    }

    fn end_visit_binary(&mut self, expr: &'ctx Expression<'ctx>, b: &'ctx BinaryExpr<'ctx>) {
        let left = self.type_of(b.left);
        let ty = match b.op {
            BinaryOp::Comma => self.type_of(b.right),
            BinaryOp::Index => ValidateIndex { base: left, span: expr.span }.apply(self.sess),
            op if op.is_comparison() || op.is_logical() => self.sess.bool_type(),
            _ => left,
        };
        expr.set_ty(ty);
    }

    fn end_visit_conditional(&mut self, expr: &'ctx Expression<'ctx>, c: &'ctx ConditionalExpr<'ctx>) {
        expr.set_ty(self.type_of(c.if_true));
    }

    fn end_visit_assignment(&mut self, expr: &'ctx Expression<'ctx>, a: &'ctx AssignmentExpr<'ctx>) {
        expr.set_ty(self.type_of(a.left));
    }

    fn end_visit_member_access(&mut self, expr: &'ctx Expression<'ctx>, m: &'ctx MemberAccessExpr<'ctx>) {
        let ty = ValidateMemberAccess {
            base: self.type_of(m.base),
            field: m.field,
            span: m.field_span,
        }
        .apply(self.sess);
        expr.set_ty(ty);
    }

    fn end_visit_member_function_call(&mut self, expr: &'ctx Expression<'ctx>, call: &'ctx MemberCallExpr<'ctx>) {
        let args: Vec<_> = call.args.iter().map(|arg| self.type_of(arg)).collect();
        let ty = ValidateMemberCall {
            base: self.type_of(call.base),
            method: call.method,
            args: &args,
            span: expr.span,
        }
        .apply(self.sess);
        expr.set_ty(ty);
    }

    fn end_visit_function_call(&mut self, expr: &'ctx Expression<'ctx>, call: &'ctx CallExpr<'ctx>) {
        let ty = match &call.callee.kind {
            /* Constructor */
            FunctionIdentifierKind::Type(spec) => self.spec_type(spec),
            FunctionIdentifierKind::Name(name) => match self.scope.lookup(*name) {
                Some(callee) => {
                    let args: Vec<_> = call.args.iter().map(|arg| self.type_of(arg)).collect();
                    let resolved = ResolveCall {
                        callee,
                        args: &args,
                        span: call.callee.span,
                    }
                    .apply(self.sess);
                    call.function.set(resolved.function);
                    resolved.ty
                }
                None => self.undeclared(*name, call.callee.span),
            },
        };
        expr.set_ty(ty);
    }

    fn end_visit_declaration_expression(
        &mut self,
        expr: &'ctx Expression<'ctx>,
        decl: &'ctx DeclarationExpr<'ctx>,
    ) {
        let ty = self.spec_type(decl.ty);
        let sym = self.declare_variable(decl.name, ty, decl.ty.qualifiers(), expr.span);
        decl.symbol.set(Some(sym));
        expr.set_ty(ty);
    }

    /* ==== Statements ==== */

    fn visit_compound_statement(&mut self, stmt: &'ctx Statement<'ctx>, c: &'ctx CompoundStmt<'ctx>) -> bool {
        c.scope.set(Some(self.new_block(stmt.span.line)));
        true
    }

    fn end_visit_compound_statement(&mut self, _: &'ctx Statement<'ctx>, _: &'ctx CompoundStmt<'ctx>) {
        self.exit();
    }

    fn visit_while_statement(&mut self, stmt: &'ctx Statement<'ctx>, w: &'ctx WhileStmt<'ctx>) -> bool {
        w.scope.set(Some(self.new_block(stmt.span.line)));
        true
    }

    fn end_visit_while_statement(&mut self, _: &'ctx Statement<'ctx>, _: &'ctx WhileStmt<'ctx>) { self.exit(); }

    fn visit_for_statement(&mut self, stmt: &'ctx Statement<'ctx>, f: &'ctx ForStmt<'ctx>) -> bool {
        f.scope.set(Some(self.new_block(stmt.span.line)));
        true
    }

    fn end_visit_for_statement(&mut self, _: &'ctx Statement<'ctx>, _: &'ctx ForStmt<'ctx>) { self.exit(); }

    /* ==== Types ==== */

    fn end_visit_basic_type(&mut self, spec: &'ctx TypeSpec<'ctx>, kind: TokenKind) {
        spec.set_ty(self.sess.type_for_token(kind).unwrap_or_else(|| self.undefined()));
    }

    fn end_visit_named_type(&mut self, spec: &'ctx TypeSpec<'ctx>, name: Name) {
        let ty = match self.scope.lookup(name) {
            Some(sym) if sym.is_struct() => sym.ty(),
            _ => {
                self.error(SemanticErrorKind::NotAType(self.sess.name_to_string(name)), spec.span);
                self.undefined()
            }
        };
        spec.set_ty(ty);
    }

    fn end_visit_array_type(&mut self, spec: &'ctx TypeSpec<'ctx>, arr: &'ctx ArraySpec<'ctx>) {
        let element = self.spec_type(arr.element);
        let ty = if element.is_undefined() {
            element
        } else {
            self.sess.array_type(element)
        };
        spec.set_ty(ty);
    }

    fn visit_struct_type(&mut self, spec: &'ctx TypeSpec<'ctx>, st: &'ctx StructSpec<'ctx>) -> bool {
        let sym = self.sess.new_struct(self.scope, st.name, spec.span.line);
        if let Some(name) = st.name
            && (CheckRedefinition { scope: self.scope, name, span: spec.span }).apply(self.sess)
        {
            self.scope.add(self.sess, sym);
        }
        trace!("Declared struct at line {}", spec.span.line);
        st.symbol.set(Some(sym));
        spec.set_ty(sym.ty());
        self.enter(sym);
        true
    }

    fn end_visit_struct_type(&mut self, _: &'ctx TypeSpec<'ctx>, _: &'ctx StructSpec<'ctx>) { self.exit(); }

    fn end_visit_struct_field(&mut self, field: &'ctx StructField<'ctx>) {
        let ty = self.spec_type(field.ty);
        self.declare_variable(field.name, ty, field.ty.qualifiers(), field.span);
    }

    fn end_visit_qualified_type(&mut self, spec: &'ctx TypeSpec<'ctx>, q: &'ctx QualifiedSpec<'ctx>) {
        let ty = q.ty.map_or_else(|| self.undefined(), |inner| self.spec_type(inner));
        spec.set_ty(ty);
    }

    /* ==== Declarations ==== */

    fn end_visit_parameter_declaration(&mut self, decl: &'ctx Declaration<'ctx>, p: &'ctx ParameterDecl<'ctx>) {
        let ty = self.spec_type(p.ty);
        let arg = self.sess.new_argument(self.scope, p.name, ty, p.qualifiers, decl.span.line);
        /* A repeated name is reported, but still counts for the signature */
        if let Some(name) = p.name {
            CheckRedefinition { scope: self.scope, name, span: decl.span }.apply(self.sess);
        }
        self.scope.add(self.sess, arg);
        p.symbol.set(Some(arg));
    }

    fn end_visit_variable_declaration(&mut self, decl: &'ctx Declaration<'ctx>, var: &'ctx VariableDecl<'ctx>) {
        let ty = self.spec_type(var.ty);
        let sym = self.declare_variable(var.name, ty, var.ty.qualifiers(), decl.span);
        var.symbol.set(Some(sym));
    }

    /// An interface block without instance name puts it's members in
    /// the enclosing scope
    fn end_visit_type_declaration(&mut self, decl: &'ctx Declaration<'ctx>, t: &'ctx TypeDecl<'ctx>) {
        let qualifiers = t.ty.qualifiers();
        if self.declaring_instance || qualifiers.is_empty() {
            return;
        }
        let Some(block) = t.ty.as_struct().and_then(|st| st.symbol.get()) else {
            return;
        };
        for field in block.members() {
            if let Some(name) = field.name() {
                self.declare_variable(name, field.ty(), qualifiers, decl.span);
            }
        }
    }

    fn visit_type_and_variable_declaration(
        &mut self,
        _: &'ctx Declaration<'ctx>,
        tv: &'ctx TypeAndVariableDecl<'ctx>,
    ) -> bool {
        self.declaring_instance = true;
        tv.type_decl.accept(self);
        self.declaring_instance = false;
        tv.var_decl.accept(self);
        false
    }

    fn end_visit_invariant_declaration(&mut self, decl: &'ctx Declaration<'ctx>, inv: &'ctx InvariantDecl) {
        if self.scope.lookup(inv.name).is_none() {
            self.undeclared(inv.name, decl.span);
        }
    }

    /// The function is declared after it's parameters, and before it's
    /// body, so it can call itself
    fn visit_function_declaration(&mut self, decl: &'ctx Declaration<'ctx>, f: &'ctx FunctionDecl<'ctx>) -> bool {
        f.return_type.accept(self);

        let function = self.sess.new_function(self.scope, Some(f.name), decl.span.line);
        function.set_return_type(self.spec_type(f.return_type));
        function.set_defined(f.body.is_some());
        f.symbol.set(Some(function));

        self.enter(function);
        for &param in f.params {
            param.accept(self);
        }
        self.exit();

        DeclareFunction {
            scope: self.scope,
            function,
            span: decl.span,
        }
        .apply(self.sess);

        if let Some(body) = f.body {
            self.enter(function);
            body.accept(self);
            self.exit();
        }
        false
    }
}

#[cfg(test)]
mod test;
