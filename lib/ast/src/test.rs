use core::cell::Cell;

use arena::DroplessArena;
use interner::Interner;
use span::Span;

use crate::expr::{ExpressionKind, IdentifierExpr};
use crate::stmt::{ExprStmt, IfStmt, StatementKind};
use crate::{Expression, Kind, Node, Statement, Visitor};

#[test]
fn stable_ordinals() {
    assert_eq!(Kind::Undefined.ordinal(), 0);
    assert_eq!(Kind::TranslationUnit.ordinal(), 1);
    assert_eq!(Kind::Identifier.ordinal(), 2);
    assert_eq!(Kind::Plus.ordinal(), 12);
    assert_eq!(Kind::ArrayAccess.ordinal(), 32);
    assert_eq!(Kind::Assign.ordinal(), 39);
    assert_eq!(Kind::ExpressionStatement.ordinal(), 50);
    assert_eq!(Kind::BasicType.ordinal(), 65);
    assert_eq!(Kind::FunctionDeclaration.ordinal(), 80);

    assert!(Kind::Comma.is_expression());
    assert!(Kind::Discard.is_statement());
    assert!(Kind::StructField.is_type());
    assert!(Kind::InitDeclaration.is_declaration());
    assert!(!Kind::TranslationUnit.is_expression());
}

struct Tree<'ctx> {
    root: &'ctx Statement<'ctx>,
}

/// `if (a) b; else c;`
fn if_statement<'ctx>(arena: &'ctx DroplessArena, interner: &Interner) -> Tree<'ctx> {
    let ident = |name: &str| -> &'ctx Expression<'ctx> {
        let kind = ExpressionKind::Identifier(IdentifierExpr {
            name: interner.intern(name),
            symbol: Cell::new(None),
        });
        arena.alloc(Expression::new(kind, Span::dummy()))
    };
    let stmt = |expr: &'ctx Expression<'ctx>| -> &'ctx Statement<'ctx> {
        let kind = StatementKind::Expression(ExprStmt { expr: Some(expr) });
        arena.alloc(Statement::new(kind, Span::dummy()))
    };

    let kind = StatementKind::If(IfStmt {
        cond: ident("a"),
        if_true: stmt(ident("b")),
        if_false: Some(stmt(ident("c"))),
    });
    Tree {
        root: arena.alloc(Statement::new(kind, Span::dummy())),
    }
}

#[derive(Default)]
struct Recorder {
    pre: Vec<Kind>,
    post: Vec<Kind>,
    ends: usize,
    skip_if_children: bool,
    skip_nodes: bool,
}

impl<'ctx> Visitor<'ctx> for Recorder {
    fn pre_visit(&mut self, node: Node<'ctx>) -> bool {
        self.pre.push(node.kind());
        !self.skip_nodes
    }

    fn post_visit(&mut self, node: Node<'ctx>) { self.post.push(node.kind()); }

    fn visit_if_statement(&mut self, _: &'ctx Statement<'ctx>, _: &'ctx IfStmt<'ctx>) -> bool {
        !self.skip_if_children
    }

    fn end_visit_if_statement(&mut self, _: &'ctx Statement<'ctx>, _: &'ctx IfStmt<'ctx>) {
        self.ends += 1;
    }
}

#[test]
fn children_order() {
    let arena = DroplessArena::default();
    let interner = Interner::new();
    let tree = if_statement(&arena, &interner);

    let mut rec = Recorder::default();
    tree.root.accept(&mut rec);

    assert_eq!(
        rec.pre,
        [
            Kind::If,
            Kind::Identifier,
            Kind::ExpressionStatement,
            Kind::Identifier,
            Kind::ExpressionStatement,
            Kind::Identifier,
        ]
    );
    assert_eq!(
        rec.post,
        [
            Kind::Identifier,
            Kind::Identifier,
            Kind::ExpressionStatement,
            Kind::Identifier,
            Kind::ExpressionStatement,
            Kind::If,
        ]
    );
    assert_eq!(rec.ends, 1);
}

#[test]
fn visit_gates_children() {
    let arena = DroplessArena::default();
    let interner = Interner::new();
    let tree = if_statement(&arena, &interner);

    let mut rec = Recorder {
        skip_if_children: true,
        ..Default::default()
    };
    Node::Statement(tree.root).accept(&mut rec);

    assert_eq!(rec.pre, [Kind::If]);
    assert_eq!(rec.post, [Kind::If]);
    assert_eq!(rec.ends, 1);
}

#[test]
fn pre_visit_skips_node() {
    let arena = DroplessArena::default();
    let interner = Interner::new();
    let tree = if_statement(&arena, &interner);

    let mut rec = Recorder {
        skip_nodes: true,
        ..Default::default()
    };
    tree.root.accept(&mut rec);

    assert_eq!(rec.pre, [Kind::If]);
    assert_eq!(rec.post, [Kind::If]);
    assert_eq!(rec.ends, 0);
}

#[test]
fn return_kinds() {
    let arena = DroplessArena::default();
    let interner = Interner::new();
    let tree = if_statement(&arena, &interner);

    let StatementKind::If(i) = &tree.root.kind else { unreachable!() };
    let ret = |expr| Statement::new(StatementKind::Return(crate::stmt::ReturnStmt { expr }), Span::dummy());
    assert_eq!(ret(None).kind(), Kind::Return);
    assert_eq!(ret(Some(i.cond)).kind(), Kind::ReturnExpression);
}
