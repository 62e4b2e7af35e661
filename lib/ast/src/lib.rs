//! Abstract Syntax Tree
//!
//! Every node lives on the arena of a [`semantic::Session`], and links to
//! it's children through `&'ctx` references. Lists of nodes are arena
//! slices, in source order.
//!
//! Nodes carry a few [Cell](core::cell::Cell)s, that the analyzer fills
//! with the types and symbols it resolves.

use span::Span;

pub mod declaration;
pub mod expr;
pub mod stmt;
pub mod types;
pub mod visitor;

pub use declaration::Declaration;
pub use expr::{Expr, Expression};
pub use stmt::{Statement, Stmt};
pub use types::TypeSpec;
pub use visitor::Visitor;

/// The kind of a node.
///
/// The discriminants are stable, and can be relied upon by external
/// consumers.
#[repr(u16)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    Undefined = 0,

    TranslationUnit,

    /* Primary expressions */
    Identifier,
    Literal,

    /* Unary expressions */
    PreIncrement,
    PostIncrement,
    PreDecrement,
    PostDecrement,
    UnaryPlus,
    UnaryMinus,
    LogicalNot,
    BitwiseNot,

    /* Binary expressions */
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulus,
    ShiftLeft,
    ShiftRight,
    Equal,
    NotEqual,
    LessThan,
    LessEqual,
    GreaterThan,
    GreaterEqual,
    LogicalAnd,
    LogicalOr,
    LogicalXor,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    Comma,
    ArrayAccess,

    /* Other expressions */
    Conditional,
    MemberAccess,
    FunctionCall,
    MemberFunctionCall,
    FunctionIdentifier,
    DeclarationExpression,

    /* Assignments */
    Assign,
    AssignPlus,
    AssignMinus,
    AssignMultiply,
    AssignDivide,
    AssignModulus,
    AssignShiftLeft,
    AssignShiftRight,
    AssignAnd,
    AssignOr,
    AssignXor,

    /* Statements */
    ExpressionStatement,
    CompoundStatement,
    If,
    While,
    Do,
    For,
    Break,
    Continue,
    Discard,
    Return,
    ReturnExpression,
    Switch,
    CaseLabel,
    DefaultLabel,
    DeclarationStatement,

    /* Types */
    BasicType,
    NamedType,
    ArrayType,
    OpenArrayType,
    StructType,
    AnonymousStructType,
    StructField,
    QualifiedType,

    /* Declarations */
    PrecisionDeclaration,
    ParameterDeclaration,
    VariableDeclaration,
    TypeDeclaration,
    TypeAndVariableDeclaration,
    InvariantDeclaration,
    InitDeclaration,
    FunctionDeclaration,
}

impl Kind {
    pub const fn ordinal(self) -> u16 { self as u16 }

    pub fn is_expression(self) -> bool { (Kind::Identifier..=Kind::AssignXor).contains(&self) }

    pub fn is_statement(self) -> bool {
        (Kind::ExpressionStatement..=Kind::DeclarationStatement).contains(&self)
    }

    pub fn is_type(self) -> bool { (Kind::BasicType..=Kind::QualifiedType).contains(&self) }

    pub fn is_declaration(self) -> bool {
        (Kind::PrecisionDeclaration..=Kind::FunctionDeclaration).contains(&self)
    }
}

/// The root of the tree
#[derive(Debug)]
pub struct TranslationUnit<'ctx> {
    pub decls: &'ctx [&'ctx Declaration<'ctx>],
    pub span: Span,
}

impl TranslationUnit<'_> {
    pub fn kind(&self) -> Kind { Kind::TranslationUnit }
}

/// A reference to any node of the tree
#[derive(Clone, Copy, Debug)]
pub enum Node<'ctx> {
    TranslationUnit(&'ctx TranslationUnit<'ctx>),
    Declaration(&'ctx Declaration<'ctx>),
    Statement(&'ctx Statement<'ctx>),
    Expression(&'ctx Expression<'ctx>),
    FunctionIdentifier(&'ctx expr::FunctionIdentifier<'ctx>),
    TypeSpec(&'ctx TypeSpec<'ctx>),
    StructField(&'ctx types::StructField<'ctx>),
}

impl<'ctx> Node<'ctx> {
    pub fn kind(&self) -> Kind {
        match self {
            Node::TranslationUnit(n) => n.kind(),
            Node::Declaration(n) => n.kind(),
            Node::Statement(n) => n.kind(),
            Node::Expression(n) => n.kind(),
            Node::FunctionIdentifier(n) => n.kind(),
            Node::TypeSpec(n) => n.kind(),
            Node::StructField(n) => n.kind(),
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Node::TranslationUnit(n) => n.span,
            Node::Declaration(n) => n.span,
            Node::Statement(n) => n.span,
            Node::Expression(n) => n.span,
            Node::FunctionIdentifier(n) => n.span,
            Node::TypeSpec(n) => n.span,
            Node::StructField(n) => n.span,
        }
    }

    /// Source line the node starts at
    pub fn line(&self) -> u32 { self.span().line }

    /// Visits this node. See [Visitor]
    pub fn accept<V: Visitor<'ctx> + ?Sized>(self, v: &mut V) {
        match self {
            Node::TranslationUnit(n) => n.accept(v),
            Node::Declaration(n) => n.accept(v),
            Node::Statement(n) => n.accept(v),
            Node::Expression(n) => n.accept(v),
            Node::FunctionIdentifier(n) => n.accept(v),
            Node::TypeSpec(n) => n.accept(v),
            Node::StructField(n) => n.accept(v),
        }
    }
}

#[cfg(test)]
mod test;
