//! Declarations

use core::cell::Cell;

use interner::Name;
use semantic::{Qualifiers, Symbol};
use span::Span;

use crate::stmt::Stmt;
use crate::types::{Precision, TypeSpec};
use crate::{Expr, Kind};

/// `precision highp float;`
#[derive(Debug)]
pub struct PrecisionDecl<'ctx> {
    pub precision: Precision,
    pub ty: &'ctx TypeSpec<'ctx>,
}

#[derive(Debug)]
pub struct ParameterDecl<'ctx> {
    pub ty: &'ctx TypeSpec<'ctx>,
    pub name: Option<Name>,
    /// `const` and the direction (`in`, `out`, `inout`)
    pub qualifiers: Qualifiers,
    pub symbol: Cell<Option<&'ctx Symbol<'ctx>>>,
}

#[derive(Debug)]
pub struct VariableDecl<'ctx> {
    pub ty: &'ctx TypeSpec<'ctx>,
    pub name: Name,
    pub init: Option<Expr<'ctx>>,
    pub symbol: Cell<Option<&'ctx Symbol<'ctx>>>,
}

/// Declares a type, like `struct S { ... };`. Also used for interface
/// blocks without an instance name, and for lone qualifiers.
#[derive(Debug)]
pub struct TypeDecl<'ctx> {
    pub ty: &'ctx TypeSpec<'ctx>,
}

/// `struct S { ... } s;`
#[derive(Debug)]
pub struct TypeAndVariableDecl<'ctx> {
    pub type_decl: &'ctx Declaration<'ctx>,
    pub var_decl: &'ctx Declaration<'ctx>,
}

/// `invariant gl_Position;`
#[derive(Debug)]
pub struct InvariantDecl {
    pub name: Name,
}

/// A list of declarations sharing a type: `float a, b = 1.0;`
#[derive(Debug)]
pub struct InitDecl<'ctx> {
    pub decls: &'ctx [&'ctx Declaration<'ctx>],
}

#[derive(Debug)]
pub struct FunctionDecl<'ctx> {
    pub return_type: &'ctx TypeSpec<'ctx>,
    pub name: Name,
    pub params: &'ctx [&'ctx Declaration<'ctx>],
    /// None for prototypes
    pub body: Option<Stmt<'ctx>>,
    pub symbol: Cell<Option<&'ctx Symbol<'ctx>>>,
}

impl<'ctx> FunctionDecl<'ctx> {
    pub fn is_prototype(&self) -> bool { self.body.is_none() }

    pub fn parameters(&self) -> impl Iterator<Item = &'ctx ParameterDecl<'ctx>> + use<'ctx> {
        let params: &'ctx [&'ctx Declaration<'ctx>] = self.params;
        params.iter().filter_map(|p| match &p.kind {
            DeclarationKind::Parameter(param) => Some(param),
            _ => None,
        })
    }
}

#[derive(Debug)]
pub enum DeclarationKind<'ctx> {
    Precision(PrecisionDecl<'ctx>),
    Parameter(ParameterDecl<'ctx>),
    Variable(VariableDecl<'ctx>),
    Type(TypeDecl<'ctx>),
    TypeAndVariable(TypeAndVariableDecl<'ctx>),
    Invariant(InvariantDecl),
    Init(InitDecl<'ctx>),
    Function(FunctionDecl<'ctx>),
}

#[derive(Debug)]
pub struct Declaration<'ctx> {
    pub kind: DeclarationKind<'ctx>,
    pub span: Span,
}

impl<'ctx> Declaration<'ctx> {
    pub fn new(kind: DeclarationKind<'ctx>, span: Span) -> Self { Self { kind, span } }

    pub fn kind(&self) -> Kind {
        use DeclarationKind as DK;
        match &self.kind {
            DK::Precision(_) => Kind::PrecisionDeclaration,
            DK::Parameter(_) => Kind::ParameterDeclaration,
            DK::Variable(_) => Kind::VariableDeclaration,
            DK::Type(_) => Kind::TypeDeclaration,
            DK::TypeAndVariable(_) => Kind::TypeAndVariableDeclaration,
            DK::Invariant(_) => Kind::InvariantDeclaration,
            DK::Init(_) => Kind::InitDeclaration,
            DK::Function(_) => Kind::FunctionDeclaration,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionDecl<'ctx>> {
        match &self.kind {
            DeclarationKind::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_variable(&self) -> Option<&VariableDecl<'ctx>> {
        match &self.kind {
            DeclarationKind::Variable(v) => Some(v),
            _ => None,
        }
    }
}
