//! Type specifiers
//!
//! These are the types as written in the source. The analyzer resolves
//! each of them to a [`semantic::Ty`], and stores it in the node.

use core::cell::Cell;

use interner::Name;
use lexer::TokenKind;
use semantic::{Qualifiers, Symbol, Ty};
use span::Span;

use crate::{Expr, Kind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Precision {
    Lowp,
    Mediump,
    Highp,
}

impl TryFrom<TokenKind> for Precision {
    type Error = ();

    fn try_from(value: TokenKind) -> Result<Self, Self::Error> {
        Ok(match value {
            TokenKind::Lowp => Self::Lowp,
            TokenKind::Mediump => Self::Mediump,
            TokenKind::Highp => Self::Highp,
            _ => return Err(()),
        })
    }
}

/// `layout(name = value)`
#[derive(Debug)]
pub struct LayoutQualifier {
    pub name: Name,
    pub value: Option<Name>,
    pub span: Span,
}

#[derive(Debug)]
pub struct StructField<'ctx> {
    pub name: Name,
    pub ty: &'ctx TypeSpec<'ctx>,
    pub span: Span,
}

impl StructField<'_> {
    pub fn kind(&self) -> Kind { Kind::StructField }
}

#[derive(Debug)]
pub struct StructSpec<'ctx> {
    pub name: Option<Name>,
    pub fields: &'ctx [&'ctx StructField<'ctx>],
    /// The struct symbol, set by the analyzer
    pub symbol: Cell<Option<&'ctx Symbol<'ctx>>>,
}

#[derive(Debug)]
pub struct ArraySpec<'ctx> {
    pub element: &'ctx TypeSpec<'ctx>,
    pub size: Option<Expr<'ctx>>,
}

#[derive(Debug)]
pub struct QualifiedSpec<'ctx> {
    pub qualifiers: Qualifiers,
    pub layout: &'ctx [LayoutQualifier],
    /// None for a lone qualifier declaration, like `layout(...) in;`
    pub ty: Option<&'ctx TypeSpec<'ctx>>,
}

#[derive(Debug)]
pub enum TypeSpecKind<'ctx> {
    /// A builtin type keyword: `float`, `vec3`, `sampler2D`...
    Basic(TokenKind),
    /// A user defined type, like a struct name
    Named(Name),
    Array(ArraySpec<'ctx>),
    Struct(StructSpec<'ctx>),
    Qualified(QualifiedSpec<'ctx>),
}

#[derive(Debug)]
pub struct TypeSpec<'ctx> {
    pub kind: TypeSpecKind<'ctx>,
    pub precision: Option<Precision>,
    pub span: Span,
    pub ty: Cell<Option<&'ctx Ty<'ctx>>>,
}

impl<'ctx> TypeSpec<'ctx> {
    pub fn new(kind: TypeSpecKind<'ctx>, precision: Option<Precision>, span: Span) -> Self {
        Self {
            kind,
            precision,
            span,
            ty: Cell::new(None),
        }
    }

    pub fn kind(&self) -> Kind {
        match &self.kind {
            TypeSpecKind::Basic(_) => Kind::BasicType,
            TypeSpecKind::Named(_) => Kind::NamedType,
            TypeSpecKind::Array(ArraySpec { size: Some(_), .. }) => Kind::ArrayType,
            TypeSpecKind::Array(ArraySpec { size: None, .. }) => Kind::OpenArrayType,
            TypeSpecKind::Struct(StructSpec { name: Some(_), .. }) => Kind::StructType,
            TypeSpecKind::Struct(StructSpec { name: None, .. }) => Kind::AnonymousStructType,
            TypeSpecKind::Qualified(_) => Kind::QualifiedType,
        }
    }

    /// The resolved type. Only available after analysis.
    pub fn ty(&self) -> Option<&'ctx Ty<'ctx>> { self.ty.get() }

    pub fn set_ty(&self, ty: &'ctx Ty<'ctx>) { self.ty.set(Some(ty)); }

    /// Skips the qualifiers, returning the underlying type
    pub fn unqualified(&self) -> Option<&Self> {
        match &self.kind {
            TypeSpecKind::Qualified(q) => q.ty.and_then(TypeSpec::unqualified),
            _ => Some(self),
        }
    }

    pub fn qualifiers(&self) -> Qualifiers {
        match &self.kind {
            TypeSpecKind::Qualified(q) => q.qualifiers,
            _ => Qualifiers::NONE,
        }
    }

    pub fn as_struct(&self) -> Option<&StructSpec<'ctx>> {
        match &self.unqualified()?.kind {
            TypeSpecKind::Struct(st) => Some(st),
            _ => None,
        }
    }
}
