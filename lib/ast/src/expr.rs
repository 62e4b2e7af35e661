//! Expressions

use core::cell::Cell;

use interner::Name;
use lexer::TokenKind;
use semantic::{Symbol, Ty};
use span::Span;

use crate::Kind;
use crate::types::TypeSpec;

pub type Expr<'ctx> = &'ctx Expression<'ctx>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    PreIncrement,
    PostIncrement,
    PreDecrement,
    PostDecrement,
    Plus,
    Minus,
    Not,
    BitNot,
}

impl UnaryOp {
    /// Maps a prefix operator
    pub fn prefix(value: TokenKind) -> Option<Self> {
        Some(match value {
            TokenKind::PlusPlus => Self::PreIncrement,
            TokenKind::MinusMinus => Self::PreDecrement,
            TokenKind::Plus => Self::Plus,
            TokenKind::Minus => Self::Minus,
            TokenKind::Bang => Self::Not,
            TokenKind::Tilde => Self::BitNot,
            _ => return None,
        })
    }

    pub fn kind(self) -> Kind {
        match self {
            Self::PreIncrement => Kind::PreIncrement,
            Self::PostIncrement => Kind::PostIncrement,
            Self::PreDecrement => Kind::PreDecrement,
            Self::PostDecrement => Kind::PostDecrement,
            Self::Plus => Kind::UnaryPlus,
            Self::Minus => Kind::UnaryMinus,
            Self::Not => Kind::LogicalNot,
            Self::BitNot => Kind::BitwiseNot,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Shl,
    Shr,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    Xor,
    BitAnd,
    BitOr,
    BitXor,
    Comma,
    /// `a[b]`
    Index,
}

impl TryFrom<TokenKind> for BinaryOp {
    type Error = ();

    fn try_from(value: TokenKind) -> Result<Self, Self::Error> {
        use TokenKind as T;
        Ok(match value {
            T::Plus => Self::Add,
            T::Minus => Self::Sub,
            T::Star => Self::Mul,
            T::Slash => Self::Div,
            T::Percent => Self::Mod,
            T::LessLess => Self::Shl,
            T::GreaterGreater => Self::Shr,
            T::EqualEqual => Self::Eq,
            T::BangEqual => Self::Ne,
            T::Less => Self::Lt,
            T::LessEqual => Self::Le,
            T::Greater => Self::Gt,
            T::GreaterEqual => Self::Ge,
            T::AmpersandAmpersand => Self::And,
            T::PipePipe => Self::Or,
            T::CaretCaret => Self::Xor,
            T::Ampersand => Self::BitAnd,
            T::Pipe => Self::BitOr,
            T::Caret => Self::BitXor,
            T::Comma => Self::Comma,
            _ => return Err(()),
        })
    }
}

impl BinaryOp {
    pub fn kind(self) -> Kind {
        match self {
            Self::Add => Kind::Plus,
            Self::Sub => Kind::Minus,
            Self::Mul => Kind::Multiply,
            Self::Div => Kind::Divide,
            Self::Mod => Kind::Modulus,
            Self::Shl => Kind::ShiftLeft,
            Self::Shr => Kind::ShiftRight,
            Self::Eq => Kind::Equal,
            Self::Ne => Kind::NotEqual,
            Self::Lt => Kind::LessThan,
            Self::Le => Kind::LessEqual,
            Self::Gt => Kind::GreaterThan,
            Self::Ge => Kind::GreaterEqual,
            Self::And => Kind::LogicalAnd,
            Self::Or => Kind::LogicalOr,
            Self::Xor => Kind::LogicalXor,
            Self::BitAnd => Kind::BitwiseAnd,
            Self::BitOr => Kind::BitwiseOr,
            Self::BitXor => Kind::BitwiseXor,
            Self::Comma => Kind::Comma,
            Self::Index => Kind::ArrayAccess,
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(self, Self::Eq | Self::Ne | Self::Lt | Self::Le | Self::Gt | Self::Ge)
    }

    pub fn is_logical(self) -> bool { matches!(self, Self::And | Self::Or | Self::Xor) }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Shl,
    Shr,
    And,
    Or,
    Xor,
}

impl TryFrom<TokenKind> for AssignOp {
    type Error = ();

    fn try_from(value: TokenKind) -> Result<Self, Self::Error> {
        use TokenKind as T;
        Ok(match value {
            T::Equal => Self::Assign,
            T::PlusEqual => Self::Add,
            T::MinusEqual => Self::Sub,
            T::StarEqual => Self::Mul,
            T::SlashEqual => Self::Div,
            T::PercentEqual => Self::Mod,
            T::LessLessEqual => Self::Shl,
            T::GreaterGreaterEqual => Self::Shr,
            T::AmpersandEqual => Self::And,
            T::PipeEqual => Self::Or,
            T::CaretEqual => Self::Xor,
            _ => return Err(()),
        })
    }
}

impl AssignOp {
    pub fn kind(self) -> Kind {
        match self {
            Self::Assign => Kind::Assign,
            Self::Add => Kind::AssignPlus,
            Self::Sub => Kind::AssignMinus,
            Self::Mul => Kind::AssignMultiply,
            Self::Div => Kind::AssignDivide,
            Self::Mod => Kind::AssignModulus,
            Self::Shl => Kind::AssignShiftLeft,
            Self::Shr => Kind::AssignShiftRight,
            Self::And => Kind::AssignAnd,
            Self::Or => Kind::AssignOr,
            Self::Xor => Kind::AssignXor,
        }
    }
}

#[derive(Debug)]
pub struct IdentifierExpr<'ctx> {
    pub name: Name,
    /// The symbol this identifier resolved to
    pub symbol: Cell<Option<&'ctx Symbol<'ctx>>>,
}

/// A number or boolean literal, in it's source spelling
#[derive(Debug)]
pub struct LiteralExpr {
    pub value: Name,
}

#[derive(Debug)]
pub struct UnaryExpr<'ctx> {
    pub op: UnaryOp,
    pub expr: Expr<'ctx>,
}

#[derive(Debug)]
pub struct BinaryExpr<'ctx> {
    pub op: BinaryOp,
    pub left: Expr<'ctx>,
    pub right: Expr<'ctx>,
}

#[derive(Debug)]
pub struct ConditionalExpr<'ctx> {
    pub cond: Expr<'ctx>,
    pub if_true: Expr<'ctx>,
    pub if_false: Expr<'ctx>,
}

#[derive(Debug)]
pub struct AssignmentExpr<'ctx> {
    pub op: AssignOp,
    pub left: Expr<'ctx>,
    pub right: Expr<'ctx>,
}

#[derive(Debug)]
pub struct MemberAccessExpr<'ctx> {
    pub base: Expr<'ctx>,
    pub field: Name,
    pub field_span: Span,
}

/// What's being called: a function name, or a type for constructors.
#[derive(Debug)]
pub enum FunctionIdentifierKind<'ctx> {
    Name(Name),
    Type(&'ctx TypeSpec<'ctx>),
}

#[derive(Debug)]
pub struct FunctionIdentifier<'ctx> {
    pub kind: FunctionIdentifierKind<'ctx>,
    pub span: Span,
}

impl FunctionIdentifier<'_> {
    pub fn kind(&self) -> Kind { Kind::FunctionIdentifier }

    pub fn name(&self) -> Option<Name> {
        match self.kind {
            FunctionIdentifierKind::Name(name) => Some(name),
            FunctionIdentifierKind::Type(_) => None,
        }
    }
}

#[derive(Debug)]
pub struct CallExpr<'ctx> {
    pub callee: &'ctx FunctionIdentifier<'ctx>,
    pub args: &'ctx [Expr<'ctx>],
    /// The function this call resolved to
    pub function: Cell<Option<&'ctx Symbol<'ctx>>>,
}

/// `base.method(args)`
#[derive(Debug)]
pub struct MemberCallExpr<'ctx> {
    pub base: Expr<'ctx>,
    pub method: Name,
    pub args: &'ctx [Expr<'ctx>],
}

/// A declaration used as a condition: `while (bool b = f())`
#[derive(Debug)]
pub struct DeclarationExpr<'ctx> {
    pub ty: &'ctx TypeSpec<'ctx>,
    pub name: Name,
    pub init: Expr<'ctx>,
    pub symbol: Cell<Option<&'ctx Symbol<'ctx>>>,
}

#[derive(Debug)]
pub enum ExpressionKind<'ctx> {
    Identifier(IdentifierExpr<'ctx>),
    Literal(LiteralExpr),
    Unary(UnaryExpr<'ctx>),
    Binary(BinaryExpr<'ctx>),
    Conditional(ConditionalExpr<'ctx>),
    Assignment(AssignmentExpr<'ctx>),
    MemberAccess(MemberAccessExpr<'ctx>),
    Call(CallExpr<'ctx>),
    MemberCall(MemberCallExpr<'ctx>),
    Declaration(DeclarationExpr<'ctx>),
}

#[derive(Debug)]
pub struct Expression<'ctx> {
    pub kind: ExpressionKind<'ctx>,
    pub span: Span,
    pub ty: Cell<Option<&'ctx Ty<'ctx>>>,
    pub constant: Cell<bool>,
}

impl<'ctx> Expression<'ctx> {
    pub fn new(kind: ExpressionKind<'ctx>, span: Span) -> Self {
        Self {
            kind,
            span,
            ty: Cell::new(None),
            constant: Cell::new(false),
        }
    }

    pub fn kind(&self) -> Kind {
        use ExpressionKind as EK;
        match &self.kind {
            EK::Identifier(_) => Kind::Identifier,
            EK::Literal(_) => Kind::Literal,
            EK::Unary(u) => u.op.kind(),
            EK::Binary(b) => b.op.kind(),
            EK::Conditional(_) => Kind::Conditional,
            EK::Assignment(a) => a.op.kind(),
            EK::MemberAccess(_) => Kind::MemberAccess,
            EK::Call(_) => Kind::FunctionCall,
            EK::MemberCall(_) => Kind::MemberFunctionCall,
            EK::Declaration(_) => Kind::DeclarationExpression,
        }
    }

    /// The type of this expression. Only available after analysis.
    pub fn ty(&self) -> Option<&'ctx Ty<'ctx>> { self.ty.get() }

    pub fn set_ty(&self, ty: &'ctx Ty<'ctx>) { self.ty.set(Some(ty)); }

    /// True for literals, once analyzed. Constant folding is not done,
    /// so no other expression is marked.
    pub fn is_constant(&self) -> bool { self.constant.get() }

    pub fn set_constant(&self, constant: bool) { self.constant.set(constant); }

    pub fn as_identifier(&self) -> Option<&IdentifierExpr<'ctx>> {
        match &self.kind {
            ExpressionKind::Identifier(id) => Some(id),
            _ => None,
        }
    }
}
