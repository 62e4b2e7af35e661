use span::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticErrorKind {
    Undeclared(String),
    NoMember {
        ty: String,
        field: String,
    },
    NotAStructOrVector {
        ty: String,
        field: String,
    },
    NoMemberFunction {
        ty: String,
        method: String,
    },
    TooFewArguments(String),
    TooManyArguments(String),
    NoMatchingFunction(String),
    AmbiguousCall(String),
    NotAFunction(String),
    NotAType(String),
    InvalidSubscript(String),
    Redefinition(String),
}

pub struct SemanticError {
    pub kind: SemanticErrorKind,
    pub span: Span,
}

impl error_manager::Error for SemanticError {
    fn get_span(&self) -> Span { self.span }

    fn write_msg(&self, out: &mut dyn core::fmt::Write) -> core::fmt::Result {
        match &self.kind {
            SemanticErrorKind::Undeclared(name) => {
                write!(out, "'{name}' was not declared in this scope")
            }
            SemanticErrorKind::NoMember { ty, field } => {
                write!(out, "'{ty}' has no member named '{field}'")
            }
            SemanticErrorKind::NotAStructOrVector { ty, field } => {
                write!(out, "request for member '{field}' in something not a structure or vector ('{ty}')")
            }
            SemanticErrorKind::NoMemberFunction { ty, method } => {
                write!(out, "'{ty}' has no member function named '{method}'")
            }
            SemanticErrorKind::TooFewArguments(name) => {
                write!(out, "too few arguments to function '{name}'")
            }
            SemanticErrorKind::TooManyArguments(name) => {
                write!(out, "too many arguments to function '{name}'")
            }
            SemanticErrorKind::NoMatchingFunction(name) => {
                write!(out, "no matching function for call to '{name}'")
            }
            SemanticErrorKind::AmbiguousCall(name) => {
                write!(out, "call of overloaded '{name}' is ambiguous")
            }
            SemanticErrorKind::NotAFunction(name) => {
                write!(out, "'{name}' cannot be used as a function")
            }
            SemanticErrorKind::NotAType(name) => write!(out, "'{name}' does not name a type"),
            SemanticErrorKind::InvalidSubscript(ty) => {
                write!(out, "subscripted value of type '{ty}' is not an array, matrix or vector")
            }
            SemanticErrorKind::Redefinition(name) => write!(out, "redefinition of '{name}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticWarningKind {
    /// A function prototype that doesn't match any definition's
    /// return type
    ConflictingReturnType(String),
}

pub struct SemanticWarning {
    pub kind: SemanticWarningKind,
    pub span: Span,
}

impl error_manager::Error for SemanticWarning {
    fn get_span(&self) -> Span { self.span }

    fn write_msg(&self, out: &mut dyn core::fmt::Write) -> core::fmt::Result {
        match &self.kind {
            SemanticWarningKind::ConflictingReturnType(name) => {
                write!(out, "conflicting return type for '{name}'")
            }
        }
    }
}
