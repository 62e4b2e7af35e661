use span::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Holds the spelling of the offending token
    UnexpectedToken(String),
    /// Expressions or statements nested past [`MAX_NESTING`](crate::MAX_NESTING)
    NestingTooDeep,
}

#[derive(Debug)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

impl error_manager::Error for ParseError {
    fn get_span(&self) -> Span { self.span }

    fn write_msg(&self, out: &mut dyn core::fmt::Write) -> core::fmt::Result {
        match &self.kind {
            ParseErrorKind::UnexpectedToken(tok) => write!(out, "unexpected token '{tok}'"),
            ParseErrorKind::NestingTooDeep => write!(out, "nesting too deep"),
        }
    }
}
