use core::any::Any;
use core::fmt;
use std::{borrow::Cow, io};

pub use span::{FilePosition, Span};

/// An error sent to the [`ErrorManager`]
///
/// # Rationale for `Error: Any`
/// [`ErrorManager`] stores errors on a `Box<dyn Error>`. This is
/// convenient, beacause we can pass arround the same `ErrorManager` to
/// multiple stages (lexing, parsing, type checking), each one defining
/// custom error types.
///
/// If Error extends Any we can upcast the `&dyn Error`, to `&dyn Any`,
/// and use `downcast_ref` to get the concrete error type back. This is
/// what the tests do to check the exact error kinds that were reported.
///
/// ## Example
/// ```
/// use error_manager::{Error, ErrorManager, Span};
/// use core::fmt;
///
/// struct MyError(Span);
///
/// impl Error for MyError {
///     fn get_span(&self) -> Span { self.0 }
///     fn write_msg(&self, out: &mut dyn fmt::Write) -> fmt::Result {
///         write!(out, "something went wrong")
///     }
/// }
///
/// let mut em = ErrorManager::new();
/// em.emit_error(MyError(Span { offset: 12, len: 6, line: 3 }));
///
/// let err = em.errors_iterator_cast::<MyError>().next().unwrap();
/// assert_eq!(err.0.line, 3);
/// assert_eq!(em.diagnostics()[0].to_string(), "error: something went wrong at line 3");
/// ```
pub trait Error: Any {
    fn get_span(&self) -> Span;
    fn write_msg(&self, out: &mut dyn fmt::Write) -> fmt::Result;
}

pub struct StringError {
    pub msg: Cow<'static, str>,
    pub span: Span,
}

impl Error for StringError {
    fn write_msg(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "{}", self.msg)
    }

    fn get_span(&self) -> Span { self.span }
}

/// Severity of a [`Diagnostic`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A reported [`Error`], together with it's [`Severity`]
pub struct Diagnostic {
    severity: Severity,
    inner: Box<dyn Error>,
}

impl Diagnostic {
    pub fn severity(&self) -> Severity { self.severity }

    pub fn is_error(&self) -> bool { self.severity == Severity::Error }

    pub fn span(&self) -> Span { self.inner.get_span() }

    /// Line where the diagnostic was reported
    pub fn line(&self) -> u32 { self.inner.get_span().line }

    /// Renders the message of this diagnostic, without severity nor line
    pub fn message(&self) -> String {
        let mut msg = String::new();
        /* Writing into a String can't fail */
        let _ = self.inner.write_msg(&mut msg);
        msg
    }

    /// Attempts to get the concrete error type of this diagnostic
    pub fn downcast_ref<E: Error>(&self) -> Option<&E> {
        let err: &dyn Any = &*self.inner;
        err.downcast_ref::<E>()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.severity)?;
        self.inner.write_msg(f)?;
        write!(f, " at line {}", self.line())
    }
}

impl fmt::Debug for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

/// Registers [errors](Error) and warnings, in the order they are emitted.
///
/// The manager can be blocked. While blocked, every emitted diagnostic is
/// silently discarded.
#[derive(Default)]
pub struct ErrorManager {
    diagnostics: Vec<Diagnostic>,
    n_errors: usize,
    blocked: bool,
}

impl ErrorManager {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
            n_errors: 0,
            blocked: false,
        }
    }

    fn emit(&mut self, severity: Severity, err: Box<dyn Error>) {
        if self.blocked {
            return;
        }
        if severity == Severity::Error {
            self.n_errors += 1;
        }
        self.diagnostics.push(Diagnostic { severity, inner: err });
    }

    pub fn emit_error(&mut self, err: impl Error + 'static) { self.emit(Severity::Error, Box::new(err)); }

    pub fn emit_warning(&mut self, err: impl Error + 'static) { self.emit(Severity::Warning, Box::new(err)); }

    /// Blocks or unblocks the manager. Returns the previous state.
    pub fn set_blocked(&mut self, blocked: bool) -> bool {
        core::mem::replace(&mut self.blocked, blocked)
    }

    pub fn is_blocked(&self) -> bool { self.blocked }

    pub fn n_errors(&self) -> usize { self.n_errors }

    pub fn n_warnings(&self) -> usize { self.diagnostics.len() - self.n_errors }

    pub fn has_errors(&self) -> bool { self.n_errors > 0 }

    pub fn is_empty(&self) -> bool { self.diagnostics.is_empty() }

    /// All the diagnostics, in the order they were emitted
    pub fn diagnostics(&self) -> &[Diagnostic] { &self.diagnostics }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.is_error())
    }

    /// Gets an iterator over the errors inside `self`, casting them to the
    /// concrete error type specified
    ///
    /// This should only be used on tests
    ///
    /// # Panics
    /// If if fails to downcast an error into `E`
    pub fn errors_iterator_cast<E: Error>(&self) -> impl Iterator<Item = &E> {
        self.errors().map(|err| {
            err.downcast_ref::<E>().unwrap()
        })
    }

    pub fn clear(&mut self) {
        self.diagnostics.clear();
        self.n_errors = 0;
    }

    pub fn clear_warnings(&mut self) { self.diagnostics.retain(Diagnostic::is_error); }

    /// Prints every diagnostic, with the exact position inside `src`
    pub fn print_diagnostics(&self, src: &str, out: &mut dyn io::Write) -> io::Result<()> {
        for diag in &self.diagnostics {
            let FilePosition {
                start_line,
                start_col,
                ..
            } = diag.span().file_position(src);
            writeln!(out, "[{start_line}:{start_col}]: {}: {}", diag.severity, diag.message())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn error(msg: &'static str, line: u32) -> StringError {
        StringError {
            msg: msg.into(),
            span: Span { offset: 0, len: 1, line },
        }
    }

    #[test]
    fn keeps_arrival_order() {
        let mut em = ErrorManager::new();
        em.emit_error(error("first", 1));
        em.emit_warning(error("second", 2));
        em.emit_error(error("third", 3));

        let lines: Vec<_> = em.diagnostics().iter().map(Diagnostic::line).collect();
        assert_eq!(lines, [1, 2, 3]);
        assert_eq!(em.n_errors(), 2);
        assert_eq!(em.n_warnings(), 1);
        assert_eq!(em.diagnostics()[1].to_string(), "warning: second at line 2");
    }

    #[test]
    fn blocked_manager_drops_diagnostics() {
        let mut em = ErrorManager::new();
        assert!(!em.set_blocked(true));
        em.emit_error(error("lost", 1));
        assert!(em.set_blocked(false));
        em.emit_error(error("kept", 2));

        assert_eq!(em.n_errors(), 1);
        assert_eq!(em.diagnostics()[0].message(), "kept");
    }

    #[test]
    fn clear() {
        let mut em = ErrorManager::new();
        em.emit_warning(error("w", 1));
        em.emit_error(error("e", 1));
        em.clear_warnings();
        assert_eq!(em.diagnostics().len(), 1);
        em.clear();
        assert!(em.is_empty());
        assert!(!em.has_errors());
    }

    #[test]
    fn print() {
        let mut em = ErrorManager::new();
        em.emit_error(StringError {
            msg: "bad".into(),
            span: Span { offset: 4, len: 1, line: 2 },
        });
        let mut out = Vec::new();
        em.print_diagnostics("ab\ncdef", &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[2:2]: error: bad\n");
    }
}
