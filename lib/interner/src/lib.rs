//! String interner
//!
//! Interning strings gives us two benefits.
//!
//! 1) Less memory usage. Every identifier and number lexeme is stored
//!    once, no matter how many times it appears in the source.
//!
//! 2) Faster comparison.
//!    Instead of comparing string slices, we compare [Name]s, which are
//!    represented as an integer.
//!
//! Unlike a global interner, an [Interner] is scoped to one compilation.
//! [Name]s coming from different interners must not be mixed.
//!
//! # Example
//! ```
//! use interner::Interner;
//!
//! let interner = Interner::new();
//! let first = interner.intern("gl_Position");
//! let same = interner.intern("gl_Position");
//! assert_eq!(first, same);
//!
//! interner.resolve(first, |s| assert_eq!(s, "gl_Position"));
//! ```

use core::cell::RefCell;
use core::fmt::{self, Debug};

use string_interner::{DefaultStringInterner, DefaultSymbol, Symbol as _};

/// Identifies an interned string.
#[derive(Clone, Copy, Hash, Eq, PartialEq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Name(DefaultSymbol);

impl Name {
    /// Index of this name inside it's interner
    #[inline]
    pub fn index(self) -> usize { self.0.to_usize() }
}

impl Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.index())
    }
}

/// Deduplicates strings, handing out a [Name] for each one.
///
/// The interner uses interior mutability, so it can be shared by the
/// lexer, the parser and the type checker at the same time.
#[derive(Default)]
pub struct Interner(RefCell<DefaultStringInterner>);

impl Interner {
    pub fn new() -> Self { Self::default() }

    /// Gets the name for the given string, interning it if it's
    /// the first time we see it
    #[inline]
    pub fn intern(&self, src: &str) -> Name {
        Name(self.0.borrow_mut().get_or_intern(src))
    }

    /// Gets the name for the given string, only if it was
    /// already interned
    #[inline]
    pub fn get(&self, src: &str) -> Option<Name> {
        self.0.borrow().get(src).map(Name)
    }

    /// Resolves the given name, and applies the closure to it
    ///
    /// The closure must not intern new strings.
    ///
    /// # Panics
    /// If `name` wasn't produced by this interner
    pub fn resolve<R>(&self, name: Name, f: impl FnOnce(&str) -> R) -> R {
        let interner = self.0.borrow();
        let s = interner.resolve(name.0).unwrap_or_else(|| {
            /* A name from another interner is a bug on the caller */
            cold();
            panic!("Attempt to resolve a foreign name: {name:?}")
        });
        f(s)
    }

    /// Same as [`resolve`](Self::resolve), but doesn't panic on
    /// unknown names
    pub fn try_resolve<R>(&self, name: Name, f: impl FnOnce(Option<&str>) -> R) -> R {
        f(self.0.borrow().resolve(name.0))
    }

    /// Copies the string behind `name`
    pub fn to_owned_string(&self, name: Name) -> String {
        self.resolve(name, str::to_string)
    }

    /// Returns true if `name` resolves to `s`
    pub fn is(&self, name: Name, s: &str) -> bool {
        self.try_resolve(name, |n| n == Some(s))
    }

    pub fn len(&self) -> usize { self.0.borrow().len() }

    pub fn is_empty(&self) -> bool { self.0.borrow().is_empty() }
}

impl Debug for Interner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interner").field("len", &self.len()).finish()
    }
}

#[inline]
#[cold]
fn cold() {}

#[cfg(test)]
mod test;
