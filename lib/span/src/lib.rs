//! Utilities to represent spans inside a shader source

use std::{fmt, fmt::Debug, ops::Deref};

/// Represents a span in the source text, bounded by an offset and a len.
///
/// A span also remembers the (1-based) line where it starts. Diagnostics
/// are reported by line, so keeping it here avoids rescanning the source
/// every time a node wants to know where it came from.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    /// Byte offset of the span
    pub offset: usize,
    /// Length of the span, in bytes
    pub len: usize,
    /// Line where the span starts
    pub line: u32,
}

impl Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Span { offset, len, line } = self;
        write!(f, "Span {{ {offset}, {len}, line {line} }}")
    }
}

/// Represents a [`Span`] in a file, bounded by
/// it's start line and col, plus it's end line and col
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilePosition {
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

impl fmt::Display for FilePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let FilePosition {
            start_line,
            start_col,
            ..
        } = self;
        write!(f, "[{start_line}:{start_col}]")
    }
}

impl Span {
    pub const fn dummy() -> Span { Span { offset: 0, len: 0, line: 0 } }

    /// Joins two spans together.
    /// Returns the smallest Span that covers both. The line is the one
    /// of the leftmost span.
    #[must_use]
    pub const fn join(&self, other: &Span) -> Span {
        let (left, right) = if self.offset <= other.offset {
            (self, other)
        } else {
            (other, self)
        };
        let end = if right.end_offset() > left.end_offset() {
            right.end_offset()
        } else {
            left.end_offset()
        };
        Span {
            offset: left.offset,
            len: end - left.offset,
            line: left.line,
        }
    }

    /// Slices the given string with this span
    ///
    /// # Example
    /// ```
    /// use span::Span;
    ///
    /// let src = "vec3 position;";
    /// let span = Span {
    ///     offset: 5,
    ///     len: 8,
    ///     line: 1,
    /// };
    /// assert_eq!(span.slice(src), "position");
    /// ```
    #[must_use]
    #[inline]
    pub fn slice<'a>(&self, src: &'a str) -> &'a str {
        &src[self.offset..self.end_offset()]
    }

    /// Gets the [file position](FilePosition) of this span in the given string slice
    #[must_use]
    pub fn file_position(&self, src: &str) -> FilePosition {
        let mut fpos = FilePosition {
            start_line: 1,
            start_col: 1,
            end_line: 0,
            end_col: 0,
        };

        let start = self.offset.min(src.len());

        for c in src[..start].chars() {
            if c == '\n' {
                fpos.start_col = 0;
                fpos.start_line += 1;
            }
            fpos.start_col += 1;
        }

        fpos.end_line = fpos.start_line;
        fpos.end_col = fpos.start_col;

        let end = self.end_offset().min(src.len());
        for c in src[start..end].chars() {
            if c == '\n' {
                fpos.end_col = 0;
                fpos.end_line += 1;
            }
            fpos.end_col += 1;
        }

        fpos
    }

    /// Returns the end offset of the span. This is, the
    /// offset of the span plus it's length
    #[must_use]
    #[inline]
    pub const fn end_offset(&self) -> usize { self.offset + self.len }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}]", self.offset, self.offset + self.len)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Spanned<T> {
    pub val: T,
    pub span: Span,
}

impl<T> Deref for Spanned<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target { &self.val }
}

impl<T: PartialEq> PartialEq for Spanned<T> {
    fn eq(&self, other: &Self) -> bool { self.val == other.val }
}

#[cfg(test)]
mod test {
    use super::{FilePosition, Span};

    #[test]
    fn join_keeps_leftmost_line() {
        let a = Span { offset: 10, len: 2, line: 2 };
        let b = Span { offset: 3, len: 4, line: 1 };
        let joined = a.join(&b);
        assert_eq!(joined, Span { offset: 3, len: 9, line: 1 });
        assert_eq!(joined, b.join(&a));
    }

    #[test]
    fn join_nested() {
        let outer = Span { offset: 0, len: 20, line: 1 };
        let inner = Span { offset: 5, len: 2, line: 1 };
        assert_eq!(outer.join(&inner), outer);
    }

    #[test]
    fn file_position() {
        let src = "float a;\nvec2 b;\n";
        let span = Span { offset: 14, len: 1, line: 2 };
        let FilePosition { start_line, start_col, .. } = span.file_position(src);
        assert_eq!((start_line, start_col), (2, 6));
        assert_eq!(span.slice(src), "b");
    }
}
