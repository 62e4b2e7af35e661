use core::str::CharIndices;

use span::Span;

/// Walks over the characters of a source text, keeping track of the
/// start of the current token and the line we're at.
pub struct Cursor<'lex> {
    chars: CharIndices<'lex>,
    start_chars: CharIndices<'lex>,

    line: u32,
    start_line: u32,
}

impl<'lex> Cursor<'lex> {
    pub fn new(text: &'lex str) -> Self {
        Self {
            chars: text.char_indices(),
            start_chars: text.char_indices(),
            line: 1,
            start_line: 1,
        }
    }

    /// Marks the current position as the start of a new token
    pub fn step(&mut self) {
        self.start_chars = self.chars.clone();
        self.start_line = self.line;
    }

    pub fn is_finished(&self) -> bool { self.chars.as_str().is_empty() }

    pub fn current_len(&self) -> usize { self.chars.offset() - self.start_chars.offset() }

    pub fn current_lexem(&self) -> &'lex str {
        let n = self.current_len();
        &self.start_chars.as_str()[..n]
    }

    pub fn current_span(&self) -> Span {
        Span {
            offset: self.start_chars.offset(),
            len: self.current_len(),
            line: self.start_line,
        }
    }

    pub fn line(&self) -> u32 { self.line }

    /// Consumes the next character, or returns '\0' if the cursor is
    /// finished
    pub fn advance(&mut self) -> char {
        let c = self.chars.next().map_or('\0', |(_, c)| c);
        if c == '\n' {
            self.line += 1;
        }
        c
    }

    pub fn advance_while<F>(&mut self, f: F)
    where
        F: Fn(&char) -> bool,
    {
        while !self.is_finished() && f(&self.peek()) {
            self.advance();
        }
    }

    pub fn peek(&self) -> char { self.chars.clone().next().map_or('\0', |(_, c)| c) }

    pub fn peek_next(&self) -> char {
        let mut iter = self.chars.clone();
        iter.next();
        iter.next().map_or('\0', |(_, c)| c)
    }

    pub fn match_next(&mut self, c: char) -> bool {
        if !self.is_finished() && self.peek() == c {
            self.advance();
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::Cursor;

    #[test]
    fn test() {
        let text = "Hello world!";
        let mut cursor = Cursor::new(text);
        for c in text.chars() {
            assert!(!cursor.is_finished());
            let next = cursor.advance();
            assert_eq!(next, c);
        }
        assert!(cursor.is_finished());
    }

    #[test]
    fn lines() {
        let mut cursor = Cursor::new("a\nbc\n\nd");
        cursor.advance_while(|c| *c != 'd');
        assert_eq!(cursor.line(), 4);

        cursor.step();
        cursor.advance();
        let span = cursor.current_span();
        assert_eq!(span.line, 4);
        assert_eq!(span.offset, 6);
        assert_eq!(cursor.current_lexem(), "d");
    }
}
