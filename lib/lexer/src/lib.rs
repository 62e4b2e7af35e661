//! Lexer
//!
//! Turns shader source text into [Token]s, one token per call to
//! [`Lexer::next_token`]. The lexer never fails: characters it doesn't
//! understand become [`TokenKind::Error`] tokens, which the parser then
//! reports.
//!
//! # Example
//! ```
//! use interner::Interner;
//! use lexer::{Lexer, token::TokenKind};
//!
//! let interner = Interner::new();
//! let kinds: Vec<TokenKind> = Lexer::new("vec3 n = normalize(v);", &interner)
//!     .map(|t| t.kind)
//!     .collect();
//!
//! assert_eq!(kinds, [
//!     TokenKind::Vec3, TokenKind::Identifier, TokenKind::Equal,
//!     TokenKind::Identifier, TokenKind::LeftParen, TokenKind::Identifier,
//!     TokenKind::RightParen, TokenKind::Semicolon,
//! ]);
//! ```

mod cursor;
mod keywords;
pub mod token;
mod variant;

use cursor::Cursor;
use interner::Interner;
pub use keywords::classify_keyword;
pub use token::{Token, TokenKind, TokenValue};
pub use variant::Variant;

/// State that survives between chunks of source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LexerState {
    #[default]
    Normal,
    /// Inside a block comment that hasn't been closed yet
    MultilineComment,
}

pub struct Lexer<'lex, 'ctx> {
    c: Cursor<'lex>,
    interner: &'ctx Interner,
    variant: Variant,
    state: LexerState,
    scan_keywords: bool,
    scan_comments: bool,
    /// Line of the last token scanned, comments aside. A `#` only
    /// starts a directive if nothing precedes it on it's line.
    last_line: Option<u32>,
}

impl<'lex, 'ctx> Lexer<'lex, 'ctx> {
    /* PUBLIC */
    pub fn new(text: &'lex str, interner: &'ctx Interner) -> Self {
        Self {
            c: Cursor::new(text),
            interner,
            variant: Variant::ALL,
            state: LexerState::Normal,
            scan_keywords: true,
            scan_comments: false,
            last_line: None,
        }
    }

    #[must_use]
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn variant(&self) -> Variant { self.variant }

    /// When disabled, keywords that aren't enabled for the current
    /// variant are returned as [`TokenKind::Reserved`] instead of
    /// being demoted to identifiers. Useful for highlighters, that want
    /// to warn about those words.
    pub fn set_scan_keywords(&mut self, scan: bool) { self.scan_keywords = scan; }

    /// When enabled, comments are returned as [`TokenKind::Comment`]
    /// tokens instead of being skipped.
    pub fn set_scan_comments(&mut self, scan: bool) { self.scan_comments = scan; }

    pub fn state(&self) -> LexerState { self.state }

    pub fn set_state(&mut self, state: LexerState) { self.state = state; }

    /// Scans the next token.
    ///
    /// Once the source is exhausted, returns [`TokenKind::Eof`] tokens
    pub fn next_token(&mut self) -> Token {
        loop {
            if self.state == LexerState::MultilineComment {
                self.c.step();
                if self.block_comment() {
                    self.state = LexerState::Normal;
                }
                if self.c.current_len() > 0
                    && let Some(t) = self.comment_token()
                {
                    return t;
                }
                if self.state == LexerState::MultilineComment {
                    return self.eof();
                }
            }

            self.skip_blank();
            if self.c.is_finished() {
                return self.eof();
            }

            self.c.step();
            if let Some(t) = self.scan_token() {
                if t.kind != TokenKind::Comment {
                    self.last_line = Some(t.span.line);
                }
                return t;
            }
        }
    }

    /// Scans all the tokens in the source.
    ///
    /// The returned vector always ends with an [`TokenKind::Eof`] token.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let t = self.next_token();
            tokens.push(t);
            if t.kind == TokenKind::Eof {
                break;
            }
        }
        log::debug!("Scanned {} tokens", tokens.len());
        tokens
    }

    /* PRIVATE */
    fn add_token(&self, kind: TokenKind) -> Option<Token> {
        Some(Token {
            kind,
            span: self.c.current_span(),
            value: TokenValue::None,
        })
    }

    fn add_named_token(&self, kind: TokenKind) -> Option<Token> {
        let name = self.interner.intern(self.c.current_lexem());
        Some(Token {
            kind,
            span: self.c.current_span(),
            value: TokenValue::Name(name),
        })
    }

    fn eof(&mut self) -> Token {
        self.c.step();
        Token {
            kind: TokenKind::Eof,
            span: self.c.current_span(),
            value: TokenValue::None,
        }
    }

    fn skip_blank(&mut self) {
        loop {
            match self.c.peek() {
                ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c' => {
                    self.c.advance();
                }
                '#' if self.last_line != Some(self.c.line()) => self.skip_directive(),
                _ => break,
            }
        }
    }

    /// Preprocessor directives are skipped up to the end of the line.
    /// A backslash at the end of a line continues the directive.
    fn skip_directive(&mut self) {
        while !self.c.is_finished() {
            match self.c.advance() {
                '\\' => {
                    self.c.match_next('\r');
                    self.c.match_next('\n');
                }
                '\n' => break,
                _ => {}
            }
        }
    }

    fn scan_token(&mut self) -> Option<Token> {
        use TokenKind as T;

        match self.c.advance() {
            '(' => self.add_token(T::LeftParen),
            ')' => self.add_token(T::RightParen),
            '{' => self.add_token(T::LeftBrace),
            '}' => self.add_token(T::RightBrace),
            '[' => self.add_token(T::LeftBracket),
            ']' => self.add_token(T::RightBracket),
            ',' => self.add_token(T::Comma),
            ';' => self.add_token(T::Semicolon),
            ':' => self.add_token(T::Colon),
            '?' => self.add_token(T::Question),
            '~' => self.add_token(T::Tilde),
            '.' => {
                if self.c.peek().is_ascii_digit() {
                    self.number()
                } else {
                    self.add_token(T::Dot)
                }
            }
            '+' => {
                if self.c.match_next('+') {
                    self.add_token(T::PlusPlus)
                } else if self.c.match_next('=') {
                    self.add_token(T::PlusEqual)
                } else {
                    self.add_token(T::Plus)
                }
            }
            '-' => {
                if self.c.match_next('-') {
                    self.add_token(T::MinusMinus)
                } else if self.c.match_next('=') {
                    self.add_token(T::MinusEqual)
                } else {
                    self.add_token(T::Minus)
                }
            }
            '*' => self.with_equal(T::StarEqual, T::Star),
            '%' => self.with_equal(T::PercentEqual, T::Percent),
            '=' => self.with_equal(T::EqualEqual, T::Equal),
            '!' => self.with_equal(T::BangEqual, T::Bang),
            '/' => {
                if self.c.match_next('/') {
                    self.c.advance_while(|c| *c != '\n');
                    self.comment_token()
                } else if self.c.match_next('*') {
                    if !self.block_comment() {
                        log::trace!("Unterminated block comment at line {}", self.c.line());
                        self.state = LexerState::MultilineComment;
                    }
                    self.comment_token()
                } else {
                    self.with_equal(T::SlashEqual, T::Slash)
                }
            }
            '<' => {
                if self.c.match_next('<') {
                    self.with_equal(T::LessLessEqual, T::LessLess)
                } else {
                    self.with_equal(T::LessEqual, T::Less)
                }
            }
            '>' => {
                if self.c.match_next('>') {
                    self.with_equal(T::GreaterGreaterEqual, T::GreaterGreater)
                } else {
                    self.with_equal(T::GreaterEqual, T::Greater)
                }
            }
            '&' => {
                if self.c.match_next('&') {
                    self.add_token(T::AmpersandAmpersand)
                } else {
                    self.with_equal(T::AmpersandEqual, T::Ampersand)
                }
            }
            '|' => {
                if self.c.match_next('|') {
                    self.add_token(T::PipePipe)
                } else {
                    self.with_equal(T::PipeEqual, T::Pipe)
                }
            }
            '^' => {
                if self.c.match_next('^') {
                    self.add_token(T::CaretCaret)
                } else {
                    self.with_equal(T::CaretEqual, T::Caret)
                }
            }
            c if c.is_ascii_digit() => self.number(),
            c if c.is_ascii_alphabetic() || c == '_' => self.identifier(),
            _ => self.add_token(T::Error),
        }
    }

    /// Returns `with` if the next char is '=', `without` otherwise
    fn with_equal(&mut self, with: TokenKind, without: TokenKind) -> Option<Token> {
        if self.c.match_next('=') {
            self.add_token(with)
        } else {
            self.add_token(without)
        }
    }

    /// Consumes a block comment, up to and including the closing "*/".
    /// Returns false if the source ended before the comment was closed.
    fn block_comment(&mut self) -> bool {
        while !self.c.is_finished() {
            if self.c.advance() == '*' && self.c.match_next('/') {
                return true;
            }
        }
        false
    }

    fn comment_token(&self) -> Option<Token> {
        if self.scan_comments {
            self.add_token(TokenKind::Comment)
        } else {
            None
        }
    }

    fn number(&mut self) -> Option<Token> {
        loop {
            self.c.advance_while(|c| c.is_ascii_alphanumeric() || *c == '.');
            let lexem = self.c.current_lexem();
            let is_hex = lexem.starts_with("0x") || lexem.starts_with("0X");
            let exponent = !is_hex && lexem.ends_with(['e', 'E']);
            if exponent
                && matches!(self.c.peek(), '+' | '-')
                && self.c.peek_next().is_ascii_digit()
            {
                self.c.advance();
            } else {
                break;
            }
        }
        self.add_named_token(TokenKind::Number)
    }

    fn identifier(&mut self) -> Option<Token> {
        self.c.advance_while(|c| c.is_ascii_alphanumeric() || *c == '_');
        let lexem = self.c.current_lexem();

        let kind = match classify_keyword(lexem) {
            Some((kind, bits)) => self.enabled_keyword(kind, bits),
            None => TokenKind::Identifier,
        };

        match kind {
            TokenKind::Identifier | TokenKind::True | TokenKind::False => {
                self.add_named_token(kind)
            }
            _ => self.add_token(kind),
        }
    }

    /// Demotes keywords that are not available in the current variant
    fn enabled_keyword(&self, kind: TokenKind, bits: Variant) -> TokenKind {
        let bits = bits & Variant::MASK;
        if bits.is_empty() || self.variant.intersects(bits) {
            kind
        } else if self.scan_keywords {
            TokenKind::Identifier
        } else {
            TokenKind::Reserved
        }
    }
}

impl Iterator for Lexer<'_, '_> {
    type Item = Token;

    /// Returns the next token, or None once the source is exhausted
    fn next(&mut self) -> Option<Self::Item> {
        let t = self.next_token();
        (t.kind != TokenKind::Eof).then_some(t)
    }
}
