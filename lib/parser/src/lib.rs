//! Parser
//!
//! A recursive descent parser, that builds the [AST](ast) on the arena
//! of a [Session].
//!
//! # Example
//! ```
//! use arena::DroplessArena;
//! use semantic::Session;
//!
//! let arena = DroplessArena::default();
//! let sess = Session::new(&arena);
//!
//! let unit = parser::parse_translation_unit("float a, b; void main() {}", &sess);
//! assert_eq!(unit.decls.len(), 2);
//! assert_eq!(sess.n_errors(), 0);
//! ```

mod decl;
pub mod error;
mod expr;
mod stmt;
mod ty;

use ast::{Declaration, Expr, Expression, Statement, TranslationUnit, TypeSpec};
use interner::Name;
use lexer::{Lexer, Token, TokenKind, TokenValue};
use log::{debug, trace};
use semantic::Session;
use span::Span;

use self::error::{ParseError, ParseErrorKind};

type Result<T> = std::result::Result<T, ParseError>;

/// How deep expressions and statements can nest. Past this, parsing
/// fails with [`ParseErrorKind::NestingTooDeep`].
pub const MAX_NESTING: usize = 128;

/// Parses a whole translation unit.
///
/// Syntax errors are reported to the session. After an error, the parser
/// skips to the end of the failed declaration, so the returned unit
/// holds every declaration that parsed cleanly.
pub fn parse_translation_unit<'ctx>(src: &str, sess: &Session<'ctx>) -> &'ctx TranslationUnit<'ctx> {
    Parser::new(src, sess).parse_translation_unit()
}

/// Parses a standalone expression. Stops at the first error.
pub fn parse_expression<'ctx>(src: &str, sess: &Session<'ctx>) -> Option<Expr<'ctx>> {
    Parser::new(src, sess).parse_expression()
}

/// Records, on every opening bracket, the index of it's closing pair.
/// Unmatched brackets are left alone.
fn match_brackets(tokens: &mut [Token]) {
    use TokenKind as T;

    let mut stack = Vec::new();
    for i in 0..tokens.len() {
        match tokens[i].kind {
            T::LeftParen | T::LeftBracket | T::LeftBrace => stack.push(i),
            close @ (T::RightParen | T::RightBracket | T::RightBrace) => {
                let Some(open) = stack.pop() else { continue };
                let pair = matches!(
                    (tokens[open].kind, close),
                    (T::LeftParen, T::RightParen)
                        | (T::LeftBracket, T::RightBracket)
                        | (T::LeftBrace, T::RightBrace)
                );
                if pair {
                    tokens[open].value = TokenValue::Matching(i);
                }
            }
            _ => {}
        }
    }
}

pub struct Parser<'src, 'sess, 'ctx> {
    tokens: Vec<Token>,
    src: &'src str,
    sess: &'sess Session<'ctx>,
    current: usize,
    depth: usize,
}

impl<'src, 'sess, 'ctx> Parser<'src, 'sess, 'ctx> {
    pub fn new(src: &'src str, sess: &'sess Session<'ctx>) -> Self {
        let mut tokens = Lexer::new(src, sess.interner())
            .with_variant(sess.variant())
            .tokenize();
        match_brackets(&mut tokens);
        Self {
            tokens,
            src,
            sess,
            current: 0,
            depth: 0,
        }
    }

    /// The token stream. Identifiers that the parser found to be type
    /// names are reclassified as [`TokenKind::TypeName`].
    pub fn tokens(&self) -> &[Token] { &self.tokens }

    pub fn parse_translation_unit(mut self) -> &'ctx TranslationUnit<'ctx> {
        let mut decls = Vec::new();
        while !self.is_finished() {
            let start = self.current;
            match self.external_declaration() {
                Ok(Some(decl)) => decls.push(decl),
                Ok(None) => {}
                Err(err) => {
                    self.sess.emit_error(err);
                    self.synchronize(start);
                }
            }
        }
        debug!("Parsed {} external declarations", decls.len());

        let span = self.tokens[0].span.join(&self.peek().span);
        self.sess.alloc(TranslationUnit {
            decls: self.list(decls),
            span,
        })
    }

    pub fn parse_expression(mut self) -> Option<Expr<'ctx>> {
        let expr = self.expression().and_then(|expr| {
            if self.is_finished() {
                Ok(expr)
            } else {
                self.unexpected()
            }
        });
        match expr {
            Ok(expr) => Some(expr),
            Err(err) => {
                self.sess.emit_error(err);
                None
            }
        }
    }

    /// Skips the rest of a failed declaration. Stops after the first `;`
    /// or `}` that closes a top level brace group, past the error.
    fn synchronize(&mut self, start: usize) {
        let error = self.current;
        let mut depth = 0_usize;
        let mut i = start;
        while self.tokens[i].kind != TokenKind::Eof {
            let kind = self.tokens[i].kind;
            i += 1;
            match kind {
                TokenKind::LeftBrace => depth += 1,
                TokenKind::RightBrace => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 && i > error {
                        break;
                    }
                }
                TokenKind::Semicolon if depth == 0 && i > error => break,
                _ => {}
            }
        }
        trace!("Recovered from line {} to line {}", self.tokens[error].line(), self.tokens[i].line());
        self.current = i;
    }

    /* ==== Type name disambiguation ==== */

    fn is_followed_by_identifier(&self, offset: usize) -> bool {
        let next = self.nth(offset);
        match next.kind {
            TokenKind::Identifier => true,
            TokenKind::LeftBracket => next
                .matching()
                .is_some_and(|close| self.tokens.get(close + 1).is_some_and(|t| t.kind == TokenKind::Identifier)),
            _ => false,
        }
    }

    /// If the current token is an identifier followed by another one (or
    /// by `[...]` and another one), it must be a type name. Reclassifies it.
    fn disambiguate(&mut self) {
        if self.check(TokenKind::Identifier) && self.is_followed_by_identifier(1) {
            self.reclassify_type_name();
        }
    }

    /// Reclassifies the current identifier as a type name. Used where
    /// only a type can appear.
    fn reclassify_type_name(&mut self) {
        if let Some(tok) = self.tokens.get_mut(self.current)
            && tok.kind == TokenKind::Identifier
        {
            tok.kind = TokenKind::TypeName;
        }
    }

    /// `type (` and `type[...] (` start a constructor call
    fn is_constructor_call(&self) -> bool {
        let next = self.nth(1);
        match next.kind {
            TokenKind::LeftParen => true,
            TokenKind::LeftBracket => next
                .matching()
                .is_some_and(|close| self.tokens.get(close + 1).is_some_and(|t| t.kind == TokenKind::LeftParen)),
            _ => false,
        }
    }

    /* ==== Allocation ==== */

    fn list<T>(&self, items: Vec<T>) -> &'ctx [T] { self.sess.alloc_iter(items) }

    fn expr(&self, kind: ast::expr::ExpressionKind<'ctx>, span: Span) -> Expr<'ctx> {
        self.sess.alloc(Expression::new(kind, span))
    }

    fn stmt(&self, kind: ast::stmt::StatementKind<'ctx>, span: Span) -> &'ctx Statement<'ctx> {
        self.sess.alloc(Statement::new(kind, span))
    }

    fn decl(&self, kind: ast::declaration::DeclarationKind<'ctx>, span: Span) -> &'ctx Declaration<'ctx> {
        self.sess.alloc(Declaration::new(kind, span))
    }

    fn type_spec(
        &self,
        kind: ast::types::TypeSpecKind<'ctx>,
        precision: Option<ast::types::Precision>,
        span: Span,
    ) -> &'ctx TypeSpec<'ctx> {
        self.sess.alloc(TypeSpec::new(kind, precision, span))
    }

    /* ==== Tokens ==== */

    /// Runs `parse` one nesting level deeper
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError {
                kind: ParseErrorKind::NestingTooDeep,
                span: self.peek().span,
            });
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn unexpected<T>(&self) -> Result<T> {
        let tok = self.peek();
        Err(ParseError {
            kind: ParseErrorKind::UnexpectedToken(tok.spelling(self.src).to_string()),
            span: tok.span,
        })
    }

    fn is_finished(&self) -> bool { self.peek().kind == TokenKind::Eof }

    fn nth(&self, offset: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.current + offset).min(last)]
    }

    fn peek(&self) -> &Token { self.nth(0) }

    fn previous_span(&self) -> Span { self.tokens[self.current.saturating_sub(1)].span }

    fn check(&self, kind: TokenKind) -> bool { self.peek().kind == kind }

    fn bump(&mut self) {
        if !self.is_finished() {
            self.current += 1;
        }
    }

    fn advance(&mut self) -> Token {
        let tok = *self.peek();
        self.bump();
        tok
    }

    fn match_type(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.bump();
            return true;
        }
        false
    }

    fn consume(&mut self, kind: TokenKind) -> Result<Token> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        self.unexpected()
    }

    /// Consumes an identifier (or type name) and returns it's name
    fn consume_name(&mut self, kind: TokenKind) -> Result<(Name, Span)> {
        let tok = *self.peek();
        match tok.name() {
            Some(name) if tok.kind == kind => {
                self.bump();
                Ok((name, tok.span))
            }
            _ => self.unexpected(),
        }
    }
}

#[cfg(test)]
mod test;
