use core::cell::Cell;

use ast::TypeSpec;
use ast::types::{
    ArraySpec, LayoutQualifier, Precision, QualifiedSpec, StructField, StructSpec, TypeSpecKind,
};
use lexer::TokenKind;
use semantic::Qualifiers;

use super::{Parser, Result};

impl<'ctx> Parser<'_, '_, 'ctx> {
    pub(super) fn is_type_qualifier(&self) -> bool {
        Qualifiers::from_token(self.peek().kind).is_some()
    }

    /// Parses a possibly empty list of qualifiers, `layout(...)` included
    pub(super) fn type_qualifiers(&mut self) -> Result<(Qualifiers, &'ctx [LayoutQualifier])> {
        let mut qualifiers = Qualifiers::NONE;
        let mut layout = Vec::new();
        while let Some(q) = Qualifiers::from_token(self.peek().kind) {
            self.bump();
            if q == Qualifiers::LAYOUT {
                self.layout_qualifier(&mut layout)?;
            }
            qualifiers |= q;
        }
        Ok((qualifiers, self.list(layout)))
    }

    fn layout_qualifier(&mut self, layout: &mut Vec<LayoutQualifier>) -> Result<()> {
        self.consume(TokenKind::LeftParen)?;
        loop {
            let tok = *self.peek();
            let name = match tok.kind {
                TokenKind::Identifier => self.consume_name(TokenKind::Identifier)?.0,
                TokenKind::Shared => {
                    self.bump();
                    self.sess.intern("shared")
                }
                _ => return self.unexpected(),
            };
            let value = if self.match_type(TokenKind::Equal) {
                let val = *self.peek();
                match (val.kind, val.name()) {
                    (TokenKind::Number | TokenKind::Identifier, Some(name)) => {
                        self.bump();
                        Some(name)
                    }
                    _ => return self.unexpected(),
                }
            } else {
                None
            };
            layout.push(LayoutQualifier {
                name,
                value,
                span: tok.span.join(&self.previous_span()),
            });
            if !self.match_type(TokenKind::Comma) {
                break;
            }
        }
        self.consume(TokenKind::RightParen)?;
        Ok(())
    }

    /// Wraps `ty` with the given qualifiers, if there's any
    pub(super) fn qualified(
        &self,
        qualifiers: Qualifiers,
        layout: &'ctx [LayoutQualifier],
        ty: &'ctx TypeSpec<'ctx>,
        start: span::Span,
    ) -> &'ctx TypeSpec<'ctx> {
        if qualifiers.is_empty() {
            return ty;
        }
        let span = start.join(&ty.span);
        self.type_spec(
            TypeSpecKind::Qualified(QualifiedSpec {
                qualifiers,
                layout,
                ty: Some(ty),
            }),
            None,
            span,
        )
    }

    /// `qualifiers? type_specifier`
    pub(super) fn fully_specified_type(&mut self) -> Result<&'ctx TypeSpec<'ctx>> {
        let start = self.peek().span;
        let (qualifiers, layout) = self.type_qualifiers()?;
        self.disambiguate();
        let ty = self.type_specifier()?;
        Ok(self.qualified(qualifiers, layout, ty, start))
    }

    /// `precision? (builtin | name | struct) array_suffix*`
    pub(super) fn type_specifier(&mut self) -> Result<&'ctx TypeSpec<'ctx>> {
        let start = self.peek().span;
        let precision = Precision::try_from(self.peek().kind).ok();
        if precision.is_some() {
            self.bump();
        }

        let kind = self.peek().kind;
        let spec = match kind {
            TokenKind::Struct => {
                self.bump();
                TypeSpecKind::Struct(self.struct_specifier()?)
            }
            TokenKind::Identifier | TokenKind::TypeName => {
                TypeSpecKind::Named(self.consume_name(kind)?.0)
            }
            _ if kind.is_builtin_type() => {
                self.bump();
                TypeSpecKind::Basic(kind)
            }
            _ => return self.unexpected(),
        };

        let ty = self.type_spec(spec, precision, start.join(&self.previous_span()));
        self.array_suffixes(ty)
    }

    /// `[size?]`, any number of times
    pub(super) fn array_suffixes(&mut self, mut element: &'ctx TypeSpec<'ctx>) -> Result<&'ctx TypeSpec<'ctx>> {
        while self.match_type(TokenKind::LeftBracket) {
            let size = if self.check(TokenKind::RightBracket) {
                None
            } else {
                Some(self.conditional()?)
            };
            self.consume(TokenKind::RightBracket)?;
            let span = element.span.join(&self.previous_span());
            element = self.type_spec(TypeSpecKind::Array(ArraySpec { element, size }), None, span);
        }
        Ok(element)
    }

    /// The type of a declarator: `float a[2]` declares an array of floats.
    /// The array goes inside the qualifiers.
    pub(super) fn declarator_type(&mut self, base: &'ctx TypeSpec<'ctx>) -> Result<&'ctx TypeSpec<'ctx>> {
        if !self.check(TokenKind::LeftBracket) {
            return Ok(base);
        }
        match &base.kind {
            TypeSpecKind::Qualified(QualifiedSpec {
                qualifiers,
                layout,
                ty: Some(inner),
            }) => {
                let array = self.array_suffixes(*inner)?;
                Ok(self.qualified(*qualifiers, *layout, array, base.span))
            }
            _ => self.array_suffixes(base),
        }
    }

    /// After the `struct` keyword
    fn struct_specifier(&mut self) -> Result<StructSpec<'ctx>> {
        let name = match self.peek().kind {
            kind @ (TokenKind::Identifier | TokenKind::TypeName) => Some(self.consume_name(kind)?.0),
            _ => None,
        };
        let fields = self.struct_members()?;
        Ok(StructSpec {
            name,
            fields,
            symbol: Cell::new(None),
        })
    }

    /// `{ (type declarator (, declarator)* ;)+ }`
    pub(super) fn struct_members(&mut self) -> Result<&'ctx [&'ctx StructField<'ctx>]> {
        self.consume(TokenKind::LeftBrace)?;
        let mut fields = Vec::new();
        loop {
            /* Inside a struct, a leading identifier can only be a type */
            if !self.is_type_qualifier() {
                self.reclassify_type_name();
            }
            let ty = self.fully_specified_type()?;
            loop {
                let (name, span) = self.consume_name(TokenKind::Identifier)?;
                let ty = self.declarator_type(ty)?;
                fields.push(self.sess.alloc(StructField { name, ty, span }));
                if !self.match_type(TokenKind::Comma) {
                    break;
                }
            }
            self.consume(TokenKind::Semicolon)?;
            if self.check(TokenKind::RightBrace) || self.is_finished() {
                break;
            }
        }
        self.consume(TokenKind::RightBrace)?;
        Ok(self.list(fields))
    }
}
