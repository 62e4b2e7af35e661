use core::cell::Cell;

use ast::Declaration;
use ast::declaration::{
    DeclarationKind, FunctionDecl, InitDecl, InvariantDecl, ParameterDecl, PrecisionDecl, TypeAndVariableDecl,
    TypeDecl, VariableDecl,
};
use ast::types::{Precision, QualifiedSpec, StructSpec, TypeSpecKind};
use lexer::TokenKind;
use semantic::Qualifiers;
use span::Span;

use super::{Parser, Result};

type Decl<'ctx> = &'ctx Declaration<'ctx>;

impl<'ctx> Parser<'_, '_, 'ctx> {
    /// A declaration at the top level. Stray semicolons are skipped.
    pub(super) fn external_declaration(&mut self) -> Result<Option<Decl<'ctx>>> {
        if self.match_type(TokenKind::Semicolon) {
            return Ok(None);
        }
        self.declaration(true).map(Some)
    }

    /// Returns true if the current token starts a declaration
    pub(super) fn is_declaration_start(&self) -> bool {
        let kind = self.peek().kind;
        match kind {
            TokenKind::Struct | TokenKind::Precision => true,
            TokenKind::TypeName => !self.is_constructor_call(),
            _ if kind.is_precision() || self.is_type_qualifier() => true,
            _ if kind.is_builtin_type() => !self.is_constructor_call(),
            _ => false,
        }
    }

    /// Parses a declaration. Function bodies are only allowed if
    /// `allow_body` is true.
    pub(super) fn declaration(&mut self, allow_body: bool) -> Result<Decl<'ctx>> {
        let start = self.peek().span;

        if self.match_type(TokenKind::Precision) {
            return self.precision_declaration(start);
        }
        if self.check(TokenKind::Invariant) && self.nth(1).kind == TokenKind::Identifier {
            self.bump();
            return self.invariant_declaration(start);
        }

        self.disambiguate();
        let (qualifiers, layout) = self.type_qualifiers()?;
        if !qualifiers.is_empty() {
            if self.check(TokenKind::Semicolon) {
                self.bump();
                let ty = self.type_spec(
                    TypeSpecKind::Qualified(QualifiedSpec {
                        qualifiers,
                        layout,
                        ty: None,
                    }),
                    None,
                    start.join(&self.previous_span()),
                );
                return Ok(self.decl(DeclarationKind::Type(TypeDecl { ty }), ty.span));
            }
            if self.check(TokenKind::Identifier) && self.nth(1).kind == TokenKind::LeftBrace {
                return self.interface_block(qualifiers, layout, start);
            }
        }

        self.disambiguate();
        let ty = self.type_specifier()?;
        let ty = self.qualified(qualifiers, layout, ty, start);

        if self.match_type(TokenKind::Semicolon) {
            let span = start.join(&self.previous_span());
            return Ok(self.decl(DeclarationKind::Type(TypeDecl { ty }), span));
        }

        if self.check(TokenKind::Identifier) && self.nth(1).kind == TokenKind::LeftParen {
            return self.function_declaration(ty, start, allow_body);
        }

        self.init_declarator_list(ty, start)
    }

    fn precision_declaration(&mut self, start: Span) -> Result<Decl<'ctx>> {
        let Ok(precision) = Precision::try_from(self.peek().kind) else {
            return self.unexpected();
        };
        self.bump();
        let ty = self.type_specifier()?;
        self.consume(TokenKind::Semicolon)?;
        let span = start.join(&self.previous_span());
        Ok(self.decl(DeclarationKind::Precision(PrecisionDecl { precision, ty }), span))
    }

    /// `invariant a, b;` after the keyword
    fn invariant_declaration(&mut self, start: Span) -> Result<Decl<'ctx>> {
        let mut decls = Vec::new();
        loop {
            let (name, span) = self.consume_name(TokenKind::Identifier)?;
            decls.push(self.decl(DeclarationKind::Invariant(InvariantDecl { name }), span));
            if !self.match_type(TokenKind::Comma) {
                break;
            }
        }
        self.consume(TokenKind::Semicolon)?;
        let span = start.join(&self.previous_span());

        if decls.len() == 1 {
            return Ok(decls[0]);
        }
        Ok(self.decl(
            DeclarationKind::Init(InitDecl {
                decls: self.list(decls),
            }),
            span,
        ))
    }

    /// `uniform Block { members } instance[size]? ;`
    fn interface_block(
        &mut self,
        qualifiers: Qualifiers,
        layout: &'ctx [ast::types::LayoutQualifier],
        start: Span,
    ) -> Result<Decl<'ctx>> {
        let (name, name_span) = self.consume_name(TokenKind::Identifier)?;
        let fields = self.struct_members()?;
        let block = self.type_spec(
            TypeSpecKind::Struct(StructSpec {
                name: Some(name),
                fields,
                symbol: Cell::new(None),
            }),
            None,
            name_span.join(&self.previous_span()),
        );
        let ty = self.qualified(qualifiers, layout, block, start);

        let instance = if self.check(TokenKind::Identifier) {
            let (name, span) = self.consume_name(TokenKind::Identifier)?;
            let ty = self.declarator_type(ty)?;
            Some(self.variable(ty, name, None, span.join(&self.previous_span())))
        } else {
            None
        };
        self.consume(TokenKind::Semicolon)?;
        let span = start.join(&self.previous_span());

        let type_decl = self.decl(DeclarationKind::Type(TypeDecl { ty }), span);
        Ok(match instance {
            Some(var_decl) => self.decl(
                DeclarationKind::TypeAndVariable(TypeAndVariableDecl { type_decl, var_decl }),
                span,
            ),
            None => type_decl,
        })
    }

    fn variable(
        &self,
        ty: &'ctx ast::TypeSpec<'ctx>,
        name: interner::Name,
        init: Option<ast::Expr<'ctx>>,
        span: Span,
    ) -> Decl<'ctx> {
        self.decl(
            DeclarationKind::Variable(VariableDecl {
                ty,
                name,
                init,
                symbol: Cell::new(None),
            }),
            span,
        )
    }

    /// `type a = init, b[2], c;`
    fn init_declarator_list(&mut self, ty: &'ctx ast::TypeSpec<'ctx>, start: Span) -> Result<Decl<'ctx>> {
        let mut decls = Vec::new();
        loop {
            let (name, name_span) = self.consume_name(TokenKind::Identifier)?;
            let var_ty = self.declarator_type(ty)?;
            let init = if self.match_type(TokenKind::Equal) {
                Some(self.assignment()?)
            } else {
                None
            };
            decls.push(self.variable(var_ty, name, init, name_span.join(&self.previous_span())));
            if !self.match_type(TokenKind::Comma) {
                break;
            }
        }
        self.consume(TokenKind::Semicolon)?;
        let span = start.join(&self.previous_span());

        let var_decl = if decls.len() == 1 {
            decls[0]
        } else {
            self.decl(
                DeclarationKind::Init(InitDecl {
                    decls: self.list(decls),
                }),
                span,
            )
        };

        /* struct S { ... } s; */
        if ty.as_struct().is_some() {
            let type_decl = self.decl(DeclarationKind::Type(TypeDecl { ty }), ty.span);
            return Ok(self.decl(
                DeclarationKind::TypeAndVariable(TypeAndVariableDecl { type_decl, var_decl }),
                span,
            ));
        }
        Ok(var_decl)
    }

    fn function_declaration(
        &mut self,
        return_type: &'ctx ast::TypeSpec<'ctx>,
        start: Span,
        allow_body: bool,
    ) -> Result<Decl<'ctx>> {
        let (name, _) = self.consume_name(TokenKind::Identifier)?;
        self.consume(TokenKind::LeftParen)?;

        let mut params = Vec::new();
        if self.check(TokenKind::Void) && self.nth(1).kind == TokenKind::RightParen {
            self.bump();
        } else if !self.check(TokenKind::RightParen) {
            loop {
                params.push(self.parameter()?);
                if !self.match_type(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.consume(TokenKind::RightParen)?;

        let body = if allow_body && self.check(TokenKind::LeftBrace) {
            Some(self.compound_statement()?)
        } else {
            self.consume(TokenKind::Semicolon)?;
            None
        };

        let span = start.join(&self.previous_span());
        Ok(self.decl(
            DeclarationKind::Function(FunctionDecl {
                return_type,
                name,
                params: self.list(params),
                body,
                symbol: Cell::new(None),
            }),
            span,
        ))
    }

    /// `qualifiers? type (name array_suffix?)?`
    fn parameter(&mut self) -> Result<Decl<'ctx>> {
        let start = self.peek().span;
        let (qualifiers, _) = self.type_qualifiers()?;
        self.disambiguate();
        let mut ty = self.type_specifier()?;
        let name = if self.check(TokenKind::Identifier) {
            let (name, _) = self.consume_name(TokenKind::Identifier)?;
            ty = self.array_suffixes(ty)?;
            Some(name)
        } else {
            None
        };
        let span = start.join(&self.previous_span());
        Ok(self.decl(
            DeclarationKind::Parameter(ParameterDecl {
                ty,
                name,
                qualifiers,
                symbol: Cell::new(None),
            }),
            span,
        ))
    }
}
