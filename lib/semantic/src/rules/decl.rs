use interner::Name;
use span::Span;

use super::SemanticRule;
use crate::errors::{SemanticError, SemanticErrorKind, SemanticWarning, SemanticWarningKind};
use crate::{Session, Symbol};

/// Checks that `name` is not declared yet in `scope`. Enclosing scopes
/// are not searched, so shadowing is allowed.
pub struct CheckRedefinition<'ctx> {
    pub scope: &'ctx Symbol<'ctx>,
    pub name: Name,
    pub span: Span,
}

impl<'ctx> SemanticRule<'ctx> for CheckRedefinition<'ctx> {
    type Result = bool;

    fn apply(&self, sess: &Session<'ctx>) -> Self::Result {
        if self.scope.find(self.name).is_none() {
            return true;
        }
        sess.emit_error(SemanticError {
            kind: SemanticErrorKind::Redefinition(sess.name_to_string(self.name)),
            span: self.span,
        });
        false
    }
}

/// Adds a function, with it's arguments already in place, to `scope`.
///
/// A prototype never replaces a definition. Defining the same
/// function twice is a redefinition, and a declaration whose return type
/// differs from an earlier one with the same parameters gets a warning.
pub struct DeclareFunction<'ctx> {
    pub scope: &'ctx Symbol<'ctx>,
    pub function: &'ctx Symbol<'ctx>,
    pub span: Span,
}

impl<'ctx> SemanticRule<'ctx> for DeclareFunction<'ctx> {
    type Result = ();

    fn apply(&self, sess: &Session<'ctx>) -> Self::Result {
        let function = self.function;
        let name = || sess.symbol_name(function);

        if let Some(existing) = self.scope.find_same_signature(function) {
            let conflicting = match (existing.return_type(), function.return_type()) {
                (Some(a), Some(b)) => !a.is_undefined() && !b.is_undefined() && !a.is_equal_to(b),
                _ => false,
            };
            if conflicting {
                sess.emit_warning(SemanticWarning {
                    kind: SemanticWarningKind::ConflictingReturnType(name()),
                    span: self.span,
                });
            }

            if existing.is_defined() {
                if function.is_defined() {
                    sess.emit_error(SemanticError {
                        kind: SemanticErrorKind::Redefinition(name()),
                        span: self.span,
                    });
                } else {
                    return;
                }
            }
        } else if let Some(other) = function.name().and_then(|n| self.scope.find(n))
            && !other.is_function()
            && !other.is_overload_set()
        {
            sess.emit_error(SemanticError {
                kind: SemanticErrorKind::Redefinition(name()),
                span: self.span,
            });
            return;
        }

        self.scope.add(sess, function);
    }
}

#[cfg(test)]
mod test {
    use arena::DroplessArena;

    use super::{CheckRedefinition, DeclareFunction};
    use crate::rules::SemanticRule;
    use crate::{Qualifiers, Session};

    #[test]
    fn redefinition() {
        let arena = DroplessArena::default();
        let sess = Session::new(&arena);
        let global = sess.new_namespace();
        let x = sess.intern("x");

        let check = CheckRedefinition { scope: global, name: x, span: span::Span::dummy() };
        assert!(check.apply(&sess));
        global.add(&sess, sess.new_variable(global, Some(x), sess.int_type(), Qualifiers::NONE, 1));
        assert!(!check.apply(&sess));

        let block = sess.new_block(global, 2);
        let shadow = CheckRedefinition { scope: block, name: x, span: span::Span::dummy() };
        assert!(shadow.apply(&sess));
        assert_eq!(sess.n_errors(), 1);
    }

    #[test]
    fn prototype_after_definition() {
        let arena = DroplessArena::default();
        let sess = Session::new(&arena);
        let global = sess.new_namespace();
        let f = sess.intern("f");

        let def = sess.new_function(global, Some(f), 1);
        def.set_return_type(sess.void_type());
        def.set_defined(true);
        DeclareFunction { scope: global, function: def, span: span::Span::dummy() }.apply(&sess);

        let proto = sess.new_function(global, Some(f), 2);
        proto.set_return_type(sess.float_type());
        DeclareFunction { scope: global, function: proto, span: span::Span::dummy() }.apply(&sess);

        let found = global.find(f).unwrap();
        assert!(core::ptr::eq(found, def));
        assert_eq!(sess.n_errors(), 0);
        assert_eq!(sess.diagnostics().n_warnings(), 1);
    }
}
