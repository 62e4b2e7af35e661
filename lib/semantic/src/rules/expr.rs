use interner::Name;
use span::Span;

use super::SemanticRule;
use super::cast::ImplicitCast;
use crate::errors::{SemanticError, SemanticErrorKind};
use crate::{Session, Symbol, Ty, TyKind};

/// Types a literal from it's spelling.
///
/// `true` and `false` are booleans. Numbers are uints with a `u` suffix,
/// doubles with `lf`, and floats with `f`, a decimal point or an
/// exponent. Anything else is an int.
pub struct TypeLiteral {
    pub value: Name,
}

impl<'ctx> SemanticRule<'ctx> for TypeLiteral {
    type Result = &'ctx Ty<'ctx>;

    fn apply(&self, sess: &Session<'ctx>) -> Self::Result {
        sess.interner().resolve(self.value, |lit| {
            let hex = lit.starts_with("0x") || lit.starts_with("0X");
            if lit == "true" || lit == "false" {
                sess.bool_type()
            } else if lit.ends_with(['u', 'U']) {
                sess.uint_type()
            } else if lit.ends_with("lf") || lit.ends_with("LF") {
                sess.double_type()
            } else if hex {
                sess.int_type()
            } else if lit.ends_with(['f', 'F']) || lit.contains(['.', 'e', 'E']) {
                sess.float_type()
            } else {
                sess.int_type()
            }
        })
    }
}

/// Types `base[index]`
pub struct ValidateIndex<'ctx> {
    pub base: &'ctx Ty<'ctx>,
    pub span: Span,
}

impl<'ctx> SemanticRule<'ctx> for ValidateIndex<'ctx> {
    type Result = &'ctx Ty<'ctx>;

    fn apply(&self, sess: &Session<'ctx>) -> Self::Result {
        match self.base.kind {
            TyKind::Undefined => sess.undefined_type(),
            TyKind::Vector { element, .. } | TyKind::Array { element } => element,
            TyKind::Matrix { element, rows, .. } => sess.vector_type(element, rows),
            _ => {
                sess.emit_error(SemanticError {
                    kind: SemanticErrorKind::InvalidSubscript(sess.ty_to_string(self.base)),
                    span: self.span,
                });
                sess.undefined_type()
            }
        }
    }
}

/// Types `base.field`, either a struct field or a vector swizzle
pub struct ValidateMemberAccess<'ctx> {
    pub base: &'ctx Ty<'ctx>,
    pub field: Name,
    pub span: Span,
}

impl<'ctx> SemanticRule<'ctx> for ValidateMemberAccess<'ctx> {
    type Result = &'ctx Ty<'ctx>;

    fn apply(&self, sess: &Session<'ctx>) -> Self::Result {
        let member = match self.base.kind {
            TyKind::Undefined => return sess.undefined_type(),
            TyKind::Vector { .. } => sess.swizzle(self.base, self.field),
            TyKind::Struct(st) => st.find(self.field).map(Symbol::ty),
            _ => {
                sess.emit_error(SemanticError {
                    kind: SemanticErrorKind::NotAStructOrVector {
                        ty: sess.ty_to_string(self.base),
                        field: sess.name_to_string(self.field),
                    },
                    span: self.span,
                });
                return sess.undefined_type();
            }
        };

        member.unwrap_or_else(|| {
            sess.emit_error(SemanticError {
                kind: SemanticErrorKind::NoMember {
                    ty: sess.ty_to_string(self.base),
                    field: sess.name_to_string(self.field),
                },
                span: self.span,
            });
            sess.undefined_type()
        })
    }
}

/// Types `base.method(args)`. Only `length()` exists, on arrays,
/// vectors and matrices.
pub struct ValidateMemberCall<'ctx, 'a> {
    pub base: &'ctx Ty<'ctx>,
    pub method: Name,
    pub args: &'a [&'ctx Ty<'ctx>],
    pub span: Span,
}

impl<'ctx> SemanticRule<'ctx> for ValidateMemberCall<'ctx, '_> {
    type Result = &'ctx Ty<'ctx>;

    fn apply(&self, sess: &Session<'ctx>) -> Self::Result {
        if self.base.is_undefined() {
            return sess.undefined_type();
        }

        let is_length = sess.interner().is(self.method, "length");
        let has_length = self.base.is_array() || self.base.is_vector() || self.base.is_matrix();

        if is_length && has_length {
            if !self.args.is_empty() {
                sess.emit_error(SemanticError {
                    kind: SemanticErrorKind::TooManyArguments("length".to_string()),
                    span: self.span,
                });
            }
            return sess.int_type();
        }

        sess.emit_error(SemanticError {
            kind: SemanticErrorKind::NoMemberFunction {
                ty: sess.ty_to_string(self.base),
                method: sess.name_to_string(self.method),
            },
            span: self.span,
        });
        sess.undefined_type()
    }
}

/// Result of a [`ResolveCall`]
#[derive(Clone, Copy, Debug)]
pub struct ResolvedCall<'ctx> {
    /// Type of the call expression
    pub ty: &'ctx Ty<'ctx>,
    /// The function that will be called, if we could pick one
    pub function: Option<&'ctx Symbol<'ctx>>,
}

/// Resolves a call to a named entity: a function, an overload set, or
/// a struct constructor.
pub struct ResolveCall<'ctx, 'a> {
    pub callee: &'ctx Symbol<'ctx>,
    pub args: &'a [&'ctx Ty<'ctx>],
    pub span: Span,
}

impl<'ctx> ResolveCall<'ctx, '_> {
    fn error(&self, sess: &Session<'ctx>, kind: SemanticErrorKind) {
        sess.emit_error(SemanticError {
            kind,
            span: self.span,
        });
    }

    fn name(&self, sess: &Session<'ctx>) -> String { sess.symbol_name(self.callee) }

    /// Undefined arguments match anything, so errors in the arguments
    /// don't turn into overload errors
    fn accepts(&self, sess: &Session<'ctx>, function: &Symbol<'ctx>) -> bool {
        function.argument_count() == self.args.len()
            && self.args.iter().zip(function.arguments()).all(|(&from, arg)| {
                from.is_undefined() || ImplicitCast { from, to: arg.ty() }.apply(sess)
            })
    }

    fn exact(&self, function: &Symbol<'ctx>) -> bool {
        self.args
            .iter()
            .zip(function.arguments())
            .all(|(from, arg)| from.is_equal_to(arg.ty()))
    }

    fn call_function(&self, sess: &Session<'ctx>, function: &'ctx Symbol<'ctx>) -> ResolvedCall<'ctx> {
        let expected = function.argument_count();
        if self.args.len() < expected {
            self.error(sess, SemanticErrorKind::TooFewArguments(self.name(sess)));
        } else if self.args.len() > expected {
            self.error(sess, SemanticErrorKind::TooManyArguments(self.name(sess)));
        }
        ResolvedCall {
            ty: function.return_type().unwrap_or_else(|| sess.undefined_type()),
            function: Some(function),
        }
    }

    fn call_overload_set(&self, sess: &Session<'ctx>, set: &'ctx Symbol<'ctx>) -> ResolvedCall<'ctx> {
        let candidates: Vec<_> = set.functions().filter(|f| self.accepts(sess, f)).collect();

        let return_type = |f: &Symbol<'ctx>| f.return_type().unwrap_or_else(|| sess.undefined_type());

        match candidates.as_slice() {
            [function] => ResolvedCall {
                ty: return_type(function),
                function: Some(*function),
            },
            [] => {
                self.error(sess, SemanticErrorKind::NoMatchingFunction(self.name(sess)));
                ResolvedCall {
                    ty: set.functions().next().map_or_else(|| sess.undefined_type(), return_type),
                    function: None,
                }
            }
            [first, ..] => {
                let mut exact = candidates.iter().filter(|f| self.exact(f));
                if let (Some(function), None) = (exact.next(), exact.next()) {
                    return ResolvedCall {
                        ty: return_type(function),
                        function: Some(*function),
                    };
                }
                if self.args.iter().all(|a| !a.is_undefined()) {
                    self.error(sess, SemanticErrorKind::AmbiguousCall(self.name(sess)));
                }
                ResolvedCall {
                    ty: return_type(first),
                    function: None,
                }
            }
        }
    }
}

impl<'ctx> SemanticRule<'ctx> for ResolveCall<'ctx, '_> {
    type Result = ResolvedCall<'ctx>;

    fn apply(&self, sess: &Session<'ctx>) -> Self::Result {
        let ty = self.callee.ty();
        match ty.kind {
            TyKind::Function(function) => self.call_function(sess, function),
            TyKind::OverloadSet(set) => self.call_overload_set(sess, set),
            /* S(a, b) constructs an S */
            TyKind::Struct(_) if self.callee.is_struct() => ResolvedCall { ty, function: None },
            _ => {
                self.error(sess, SemanticErrorKind::NotAFunction(self.name(sess)));
                ResolvedCall {
                    ty: sess.undefined_type(),
                    function: None,
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use arena::DroplessArena;
    use span::Span;

    use super::{ResolveCall, TypeLiteral, ValidateIndex};
    use crate::errors::{SemanticError, SemanticErrorKind};
    use crate::rules::SemanticRule;
    use crate::{Qualifiers, Session, Symbol, Ty};

    #[test]
    fn literals() {
        let arena = DroplessArena::default();
        let sess = Session::new(&arena);
        let ty = |lit: &str| TypeLiteral { value: sess.intern(lit) }.apply(&sess);

        assert_eq!(ty("true"), sess.bool_type());
        assert_eq!(ty("12"), sess.int_type());
        assert_eq!(ty("0xFF"), sess.int_type());
        assert_eq!(ty("12u"), sess.uint_type());
        assert_eq!(ty("1.5lf"), sess.double_type());
        assert_eq!(ty("1.5"), sess.float_type());
        assert_eq!(ty("2f"), sess.float_type());
        assert_eq!(ty("1e3"), sess.float_type());
        assert_eq!(ty(".5"), sess.float_type());
    }

    #[test]
    fn indexing() {
        let arena = DroplessArena::default();
        let sess = Session::new(&arena);
        let index = |base| ValidateIndex { base, span: Span::dummy() }.apply(&sess);

        let float = sess.float_type();
        assert_eq!(index(sess.vector_type(float, 3)), float);
        assert_eq!(index(sess.matrix_type(float, 4, 2)), sess.vector_type(float, 2));
        assert_eq!(index(sess.array_type(sess.int_type())), sess.int_type());
        assert_eq!(index(sess.undefined_type()), sess.undefined_type());
        assert_eq!(sess.n_errors(), 0);

        assert!(index(float).is_undefined());
        assert_eq!(sess.n_errors(), 1);
    }

    fn function<'ctx>(
        sess: &Session<'ctx>,
        global: &'ctx Symbol<'ctx>,
        ret: &'ctx Ty<'ctx>,
        args: &[&'ctx Ty<'ctx>],
    ) -> &'ctx Symbol<'ctx> {
        let f = sess.new_function(global, Some(sess.intern("f")), 1);
        f.set_return_type(ret);
        for &arg in args {
            f.add(sess, sess.new_argument(f, None, arg, Qualifiers::NONE, 1));
        }
        global.add(sess, f);
        f
    }

    fn errors(sess: &Session<'_>) -> Vec<SemanticErrorKind> {
        sess.diagnostics()
            .errors_iterator_cast::<SemanticError>()
            .map(|e| e.kind.clone())
            .collect()
    }

    #[test]
    fn overloads() {
        let arena = DroplessArena::default();
        let sess = Session::new(&arena);
        let global = sess.new_namespace();
        let (int, float, double) = (sess.int_type(), sess.float_type(), sess.double_type());

        let f_float = function(&sess, global, float, &[float]);
        let f_double = function(&sess, global, double, &[double]);
        let set = global.find(sess.intern("f")).unwrap();
        assert!(set.is_overload_set());

        let call = |args: &[_]| ResolveCall { callee: set, args, span: Span::dummy() }.apply(&sess);

        /* Exact match wins over a cast */
        let res = call(&[float]);
        assert!(res.function.is_some_and(|f| core::ptr::eq(f, f_float)));
        let res = call(&[double]);
        assert!(res.function.is_some_and(|f| core::ptr::eq(f, f_double)));
        assert_eq!(res.ty, double);
        assert!(errors(&sess).is_empty());

        /* int casts to both */
        let res = call(&[int]);
        assert!(res.function.is_none());
        assert_eq!(res.ty, float);
        assert_eq!(errors(&sess), [SemanticErrorKind::AmbiguousCall("f".into())]);

        /* No follow up errors for undefined arguments */
        sess.clear_diagnostics();
        call(&[sess.undefined_type()]);
        assert!(errors(&sess).is_empty());

        call(&[sess.bool_type()]);
        call(&[]);
        assert_eq!(
            errors(&sess),
            [
                SemanticErrorKind::NoMatchingFunction("f".into()),
                SemanticErrorKind::NoMatchingFunction("f".into()),
            ]
        );
    }

    #[test]
    fn single_function() {
        let arena = DroplessArena::default();
        let sess = Session::new(&arena);
        let global = sess.new_namespace();
        let vec3 = sess.vector_type(sess.float_type(), 3);
        let f = function(&sess, global, vec3, &[vec3, vec3]);

        let call = |args: &[_]| ResolveCall { callee: f, args, span: Span::dummy() }.apply(&sess);
        assert_eq!(call(&[vec3]).ty, vec3);
        assert_eq!(call(&[vec3, vec3, vec3]).ty, vec3);
        assert_eq!(
            errors(&sess),
            [
                SemanticErrorKind::TooFewArguments("f".into()),
                SemanticErrorKind::TooManyArguments("f".into()),
            ]
        );

        let x = sess.new_variable(global, Some(sess.intern("x")), vec3, Qualifiers::NONE, 1);
        let res = ResolveCall { callee: x, args: &[], span: Span::dummy() }.apply(&sess);
        assert!(res.ty.is_undefined());
        assert_eq!(errors(&sess).last(), Some(&SemanticErrorKind::NotAFunction("x".into())));
    }
}
