use super::SemanticRule;
use crate::{Session, Ty, TyKind};

/// Checks if a value of type `from` can be used where a `to` is expected
/// without an explicit conversion.
///
/// Scalars can be promoted along `int -> uint -> float -> double`.
/// Vectors follow the same chain element-wise, provided both have the
/// same dimension. Matrices of the same shape only promote from float
/// to double.
pub struct ImplicitCast<'ctx> {
    pub from: &'ctx Ty<'ctx>,
    pub to: &'ctx Ty<'ctx>,
}

fn scalar_cast(from: &TyKind<'_>, to: &TyKind<'_>) -> bool {
    use TyKind as K;
    match to {
        K::UInt => matches!(from, K::Int),
        K::Float => matches!(from, K::Int | K::UInt),
        K::Double => matches!(from, K::Int | K::UInt | K::Float),
        _ => false,
    }
}

impl<'ctx> SemanticRule<'ctx> for ImplicitCast<'ctx> {
    type Result = bool;

    fn apply(&self, _sess: &Session<'ctx>) -> Self::Result {
        use TyKind as K;

        if self.from.is_equal_to(self.to) {
            return true;
        }

        match (&self.from.kind, &self.to.kind) {
            (
                K::Vector { element: from, dimension: d1 },
                K::Vector { element: to, dimension: d2 },
            ) => d1 == d2 && scalar_cast(&from.kind, &to.kind),
            (
                K::Matrix { element: from, columns: c1, rows: r1 },
                K::Matrix { element: to, columns: c2, rows: r2 },
            ) => {
                c1 == c2
                    && r1 == r2
                    && matches!(from.kind, K::Float)
                    && matches!(to.kind, K::Double)
            }
            (from, to) => scalar_cast(from, to),
        }
    }
}

#[cfg(test)]
mod test {
    use arena::DroplessArena;

    use super::ImplicitCast;
    use crate::Session;
    use crate::rules::SemanticRule;

    #[test]
    fn scalar_chain() {
        let arena = DroplessArena::default();
        let sess = Session::new(&arena);
        let chain = [sess.int_type(), sess.uint_type(), sess.float_type(), sess.double_type()];

        for (i, &from) in chain.iter().enumerate() {
            for (j, &to) in chain.iter().enumerate() {
                let cast = ImplicitCast { from, to }.apply(&sess);
                assert_eq!(cast, i <= j, "{from:?} -> {to:?}");
            }
        }

        let b = sess.bool_type();
        assert!(!ImplicitCast { from: b, to: sess.int_type() }.apply(&sess));
        assert!(!ImplicitCast { from: sess.int_type(), to: b }.apply(&sess));
    }

    #[test]
    fn vectors_and_matrices() {
        let arena = DroplessArena::default();
        let sess = Session::new(&arena);
        let ivec3 = sess.vector_type(sess.int_type(), 3);
        let vec3 = sess.vector_type(sess.float_type(), 3);
        let vec2 = sess.vector_type(sess.float_type(), 2);
        let dvec3 = sess.vector_type(sess.double_type(), 3);

        assert!(ImplicitCast { from: ivec3, to: vec3 }.apply(&sess));
        assert!(ImplicitCast { from: vec3, to: dvec3 }.apply(&sess));
        assert!(!ImplicitCast { from: vec3, to: ivec3 }.apply(&sess));
        assert!(!ImplicitCast { from: ivec3, to: vec2 }.apply(&sess));

        let mat3 = sess.matrix_type(sess.float_type(), 3, 3);
        let dmat3 = sess.matrix_type(sess.double_type(), 3, 3);
        let mat3x2 = sess.matrix_type(sess.float_type(), 3, 2);
        assert!(ImplicitCast { from: mat3, to: dmat3 }.apply(&sess));
        assert!(!ImplicitCast { from: dmat3, to: mat3 }.apply(&sess));
        assert!(!ImplicitCast { from: mat3x2, to: dmat3 }.apply(&sess));
        assert!(!ImplicitCast { from: sess.float_type(), to: vec3 }.apply(&sess));
    }
}
