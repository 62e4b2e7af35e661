use arena::DroplessArena;

use crate::Session;

#[test]
fn swizzle_table_sizes() {
    let arena = DroplessArena::default();
    let sess = Session::new(&arena);
    let float = sess.float_type();

    /* Three letter sets, every combination of length 1..=dim */
    let expected = [(2, 3 * (2 + 4)), (3, 3 * (3 + 9 + 27)), (4, 3 * (4 + 16 + 64 + 256))];
    for (dim, len) in expected {
        let vec = sess.vector_type(float, dim);
        assert_eq!(sess.swizzles(vec).len(), len);
    }
}

#[test]
fn swizzle_table_is_cached() {
    let arena = DroplessArena::default();
    let sess = Session::new(&arena);
    let vec2 = sess.vector_type(sess.int_type(), 2);

    let first = sess.swizzles(vec2);
    let second = sess.swizzles(vec2);
    assert!(core::ptr::eq(first, second));

    assert!(first.windows(2).all(|w| w[0].name < w[1].name));
}

#[test]
fn not_a_vector() {
    let arena = DroplessArena::default();
    let sess = Session::new(&arena);
    assert!(sess.swizzles(sess.float_type()).is_empty());

    let x = sess.intern("x");
    assert!(sess.swizzle(sess.float_type(), x).is_none());
}
