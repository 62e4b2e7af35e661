use crate::Interner;

#[test]
fn dedup() {
    let interner = Interner::new();
    let a = interner.intern("color");
    let b = interner.intern("normal");
    let c = interner.intern("color");

    assert_eq!(a, c);
    assert_ne!(a, b);
    assert_eq!(interner.len(), 2);
}

#[test]
fn get_does_not_intern() {
    let interner = Interner::new();
    assert!(interner.get("uv").is_none());
    assert!(interner.is_empty());

    let uv = interner.intern("uv");
    assert_eq!(interner.get("uv"), Some(uv));
}

#[test]
fn resolve() {
    let interner = Interner::new();
    let name = interner.intern("1.0f");
    assert_eq!(interner.to_owned_string(name), "1.0f");
    assert!(interner.is(name, "1.0f"));
    assert!(!interner.is(name, "1.0"));
    assert_eq!(interner.resolve(name, str::len), 4);
}

#[test]
fn names_are_scoped_to_their_interner() {
    let first = Interner::new();
    let second = Interner::new();
    first.intern("a");
    let b = first.intern("b");

    second.try_resolve(b, |s| assert!(s.is_none()));
}
