use arena::DroplessArena;
use lexer::TokenKind;
use semantic::Session;

use crate::Parser;

#[test]
fn bracket_matching() {
    let arena = DroplessArena::default();
    let sess = Session::new(&arena);
    let parser = Parser::new("f(a[1], {b})", &sess);
    let tokens = parser.tokens();

    assert_eq!(tokens[1].matching(), Some(10));
    assert_eq!(tokens[3].matching(), Some(5));
    assert_eq!(tokens[7].matching(), Some(9));
    assert_eq!(tokens[0].matching(), None);

    let parser = Parser::new("( ]", &sess);
    assert_eq!(parser.tokens()[0].matching(), None);
}

#[test]
fn type_names() {
    let arena = DroplessArena::default();
    let sess = Session::new(&arena);
    let mut parser = Parser::new("S s; S[2] a; f(x); a[0] = b;", &sess);
    for _ in 0..4 {
        parser.statement().unwrap();
    }
    assert!(parser.is_finished());

    let kinds: Vec<_> = parser.tokens().iter().map(|t| t.kind).collect();
    assert_eq!(kinds[0], TokenKind::TypeName);
    assert_eq!(kinds[1], TokenKind::Identifier);
    assert_eq!(kinds[3], TokenKind::TypeName);
    assert_eq!(kinds[9], TokenKind::Identifier);
    assert_eq!(kinds[14], TokenKind::Identifier);
    assert_eq!(sess.n_errors(), 0);
}

#[test]
fn recovery_skips_blocks() {
    let arena = DroplessArena::default();
    let sess = Session::new(&arena);
    let mut parser = Parser::new("void f() { int x = ; { } } float y;", &sess);

    assert!(parser.external_declaration().is_err());
    parser.synchronize(0);
    assert_eq!(parser.peek().kind, TokenKind::Float);
}
