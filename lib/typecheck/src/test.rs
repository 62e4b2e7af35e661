use arena::DroplessArena;
use ast::stmt::StatementKind;
use semantic::Session;
use semantic::errors::{SemanticError, SemanticErrorKind};

#[test]
fn simple_shader_ok() {
    Tester::all_ok(
        r"
struct Light { vec3 position; float intensity; };
uniform Light light;
in vec3 normal;
out vec4 color;

float shade(Light l, vec3 n) { return l.intensity * n.x; }

void main() {
    float s = shade(light, normal);
    color = vec4(normal.xyz, s);
    for (int i = 0; i < 3; i++) { s += float(i); }
    if (s > 1.0) { discard; }
}",
    );
}

#[test]
fn undeclared_initializer() {
    Tester {
        input: "int x = y;",
        expected: vec![SemanticErrorKind::Undeclared("y".to_string())],
    }
    .test();

    let arena = DroplessArena::default();
    let sess = Session::new(&arena);
    let global = sess.new_namespace();
    let unit = parser::parse_translation_unit("int x = y;", &sess);
    crate::analyze(unit, &sess, global);

    let x = unit.decls[0].as_variable().unwrap();
    assert!(x.init.unwrap().ty().unwrap().is_undefined());
    let sym = x.symbol.get().unwrap();
    assert!(sym.ty().is_equal_to(sess.int_type()));
    assert!(core::ptr::eq(global.find(x.name).unwrap(), sym));
}

#[test]
fn undefined_doesnt_cascade() {
    Tester {
        input: "void main() { float a = b.x + c(1.0); vec2 v = vec2(1.0) * b; }",
        expected: vec![
            SemanticErrorKind::Undeclared("b".to_string()),
            SemanticErrorKind::Undeclared("c".to_string()),
            SemanticErrorKind::Undeclared("b".to_string()),
        ],
    }
    .test();
}

#[test]
fn function_types() {
    let arena = DroplessArena::default();
    let sess = Session::new(&arena);
    let global = sess.new_namespace();
    let unit = parser::parse_translation_unit("vec3 f(vec3 a, vec3 b) { return a + b; }", &sess);
    crate::analyze(unit, &sess, global);
    assert_eq!(sess.n_errors(), 0);

    let vec3 = sess.vector_type(sess.float_type(), 3);
    let f = unit.decls[0].as_function().unwrap();
    for param in f.parameters() {
        assert!(param.symbol.get().unwrap().ty().is_equal_to(vec3));
    }

    let function = f.symbol.get().unwrap();
    assert_eq!(function.argument_count(), 2);
    assert!(function.return_type().unwrap().is_equal_to(vec3));
    assert_eq!(sess.ty_to_string(function.ty()), "vec3 f(vec3, vec3)");

    let StatementKind::Compound(body) = &f.body.unwrap().kind else { panic!() };
    let StatementKind::Return(ret) = &body.stmts[0].kind else { panic!() };
    assert!(ret.expr.unwrap().ty().unwrap().is_equal_to(vec3));
}

#[test]
fn redefinition() {
    Tester {
        input: "float a; int a; void f(int x, int x) {} struct S { float y; int y; };",
        expected: vec![
            SemanticErrorKind::Redefinition("a".to_string()),
            SemanticErrorKind::Redefinition("x".to_string()),
            SemanticErrorKind::Redefinition("y".to_string()),
        ],
    }
    .test();

    Tester {
        input: "void f(float x) {} void f(float y) {} float g; void g() {}",
        expected: vec![
            SemanticErrorKind::Redefinition("f".to_string()),
            SemanticErrorKind::Redefinition("g".to_string()),
        ],
    }
    .test();
}

#[test]
fn shadowing() {
    Tester::all_ok("float a; void main() { int a; { bool a; } }");
}

#[test]
fn scopes() {
    Tester {
        input: "void main() { { float a; } a = 1.0; for (int i = 0; i < 2; i++) {} i = 0; }",
        expected: vec![
            SemanticErrorKind::Undeclared("a".to_string()),
            SemanticErrorKind::Undeclared("i".to_string()),
        ],
    }
    .test();
}

#[test]
fn swizzles() {
    Tester {
        input: r"
void main() {
    vec4 v;
    vec2 a = v.xy;
    float b = v.q;
    vec3 c = v.xyq;
    vec2 d;
    float e = d.z;
    float f = b.x;
}",
        expected: vec![
            SemanticErrorKind::NoMember {
                ty: "vec4".to_string(),
                field: "xyq".to_string(),
            },
            SemanticErrorKind::NoMember {
                ty: "vec2".to_string(),
                field: "z".to_string(),
            },
            SemanticErrorKind::NotAStructOrVector {
                ty: "float".to_string(),
                field: "x".to_string(),
            },
        ],
    }
    .test();
}

#[test]
fn struct_constructor() {
    Tester {
        input: "struct P { float x; }; void main() { P p = P(1.0); float y = p.x; float z = p.w; }",
        expected: vec![SemanticErrorKind::NoMember {
            ty: "P".to_string(),
            field: "w".to_string(),
        }],
    }
    .test();
}

#[test]
fn overloads() {
    const INPUT: &str = r"
float f(float x) { return x; }
int f(int x) { return x; }
void main() {
    float a = f(1.0);
    int b = f(1);
    f(true);
}";
    Tester {
        input: INPUT,
        expected: vec![SemanticErrorKind::NoMatchingFunction("f".to_string())],
    }
    .test();

    let arena = DroplessArena::default();
    let sess = Session::new(&arena);
    let global = sess.new_namespace();
    crate::analyze(parser::parse_translation_unit(INPUT, &sess), &sess, global);
    sess.clear_diagnostics();

    let expr = parser::parse_expression("f(1)", &sess).unwrap();
    let ty = crate::analyze_expression(expr, &sess, global);
    assert!(ty.is_equal_to(sess.int_type()));
    assert_eq!(sess.n_errors(), 0);
}

#[test]
fn ambiguous_call() {
    Tester {
        input: r"
float g(float x, int y) { return x; }
float g(int x, float y) { return y; }
void main() { g(1, 1); }",
        expected: vec![SemanticErrorKind::AmbiguousCall("g".to_string())],
    }
    .test();
}

#[test]
fn argument_count() {
    Tester {
        input: "void h(float x) {} void main() { h(); h(1.0, 2.0); float v = 1.0; v(1.0); }",
        expected: vec![
            SemanticErrorKind::TooFewArguments("h".to_string()),
            SemanticErrorKind::TooManyArguments("h".to_string()),
            SemanticErrorKind::NotAFunction("v".to_string()),
        ],
    }
    .test();
}

#[test]
fn interface_blocks() {
    Tester {
        input: r"
uniform Matrices { mat4 proj; mat4 view; };
uniform Lights { vec3 pos; } lights;
void main() {
    mat4 m = proj * view;
    vec3 p = lights.pos;
    vec3 q = pos;
}",
        expected: vec![SemanticErrorKind::Undeclared("pos".to_string())],
    }
    .test();
}

#[test]
fn prototypes_and_recursion() {
    Tester::all_ok(
        r"
float fact(float n);
float fact(float n) { return n * fact(n - 1.0); }
void main() { fact(3.0); }",
    );
}

#[test]
fn conflicting_return_type() {
    let arena = DroplessArena::default();
    let sess = Session::new(&arena);
    let global = sess.new_namespace();
    let unit = parser::parse_translation_unit("float k(int x); int k(int x) { return x; }", &sess);
    crate::analyze(unit, &sess, global);

    assert_eq!(sess.n_errors(), 0);
    assert_eq!(sess.diagnostics().n_warnings(), 1);
}

#[test]
fn condition_declaration() {
    Tester::all_ok("void main() { int i = 0; while (bool go = i < 3) { i++; } }");
}

#[test]
fn loop_conditions_are_scoped() {
    Tester::all_ok(
        "bool f() { return true; }
         void main() { while (bool b = f()) { } while (bool b = f()) { } }",
    );
    Tester {
        input: "bool f() { return true; } void main() { while (bool b = f()) { } b = false; }",
        expected: vec![SemanticErrorKind::Undeclared("b".to_string())],
    }
    .test();
}

#[test]
fn expression_types() {
    let arena = DroplessArena::default();
    let sess = Session::new(&arena);
    let global = sess.new_namespace();

    let cases = [
        ("1", "int"),
        ("1u", "uint"),
        ("1.5", "float"),
        ("2.0lf", "double"),
        ("0x1F", "int"),
        ("true", "bool"),
        ("!true", "bool"),
        ("1 < 2", "bool"),
        ("vec3(1.0).xy", "vec2"),
        ("mat4(1.0)[0]", "vec4"),
        ("float[3](1.0, 2.0, 3.0)", "float[]"),
        ("vec4(1.0).length()", "int"),
        ("(1, 2.0)", "float"),
    ];
    for (src, expected) in cases {
        let expr = parser::parse_expression(src, &sess).unwrap();
        let ty = crate::analyze_expression(expr, &sess, global);
        assert_eq!(sess.ty_to_string(ty), expected, "{src}");
    }
    assert_eq!(sess.n_errors(), 0);

    let expr = parser::parse_expression("1.0 + x", &sess).unwrap();
    assert!(!expr.is_constant());
    crate::analyze_expression(expr, &sess, global);
    let ast::expr::ExpressionKind::Binary(b) = &expr.kind else {
        panic!("expected a binary expression");
    };
    assert!(b.left.is_constant());
    assert!(!b.right.is_constant());
    assert!(!expr.is_constant());
}

#[test]
fn invalid_subscript() {
    Tester {
        input: "void main() { float a; float b = a[0]; }",
        expected: vec![SemanticErrorKind::InvalidSubscript("float".to_string())],
    }
    .test();
}

#[test]
fn unknown_type_name() {
    Tester {
        input: "Foo a; float b; b c;",
        expected: vec![
            SemanticErrorKind::NotAType("Foo".to_string()),
            SemanticErrorKind::NotAType("b".to_string()),
        ],
    }
    .test();
}

struct Tester<'a> {
    input: &'a str,
    expected: Vec<SemanticErrorKind>,
}

impl Tester<'_> {
    fn test(self) {
        let arena = DroplessArena::default();
        let sess = Session::new(&arena);
        let global = sess.new_namespace();

        let unit = parser::parse_translation_unit(self.input, &sess);
        assert_eq!(sess.n_errors(), 0, "{:?}", sess.diagnostics().diagnostics());
        crate::analyze(unit, &sess, global);

        let diags = sess.diagnostics();
        let errors: Vec<_> = diags
            .errors_iterator_cast::<SemanticError>()
            .map(|err| err.kind.clone())
            .collect();
        assert_eq!(errors, self.expected);
    }

    fn all_ok(input: &str) {
        Tester {
            input,
            expected: vec![],
        }
        .test();
    }
}
