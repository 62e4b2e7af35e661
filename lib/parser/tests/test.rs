use arena::DroplessArena;
use ast::Kind;
use ast::declaration::DeclarationKind;
use ast::expr::{BinaryOp, ExpressionKind, FunctionIdentifierKind};
use ast::types::TypeSpecKind;
use parser::{parse_expression, parse_translation_unit};
use semantic::Session;

#[test]
fn valid() {
    const INPUT: &str = r"
#version 330
precision mediump float;

struct Light {
    vec3 position;
    vec4 color[2];
};

uniform Light lights[4];
layout(location = 0) in vec3 normal;
out vec4 fragColor;

float attenuation(in Light l, float d) {
    return 1.0 / (1.0 + d * d);
}

void main() {
    vec4 acc = vec4(0.0);
    for (int i = 0; i < 4; ++i) {
        float d = length(lights[i].position - normal);
        if (d > 10.0)
            continue;
        acc += lights[i].color[0] * attenuation(lights[i], d);
    }
    fragColor = acc.a > 0.0 ? acc : vec4(1.0);
}
";
    let arena = DroplessArena::default();
    let sess = Session::new(&arena);
    let unit = parse_translation_unit(INPUT, &sess);

    assert_eq!(sess.n_errors(), 0, "{:?}", sess.diagnostics().diagnostics());
    let kinds: Vec<_> = unit.decls.iter().map(|d| d.kind()).collect();
    assert_eq!(
        kinds,
        [
            Kind::PrecisionDeclaration,
            Kind::TypeDeclaration,
            Kind::VariableDeclaration,
            Kind::VariableDeclaration,
            Kind::VariableDeclaration,
            Kind::FunctionDeclaration,
            Kind::FunctionDeclaration,
        ]
    );
}

#[test]
fn unexpected_token() {
    let arena = DroplessArena::default();
    let sess = Session::new(&arena);
    let unit = parse_translation_unit("int x = ;", &sess);

    assert!(unit.decls.is_empty());
    let diags = sess.diagnostics();
    assert_eq!(diags.n_errors(), 1);
    assert_eq!(diags.diagnostics()[0].to_string(), "error: unexpected token ';' at line 1");
}

#[test]
fn deep_nesting() {
    let arena = DroplessArena::default();
    let sess = Session::new(&arena);

    let depth = parser::MAX_NESTING / 2;
    let src = format!("float x = {}1.0{};", "(".repeat(depth), ")".repeat(depth));
    parse_translation_unit(&src, &sess);
    assert_eq!(sess.n_errors(), 0);

    let src = format!("float x = {}1.0{}; float y;", "(".repeat(5000), ")".repeat(5000));
    let unit = parse_translation_unit(&src, &sess);
    let diags = sess.diagnostics();
    assert_eq!(diags.n_errors(), 1);
    assert_eq!(diags.diagnostics()[0].message(), "nesting too deep");
    assert_eq!(unit.decls.len(), 1);
    drop(diags);

    let src = format!("void main() {}{}", "{".repeat(5000), "}".repeat(5000));
    sess.clear_diagnostics();
    parse_translation_unit(&src, &sess);
    assert_eq!(sess.n_errors(), 1);

    let src = format!("{}1", "-".repeat(5000));
    sess.clear_diagnostics();
    assert!(parse_expression(&src, &sess).is_none());
    assert_eq!(sess.n_errors(), 1);
}

#[test]
fn recovery() {
    const INPUT: &str = r"
float a;
int b = ;
void f() { b = (1 + ; }
float c;
";
    let arena = DroplessArena::default();
    let sess = Session::new(&arena);
    let unit = parse_translation_unit(INPUT, &sess);

    assert_eq!(sess.n_errors(), 2);
    let lines: Vec<_> = sess.diagnostics().errors().map(|d| d.line()).collect();
    assert_eq!(lines, [3, 4]);

    let names: Vec<_> = unit
        .decls
        .iter()
        .filter_map(|d| d.as_variable())
        .map(|v| sess.name_to_string(v.name))
        .collect();
    assert_eq!(names, ["a", "c"]);
}

#[test]
fn declarations_keep_order() {
    let arena = DroplessArena::default();
    let sess = Session::new(&arena);
    let unit = parse_translation_unit("int a; ; float b; vec2 c; bool d;", &sess);

    assert_eq!(sess.n_errors(), 0);
    let names: Vec<_> = unit
        .decls
        .iter()
        .filter_map(|d| d.as_variable())
        .map(|v| sess.name_to_string(v.name))
        .collect();
    assert_eq!(names, ["a", "b", "c", "d"]);
}

#[test]
fn init_declarator_list() {
    let arena = DroplessArena::default();
    let sess = Session::new(&arena);
    let unit = parse_translation_unit("float a, b[3], c = 1.0;", &sess);

    let DeclarationKind::Init(init) = &unit.decls[0].kind else {
        panic!("expected an init declaration");
    };
    assert_eq!(init.decls.len(), 3);
    let b = init.decls[1].as_variable().unwrap();
    assert_eq!(b.ty.kind(), Kind::ArrayType);
    let c = init.decls[2].as_variable().unwrap();
    assert!(c.init.is_some());
}

#[test]
fn struct_with_variable() {
    let arena = DroplessArena::default();
    let sess = Session::new(&arena);
    let unit = parse_translation_unit("struct S { float x, y; } s; S t;", &sess);

    assert_eq!(sess.n_errors(), 0);
    assert_eq!(unit.decls[0].kind(), Kind::TypeAndVariableDeclaration);
    let t = unit.decls[1].as_variable().unwrap();
    assert!(matches!(t.ty.kind, TypeSpecKind::Named(name) if sess.interner().is(name, "S")));
}

#[test]
fn empty_struct() {
    let arena = DroplessArena::default();
    let sess = Session::new(&arena);
    parse_translation_unit("struct S { };", &sess);
    assert_eq!(sess.n_errors(), 1);
}

#[test]
fn interface_blocks() {
    let arena = DroplessArena::default();
    let sess = Session::new(&arena);
    let unit = parse_translation_unit(
        "layout(std140, binding = 2) uniform Matrices { mat4 proj; mat4 view; } m; in Vertex { vec3 n; };",
        &sess,
    );

    assert_eq!(sess.n_errors(), 0);
    assert_eq!(unit.decls[0].kind(), Kind::TypeAndVariableDeclaration);
    assert_eq!(unit.decls[1].kind(), Kind::TypeDeclaration);
}

#[test]
fn prototypes() {
    let arena = DroplessArena::default();
    let sess = Session::new(&arena);
    let unit = parse_translation_unit("vec3 f(vec3, float); void g(void) {}", &sess);

    assert_eq!(sess.n_errors(), 0);
    let f = unit.decls[0].as_function().unwrap();
    assert!(f.is_prototype());
    assert_eq!(f.params.len(), 2);
    let g = unit.decls[1].as_function().unwrap();
    assert!(!g.is_prototype());
    assert!(g.params.is_empty());
}

#[test]
fn precedence() {
    let arena = DroplessArena::default();
    let sess = Session::new(&arena);
    let expr = parse_expression("a + b * c == d || e", &sess).unwrap();

    let ExpressionKind::Binary(or) = &expr.kind else { panic!() };
    assert_eq!(or.op, BinaryOp::Or);
    let ExpressionKind::Binary(eq) = &or.left.kind else { panic!() };
    assert_eq!(eq.op, BinaryOp::Eq);
    let ExpressionKind::Binary(add) = &eq.left.kind else { panic!() };
    assert_eq!(add.op, BinaryOp::Add);
    assert_eq!(add.right.kind(), Kind::Multiply);
}

#[test]
fn assignment_is_right_associative() {
    let arena = DroplessArena::default();
    let sess = Session::new(&arena);
    let expr = parse_expression("a = b += c", &sess).unwrap();

    let ExpressionKind::Assignment(assign) = &expr.kind else { panic!() };
    assert_eq!(assign.left.kind(), Kind::Identifier);
    assert_eq!(assign.right.kind(), Kind::AssignPlus);
}

#[test]
fn constructors() {
    let arena = DroplessArena::default();
    let sess = Session::new(&arena);

    let expr = parse_expression("vec3(1.0, 2.0, 3.0)", &sess).unwrap();
    let ExpressionKind::Call(call) = &expr.kind else { panic!() };
    assert!(matches!(call.callee.kind, FunctionIdentifierKind::Type(_)));
    assert_eq!(call.args.len(), 3);

    let expr = parse_expression("float[2](a, b)", &sess).unwrap();
    let ExpressionKind::Call(call) = &expr.kind else { panic!() };
    let FunctionIdentifierKind::Type(ty) = call.callee.kind else { panic!() };
    assert_eq!(ty.kind(), Kind::ArrayType);

    let expr = parse_expression("f(void)", &sess).unwrap();
    let ExpressionKind::Call(call) = &expr.kind else { panic!() };
    assert!(call.args.is_empty());
    assert!(call.callee.name().is_some());
}

#[test]
fn postfix() {
    let arena = DroplessArena::default();
    let sess = Session::new(&arena);

    let expr = parse_expression("a[1].xy.length()", &sess).unwrap();
    assert_eq!(expr.kind(), Kind::MemberFunctionCall);
    let expr = parse_expression("i++", &sess).unwrap();
    assert_eq!(expr.kind(), Kind::PostIncrement);
    let expr = parse_expression("-x", &sess).unwrap();
    assert_eq!(expr.kind(), Kind::UnaryMinus);
}

#[test]
fn invalid_expression() {
    let arena = DroplessArena::default();
    let sess = Session::new(&arena);

    assert!(parse_expression("a +", &sess).is_none());
    assert!(parse_expression("a b", &sess).is_none());
    assert_eq!(sess.n_errors(), 2);
}

#[test]
fn statements() {
    const INPUT: &str = r"
void main() {
    int i = 0;
    while (bool go = i < 3) { i++; }
    do { i--; } while (i > 0);
    switch (i) {
        case 0: break;
        default: discard;
    }
    for (;;) { return; }
}
";
    let arena = DroplessArena::default();
    let sess = Session::new(&arena);
    let unit = parse_translation_unit(INPUT, &sess);
    assert_eq!(sess.n_errors(), 0, "{:?}", sess.diagnostics().diagnostics());

    let main = unit.decls[0].as_function().unwrap();
    let body = main.body.unwrap();
    let ast::stmt::StatementKind::Compound(block) = &body.kind else { panic!() };
    let kinds: Vec<_> = block.stmts.iter().map(|s| s.kind()).collect();
    assert_eq!(kinds, [Kind::DeclarationStatement, Kind::While, Kind::Do, Kind::Switch, Kind::For]);
}
