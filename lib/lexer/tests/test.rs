use interner::Interner;
use lexer::{Lexer, LexerState, Variant, token::TokenKind};

fn kinds(src: &str) -> Vec<TokenKind> {
    let interner = Interner::new();
    Lexer::new(src, &interner).map(|t| t.kind).collect()
}

fn kinds_with(src: &str, variant: Variant) -> Vec<TokenKind> {
    let interner = Interner::new();
    Lexer::new(src, &interner)
        .with_variant(variant)
        .map(|t| t.kind)
        .collect()
}

#[test]
fn tokenize_test() {
    const INPUT: &str = "vec4 color = texture2D(tex, uv.st) * 0.5;";

    let interner = Interner::new();
    let tokens = Lexer::new(INPUT, &interner).tokenize();

    let expected = [
        TokenKind::Vec4,
        TokenKind::Identifier,
        TokenKind::Equal,
        TokenKind::Identifier,
        TokenKind::LeftParen,
        TokenKind::Identifier,
        TokenKind::Comma,
        TokenKind::Identifier,
        TokenKind::Dot,
        TokenKind::Identifier,
        TokenKind::RightParen,
        TokenKind::Star,
        TokenKind::Number,
        TokenKind::Semicolon,
        TokenKind::Eof,
    ];
    assert_eq!(tokens.iter().map(|t| t.kind).collect::<Vec<_>>(), expected);

    let idents = ["color", "texture2D", "tex", "uv", "st", "0.5"];
    let mut ident_iter = idents.iter();
    for t in &tokens {
        if let Some(name) = t.name() {
            let exp = ident_iter.next().unwrap();
            assert_eq!(t.span.slice(INPUT), *exp);
            interner.resolve(name, |s| assert_eq!(s, *exp));
        }
    }
    assert!(ident_iter.next().is_none());
}

#[test]
fn operators() {
    use TokenKind as T;

    assert_eq!(
        kinds("<<= << <= < >>= >> >= > ^^ ^= ^ && &= & || |= | ++ += + -- -= - == = != !"),
        [
            T::LessLessEqual, T::LessLess, T::LessEqual, T::Less,
            T::GreaterGreaterEqual, T::GreaterGreater, T::GreaterEqual, T::Greater,
            T::CaretCaret, T::CaretEqual, T::Caret,
            T::AmpersandAmpersand, T::AmpersandEqual, T::Ampersand,
            T::PipePipe, T::PipeEqual, T::Pipe,
            T::PlusPlus, T::PlusEqual, T::Plus,
            T::MinusMinus, T::MinusEqual, T::Minus,
            T::EqualEqual, T::Equal, T::BangEqual, T::Bang,
        ]
    );
    assert_eq!(kinds("a+++b"), [T::Identifier, T::PlusPlus, T::Plus, T::Identifier]);
    assert_eq!(kinds("*= /= %= ~ ? :"), [
        T::StarEqual, T::SlashEqual, T::PercentEqual, T::Tilde, T::Question, T::Colon
    ]);
}

#[test]
fn numbers() {
    const INPUT: &str = "1.0e-3 0x1F .5 2u 3.0lf 1e+ a-1";

    let interner = Interner::new();
    let tokens: Vec<_> = Lexer::new(INPUT, &interner).collect();
    let lexems: Vec<_> = tokens.iter().map(|t| t.span.slice(INPUT)).collect();
    assert_eq!(lexems, ["1.0e-3", "0x1F", ".5", "2u", "3.0lf", "1e", "+", "a", "-", "1"]);

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[2].kind, TokenKind::Number);
    assert_eq!(tokens[6].kind, TokenKind::Plus);
    assert_eq!(tokens[8].kind, TokenKind::Minus);
}

#[test]
fn lines_and_directives() {
    const INPUT: &str = "#version 330\n#define SCALE \\\n   2.0\n\nfloat y;\n  # pragma x\nint z;";

    let interner = Interner::new();
    let tokens: Vec<_> = Lexer::new(INPUT, &interner).collect();
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, [
        TokenKind::Float, TokenKind::Identifier, TokenKind::Semicolon,
        TokenKind::Int, TokenKind::Identifier, TokenKind::Semicolon,
    ]);
    assert_eq!(tokens[0].line(), 5);
    assert_eq!(tokens[3].line(), 7);
}

#[test]
fn hash_inside_a_line() {
    use TokenKind as T;

    let interner = Interner::new();
    let kinds: Vec<_> = Lexer::new("a # b;\n/* c */ #define X 1\nc;", &interner)
        .map(|t| t.kind)
        .collect();
    assert_eq!(kinds, [
        T::Identifier, T::Error, T::Identifier, T::Semicolon,
        T::Identifier, T::Semicolon,
    ]);
}

#[test]
fn comments() {
    use TokenKind as T;

    assert_eq!(kinds("a // b c\n /* d\n e */ f"), [T::Identifier, T::Identifier]);

    let interner = Interner::new();
    let mut lexer = Lexer::new("a // b c\n /* d\n e */ f", &interner);
    lexer.set_scan_comments(true);
    let tokens: Vec<_> = lexer.collect();
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, [T::Identifier, T::Comment, T::Comment, T::Identifier]);
    assert_eq!(tokens[3].line(), 3);
}

#[test]
fn resumable_comment() {
    let interner = Interner::new();

    let first = "x /* begins here";
    let mut lexer = Lexer::new(first, &interner);
    lexer.set_scan_comments(true);
    assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
    let comment = lexer.next_token();
    assert_eq!(comment.kind, TokenKind::Comment);
    assert_eq!(comment.span.slice(first), "/* begins here");
    assert_eq!(lexer.state(), LexerState::MultilineComment);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);

    let second = "still inside */ y";
    let mut lexer = Lexer::new(second, &interner);
    lexer.set_scan_comments(true);
    lexer.set_state(LexerState::MultilineComment);
    let comment = lexer.next_token();
    assert_eq!(comment.kind, TokenKind::Comment);
    assert_eq!(comment.span.slice(second), "still inside */");
    assert_eq!(lexer.state(), LexerState::Normal);
    assert_eq!(lexer.next_token().kind, TokenKind::Identifier);

    /* Without comment scanning, the rest of the comment is skipped */
    let mut lexer = Lexer::new(second, &interner);
    lexer.set_state(LexerState::MultilineComment);
    assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
}

#[test]
fn variant_gating() {
    use TokenKind as T;

    let fragment = Variant::ALL.with_stage(Variant::FRAGMENT_SHADER);
    let vertex = Variant::ALL.with_stage(Variant::VERTEX_SHADER);

    assert_eq!(kinds_with("attribute discard", vertex), [T::Attribute, T::Identifier]);
    assert_eq!(kinds_with("attribute discard", fragment), [T::Identifier, T::Discard]);

    let glsl120 = Variant::for_version(120, false);
    assert_eq!(kinds_with("uint mat2x3 dvec2", glsl120), [T::Identifier, T::Mat2x3, T::Identifier]);

    let glsl400 = Variant::for_version(400, false);
    assert_eq!(kinds_with("uint mat2x3 dvec2", glsl400), [T::UInt, T::Mat2x3, T::DVec2]);

    let es100 = Variant::for_version(100, true);
    assert_eq!(kinds_with("precision mediump float;", es100), [
        T::Precision, T::Mediump, T::Float, T::Semicolon
    ]);

    let interner = Interner::new();
    let mut lexer = Lexer::new("attribute vec4 p;", &interner).with_variant(fragment);
    lexer.set_scan_keywords(false);
    assert_eq!(lexer.next_token().kind, T::Reserved);
    assert_eq!(lexer.next_token().kind, T::Vec4);
}

#[test]
fn reserved_words() {
    use TokenKind as T;

    assert_eq!(kinds("goto class"), [T::Reserved, T::Reserved]);

    let no_reserved = Variant::ALL & !Variant::RESERVED;
    assert_eq!(kinds_with("goto", no_reserved), [T::Identifier]);
}

#[test]
fn error_tokens() {
    use TokenKind as T;

    assert_eq!(kinds("a @ b $"), [T::Identifier, T::Error, T::Identifier, T::Error]);
    assert_eq!(kinds("ñ"), [T::Error]);
}

#[test]
fn interned_names() {
    let interner = Interner::new();
    let tokens: Vec<_> = Lexer::new("pos = pos + true;", &interner).collect();

    let first = tokens[0].name().unwrap();
    let second = tokens[2].name().unwrap();
    assert_eq!(first, second);
    assert!(tokens[1].name().is_none());
    assert_eq!(tokens[4].kind, TokenKind::True);
    assert!(interner.is(tokens[4].name().unwrap(), "true"));
}

#[test]
fn eof_repeats() {
    let interner = Interner::new();
    let mut lexer = Lexer::new("  \n ", &interner);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    let eof = lexer.next_token();
    assert_eq!(eof.kind, TokenKind::Eof);
    assert_eq!(eof.line(), 2);
}
