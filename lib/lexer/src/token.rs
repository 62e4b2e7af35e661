//! Token model

use core::fmt;

use interner::Name;
use span::Span;

macro_rules! token_kinds {
    (
        $( $(#[$meta:meta])* $kind:ident => $spelling:literal ),* $(,)?
    ) => {
        /// Models all the types of token
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum TokenKind {
            $(
                #[doc = concat!("\"", $spelling, "\"")]
                $(#[$meta])*
                $kind,
            )*
        }

        impl TokenKind {
            /// Returns how this token is written in the source.
            ///
            /// Tokens with a variable spelling (identifiers, numbers...)
            /// return a description of themselves.
            pub const fn spelling(self) -> &'static str {
                match self {
                    $( TokenKind::$kind => $spelling, )*
                }
            }
        }
    };
}

token_kinds! {
    Eof => "end of file",
    Error => "error",
    Comment => "comment",
    Identifier => "identifier",
    /// An identifier that the parser determined to be the name of a type
    TypeName => "type name",
    Number => "number",
    /// A word that is reserved for future use, or that is a keyword
    /// disabled in the current variant
    Reserved => "reserved word",

    Plus => "+",
    Minus => "-",
    Star => "*",
    Slash => "/",
    Percent => "%",
    Bang => "!",
    Tilde => "~",
    Equal => "=",
    PlusEqual => "+=",
    MinusEqual => "-=",
    StarEqual => "*=",
    SlashEqual => "/=",
    PercentEqual => "%=",
    LessLessEqual => "<<=",
    GreaterGreaterEqual => ">>=",
    AmpersandEqual => "&=",
    PipeEqual => "|=",
    CaretEqual => "^=",
    PlusPlus => "++",
    MinusMinus => "--",
    EqualEqual => "==",
    BangEqual => "!=",
    Less => "<",
    LessEqual => "<=",
    Greater => ">",
    GreaterEqual => ">=",
    LessLess => "<<",
    GreaterGreater => ">>",
    Ampersand => "&",
    Caret => "^",
    Pipe => "|",
    AmpersandAmpersand => "&&",
    PipePipe => "||",
    CaretCaret => "^^",
    Question => "?",
    Colon => ":",
    Semicolon => ";",
    Comma => ",",
    Dot => ".",
    LeftParen => "(",
    RightParen => ")",
    LeftBracket => "[",
    RightBracket => "]",
    LeftBrace => "{",
    RightBrace => "}",

    Attribute => "attribute",
    Const => "const",
    Uniform => "uniform",
    Varying => "varying",
    Buffer => "buffer",
    Shared => "shared",
    Coherent => "coherent",
    Volatile => "volatile",
    Restrict => "restrict",
    Readonly => "readonly",
    Writeonly => "writeonly",
    Layout => "layout",
    Centroid => "centroid",
    Flat => "flat",
    Smooth => "smooth",
    NoPerspective => "noperspective",
    Patch => "patch",
    Sample => "sample",
    Subroutine => "subroutine",
    In => "in",
    Out => "out",
    Inout => "inout",
    Invariant => "invariant",
    Precise => "precise",
    Lowp => "lowp",
    Mediump => "mediump",
    Highp => "highp",
    Precision => "precision",

    Break => "break",
    Continue => "continue",
    Do => "do",
    For => "for",
    While => "while",
    Switch => "switch",
    Case => "case",
    Default => "default",
    If => "if",
    Else => "else",
    Discard => "discard",
    Return => "return",
    Struct => "struct",
    True => "true",
    False => "false",

    Void => "void",
    Bool => "bool",
    Int => "int",
    UInt => "uint",
    Float => "float",
    Double => "double",
    AtomicUint => "atomic_uint",
    Vec2 => "vec2",
    Vec3 => "vec3",
    Vec4 => "vec4",
    BVec2 => "bvec2",
    BVec3 => "bvec3",
    BVec4 => "bvec4",
    IVec2 => "ivec2",
    IVec3 => "ivec3",
    IVec4 => "ivec4",
    UVec2 => "uvec2",
    UVec3 => "uvec3",
    UVec4 => "uvec4",
    DVec2 => "dvec2",
    DVec3 => "dvec3",
    DVec4 => "dvec4",
    Mat2 => "mat2",
    Mat3 => "mat3",
    Mat4 => "mat4",
    Mat2x2 => "mat2x2",
    Mat2x3 => "mat2x3",
    Mat2x4 => "mat2x4",
    Mat3x2 => "mat3x2",
    Mat3x3 => "mat3x3",
    Mat3x4 => "mat3x4",
    Mat4x2 => "mat4x2",
    Mat4x3 => "mat4x3",
    Mat4x4 => "mat4x4",
    DMat2 => "dmat2",
    DMat3 => "dmat3",
    DMat4 => "dmat4",
    DMat2x2 => "dmat2x2",
    DMat2x3 => "dmat2x3",
    DMat2x4 => "dmat2x4",
    DMat3x2 => "dmat3x2",
    DMat3x3 => "dmat3x3",
    DMat3x4 => "dmat3x4",
    DMat4x2 => "dmat4x2",
    DMat4x3 => "dmat4x3",
    DMat4x4 => "dmat4x4",

    Sampler1D => "sampler1D",
    Sampler2D => "sampler2D",
    Sampler3D => "sampler3D",
    SamplerCube => "samplerCube",
    Sampler1DShadow => "sampler1DShadow",
    Sampler2DShadow => "sampler2DShadow",
    SamplerCubeShadow => "samplerCubeShadow",
    Sampler1DArray => "sampler1DArray",
    Sampler2DArray => "sampler2DArray",
    Sampler1DArrayShadow => "sampler1DArrayShadow",
    Sampler2DArrayShadow => "sampler2DArrayShadow",
    Sampler2DRect => "sampler2DRect",
    Sampler2DRectShadow => "sampler2DRectShadow",
    SamplerBuffer => "samplerBuffer",
    Sampler2DMS => "sampler2DMS",
    Sampler2DMSArray => "sampler2DMSArray",
    SamplerCubeArray => "samplerCubeArray",
    SamplerCubeArrayShadow => "samplerCubeArrayShadow",
    ISampler1D => "isampler1D",
    ISampler2D => "isampler2D",
    ISampler3D => "isampler3D",
    ISamplerCube => "isamplerCube",
    ISampler1DArray => "isampler1DArray",
    ISampler2DArray => "isampler2DArray",
    ISampler2DRect => "isampler2DRect",
    ISamplerBuffer => "isamplerBuffer",
    ISampler2DMS => "isampler2DMS",
    ISampler2DMSArray => "isampler2DMSArray",
    ISamplerCubeArray => "isamplerCubeArray",
    USampler1D => "usampler1D",
    USampler2D => "usampler2D",
    USampler3D => "usampler3D",
    USamplerCube => "usamplerCube",
    USampler1DArray => "usampler1DArray",
    USampler2DArray => "usampler2DArray",
    USampler2DRect => "usampler2DRect",
    USamplerBuffer => "usamplerBuffer",
    USampler2DMS => "usampler2DMS",
    USampler2DMSArray => "usampler2DMSArray",
    USamplerCubeArray => "usamplerCubeArray",
}

impl TokenKind {
    /// Returns true if this token names a builtin type
    /// (`float`, `vec3`, `mat4x2`, `sampler2D` ...)
    pub const fn is_builtin_type(self) -> bool {
        use TokenKind as T;
        matches!(
            self,
            T::Void | T::Bool | T::Int | T::UInt | T::Float | T::Double | T::AtomicUint
                | T::Vec2 | T::Vec3 | T::Vec4
                | T::BVec2 | T::BVec3 | T::BVec4
                | T::IVec2 | T::IVec3 | T::IVec4
                | T::UVec2 | T::UVec3 | T::UVec4
                | T::DVec2 | T::DVec3 | T::DVec4
                | T::Mat2 | T::Mat3 | T::Mat4
                | T::Mat2x2 | T::Mat2x3 | T::Mat2x4
                | T::Mat3x2 | T::Mat3x3 | T::Mat3x4
                | T::Mat4x2 | T::Mat4x3 | T::Mat4x4
                | T::DMat2 | T::DMat3 | T::DMat4
                | T::DMat2x2 | T::DMat2x3 | T::DMat2x4
                | T::DMat3x2 | T::DMat3x3 | T::DMat3x4
                | T::DMat4x2 | T::DMat4x3 | T::DMat4x4
        ) || self.is_sampler()
    }

    pub const fn is_sampler(self) -> bool {
        use TokenKind as T;
        matches!(
            self,
            T::Sampler1D | T::Sampler2D | T::Sampler3D | T::SamplerCube
                | T::Sampler1DShadow | T::Sampler2DShadow | T::SamplerCubeShadow
                | T::Sampler1DArray | T::Sampler2DArray
                | T::Sampler1DArrayShadow | T::Sampler2DArrayShadow
                | T::Sampler2DRect | T::Sampler2DRectShadow | T::SamplerBuffer
                | T::Sampler2DMS | T::Sampler2DMSArray
                | T::SamplerCubeArray | T::SamplerCubeArrayShadow
                | T::ISampler1D | T::ISampler2D | T::ISampler3D | T::ISamplerCube
                | T::ISampler1DArray | T::ISampler2DArray | T::ISampler2DRect
                | T::ISamplerBuffer | T::ISampler2DMS | T::ISampler2DMSArray
                | T::ISamplerCubeArray
                | T::USampler1D | T::USampler2D | T::USampler3D | T::USamplerCube
                | T::USampler1DArray | T::USampler2DArray | T::USampler2DRect
                | T::USamplerBuffer | T::USampler2DMS | T::USampler2DMSArray
                | T::USamplerCubeArray
        )
    }

    pub const fn is_precision(self) -> bool {
        matches!(self, TokenKind::Lowp | TokenKind::Mediump | TokenKind::Highp)
    }

    /// Returns true for `=` and all the compound assignment operators
    pub const fn is_assignment(self) -> bool {
        use TokenKind as T;
        matches!(
            self,
            T::Equal
                | T::PlusEqual | T::MinusEqual | T::StarEqual | T::SlashEqual | T::PercentEqual
                | T::LessLessEqual | T::GreaterGreaterEqual
                | T::AmpersandEqual | T::PipeEqual | T::CaretEqual
        )
    }

    /// Returns true if the spelling of this token depends on the source
    pub const fn has_variable_spelling(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::TypeName
                | TokenKind::Number
                | TokenKind::Reserved
                | TokenKind::Error
                | TokenKind::Comment
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.spelling()) }
}

/// Extra information attached to a [Token]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TokenValue {
    #[default]
    None,
    /// Interned lexeme of identifiers, numbers and boolean literals
    Name(Name),
    /// Index of the matching bracket. Set by the parser's pre-pass.
    Matching(usize),
}

/// A token consist on a discriminator [`TokenKind`], a [Span]
/// and an optional [`TokenValue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub value: TokenValue,
}

impl Token {
    /// Line where this token starts
    pub const fn line(&self) -> u32 { self.span.line }

    pub const fn name(&self) -> Option<Name> {
        match self.value {
            TokenValue::Name(name) => Some(name),
            _ => None,
        }
    }

    pub const fn matching(&self) -> Option<usize> {
        match self.value {
            TokenValue::Matching(i) => Some(i),
            _ => None,
        }
    }

    /// Returns how this token is written in `src`
    pub fn spelling<'src>(&self, src: &'src str) -> &'src str {
        if self.kind.has_variable_spelling() {
            self.span.slice(src)
        } else {
            self.kind.spelling()
        }
    }
}
