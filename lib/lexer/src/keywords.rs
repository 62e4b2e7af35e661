use crate::Variant;
use crate::token::TokenKind;

/// Classifies a word as a keyword.
///
/// Returns the keyword's [`TokenKind`], along with the variant bits in
/// which the keyword is enabled. An empty [Variant] means that the
/// keyword is available everywhere. Returns None if `word` is not a
/// keyword.
///
/// ```
/// use lexer::{classify_keyword, token::TokenKind, Variant};
///
/// assert_eq!(classify_keyword("vec3"), Some((TokenKind::Vec3, Variant::empty())));
/// assert_eq!(classify_keyword("attribute"), Some((TokenKind::Attribute, Variant::VERTEX_SHADER)));
/// assert_eq!(classify_keyword("position"), None);
/// ```
#[allow(clippy::too_many_lines)]
pub fn classify_keyword(word: &str) -> Option<(TokenKind, Variant)> {
    use TokenKind as T;

    let any = Variant::empty();
    let reserved = Variant::RESERVED;
    let v120 = Variant::GLSL_120;
    let v150 = Variant::GLSL_150;
    let v400 = Variant::GLSL_400;
    let es100 = Variant::GLSL_ES_100;
    let es300 = Variant::GLSL_ES_300;

    /* Introduced in 1.30 and ES 3.00 */
    let modern = v150 | es300;
    let matnxm = v120 | es300;
    let precision = es100 | v150;

    let kw = match word.len() {
        2 => match word {
            "do" => (T::Do, any),
            "if" => (T::If, any),
            "in" => (T::In, any),
            _ => return None,
        },
        3 => match word {
            "for" => (T::For, any),
            "int" => (T::Int, any),
            "out" => (T::Out, any),
            "asm" => (T::Reserved, reserved),
            _ => return None,
        },
        4 => match word {
            "bool" => (T::Bool, any),
            "case" => (T::Case, modern),
            "else" => (T::Else, any),
            "flat" => (T::Flat, modern),
            "lowp" => (T::Lowp, precision),
            "mat2" => (T::Mat2, any),
            "mat3" => (T::Mat3, any),
            "mat4" => (T::Mat4, any),
            "true" => (T::True, any),
            "uint" => (T::UInt, modern),
            "vec2" => (T::Vec2, any),
            "vec3" => (T::Vec3, any),
            "vec4" => (T::Vec4, any),
            "void" => (T::Void, any),
            "cast" | "enum" | "goto" | "half" | "long" | "this" => (T::Reserved, reserved),
            _ => return None,
        },
        5 => match word {
            "break" => (T::Break, any),
            "bvec2" => (T::BVec2, any),
            "bvec3" => (T::BVec3, any),
            "bvec4" => (T::BVec4, any),
            "const" => (T::Const, any),
            "dmat2" => (T::DMat2, v400),
            "dmat3" => (T::DMat3, v400),
            "dmat4" => (T::DMat4, v400),
            "dvec2" => (T::DVec2, v400),
            "dvec3" => (T::DVec3, v400),
            "dvec4" => (T::DVec4, v400),
            "false" => (T::False, any),
            "float" => (T::Float, any),
            "highp" => (T::Highp, precision),
            "inout" => (T::Inout, any),
            "ivec2" => (T::IVec2, any),
            "ivec3" => (T::IVec3, any),
            "ivec4" => (T::IVec4, any),
            "patch" => (T::Patch, v400),
            "uvec2" => (T::UVec2, modern),
            "uvec3" => (T::UVec3, modern),
            "uvec4" => (T::UVec4, modern),
            "while" => (T::While, any),
            "class" | "fixed" | "input" | "short" | "union" | "using"
            | "fvec2" | "fvec3" | "fvec4" | "hvec2" | "hvec3" | "hvec4" => (T::Reserved, reserved),
            _ => return None,
        },
        6 => match word {
            "buffer" => (T::Buffer, v400),
            "double" => (T::Double, v400),
            "layout" => (T::Layout, modern),
            "mat2x2" => (T::Mat2x2, matnxm),
            "mat2x3" => (T::Mat2x3, matnxm),
            "mat2x4" => (T::Mat2x4, matnxm),
            "mat3x2" => (T::Mat3x2, matnxm),
            "mat3x3" => (T::Mat3x3, matnxm),
            "mat3x4" => (T::Mat3x4, matnxm),
            "mat4x2" => (T::Mat4x2, matnxm),
            "mat4x3" => (T::Mat4x3, matnxm),
            "mat4x4" => (T::Mat4x4, matnxm),
            "return" => (T::Return, any),
            "sample" => (T::Sample, v400),
            "shared" => (T::Shared, v400),
            "smooth" => (T::Smooth, modern),
            "struct" => (T::Struct, any),
            "switch" => (T::Switch, modern),
            "extern" | "filter" | "inline" | "output" | "public" | "sizeof" | "static"
            | "superp" => (T::Reserved, reserved),
            _ => return None,
        },
        7 => match word {
            "default" => (T::Default, modern),
            "discard" => (T::Discard, Variant::FRAGMENT_SHADER),
            "dmat2x2" => (T::DMat2x2, v400),
            "dmat2x3" => (T::DMat2x3, v400),
            "dmat2x4" => (T::DMat2x4, v400),
            "dmat3x2" => (T::DMat3x2, v400),
            "dmat3x3" => (T::DMat3x3, v400),
            "dmat3x4" => (T::DMat3x4, v400),
            "dmat4x2" => (T::DMat4x2, v400),
            "dmat4x3" => (T::DMat4x3, v400),
            "dmat4x4" => (T::DMat4x4, v400),
            "mediump" => (T::Mediump, precision),
            "precise" => (T::Precise, v400),
            "uniform" => (T::Uniform, any),
            "varying" => (T::Varying, any),
            "typedef" => (T::Reserved, reserved),
            _ => return None,
        },
        8 => match word {
            "centroid" => (T::Centroid, v120 | es300),
            "coherent" => (T::Coherent, v400),
            "continue" => (T::Continue, any),
            "readonly" => (T::Readonly, v400),
            "restrict" => (T::Restrict, v400),
            "volatile" => (T::Volatile, v400),
            "external" | "noinline" | "template" | "unsigned" => (T::Reserved, reserved),
            _ => return None,
        },
        9 => match word {
            "attribute" => (T::Attribute, Variant::VERTEX_SHADER),
            "invariant" => (T::Invariant, v120 | es100),
            "precision" => (T::Precision, precision),
            "sampler1D" => (T::Sampler1D, any),
            "sampler2D" => (T::Sampler2D, any),
            "sampler3D" => (T::Sampler3D, any),
            "writeonly" => (T::Writeonly, v400),
            "interface" | "namespace" => (T::Reserved, reserved),
            _ => return None,
        },
        10 => match word {
            "isampler1D" => (T::ISampler1D, v150),
            "isampler2D" => (T::ISampler2D, modern),
            "isampler3D" => (T::ISampler3D, modern),
            "subroutine" => (T::Subroutine, v400),
            "usampler1D" => (T::USampler1D, v150),
            "usampler2D" => (T::USampler2D, modern),
            "usampler3D" => (T::USampler3D, modern),
            _ => return None,
        },
        11 => match word {
            "atomic_uint" => (T::AtomicUint, v400),
            "sampler2DMS" => (T::Sampler2DMS, v150),
            "samplerCube" => (T::SamplerCube, any),
            _ => return None,
        },
        12 => match word {
            "isampler2DMS" => (T::ISampler2DMS, v150),
            "isamplerCube" => (T::ISamplerCube, modern),
            "usampler2DMS" => (T::USampler2DMS, v150),
            "usamplerCube" => (T::USamplerCube, modern),
            _ => return None,
        },
        13 => match word {
            "noperspective" => (T::NoPerspective, v150),
            "sampler2DRect" => (T::Sampler2DRect, v150),
            "samplerBuffer" => (T::SamplerBuffer, v150),
            "sampler3DRect" => (T::Reserved, reserved),
            _ => return None,
        },
        14 => match word {
            "isampler2DRect" => (T::ISampler2DRect, v150),
            "isamplerBuffer" => (T::ISamplerBuffer, v150),
            "sampler1DArray" => (T::Sampler1DArray, v150),
            "sampler2DArray" => (T::Sampler2DArray, modern),
            "usampler2DRect" => (T::USampler2DRect, v150),
            "usamplerBuffer" => (T::USamplerBuffer, v150),
            _ => return None,
        },
        15 => match word {
            "isampler1DArray" => (T::ISampler1DArray, v150),
            "isampler2DArray" => (T::ISampler2DArray, modern),
            "sampler1DShadow" => (T::Sampler1DShadow, any),
            "sampler2DShadow" => (T::Sampler2DShadow, any),
            "usampler1DArray" => (T::USampler1DArray, v150),
            "usampler2DArray" => (T::USampler2DArray, modern),
            _ => return None,
        },
        16 => match word {
            "sampler2DMSArray" => (T::Sampler2DMSArray, v150),
            "samplerCubeArray" => (T::SamplerCubeArray, v400),
            _ => return None,
        },
        17 => match word {
            "isampler2DMSArray" => (T::ISampler2DMSArray, v150),
            "isamplerCubeArray" => (T::ISamplerCubeArray, v400),
            "samplerCubeShadow" => (T::SamplerCubeShadow, modern),
            "usampler2DMSArray" => (T::USampler2DMSArray, v150),
            "usamplerCubeArray" => (T::USamplerCubeArray, v400),
            _ => return None,
        },
        19 => match word {
            "sampler2DRectShadow" => (T::Sampler2DRectShadow, v150),
            _ => return None,
        },
        20 => match word {
            "sampler1DArrayShadow" => (T::Sampler1DArrayShadow, v150),
            "sampler2DArrayShadow" => (T::Sampler2DArrayShadow, modern),
            _ => return None,
        },
        22 => match word {
            "samplerCubeArrayShadow" => (T::SamplerCubeArrayShadow, v400),
            _ => return None,
        },
        _ => return None,
    };
    Some(kw)
}

#[cfg(test)]
mod test {
    use super::classify_keyword;
    use crate::token::TokenKind;

    /// Every keyword must be reachable by it's own spelling
    #[test]
    fn spellings_round_trip() {
        let kinds = [
            TokenKind::Attribute, TokenKind::NoPerspective, TokenKind::AtomicUint,
            TokenKind::DMat4x3, TokenKind::Mat2x4, TokenKind::USamplerCubeArray,
            TokenKind::Sampler2DArrayShadow, TokenKind::SamplerCubeArrayShadow,
            TokenKind::ISampler2DMSArray, TokenKind::Sampler2DRectShadow,
            TokenKind::Writeonly, TokenKind::Subroutine, TokenKind::Precision,
            TokenKind::Do, TokenKind::UVec3, TokenKind::Default,
        ];
        for kind in kinds {
            let (found, _) = classify_keyword(kind.spelling()).unwrap();
            assert_eq!(found, kind);
        }
    }

    #[test]
    fn not_keywords() {
        for word in ["", "x", "vec5", "Vec3", "sampler2d", "mat5x5", "colour"] {
            assert!(classify_keyword(word).is_none(), "{word}");
        }
    }
}
