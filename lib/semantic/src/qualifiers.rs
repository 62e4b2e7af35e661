use core::fmt;
use core::ops::{BitOr, BitOrAssign};

use lexer::TokenKind;

/// Storage, parameter, interpolation and memory qualifiers of a
/// declaration
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Qualifiers(u32);

macro_rules! qualifiers {
    ( $( $name:ident = $bit:literal => $token:ident ),* $(,)? ) => {
        impl Qualifiers {
            $( pub const $name: Qualifiers = Qualifiers(1 << $bit); )*

            const ALL: &[(Qualifiers, TokenKind)] = &[
                $( (Qualifiers::$name, TokenKind::$token), )*
            ];

            /// Returns the qualifier for the given keyword, if it's one
            pub const fn from_token(kind: TokenKind) -> Option<Qualifiers> {
                match kind {
                    $( TokenKind::$token => Some(Qualifiers::$name), )*
                    _ => None,
                }
            }
        }
    };
}

qualifiers! {
    CONST = 0 => Const,
    ATTRIBUTE = 1 => Attribute,
    VARYING = 2 => Varying,
    UNIFORM = 3 => Uniform,
    IN = 4 => In,
    OUT = 5 => Out,
    INOUT = 6 => Inout,
    CENTROID = 7 => Centroid,
    FLAT = 8 => Flat,
    SMOOTH = 9 => Smooth,
    NOPERSPECTIVE = 10 => NoPerspective,
    PATCH = 11 => Patch,
    SAMPLE = 12 => Sample,
    INVARIANT = 13 => Invariant,
    PRECISE = 14 => Precise,
    BUFFER = 15 => Buffer,
    SHARED = 16 => Shared,
    COHERENT = 17 => Coherent,
    VOLATILE = 18 => Volatile,
    RESTRICT = 19 => Restrict,
    READONLY = 20 => Readonly,
    WRITEONLY = 21 => Writeonly,
    SUBROUTINE = 22 => Subroutine,
    LAYOUT = 23 => Layout,
}

impl Qualifiers {
    pub const NONE: Qualifiers = Qualifiers(0);

    pub const fn is_empty(self) -> bool { self.0 == 0 }

    pub const fn contains(self, other: Qualifiers) -> bool { self.0 & other.0 == other.0 }

    pub const fn bits(self) -> u32 { self.0 }
}

impl BitOr for Qualifiers {
    type Output = Qualifiers;

    fn bitor(self, rhs: Self) -> Self::Output { Qualifiers(self.0 | rhs.0) }
}

impl BitOrAssign for Qualifiers {
    fn bitor_assign(&mut self, rhs: Self) { self.0 |= rhs.0; }
}

/// Displays the qualifiers the way they're written in the source
impl fmt::Display for Qualifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for &(q, token) in Self::ALL {
            if self.contains(q) {
                if !first {
                    write!(f, " ")?;
                }
                first = false;
                write!(f, "{}", token.spelling())?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Qualifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Qualifiers({self})") }
}
