//! Dialect variants
//!
//! Every keyword carries a set of variant bits, telling in which
//! language versions and shader stages it's available.

use core::fmt;
use core::ops::{BitAnd, BitOr, BitOrAssign, Not};

/// A set of dialect/version/shader-stage flags
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variant(u32);

impl Variant {
    pub const GLSL_120: Variant = Variant(0x0001_0000);
    pub const GLSL_150: Variant = Variant(0x0002_0000);
    pub const GLSL_400: Variant = Variant(0x0004_0000);
    pub const GLSL_ES_100: Variant = Variant(0x0008_0000);
    pub const GLSL_ES_300: Variant = Variant(0x0010_0000);
    pub const VERTEX_SHADER: Variant = Variant(0x0020_0000);
    pub const FRAGMENT_SHADER: Variant = Variant(0x0040_0000);
    pub const RESERVED: Variant = Variant(0x8000_0000);

    /// Bits that hold variant information
    pub const MASK: Variant = Variant(0xFFFF_0000);
    pub const ALL: Variant = Variant(0xFFFF_0000);

    const STAGES: Variant = Variant(Self::VERTEX_SHADER.0 | Self::FRAGMENT_SHADER.0);

    pub const fn empty() -> Self { Variant(0) }

    pub const fn from_bits(bits: u32) -> Self { Variant(bits & Self::MASK.0) }

    pub const fn bits(self) -> u32 { self.0 }

    pub const fn is_empty(self) -> bool { self.0 == 0 }

    pub const fn intersects(self, other: Variant) -> bool { self.0 & other.0 != 0 }

    pub const fn contains(self, other: Variant) -> bool { self.0 & other.0 == other.0 }

    /// Builds the variant for a `#version` directive.
    ///
    /// Versions are cumulative: `#version 400` also enables the
    /// keywords introduced in 1.20 and 1.50. Both shader stages are
    /// enabled, use [`with_stage`](Self::with_stage) to restrict them.
    ///
    /// ```
    /// use lexer::Variant;
    ///
    /// let v = Variant::for_version(300, true);
    /// assert!(v.contains(Variant::GLSL_ES_100 | Variant::GLSL_ES_300));
    /// assert!(!v.intersects(Variant::GLSL_400));
    /// ```
    pub fn for_version(version: u32, es: bool) -> Self {
        let mut v = Self::RESERVED | Self::STAGES;
        if es {
            v |= Self::GLSL_ES_100;
            if version >= 300 {
                v |= Self::GLSL_ES_300;
            }
        } else {
            if version >= 120 {
                v |= Self::GLSL_120;
            }
            if version >= 150 {
                v |= Self::GLSL_150;
            }
            if version >= 400 {
                v |= Self::GLSL_400;
            }
        }
        v
    }

    /// Replaces the shader stage bits with `stage`
    #[must_use]
    pub fn with_stage(self, stage: Variant) -> Self {
        (self & !Self::STAGES) | (stage & Self::STAGES)
    }
}

impl Default for Variant {
    fn default() -> Self { Self::ALL }
}

impl BitOr for Variant {
    type Output = Variant;

    fn bitor(self, rhs: Self) -> Self::Output { Variant(self.0 | rhs.0) }
}

impl BitOrAssign for Variant {
    fn bitor_assign(&mut self, rhs: Self) { self.0 |= rhs.0; }
}

impl BitAnd for Variant {
    type Output = Variant;

    fn bitand(self, rhs: Self) -> Self::Output { Variant(self.0 & rhs.0) }
}

impl Not for Variant {
    type Output = Variant;

    fn not(self) -> Self::Output { Variant(!self.0 & Self::MASK.0) }
}

impl fmt::Debug for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(Variant, &str); 8] = [
            (Variant::GLSL_120, "GLSL_120"),
            (Variant::GLSL_150, "GLSL_150"),
            (Variant::GLSL_400, "GLSL_400"),
            (Variant::GLSL_ES_100, "GLSL_ES_100"),
            (Variant::GLSL_ES_300, "GLSL_ES_300"),
            (Variant::VERTEX_SHADER, "VERTEX_SHADER"),
            (Variant::FRAGMENT_SHADER, "FRAGMENT_SHADER"),
            (Variant::RESERVED, "RESERVED"),
        ];
        let mut first = true;
        for (bit, name) in NAMES {
            if self.intersects(bit) {
                if !first {
                    write!(f, " | ")?;
                }
                first = false;
                write!(f, "{name}")?;
            }
        }
        if first {
            write!(f, "(empty)")?;
        }
        Ok(())
    }
}
