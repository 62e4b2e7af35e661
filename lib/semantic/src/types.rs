use core::cmp::Ordering;
use core::fmt::{self, Debug, Display};
use core::ptr;

use interner::{Interner, Name};
use lexer::TokenKind;

use crate::symbols::Symbol;

/// A `TypeId` uniquely identifies a type inside a [Session](crate::Session)
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct TypeId(pub(crate) usize);

#[derive(Clone, Copy)]
pub enum TyKind<'ctx> {
    /// The type of an expression we couldn't analyze
    Undefined,
    Void,
    Bool,
    Int,
    UInt,
    Float,
    Double,
    Vector {
        element: &'ctx Ty<'ctx>,
        dimension: u8,
    },
    Matrix {
        element: &'ctx Ty<'ctx>,
        columns: u8,
        rows: u8,
    },
    Array {
        element: &'ctx Ty<'ctx>,
    },
    Sampler(TokenKind),
    Struct(&'ctx Symbol<'ctx>),
    Function(&'ctx Symbol<'ctx>),
    OverloadSet(&'ctx Symbol<'ctx>),
}

impl TyKind<'_> {
    const fn rank(&self) -> u8 {
        match self {
            TyKind::Undefined => 0,
            TyKind::Void => 1,
            TyKind::Bool => 2,
            TyKind::Int => 3,
            TyKind::UInt => 4,
            TyKind::Float => 5,
            TyKind::Double => 6,
            TyKind::Vector { .. } => 7,
            TyKind::Matrix { .. } => 8,
            TyKind::Array { .. } => 9,
            TyKind::Sampler(_) => 10,
            TyKind::Struct(_) => 11,
            TyKind::Function(_) => 12,
            TyKind::OverloadSet(_) => 13,
        }
    }
}

/// A type. Types are only built by the [Session](crate::Session), so
/// two types are the same if they have the same [`TypeId`].
#[derive(Clone, Copy)]
pub struct Ty<'ctx> {
    pub kind: TyKind<'ctx>,
    pub id: TypeId,
}

impl PartialEq for Ty<'_> {
    fn eq(&self, other: &Self) -> bool { self.id == other.id }
}

impl Eq for Ty<'_> {}

impl core::hash::Hash for Ty<'_> {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) { self.id.hash(state); }
}

impl Debug for Ty<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.kind {
            TyKind::Undefined => "Undefined",
            TyKind::Void => "Void",
            TyKind::Bool => "Bool",
            TyKind::Int => "Int",
            TyKind::UInt => "UInt",
            TyKind::Float => "Float",
            TyKind::Double => "Double",
            TyKind::Vector { .. } => "Vector",
            TyKind::Matrix { .. } => "Matrix",
            TyKind::Array { .. } => "Array",
            TyKind::Sampler(_) => "Sampler",
            TyKind::Struct(_) => "Struct",
            TyKind::Function(_) => "Function",
            TyKind::OverloadSet(_) => "OverloadSet",
        };
        write!(f, "Ty({name}, {})", self.id.0)
    }
}

impl<'ctx> Ty<'ctx> {
    #[inline]
    pub const fn is_undefined(&self) -> bool { matches!(self.kind, TyKind::Undefined) }

    #[inline]
    pub const fn is_void(&self) -> bool { matches!(self.kind, TyKind::Void) }

    #[inline]
    pub const fn is_bool(&self) -> bool { matches!(self.kind, TyKind::Bool) }

    #[inline]
    pub const fn is_integer(&self) -> bool { matches!(self.kind, TyKind::Int | TyKind::UInt) }

    pub const fn is_scalar(&self) -> bool {
        matches!(
            self.kind,
            TyKind::Bool | TyKind::Int | TyKind::UInt | TyKind::Float | TyKind::Double
        )
    }

    pub const fn is_numeric(&self) -> bool {
        matches!(
            self.kind,
            TyKind::Int | TyKind::UInt | TyKind::Float | TyKind::Double
        )
    }

    #[inline]
    pub const fn is_vector(&self) -> bool { matches!(self.kind, TyKind::Vector { .. }) }

    #[inline]
    pub const fn is_matrix(&self) -> bool { matches!(self.kind, TyKind::Matrix { .. }) }

    #[inline]
    pub const fn is_array(&self) -> bool { matches!(self.kind, TyKind::Array { .. }) }

    #[inline]
    pub const fn is_sampler(&self) -> bool { matches!(self.kind, TyKind::Sampler(_)) }

    /// Element type of vectors, matrices and arrays
    pub const fn element_type(&self) -> Option<&'ctx Ty<'ctx>> {
        match self.kind {
            TyKind::Vector { element, .. }
            | TyKind::Matrix { element, .. }
            | TyKind::Array { element } => Some(element),
            _ => None,
        }
    }

    pub const fn dimension(&self) -> Option<u8> {
        match self.kind {
            TyKind::Vector { dimension, .. } => Some(dimension),
            _ => None,
        }
    }

    pub const fn as_struct(&self) -> Option<&'ctx Symbol<'ctx>> {
        match self.kind {
            TyKind::Struct(s) => Some(s),
            _ => None,
        }
    }

    pub const fn as_function(&self) -> Option<&'ctx Symbol<'ctx>> {
        match self.kind {
            TyKind::Function(s) => Some(s),
            _ => None,
        }
    }

    pub const fn as_overload_set(&self) -> Option<&'ctx Symbol<'ctx>> {
        match self.kind {
            TyKind::OverloadSet(s) => Some(s),
            _ => None,
        }
    }

    /// Compares two types structurally.
    ///
    /// Unlike `==`, this doesn't need both types to come from the
    /// interning tables. Structs, functions and overload sets are only
    /// equal to themselves.
    pub fn is_equal_to(&self, other: &Ty<'ctx>) -> bool {
        use TyKind as K;
        match (&self.kind, &other.kind) {
            (K::Undefined, K::Undefined)
            | (K::Void, K::Void)
            | (K::Bool, K::Bool)
            | (K::Int, K::Int)
            | (K::UInt, K::UInt)
            | (K::Float, K::Float)
            | (K::Double, K::Double) => true,
            (
                K::Vector { element: e1, dimension: d1 },
                K::Vector { element: e2, dimension: d2 },
            ) => d1 == d2 && e1.is_equal_to(e2),
            (
                K::Matrix { element: e1, columns: c1, rows: r1 },
                K::Matrix { element: e2, columns: c2, rows: r2 },
            ) => c1 == c2 && r1 == r2 && e1.is_equal_to(e2),
            (K::Array { element: e1 }, K::Array { element: e2 }) => e1.is_equal_to(e2),
            (K::Sampler(k1), K::Sampler(k2)) => k1 == k2,
            (K::Struct(s1), K::Struct(s2))
            | (K::Function(s1), K::Function(s2))
            | (K::OverloadSet(s1), K::OverloadSet(s2)) => ptr::eq(*s1, *s2),
            _ => false,
        }
    }

    /// A total order between types.
    ///
    /// Only meant to place types in ordered tables. The order itself
    /// has no meaning for the language.
    pub fn structural_cmp(&self, other: &Ty<'ctx>) -> Ordering {
        use TyKind as K;
        match (&self.kind, &other.kind) {
            (
                K::Vector { element: e1, dimension: d1 },
                K::Vector { element: e2, dimension: d2 },
            ) => d1.cmp(d2).then_with(|| e1.structural_cmp(e2)),
            (
                K::Matrix { element: e1, columns: c1, rows: r1 },
                K::Matrix { element: e2, columns: c2, rows: r2 },
            ) => c1
                .cmp(c2)
                .then(r1.cmp(r2))
                .then_with(|| e1.structural_cmp(e2)),
            (K::Array { element: e1 }, K::Array { element: e2 }) => e1.structural_cmp(e2),
            (K::Sampler(k1), K::Sampler(k2)) => k1.cmp(k2),
            (K::Struct(_), K::Struct(_))
            | (K::Function(_), K::Function(_))
            | (K::OverloadSet(_), K::OverloadSet(_)) => self.id.cmp(&other.id),
            (k1, k2) => k1.rank().cmp(&k2.rank()),
        }
    }

    pub fn is_less_than(&self, other: &Ty<'ctx>) -> bool {
        self.structural_cmp(other) == Ordering::Less
    }

    /// Returns an object that displays this type, resolving struct
    /// and function names with `interner`
    pub fn display<'a>(&'a self, interner: &'a Interner) -> TyDisplay<'a, 'ctx> {
        TyDisplay { ty: self, interner }
    }
}

/// Helper to [Display] a [Ty]. See [`Ty::display`]
pub struct TyDisplay<'a, 'ctx> {
    ty: &'a Ty<'ctx>,
    interner: &'a Interner,
}

impl TyDisplay<'_, '_> {
    fn name(&self, f: &mut fmt::Formatter<'_>, name: Option<Name>, default: &str) -> fmt::Result {
        match name {
            Some(name) => self.interner.resolve(name, |s| write!(f, "{s}")),
            None => write!(f, "{default}"),
        }
    }
}

impl Display for TyDisplay<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ty.kind {
            TyKind::Undefined => write!(f, "undefined"),
            TyKind::Void => write!(f, "void"),
            TyKind::Bool => write!(f, "bool"),
            TyKind::Int => write!(f, "int"),
            TyKind::UInt => write!(f, "uint"),
            TyKind::Float => write!(f, "float"),
            TyKind::Double => write!(f, "double"),
            TyKind::Vector { element, dimension } => {
                let prefix = match element.kind {
                    TyKind::Bool => "b",
                    TyKind::Int => "i",
                    TyKind::UInt => "u",
                    TyKind::Double => "d",
                    _ => "",
                };
                write!(f, "{prefix}vec{dimension}")
            }
            TyKind::Matrix { element, columns, rows } => {
                let prefix = if matches!(element.kind, TyKind::Double) { "d" } else { "" };
                if columns == rows {
                    write!(f, "{prefix}mat{columns}")
                } else {
                    write!(f, "{prefix}mat{columns}x{rows}")
                }
            }
            TyKind::Array { element } => write!(f, "{}[]", element.display(self.interner)),
            TyKind::Sampler(kind) => write!(f, "{}", kind.spelling()),
            TyKind::Struct(sym) => self.name(f, sym.name(), "<anonymous struct>"),
            TyKind::OverloadSet(sym) => self.name(f, sym.name(), "<overload set>"),
            TyKind::Function(sym) => {
                if let Some(ret) = sym.return_type() {
                    write!(f, "{} ", ret.display(self.interner))?;
                }
                self.name(f, sym.name(), "<function>")?;
                write!(f, "(")?;
                for (i, arg) in sym.arguments().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg.ty().display(self.interner))?;
                }
                write!(f, ")")
            }
        }
    }
}

/// A vector component selection, like `.xy` or `.rgba`
#[derive(Clone, Copy, Debug)]
pub struct Swizzle<'ctx> {
    pub name: Name,
    pub ty: &'ctx Ty<'ctx>,
}

/// Letter sets that can be used to select vector components
pub const SWIZZLE_SETS: [&[u8; 4]; 3] = [b"xyzw", b"rgba", b"stpq"];
