//! Semantic model
//!
//! This crate holds the [Session]: the object that owns every type,
//! symbol and diagnostic of a compilation. All of them are allocated on
//! a [`DroplessArena`] borrowed by the session, and handed out as
//! `&'ctx` references.
//!
//! # Example
//! ```
//! use arena::DroplessArena;
//! use semantic::Session;
//!
//! let arena = DroplessArena::default();
//! let sess = Session::new(&arena);
//!
//! let vec3 = sess.vector_type(sess.float_type(), 3);
//! assert_eq!(vec3, sess.vector_type(sess.float_type(), 3));
//!
//! let xy = sess.intern("xy");
//! let ty = sess.swizzle(vec3, xy).unwrap();
//! assert_eq!(ty, sess.vector_type(sess.float_type(), 2));
//! ```

use std::cell::{Cell, Ref, RefCell};
use std::collections::{BTreeMap, HashMap};

use arena::DroplessArena;
use error_manager::ErrorManager;
use interner::{Interner, Name};
use lexer::{TokenKind, Variant};

pub mod errors;
mod qualifiers;
pub mod rules;
mod symbols;
mod types;

pub use qualifiers::Qualifiers;
pub use symbols::{Members, ScopeKind, Symbol, SymbolKind};
pub use types::{SWIZZLE_SETS, Swizzle, Ty, TyDisplay, TyKind, TypeId};

/// Number of [`TypeId`]s taken by the scalar types
const N_SCALARS: usize = 7;
const NAMESPACE_BUCKETS: usize = 256;

/// Key of the interning table
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum TypeKey {
    Vector(TypeId, u8),
    Matrix(TypeId, u8, u8),
    Array(TypeId),
    Sampler(TokenKind),
}

/// The compilation context.
///
/// Owns the interner, the type tables, the list of symbols and the
/// diagnostics. Every object it creates lives on the borrowed arena.
///
/// A session can't be reset. To reuse the memory, drop the session and
/// [reset](DroplessArena::reset) the arena.
pub struct Session<'ctx> {
    arena: &'ctx DroplessArena,
    interner: Interner,
    variant: Cell<Variant>,

    undefined: &'ctx Ty<'ctx>,
    void: &'ctx Ty<'ctx>,
    boolean: &'ctx Ty<'ctx>,
    int: &'ctx Ty<'ctx>,
    uint: &'ctx Ty<'ctx>,
    float: &'ctx Ty<'ctx>,
    double: &'ctx Ty<'ctx>,

    next_type_id: Cell<usize>,
    types: RefCell<BTreeMap<TypeKey, &'ctx Ty<'ctx>>>,
    swizzles: RefCell<HashMap<TypeId, &'ctx [Swizzle<'ctx>]>>,
    symbols: RefCell<Vec<&'ctx Symbol<'ctx>>>,
    em: RefCell<ErrorManager>,
}

impl<'ctx> Session<'ctx> {
    pub fn new(arena: &'ctx DroplessArena) -> Self {
        let scalar = |id, kind| -> &'ctx Ty<'ctx> { arena.alloc(Ty { kind, id: TypeId(id) }) };

        Self {
            arena,
            interner: Interner::new(),
            variant: Cell::new(Variant::ALL),
            undefined: scalar(0, TyKind::Undefined),
            void: scalar(1, TyKind::Void),
            boolean: scalar(2, TyKind::Bool),
            int: scalar(3, TyKind::Int),
            uint: scalar(4, TyKind::UInt),
            float: scalar(5, TyKind::Float),
            double: scalar(6, TyKind::Double),
            next_type_id: Cell::new(N_SCALARS),
            types: RefCell::default(),
            swizzles: RefCell::default(),
            symbols: RefCell::default(),
            em: RefCell::default(),
        }
    }

    #[must_use]
    pub fn with_variant(self, variant: Variant) -> Self {
        self.variant.set(variant);
        self
    }

    pub fn variant(&self) -> Variant { self.variant.get() }

    pub fn set_variant(&self, variant: Variant) { self.variant.set(variant); }

    /* ==== Memory ==== */

    pub fn arena(&self) -> &'ctx DroplessArena { self.arena }

    pub fn alloc<T>(&self, val: T) -> &'ctx T { self.arena.alloc(val) }

    pub fn alloc_iter<T, I>(&self, iter: I) -> &'ctx [T]
    where
        I: IntoIterator<Item = T, IntoIter: ExactSizeIterator>,
    {
        self.arena.alloc_iter(iter)
    }

    /* ==== Names ==== */

    pub fn interner(&self) -> &Interner { &self.interner }

    pub fn intern(&self, s: &str) -> Name { self.interner.intern(s) }

    pub fn name_to_string(&self, name: Name) -> String { self.interner.to_owned_string(name) }

    pub fn symbol_name(&self, sym: &Symbol<'_>) -> String {
        sym.name()
            .map_or_else(|| "<anonymous>".to_string(), |n| self.name_to_string(n))
    }

    pub fn ty_to_string(&self, ty: &Ty<'ctx>) -> String { ty.display(&self.interner).to_string() }

    /* ==== Diagnostics ==== */

    pub fn emit_error(&self, err: impl error_manager::Error + 'static) {
        self.em.borrow_mut().emit_error(err);
    }

    pub fn emit_warning(&self, err: impl error_manager::Error + 'static) {
        self.em.borrow_mut().emit_warning(err);
    }

    pub fn diagnostics(&self) -> Ref<'_, ErrorManager> { self.em.borrow() }

    /// Takes all the diagnostics emitted so far, leaving the session
    /// without any
    pub fn take_diagnostics(&self) -> ErrorManager {
        let mut em = self.em.borrow_mut();
        let blocked = em.is_blocked();
        let mut taken = core::mem::take(&mut *em);
        em.set_blocked(blocked);
        taken.set_blocked(false);
        taken
    }

    pub fn clear_diagnostics(&self) { self.em.borrow_mut().clear(); }

    /// While blocked, diagnostics are discarded. Returns the previous
    /// state.
    pub fn block_diagnostics(&self, block: bool) -> bool { self.em.borrow_mut().set_blocked(block) }

    pub fn n_errors(&self) -> usize { self.em.borrow().n_errors() }

    pub fn has_errors(&self) -> bool { self.em.borrow().has_errors() }

    /* ==== Types ==== */

    pub fn undefined_type(&self) -> &'ctx Ty<'ctx> { self.undefined }

    pub fn void_type(&self) -> &'ctx Ty<'ctx> { self.void }

    pub fn bool_type(&self) -> &'ctx Ty<'ctx> { self.boolean }

    pub fn int_type(&self) -> &'ctx Ty<'ctx> { self.int }

    pub fn uint_type(&self) -> &'ctx Ty<'ctx> { self.uint }

    pub fn float_type(&self) -> &'ctx Ty<'ctx> { self.float }

    pub fn double_type(&self) -> &'ctx Ty<'ctx> { self.double }

    fn new_type(&self, kind: TyKind<'ctx>) -> &'ctx Ty<'ctx> {
        let id = self.next_type_id.get();
        self.next_type_id.set(id + 1);
        self.arena.alloc(Ty {
            kind,
            id: TypeId(id),
        })
    }

    fn interned(&self, key: TypeKey, kind: impl FnOnce() -> TyKind<'ctx>) -> &'ctx Ty<'ctx> {
        if let Some(ty) = self.types.borrow().get(&key) {
            return ty;
        }
        let ty = self.new_type(kind());
        self.types.borrow_mut().insert(key, ty);
        ty
    }

    pub fn vector_type(&self, element: &'ctx Ty<'ctx>, dimension: u8) -> &'ctx Ty<'ctx> {
        self.interned(TypeKey::Vector(element.id, dimension), || TyKind::Vector {
            element,
            dimension,
        })
    }

    pub fn matrix_type(&self, element: &'ctx Ty<'ctx>, columns: u8, rows: u8) -> &'ctx Ty<'ctx> {
        self.interned(TypeKey::Matrix(element.id, columns, rows), || TyKind::Matrix {
            element,
            columns,
            rows,
        })
    }

    pub fn array_type(&self, element: &'ctx Ty<'ctx>) -> &'ctx Ty<'ctx> {
        self.interned(TypeKey::Array(element.id), || TyKind::Array { element })
    }

    pub fn sampler_type(&self, kind: TokenKind) -> &'ctx Ty<'ctx> {
        self.interned(TypeKey::Sampler(kind), || TyKind::Sampler(kind))
    }

    /// Number of interned (vector, matrix, array and sampler) types
    pub fn interned_type_count(&self) -> usize { self.types.borrow().len() }

    /// Returns the type named by a builtin type keyword
    pub fn type_for_token(&self, kind: TokenKind) -> Option<&'ctx Ty<'ctx>> {
        use TokenKind as T;

        let (b, i, u, f, d) = (self.boolean, self.int, self.uint, self.float, self.double);
        let ty = match kind {
            T::Void => self.void,
            T::Bool => b,
            T::Int => i,
            T::UInt | T::AtomicUint => u,
            T::Float => f,
            T::Double => d,
            T::Vec2 => self.vector_type(f, 2),
            T::Vec3 => self.vector_type(f, 3),
            T::Vec4 => self.vector_type(f, 4),
            T::BVec2 => self.vector_type(b, 2),
            T::BVec3 => self.vector_type(b, 3),
            T::BVec4 => self.vector_type(b, 4),
            T::IVec2 => self.vector_type(i, 2),
            T::IVec3 => self.vector_type(i, 3),
            T::IVec4 => self.vector_type(i, 4),
            T::UVec2 => self.vector_type(u, 2),
            T::UVec3 => self.vector_type(u, 3),
            T::UVec4 => self.vector_type(u, 4),
            T::DVec2 => self.vector_type(d, 2),
            T::DVec3 => self.vector_type(d, 3),
            T::DVec4 => self.vector_type(d, 4),
            T::Mat2 | T::Mat2x2 => self.matrix_type(f, 2, 2),
            T::Mat2x3 => self.matrix_type(f, 2, 3),
            T::Mat2x4 => self.matrix_type(f, 2, 4),
            T::Mat3x2 => self.matrix_type(f, 3, 2),
            T::Mat3 | T::Mat3x3 => self.matrix_type(f, 3, 3),
            T::Mat3x4 => self.matrix_type(f, 3, 4),
            T::Mat4x2 => self.matrix_type(f, 4, 2),
            T::Mat4x3 => self.matrix_type(f, 4, 3),
            T::Mat4 | T::Mat4x4 => self.matrix_type(f, 4, 4),
            T::DMat2 | T::DMat2x2 => self.matrix_type(d, 2, 2),
            T::DMat2x3 => self.matrix_type(d, 2, 3),
            T::DMat2x4 => self.matrix_type(d, 2, 4),
            T::DMat3x2 => self.matrix_type(d, 3, 2),
            T::DMat3 | T::DMat3x3 => self.matrix_type(d, 3, 3),
            T::DMat3x4 => self.matrix_type(d, 3, 4),
            T::DMat4x2 => self.matrix_type(d, 4, 2),
            T::DMat4x3 => self.matrix_type(d, 4, 3),
            T::DMat4 | T::DMat4x4 => self.matrix_type(d, 4, 4),
            k if k.is_sampler() => self.sampler_type(k),
            _ => return None,
        };
        Some(ty)
    }

    /* ==== Swizzles ==== */

    /// Returns the swizzle table of `vector`, sorted by name.
    /// The table is built the first time it's requested.
    pub fn swizzles(&self, vector: &'ctx Ty<'ctx>) -> &'ctx [Swizzle<'ctx>] {
        if let Some(table) = self.swizzles.borrow().get(&vector.id) {
            return table;
        }
        let table = self.populate_swizzles(vector);
        self.swizzles.borrow_mut().insert(vector.id, table);
        table
    }

    /// Returns the type of `vector.name`, if `name` is a valid swizzle
    pub fn swizzle(&self, vector: &'ctx Ty<'ctx>, name: Name) -> Option<&'ctx Ty<'ctx>> {
        let table = self.swizzles(vector);
        table
            .binary_search_by_key(&name, |s| s.name)
            .ok()
            .map(|i| table[i].ty)
    }

    fn populate_swizzles(&self, vector: &'ctx Ty<'ctx>) -> &'ctx [Swizzle<'ctx>] {
        let TyKind::Vector { element, dimension } = vector.kind else {
            return &[];
        };
        let dim = usize::from(dimension);

        let mut table = Vec::new();
        let mut buf = String::with_capacity(4);
        for set in SWIZZLE_SETS {
            for len in 1..=dimension {
                let ty = if len == 1 {
                    element
                } else {
                    self.vector_type(element, len)
                };
                for code in 0..dim.pow(u32::from(len)) {
                    buf.clear();
                    let mut code = code;
                    for _ in 0..len {
                        buf.push(char::from(set[code % dim]));
                        code /= dim;
                    }
                    table.push(Swizzle {
                        name: self.intern(&buf),
                        ty,
                    });
                }
            }
        }
        table.sort_unstable_by_key(|s| s.name);

        log::trace!(
            "Populated {} swizzles for {}",
            table.len(),
            self.ty_to_string(vector)
        );
        self.arena.alloc_iter(table)
    }

    /* ==== Symbols ==== */

    fn register(&self, sym: Symbol<'ctx>) -> &'ctx Symbol<'ctx> {
        let sym: &'ctx Symbol<'ctx> = self.arena.alloc(sym);
        self.symbols.borrow_mut().push(sym);
        sym
    }

    /// All the symbols created so far, in creation order
    pub fn symbols(&self) -> Vec<&'ctx Symbol<'ctx>> { self.symbols.borrow().clone() }

    pub fn symbol_count(&self) -> usize { self.symbols.borrow().len() }

    pub fn new_namespace(&self) -> &'ctx Symbol<'ctx> {
        let buckets = self.alloc_iter((0..NAMESPACE_BUCKETS).map(|_| Cell::new(None)));
        self.register(
            Symbol::new(
                SymbolKind::Scope(ScopeKind::Namespace),
                None,
                None,
                self.undefined,
                0,
            )
            .with_index(buckets),
        )
    }

    pub fn new_block(&self, scope: &'ctx Symbol<'ctx>, line: u32) -> &'ctx Symbol<'ctx> {
        self.register(Symbol::new(
            SymbolKind::Scope(ScopeKind::Block),
            None,
            Some(scope),
            self.undefined,
            line,
        ))
    }

    pub fn new_struct(
        &self,
        scope: &'ctx Symbol<'ctx>,
        name: Option<Name>,
        line: u32,
    ) -> &'ctx Symbol<'ctx> {
        let sym = self.register(Symbol::new(
            SymbolKind::Scope(ScopeKind::Struct),
            name,
            Some(scope),
            self.undefined,
            line,
        ));
        sym.set_ty(self.new_type(TyKind::Struct(sym)));
        sym
    }

    /// Creates a function. It's return type is unknown until
    /// [`set_return_type`](Symbol::set_return_type) is called.
    pub fn new_function(
        &self,
        scope: &'ctx Symbol<'ctx>,
        name: Option<Name>,
        line: u32,
    ) -> &'ctx Symbol<'ctx> {
        let sym = self.register(Symbol::new(
            SymbolKind::Scope(ScopeKind::Function),
            name,
            Some(scope),
            self.undefined,
            line,
        ));
        sym.set_ty(self.new_type(TyKind::Function(sym)));
        sym
    }

    pub fn new_overload_set(
        &self,
        scope: &'ctx Symbol<'ctx>,
        name: Option<Name>,
        line: u32,
    ) -> &'ctx Symbol<'ctx> {
        let sym = self.register(Symbol::new(
            SymbolKind::Scope(ScopeKind::OverloadSet),
            name,
            Some(scope),
            self.undefined,
            line,
        ));
        sym.set_ty(self.new_type(TyKind::OverloadSet(sym)));
        sym
    }

    pub fn new_argument(
        &self,
        function: &'ctx Symbol<'ctx>,
        name: Option<Name>,
        ty: &'ctx Ty<'ctx>,
        qualifiers: Qualifiers,
        line: u32,
    ) -> &'ctx Symbol<'ctx> {
        let sym = self.register(Symbol::new(
            SymbolKind::Argument,
            name,
            Some(function),
            ty,
            line,
        ));
        sym.set_qualifiers(qualifiers);
        sym
    }

    pub fn new_variable(
        &self,
        scope: &'ctx Symbol<'ctx>,
        name: Option<Name>,
        ty: &'ctx Ty<'ctx>,
        qualifiers: Qualifiers,
        line: u32,
    ) -> &'ctx Symbol<'ctx> {
        let sym = self.register(Symbol::new(
            SymbolKind::Variable,
            name,
            Some(scope),
            ty,
            line,
        ));
        sym.set_qualifiers(qualifiers);
        sym
    }
}

#[cfg(test)]
mod test;
