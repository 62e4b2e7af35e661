//! Symbols and scopes
//!
//! Scopes are symbols too. Every scope keeps it's members in an
//! intrusive linked list, so that the whole graph can live on a
//! [`DroplessArena`](arena::DroplessArena). Members point back to their
//! enclosing scope with a plain shared reference.
//!
//! Searching a scope walks the list. Namespaces, that hold the builtins
//! and every global, also chain their named members in hash buckets.

use core::cell::Cell;
use core::fmt;
use core::ptr;

use interner::Name;

use crate::{Qualifiers, Session, Ty};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScopeKind {
    /// The global scope
    Namespace,
    /// A compound statement
    Block,
    Struct,
    Function,
    /// Synthesized the first time two functions with the same name are
    /// declared in a namespace
    OverloadSet,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Argument,
    Scope(ScopeKind),
}

pub struct Symbol<'ctx> {
    kind: SymbolKind,
    name: Option<Name>,
    scope: Option<&'ctx Symbol<'ctx>>,
    line: u32,
    ty: Cell<&'ctx Ty<'ctx>>,
    qualifiers: Cell<Qualifiers>,
    return_type: Cell<Option<&'ctx Ty<'ctx>>>,
    defined: Cell<bool>,

    first: Cell<Option<&'ctx Symbol<'ctx>>>,
    last: Cell<Option<&'ctx Symbol<'ctx>>>,
    next: Cell<Option<&'ctx Symbol<'ctx>>>,

    index: Option<&'ctx [Bucket<'ctx>]>,
    next_in_bucket: Cell<Option<&'ctx Symbol<'ctx>>>,
}

/// Head of a chain of members whose names hash alike. The most recent
/// member comes first.
pub(crate) type Bucket<'ctx> = Cell<Option<&'ctx Symbol<'ctx>>>;

fn bucket_chain<'ctx>(head: Option<&'ctx Symbol<'ctx>>) -> impl Iterator<Item = &'ctx Symbol<'ctx>> {
    core::iter::successors(head, |sym| sym.next_in_bucket.get())
}

impl fmt::Debug for Symbol<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Symbol")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("line", &self.line)
            .field("ty", &self.ty.get())
            .finish_non_exhaustive()
    }
}

/// Iterator over the members of a scope. See [`Symbol::members`]
pub struct Members<'ctx> {
    next: Option<&'ctx Symbol<'ctx>>,
}

impl<'ctx> Iterator for Members<'ctx> {
    type Item = &'ctx Symbol<'ctx>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.next.get();
        Some(current)
    }
}

impl<'ctx> Symbol<'ctx> {
    pub(crate) fn new(
        kind: SymbolKind,
        name: Option<Name>,
        scope: Option<&'ctx Symbol<'ctx>>,
        ty: &'ctx Ty<'ctx>,
        line: u32,
    ) -> Self {
        Self {
            kind,
            name,
            scope,
            line,
            ty: Cell::new(ty),
            qualifiers: Cell::new(Qualifiers::NONE),
            return_type: Cell::new(None),
            defined: Cell::new(false),
            first: Cell::new(None),
            last: Cell::new(None),
            next: Cell::new(None),
            index: None,
            next_in_bucket: Cell::new(None),
        }
    }

    /// Indexes the members of this scope by name, over `buckets`
    pub(crate) fn with_index(mut self, buckets: &'ctx [Bucket<'ctx>]) -> Self {
        self.index = Some(buckets);
        self
    }

    fn bucket(&self, name: Name) -> Option<&'ctx Bucket<'ctx>> {
        let buckets = self.index?;
        buckets.get(name.index().checked_rem(buckets.len())?)
    }

    pub fn kind(&self) -> SymbolKind { self.kind }

    pub fn name(&self) -> Option<Name> { self.name }

    /// The enclosing scope of this symbol
    pub fn scope(&self) -> Option<&'ctx Symbol<'ctx>> { self.scope }

    pub fn line(&self) -> u32 { self.line }

    pub fn ty(&self) -> &'ctx Ty<'ctx> { self.ty.get() }

    pub fn set_ty(&self, ty: &'ctx Ty<'ctx>) { self.ty.set(ty); }

    pub fn qualifiers(&self) -> Qualifiers { self.qualifiers.get() }

    pub fn set_qualifiers(&self, qualifiers: Qualifiers) { self.qualifiers.set(qualifiers); }

    pub fn scope_kind(&self) -> Option<ScopeKind> {
        match self.kind {
            SymbolKind::Scope(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn is_scope(&self) -> bool { self.scope_kind().is_some() }

    pub fn is_function(&self) -> bool { self.kind == SymbolKind::Scope(ScopeKind::Function) }

    pub fn is_overload_set(&self) -> bool {
        self.kind == SymbolKind::Scope(ScopeKind::OverloadSet)
    }

    pub fn is_struct(&self) -> bool { self.kind == SymbolKind::Scope(ScopeKind::Struct) }

    pub fn is_variable(&self) -> bool { self.kind == SymbolKind::Variable }

    pub fn is_argument(&self) -> bool { self.kind == SymbolKind::Argument }

    /* ==== Scopes ==== */

    /// Iterates over the members of this scope, in declaration order
    pub fn members(&self) -> Members<'ctx> {
        Members {
            next: self.first.get(),
        }
    }

    /// Finds a member of this scope. Enclosing scopes are not searched.
    pub fn find(&self, name: Name) -> Option<&'ctx Symbol<'ctx>> {
        match self.bucket(name) {
            Some(bucket) => bucket_chain(bucket.get()).filter(|m| m.name == Some(name)).last(),
            None => self.members().find(|m| m.name == Some(name)),
        }
    }

    /// Resolves `name` lexically, starting from this scope and walking
    /// outwards through the enclosing scopes.
    pub fn lookup(&self, name: Name) -> Option<&'ctx Symbol<'ctx>> {
        match self.find(name) {
            Some(sym) => Some(sym),
            None => self.scope?.lookup(name),
        }
    }

    fn append(&self, member: &'ctx Symbol<'ctx>) {
        member.next.set(None);
        match self.last.get() {
            Some(last) => last.next.set(Some(member)),
            None => self.first.set(Some(member)),
        }
        self.last.set(Some(member));

        if let Some(bucket) = member.name.and_then(|name| self.bucket(name)) {
            member.next_in_bucket.set(bucket.get());
            bucket.set(Some(member));
        }
    }

    /// Puts `new` in the place of `old` in the members list.
    /// Both must have the same name.
    fn replace(&self, old: &'ctx Symbol<'ctx>, new: &'ctx Symbol<'ctx>) {
        new.next.set(old.next.get());

        let mut prev: Option<&'ctx Symbol<'ctx>> = None;
        for member in self.members() {
            if ptr::eq(member, old) {
                match prev {
                    Some(prev) => prev.next.set(Some(new)),
                    None => self.first.set(Some(new)),
                }
                break;
            }
            prev = Some(member);
        }

        if self.last.get().is_some_and(|last| ptr::eq(last, old)) {
            self.last.set(Some(new));
        }

        if let Some(bucket) = old.name.and_then(|name| self.bucket(name)) {
            new.next_in_bucket.set(old.next_in_bucket.get());
            let mut prev: Option<&'ctx Symbol<'ctx>> = None;
            for sym in bucket_chain(bucket.get()) {
                if ptr::eq(sym, old) {
                    match prev {
                        Some(prev) => prev.next_in_bucket.set(Some(new)),
                        None => bucket.set(Some(new)),
                    }
                    break;
                }
                prev = Some(sym);
            }
        }
    }

    /// Adds a member to this scope.
    ///
    /// In a namespace, functions are grouped by name. The second function
    /// with a given name moves both into a new overload set, which takes
    /// the place of the first one. A function with exactly the same
    /// parameter types as an earlier one replaces it, so a definition
    /// takes the place of it's prototype.
    pub fn add(&'ctx self, sess: &Session<'ctx>, member: &'ctx Symbol<'ctx>) {
        if !member.is_function() {
            self.append(member);
            return;
        }

        match self.scope_kind() {
            Some(ScopeKind::Namespace) => {
                let existing = member.name.and_then(|name| self.find(name));
                match existing {
                    Some(set) if set.is_overload_set() => set.add(sess, member),
                    Some(func) if func.is_function() && func.same_signature(member) => {
                        log::trace!("Replacing function declared at line {}", func.line);
                        self.replace(func, member);
                    }
                    Some(func) if func.is_function() => {
                        let set = sess.new_overload_set(self, member.name, func.line);
                        log::trace!("New overload set at line {}", func.line);
                        self.replace(func, set);
                        set.append(func);
                        set.append(member);
                    }
                    _ => self.append(member),
                }
            }
            Some(ScopeKind::OverloadSet) => {
                match self.members().find(|f| f.same_signature(member)) {
                    Some(func) => self.replace(func, member),
                    None => self.append(member),
                }
            }
            _ => self.append(member),
        }
    }

    /* ==== Functions ==== */

    /// Arguments of this function, in order
    pub fn arguments(&self) -> impl Iterator<Item = &'ctx Symbol<'ctx>> + use<'ctx> {
        self.members().filter(|m| m.is_argument())
    }

    pub fn argument_count(&self) -> usize { self.arguments().count() }

    pub fn argument_at(&self, i: usize) -> Option<&'ctx Symbol<'ctx>> { self.arguments().nth(i) }

    pub fn return_type(&self) -> Option<&'ctx Ty<'ctx>> { self.return_type.get() }

    pub fn set_return_type(&self, ty: &'ctx Ty<'ctx>) { self.return_type.set(Some(ty)); }

    /// Returns true if this function has a body
    pub fn is_defined(&self) -> bool { self.defined.get() }

    pub fn set_defined(&self, defined: bool) { self.defined.set(defined); }

    /// Returns true if both functions take the same parameter types
    pub fn same_signature(&self, other: &Symbol<'ctx>) -> bool {
        self.is_function()
            && other.is_function()
            && self.argument_count() == other.argument_count()
            && self
                .arguments()
                .zip(other.arguments())
                .all(|(a, b)| a.ty().is_equal_to(b.ty()))
    }

    /// Finds a function named like `function`, in this namespace, with
    /// it's same signature
    pub fn find_same_signature(&self, function: &Symbol<'ctx>) -> Option<&'ctx Symbol<'ctx>> {
        let existing = self.find(function.name?)?;
        if existing.is_overload_set() {
            existing.members().find(|f| f.same_signature(function))
        } else {
            existing.same_signature(function).then_some(existing)
        }
    }

    /// Functions of this overload set
    pub fn functions(&self) -> Members<'ctx> { self.members() }
}
