use std::cell::Cell;

use arena::DroplessArena;

struct Scope<'ctx> {
    name: &'static str,
    parent: Option<&'ctx Scope<'ctx>>,
    depth: Cell<u32>,
}

impl<'ctx> Scope<'ctx> {
    fn new(arena: &'ctx DroplessArena, name: &'static str, parent: Option<&'ctx Scope<'ctx>>) -> &'ctx Scope<'ctx> {
        let scope = arena.alloc(Scope { name, parent, depth: Cell::new(0) });
        if let Some(parent) = parent {
            scope.depth.set(parent.depth.get() + 1);
        }
        scope
    }

    fn path(&self) -> String {
        match self.parent {
            Some(parent) => format!("{}::{}", parent.path(), self.name),
            None => self.name.to_string(),
        }
    }
}

pub fn main() {
    let arena = DroplessArena::default();

    let global = Scope::new(&arena, "global", None);
    let main = Scope::new(&arena, "main", Some(global));
    let body = Scope::new(&arena, "block", Some(main));

    assert_eq!(body.depth.get(), 2);
    assert_eq!(body.path(), "global::main::block");
}
