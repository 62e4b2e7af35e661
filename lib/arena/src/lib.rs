//! Arena
//!
//! An arena allows to allocate objects dynamically, and bind them to a
//! specific common lifetime.
//! All objects allocated on the arena live as long as the arena does.
//! This allows us to easily link nodes together: syntax trees, scopes
//! pointing to their parent scope, types pointing to their element type...
//!
//! The arena never runs destructors, so only values that don't need to be
//! dropped can be allocated on it. Resetting the arena requires a mutable
//! borrow, so the compiler makes sure that no reference into it survives
//! a [reset](DroplessArena::reset).
//!
//! # Example
//! ```rust
#![doc = include_str!("../examples/scopes.rs")]
//! ```

mod chunk;
mod dropless;

pub use dropless::DroplessArena;

const PAGE_SIZE: usize = 4096;
const HUGE_PAGE: usize = 2 * 1024 * 1024;

#[cfg(test)]
mod test;
