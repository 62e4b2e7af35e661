//! Semantic rules
//!
//! Each rule validates one construct, reports the errors it finds on
//! the [Session](crate::Session), and returns it's result.

pub mod cast;
pub mod decl;
pub mod expr;

pub trait SemanticRule<'ctx> {
    type Result;

    fn apply(&self, sess: &crate::Session<'ctx>) -> Self::Result;
}
