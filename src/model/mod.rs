//! Shared immutable shapes for policy comparison.
//!
//! Everything here is a plain value constructed fresh per comparison call:
//! the document tree, the clause and its id-keyed lookup, and the flat
//! comparison record the normalizer produces.

mod clause;
mod document;
mod record;

pub use clause::*;
pub use document::*;
pub use record::*;

pub(crate) use document::json_kind;
