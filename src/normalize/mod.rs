//! Field normalization: turning heterogeneous policy documents into flat
//! comparison records.
//!
//! Metadata fields are read directly from the policy object. Section fields
//! take the content of the first section or direct sub-section, in document
//! order, whose title contains one of the field's keywords
//! (case-insensitive). First match wins, so canonical sections must precede
//! similarly titled ancillary ones.
//!
//! Any structural problem makes the whole document not comparison-ready
//! (`None`); a record is never partially filled.

mod normalizer;
mod schema;

pub use normalizer::{normalize_fields, FieldNormalizer, MalformedDocument};
pub use schema::{Fallback, FieldSchema, FieldSource, FieldSpec};
