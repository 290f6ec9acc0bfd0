// fragmat-parser/src/lib.rs

//! # fragmat-parser
//!
//! Low-level reader for fragments model files: a table-based, offset-addressed
//! binary layout (FlatBuffers wire format) where every table is reached through
//! a relative offset and described by a vtable.
//!
//! Only the path from the root `Model` table to its material collection is
//! decoded. Every read is bounds-checked, so corrupt offsets, broken vtables,
//! truncated buffers and unknown enum tags surface as [`FragError`] values
//! instead of panics.
//!
//! ## Architecture
//!
//! 1. [`buf`]: owned byte storage (in-memory or memory-mapped)
//! 2. [`read`]: checked little-endian scalar reads
//! 3. [`table`]: table / vtable / vector navigation
//! 4. [`material`] and [`model`]: the typed view the resolver consumes

pub mod buf;
pub mod material;
pub mod model;
pub mod options;
pub mod read;
pub mod schema;
pub mod table;

pub use buf::FragBuf;
pub use fragmat_error::{DecodeErrorKind, FragError, Result};
pub use material::{MaterialRecord, RenderedFaces, Stroke};
pub use model::{MaterialSource, Model};
pub use options::LoadOptions;
pub use schema::SchemaLayout;
pub use table::{Table, Vector};
