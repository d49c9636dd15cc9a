//! Schema compilation pipeline.
//!
//! Turns raw catalog metadata into the normalized declaration model: enum
//! normalization first (columns may reference enums from any schema), then
//! table/view assembly, then a deterministic sort of everything. The whole
//! pipeline is synchronous, pure, and free of I/O.

pub mod compile;
pub mod enums;
pub mod relations;
pub mod resolver;
pub mod typemap;

pub use compile::extract_schema;
pub use enums::normalize_enums;
pub use relations::{assemble_tables, assemble_views};
pub use resolver::{resolve_column_type, ResolvedType};
pub use typemap::{base_type, UNKNOWN_TYPE};
