//! Catalog introspection adapters.
//!
//! The rest of the system treats this crate as a black box that returns raw
//! per-schema catalog metadata; everything downstream of [`RawSchema`] is
//! pure computation.

pub mod adapter;
pub mod options;
pub mod postgres;
pub mod raw;

pub use adapter::Adapter;
pub use options::IntrospectOptions;
pub use postgres::{introspect, PostgresAdapter};
pub use raw::{RawColumn, RawEnum, RawRelation, RawSchema};
