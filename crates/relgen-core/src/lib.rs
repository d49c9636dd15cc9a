//! Core contracts and helpers for relgen.
//!
//! This crate defines the declaration model produced by schema extraction,
//! the configuration types that drive it, and the identifier hashing shared
//! across crates.

pub mod config;
pub mod declarations;
pub mod error;
pub mod hash;
pub mod names;

pub use config::{
    Config, CustomType, CustomTypeEntry, CustomTypes, EntityFilter, EntityNominator,
    FilterContext, ImportedType, NominatorContext, ResolvedConfig, SUPPORTED_CLIENTS,
};
pub use declarations::{
    ColumnDeclaration, ColumnKind, EnumDeclaration, EnumLiteral, EnumRef, EnumValue,
    ExtractedSchema, ImportedTypeRef, TableDeclaration, ViewDeclaration,
};
pub use error::{Error, Result};
pub use hash::hash_token;
pub use names::{default_entity_name, default_enum_name, default_model_name};

/// Current contract version for emitted `schema.json` artifacts.
pub const SCHEMA_VERSION: &str = "0.1";
