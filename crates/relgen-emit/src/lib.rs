//! Emission driver.
//!
//! Consumes the extracted schema and hands `(path, template, context)`
//! triples to the external template renderer, plus writes the per-schema
//! `schema.json` snapshots itself. No compilation logic lives here; every
//! context is a pure projection of the immutable schema value.

pub mod driver;
pub mod errors;
pub mod renderer;

pub use driver::{emit_schema, EmitReport};
pub use errors::EmitError;
pub use renderer::{RecordingRenderer, RenderCall, RenderOptions, Renderer, Template};
