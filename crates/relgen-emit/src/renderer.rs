use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::EmitError;

/// Identifier of a template the external rendering engine knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    TableIndex,
    TableTypes,
    ModelStub,
    SchemaTables,
    SchemaEnums,
    SchemaTypes,
    SchemaDts,
    RootTables,
    RootTypes,
    Connect,
}

impl Template {
    pub fn name(&self) -> &'static str {
        match self {
            Self::TableIndex => "table/index",
            Self::TableTypes => "table/types",
            Self::ModelStub => "table/model",
            Self::SchemaTables => "schema/tables",
            Self::SchemaEnums => "schema/enums",
            Self::SchemaTypes => "schema/types",
            Self::SchemaDts => "schema/dts",
            Self::RootTables => "root/tables",
            Self::RootTypes => "root/types",
            Self::Connect => "root/connect",
        }
    }
}

/// Per-file rendering options.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// When false, an existing file is left untouched; used for the
    /// hand-editable model stubs.
    pub overwrite: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { overwrite: true }
    }
}

/// Boundary to the external template-rendering engine.
///
/// The driver hands over `(path, template, context)` triples; what the
/// engine does with them is opaque to this crate. Failures abort the whole
/// batch; files already written by the same run are left as-is.
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn render_to_file(
        &self,
        path: &Path,
        template: Template,
        context: &Value,
        options: RenderOptions,
    ) -> Result<(), EmitError>;
}

/// One recorded render request.
#[derive(Debug, Clone)]
pub struct RenderCall {
    pub path: PathBuf,
    pub template: Template,
    pub context: Value,
    pub overwrite: bool,
}

/// Renderer that records every request instead of writing files. Backs the
/// emission tests and the CLI's plan output.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    calls: Mutex<Vec<RenderCall>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.lock().expect("renderer lock").clone()
    }
}

#[async_trait]
impl Renderer for RecordingRenderer {
    async fn render_to_file(
        &self,
        path: &Path,
        template: Template,
        context: &Value,
        options: RenderOptions,
    ) -> Result<(), EmitError> {
        self.calls.lock().expect("renderer lock").push(RenderCall {
            path: path.to_path_buf(),
            template,
            context: context.clone(),
            overwrite: options.overwrite,
        });
        Ok(())
    }
}
