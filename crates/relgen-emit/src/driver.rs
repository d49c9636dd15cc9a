use std::path::Path;

use serde_json::{json, Value};
use tracing::{debug, info};

use relgen_core::{
    ColumnDeclaration, EnumDeclaration, ExtractedSchema, ResolvedConfig, SCHEMA_VERSION,
};

use crate::errors::EmitError;
use crate::renderer::{RenderOptions, Renderer, Template};

/// Summary of one emission run.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmitReport {
    /// Render requests handed to the renderer.
    pub files: usize,
    /// `schema.json` snapshots written directly by the driver.
    pub snapshots: usize,
}

/// Drive the renderer over a compiled schema.
///
/// Every output file's context derives independently from the immutable
/// schema value; the batch is all-or-nothing and nothing is retried. Model
/// stubs are the one exception to regeneration: they are rendered with
/// `overwrite: false` so hand edits survive.
pub async fn emit_schema(
    root: &Path,
    config: &ResolvedConfig,
    schema: &ExtractedSchema,
    renderer: &dyn Renderer,
) -> Result<EmitReport, EmitError> {
    let lib_subdir = config.effective_lib_subdir();
    let lib_root = root.join(&config.lib_dir).join(lib_subdir);
    let lib_import = if config.lib_subdir.is_some() {
        format!("{}/{lib_subdir}", config.app_prefix)
    } else {
        format!("{}/{}/{lib_subdir}", config.app_prefix, config.lib_dir)
    };

    let mut report = EmitReport::default();

    for relation in relation_contexts(schema)? {
        let context = json!({
            "table": relation.value,
            "enums": related_enums(relation.columns, &schema.enums),
            "import_pathmap": { "lib_dir": lib_import },
        });

        let module_dir = lib_root.join(relation.schema).join(relation.name);
        for (template, outfile) in [
            (Template::TableIndex, "index.ts"),
            (Template::TableTypes, "types.ts"),
        ] {
            renderer
                .render_to_file(
                    &module_dir.join(outfile),
                    template,
                    &context,
                    RenderOptions::default(),
                )
                .await?;
            report.files += 1;
        }

        let stub_path = root
            .join(&config.base_dir)
            .join(relation.schema)
            .join(format!("{}.ts", relation.name));
        renderer
            .render_to_file(
                &stub_path,
                Template::ModelStub,
                &context,
                RenderOptions { overwrite: false },
            )
            .await?;
        report.files += 1;

        debug!(schema = relation.schema, name = relation.name, "relation emitted");
    }

    for schema_name in &schema.schemas {
        let enums: Vec<_> = schema.enums.iter().filter(|e| &e.schema == schema_name).collect();
        let tables: Vec<_> = schema.tables.iter().filter(|t| &t.schema == schema_name).collect();
        let views: Vec<_> = schema.views.iter().filter(|v| &v.schema == schema_name).collect();

        let schema_dir = lib_root.join(schema_name);
        let context = json!({
            "enums": &enums,
            "tables": &tables,
            "views": &views,
            "import_pathmap": {
                "base": format!("{}/{}", config.app_prefix, config.base_dir),
            },
        });

        for (template, outfile) in [
            (Template::SchemaTables, "tables.ts"),
            (Template::SchemaEnums, "enums.ts"),
            (Template::SchemaTypes, "types.ts"),
            (Template::SchemaDts, "db.d.ts"),
        ] {
            renderer
                .render_to_file(
                    &schema_dir.join(outfile),
                    template,
                    &context,
                    RenderOptions::default(),
                )
                .await?;
            report.files += 1;
        }

        let snapshot = json!({
            "version": SCHEMA_VERSION,
            "schema": schema_name,
            "enums": &enums,
            "tables": &tables,
            "views": &views,
        });
        write_snapshot(&schema_dir.join("schema.json"), &snapshot).await?;
        report.snapshots += 1;
    }

    let connect_import = config
        .connect_file
        .strip_suffix(".ts")
        .unwrap_or(&config.connect_file);
    let root_context = json!({
        "default_schema": config.default_schema,
        "import_pathmap": {
            "connect_file": format!("{}/{connect_import}", config.app_prefix),
        },
    });
    for (template, outfile) in [
        (Template::RootTables, "tables.ts"),
        (Template::RootTypes, "types.ts"),
        (Template::Connect, "connect.ts"),
    ] {
        renderer
            .render_to_file(
                &lib_root.join(outfile),
                template,
                &root_context,
                RenderOptions::default(),
            )
            .await?;
        report.files += 1;
    }

    info!(
        files = report.files,
        snapshots = report.snapshots,
        "emission complete"
    );

    Ok(report)
}

struct RelationContext<'a> {
    schema: &'a str,
    name: &'a str,
    columns: &'a [ColumnDeclaration],
    value: Value,
}

// Tables and views share the per-relation file plan; tables additionally
// carry an `is_table` marker for the templates.
fn relation_contexts(schema: &ExtractedSchema) -> Result<Vec<RelationContext<'_>>, EmitError> {
    let mut relations = Vec::with_capacity(schema.tables.len() + schema.views.len());

    for table in &schema.tables {
        let mut value = serde_json::to_value(table)?;
        value["is_table"] = Value::Bool(true);
        relations.push(RelationContext {
            schema: &table.schema,
            name: &table.name,
            columns: &table.columns,
            value,
        });
    }

    for view in &schema.views {
        relations.push(RelationContext {
            schema: &view.schema,
            name: &view.name,
            columns: &view.columns,
            value: serde_json::to_value(view)?,
        });
    }

    Ok(relations)
}

/// Enums referenced by a relation's columns, de-duplicated by name, order
/// of first appearance preserved.
fn related_enums<'a>(
    columns: &[ColumnDeclaration],
    enums: &'a [EnumDeclaration],
) -> Vec<&'a EnumDeclaration> {
    let mut related: Vec<&EnumDeclaration> = Vec::new();

    for column in columns {
        let Some(enum_ref) = &column.enum_ref else {
            continue;
        };
        let Some(declaration) = enums
            .iter()
            .find(|e| e.schema == enum_ref.schema && e.name == enum_ref.name)
        else {
            continue;
        };
        if !related.iter().any(|e| e.name == declaration.name) {
            related.push(declaration);
        }
    }

    related
}

async fn write_snapshot(path: &Path, snapshot: &Value) -> Result<(), EmitError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, serde_json::to_vec_pretty(snapshot)?).await?;
    Ok(())
}
