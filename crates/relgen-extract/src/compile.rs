use tracing::info;

use relgen_core::{ExtractedSchema, ResolvedConfig};
use relgen_introspect::RawSchema;

use crate::enums::normalize_enums;
use crate::relations::{assemble_tables, assemble_views};

/// Compile raw catalog metadata into the normalized declaration model.
///
/// Two sequential passes: enums for every schema first (columns may
/// reference enums from any schema), then tables and views against the
/// complete enum list. Everything is sorted with ordinal comparisons so two
/// runs over the same catalog reproduce the result byte-for-byte.
pub fn extract_schema(raw: &[RawSchema], config: &ResolvedConfig) -> ExtractedSchema {
    let mut enums = Vec::new();
    for schema in raw {
        enums.extend(normalize_enums(config, &schema.name, &schema.enums));
    }

    let mut tables = Vec::new();
    let mut views = Vec::new();
    for schema in raw {
        tables.extend(assemble_tables(config, &schema.name, &schema.tables, &enums));
        views.extend(assemble_views(config, &schema.name, &schema.views, &enums));
        views.extend(assemble_views(
            config,
            &schema.name,
            &schema.materialized_views,
            &enums,
        ));
    }

    let mut schemas: Vec<String> = raw.iter().map(|schema| schema.name.clone()).collect();
    schemas.sort();
    tables.sort_by(|left, right| left.name.cmp(&right.name));
    enums.sort_by(|left, right| left.name.cmp(&right.name));
    views.sort_by(|left, right| left.name.cmp(&right.name));

    info!(
        schemas = schemas.len(),
        tables = tables.len(),
        enums = enums.len(),
        views = views.len(),
        "schema extracted"
    );

    ExtractedSchema {
        schemas,
        tables,
        enums,
        views,
    }
}
