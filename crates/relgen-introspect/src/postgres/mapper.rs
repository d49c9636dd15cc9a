use relgen_core::ColumnKind;

use crate::options::IntrospectOptions;
use crate::raw::{RawColumn, RawEnum};

use super::queries::{RawColumnRow, RawEnumRow};

pub fn filter_schemas(raw: Vec<String>, opts: &IntrospectOptions) -> Vec<String> {
    raw.into_iter()
        .filter(|schema| {
            let is_system = schema.starts_with("pg_") || schema == "information_schema";
            match &opts.schemas {
                Some(list) => list.iter().any(|item| item == schema),
                None => !is_system,
            }
        })
        .collect()
}

/// Fold per-label rows (already ordered by name, then sort order) into one
/// entry per enum type.
pub fn group_enum_labels(rows: Vec<RawEnumRow>) -> Vec<RawEnum> {
    let mut enums: Vec<RawEnum> = Vec::new();

    for row in rows {
        match enums.last_mut() {
            Some(entry) if entry.name == row.name => entry.values.push(row.label),
            _ => enums.push(RawEnum {
                name: row.name,
                values: vec![row.label],
            }),
        }
    }

    enums
}

pub fn map_columns(rows: Vec<RawColumnRow>, opts: &IntrospectOptions) -> Vec<RawColumn> {
    rows.into_iter()
        .map(|row| {
            let type_full_name = if row.type_schema == "pg_catalog" {
                row.type_name
            } else {
                format!("{}.{}", row.type_schema, row.type_name)
            };

            // pg_attrdef holds the generation expression for generated
            // columns and the default for everything else.
            let (generated, default_value) = if row.is_generated {
                let descriptor = match &row.expression {
                    Some(expression) => format!("ALWAYS ({expression})"),
                    None => "ALWAYS".to_string(),
                };
                (Some(descriptor), None)
            } else {
                (None, row.expression)
            };

            RawColumn {
                name: row.name,
                type_full_name,
                kind: kind_from_typtype(&row.type_kind),
                is_primary_key: row.is_primary_key,
                is_identity: row.is_identity,
                is_nullable: row.is_nullable,
                is_array: row.is_array,
                generated,
                default_value,
                comment: if opts.include_comments {
                    row.comment
                } else {
                    None
                },
                max_length: row.max_length,
            }
        })
        .collect()
}

fn kind_from_typtype(typtype: &str) -> ColumnKind {
    match typtype {
        "r" | "m" => ColumnKind::Range,
        "d" => ColumnKind::Domain,
        "c" => ColumnKind::Composite,
        "e" => ColumnKind::Enum,
        _ => ColumnKind::Base,
    }
}
