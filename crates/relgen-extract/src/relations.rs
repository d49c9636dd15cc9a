use std::collections::BTreeMap;

use relgen_core::{
    ColumnDeclaration, CustomType, CustomTypeEntry, EnumDeclaration, FilterContext,
    ResolvedConfig, TableDeclaration, ViewDeclaration,
};
use relgen_introspect::{RawColumn, RawRelation};
use tracing::warn;

use crate::resolver::resolve_column_type;
use crate::typemap::UNKNOWN_TYPE;

/// Assemble table declarations for one schema.
pub fn assemble_tables(
    config: &ResolvedConfig,
    schema: &str,
    raw: &[RawRelation],
    enums: &[EnumDeclaration],
) -> Vec<TableDeclaration> {
    raw.iter()
        .filter_map(|table| {
            if !(config.table_filter)(&table.name, &FilterContext { schema }) {
                return None;
            }

            let declared_name = config.nominate_table(&table.name, schema);
            let columns = assemble_columns(config, schema, &table.name, &table.columns, enums);
            let primary_key = columns
                .iter()
                .find(|column| column.is_primary_key)
                .map(|column| column.name.clone());
            let regular_columns = columns
                .iter()
                .filter(|column| column.is_regular)
                .cloned()
                .collect();

            Some(TableDeclaration {
                schema: schema.to_string(),
                name: table.name.clone(),
                full_name: format!("{schema}.{}", table.name),
                model_name: config.nominate_model(&declared_name, schema),
                module_name: table.name.clone(),
                record_name: format!("{declared_name}{}", config.record_suffix),
                insert_name: format!("{declared_name}{}", config.insert_suffix),
                update_name: format!("{declared_name}{}", config.update_suffix),
                query_builder: format!("{declared_name}{}", config.query_builder_suffix),
                declared_name,
                primary_key,
                columns,
                regular_columns,
            })
        })
        .collect()
}

/// Assemble view declarations for one schema; regular views and
/// materialized views go through the same path.
pub fn assemble_views(
    config: &ResolvedConfig,
    schema: &str,
    raw: &[RawRelation],
    enums: &[EnumDeclaration],
) -> Vec<ViewDeclaration> {
    raw.iter()
        .filter_map(|view| {
            if !(config.view_filter)(&view.name, &FilterContext { schema }) {
                return None;
            }

            let declared_name = config.nominate_view(&view.name, schema);
            let columns = assemble_columns(config, schema, &view.name, &view.columns, enums);
            let primary_key = columns
                .iter()
                .find(|column| column.is_primary_key)
                .map(|column| column.name.clone());

            Some(ViewDeclaration {
                schema: schema.to_string(),
                name: view.name.clone(),
                full_name: format!("{schema}.{}", view.name),
                model_name: config.nominate_model(&declared_name, schema),
                module_name: view.name.clone(),
                record_name: format!("{declared_name}{}", config.view_suffix),
                query_builder: format!("{declared_name}{}", config.query_builder_suffix),
                declared_name,
                primary_key,
                columns,
            })
        })
        .collect()
}

/// Convert one relation's raw columns into column declarations.
pub fn assemble_columns(
    config: &ResolvedConfig,
    schema: &str,
    relation_name: &str,
    columns: &[RawColumn],
    enums: &[EnumDeclaration],
) -> Vec<ColumnDeclaration> {
    let full_name = format!("{schema}.{relation_name}");
    let table_custom_types = config
        .custom_types
        .get(&full_name)
        .and_then(CustomTypeEntry::as_table)
        .cloned()
        .unwrap_or_default();

    columns
        .iter()
        .map(|column| assemble_column(config, &full_name, &table_custom_types, column, enums))
        .collect()
}

fn assemble_column(
    config: &ResolvedConfig,
    table_full_name: &str,
    table_custom_types: &BTreeMap<String, CustomType>,
    column: &RawColumn,
    enums: &[EnumDeclaration],
) -> ColumnDeclaration {
    let resolved = resolve_column_type(
        column,
        table_full_name,
        &config.custom_types,
        table_custom_types,
        enums,
    );

    let has_default = column
        .default_value
        .as_deref()
        .is_some_and(|value| !value.is_empty());
    let is_generated = column.generated.is_some();

    if resolved.declared_type == UNKNOWN_TYPE {
        warn!(
            table = table_full_name,
            column = %column.name,
            raw_type = %column.type_full_name,
            "no resolution layer claimed this type; emitting the unknown sentinel"
        );
    }

    let comments = column_comments(column, &resolved.declared_type);

    ColumnDeclaration {
        type_name: column.type_full_name.clone(),
        kind: column.kind,
        name: column.name.clone(),
        is_primary_key: column.is_primary_key,
        is_identity: column.is_identity,
        is_nullable: resolved.is_nullable,
        is_array: resolved.is_array,
        is_generated,
        is_regular: !(column.is_primary_key || is_generated),
        default_value: column.default_value.clone(),
        declared_type: resolved.declared_type,
        imported_type: resolved.imported_type,
        comments,
        enum_ref: resolved.enum_ref,
        is_optional_on_insert: resolved.is_nullable || has_default,
        is_optional_on_update: true,
    }
}

// Annotation order is fixed; the emitted files must not reorder between
// runs.
fn column_comments(column: &RawColumn, declared_type: &str) -> Vec<String> {
    let mut comments = Vec::new();

    if column.is_primary_key {
        comments.push("PrimaryKey".to_string());
    }

    if let Some(default_value) = column
        .default_value
        .as_deref()
        .filter(|value| !value.is_empty())
    {
        comments.push(format!("Default Value: {default_value}"));
    }

    if declared_type == UNKNOWN_TYPE {
        comments.push(format!("Unknown Type: {}", column.type_full_name));
    }

    if let Some(generated) = &column.generated {
        comments.push(format!("Generated: {generated}"));
        comments.push(format!("{}: {declared_type};", column.name));
    }

    if let Some(comment) = &column.comment {
        comments.push(comment.clone());
    }

    comments
}

#[cfg(test)]
mod tests {
    use super::*;
    use relgen_core::{ColumnKind, Config};

    fn config() -> ResolvedConfig {
        Config {
            base_dir: "db".to_string(),
            lib_dir: "lib".to_string(),
            ..Config::default()
        }
        .resolve()
        .expect("resolve config")
    }

    fn users_table() -> RawRelation {
        RawRelation {
            name: "user_accounts".to_string(),
            columns: vec![
                RawColumn {
                    name: "id".to_string(),
                    type_full_name: "int4".to_string(),
                    kind: ColumnKind::Base,
                    is_primary_key: true,
                    is_identity: true,
                    ..RawColumn::default()
                },
                RawColumn {
                    name: "email".to_string(),
                    type_full_name: "text".to_string(),
                    kind: ColumnKind::Base,
                    ..RawColumn::default()
                },
                RawColumn {
                    name: "search".to_string(),
                    type_full_name: "tsvector".to_string(),
                    kind: ColumnKind::Base,
                    generated: Some("ALWAYS (to_tsvector(email))".to_string()),
                    ..RawColumn::default()
                },
            ],
        }
    }

    #[test]
    fn derives_names_from_suffixes() {
        let tables = assemble_tables(&config(), "public", &[users_table()], &[]);
        let table = &tables[0];
        assert_eq!(table.declared_name, "UserAccounts");
        assert_eq!(table.record_name, "UserAccountsT");
        assert_eq!(table.insert_name, "UserAccountsI");
        assert_eq!(table.update_name, "UserAccountsU");
        assert_eq!(table.query_builder, "UserAccountsQ");
        assert_eq!(table.full_name, "public.user_accounts");
        assert_eq!(table.module_name, "user_accounts");
        assert_eq!(table.primary_key.as_deref(), Some("id"));
    }

    #[test]
    fn regular_columns_exclude_keys_and_generated() {
        let tables = assemble_tables(&config(), "public", &[users_table()], &[]);
        let table = &tables[0];
        let regular: Vec<_> = table
            .regular_columns
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(regular, vec!["email"]);

        for column in &table.columns {
            assert_eq!(
                column.is_regular,
                !(column.is_primary_key || column.is_generated)
            );
        }
    }

    #[test]
    fn plain_base_column_has_no_comments() {
        let tables = assemble_tables(&config(), "public", &[users_table()], &[]);
        let email = &tables[0].columns[1];
        assert_eq!(email.declared_type, "string");
        assert!(email.comments.is_empty());
    }

    #[test]
    fn comments_follow_the_fixed_order() {
        let raw = RawColumn {
            name: "search".to_string(),
            type_full_name: "tsvector".to_string(),
            kind: ColumnKind::Base,
            is_primary_key: true,
            default_value: Some("''".to_string()),
            generated: Some("ALWAYS (to_tsvector(body))".to_string()),
            comment: Some("full text index".to_string()),
            ..RawColumn::default()
        };
        let columns = assemble_columns(&config(), "public", "posts", &[raw], &[]);
        assert_eq!(
            columns[0].comments,
            vec![
                "PrimaryKey".to_string(),
                "Default Value: ''".to_string(),
                "Unknown Type: tsvector".to_string(),
                "Generated: ALWAYS (to_tsvector(body))".to_string(),
                "search: unknown;".to_string(),
                "full text index".to_string(),
            ]
        );
    }

    #[test]
    fn optionality_tracks_nullability_and_defaults() {
        let raw = vec![
            RawColumn {
                name: "created_at".to_string(),
                type_full_name: "timestamptz".to_string(),
                kind: ColumnKind::Base,
                default_value: Some("now()".to_string()),
                ..RawColumn::default()
            },
            RawColumn {
                name: "note".to_string(),
                type_full_name: "text".to_string(),
                kind: ColumnKind::Base,
                is_nullable: true,
                ..RawColumn::default()
            },
            RawColumn {
                name: "amount".to_string(),
                type_full_name: "int4".to_string(),
                kind: ColumnKind::Base,
                ..RawColumn::default()
            },
        ];
        let columns = assemble_columns(&config(), "public", "orders", &raw, &[]);
        assert!(columns[0].is_optional_on_insert);
        assert!(columns[1].is_optional_on_insert);
        assert!(!columns[2].is_optional_on_insert);
        assert!(columns.iter().all(|c| c.is_optional_on_update));
    }

    #[test]
    fn views_use_the_view_suffix_for_records() {
        let view = RawRelation {
            name: "active_users".to_string(),
            columns: Vec::new(),
        };
        let views = assemble_views(&config(), "public", &[view], &[]);
        assert_eq!(views[0].declared_name, "ActiveUsers");
        assert_eq!(views[0].record_name, "ActiveUsersV");
        assert_eq!(views[0].query_builder, "ActiveUsersQ");
    }

    #[test]
    fn filtered_tables_disappear_with_their_columns() {
        let config = config().with_table_filter(Box::new(|name, _| name != "user_accounts"));
        let tables = assemble_tables(&config, "public", &[users_table()], &[]);
        assert!(tables.is_empty());
    }
}
