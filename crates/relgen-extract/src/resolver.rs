use std::collections::BTreeMap;

use relgen_core::{
    hash_token, ColumnKind, CustomType, CustomTypeEntry, CustomTypes, EnumDeclaration, EnumRef,
    ImportedTypeRef,
};
use relgen_introspect::RawColumn;

use crate::typemap::{base_type, UNKNOWN_TYPE};

/// Outcome of running one column through the resolution chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedType {
    pub declared_type: String,
    pub imported_type: Option<ImportedTypeRef>,
    pub enum_ref: Option<EnumRef>,
    pub is_array: bool,
    pub is_nullable: bool,
}

/// Resolve the emitted type for one column.
///
/// Layers apply in a fixed order, each overriding the previous: enum lookup,
/// built-in base map, custom type keyed by the raw type name, custom type
/// keyed by table and column. The array wrapper is applied exactly once,
/// after every layer has run. A column no layer claims resolves to the
/// `unknown` sentinel; that is a soft failure, not an error.
pub fn resolve_column_type(
    column: &RawColumn,
    table_full_name: &str,
    custom_types: &CustomTypes,
    table_custom_types: &BTreeMap<String, CustomType>,
    enums: &[EnumDeclaration],
) -> ResolvedType {
    let mut declared_type = UNKNOWN_TYPE.to_string();
    let mut imported_type = None;
    let mut enum_ref = None;
    let mut is_array = column.is_array;
    let mut is_nullable = column.is_nullable;

    if column.kind == ColumnKind::Enum {
        if let Some((schema, name)) = column.type_full_name.split_once('.') {
            if let Some(declaration) = enums
                .iter()
                .find(|e| e.schema == schema && e.name == name)
            {
                declared_type = declaration.hashed_name.clone();
                enum_ref = Some(EnumRef {
                    schema: declaration.schema.clone(),
                    name: declaration.name.clone(),
                });
            }
        }
    }

    if let Some(mapped) = base_type(&column.type_full_name) {
        declared_type = mapped.to_string();
    }

    let by_type = custom_types
        .get(&column.type_full_name)
        .and_then(CustomTypeEntry::as_scalar);
    let by_column = table_custom_types.get(&column.name);

    // last applied wins: the table+column entry overrides the type entry
    for custom in [by_type, by_column].into_iter().flatten() {
        match custom {
            CustomType::Literal(replacement) => {
                declared_type = replacement.clone();
            }
            CustomType::Imported(directive) => {
                let alias = format!(
                    "{}{}",
                    directive.import,
                    hash_token(&[table_full_name, &column.name, &directive.from])
                );
                if directive.is_array == Some(true) {
                    is_array = true;
                }
                if directive.is_nullable == Some(true) {
                    is_nullable = true;
                }
                declared_type = alias.clone();
                imported_type = Some(ImportedTypeRef {
                    import: directive.import.clone(),
                    from: directive.from.clone(),
                    alias,
                    is_array: directive.is_array.unwrap_or(false),
                    is_nullable: directive.is_nullable.unwrap_or(false),
                });
            }
        }
    }

    if is_array {
        declared_type = format!("Array<{declared_type}>");
    }

    ResolvedType {
        declared_type,
        imported_type,
        enum_ref,
        is_array,
        is_nullable,
    }
}
