use relgen_core::ColumnKind;

/// Raw metadata for one schema, exactly as read from the catalog.
#[derive(Debug, Clone, Default)]
pub struct RawSchema {
    pub name: String,
    pub enums: Vec<RawEnum>,
    pub tables: Vec<RawRelation>,
    pub views: Vec<RawRelation>,
    pub materialized_views: Vec<RawRelation>,
}

/// Raw enum type with its labels in sort order.
#[derive(Debug, Clone)]
pub struct RawEnum {
    pub name: String,
    pub values: Vec<String>,
}

/// Raw table, view, or materialized view.
#[derive(Debug, Clone, Default)]
pub struct RawRelation {
    pub name: String,
    pub columns: Vec<RawColumn>,
}

/// Raw column descriptor.
#[derive(Debug, Clone)]
pub struct RawColumn {
    pub name: String,
    /// Full type name: `schema.name` for user-defined types, the bare udt
    /// name (e.g. `int4`) for built-in types. For arrays this names the
    /// element type.
    pub type_full_name: String,
    pub kind: ColumnKind,
    pub is_primary_key: bool,
    pub is_identity: bool,
    pub is_nullable: bool,
    pub is_array: bool,
    /// Generation descriptor for generated columns (`ALWAYS`, optionally
    /// with the generation expression); `None` for plain columns.
    pub generated: Option<String>,
    pub default_value: Option<String>,
    pub comment: Option<String>,
    pub max_length: Option<i32>,
}

impl Default for RawColumn {
    fn default() -> Self {
        Self {
            name: String::new(),
            type_full_name: String::new(),
            kind: ColumnKind::Base,
            is_primary_key: false,
            is_identity: false,
            is_nullable: false,
            is_array: false,
            generated: None,
            default_value: None,
            comment: None,
            max_length: None,
        }
    }
}
