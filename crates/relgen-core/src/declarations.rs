use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::hash::hash_token;

/// A raw enum label classified as numeric or textual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum EnumLiteral {
    Number(f64),
    Text(String),
}

impl EnumLiteral {
    /// Classify a raw catalog label: labels that parse as a finite number
    /// stay numeric, everything else is kept as text.
    pub fn classify(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Self::Number(n),
            _ => Self::Text(raw.to_string()),
        }
    }

    /// Identifier-safe key for this literal. Numeric literals are prefixed
    /// with `_` so they form a valid identifier.
    pub fn key(&self) -> String {
        match self {
            Self::Number(n) => format!("_{}", format_number(*n)),
            Self::Text(s) => s.clone(),
        }
    }

    /// Source-literal form: numbers verbatim, text as a quoted string.
    pub fn literal(&self) -> String {
        match self {
            Self::Number(n) => format_number(*n),
            Self::Text(s) => serde_json::to_string(s).unwrap_or_else(|_| format!("{s:?}")),
        }
    }
}

// Integral values print without a trailing `.0` so hash inputs and emitted
// literals stay independent of float formatting.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 9e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// One key/value pair of a normalized enum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EnumValue {
    pub key: String,
    pub val: EnumLiteral,
}

/// Normalized description of one catalog enum type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EnumDeclaration {
    pub schema: String,
    pub name: String,
    /// Display name produced by the enum nominator.
    pub declared_name: String,
    pub values: Vec<EnumLiteral>,
    pub enum_values: Vec<EnumValue>,
    /// Suffix templates append to the declared name.
    pub enum_suffix: String,
    /// `declared_name` plus a checksum of `(schema, declared_name, values)`.
    /// Two enums with the same display name in different schemas, or whose
    /// value set changed, never collide.
    pub hashed_name: String,
}

impl EnumDeclaration {
    /// Compute the collision-resistant name for an enum.
    pub fn hashed_name_for(schema: &str, declared_name: &str, values: &[EnumLiteral]) -> String {
        let serialized = format!(
            "[{}]",
            values
                .iter()
                .map(EnumLiteral::literal)
                .collect::<Vec<_>>()
                .join(",")
        );
        format!(
            "{declared_name}{}",
            hash_token(&[schema, declared_name, &serialized])
        )
    }
}

/// Catalog type kind of a column, as reported by `pg_type.typtype`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Base,
    Range,
    Domain,
    Composite,
    Enum,
}

/// Key of an enum declaration, stored on columns instead of an owning
/// reference; enums are owned by the extracted schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EnumRef {
    pub schema: String,
    pub name: String,
}

/// An imported-type directive resolved for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ImportedTypeRef {
    pub import: String,
    pub from: String,
    /// Collision-free alias: `import` plus a checksum of
    /// `(table full name, column name, from)`.
    pub alias: String,
    pub is_array: bool,
    pub is_nullable: bool,
}

/// Normalized description of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnDeclaration {
    /// Raw catalog type name (`int4`, `public.mood`, ...). Serialized as
    /// `type` in snapshots and render contexts.
    #[serde(rename = "type")]
    pub type_name: String,
    pub kind: ColumnKind,
    pub name: String,
    pub is_primary_key: bool,
    pub is_identity: bool,
    pub is_nullable: bool,
    pub is_array: bool,
    pub is_generated: bool,
    /// `!(is_primary_key || is_generated)`.
    pub is_regular: bool,
    pub default_value: Option<String>,
    /// Emitted type after the full resolution chain, array-wrapped at most
    /// once.
    pub declared_type: String,
    pub imported_type: Option<ImportedTypeRef>,
    /// Human-readable annotations in a fixed, stable order.
    pub comments: Vec<String>,
    pub enum_ref: Option<EnumRef>,
    /// `is_nullable || default_value present`.
    pub is_optional_on_insert: bool,
    /// Always true: updates never require any particular column.
    pub is_optional_on_update: bool,
}

/// Normalized description of one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TableDeclaration {
    pub schema: String,
    pub name: String,
    /// `schema.name`.
    pub full_name: String,
    pub model_name: String,
    pub module_name: String,
    pub declared_name: String,
    pub record_name: String,
    pub insert_name: String,
    pub update_name: String,
    pub query_builder: String,
    /// Name of the first primary-key column, when one exists.
    pub primary_key: Option<String>,
    pub columns: Vec<ColumnDeclaration>,
    /// Subset of `columns` where `is_regular`.
    pub regular_columns: Vec<ColumnDeclaration>,
}

/// Normalized description of one view or materialized view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ViewDeclaration {
    pub schema: String,
    pub name: String,
    pub full_name: String,
    pub model_name: String,
    pub module_name: String,
    pub declared_name: String,
    pub record_name: String,
    pub query_builder: String,
    pub primary_key: Option<String>,
    pub columns: Vec<ColumnDeclaration>,
}

/// Root aggregate handed to the emission driver.
///
/// A pure value: built once per invocation, fully sorted, never mutated.
/// Compiling the same catalog with the same configuration twice reproduces
/// it byte-for-byte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExtractedSchema {
    pub schemas: Vec<String>,
    pub tables: Vec<TableDeclaration>,
    pub enums: Vec<EnumDeclaration>,
    pub views: Vec<ViewDeclaration>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_numeric_and_text_labels() {
        assert_eq!(EnumLiteral::classify("2"), EnumLiteral::Number(2.0));
        assert_eq!(EnumLiteral::classify("2.5"), EnumLiteral::Number(2.5));
        assert_eq!(
            EnumLiteral::classify("sad"),
            EnumLiteral::Text("sad".to_string())
        );
        assert_eq!(
            EnumLiteral::classify("NaN"),
            EnumLiteral::Text("NaN".to_string())
        );
    }

    #[test]
    fn numeric_keys_get_identifier_prefix() {
        assert_eq!(EnumLiteral::Number(1.0).key(), "_1");
        assert_eq!(EnumLiteral::Text("ok".to_string()).key(), "ok");
    }

    #[test]
    fn literals_render_for_source_output() {
        assert_eq!(EnumLiteral::Number(3.0).literal(), "3");
        assert_eq!(EnumLiteral::Number(2.5).literal(), "2.5");
        assert_eq!(EnumLiteral::Text("ok".to_string()).literal(), "\"ok\"");
    }

    #[test]
    fn hashed_name_is_stable_and_sensitive() {
        let values = vec![
            EnumLiteral::Text("sad".to_string()),
            EnumLiteral::Text("ok".to_string()),
        ];
        let a = EnumDeclaration::hashed_name_for("public", "Mood", &values);
        let b = EnumDeclaration::hashed_name_for("public", "Mood", &values);
        assert_eq!(a, b);
        assert!(a.starts_with("Mood"));

        let other_schema = EnumDeclaration::hashed_name_for("audit", "Mood", &values);
        assert_ne!(a, other_schema);

        let mut grown = values.clone();
        grown.push(EnumLiteral::Text("happy".to_string()));
        assert_ne!(a, EnumDeclaration::hashed_name_for("public", "Mood", &grown));
    }
}
