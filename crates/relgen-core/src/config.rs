use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::names::{default_entity_name, default_enum_name, default_model_name};

/// Database clients the extractor accepts. Anything else is a fatal
/// configuration error raised before the catalog is touched.
pub const SUPPORTED_CLIENTS: &[&str] = &["pg", "pgnative", "postgres"];

/// Custom-type directive that pulls a named symbol from another module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedType {
    pub import: String,
    pub from: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_array: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_nullable: Option<bool>,
}

/// A single custom-type override: either a literal replacement type name or
/// an imported-type directive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomType {
    // tried before Literal so `{import, from}` maps never parse as strings
    Imported(ImportedType),
    Literal(String),
}

/// One entry of the `custom_types` map. Keys are either raw type full names
/// (scalar entries) or `schema.table` full names (nested per-column maps).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomTypeEntry {
    Scalar(CustomType),
    Table(BTreeMap<String, CustomType>),
}

impl CustomTypeEntry {
    /// The entry as a plain override, if it is not a per-table map.
    pub fn as_scalar(&self) -> Option<&CustomType> {
        match self {
            Self::Scalar(custom) => Some(custom),
            Self::Table(_) => None,
        }
    }

    /// The entry as a per-column map, if it is one.
    pub fn as_table(&self) -> Option<&BTreeMap<String, CustomType>> {
        match self {
            Self::Scalar(_) => None,
            Self::Table(map) => Some(map),
        }
    }
}

/// User-supplied custom-type overrides.
pub type CustomTypes = BTreeMap<String, CustomTypeEntry>;

/// Context handed to inclusion filters.
#[derive(Debug, Clone, Copy)]
pub struct FilterContext<'a> {
    pub schema: &'a str,
}

/// Context handed to nominators.
pub struct NominatorContext<'a> {
    pub schema: &'a str,
    pub default_nominator: fn(&str) -> String,
}

/// Predicate deciding whether an entity is included in the compiled schema.
pub type EntityFilter = Box<dyn Fn(&str, &FilterContext<'_>) -> bool + Send + Sync>;

/// Naming transform mapping a raw catalog name to a declared identifier.
pub type EntityNominator = Box<dyn Fn(&str, &NominatorContext<'_>) -> String + Send + Sync>;

/// Declarative configuration, as loaded from `relgen.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory for hand-editable model stubs. Required.
    pub base_dir: String,
    /// Directory for generated library files. Required.
    pub lib_dir: String,
    /// Optional override for the library subdirectory; defaults to
    /// `base_dir`, which also changes how import paths are built.
    pub lib_subdir: Option<String>,
    pub app_prefix: Option<String>,
    pub connect_file: Option<String>,
    /// Schemas to extract; empty means every non-system schema.
    pub schemas: Vec<String>,
    pub default_schema: Option<String>,
    pub custom_types: CustomTypes,
    pub record_suffix: Option<String>,
    pub insert_suffix: Option<String>,
    pub update_suffix: Option<String>,
    pub enum_suffix: Option<String>,
    pub view_suffix: Option<String>,
    pub query_builder_suffix: Option<String>,
}

impl Config {
    /// Validate required keys and attach the default strategy layer.
    pub fn resolve(self) -> Result<ResolvedConfig> {
        if self.base_dir.trim().is_empty() {
            return Err(Error::Config("missing required key: base_dir".to_string()));
        }
        if self.lib_dir.trim().is_empty() {
            return Err(Error::Config("missing required key: lib_dir".to_string()));
        }

        Ok(ResolvedConfig {
            base_dir: self.base_dir,
            lib_dir: self.lib_dir,
            lib_subdir: self.lib_subdir,
            app_prefix: self.app_prefix.unwrap_or_else(|| "@".to_string()),
            connect_file: self
                .connect_file
                .unwrap_or_else(|| "config/connect.ts".to_string()),
            schemas: self.schemas,
            default_schema: self.default_schema.unwrap_or_else(|| "public".to_string()),
            custom_types: self.custom_types,
            record_suffix: self.record_suffix.unwrap_or_else(|| "T".to_string()),
            insert_suffix: self.insert_suffix.unwrap_or_else(|| "I".to_string()),
            update_suffix: self.update_suffix.unwrap_or_else(|| "U".to_string()),
            enum_suffix: self.enum_suffix.unwrap_or_else(|| "E".to_string()),
            view_suffix: self.view_suffix.unwrap_or_else(|| "V".to_string()),
            query_builder_suffix: self
                .query_builder_suffix
                .unwrap_or_else(|| "Q".to_string()),
            table_filter: Box::new(|_, _| true),
            table_nominator: default_nominator(),
            enum_filter: Box::new(|_, _| true),
            enum_nominator: default_nominator(),
            view_filter: Box::new(|_, _| true),
            view_nominator: default_nominator(),
            model_nominator: Box::new(|name, _| default_model_name(name)),
        })
    }
}

fn default_nominator() -> EntityNominator {
    Box::new(|name, ctx| (ctx.default_nominator)(name))
}

/// Fully resolved configuration, strategies included. Built once per run.
pub struct ResolvedConfig {
    pub base_dir: String,
    pub lib_dir: String,
    pub lib_subdir: Option<String>,
    pub app_prefix: String,
    pub connect_file: String,
    pub schemas: Vec<String>,
    pub default_schema: String,
    pub custom_types: CustomTypes,
    pub record_suffix: String,
    pub insert_suffix: String,
    pub update_suffix: String,
    pub enum_suffix: String,
    pub view_suffix: String,
    pub query_builder_suffix: String,
    pub table_filter: EntityFilter,
    pub table_nominator: EntityNominator,
    pub enum_filter: EntityFilter,
    pub enum_nominator: EntityNominator,
    pub view_filter: EntityFilter,
    pub view_nominator: EntityNominator,
    pub model_nominator: EntityNominator,
}

impl std::fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("base_dir", &self.base_dir)
            .field("lib_dir", &self.lib_dir)
            .field("lib_subdir", &self.lib_subdir)
            .field("app_prefix", &self.app_prefix)
            .field("connect_file", &self.connect_file)
            .field("schemas", &self.schemas)
            .field("default_schema", &self.default_schema)
            .field("custom_types", &self.custom_types)
            .field("record_suffix", &self.record_suffix)
            .field("insert_suffix", &self.insert_suffix)
            .field("update_suffix", &self.update_suffix)
            .field("enum_suffix", &self.enum_suffix)
            .field("view_suffix", &self.view_suffix)
            .field("query_builder_suffix", &self.query_builder_suffix)
            .finish_non_exhaustive()
    }
}

impl ResolvedConfig {
    pub fn with_table_filter(mut self, filter: EntityFilter) -> Self {
        self.table_filter = filter;
        self
    }

    pub fn with_table_nominator(mut self, nominator: EntityNominator) -> Self {
        self.table_nominator = nominator;
        self
    }

    pub fn with_enum_filter(mut self, filter: EntityFilter) -> Self {
        self.enum_filter = filter;
        self
    }

    pub fn with_enum_nominator(mut self, nominator: EntityNominator) -> Self {
        self.enum_nominator = nominator;
        self
    }

    pub fn with_view_filter(mut self, filter: EntityFilter) -> Self {
        self.view_filter = filter;
        self
    }

    pub fn with_view_nominator(mut self, nominator: EntityNominator) -> Self {
        self.view_nominator = nominator;
        self
    }

    pub fn with_model_nominator(mut self, nominator: EntityNominator) -> Self {
        self.model_nominator = nominator;
        self
    }

    pub fn nominate_table(&self, name: &str, schema: &str) -> String {
        nominate(&self.table_nominator, name, schema, default_entity_name)
    }

    pub fn nominate_enum(&self, name: &str, schema: &str) -> String {
        nominate(&self.enum_nominator, name, schema, default_enum_name)
    }

    pub fn nominate_view(&self, name: &str, schema: &str) -> String {
        nominate(&self.view_nominator, name, schema, default_entity_name)
    }

    pub fn nominate_model(&self, declared_name: &str, schema: &str) -> String {
        nominate(&self.model_nominator, declared_name, schema, default_model_name)
    }

    /// Effective library subdirectory: the configured one, or `base_dir`.
    pub fn effective_lib_subdir(&self) -> &str {
        self.lib_subdir.as_deref().unwrap_or(&self.base_dir)
    }
}

// A nominator that returns nothing usable falls back to the entity kind's
// default transform rather than producing an empty identifier.
fn nominate(
    nominator: &EntityNominator,
    name: &str,
    schema: &str,
    default: fn(&str) -> String,
) -> String {
    let ctx = NominatorContext {
        schema,
        default_nominator: default,
    };
    let declared = nominator(name, &ctx);
    if declared.trim().is_empty() {
        default(name)
    } else {
        declared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> Config {
        Config {
            base_dir: "db".to_string(),
            lib_dir: "lib".to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn missing_required_keys_are_config_errors() {
        let err = Config::default().resolve().unwrap_err();
        assert!(err.to_string().contains("base_dir"));

        let err = Config {
            base_dir: "db".to_string(),
            ..Config::default()
        }
        .resolve()
        .unwrap_err();
        assert!(err.to_string().contains("lib_dir"));
    }

    #[test]
    fn defaults_match_the_documented_table() {
        let config = minimal().resolve().expect("resolve");
        assert_eq!(config.app_prefix, "@");
        assert_eq!(config.default_schema, "public");
        assert_eq!(config.record_suffix, "T");
        assert_eq!(config.insert_suffix, "I");
        assert_eq!(config.update_suffix, "U");
        assert_eq!(config.enum_suffix, "E");
        assert_eq!(config.view_suffix, "V");
        assert_eq!(config.query_builder_suffix, "Q");
        assert_eq!(config.effective_lib_subdir(), "db");
    }

    #[test]
    fn default_enum_nominator_keeps_the_raw_leading_case() {
        let config = minimal().resolve().expect("resolve");
        assert_eq!(config.nominate_enum("mood", "public"), "mood");
        assert_eq!(config.nominate_enum("order_status", "public"), "orderStatus");
        assert_eq!(config.nominate_table("mood", "public"), "Mood");
    }

    #[test]
    fn blank_nominator_output_falls_back_to_default() {
        let config = minimal()
            .resolve()
            .expect("resolve")
            .with_table_nominator(Box::new(|_, _| "  ".to_string()));
        assert_eq!(config.nominate_table("user_accounts", "public"), "UserAccounts");
    }

    #[test]
    fn custom_types_parse_as_tagged_union() {
        let toml = r#"
            base_dir = "db"
            lib_dir = "lib"

            [custom_types]
            uuid = { import = "UUID", from = "types", is_nullable = true }
            int8 = "bigint"

            [custom_types."public.orders"]
            total = "Money"
        "#;
        let config: Config = toml::from_str(toml).expect("parse config");

        match config.custom_types.get("uuid") {
            Some(CustomTypeEntry::Scalar(CustomType::Imported(imported))) => {
                assert_eq!(imported.import, "UUID");
                assert_eq!(imported.from, "types");
                assert_eq!(imported.is_nullable, Some(true));
            }
            other => panic!("unexpected uuid entry: {other:?}"),
        }
        match config.custom_types.get("int8") {
            Some(CustomTypeEntry::Scalar(CustomType::Literal(literal))) => {
                assert_eq!(literal, "bigint");
            }
            other => panic!("unexpected int8 entry: {other:?}"),
        }
        let table = config
            .custom_types
            .get("public.orders")
            .and_then(CustomTypeEntry::as_table)
            .expect("table-scoped entry");
        assert_eq!(table.get("total"), Some(&CustomType::Literal("Money".to_string())));
    }
}
