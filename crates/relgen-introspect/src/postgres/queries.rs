use sqlx::prelude::FromRow;
use sqlx::PgPool;

use relgen_core::{Error, Result};

fn db_err(err: sqlx::Error) -> Error {
    Error::Introspection(err.to_string())
}

pub async fn list_schemas(pool: &PgPool) -> Result<Vec<String>> {
    sqlx::query_scalar::<_, String>(
        r#"
        select nspname
        from pg_namespace
        order by nspname
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(db_err)
}

#[derive(Debug, FromRow)]
pub struct RawEnumRow {
    pub name: String,
    pub label: String,
}

pub async fn list_enum_labels(pool: &PgPool, schema: &str) -> Result<Vec<RawEnumRow>> {
    sqlx::query_as::<_, RawEnumRow>(
        r#"
        select t.typname as name, e.enumlabel as label
        from pg_type t
        join pg_enum e on e.enumtypid = t.oid
        join pg_namespace n on n.oid = t.typnamespace
        where n.nspname = $1
        order by t.typname, e.enumsortorder
        "#,
    )
    .bind(schema)
    .fetch_all(pool)
    .await
    .map_err(db_err)
}

#[derive(Debug, FromRow)]
pub struct RawRelationRow {
    pub name: String,
    pub relkind: i8,
}

pub async fn list_relations(pool: &PgPool, schema: &str) -> Result<Vec<RawRelationRow>> {
    sqlx::query_as::<_, RawRelationRow>(
        r#"
        select c.relname as name, c.relkind as relkind
        from pg_class c
        join pg_namespace n on n.oid = c.relnamespace
        where n.nspname = $1
          and c.relkind in ('r', 'p', 'v', 'm')
        order by c.relname
        "#,
    )
    .bind(schema)
    .fetch_all(pool)
    .await
    .map_err(db_err)
}

#[derive(Debug, FromRow)]
pub struct RawColumnRow {
    pub name: String,
    pub type_schema: String,
    pub type_name: String,
    pub type_kind: String,
    pub is_array: bool,
    pub is_nullable: bool,
    pub is_identity: bool,
    pub is_generated: bool,
    pub expression: Option<String>,
    pub comment: Option<String>,
    pub max_length: Option<i32>,
    pub is_primary_key: bool,
}

// For array columns the element type is reported, so the extractor sees
// `int4` + is_array rather than `_int4`. The default/generation expression
// share `pg_attrdef`; the mapper splits them on `is_generated`.
pub async fn list_columns(pool: &PgPool, schema: &str, relation: &str) -> Result<Vec<RawColumnRow>> {
    sqlx::query_as::<_, RawColumnRow>(
        r#"
        select
          a.attname as name,
          coalesce(en.nspname, tn.nspname) as type_schema,
          coalesce(elt.typname, t.typname) as type_name,
          coalesce(elt.typtype, t.typtype)::text as type_kind,
          (t.typcategory = 'A') as is_array,
          (not a.attnotnull) as is_nullable,
          (a.attidentity in ('a', 'd')) as is_identity,
          (a.attgenerated = 's') as is_generated,
          pg_get_expr(ad.adbin, ad.adrelid) as expression,
          col_description(c.oid, a.attnum) as comment,
          case when a.atttypmod > 4 then a.atttypmod - 4 end as max_length,
          coalesce(pk.is_primary_key, false) as is_primary_key
        from pg_class c
        join pg_namespace n on n.oid = c.relnamespace
        join pg_attribute a on a.attrelid = c.oid and a.attnum > 0 and not a.attisdropped
        join pg_type t on t.oid = a.atttypid
        join pg_namespace tn on tn.oid = t.typnamespace
        left join pg_type elt on elt.oid = t.typelem and t.typcategory = 'A'
        left join pg_namespace en on en.oid = elt.typnamespace
        left join pg_attrdef ad on ad.adrelid = c.oid and ad.adnum = a.attnum
        left join lateral (
          select true as is_primary_key
          from pg_index i
          where i.indrelid = c.oid
            and i.indisprimary
            and a.attnum = any(i.indkey)
          limit 1
        ) pk on true
        where n.nspname = $1
          and c.relname = $2
        order by a.attnum
        "#,
    )
    .bind(schema)
    .bind(relation)
    .fetch_all(pool)
    .await
    .map_err(db_err)
}
