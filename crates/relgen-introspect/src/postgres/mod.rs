use sqlx::PgPool;

use relgen_core::Result;

use crate::adapter::Adapter;
use crate::options::IntrospectOptions;
use crate::raw::{RawRelation, RawSchema};

mod mapper;
mod queries;

/// Adapter for PostgreSQL databases.
#[derive(Debug, Clone)]
pub struct PostgresAdapter {
    pool: PgPool,
}

impl PostgresAdapter {
    /// Create a new adapter using a pre-configured pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl Adapter for PostgresAdapter {
    fn engine(&self) -> &'static str {
        "postgres"
    }

    async fn introspect(&self, opts: &IntrospectOptions) -> Result<Vec<RawSchema>> {
        introspect(&self.pool, opts).await
    }
}

/// Fetch raw catalog metadata for every selected schema.
pub async fn introspect(pool: &PgPool, opts: &IntrospectOptions) -> Result<Vec<RawSchema>> {
    let schema_names = mapper::filter_schemas(queries::list_schemas(pool).await?, opts);

    let mut schemas = Vec::with_capacity(schema_names.len());

    for schema_name in schema_names {
        let enums =
            mapper::group_enum_labels(queries::list_enum_labels(pool, &schema_name).await?);

        let mut tables = Vec::new();
        let mut views = Vec::new();
        let mut materialized_views = Vec::new();

        for relation in queries::list_relations(pool, &schema_name).await? {
            let bucket = match relation.relkind as u8 {
                b'r' | b'p' => &mut tables,
                b'v' if opts.include_views => &mut views,
                b'm' if opts.include_materialized_views => &mut materialized_views,
                _ => continue,
            };

            let columns = mapper::map_columns(
                queries::list_columns(pool, &schema_name, &relation.name).await?,
                opts,
            );
            bucket.push(RawRelation {
                name: relation.name,
                columns,
            });
        }

        schemas.push(RawSchema {
            name: schema_name,
            enums,
            tables,
            views,
            materialized_views,
        });
    }

    Ok(schemas)
}
