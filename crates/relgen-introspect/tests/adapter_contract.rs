use async_trait::async_trait;

use relgen_core::Result;
use relgen_introspect::{Adapter, IntrospectOptions, RawSchema};

/// Adapter backed by canned metadata, standing in for a live database.
struct CannedAdapter {
    schemas: Vec<RawSchema>,
}

#[async_trait]
impl Adapter for CannedAdapter {
    fn engine(&self) -> &'static str {
        "canned"
    }

    async fn introspect(&self, opts: &IntrospectOptions) -> Result<Vec<RawSchema>> {
        let mut schemas = self.schemas.clone();
        if let Some(wanted) = &opts.schemas {
            schemas.retain(|schema| wanted.contains(&schema.name));
        }
        Ok(schemas)
    }
}

fn canned() -> CannedAdapter {
    CannedAdapter {
        schemas: vec![
            RawSchema {
                name: "public".to_string(),
                ..RawSchema::default()
            },
            RawSchema {
                name: "billing".to_string(),
                ..RawSchema::default()
            },
        ],
    }
}

#[tokio::test]
async fn adapters_work_behind_a_trait_object() {
    let adapter: Box<dyn Adapter + Send + Sync> = Box::new(canned());
    assert_eq!(adapter.engine(), "canned");

    let schemas = adapter
        .introspect(&IntrospectOptions::default())
        .await
        .expect("introspect");
    assert_eq!(schemas.len(), 2);
}

#[tokio::test]
async fn schema_selection_narrows_the_result() {
    let adapter = canned();

    let opts = IntrospectOptions {
        schemas: Some(vec!["billing".to_string()]),
        ..IntrospectOptions::default()
    };
    let schemas = adapter.introspect(&opts).await.expect("introspect");
    assert_eq!(schemas.len(), 1);
    assert_eq!(schemas[0].name, "billing");
}
