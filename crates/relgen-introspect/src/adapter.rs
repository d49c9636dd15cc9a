use async_trait::async_trait;

use relgen_core::Result;

use crate::options::IntrospectOptions;
use crate::raw::RawSchema;

/// Trait implemented by database adapters that can read catalog metadata.
#[async_trait]
pub trait Adapter {
    /// Returns the engine identifier (e.g. `postgres`).
    fn engine(&self) -> &'static str;

    /// Fetch raw metadata for every schema selected by the options.
    async fn introspect(&self, opts: &IntrospectOptions) -> Result<Vec<RawSchema>>;
}
