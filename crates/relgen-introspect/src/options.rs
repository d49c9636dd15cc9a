/// Options that control how introspection behaves.
#[derive(Debug, Clone)]
pub struct IntrospectOptions {
    /// Restrict introspection to these schemas; `None` means every
    /// non-system schema.
    pub schemas: Option<Vec<String>>,
    pub include_views: bool,
    pub include_materialized_views: bool,
    pub include_comments: bool,
}

impl Default for IntrospectOptions {
    fn default() -> Self {
        Self {
            schemas: None,
            include_views: true,
            include_materialized_views: true,
            include_comments: true,
        }
    }
}
