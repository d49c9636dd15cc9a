use thiserror::Error;

/// Errors emitted while driving the renderer.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("render error: {0}")]
    Render(String),
}
