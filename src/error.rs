use thiserror::Error;

/// Errors raised around the fold engine.
///
/// Folding itself cannot fail; these come from loading message records and
/// reading configuration.
#[derive(Debug, Error)]
pub enum FoldError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid message records: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown fold strategy '{0}'. Use 'union-find' or 'pairwise'.")]
    InvalidStrategy(String),
}
