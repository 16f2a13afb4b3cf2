use thiserror::Error;

/// Failures that escape the service layer. "Not found" is never one of them:
/// absence is reported as `None` (reads) or as a no-op (update/delete).
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}
