use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("corrupt column {column}: {reason}")]
    Corrupt { column: &'static str, reason: String },
}
