use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeavecheckError {
    #[error("type index error: {0}")]
    Index(String),
    #[error("target registry error: {0}")]
    Registry(String),
    #[error("analysis cancelled by host")]
    Cancelled,
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, WeavecheckError>;
