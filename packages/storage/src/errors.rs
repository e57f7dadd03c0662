use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Design not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Malformed design document: {0}")]
    Malformed(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
pub type PersistenceResult<T> = Result<T, PersistenceError>;
