//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Unsupported element: a new element needs a `type`")]
    UnsupportedElement,

    #[error("Non-finite value for `{0}`")]
    NonFinite(&'static str),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    #[error("Element is locked: {0}")]
    Locked(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),
}

pub type EditorResult<T> = Result<T, EditorError>;
