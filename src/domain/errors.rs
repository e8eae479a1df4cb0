use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Carries the full user-facing message, e.g. "Request not found".
    #[error("{0}")]
    NotFound(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Internal error: {0}")]
    Internal(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    /// Temporary refusal; the caller may retry.
    #[error("Unavailable: {0}")]
    Unavailable(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
