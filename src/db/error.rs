use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    /// Record rejected by the store, e.g. a tenant-bearing record without a
    /// neighborhood.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Backend failure. Reserved for [`RecordRepo`](super::RecordRepo)
    /// implementations over a real database.
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type DbResult<T> = Result<T, DbError>;
