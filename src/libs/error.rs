//! Typed failures returned by the task core.
//!
//! Every operation exposed to the presentation layer returns either a value
//! or one of three failure kinds:
//!
//! - **Validation**: bad user input, detected before any store round-trip
//! - **Store**: connectivity or query failure, annotated with the operation name
//! - **NotFound**: a referenced category or task id does not exist
//!
//! Store failures are never retried here; they surface as-is.

use thiserror::Error;

/// Underlying cause of a store failure.
#[derive(Debug, Error)]
pub enum StoreFailure {
    #[error(transparent)]
    Sql(#[from] rusqlite::Error),

    #[error("connection pool: {0}")]
    Pool(#[from] r2d2::Error),
}

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("{operation} failed: {source}")]
    Store {
        operation: &'static str,
        #[source]
        source: StoreFailure,
    },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
}

/// Result alias used throughout the library layer.
pub type Result<T> = std::result::Result<T, TaskError>;

impl TaskError {
    /// Bad input in `field`.
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        TaskError::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Missing `entity` row with the given id.
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        TaskError::NotFound { entity, id }
    }

    /// True for input errors raised before any store access.
    pub fn is_validation(&self) -> bool {
        matches!(self, TaskError::Validation { .. })
    }

    /// True when a referenced row does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, TaskError::NotFound { .. })
    }

    /// Name of the store operation that failed, if this is a store error.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            TaskError::Store { operation, .. } => Some(operation),
            _ => None,
        }
    }
}

/// Attaches the failing operation name to raw store results.
pub trait StoreContext<T> {
    fn op(self, operation: &'static str) -> Result<T>;
}

impl<T, E> StoreContext<T> for std::result::Result<T, E>
where
    E: Into<StoreFailure>,
{
    fn op(self, operation: &'static str) -> Result<T> {
        self.map_err(|e| TaskError::Store {
            operation,
            source: e.into(),
        })
    }
}
