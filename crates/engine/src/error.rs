//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`InvalidKind`], [`InvalidAmount`], [`InvalidCategory`] thrown when an
//!   entry does not satisfy its invariants.
//! - [`Database`] thrown when the backing store rejects or fails an operation.
//!   It carries the tag of the operation that failed (e.g. `store.create`).
//!
//!  [`InvalidKind`]: EngineError::InvalidKind
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidCategory`]: EngineError::InvalidCategory
//!  [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid kind: {0}")]
    InvalidKind(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid category: {0}")]
    InvalidCategory(String),
    #[error("{op}: {source}")]
    Database {
        op: &'static str,
        #[source]
        source: DbErr,
    },
}

/// Tag a database failure with the operation that produced it.
pub(crate) trait OpContext<T> {
    fn op(self, op: &'static str) -> Result<T, EngineError>;
}

impl<T> OpContext<T> for Result<T, DbErr> {
    fn op(self, op: &'static str) -> Result<T, EngineError> {
        self.map_err(|source| EngineError::Database { op, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_error_is_prefixed_with_operation() {
        let err = Err::<(), _>(DbErr::Custom("CHECK constraint failed".to_string()))
            .op("store.create")
            .unwrap_err();
        assert!(err.to_string().starts_with("store.create: "));
        assert!(err.to_string().contains("CHECK constraint failed"));
        assert!(matches!(err, EngineError::Database { op: "store.create", .. }));
    }
}
