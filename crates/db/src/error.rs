//! Store errors and their mapping onto application errors.

use khata_core::auth::PasswordError;
use khata_core::settlement::SettlementError;
use khata_core::validation::ValidationError;
use khata_shared::AppError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Result type for repository operations.
pub type StoreResult<T> = Result<T, StoreError>;

const REFERENCED: &str = "Record is referenced by other records";

/// Failures raised by repositories.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Referenced record does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A unique value is already taken.
    #[error("{0} already exists")]
    Duplicate(String),

    /// Record is still referenced by other records.
    #[error("{0}")]
    Conflict(String),

    /// A business rule rejected the operation.
    #[error("{0}")]
    Rule(String),

    /// Input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Password hashing failed.
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Any other database failure.
    #[error("Database error: {0}")]
    Database(DbErr),
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                tracing::debug!(%detail, "unique constraint violated");
                Self::Duplicate("Record".to_string())
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                tracing::debug!(%detail, "foreign key constraint violated");
                Self::Conflict(REFERENCED.to_string())
            }
            // SQLite raises RESTRICT actions as a trigger constraint (1811),
            // which sea-orm does not classify.
            _ if err.to_string().contains("FOREIGN KEY constraint failed") => {
                tracing::debug!(error = %err, "foreign key constraint violated");
                Self::Conflict(REFERENCED.to_string())
            }
            _ => Self::Database(err),
        }
    }
}

impl From<SettlementError> for StoreError {
    fn from(err: SettlementError) -> Self {
        Self::Validation(ValidationError::Settlement(err))
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => Self::NotFound(err.to_string()),
            StoreError::Duplicate(_) | StoreError::Conflict(_) => Self::Conflict(err.to_string()),
            StoreError::Rule(message) => Self::BusinessRule(message),
            StoreError::Validation(inner) => Self::Validation(inner.to_string()),
            StoreError::Password(inner) => Self::Internal(inner.to_string()),
            StoreError::Database(inner) => {
                tracing::error!(error = %inner, "database operation failed");
                Self::Database(inner.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (StoreError::NotFound("Bank"), 404),
            (StoreError::Duplicate("Account number".into()), 409),
            (StoreError::Conflict("Bank has entries".into()), 409),
            (StoreError::Rule("Company already exists".into()), 422),
            (StoreError::Validation(ValidationError::Required("trxnId")), 400),
            (StoreError::Database(DbErr::Custom("boom".into())), 500),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).status_code(), status);
        }
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            AppError::from(StoreError::NotFound("Bank")).message(),
            "Bank not found"
        );
        assert_eq!(
            AppError::from(StoreError::Duplicate("Phone number".into())).message(),
            "Phone number already exists"
        );
        assert_eq!(
            AppError::from(StoreError::from(SettlementError::MissingBank)).message(),
            "Bank ID is required for bank payments"
        );
    }

    #[test]
    fn test_sqlite_restrict_failure_is_a_conflict() {
        let err = DbErr::Exec(sea_orm::RuntimeErr::Internal(
            "error returned from database: (code: 1811) FOREIGN KEY constraint failed".into(),
        ));
        assert!(matches!(StoreError::from(err), StoreError::Conflict(_)));
    }

    #[test]
    fn test_plain_db_error_is_not_classified() {
        assert!(matches!(
            StoreError::from(DbErr::RecordNotFound("x".into())),
            StoreError::Database(_)
        ));
    }
}
