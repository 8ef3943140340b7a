use thiserror::Error;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Failures surfaced by the persistence layer. Constraint violations
/// reported by SQLite are classified into their own variants so callers
/// can tell integrity errors apart from infrastructure faults.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error("operation blocked by an existing reference: {0}")]
    ReferentialIntegrity(String),
    #[error("check constraint violated: {0}")]
    CheckViolation(String),
    #[error("validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
    #[error("entity kind `{0}` is not registered")]
    UnknownEntityKind(String),
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("database error: {0}")]
    Database(diesel::result::Error),
}

impl From<diesel::result::Error> for RepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};

        match err {
            DieselError::NotFound => Self::NotFound,
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::UniqueViolation(info.message().to_string())
            }
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                Self::ReferentialIntegrity(info.message().to_string())
            }
            DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, info) => {
                Self::CheckViolation(info.message().to_string())
            }
            other => Self::Database(other),
        }
    }
}
