// error.rs
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use validator::ValidationErrors;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// Input rejected before it reached the database.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// Constraint enforced by the database itself.
    #[error("integrity error: {0}")]
    Integrity(IntegrityError),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Db(DbErr),
}

#[derive(Debug, Error)]
pub enum IntegrityError {
    #[error("unique constraint violated: {0}")]
    Unique(String),
    #[error("foreign key constraint violated: {0}")]
    ForeignKey(String),
}

impl Error {
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Error::Integrity(IntegrityError::Unique(_)))
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(self, Error::Integrity(IntegrityError::ForeignKey(_)))
    }
}

impl From<DbErr> for Error {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => {
                Error::Integrity(IntegrityError::Unique(msg))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
                Error::Integrity(IntegrityError::ForeignKey(msg))
            }
            _ => Error::Db(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_db_errors_pass_through() {
        let err = Error::from(DbErr::RecordNotFound("post 1".into()));
        assert!(matches!(err, Error::Db(DbErr::RecordNotFound(_))));
        assert!(!err.is_unique_violation());
    }
}
