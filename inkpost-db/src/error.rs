//! Error taxonomy for the data layer.
//!
//! Constraint failures are classified from the driver's error kind so
//! callers can translate them ("username taken") without parsing SQLSTATE
//! codes themselves. Nothing is recovered locally; every variant passes
//! through to the caller unchanged.

use sqlx::error::ErrorKind;
use sqlx::postgres::PgDatabaseError;
use thiserror::Error;

/// SQLSTATE class 22 code raised when a literal does not fit an enum type.
/// Postgres reports enum-domain rejection as invalid text representation
/// rather than a check-constraint failure, so it is folded into
/// [`DbError::CheckViolation`] here.
const INVALID_TEXT_REPRESENTATION: &str = "22P02";

pub type DbResult<T> = Result<T, DbError>;

#[derive(Error, Debug)]
pub enum DbError {
    /// UNIQUE constraint failed (duplicate username/email)
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    /// Referenced row does not exist
    #[error("foreign key constraint violated: {constraint}")]
    ForeignKeyViolation { constraint: String },

    /// Required column omitted
    #[error("not-null constraint violated on column '{column}'")]
    NotNullViolation { column: String },

    /// CHECK constraint or enum-domain violation
    #[error("check constraint violated: {constraint}")]
    CheckViolation { constraint: String },

    /// Store unreachable or pool exhausted
    #[error("database connection error: {0}")]
    Connection(#[source] sqlx::Error),

    /// Row lookup returned nothing
    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// Anything else the driver reports
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db) => {
                match db.kind() {
                    ErrorKind::UniqueViolation => DbError::UniqueViolation {
                        constraint: db.constraint().unwrap_or_default().to_owned(),
                    },
                    ErrorKind::ForeignKeyViolation => DbError::ForeignKeyViolation {
                        constraint: db.constraint().unwrap_or_default().to_owned(),
                    },
                    ErrorKind::NotNullViolation => DbError::NotNullViolation {
                        column: db
                            .try_downcast_ref::<PgDatabaseError>()
                            .and_then(|pg| pg.column())
                            .unwrap_or_default()
                            .to_owned(),
                    },
                    ErrorKind::CheckViolation => DbError::CheckViolation {
                        constraint: db.constraint().unwrap_or_default().to_owned(),
                    },
                    _ => {
                        if db.code().as_deref() == Some(INVALID_TEXT_REPRESENTATION) {
                            DbError::CheckViolation {
                                constraint: db.message().to_owned(),
                            }
                        } else {
                            DbError::Database(sqlx::Error::Database(db))
                        }
                    }
                }
            }
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed => DbError::Connection(err),
            other => DbError::Database(other),
        }
    }
}

impl DbError {
    /// True for failures worth re-issuing the unit of work over
    /// (transient contention, not a bug in the write itself).
    pub fn is_transient(&self) -> bool {
        matches!(self, DbError::Connection(_))
    }
}
