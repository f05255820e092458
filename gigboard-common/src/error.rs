//! Common error types for gigboard

use thiserror::Error;

/// Common result type for gigboard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors shared between the library and the web service
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Form input rejected before reaching persistence
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Referential integrity violation (foreign key rejection)
    #[error("Integrity error: {0}")]
    Integrity(String),
}

impl Error {
    /// Reclassify sqlx foreign key rejections as integrity errors.
    ///
    /// SQLite reports both immediate and deferred FK failures with the
    /// message "FOREIGN KEY constraint failed"; everything else stays a
    /// plain database error.
    pub fn from_sqlx(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.message().contains("FOREIGN KEY constraint failed") {
                return Error::Integrity("foreign key constraint failed".to_string());
            }
        }
        Error::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_fk_errors_stay_database_errors() {
        let err = Error::from_sqlx(sqlx::Error::RowNotFound);
        assert!(matches!(err, Error::Database(_)));
    }
}
