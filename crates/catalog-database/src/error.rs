//! Mapping of sqlx failures onto [`AppError`].

use catalog_core::error::{AppError, ErrorKind};

/// Wrap a sqlx error with context, classifying it by cause.
///
/// Unique-constraint violations become [`ErrorKind::Conflict`], a missing
/// row becomes [`ErrorKind::NotFound`], everything else is
/// [`ErrorKind::Storage`].
pub fn storage_error(message: impl Into<String>, err: sqlx::Error) -> AppError {
    AppError::with_source(classify(&err), message, err)
}

fn classify(err: &sqlx::Error) -> ErrorKind {
    match err {
        sqlx::Error::RowNotFound => ErrorKind::NotFound,
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => ErrorKind::Conflict,
        _ => ErrorKind::Storage,
    }
}
