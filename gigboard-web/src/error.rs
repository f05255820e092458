//! Handler-level error mapping
//!
//! Converts shared `gigboard_common::Error` values into HTML error
//! responses. Database errors never propagate as panics; every handler
//! boundary funnels through this type.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gigboard_common::Error;
use tracing::error;

use crate::api::pages;

/// Error type returned by page handlers
#[derive(Debug)]
pub struct PageError(pub Error);

/// Convenience result type for page handlers
pub type PageResult<T> = std::result::Result<T, PageError>;

impl From<Error> for PageError {
    fn from(err: Error) -> Self {
        PageError(err)
    }
}

impl From<sqlx::Error> for PageError {
    fn from(err: sqlx::Error) -> Self {
        PageError(Error::from_sqlx(err))
    }
}

/// HTTP status for a shared error value
pub fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::Validation(_) => StatusCode::BAD_REQUEST,
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        Error::Integrity(_) => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Request failed: {}", self.0);
        }
        pages::error_page(status, &self.0.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = Error::Validation("name is required".to_string());
        assert_eq!(status_for(&err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = Error::NotFound("venue 42".to_string());
        assert_eq!(status_for(&err), StatusCode::NOT_FOUND);
    }

    #[test]
    fn integrity_maps_to_conflict() {
        let err = Error::Integrity("foreign key constraint failed".to_string());
        assert_eq!(status_for(&err), StatusCode::CONFLICT);
    }

    #[test]
    fn database_maps_to_internal_error() {
        let err = Error::Database(sqlx::Error::RowNotFound);
        assert_eq!(status_for(&err), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
