use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::constants::MSG_DUPLICATE;
use crate::shared::types::{ApiResponse, FieldMessages, Message};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Validation failed: {0:?}")]
    Validation(FieldMessages),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Data already exists")]
    Duplicate,

    #[error("data with id {0} not found")]
    NotFound(String),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => AppError::Duplicate,
            _ => AppError::Database(err),
        }
    }
}

impl From<calamine::Error> for AppError {
    fn from(err: calamine::Error) -> Self {
        AppError::Spreadsheet(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for AppError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        AppError::Spreadsheet(err.to_string())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            // Missing rows answer 400, not 404.
            AppError::BadRequest(_) | AppError::Duplicate | AppError::NotFound(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Database(_) | AppError::Spreadsheet(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                Message::Text("Database error occurred".to_string())
            }
            AppError::Validation(fields) => Message::Fields(fields),
            AppError::BadRequest(msg) => Message::Text(msg),
            AppError::Duplicate => Message::Text(MSG_DUPLICATE.to_string()),
            AppError::NotFound(id) => Message::Text(format!("data with id {} not found", id)),
            AppError::Spreadsheet(ref msg) => {
                tracing::error!("Spreadsheet error: {}", msg);
                Message::Text(format!("Spreadsheet could not be processed: {}", msg))
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                Message::Text("Internal server error".to_string())
            }
        };

        (status, Json(ApiResponse::<()>::failed(message))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::Duplicate.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::NotFound("x".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Validation(FieldMessages::new()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::Spreadsheet("corrupt".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_row_not_found_is_plain_database_error() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::Database(_)));
    }
}
