use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use quota::QuotaError;
use sea_orm::DbErr;
use thiserror::Error;
use tracing::{error, warn};
use validator::ValidationErrors;

use crate::schemas::ErrorResponse;

/// Every failure a handler can answer with.
///
/// The `Display` text is what the client sees. Variants wrapping an
/// underlying error keep it as the source so it only reaches the logs.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid name or password")]
    InvalidCredentials,

    #[error("No file uploaded")]
    MissingFile,

    #[error("Failed to upload file")]
    FileWrite(#[source] std::io::Error),

    #[error("Failed to access the database")]
    Storage(#[from] DbErr),

    #[error("Invalid or missing DateYear or DateMonth: {0}")]
    InvalidPeriod(String),

    #[error("User {0} not found")]
    UserNotFound(i32),

    #[error("Incomplete data: {0}")]
    IncompleteData(String),

    #[error("Invalid loan date: {0}")]
    InvalidDate(String),

    #[error("Session could not be updated")]
    Session(#[from] tower_sessions::session::Error),

    #[error("{0}")]
    QuotaExceeded(String),

    #[error("Request body is too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::MissingFile
            | Self::InvalidPeriod(_)
            | Self::IncompleteData(_)
            | Self::InvalidDate(_) => StatusCode::BAD_REQUEST,
            Self::UserNotFound(_) => StatusCode::NOT_FOUND,
            Self::QuotaExceeded(_) => StatusCode::CONFLICT,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::FileWrite(_) | Self::Storage(_) | Self::Session(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::MissingFile => "MISSING_FILE",
            Self::FileWrite(_) => "FILE_WRITE_ERROR",
            Self::Storage(_) => "DATABASE_ERROR",
            Self::InvalidPeriod(_) => "INVALID_PERIOD",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::IncompleteData(_) => "INCOMPLETE_DATA",
            Self::InvalidDate(_) => "INVALID_DATE",
            Self::Session(_) => "SESSION_ERROR",
            Self::QuotaExceeded(_) => "QUOTA_EXCEEDED",
            Self::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<QuotaError> for AppError {
    fn from(err: QuotaError) -> Self {
        match err {
            QuotaError::Database(db_err) => Self::Storage(db_err),
            QuotaError::InvalidPeriod(detail) => Self::InvalidPeriod(detail),
            QuotaError::InvalidDate(detail) => Self::InvalidDate(detail),
        }
    }
}

/// Blank or missing form fields, named in a stable order.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();
        Self::IncompleteData(format!("missing {}", fields.join(", ")))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            match &self {
                Self::FileWrite(source) => error!("File upload failed: {}", source),
                Self::Storage(source) => error!("Database error: {}", source),
                Self::Session(source) => error!("Session store error: {}", source),
                Self::Internal(detail) => error!("Internal error: {}", detail),
                _ => error!("Request failed: {}", self),
            }
        } else {
            warn!("Request rejected ({}): {}", self.code(), self);
        }

        let body = ErrorResponse {
            error: self.to_string(),
            code: self.code().to_string(),
            success: false,
        };

        (status, Json(body)).into_response()
    }
}
