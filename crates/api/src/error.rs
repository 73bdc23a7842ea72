use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use warden_core::error::CoreError;
use warden_db::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain outcomes and [`StoreError`] for storage
/// outcomes, and adds HTTP-specific variants for body-extraction failures.
/// Implements [`IntoResponse`] to produce consistent JSON error responses;
/// this is the only place an outcome meets a status code, and no outcome is
/// downgraded or upgraded on the way through.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level outcome from `warden_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A storage-level outcome from `warden_db`.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The request body did not declare a JSON content type.
    #[error("Unsupported media type")]
    UnsupportedMediaType,

    /// The request body was absent or not syntactically valid JSON.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request body was valid JSON of the wrong shape.
    #[error("Unprocessable entity: {0}")]
    Unprocessable(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => AppError::UnsupportedMediaType,
            JsonRejection::JsonDataError(err) => AppError::Unprocessable(err.body_text()),
            other => AppError::BadRequest(other.body_text()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::PageOutOfRange { page } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("page {page} is out of range"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Storage errors ---
            AppError::Store(err) => classify_store_error(err),

            // --- Body-extraction errors ---
            AppError::UnsupportedMediaType => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_MEDIA_TYPE",
                "Expected a JSON request body".to_string(),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Unprocessable(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a storage error into an HTTP status, error code, and message.
///
/// - The typed conflicts (duplicate name, unknown privilege) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::DuplicateName { entity, name } => (
            StatusCode::CONFLICT,
            "CONFLICT",
            format!("{entity} name '{name}' already exists"),
        ),
        StoreError::UnknownPrivilege(id) => (
            StatusCode::CONFLICT,
            "CONFLICT",
            format!("no persisted privilege with id {id}"),
        ),
        StoreError::Database(db_err) => {
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
