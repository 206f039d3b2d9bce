//! Error-to-response mapping for the HTTP layer.
//!
//! Every failing endpoint returns the same JSON envelope:
//! `{ "success": false, "error": ..., ... }`. Internal details never reach
//! the client; they are logged here instead.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use domains::{AppError, RateLimitScope};
use serde::Serialize;
use tracing::error;

/// Wrapper so `AppError` can cross the axum boundary via `?`.
pub struct ApiError(AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    remaining_attempts: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    retry_after_secs: Option<u64>,
}

impl ErrorBody {
    fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            message: None,
            remaining_attempts: None,
            retry_after_secs: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self.0 {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, ErrorBody::new(msg)),

            AppError::Unauthorized { remaining_attempts } => {
                let mut body = ErrorBody::new("Unauthorized");
                body.message = Some(match remaining_attempts {
                    0 => "No attempts remaining; further requests will be locked out".to_string(),
                    n => format!("{n} attempt(s) remaining before lockout"),
                });
                body.remaining_attempts = Some(remaining_attempts);
                (StatusCode::UNAUTHORIZED, body)
            }

            AppError::LockedOut { retry_after_secs } => {
                let mut body = ErrorBody::new("Too many failed attempts");
                body.message = Some(format!(
                    "Admin access is locked. Try again in {} minute(s)",
                    retry_after_secs.div_ceil(60).max(1)
                ));
                body.retry_after_secs = Some(retry_after_secs);
                (StatusCode::TOO_MANY_REQUESTS, body)
            }

            AppError::RateLimited {
                scope,
                retry_after_secs,
            } => {
                let mut body = ErrorBody::new("Too many requests");
                body.message = Some(match scope {
                    RateLimitScope::PerMinute => {
                        "You can only post one note per minute. Try again shortly".to_string()
                    }
                    RateLimitScope::PerDay => {
                        "Daily posting limit reached. Try again tomorrow".to_string()
                    }
                });
                body.retry_after_secs = Some(retry_after_secs);
                (StatusCode::TOO_MANY_REQUESTS, body)
            }

            AppError::Internal(detail) => {
                error!(%detail, "request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new("Internal server error"),
                )
            }
        };

        let retry_after = body.retry_after_secs;
        let mut response = (status, Json(body)).into_response();
        if let Some(secs) = retry_after {
            if let Ok(value) = HeaderValue::from_str(&secs.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}
