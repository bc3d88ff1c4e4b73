//! HTTP error envelope shared by all handlers.
//!
//! Four kinds cover everything this service can report: a bad request, a
//! missing resource, a disabled/unreachable collaborator, and an internal
//! failure. Each maps to a status code plus a `{ error: { code, message } }`
//! body.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde::Serialize;

use crate::store::StoreError;

#[derive(Debug)]
pub enum ApiError {
  BadRequest(String),
  NotFound(String),
  /// A collaborator (dictionary, webhook) is disabled or unreachable.
  Unavailable(String),
  Internal(String),
}

impl ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn code(&self) -> &'static str {
    match self {
      ApiError::BadRequest(_) => "BAD_REQUEST",
      ApiError::NotFound(_) => "NOT_FOUND",
      ApiError::Unavailable(_) => "UNAVAILABLE",
      ApiError::Internal(_) => "INTERNAL_ERROR",
    }
  }

  fn message(&self) -> &str {
    match self {
      ApiError::BadRequest(m)
      | ApiError::NotFound(m)
      | ApiError::Unavailable(m)
      | ApiError::Internal(m) => m,
    }
  }
}

#[derive(Serialize)]
struct ErrorDetails {
  code: &'static str,
  message: String,
}

#[derive(Serialize)]
struct ErrorBody {
  error: ErrorDetails,
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let body = ErrorBody {
      error: ErrorDetails { code: self.code(), message: self.message().to_string() },
    };
    (self.status_code(), Json(body)).into_response()
  }
}

impl From<StoreError> for ApiError {
  fn from(err: StoreError) -> Self {
    tracing::error!(target: "store", error = %err, "Persistence failure");
    ApiError::Internal(err.to_string())
  }
}
