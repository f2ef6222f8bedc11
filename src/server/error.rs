//! Server error types and HTTP error responses

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::search::{QueryError, QueryErrorKind};

/// Failures starting or running the listener
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Server bind failed on {addr}: {reason}")]
    BindFailed { addr: String, reason: String },

    #[error("Invalid listen address '{addr}'")]
    InvalidAddress { addr: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Request-level failure rendered as `{"error": kind, "message": text}`
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("Malformed request body: {0}")]
    MalformedBody(#[from] JsonRejection),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: QueryErrorKind,
    message: String,
}

impl ApiError {
    pub fn kind(&self) -> QueryErrorKind {
        match self {
            ApiError::Query(err) => err.kind(),
            ApiError::MalformedBody(_) => QueryErrorKind::InvalidRequest,
        }
    }

    pub fn status(&self) -> StatusCode {
        status_for(self.kind())
    }
}

/// HTTP status for each query error kind
pub fn status_for(kind: QueryErrorKind) -> StatusCode {
    match kind {
        QueryErrorKind::EmptyQuery
        | QueryErrorKind::EmptyInput
        | QueryErrorKind::DimensionMismatch
        | QueryErrorKind::InvalidRequest => StatusCode::BAD_REQUEST,
        QueryErrorKind::ZeroVector => StatusCode::UNPROCESSABLE_ENTITY,
        QueryErrorKind::EmptyIndex => StatusCode::SERVICE_UNAVAILABLE,
        QueryErrorKind::EmbeddingFailure => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        let body = ErrorBody {
            error: self.kind(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
