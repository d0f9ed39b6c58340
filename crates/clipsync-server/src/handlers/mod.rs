//! HTTP handlers

pub mod auth;
pub mod clipboard;
pub mod health;

pub use health::health;

use crate::error::{ClipError, ErrorKind};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use clipsync_types::{AckResponse, ErrorResponse};
use tracing::error;

/// Body shape used when reporting a rejected request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    /// `{success: false, message}`
    Ack,
    /// `{error}`
    Error,
}

/// Handler error: a [`ClipError`] plus the envelope its route answers with
#[derive(Debug)]
pub struct ApiError {
    pub error: ClipError,
    pub envelope: Envelope,
}

impl ApiError {
    pub fn ack(error: ClipError) -> Self {
        Self {
            error,
            envelope: Envelope::Ack,
        }
    }

    pub fn plain(error: ClipError) -> Self {
        Self {
            error,
            envelope: Envelope::Error,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.error.kind() {
            ErrorKind::MissingField | ErrorKind::Conflict => StatusCode::BAD_REQUEST,
            ErrorKind::AuthFailure => StatusCode::UNAUTHORIZED,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Storage failures are logged, never echoed to the client
        if self.error.kind() == ErrorKind::Internal {
            error!("Request failed: {}", self.error);
            let body = Json(ErrorResponse {
                error: "Internal server error".to_string(),
            });
            return (status, body).into_response();
        }

        let message = self.error.to_string();
        match self.envelope {
            Envelope::Ack => (status, Json(AckResponse::failed(message))).into_response(),
            Envelope::Error => (status, Json(ErrorResponse { error: message })).into_response(),
        }
    }
}
