//! Account handlers: login and registration

use crate::error::ClipError;
use crate::handlers::ApiError;
use crate::AppState;
use axum::{extract::State, Json};
use clipsync_types::{AckResponse, LoginRequest, RegisterRequest};
use tracing::{info, warn};

pub async fn login(
    State(state): State<AppState>,
    body: Option<Json<LoginRequest>>,
) -> Result<Json<AckResponse>, ApiError> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let (username, password) = req
        .credentials()
        .ok_or_else(|| ApiError::ack(ClipError::MissingField("Missing fields")))?;

    info!("Login attempt for: {}", username);

    state
        .auth_service
        .authenticate(username, password)
        .await
        .map_err(|e| {
            warn!("Login failed for {}: {}", username, e);
            ApiError::ack(e)
        })?;

    info!("Login successful for: {}", username);
    Ok(Json(AckResponse::ok()))
}

pub async fn update_user(
    State(state): State<AppState>,
    body: Option<Json<RegisterRequest>>,
) -> Result<Json<AckResponse>, ApiError> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let (username, password_hash) = req
        .credentials()
        .ok_or_else(|| ApiError::ack(ClipError::MissingField("Missing fields")))?;

    info!("Registration attempt for: {}", username);

    state
        .auth_service
        .register(username, password_hash)
        .await
        .map_err(ApiError::ack)?;

    Ok(Json(AckResponse::ok_with("User created")))
}
