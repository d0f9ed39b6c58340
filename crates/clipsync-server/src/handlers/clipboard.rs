//! Clipboard history handlers

use crate::error::ClipError;
use crate::handlers::ApiError;
use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use clipsync_types::{
    AckResponse, ClipboardEntry, DeleteEntryRequest, StatusResponse, StorageSize, UploadRequest,
    UserQuery,
};

/// Raw pairs keep repeated keys from rejecting the request; the first
/// `user_id` wins.
fn user_query(query: Option<Query<Vec<(String, String)>>>) -> UserQuery {
    query
        .map(|Query(pairs)| UserQuery::from_pairs(pairs))
        .unwrap_or_default()
}

pub async fn upload(
    State(state): State<AppState>,
    body: Option<Json<UploadRequest>>,
) -> Result<Json<StatusResponse>, ApiError> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let username = req
        .username()
        .ok_or_else(|| ApiError::plain(ClipError::InvalidUser))?;

    state
        .clipboard_service
        .append(username, req.data().unwrap_or_default())
        .await
        .map_err(ApiError::plain)?;

    Ok(Json(StatusResponse::new("success")))
}

pub async fn history(
    State(state): State<AppState>,
    query: Option<Query<Vec<(String, String)>>>,
) -> Result<Json<Vec<ClipboardEntry>>, ApiError> {
    let query = user_query(query);
    let user_id = query
        .user_id()
        .ok_or_else(|| ApiError::plain(ClipError::MissingField("Missing user_id")))?;

    let entries = state
        .clipboard_service
        .list_all(user_id)
        .await
        .map_err(ApiError::plain)?;

    Ok(Json(entries))
}

pub async fn clear(
    State(state): State<AppState>,
    query: Option<Query<Vec<(String, String)>>>,
) -> Result<Json<StatusResponse>, ApiError> {
    let query = user_query(query);
    let user_id = query
        .user_id()
        .ok_or_else(|| ApiError::plain(ClipError::MissingField("Missing user_id")))?;

    state
        .clipboard_service
        .delete_all(user_id)
        .await
        .map_err(ApiError::plain)?;

    Ok(Json(StatusResponse::new(format!(
        "Clipboard cleared for user: {}",
        user_id
    ))))
}

pub async fn size(State(state): State<AppState>) -> Result<Json<StorageSize>, ApiError> {
    let size = state
        .clipboard_service
        .total_size()
        .await
        .map_err(ApiError::plain)?;

    Ok(Json(size))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    body: Option<Json<DeleteEntryRequest>>,
) -> Result<Json<AckResponse>, ApiError> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let (username, timestamp) = req
        .key()
        .ok_or_else(|| ApiError::ack(ClipError::MissingField("Missing data")))?;

    state
        .clipboard_service
        .delete_one(username, timestamp)
        .await
        .map_err(ApiError::ack)?;

    Ok(Json(AckResponse::ok_with("Deleted.")))
}
