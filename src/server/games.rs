use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};
use tracing::error;

use crate::ingest;
use crate::server::AppState;
use crate::server::dto::{DeleteResponse, PopulateResponse, SearchRequest};
use crate::server::response::ApiError;
use crate::types::{Game, GameFields};

/// Listing failures are reported with a 200 and an error-shaped body;
/// existing clients depend on this.
pub async fn list_games(State(state): State<Arc<AppState>>) -> Json<Value> {
    match state.store.list_games() {
        Ok(games) => Json(json!(games)),
        Err(err) => {
            error!("error querying games: {err}");
            Json(json!({ "error": err.to_string() }))
        }
    }
}

pub async fn create_game(
    State(state): State<Arc<AppState>>,
    Json(fields): Json<GameFields>,
) -> Result<Json<Game>, ApiError> {
    match state.store.create_game(&fields) {
        Ok(game) => Ok(Json(game)),
        Err(err) => {
            error!("error creating game: {err}");
            Err(ApiError::bad_request(json!({ "error": err.to_string() })))
        }
    }
}

/// Get-then-update. A missing id is reported the same way as any other
/// update failure.
pub async fn update_game(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(fields): Json<GameFields>,
) -> Result<Json<Game>, ApiError> {
    let found = state.store.get_game(id).map_err(|err| {
        error!("error updating game: {err}");
        ApiError::bad_request(json!({ "error": err.to_string() }))
    })?;
    if found.is_none() {
        return Err(ApiError::bad_request(json!({ "error": "not found" })));
    }

    match state.store.update_game(id, &fields) {
        Ok(game) => Ok(Json(game)),
        Err(err) => {
            error!("error updating game: {err}");
            Err(ApiError::bad_request(json!({ "error": err.to_string() })))
        }
    }
}

/// Get-then-delete; the delete is hard and permanent.
pub async fn delete_game(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let found = state.store.get_game(id).map_err(|err| {
        error!("error deleting game: {err}");
        ApiError::bad_request(json!({ "error": err.to_string() }))
    })?;
    if found.is_none() {
        return Err(ApiError::bad_request(json!({ "error": "not found" })));
    }

    match state.store.delete_game(id) {
        Ok(_) => Ok(Json(DeleteResponse { id })),
        Err(err) => {
            error!("error deleting game: {err}");
            Err(ApiError::bad_request(json!({ "error": err.to_string() })))
        }
    }
}

pub async fn search_games(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<Vec<Game>>, ApiError> {
    let name = string_filter(req.name.as_ref()).ok_or_else(|| {
        ApiError::bad_request(json!({
            "error": "Invalid input",
            "details": "Name must be a string",
        }))
    })?;
    let platform = string_filter(req.platform.as_ref()).ok_or_else(|| {
        ApiError::bad_request(json!({
            "error": "Invalid input",
            "details": "Platform must be a string",
        }))
    })?;

    let name = name.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
    let platform = platform
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    let games = state
        .store
        .search_games(name.as_deref(), platform.as_deref())
        .map_err(|err| {
            error!("search error: {err}");
            ApiError::internal(json!({
                "error": "Internal server error",
                "message": "An unexpected error occurred while processing your request",
            }))
        })?;

    // Zero matches is a distinguished outcome, not an empty listing.
    if games.is_empty() {
        return Err(ApiError::not_found(json!({
            "message": "No games found matching the search criteria",
        })));
    }

    Ok(Json(games))
}

pub async fn populate_games(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PopulateResponse>, ApiError> {
    match ingest::populate(state.store.as_ref(), &state.sources).await {
        Ok(summary) => Ok(Json(PopulateResponse {
            message: "Database populated successfully",
            count: summary.count,
            android_count: summary.android_count,
            ios_count: summary.ios_count,
        })),
        Err(err) => {
            error!("population error: {err}");
            Err(ApiError::internal(json!({
                "error": "Internal server error",
                "message": "An unexpected error occurred while populating the database",
                "details": err.to_string(),
            })))
        }
    }
}

/// A filter may be absent or null; any other non-string value is a client
/// error, rejected before any store query runs.
fn string_filter(value: Option<&Value>) -> Option<Option<String>> {
    match value {
        None | Some(Value::Null) => Some(None),
        Some(Value::String(s)) => Some(Some(s.clone())),
        Some(_) => None,
    }
}
