//! Movie routes scoped to a user
//!
//! Every handler checks that the user exists and, for a single movie, that the
//! user owns it. A movie owned by somebody else is reported exactly like a
//! missing one.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use common::models::Movie;
use serde_json::{Value, json};
use tracing::{info, warn};

use super::require_user;
use crate::{
    enrichment::{enrich_new_movie, enrich_update},
    error::{ApiError, ApiResult},
    models::{MovieForm, MovieUpdateForm, SearchQuery, SearchResponse},
    state::AppState,
};

/// Get all movies of a user
pub async fn get_movies(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<Vec<Movie>>> {
    let user = require_user(&state, user_id).await?;
    let movies = state.data_manager.get_user_movies(user.id).await?;

    Ok(Json(movies))
}

/// Add a movie, filling blank fields from the metadata service
pub async fn add_movie(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(form): Json<MovieForm>,
) -> ApiResult<(StatusCode, Json<Movie>)> {
    let user = require_user(&state, user_id).await?;

    let has_imdb_id = form
        .imdb_id
        .as_deref()
        .is_some_and(|id| !id.trim().is_empty());
    if form.title.trim().is_empty() && !has_imdb_id {
        return Err(ApiError::BadRequest("Title is required".to_string()));
    }

    let new_movie = enrich_new_movie(state.lookup.as_ref(), &form).await;
    if new_movie.title.is_empty() {
        return Err(ApiError::BadRequest(
            "Title is required and could not be looked up".to_string(),
        ));
    }

    let movie = state.data_manager.add_movie(user.id, &new_movie).await?;
    info!("User {} added movie {} ({})", user.id, movie.id, movie.title);

    Ok((StatusCode::CREATED, Json(movie)))
}

/// Search the metadata service for candidates to pick from
///
/// A failing lookup yields an empty candidate list.
pub async fn search_movies(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<SearchResponse>> {
    require_user(&state, user_id).await?;

    let title = query.title.trim().to_string();
    if title.is_empty() {
        return Err(ApiError::BadRequest("Title is required".to_string()));
    }

    let candidates = match state.lookup.search_by_title(&title).await {
        Ok(candidates) => candidates,
        Err(e) => {
            warn!("Candidate search failed for '{}': {}", title, e);
            Vec::new()
        }
    };

    Ok(Json(SearchResponse {
        query: title,
        candidates,
    }))
}

/// Get a single movie owned by the user
pub async fn get_movie(
    State(state): State<AppState>,
    Path((user_id, movie_id)): Path<(i64, i64)>,
) -> ApiResult<Json<Movie>> {
    let movie = find_owned_movie(&state, user_id, movie_id).await?;

    Ok(Json(movie))
}

/// Edit a movie owned by the user
pub async fn update_movie(
    State(state): State<AppState>,
    Path((user_id, movie_id)): Path<(i64, i64)>,
    Json(form): Json<MovieUpdateForm>,
) -> ApiResult<Json<Movie>> {
    let current = find_owned_movie(&state, user_id, movie_id).await?;

    let changes = enrich_update(state.lookup.as_ref(), &current, &form).await;
    if changes.is_empty() {
        return Ok(Json(current));
    }

    if !state.data_manager.update_movie(movie_id, &changes).await? {
        return Err(movie_not_found());
    }
    info!("User {} updated movie {}", user_id, movie_id);

    let updated = state
        .data_manager
        .get_movie(movie_id)
        .await?
        .ok_or_else(movie_not_found)?;

    Ok(Json(updated))
}

/// Delete a movie owned by the user
pub async fn delete_movie(
    State(state): State<AppState>,
    Path((user_id, movie_id)): Path<(i64, i64)>,
) -> ApiResult<Json<Value>> {
    find_owned_movie(&state, user_id, movie_id).await?;

    if !state.data_manager.delete_movie(movie_id).await? {
        return Err(movie_not_found());
    }
    info!("User {} deleted movie {}", user_id, movie_id);

    Ok(Json(json!({"message": "Movie deleted successfully"})))
}

/// Fetch a movie only if `user_id` exists and owns it
async fn find_owned_movie(state: &AppState, user_id: i64, movie_id: i64) -> ApiResult<Movie> {
    let user = require_user(state, user_id).await?;

    match state.data_manager.get_movie(movie_id).await? {
        Some(movie) if movie.user_id == user.id => Ok(movie),
        _ => Err(movie_not_found()),
    }
}

fn movie_not_found() -> ApiError {
    ApiError::NotFound("Movie not found".to_string())
}
