//! API service routes

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use common::models::User;
use serde_json::{Value, json};
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    models::{CreateUserRequest, UserMoviesResponse},
    state::AppState,
};

pub mod movies;

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/users", get(get_users).post(create_user))
        .route("/users/:user_id", get(get_user).delete(delete_user))
        .route(
            "/users/:user_id/movies",
            get(movies::get_movies).post(movies::add_movie),
        )
        .route("/users/:user_id/search", get(movies::search_movies))
        .route(
            "/users/:user_id/movies/:movie_id",
            get(movies::get_movie)
                .put(movies::update_movie)
                .delete(movies::delete_movie),
        )
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "movieweb-api"
    }))
}

/// Get all users
pub async fn get_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = state.data_manager.get_all_users().await?;

    Ok(Json(users))
}

/// Create a new user
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Name is required".to_string()));
    }

    let user = state.data_manager.add_user(payload.name.trim()).await?;
    info!("Created user {} ({})", user.id, user.name);

    Ok((StatusCode::CREATED, Json(user)))
}

/// Get a user and their movies
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<UserMoviesResponse>> {
    let user = require_user(&state, user_id).await?;
    let movies = state.data_manager.get_user_movies(user.id).await?;

    Ok(Json(UserMoviesResponse { user, movies }))
}

/// Delete a user and all of their movies
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<Value>> {
    if !state.data_manager.delete_user(user_id).await? {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    Ok(Json(json!({"message": "User deleted successfully"})))
}

/// Fetch a user or fail with 404
pub(crate) async fn require_user(state: &AppState, user_id: i64) -> ApiResult<User> {
    state
        .data_manager
        .get_user(user_id)
        .await?
        .ok_or(ApiError::NotFound("User not found".to_string()))
}
