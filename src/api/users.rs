//! Public user directory endpoints.

use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::types::{ApiResponse, PublicUserDto, UserProfileDto};
use super::validation::validate_user_id;
use super::{ApiError, AppState};

/// GET /users
/// Active users, most prolific first.
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<PublicUserDto>>>, ApiError> {
    let result = state.user_service().list_users().await?;
    Ok(Json(ApiResponse::success(result)))
}

/// GET /users/{id}
/// A user's public profile with their recent published blogs.
pub async fn get_user_profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<UserProfileDto>>, ApiError> {
    let id = validate_user_id(id)?;
    let result = state.user_service().get_profile(id).await?;
    Ok(Json(ApiResponse::success(result)))
}
