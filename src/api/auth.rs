//! Account endpoints and the bearer-token middleware.

use axum::{
    Extension, Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::types::{
    ApiResponse, AuthDto, LoginRequest, MessageDto, RegisterRequest, UpdateProfileRequest, UserDto,
};
use super::{ApiError, AppState};
use crate::services::{ProfileInput, RegisterInput};

/// The authenticated caller, injected by [`auth_middleware`] for every
/// protected route.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i32,
    pub username: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Requires a valid `Authorization: Bearer <token>` header. Tokens for
/// deleted or deactivated accounts are rejected even before expiry.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = extract_bearer_token(&headers) else {
        return Err(ApiError::unauthorized("Authentication required"));
    };

    let Ok(user_id) = state.tokens().verify(&token) else {
        return Err(ApiError::unauthorized("Invalid or expired token"));
    };

    let user = state
        .store()
        .get_user(user_id)
        .await
        .map_err(|e| ApiError::internal(format!("Authentication error: {e}")))?;

    let Some(user) = user.filter(|u| u.is_active) else {
        return Err(ApiError::unauthorized("Invalid or expired token"));
    };

    request.extensions_mut().insert(AuthUser {
        id: user.id,
        username: user.username,
    });

    Ok(next.run(request).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_header = headers.get("Authorization")?;
    let auth_str = auth_header.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/register
/// Create an account and return it with a signed token.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .auth_service()
        .register(RegisterInput {
            username: payload.username,
            email: payload.email,
            password: payload.password,
            bio: payload.bio,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(result)),
    ))
}

/// POST /auth/login
/// Verify credentials and return the account with a signed token.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthDto>>, ApiError> {
    if payload.email.is_empty() {
        return Err(ApiError::validation("Email is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let result = state
        .auth_service()
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(ApiResponse::success(result)))
}

/// POST /auth/logout
/// Stateless tokens have nothing to revoke server-side; the client
/// discards its copy.
pub async fn logout(
    Extension(user): Extension<AuthUser>,
) -> Json<ApiResponse<MessageDto>> {
    tracing::info!(user_id = user.id, "User logged out");

    Json(ApiResponse::success(MessageDto {
        message: "Logged out successfully".to_string(),
    }))
}

/// GET /auth/me
/// The authenticated user's own account.
pub async fn get_current_user(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let result = state.auth_service().current_user(user.id).await?;
    Ok(Json(ApiResponse::success(result)))
}

/// PUT /auth/profile
/// Update username, bio, or avatar.
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let result = state
        .auth_service()
        .update_profile(
            user.id,
            ProfileInput {
                username: payload.username,
                bio: payload.bio,
                avatar: payload.avatar,
            },
        )
        .await?;

    Ok(Json(ApiResponse::success(result)))
}
