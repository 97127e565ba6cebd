//! Blog endpoints.
//!
//! All business logic is delegated to [`BlogService`]; handlers only
//! validate request shape and translate errors.
//!
//! [`BlogService`]: crate::services::BlogService

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use super::auth::AuthUser;
use super::types::{
    ApiResponse, BlogDto, BlogListDto, BlogListParams, CreateBlogRequest, MessageDto,
    ToggleLikeDto, UpdateBlogRequest,
};
use super::validation::{
    validate_blog_id, validate_limit, validate_page, validate_search, validate_user_id,
    DEFAULT_PAGE_LIMIT,
};
use super::{ApiError, AppState};
use crate::services::{BlogFilter, CreateBlogInput, UpdateBlogInput};

/// GET /blogs
/// Published blogs, newest first, with optional author/tag/search
/// filters and pagination.
pub async fn list_blogs(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BlogListParams>,
) -> Result<Json<ApiResponse<BlogListDto>>, ApiError> {
    let page = validate_page(params.page.unwrap_or(1))?;
    let limit = validate_limit(params.limit.unwrap_or(DEFAULT_PAGE_LIMIT))?;
    let author_id = params.author.map(validate_user_id).transpose()?;
    let search = params
        .search
        .as_deref()
        .map(validate_search)
        .transpose()?
        .flatten();
    let tag = params.tag.map(|t| t.trim().to_string()).filter(|t| !t.is_empty());

    let result = state
        .blog_service()
        .list_blogs(BlogFilter {
            page,
            limit,
            author_id,
            tag,
            search,
        })
        .await?;

    Ok(Json(ApiResponse::success(result)))
}

/// GET /blogs/{id}
/// One blog with its author and like list.
pub async fn get_blog(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<BlogDto>>, ApiError> {
    let id = validate_blog_id(id)?;
    let result = state.blog_service().get_blog(id).await?;
    Ok(Json(ApiResponse::success(result)))
}

/// POST /blogs
/// Create a blog for the authenticated user.
pub async fn create_blog(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateBlogRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .blog_service()
        .create_blog(
            user.id,
            CreateBlogInput {
                title: payload.title,
                content: payload.content,
                summary: payload.summary,
                tags: payload.tags.unwrap_or_default(),
                is_published: payload.is_published.unwrap_or(true),
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(result))))
}

/// PUT /blogs/{id}
/// Update a blog; author only. The slug never changes here.
pub async fn update_blog(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateBlogRequest>,
) -> Result<Json<ApiResponse<BlogDto>>, ApiError> {
    let id = validate_blog_id(id)?;

    let result = state
        .blog_service()
        .update_blog(
            id,
            user.id,
            UpdateBlogInput {
                title: payload.title,
                content: payload.content,
                summary: payload.summary,
                tags: payload.tags,
                is_published: payload.is_published,
            },
        )
        .await?;

    Ok(Json(ApiResponse::success(result)))
}

/// DELETE /blogs/{id}
/// Delete a blog; author only.
pub async fn delete_blog(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MessageDto>>, ApiError> {
    let id = validate_blog_id(id)?;
    state.blog_service().delete_blog(id, user.id).await?;

    Ok(Json(ApiResponse::success(MessageDto {
        message: "Blog deleted successfully".to_string(),
    })))
}

/// POST /blogs/{id}/like
/// Toggle the authenticated user's like on a blog.
pub async fn toggle_like(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ToggleLikeDto>>, ApiError> {
    let id = validate_blog_id(id)?;
    let result = state.blog_service().toggle_like(id, user.id).await?;
    Ok(Json(ApiResponse::success(result)))
}

/// GET /blogs/user/{user_id}
/// All published blogs by one author.
pub async fn list_user_blogs(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<BlogDto>>>, ApiError> {
    let user_id = validate_user_id(user_id)?;
    let result = state.blog_service().list_blogs_by_user(user_id).await?;
    Ok(Json(ApiResponse::success(result)))
}
