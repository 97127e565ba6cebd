use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// The requesting user's own account (includes email, never the hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub blog_count: i32,
    pub created_at: String,
    pub updated_at: String,
}

/// What other users see in listings and profiles.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUserDto {
    pub id: i32,
    pub username: String,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub blog_count: i32,
    pub created_at: String,
}

/// Author projection embedded in blog responses.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorDto {
    pub id: i32,
    pub username: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LikeDto {
    pub user_id: i32,
    pub username: Option<String>,
    pub liked_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlogDto {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub summary: String,
    pub author: AuthorDto,
    pub tags: Vec<String>,
    pub likes_count: i32,
    pub read_time: i32,
    pub is_published: bool,
    pub slug: String,
    /// Populated on single-blog and like-toggle responses only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<Vec<LikeDto>>,
    pub published_at: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize)]
pub struct PaginationDto {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

#[derive(Debug, Serialize)]
pub struct BlogListDto {
    pub blogs: Vec<BlogDto>,
    pub pagination: PaginationDto,
}

#[derive(Debug, Serialize)]
pub struct ToggleLikeDto {
    pub blog: BlogDto,
    pub is_liked: bool,
}

/// Registration/login result: the account plus a bearer token.
#[derive(Debug, Serialize)]
pub struct AuthDto {
    pub user: UserDto,
    pub token: String,
}

/// Public profile page payload.
#[derive(Debug, Serialize)]
pub struct UserProfileDto {
    pub user: PublicUserDto,
    pub recent_blogs: Vec<BlogDto>,
}

#[derive(Debug, Serialize)]
pub struct MessageDto {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthDto {
    pub status: String,
    pub version: String,
    pub database: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub bio: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateBlogRequest {
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBlogRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub summary: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct BlogListParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub author: Option<i32>,
    pub tag: Option<String>,
    pub search: Option<String>,
}
