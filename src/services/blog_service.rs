//! Domain service for blog posts.
//!
//! Owns the derived fields (slug, read time, summary, like count) and the
//! author-only rules for mutation.

use thiserror::Error;

use crate::api::types::{BlogDto, BlogListDto, ToggleLikeDto};

pub const MAX_TITLE_CHARS: usize = 200;
pub const MIN_TITLE_CHARS: usize = 5;
pub const MIN_CONTENT_CHARS: usize = 10;
pub const MAX_SUMMARY_CHARS: usize = 500;
pub const MAX_TAG_CHARS: usize = 30;
pub const MAX_TAGS: usize = 10;

/// Errors specific to blog operations.
#[derive(Debug, Error)]
pub enum BlogError {
    #[error("Blog not found")]
    NotFound,

    #[error("Author not found")]
    AuthorNotFound,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("You can only modify your own blogs")]
    NotOwner,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for BlogError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for BlogError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Input for creating a blog. Derived fields are computed by the service.
#[derive(Debug, Clone)]
pub struct CreateBlogInput {
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub tags: Vec<String>,
    pub is_published: bool,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateBlogInput {
    pub title: Option<String>,
    pub content: Option<String>,
    pub summary: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_published: Option<bool>,
}

/// Filters for the public listing. `page` is 1-based.
#[derive(Debug, Clone)]
pub struct BlogFilter {
    pub page: u64,
    pub limit: u64,
    pub author_id: Option<i32>,
    pub tag: Option<String>,
    pub search: Option<String>,
}

/// Domain service trait for blogs.
#[async_trait::async_trait]
pub trait BlogService: Send + Sync {
    /// Creates a blog for `author_id`, deriving slug, read time, and
    /// summary, and bumps the author's blog count.
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::Validation`] for bad input and
    /// [`BlogError::AuthorNotFound`] when the author row is gone.
    async fn create_blog(&self, author_id: i32, input: CreateBlogInput)
        -> Result<BlogDto, BlogError>;

    /// Fetches one blog with its author and like list.
    async fn get_blog(&self, id: i32) -> Result<BlogDto, BlogError>;

    /// Published blogs, newest first, paginated.
    async fn list_blogs(&self, filter: BlogFilter) -> Result<BlogListDto, BlogError>;

    /// All published blogs by one author, newest first.
    async fn list_blogs_by_user(&self, user_id: i32) -> Result<Vec<BlogDto>, BlogError>;

    /// Updates a blog. Only the author may do this; the slug never
    /// changes, and the read time follows the content.
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::NotOwner`] when `requester_id` is not the
    /// author.
    async fn update_blog(
        &self,
        id: i32,
        requester_id: i32,
        input: UpdateBlogInput,
    ) -> Result<BlogDto, BlogError>;

    /// Deletes a blog (author only) and decrements the author's count.
    async fn delete_blog(&self, id: i32, requester_id: i32) -> Result<(), BlogError>;

    /// Likes the blog if the user has not liked it, unlikes otherwise.
    async fn toggle_like(&self, id: i32, user_id: i32) -> Result<ToggleLikeDto, BlogError>;
}

pub fn validate_title(title: &str) -> Result<(), BlogError> {
    let len = title.trim().chars().count();
    if len < MIN_TITLE_CHARS {
        return Err(BlogError::Validation(format!(
            "Title must be at least {MIN_TITLE_CHARS} characters"
        )));
    }
    if len > MAX_TITLE_CHARS {
        return Err(BlogError::Validation(format!(
            "Title cannot exceed {MAX_TITLE_CHARS} characters"
        )));
    }
    Ok(())
}

pub fn validate_content(content: &str) -> Result<(), BlogError> {
    if content.trim().chars().count() < MIN_CONTENT_CHARS {
        return Err(BlogError::Validation(format!(
            "Content must be at least {MIN_CONTENT_CHARS} characters"
        )));
    }
    Ok(())
}

pub fn validate_summary(summary: &str) -> Result<(), BlogError> {
    if summary.chars().count() > MAX_SUMMARY_CHARS {
        return Err(BlogError::Validation(format!(
            "Summary cannot exceed {MAX_SUMMARY_CHARS} characters"
        )));
    }
    Ok(())
}

pub fn validate_tags(tags: &[String]) -> Result<(), BlogError> {
    if tags.len() > MAX_TAGS {
        return Err(BlogError::Validation(format!(
            "A blog cannot have more than {MAX_TAGS} tags"
        )));
    }
    for tag in tags {
        if tag.trim().is_empty() {
            return Err(BlogError::Validation("Tags cannot be empty".to_string()));
        }
        if tag.chars().count() > MAX_TAG_CHARS {
            return Err(BlogError::Validation(format!(
                "Tag cannot exceed {MAX_TAG_CHARS} characters"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_bounds() {
        assert!(validate_title("Hi").is_err());
        assert!(validate_title("Hello").is_ok());
        assert!(validate_title(&"x".repeat(200)).is_ok());
        assert!(validate_title(&"x".repeat(201)).is_err());
    }

    #[test]
    fn title_is_trimmed_before_measuring() {
        assert!(validate_title("   ab   ").is_err());
    }

    #[test]
    fn content_minimum() {
        assert!(validate_content("too short").is_err());
        assert!(validate_content(&"w".repeat(10)).is_ok());
    }

    #[test]
    fn summary_cap() {
        assert!(validate_summary(&"s".repeat(500)).is_ok());
        assert!(validate_summary(&"s".repeat(501)).is_err());
    }

    #[test]
    fn tag_rules() {
        let ten: Vec<String> = (0..10).map(|i| format!("tag{i}")).collect();
        assert!(validate_tags(&ten).is_ok());

        let eleven: Vec<String> = (0..11).map(|i| format!("tag{i}")).collect();
        assert!(validate_tags(&eleven).is_err());

        assert!(validate_tags(&["ok".to_string(), "  ".to_string()]).is_err());
        assert!(validate_tags(&["t".repeat(31)]).is_err());
    }
}
