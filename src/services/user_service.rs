//! Domain service for the public user directory and profile pages.

use thiserror::Error;

use crate::api::types::{PublicUserDto, UserProfileDto};

/// How many users the public directory returns.
pub const DIRECTORY_LIMIT: u64 = 50;

/// How many recent blogs a profile page embeds.
pub const PROFILE_RECENT_BLOGS: u64 = 5;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for UserError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Domain service trait for public user views.
#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    /// Active users, most prolific first.
    async fn list_users(&self) -> Result<Vec<PublicUserDto>, UserError>;

    /// A user's public profile with their most recent published blogs.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::NotFound`] for missing or deactivated
    /// accounts.
    async fn get_profile(&self, user_id: i32) -> Result<UserProfileDto, UserError>;
}
