//! Domain service for accounts: registration, login, and profile edits.

use thiserror::Error;

use crate::api::types::{AuthDto, UserDto};

pub const MIN_USERNAME_CHARS: usize = 3;
pub const MAX_USERNAME_CHARS: usize = 30;
pub const MIN_PASSWORD_CHARS: usize = 6;
pub const MAX_BIO_CHARS: usize = 500;

/// Errors specific to account operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("{0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Account is deactivated")]
    Deactivated,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub bio: Option<String>,
}

/// Profile patch; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileInput {
    pub username: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

/// Domain service trait for accounts.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates an account and signs the new user in.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Conflict`] when the email or username is
    /// already taken, with a message naming which one.
    async fn register(&self, input: RegisterInput) -> Result<AuthDto, AuthError>;

    /// Verifies credentials and issues a token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] on a bad email or
    /// password, without revealing which.
    async fn login(&self, email: &str, password: &str) -> Result<AuthDto, AuthError>;

    /// The authenticated user's own account.
    async fn current_user(&self, user_id: i32) -> Result<UserDto, AuthError>;

    /// Updates username, bio, or avatar for the authenticated user.
    async fn update_profile(&self, user_id: i32, input: ProfileInput)
        -> Result<UserDto, AuthError>;
}

pub fn validate_username(username: &str) -> Result<(), AuthError> {
    let len = username.chars().count();
    if !(MIN_USERNAME_CHARS..=MAX_USERNAME_CHARS).contains(&len) {
        return Err(AuthError::Validation(format!(
            "Username must be between {MIN_USERNAME_CHARS} and {MAX_USERNAME_CHARS} characters"
        )));
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(AuthError::Validation(
            "Username can only contain letters, numbers, and underscores".to_string(),
        ));
    }
    Ok(())
}

/// Shallow shape check; real validation happens when mail bounces.
pub fn validate_email(email: &str) -> Result<(), AuthError> {
    let valid = email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
    });

    if valid {
        Ok(())
    } else {
        Err(AuthError::Validation(
            "Please provide a valid email address".to_string(),
        ))
    }
}

pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(AuthError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_CHARS} characters"
        )));
    }
    Ok(())
}

pub fn validate_bio(bio: &str) -> Result<(), AuthError> {
    if bio.chars().count() > MAX_BIO_CHARS {
        return Err(AuthError::Validation(format!(
            "Bio cannot exceed {MAX_BIO_CHARS} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rules() {
        assert!(validate_username("ab").is_err());
        assert!(validate_username("abc").is_ok());
        assert!(validate_username("user_42").is_ok());
        assert!(validate_username("bad name").is_err());
        assert!(validate_username("no-dashes").is_err());
        assert!(validate_username(&"u".repeat(31)).is_err());
    }

    #[test]
    fn email_shapes() {
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("nope").is_err());
        assert!(validate_email("@b.com").is_err());
        assert!(validate_email("a@nodot").is_err());
        assert!(validate_email("a@.com").is_err());
    }

    #[test]
    fn password_minimum() {
        assert!(validate_password("12345").is_err());
        assert!(validate_password("123456").is_ok());
    }

    #[test]
    fn bio_cap() {
        assert!(validate_bio(&"b".repeat(500)).is_ok());
        assert!(validate_bio(&"b".repeat(501)).is_err());
    }
}
