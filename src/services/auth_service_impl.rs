//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::api::types::{AuthDto, UserDto};
use crate::auth::{password, TokenIssuer};
use crate::config::SecurityConfig;
use crate::db::{NewUser, ProfilePatch, Store};
use crate::entities::users;
use crate::services::auth_service::{
    validate_bio, validate_email, validate_password, validate_username, AuthError, AuthService,
    ProfileInput, RegisterInput,
};

pub struct SeaOrmAuthService {
    store: Store,
    tokens: TokenIssuer,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, tokens: TokenIssuer, security: SecurityConfig) -> Self {
        Self {
            store,
            tokens,
            security,
        }
    }

    fn user_dto(user: &users::Model) -> UserDto {
        UserDto {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            bio: user.bio.clone(),
            avatar: user.avatar.clone(),
            blog_count: user.blog_count,
            created_at: user.created_at.clone(),
            updated_at: user.updated_at.clone(),
        }
    }

    fn signed_in(&self, user: &users::Model) -> Result<AuthDto, AuthError> {
        let token = self
            .tokens
            .issue(user.id)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(AuthDto {
            user: Self::user_dto(user),
            token,
        })
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(&self, input: RegisterInput) -> Result<AuthDto, AuthError> {
        let username = input.username.trim().to_string();
        let email = input.email.trim().to_lowercase();

        validate_username(&username)?;
        validate_email(&email)?;
        validate_password(&input.password)?;
        if let Some(bio) = &input.bio {
            validate_bio(bio)?;
        }

        // Checked separately so the caller learns which field collided.
        if self.store.get_user_by_email(&email).await?.is_some() {
            return Err(AuthError::Conflict("Email already registered".to_string()));
        }
        if self.store.get_user_by_username(&username).await?.is_some() {
            return Err(AuthError::Conflict("Username already taken".to_string()));
        }

        let password_hash = password::hash_password(&input.password, &self.security).await?;

        let user = self
            .store
            .create_user(NewUser {
                username,
                email,
                password_hash,
                bio: input.bio,
            })
            .await?;

        info!(user_id = user.id, username = %user.username, "User registered");

        self.signed_in(&user)
    }

    async fn login(&self, email: &str, password_input: &str) -> Result<AuthDto, AuthError> {
        let email = email.trim().to_lowercase();

        let Some(user) = self.store.get_user_by_email(&email).await? else {
            return Err(AuthError::InvalidCredentials);
        };

        if !password::verify_password(password_input, &user.password_hash).await? {
            warn!(user_id = user.id, "Failed login attempt");
            return Err(AuthError::InvalidCredentials);
        }

        if !user.is_active {
            return Err(AuthError::Deactivated);
        }

        info!(user_id = user.id, "User logged in");

        self.signed_in(&user)
    }

    async fn current_user(&self, user_id: i32) -> Result<UserDto, AuthError> {
        let user = self
            .store
            .get_user(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(Self::user_dto(&user))
    }

    async fn update_profile(
        &self,
        user_id: i32,
        input: ProfileInput,
    ) -> Result<UserDto, AuthError> {
        let username = input.username.map(|u| u.trim().to_string());

        if let Some(username) = &username {
            validate_username(username)?;
            if self.store.username_taken_by_other(username, user_id).await? {
                return Err(AuthError::Conflict("Username already taken".to_string()));
            }
        }
        if let Some(bio) = &input.bio {
            validate_bio(bio)?;
        }

        let updated = self
            .store
            .update_user_profile(
                user_id,
                ProfilePatch {
                    username,
                    bio: input.bio,
                    avatar: input.avatar,
                },
            )
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(Self::user_dto(&updated))
    }
}
