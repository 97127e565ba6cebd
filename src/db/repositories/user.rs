use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entities::{prelude::*, users};

/// Fields required to insert a user row. The password arrives already
/// hashed; this layer never sees plaintext credentials.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub bio: Option<String>,
}

/// Partial profile update; `None` fields keep their stored values.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub username: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, new: NewUser) -> Result<users::Model> {
        let now = chrono::Utc::now().to_rfc3339();

        let active = users::ActiveModel {
            username: Set(new.username),
            email: Set(new.email),
            password_hash: Set(new.password_hash),
            bio: Set(new.bio),
            avatar: Set(None),
            is_active: Set(true),
            blog_count: Set(0),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        active.insert(&self.conn).await.context("Failed to insert user")
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<users::Model>> {
        Users::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<users::Model>> {
        Users::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("Failed to query user by email")
    }

    pub async fn get_by_username(&self, username: &str) -> Result<Option<users::Model>> {
        Users::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query user by username")
    }

    /// True when another user (different id) already holds this username.
    pub async fn username_taken_by_other(&self, username: &str, user_id: i32) -> Result<bool> {
        let existing = Users::find()
            .filter(users::Column::Username.eq(username))
            .filter(users::Column::Id.ne(user_id))
            .one(&self.conn)
            .await
            .context("Failed to check username availability")?;

        Ok(existing.is_some())
    }

    pub async fn update_profile(
        &self,
        user_id: i32,
        patch: ProfilePatch,
    ) -> Result<Option<users::Model>> {
        let Some(user) = Users::find_by_id(user_id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: users::ActiveModel = user.into();
        if let Some(username) = patch.username {
            active.username = Set(username);
        }
        if let Some(bio) = patch.bio {
            active.bio = Set(Some(bio));
        }
        if let Some(avatar) = patch.avatar {
            active.avatar = Set(Some(avatar));
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let updated = active
            .update(&self.conn)
            .await
            .context("Failed to update user profile")?;

        Ok(Some(updated))
    }

    /// Atomic counter adjustment; the caller never reads the current
    /// value, so concurrent blog creates/deletes cannot lose updates.
    pub async fn increment_blog_count(&self, user_id: i32, delta: i32) -> Result<()> {
        use sea_orm::sea_query::Expr;

        Users::update_many()
            .col_expr(
                users::Column::BlogCount,
                Expr::col(users::Column::BlogCount).add(delta),
            )
            .filter(users::Column::Id.eq(user_id))
            .exec(&self.conn)
            .await
            .context("Failed to adjust blog count")?;

        Ok(())
    }

    /// Batch lookup for embedding authors into blog listings.
    pub async fn get_by_ids(&self, ids: &[i32]) -> Result<Vec<users::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        Users::find()
            .filter(users::Column::Id.is_in(ids.iter().copied()))
            .all(&self.conn)
            .await
            .context("Failed to query users by IDs")
    }

    /// Active users for the public directory, most prolific first.
    pub async fn list_active(&self, limit: u64) -> Result<Vec<users::Model>> {
        Users::find()
            .filter(users::Column::IsActive.eq(true))
            .order_by_desc(users::Column::BlogCount)
            .order_by_desc(users::Column::CreatedAt)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("Failed to list users")
    }
}
