use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::entities::{blog_likes, blogs, users};

pub mod migrator;
pub mod repositories;

pub use repositories::blog::{BlogListQuery, BlogPatchRow, NewBlogRow};
pub use repositories::user::{NewUser, ProfilePatch};

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        // In-memory SQLite gets a separate database per pooled
        // connection, so it must stay on a single one.
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn blog_repo(&self) -> repositories::blog::BlogRepository {
        repositories::blog::BlogRepository::new(self.conn.clone())
    }

    // ========== Users ==========

    pub async fn create_user(&self, new: NewUser) -> Result<users::Model> {
        self.user_repo().create(new).await
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<users::Model>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<users::Model>> {
        self.user_repo().get_by_email(email).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<users::Model>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn username_taken_by_other(&self, username: &str, user_id: i32) -> Result<bool> {
        self.user_repo()
            .username_taken_by_other(username, user_id)
            .await
    }

    pub async fn update_user_profile(
        &self,
        user_id: i32,
        patch: ProfilePatch,
    ) -> Result<Option<users::Model>> {
        self.user_repo().update_profile(user_id, patch).await
    }

    pub async fn increment_blog_count(&self, user_id: i32, delta: i32) -> Result<()> {
        self.user_repo().increment_blog_count(user_id, delta).await
    }

    pub async fn get_users_by_ids(&self, ids: &[i32]) -> Result<Vec<users::Model>> {
        self.user_repo().get_by_ids(ids).await
    }

    pub async fn list_active_users(&self, limit: u64) -> Result<Vec<users::Model>> {
        self.user_repo().list_active(limit).await
    }

    // ========== Blogs ==========

    pub async fn insert_blog(&self, new: NewBlogRow) -> Result<blogs::Model> {
        self.blog_repo().insert(new).await
    }

    pub async fn get_blog(&self, id: i32) -> Result<Option<blogs::Model>> {
        self.blog_repo().get(id).await
    }

    pub async fn update_blog(&self, id: i32, patch: BlogPatchRow) -> Result<Option<blogs::Model>> {
        self.blog_repo().update(id, patch).await
    }

    pub async fn remove_blog(&self, id: i32) -> Result<bool> {
        self.blog_repo().remove(id).await
    }

    pub async fn list_published_blogs(
        &self,
        query: &BlogListQuery,
    ) -> Result<(Vec<blogs::Model>, u64)> {
        self.blog_repo().list_published(query).await
    }

    pub async fn list_published_blogs_by_author(
        &self,
        author_id: i32,
        limit: Option<u64>,
    ) -> Result<Vec<blogs::Model>> {
        self.blog_repo()
            .list_published_by_author(author_id, limit)
            .await
    }

    pub async fn toggle_blog_like(
        &self,
        blog_id: i32,
        user_id: i32,
    ) -> Result<Option<(blogs::Model, bool)>> {
        self.blog_repo().toggle_like(blog_id, user_id).await
    }

    pub async fn blog_likes_with_users(
        &self,
        blog_id: i32,
    ) -> Result<Vec<(blog_likes::Model, Option<users::Model>)>> {
        self.blog_repo().likes_with_users(blog_id).await
    }
}
