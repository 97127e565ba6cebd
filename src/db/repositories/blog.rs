use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::entities::{blog_likes, blogs, prelude::*, users};

/// Fully-derived row ready for insertion. Slug, read time, and summary
/// are computed by the service layer before this point.
#[derive(Debug, Clone)]
pub struct NewBlogRow {
    pub title: String,
    pub content: String,
    pub summary: String,
    pub author_id: i32,
    pub tags: String,
    pub read_time: i32,
    pub is_published: bool,
    pub slug: String,
}

/// Column-level patch; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct BlogPatchRow {
    pub title: Option<String>,
    pub content: Option<String>,
    pub summary: Option<String>,
    pub tags: Option<String>,
    pub is_published: Option<bool>,
    pub read_time: Option<i32>,
}

/// Filters and pagination for the public listing. `page` is 1-based.
#[derive(Debug, Clone)]
pub struct BlogListQuery {
    pub page: u64,
    pub limit: u64,
    pub author_id: Option<i32>,
    pub tag: Option<String>,
    pub search: Option<String>,
}

pub struct BlogRepository {
    conn: DatabaseConnection,
}

impl BlogRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn insert(&self, new: NewBlogRow) -> Result<blogs::Model> {
        let now = chrono::Utc::now().to_rfc3339();

        let active = blogs::ActiveModel {
            title: Set(new.title),
            content: Set(new.content),
            summary: Set(new.summary),
            author_id: Set(new.author_id),
            tags: Set(new.tags),
            likes_count: Set(0),
            read_time: Set(new.read_time),
            is_published: Set(new.is_published),
            slug: Set(new.slug),
            published_at: Set(now.clone()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        active.insert(&self.conn).await.context("Failed to insert blog")
    }

    pub async fn get(&self, id: i32) -> Result<Option<blogs::Model>> {
        Blogs::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query blog by ID")
    }

    pub async fn update(&self, id: i32, patch: BlogPatchRow) -> Result<Option<blogs::Model>> {
        let Some(blog) = Blogs::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: blogs::ActiveModel = blog.into();
        if let Some(title) = patch.title {
            active.title = Set(title);
        }
        if let Some(content) = patch.content {
            active.content = Set(content);
        }
        if let Some(summary) = patch.summary {
            active.summary = Set(summary);
        }
        if let Some(tags) = patch.tags {
            active.tags = Set(tags);
        }
        if let Some(is_published) = patch.is_published {
            active.is_published = Set(is_published);
        }
        if let Some(read_time) = patch.read_time {
            active.read_time = Set(read_time);
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let updated = active
            .update(&self.conn)
            .await
            .context("Failed to update blog")?;

        Ok(Some(updated))
    }

    /// Returns false when the blog did not exist. Like rows go with it
    /// via the cascade on blog_likes.
    pub async fn remove(&self, id: i32) -> Result<bool> {
        let result = Blogs::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete blog")?;

        Ok(result.rows_affected > 0)
    }

    /// Published blogs, newest first, with the total row count for
    /// pagination.
    pub async fn list_published(&self, query: &BlogListQuery) -> Result<(Vec<blogs::Model>, u64)> {
        let mut find = Blogs::find()
            .filter(blogs::Column::IsPublished.eq(true))
            .order_by_desc(blogs::Column::CreatedAt);

        if let Some(author_id) = query.author_id {
            find = find.filter(blogs::Column::AuthorId.eq(author_id));
        }

        if let Some(tag) = &query.tag {
            // Tags live in a JSON array column; matching the quoted form
            // keeps "rust" from matching "rustacean".
            find = find.filter(blogs::Column::Tags.contains(format!("\"{tag}\"")));
        }

        if let Some(search) = &query.search {
            find = find.filter(
                Condition::any()
                    .add(blogs::Column::Title.contains(search))
                    .add(blogs::Column::Content.contains(search))
                    .add(blogs::Column::Summary.contains(search)),
            );
        }

        let paginator = find.paginate(&self.conn, query.limit);
        let total = paginator
            .num_items()
            .await
            .context("Failed to count blogs")?;
        let rows = paginator
            .fetch_page(query.page.saturating_sub(1))
            .await
            .context("Failed to fetch blog page")?;

        Ok((rows, total))
    }

    pub async fn list_published_by_author(
        &self,
        author_id: i32,
        limit: Option<u64>,
    ) -> Result<Vec<blogs::Model>> {
        let mut find = Blogs::find()
            .filter(blogs::Column::AuthorId.eq(author_id))
            .filter(blogs::Column::IsPublished.eq(true))
            .order_by_desc(blogs::Column::CreatedAt);

        if let Some(limit) = limit {
            find = find.limit(limit);
        }

        find.all(&self.conn)
            .await
            .context("Failed to list blogs by author")
    }

    /// Flips a user's like on a blog and recomputes the stored count from
    /// the like rows, all inside one transaction. Returns the refreshed
    /// blog and whether the user now likes it, or `None` if the blog does
    /// not exist.
    pub async fn toggle_like(
        &self,
        blog_id: i32,
        user_id: i32,
    ) -> Result<Option<(blogs::Model, bool)>> {
        let txn = self.conn.begin().await.context("Failed to open transaction")?;

        let Some(blog) = Blogs::find_by_id(blog_id).one(&txn).await? else {
            txn.rollback().await.ok();
            return Ok(None);
        };

        let existing = BlogLikes::find()
            .filter(blog_likes::Column::BlogId.eq(blog_id))
            .filter(blog_likes::Column::UserId.eq(user_id))
            .one(&txn)
            .await?;

        let is_liked = if let Some(like) = existing {
            like.delete(&txn).await?;
            false
        } else {
            let active = blog_likes::ActiveModel {
                blog_id: Set(blog_id),
                user_id: Set(user_id),
                liked_at: Set(chrono::Utc::now().to_rfc3339()),
                ..Default::default()
            };
            active.insert(&txn).await?;
            true
        };

        // Recompute from the authoritative set rather than adjusting the
        // counter, so the invariant holds even after a lost race.
        let count = BlogLikes::find()
            .filter(blog_likes::Column::BlogId.eq(blog_id))
            .count(&txn)
            .await?;

        let mut active: blogs::ActiveModel = blog.into();
        active.likes_count = Set(i32::try_from(count).unwrap_or(i32::MAX));
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());
        let updated = active.update(&txn).await?;

        txn.commit().await.context("Failed to commit like toggle")?;

        Ok(Some((updated, is_liked)))
    }

    /// Like rows for a blog together with the liking user, oldest first.
    pub async fn likes_with_users(
        &self,
        blog_id: i32,
    ) -> Result<Vec<(blog_likes::Model, Option<users::Model>)>> {
        BlogLikes::find()
            .filter(blog_likes::Column::BlogId.eq(blog_id))
            .order_by_asc(blog_likes::Column::LikedAt)
            .find_also_related(Users)
            .all(&self.conn)
            .await
            .context("Failed to load blog likes")
    }
}
