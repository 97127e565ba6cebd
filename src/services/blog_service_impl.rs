//! `SeaORM` implementation of the `BlogService` trait.

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::info;

use crate::api::types::{AuthorDto, BlogDto, BlogListDto, LikeDto, PaginationDto, ToggleLikeDto};
use crate::db::{BlogListQuery, BlogPatchRow, NewBlogRow, Store};
use crate::entities::{blogs, users};
use crate::models::blog::{decode_tags, derive_summary, encode_tags, read_time_minutes, slugify};
use crate::services::blog_service::{
    validate_content, validate_summary, validate_tags, validate_title, BlogError, BlogFilter,
    BlogService, CreateBlogInput, UpdateBlogInput,
};

pub struct SeaOrmBlogService {
    store: Store,
}

impl SeaOrmBlogService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    fn author_dto(user: &users::Model) -> AuthorDto {
        AuthorDto {
            id: user.id,
            username: user.username.clone(),
            avatar: user.avatar.clone(),
            bio: user.bio.clone(),
        }
    }

    fn blog_dto(blog: blogs::Model, author: AuthorDto, likes: Option<Vec<LikeDto>>) -> BlogDto {
        BlogDto {
            id: blog.id,
            title: blog.title,
            content: blog.content,
            summary: blog.summary,
            author,
            tags: decode_tags(&blog.tags),
            likes_count: blog.likes_count,
            read_time: blog.read_time,
            is_published: blog.is_published,
            slug: blog.slug,
            likes,
            published_at: blog.published_at,
            created_at: blog.created_at,
            updated_at: blog.updated_at,
        }
    }

    /// Resolves authors for a batch of blog rows in one query and joins
    /// them into DTOs, preserving row order.
    async fn with_authors(&self, rows: Vec<blogs::Model>) -> Result<Vec<BlogDto>, BlogError> {
        let mut ids: Vec<i32> = rows.iter().map(|b| b.author_id).collect();
        ids.sort_unstable();
        ids.dedup();

        let authors: HashMap<i32, AuthorDto> = self
            .store
            .get_users_by_ids(&ids)
            .await?
            .iter()
            .map(|u| (u.id, Self::author_dto(u)))
            .collect();

        Ok(rows
            .into_iter()
            .map(|blog| {
                let author = authors.get(&blog.author_id).cloned().unwrap_or(AuthorDto {
                    id: blog.author_id,
                    username: "[deleted]".to_string(),
                    avatar: None,
                    bio: None,
                });
                Self::blog_dto(blog, author, None)
            })
            .collect())
    }

    async fn likes_for(&self, blog_id: i32) -> Result<Vec<LikeDto>, BlogError> {
        let rows = self.store.blog_likes_with_users(blog_id).await?;

        Ok(rows
            .into_iter()
            .map(|(like, user)| LikeDto {
                user_id: like.user_id,
                username: user.map(|u| u.username),
                liked_at: like.liked_at,
            })
            .collect())
    }

    async fn detailed_dto(&self, blog: blogs::Model) -> Result<BlogDto, BlogError> {
        let author = self
            .store
            .get_user(blog.author_id)
            .await?
            .ok_or(BlogError::AuthorNotFound)?;
        let likes = self.likes_for(blog.id).await?;

        Ok(Self::blog_dto(blog, Self::author_dto(&author), Some(likes)))
    }
}

#[async_trait]
impl BlogService for SeaOrmBlogService {
    async fn create_blog(
        &self,
        author_id: i32,
        input: CreateBlogInput,
    ) -> Result<BlogDto, BlogError> {
        validate_title(&input.title)?;
        validate_content(&input.content)?;
        validate_tags(&input.tags)?;
        if let Some(summary) = &input.summary {
            validate_summary(summary)?;
        }

        let author = self
            .store
            .get_user(author_id)
            .await?
            .ok_or(BlogError::AuthorNotFound)?;

        let title = input.title.trim().to_string();
        let slug = slugify(&title, chrono::Utc::now().timestamp_millis());
        let summary = input
            .summary
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| derive_summary(&input.content));

        let row = NewBlogRow {
            read_time: read_time_minutes(&input.content),
            tags: encode_tags(&input.tags),
            title,
            content: input.content,
            summary,
            author_id,
            is_published: input.is_published,
            slug,
        };

        let blog = self.store.insert_blog(row).await?;
        self.store.increment_blog_count(author_id, 1).await?;

        info!(blog_id = blog.id, author = %author.username, "Blog created");

        Ok(Self::blog_dto(blog, Self::author_dto(&author), None))
    }

    async fn get_blog(&self, id: i32) -> Result<BlogDto, BlogError> {
        let blog = self.store.get_blog(id).await?.ok_or(BlogError::NotFound)?;
        self.detailed_dto(blog).await
    }

    async fn list_blogs(&self, filter: BlogFilter) -> Result<BlogListDto, BlogError> {
        let query = BlogListQuery {
            page: filter.page,
            limit: filter.limit,
            author_id: filter.author_id,
            tag: filter.tag,
            search: filter.search,
        };

        let (rows, total) = self.store.list_published_blogs(&query).await?;
        let blogs = self.with_authors(rows).await?;

        Ok(BlogListDto {
            blogs,
            pagination: PaginationDto {
                page: filter.page,
                limit: filter.limit,
                total,
                pages: total.div_ceil(filter.limit),
            },
        })
    }

    async fn list_blogs_by_user(&self, user_id: i32) -> Result<Vec<BlogDto>, BlogError> {
        let rows = self
            .store
            .list_published_blogs_by_author(user_id, None)
            .await?;
        self.with_authors(rows).await
    }

    async fn update_blog(
        &self,
        id: i32,
        requester_id: i32,
        input: UpdateBlogInput,
    ) -> Result<BlogDto, BlogError> {
        let blog = self.store.get_blog(id).await?.ok_or(BlogError::NotFound)?;

        if blog.author_id != requester_id {
            return Err(BlogError::NotOwner);
        }

        if let Some(title) = &input.title {
            validate_title(title)?;
        }
        if let Some(content) = &input.content {
            validate_content(content)?;
        }
        if let Some(summary) = &input.summary {
            validate_summary(summary)?;
        }
        if let Some(tags) = &input.tags {
            validate_tags(tags)?;
        }

        // The slug keeps its creation-time value even when the title
        // changes; the read time follows the content.
        let patch = BlogPatchRow {
            read_time: input.content.as_deref().map(read_time_minutes),
            title: input.title.map(|t| t.trim().to_string()),
            content: input.content,
            summary: input.summary,
            tags: input.tags.as_deref().map(encode_tags),
            is_published: input.is_published,
        };

        let updated = self
            .store
            .update_blog(id, patch)
            .await?
            .ok_or(BlogError::NotFound)?;

        self.detailed_dto(updated).await
    }

    async fn delete_blog(&self, id: i32, requester_id: i32) -> Result<(), BlogError> {
        let blog = self.store.get_blog(id).await?.ok_or(BlogError::NotFound)?;

        if blog.author_id != requester_id {
            return Err(BlogError::NotOwner);
        }

        if self.store.remove_blog(id).await? {
            self.store.increment_blog_count(blog.author_id, -1).await?;
            info!(blog_id = id, "Blog deleted");
        }

        Ok(())
    }

    async fn toggle_like(&self, id: i32, user_id: i32) -> Result<ToggleLikeDto, BlogError> {
        let (blog, is_liked) = self
            .store
            .toggle_blog_like(id, user_id)
            .await?
            .ok_or(BlogError::NotFound)?;

        let dto = self.detailed_dto(blog).await?;

        Ok(ToggleLikeDto {
            blog: dto,
            is_liked,
        })
    }
}
