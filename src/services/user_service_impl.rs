//! `SeaORM` implementation of the `UserService` trait.

use async_trait::async_trait;

use crate::api::types::{AuthorDto, BlogDto, PublicUserDto, UserProfileDto};
use crate::db::Store;
use crate::entities::users;
use crate::models::blog::decode_tags;
use crate::services::user_service::{
    UserError, UserService, DIRECTORY_LIMIT, PROFILE_RECENT_BLOGS,
};

pub struct SeaOrmUserService {
    store: Store,
}

impl SeaOrmUserService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    fn public_dto(user: &users::Model) -> PublicUserDto {
        PublicUserDto {
            id: user.id,
            username: user.username.clone(),
            bio: user.bio.clone(),
            avatar: user.avatar.clone(),
            blog_count: user.blog_count,
            created_at: user.created_at.clone(),
        }
    }
}

#[async_trait]
impl UserService for SeaOrmUserService {
    async fn list_users(&self) -> Result<Vec<PublicUserDto>, UserError> {
        let users = self.store.list_active_users(DIRECTORY_LIMIT).await?;
        Ok(users.iter().map(Self::public_dto).collect())
    }

    async fn get_profile(&self, user_id: i32) -> Result<UserProfileDto, UserError> {
        let user = self
            .store
            .get_user(user_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or(UserError::NotFound)?;

        let author = AuthorDto {
            id: user.id,
            username: user.username.clone(),
            avatar: user.avatar.clone(),
            bio: user.bio.clone(),
        };

        let recent_blogs = self
            .store
            .list_published_blogs_by_author(user.id, Some(PROFILE_RECENT_BLOGS))
            .await?
            .into_iter()
            .map(|blog| BlogDto {
                id: blog.id,
                title: blog.title,
                content: blog.content,
                summary: blog.summary,
                author: author.clone(),
                tags: decode_tags(&blog.tags),
                likes_count: blog.likes_count,
                read_time: blog.read_time,
                is_published: blog.is_published,
                slug: blog.slug,
                likes: None,
                published_at: blog.published_at,
                created_at: blog.created_at,
                updated_at: blog.updated_at,
            })
            .collect();

        Ok(UserProfileDto {
            user: Self::public_dto(&user),
            recent_blogs,
        })
    }
}
