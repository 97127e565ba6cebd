use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "blogs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,

    pub content: String,

    pub summary: String,

    pub author_id: i32,

    /// JSON-encoded array of tag strings.
    pub tags: String,

    /// Always equals the number of rows in blog_likes for this blog.
    pub likes_count: i32,

    /// Estimated reading time in minutes, derived from content.
    pub read_time: i32,

    pub is_published: bool,

    /// Assigned once at creation from the title; never regenerated,
    /// so published URLs survive title edits.
    #[sea_orm(unique)]
    pub slug: String,

    pub published_at: String,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::AuthorId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Users,
    #[sea_orm(has_many = "super::blog_likes::Entity")]
    BlogLikes,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::blog_likes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BlogLikes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
