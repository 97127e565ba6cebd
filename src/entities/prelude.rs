pub use super::blog_likes::Entity as BlogLikes;
pub use super::blogs::Entity as Blogs;
pub use super::users::Entity as Users;
