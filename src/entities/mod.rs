pub mod prelude;

pub mod blog_likes;
pub mod blogs;
pub mod users;
