pub mod auth_service;
pub use auth_service::{AuthError, AuthService, ProfileInput, RegisterInput};

pub mod auth_service_impl;
pub use auth_service_impl::SeaOrmAuthService;

pub mod blog_service;
pub use blog_service::{BlogError, BlogFilter, BlogService, CreateBlogInput, UpdateBlogInput};

pub mod blog_service_impl;
pub use blog_service_impl::SeaOrmBlogService;

pub mod user_service;
pub use user_service::{UserError, UserService};

pub mod user_service_impl;
pub use user_service_impl::SeaOrmUserService;
