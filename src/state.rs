use std::sync::Arc;
use tokio::sync::RwLock;

use crate::auth::TokenIssuer;
use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, BlogService, SeaOrmAuthService, SeaOrmBlogService, SeaOrmUserService, UserService,
};

/// Everything a request handler might need, wired once at startup.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub tokens: TokenIssuer,

    pub auth_service: Arc<dyn AuthService>,

    pub blog_service: Arc<dyn BlogService>,

    pub user_service: Arc<dyn UserService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Self::with_store(config, store)
    }

    /// Wires services around an already-connected store. Tests use this
    /// with an in-memory database.
    pub fn with_store(config: Config, store: Store) -> anyhow::Result<Self> {
        let tokens = TokenIssuer::new(&config.auth.jwt_secret, config.auth.token_expiry_days);

        let auth_service = Arc::new(SeaOrmAuthService::new(
            store.clone(),
            tokens.clone(),
            config.security.clone(),
        )) as Arc<dyn AuthService>;

        let blog_service = Arc::new(SeaOrmBlogService::new(store.clone())) as Arc<dyn BlogService>;

        let user_service = Arc::new(SeaOrmUserService::new(store.clone())) as Arc<dyn UserService>;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            tokens,
            auth_service,
            blog_service,
            user_service,
        })
    }
}
