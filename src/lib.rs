pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod schema;
pub mod services;
pub mod utils;
pub mod validation;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::middleware::auth::JwtService;
use crate::services::recommendations::{RecommendationApi, SkillServiceClient};
use crate::utils::AvatarUrlHelper;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub redis: redis::Client,
    pub config: Arc<Config>,
    pub jwt: JwtService,
    pub avatars: AvatarUrlHelper,
    pub recommendations: Arc<dyn RecommendationApi>,
}

impl AppState {
    pub fn new(db: DbPool, redis: redis::Client, config: Config) -> AppResult<Self> {
        let jwt = JwtService::new(&config.auth());
        let avatars = AvatarUrlHelper::new(&config.avatars())?;
        let recommendations: Arc<dyn RecommendationApi> =
            Arc::new(SkillServiceClient::new(&config.skill_service())?);
        Ok(Self {
            db,
            redis,
            config: Arc::new(config),
            jwt,
            avatars,
            recommendations,
        })
    }

    /// Swaps the recommendation backend, used by tests that fake the skill service.
    pub fn with_recommendations(mut self, api: Arc<dyn RecommendationApi>) -> Self {
        self.recommendations = api;
        self
    }
}

pub fn init_tracing(config: &Config) {
    let logging = config.logging();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => logging.level.as_str(),
            _ => "info",
        })
    });

    match logging.format.as_str() {
        "json" => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        _ => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}
