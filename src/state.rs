use crate::movies::repo::{MovieRepo, PgMovieRepo};
use crate::users::repo::{PgUserRepo, UserRepo};
use crate::{config::AppConfig, db};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub movies: Arc<dyn MovieRepo>,
    pub users: Arc<dyn UserRepo>,
}

impl AppState {
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let db = db::connect(config).await?;
        Ok(Self::from_pool(db))
    }

    /// Both repositories share the one pool.
    pub fn from_pool(db: PgPool) -> Self {
        Self {
            movies: Arc::new(PgMovieRepo::new(db.clone())),
            users: Arc::new(PgUserRepo::new(db)),
        }
    }

    pub fn from_parts(movies: Arc<dyn MovieRepo>, users: Arc<dyn UserRepo>) -> Self {
        Self { movies, users }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        use crate::memory::{seed_movies, seed_users};
        Self::from_parts(Arc::new(seed_movies()), Arc::new(seed_users()))
    }

    #[cfg(test)]
    pub fn broken() -> Self {
        use crate::memory::Unreachable;
        Self::from_parts(Arc::new(Unreachable), Arc::new(Unreachable))
    }
}
