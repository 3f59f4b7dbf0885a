use crate::config::AppConfig;
use crate::db;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let db = db::connect(&config.database_url).await?;
        Ok(Self::from_parts(db, Arc::new(config)))
    }

    pub fn from_parts(db: SqlitePool, config: Arc<AppConfig>) -> Self {
        Self { db, config }
    }

    /// State over a seeded database in `dir`, with pages read from `dir/pages`.
    #[cfg(test)]
    pub async fn fake(dir: &tempfile::TempDir) -> Self {
        use crate::config::SessionConfig;

        let db = db::test_pool(dir).await;
        let config = Arc::new(AppConfig {
            database_url: format!("sqlite://{}", dir.path().join("test.db").display()),
            session: SessionConfig {
                secret: "test-secret".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 5,
                cookie_secure: false,
            },
            pages_dir: dir.path().join("pages"),
            static_dir: dir.path().join("static"),
            host: "127.0.0.1".into(),
            port: 0,
        });
        Self::from_parts(db, config)
    }
}
